use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::minutes::models::{Minute, MinuteStatus, MinuteType};

/// Request to create a minute
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMinuteDto {
    /// Sequential number (e.g. "ATA-2026-001"); generated when omitted
    pub number: Option<String>,
    #[validate(length(min = 1, max = 300, message = "Título é obrigatório"))]
    pub title: String,
    #[serde(rename = "type")]
    pub minute_type: MinuteType,
    pub date: NaiveDate,
    #[validate(length(min = 1, message = "Local é obrigatório"))]
    pub location: String,
}

/// Request to edit a minute's header fields
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateMinuteDto {
    #[validate(length(min = 1, max = 300))]
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub minute_type: Option<MinuteType>,
    pub date: Option<NaiveDate>,
    pub location: Option<String>,
}

/// AI-generated summary, parsed from the webhook-written JSON payload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MinuteSummaryDto {
    pub summary: Option<String>,
    #[serde(default)]
    pub decisions: Vec<String>,
    #[serde(default)]
    pub pending_items: Vec<String>,
    #[serde(default)]
    pub participants: Vec<String>,
}

/// Full minute representation
#[derive(Debug, Serialize, ToSchema)]
pub struct MinuteResponseDto {
    pub id: Uuid,
    pub number: String,
    pub title: String,
    #[serde(rename = "type")]
    pub minute_type: MinuteType,
    pub date: NaiveDate,
    pub location: String,
    pub status: MinuteStatus,
    pub has_pdf: bool,
    pub summary: Option<MinuteSummaryDto>,
    pub responsible_user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Minute> for MinuteResponseDto {
    fn from(minute: Minute) -> Self {
        // A malformed summary payload renders as absent rather than failing
        let summary = minute
            .summary
            .and_then(|value| serde_json::from_value(value).ok());

        Self {
            id: minute.id,
            number: minute.number,
            title: minute.title,
            minute_type: minute.minute_type,
            date: minute.date,
            location: minute.location,
            status: minute.status,
            has_pdf: minute.pdf_url.is_some(),
            summary,
            responsible_user_id: minute.responsible_user_id,
            created_at: minute.created_at,
            updated_at: minute.updated_at,
        }
    }
}

/// List row with the responsible profile's name joined in
#[derive(Debug, Serialize, ToSchema, sqlx::FromRow)]
pub struct MinuteListItemDto {
    pub id: Uuid,
    pub number: String,
    pub title: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub minute_type: MinuteType,
    pub date: NaiveDate,
    pub status: MinuteStatus,
    pub has_pdf: bool,
    pub responsible_name: Option<String>,
}

/// Freshly minted minute number
#[derive(Debug, Serialize, ToSchema)]
pub struct GeneratedNumberDto {
    pub number: String,
}

/// Presigned download URL for an attached PDF
#[derive(Debug, Serialize, ToSchema)]
pub struct PdfUrlDto {
    pub url: String,
}

/// Audit log entry with the acting user's name
#[derive(Debug, Serialize, ToSchema, sqlx::FromRow)]
pub struct MinuteLogDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: Option<String>,
    pub action: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}
