use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Minute lifecycle status, matching the `minute_status` database enum.
/// Wire values are kept in Portuguese for compatibility with the existing data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "minute_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MinuteStatus {
    EmAndamento,
    AssinadaArquivada,
}

/// Kind of meeting the minute records, matching the `minute_type` enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "minute_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MinuteType {
    Conselho,
    Assembleia,
    Ministerio,
    Celula,
    Outro,
}

/// Meeting-minute database model
#[derive(Debug, Clone, FromRow)]
pub struct Minute {
    pub id: Uuid,
    pub number: String,
    pub title: String,
    #[sqlx(rename = "type")]
    pub minute_type: MinuteType,
    pub date: NaiveDate,
    pub location: String,
    pub status: MinuteStatus,
    pub pdf_url: Option<String>,
    /// Webhook-written summary payload (free-form JSON)
    pub summary: Option<serde_json::Value>,
    pub responsible_user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
