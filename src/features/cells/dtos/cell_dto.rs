use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::cells::models::{Cell, CellMeeting};

/// Request to create a cell
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCellDto {
    #[validate(length(min = 1, max = 200, message = "Nome é obrigatório"))]
    pub name: String,
    #[validate(length(min = 1, message = "Endereço é obrigatório"))]
    pub address: String,
    pub number: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub meeting_day: Option<String>,
    pub meeting_time: Option<String>,
    pub description: Option<String>,
    pub leader_id: Uuid,
    pub co_leader_id: Option<Uuid>,
}

/// Request to update a cell (all fields optional)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCellDto {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub address: Option<String>,
    pub number: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub meeting_day: Option<String>,
    pub meeting_time: Option<String>,
    pub description: Option<String>,
    pub leader_id: Option<Uuid>,
    pub co_leader_id: Option<Uuid>,
}

/// Explicit coordinate save, used by the manual map-click override
#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveLocationDto {
    pub latitude: f64,
    pub longitude: f64,
}

/// Query parameters for postal-code resolution
#[derive(Debug, Deserialize, IntoParams)]
pub struct ResolveAddressQuery {
    /// Postal code (CEP), with or without hyphen
    pub postal_code: String,
}

/// Full cell representation
#[derive(Debug, Serialize, ToSchema)]
pub struct CellResponseDto {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub number: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub meeting_day: Option<String>,
    pub meeting_time: Option<String>,
    pub description: Option<String>,
    pub leader_id: Uuid,
    pub co_leader_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Cell> for CellResponseDto {
    fn from(cell: Cell) -> Self {
        Self {
            id: cell.id,
            name: cell.name,
            address: cell.address,
            number: cell.number,
            neighborhood: cell.neighborhood,
            city: cell.city,
            state: cell.state,
            latitude: cell.latitude,
            longitude: cell.longitude,
            meeting_day: cell.meeting_day,
            meeting_time: cell.meeting_time,
            description: cell.description,
            leader_id: cell.leader_id,
            co_leader_id: cell.co_leader_id,
            created_at: cell.created_at,
            updated_at: cell.updated_at,
        }
    }
}

/// List row with leader names joined in
#[derive(Debug, Serialize, ToSchema, sqlx::FromRow)]
pub struct CellListItemDto {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub meeting_day: Option<String>,
    pub meeting_time: Option<String>,
    pub leader_name: Option<String>,
    pub co_leader_name: Option<String>,
    pub member_count: i64,
}

/// Request to add a member to a cell
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddCellMemberDto {
    pub member_id: Uuid,
    /// Role inside the cell ("member" by default)
    pub role: Option<String>,
}

/// Membership row with the member's profile name joined in
#[derive(Debug, Serialize, ToSchema, sqlx::FromRow)]
pub struct CellMemberDto {
    pub id: Uuid,
    pub member_id: Uuid,
    pub full_name: String,
    pub photo_url: Option<String>,
    pub role: String,
    pub joined_at: DateTime<Utc>,
}

/// Request to register a held meeting
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMeetingDto {
    pub meeting_date: NaiveDate,
    pub topic: Option<String>,
    pub notes: Option<String>,
}

/// One member's presence flag within an attendance submission
#[derive(Debug, Deserialize, ToSchema)]
pub struct AttendanceEntryDto {
    pub member_id: Uuid,
    pub present: bool,
}

/// Attendance submission for a meeting, upserted per member
#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordAttendanceDto {
    pub entries: Vec<AttendanceEntryDto>,
}

/// Meeting with its attendance rows
#[derive(Debug, Serialize, ToSchema)]
pub struct MeetingWithAttendanceDto {
    pub id: Uuid,
    pub cell_id: Uuid,
    pub meeting_date: NaiveDate,
    pub topic: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub attendance: Vec<AttendanceRowDto>,
}

/// Attendance row with the member's name
#[derive(Debug, Serialize, ToSchema, sqlx::FromRow)]
pub struct AttendanceRowDto {
    pub member_id: Uuid,
    pub full_name: String,
    pub present: bool,
}

impl MeetingWithAttendanceDto {
    pub fn from_parts(meeting: CellMeeting, attendance: Vec<AttendanceRowDto>) -> Self {
        Self {
            id: meeting.id,
            cell_id: meeting.cell_id,
            meeting_date: meeting.meeting_date,
            topic: meeting.topic,
            notes: meeting.notes,
            created_at: meeting.created_at,
            attendance,
        }
    }
}
