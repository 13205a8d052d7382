use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Cell (small fellowship group) database model
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Cell {
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

/// Membership row linking a profile to a cell
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CellMember {
    pub id: Uuid,
    pub cell_id: Uuid,
    pub member_id: Uuid,
    pub role: String,
    pub joined_at: DateTime<Utc>,
}

/// A held cell meeting
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct CellMeeting {
    pub id: Uuid,
    pub cell_id: Uuid,
    pub meeting_date: NaiveDate,
    pub topic: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Attendance record for one member at one meeting
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CellAttendance {
    pub id: Uuid,
    pub meeting_id: Uuid,
    pub member_id: Uuid,
    pub present: bool,
    pub created_at: DateTime<Utc>,
}
