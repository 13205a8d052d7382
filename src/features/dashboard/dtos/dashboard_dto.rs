use serde::Serialize;
use utoipa::ToSchema;

/// Aggregate counters for the dashboard
#[derive(Debug, Serialize, ToSchema, sqlx::FromRow)]
pub struct DashboardStatsDto {
    pub total_minutes: i64,
    pub total_cells: i64,
    pub active_members: i64,
}
