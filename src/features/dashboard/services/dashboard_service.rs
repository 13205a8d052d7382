use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::dashboard::dtos::DashboardStatsDto;

/// Service for dashboard aggregates
pub struct DashboardService {
    pool: PgPool,
}

impl DashboardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn stats(&self) -> Result<DashboardStatsDto> {
        let stats = sqlx::query_as::<_, DashboardStatsDto>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM minutes) AS total_minutes,
                (SELECT COUNT(*) FROM cells) AS total_cells,
                (SELECT COUNT(*) FROM profiles WHERE status = 'ativo') AS active_members
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load dashboard stats: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(stats)
    }
}
