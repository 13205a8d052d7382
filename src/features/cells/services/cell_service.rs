use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::cells::dtos::{
    AddCellMemberDto, AttendanceRowDto, CellListItemDto, CellMemberDto, CellResponseDto,
    CreateCellDto, CreateMeetingDto, MeetingWithAttendanceDto, RecordAttendanceDto,
    SaveLocationDto, UpdateCellDto,
};
use crate::features::cells::models::{Cell, CellMeeting, ResolvedLocation};
use crate::features::cells::services::AddressResolver;

const CELL_COLUMNS: &str = "id, name, address, number, neighborhood, city, state, latitude, \
     longitude, meeting_day, meeting_time, description, leader_id, co_leader_id, created_at, \
     updated_at";

/// Service for cell management and location resolution
pub struct CellService {
    pool: PgPool,
    resolver: Arc<AddressResolver>,
}

impl CellService {
    pub fn new(pool: PgPool, resolver: Arc<AddressResolver>) -> Self {
        Self { pool, resolver }
    }

    /// Resolve a postal code through the geocoding cascade
    pub async fn resolve_address(&self, postal_code: &str) -> Result<ResolvedLocation> {
        self.resolver.resolve(postal_code).await
    }

    pub async fn create(&self, data: &CreateCellDto) -> Result<CellResponseDto> {
        let cell = sqlx::query_as::<_, Cell>(&format!(
            r#"
            INSERT INTO cells (name, address, number, neighborhood, city, state, latitude,
                               longitude, meeting_day, meeting_time, description, leader_id,
                               co_leader_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {}
            "#,
            CELL_COLUMNS
        ))
        .bind(&data.name)
        .bind(&data.address)
        .bind(data.number.as_deref())
        .bind(data.neighborhood.as_deref())
        .bind(data.city.as_deref())
        .bind(data.state.as_deref())
        .bind(data.latitude)
        .bind(data.longitude)
        .bind(data.meeting_day.as_deref())
        .bind(data.meeting_time.as_deref())
        .bind(data.description.as_deref())
        .bind(data.leader_id)
        .bind(data.co_leader_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create cell: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Created cell: {} ({})", cell.name, cell.id);
        Ok(cell.into())
    }

    /// List cells with leader names and member counts
    pub async fn list(&self) -> Result<Vec<CellListItemDto>> {
        let cells = sqlx::query_as::<_, CellListItemDto>(
            r#"
            SELECT c.id, c.name, c.address, c.neighborhood, c.city, c.meeting_day,
                   c.meeting_time,
                   l.full_name AS leader_name,
                   co.full_name AS co_leader_name,
                   COUNT(cm.id) AS member_count
            FROM cells c
            LEFT JOIN profiles l ON l.id = c.leader_id
            LEFT JOIN profiles co ON co.id = c.co_leader_id
            LEFT JOIN cell_members cm ON cm.cell_id = c.id
            GROUP BY c.id, l.full_name, co.full_name
            ORDER BY c.name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list cells: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(cells)
    }

    pub async fn get(&self, id: Uuid) -> Result<CellResponseDto> {
        let cell = sqlx::query_as::<_, Cell>(&format!(
            "SELECT {} FROM cells WHERE id = $1",
            CELL_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch cell {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        cell.map(|c| c.into())
            .ok_or_else(|| AppError::NotFound(format!("Cell {} not found", id)))
    }

    pub async fn update(&self, id: Uuid, data: &UpdateCellDto) -> Result<CellResponseDto> {
        let cell = sqlx::query_as::<_, Cell>(&format!(
            r#"
            UPDATE cells
            SET name = COALESCE($2, name),
                address = COALESCE($3, address),
                number = COALESCE($4, number),
                neighborhood = COALESCE($5, neighborhood),
                city = COALESCE($6, city),
                state = COALESCE($7, state),
                meeting_day = COALESCE($8, meeting_day),
                meeting_time = COALESCE($9, meeting_time),
                description = COALESCE($10, description),
                leader_id = COALESCE($11, leader_id),
                co_leader_id = COALESCE($12, co_leader_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            CELL_COLUMNS
        ))
        .bind(id)
        .bind(data.name.as_deref())
        .bind(data.address.as_deref())
        .bind(data.number.as_deref())
        .bind(data.neighborhood.as_deref())
        .bind(data.city.as_deref())
        .bind(data.state.as_deref())
        .bind(data.meeting_day.as_deref())
        .bind(data.meeting_time.as_deref())
        .bind(data.description.as_deref())
        .bind(data.leader_id)
        .bind(data.co_leader_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update cell {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        cell.map(|c| c.into())
            .ok_or_else(|| AppError::NotFound(format!("Cell {} not found", id)))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM cells WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete cell {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Cell {} not found", id)));
        }

        tracing::info!("Deleted cell: {}", id);
        Ok(())
    }

    /// Persist explicit coordinates (map-click manual override)
    pub async fn save_location(&self, id: Uuid, data: &SaveLocationDto) -> Result<CellResponseDto> {
        let cell = sqlx::query_as::<_, Cell>(&format!(
            r#"
            UPDATE cells
            SET latitude = $2, longitude = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            CELL_COLUMNS
        ))
        .bind(id)
        .bind(data.latitude)
        .bind(data.longitude)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to save location for cell {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        cell.map(|c| c.into())
            .ok_or_else(|| AppError::NotFound(format!("Cell {} not found", id)))
    }

    pub async fn add_member(
        &self,
        cell_id: Uuid,
        data: &AddCellMemberDto,
    ) -> Result<CellMemberDto> {
        // The cell must exist before we touch memberships
        self.get(cell_id).await?;

        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM cell_members WHERE cell_id = $1 AND member_id = $2",
        )
        .bind(cell_id)
        .bind(data.member_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check membership: {:?}", e);
            AppError::Database(e)
        })?;

        if existing > 0 {
            return Err(AppError::Conflict(
                "Membro já faz parte desta célula".to_string(),
            ));
        }

        let member = sqlx::query_as::<_, CellMemberDto>(
            r#"
            WITH inserted AS (
                INSERT INTO cell_members (cell_id, member_id, role)
                VALUES ($1, $2, $3)
                RETURNING id, member_id, role, joined_at
            )
            SELECT i.id, i.member_id, p.full_name, p.photo_url, i.role, i.joined_at
            FROM inserted i
            JOIN profiles p ON p.id = i.member_id
            "#,
        )
        .bind(cell_id)
        .bind(data.member_id)
        .bind(data.role.as_deref().unwrap_or("member"))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to add member to cell {}: {:?}", cell_id, e);
            AppError::Database(e)
        })?;

        Ok(member)
    }

    pub async fn remove_member(&self, cell_id: Uuid, member_id: Uuid) -> Result<()> {
        let result =
            sqlx::query("DELETE FROM cell_members WHERE cell_id = $1 AND member_id = $2")
                .bind(cell_id)
                .bind(member_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to remove member from cell {}: {:?}", cell_id, e);
                    AppError::Database(e)
                })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(
                "Membro não encontrado nesta célula".to_string(),
            ));
        }

        Ok(())
    }

    pub async fn list_members(&self, cell_id: Uuid) -> Result<Vec<CellMemberDto>> {
        let members = sqlx::query_as::<_, CellMemberDto>(
            r#"
            SELECT cm.id, cm.member_id, p.full_name, p.photo_url, cm.role, cm.joined_at
            FROM cell_members cm
            JOIN profiles p ON p.id = cm.member_id
            WHERE cm.cell_id = $1
            ORDER BY p.full_name
            "#,
        )
        .bind(cell_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list members of cell {}: {:?}", cell_id, e);
            AppError::Database(e)
        })?;

        Ok(members)
    }

    pub async fn create_meeting(
        &self,
        cell_id: Uuid,
        data: &CreateMeetingDto,
    ) -> Result<CellMeeting> {
        self.get(cell_id).await?;

        let meeting = sqlx::query_as::<_, CellMeeting>(
            r#"
            INSERT INTO cell_meetings (cell_id, meeting_date, topic, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING id, cell_id, meeting_date, topic, notes, created_at
            "#,
        )
        .bind(cell_id)
        .bind(data.meeting_date)
        .bind(data.topic.as_deref())
        .bind(data.notes.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create meeting for cell {}: {:?}", cell_id, e);
            AppError::Database(e)
        })?;

        Ok(meeting)
    }

    /// List meetings newest-first, each with its attendance rows
    pub async fn list_meetings(&self, cell_id: Uuid) -> Result<Vec<MeetingWithAttendanceDto>> {
        let meetings = sqlx::query_as::<_, CellMeeting>(
            r#"
            SELECT id, cell_id, meeting_date, topic, notes, created_at
            FROM cell_meetings
            WHERE cell_id = $1
            ORDER BY meeting_date DESC
            "#,
        )
        .bind(cell_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list meetings of cell {}: {:?}", cell_id, e);
            AppError::Database(e)
        })?;

        let mut result = Vec::with_capacity(meetings.len());
        for meeting in meetings {
            let attendance = self.attendance_rows(meeting.id).await?;
            result.push(MeetingWithAttendanceDto::from_parts(meeting, attendance));
        }

        Ok(result)
    }

    async fn attendance_rows(&self, meeting_id: Uuid) -> Result<Vec<AttendanceRowDto>> {
        sqlx::query_as::<_, AttendanceRowDto>(
            r#"
            SELECT ca.member_id, p.full_name, ca.present
            FROM cell_attendance ca
            JOIN profiles p ON p.id = ca.member_id
            WHERE ca.meeting_id = $1
            ORDER BY p.full_name
            "#,
        )
        .bind(meeting_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch attendance for meeting {}: {:?}", meeting_id, e);
            AppError::Database(e)
        })
    }

    /// Upsert attendance flags for a meeting, one row per member
    pub async fn record_attendance(
        &self,
        meeting_id: Uuid,
        data: &RecordAttendanceDto,
    ) -> Result<Vec<AttendanceRowDto>> {
        for entry in &data.entries {
            sqlx::query(
                r#"
                INSERT INTO cell_attendance (meeting_id, member_id, present)
                VALUES ($1, $2, $3)
                ON CONFLICT (meeting_id, member_id)
                DO UPDATE SET present = EXCLUDED.present
                "#,
            )
            .bind(meeting_id)
            .bind(entry.member_id)
            .bind(entry.present)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to record attendance for meeting {}: {:?}",
                    meeting_id,
                    e
                );
                AppError::Database(e)
            })?;
        }

        self.attendance_rows(meeting_id).await
    }
}
