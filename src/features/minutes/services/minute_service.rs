use std::sync::Arc;

use chrono::{Datelike, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::minutes::dtos::{
    CreateMinuteDto, MinuteListItemDto, MinuteLogDto, MinuteResponseDto, UpdateMinuteDto,
};
use crate::features::minutes::models::{Minute, MinuteStatus};
use crate::features::minutes::services::SummaryClient;
use crate::modules::storage::MinIOClient;
use crate::shared::constants::{DOCUMENTS_PREFIX, MAX_PDF_SIZE_BYTES};

const MINUTE_COLUMNS: &str = "id, number, title, type, date, location, status, pdf_url, \
     summary, responsible_user_id, created_at, updated_at";

/// Service for meeting minutes
pub struct MinuteService {
    pool: PgPool,
    storage: Arc<MinIOClient>,
    summary_client: SummaryClient,
}

impl MinuteService {
    pub fn new(pool: PgPool, storage: Arc<MinIOClient>, summary_client: SummaryClient) -> Self {
        Self {
            pool,
            storage,
            summary_client,
        }
    }

    /// Mint the next sequential minute number, e.g. `ATA-2026-014`
    pub async fn generate_number(&self) -> Result<String> {
        let seq = sqlx::query_scalar::<_, i64>("SELECT nextval('minute_number_seq')")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to advance minute number sequence: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(format!("ATA-{}-{:03}", Utc::now().year(), seq))
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        data: &CreateMinuteDto,
    ) -> Result<MinuteResponseDto> {
        let number = match &data.number {
            Some(number) => number.clone(),
            None => self.generate_number().await?,
        };

        let minute = sqlx::query_as::<_, Minute>(&format!(
            r#"
            INSERT INTO minutes (number, title, type, date, location, responsible_user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            MINUTE_COLUMNS
        ))
        .bind(&number)
        .bind(&data.title)
        .bind(data.minute_type)
        .bind(data.date)
        .bind(&data.location)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create minute: {:?}", e);
            AppError::Database(e)
        })?;

        self.add_log(minute.id, user_id, "create", &format!("Ata {} criada", number))
            .await?;

        tracing::info!("Created minute {} ({})", number, minute.id);
        Ok(minute.into())
    }

    /// List minutes newest-date-first with the responsible profile's name
    pub async fn list(&self) -> Result<Vec<MinuteListItemDto>> {
        let minutes = sqlx::query_as::<_, MinuteListItemDto>(
            r#"
            SELECT m.id, m.number, m.title, m.type, m.date, m.status,
                   m.pdf_url IS NOT NULL AS has_pdf,
                   p.full_name AS responsible_name
            FROM minutes m
            LEFT JOIN profiles p ON p.id = m.responsible_user_id
            ORDER BY m.date DESC, m.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list minutes: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(minutes)
    }

    async fn get_model(&self, id: Uuid) -> Result<Minute> {
        let minute = sqlx::query_as::<_, Minute>(&format!(
            "SELECT {} FROM minutes WHERE id = $1",
            MINUTE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch minute {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        minute.ok_or_else(|| AppError::NotFound(format!("Ata {} não encontrada", id)))
    }

    pub async fn get(&self, id: Uuid) -> Result<MinuteResponseDto> {
        Ok(self.get_model(id).await?.into())
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        data: &UpdateMinuteDto,
    ) -> Result<MinuteResponseDto> {
        let minute = sqlx::query_as::<_, Minute>(&format!(
            r#"
            UPDATE minutes
            SET title = COALESCE($2, title),
                type = COALESCE($3, type),
                date = COALESCE($4, date),
                location = COALESCE($5, location),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            MINUTE_COLUMNS
        ))
        .bind(id)
        .bind(data.title.as_deref())
        .bind(data.minute_type)
        .bind(data.date)
        .bind(data.location.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update minute {}: {:?}", id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Ata {} não encontrada", id)))?;

        self.add_log(id, user_id, "update", "Dados da ata atualizados")
            .await?;

        Ok(minute.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let minute = self.get_model(id).await?;

        if let Some(key) = &minute.pdf_url {
            // Best effort; a dangling object must not block the delete
            if let Err(e) = self.storage.delete(key).await {
                tracing::warn!("Failed to delete PDF for minute {}: {}", id, e);
            }
        }

        sqlx::query("DELETE FROM minutes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete minute {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        tracing::info!("Deleted minute {}", id);
        Ok(())
    }

    /// Attach a signed PDF. Only `application/pdf` up to 10 MB is accepted.
    pub async fn upload_pdf(
        &self,
        user_id: Uuid,
        id: Uuid,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<MinuteResponseDto> {
        self.get_model(id).await?;

        if content_type != "application/pdf" {
            return Err(AppError::Validation(
                "Apenas arquivos PDF são aceitos".to_string(),
            ));
        }
        if data.len() > MAX_PDF_SIZE_BYTES {
            return Err(AppError::Validation(
                "O arquivo excede o limite de 10 MB".to_string(),
            ));
        }

        let key = format!("{}/minutes/{}/{}", DOCUMENTS_PREFIX, id, filename);
        self.storage.upload(&key, data, content_type).await?;

        let minute = sqlx::query_as::<_, Minute>(&format!(
            "UPDATE minutes SET pdf_url = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            MINUTE_COLUMNS
        ))
        .bind(id)
        .bind(&key)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to record PDF for minute {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        self.add_log(id, user_id, "upload", &format!("PDF anexado: {}", filename))
            .await?;

        Ok(minute.into())
    }

    /// Presigned download URL for the attached PDF
    pub async fn pdf_url(&self, id: Uuid) -> Result<String> {
        let minute = self.get_model(id).await?;
        let key = minute
            .pdf_url
            .ok_or_else(|| AppError::NotFound("Esta ata não possui PDF anexado".to_string()))?;

        self.storage.get_presigned_url(&key).await
    }

    /// Archive a minute. A signed PDF must be attached first.
    pub async fn archive(&self, user_id: Uuid, id: Uuid) -> Result<MinuteResponseDto> {
        let minute = self.get_model(id).await?;

        if minute.pdf_url.is_none() {
            return Err(AppError::Validation(
                "Anexe o PDF assinado antes de arquivar".to_string(),
            ));
        }

        let minute = sqlx::query_as::<_, Minute>(&format!(
            "UPDATE minutes SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            MINUTE_COLUMNS
        ))
        .bind(id)
        .bind(MinuteStatus::AssinadaArquivada)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to archive minute {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        self.add_log(id, user_id, "archive", "Ata assinada e arquivada")
            .await?;

        tracing::info!("Archived minute {}", id);
        Ok(minute.into())
    }

    /// Trigger the AI-summary webhook, then re-fetch the minute so the
    /// webhook-written summary fields come back fresh
    pub async fn request_summary(&self, user_id: Uuid, id: Uuid) -> Result<MinuteResponseDto> {
        self.get_model(id).await?;

        self.summary_client.request_summary(id).await?;

        self.add_log(id, user_id, "ai_summary", "Resumo por IA gerado")
            .await?;

        self.get(id).await
    }

    /// Audit history, newest first
    pub async fn logs(&self, id: Uuid) -> Result<Vec<MinuteLogDto>> {
        let logs = sqlx::query_as::<_, MinuteLogDto>(
            r#"
            SELECT l.id, l.user_id, p.full_name AS user_name, l.action, l.description,
                   l.created_at
            FROM minutes_logs l
            LEFT JOIN profiles p ON p.id = l.user_id
            WHERE l.minute_id = $1
            ORDER BY l.created_at DESC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch logs for minute {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        Ok(logs)
    }

    async fn add_log(
        &self,
        minute_id: Uuid,
        user_id: Uuid,
        action: &str,
        description: &str,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO minutes_logs (minute_id, user_id, action, description) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(minute_id)
        .bind(user_id)
        .bind(action)
        .bind(description)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to write log for minute {}: {:?}", minute_id, e);
            AppError::Database(e)
        })?;

        Ok(())
    }
}
