use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::profiles::dtos::{
    ListProfilesQuery, ProfileResponseDto, PublicProfileDto, UpdateOwnProfileDto,
    UpdateProfileAdminDto,
};
use crate::features::profiles::models::Profile;
use crate::modules::storage::MinIOClient;
use crate::shared::constants::{AVATARS_PREFIX, MAX_IMAGE_SIZE_BYTES};
use crate::shared::validation::is_image_content_type;

const PROFILE_COLUMNS: &str =
    "id, full_name, email, phone, role, status, photo_url, created_at, updated_at";

/// Service for profile operations
pub struct ProfileService {
    pool: PgPool,
    storage: Arc<MinIOClient>,
}

impl ProfileService {
    pub fn new(pool: PgPool, storage: Arc<MinIOClient>) -> Self {
        Self { pool, storage }
    }

    /// Fetch a profile row, erroring if it does not exist
    pub async fn get_by_id(&self, id: Uuid) -> Result<Profile> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {} FROM profiles WHERE id = $1",
            PROFILE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch profile {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        profile.ok_or_else(|| AppError::NotFound(format!("Profile {} not found", id)))
    }

    pub async fn get(&self, id: Uuid) -> Result<ProfileResponseDto> {
        Ok(self.get_by_id(id).await?.into())
    }

    pub async fn get_public(&self, id: Uuid) -> Result<PublicProfileDto> {
        Ok(self.get_by_id(id).await?.into())
    }

    /// List profiles with optional role/status filters, ordered by name
    pub async fn list(&self, query: &ListProfilesQuery) -> Result<Vec<ProfileResponseDto>> {
        let profiles = sqlx::query_as::<_, Profile>(&format!(
            r#"
            SELECT {}
            FROM profiles
            WHERE ($1::app_role IS NULL OR role = $1)
              AND ($2::profile_status IS NULL OR status = $2)
            ORDER BY full_name
            "#,
            PROFILE_COLUMNS
        ))
        .bind(query.role)
        .bind(query.status)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list profiles: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(profiles.into_iter().map(|p| p.into()).collect())
    }

    /// Update the caller's own name, phone or photo
    pub async fn update_own(
        &self,
        id: Uuid,
        data: &UpdateOwnProfileDto,
    ) -> Result<ProfileResponseDto> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            r#"
            UPDATE profiles
            SET full_name = COALESCE($2, full_name),
                phone = COALESCE($3, phone),
                photo_url = COALESCE($4, photo_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        ))
        .bind(id)
        .bind(data.full_name.as_deref())
        .bind(data.phone.as_deref())
        .bind(data.photo_url.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update profile {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        profile
            .map(|p| p.into())
            .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", id)))
    }

    /// Store a profile photo and point `photo_url` at it
    pub async fn upload_photo(
        &self,
        id: Uuid,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<ProfileResponseDto> {
        if !is_image_content_type(content_type) {
            return Err(AppError::Validation(
                "Apenas imagens JPEG, PNG, WebP ou GIF são aceitas".to_string(),
            ));
        }
        if data.len() > MAX_IMAGE_SIZE_BYTES {
            return Err(AppError::Validation(
                "A imagem excede o limite de 5 MB".to_string(),
            ));
        }

        let key = format!("{}/{}/{}-{}", AVATARS_PREFIX, id, Uuid::new_v4(), filename);
        self.storage.upload(&key, data, content_type).await?;
        let url = self.storage.get_presigned_url(&key).await?;

        let profile = sqlx::query_as::<_, Profile>(&format!(
            "UPDATE profiles SET photo_url = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            PROFILE_COLUMNS
        ))
        .bind(id)
        .bind(&url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to record photo for profile {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        profile
            .map(|p| p.into())
            .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", id)))
    }

    /// Admin update of role and activity status
    pub async fn update_admin(
        &self,
        id: Uuid,
        data: &UpdateProfileAdminDto,
    ) -> Result<ProfileResponseDto> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            r#"
            UPDATE profiles
            SET role = COALESCE($2, role),
                status = COALESCE($3, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        ))
        .bind(id)
        .bind(data.role)
        .bind(data.status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update profile {} as admin: {:?}", id, e);
            AppError::Database(e)
        })?;

        profile
            .map(|p| p.into())
            .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", id)))
    }

    /// Delete a profile. Removal is immediate and irreversible.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete profile {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Profile {} not found", id)));
        }

        tracing::info!("Deleted profile: {}", id);
        Ok(())
    }
}
