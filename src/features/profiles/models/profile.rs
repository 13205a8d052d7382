use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Application role, matching the `app_role` database enum
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema, Hash,
)]
#[sqlx(type_name = "app_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Leader,
    Member,
}

impl Role {
    /// Admins and leaders can moderate the feed and manage minutes
    pub fn is_moderator(&self) -> bool {
        matches!(self, Role::Admin | Role::Leader)
    }
}

/// Activity status, matching the `profile_status` database enum.
/// Wire values are kept in Portuguese for compatibility with the existing data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "profile_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProfileStatus {
    Ativo,
    Inativo,
}

/// Database model for a member profile
#[derive(Debug, Clone, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub status: ProfileStatus,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn is_active(&self) -> bool {
        self.status == ProfileStatus::Ativo
    }
}
