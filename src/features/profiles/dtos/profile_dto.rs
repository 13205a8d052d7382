use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::profiles::models::{Profile, ProfileStatus, Role};

/// Full profile response (self and admin views)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponseDto {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub status: ProfileStatus,
    pub photo_url: Option<String>,
}

impl From<Profile> for ProfileResponseDto {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id,
            full_name: p.full_name,
            email: p.email,
            phone: p.phone,
            role: p.role,
            status: p.status,
            photo_url: p.photo_url,
        }
    }
}

/// Reduced view exposed to other members
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublicProfileDto {
    pub id: Uuid,
    pub full_name: String,
    pub role: Role,
    pub photo_url: Option<String>,
}

impl From<Profile> for PublicProfileDto {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id,
            full_name: p.full_name,
            role: p.role,
            photo_url: p.photo_url,
        }
    }
}

/// Self-service profile update
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateOwnProfileDto {
    #[validate(length(min = 1, max = 200, message = "full_name must be 1-200 characters"))]
    pub full_name: Option<String>,
    #[validate(length(max = 30, message = "phone must be at most 30 characters"))]
    pub phone: Option<String>,
    pub photo_url: Option<String>,
}

/// Admin update of role and status
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProfileAdminDto {
    pub role: Option<Role>,
    pub status: Option<ProfileStatus>,
}

/// Filters for the admin profile listing
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListProfilesQuery {
    pub role: Option<Role>,
    pub status: Option<ProfileStatus>,
}
