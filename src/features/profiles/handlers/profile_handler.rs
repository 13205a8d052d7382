use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::profiles::dtos::{
    ListProfilesQuery, ProfileResponseDto, PublicProfileDto, UpdateOwnProfileDto,
    UpdateProfileAdminDto,
};
use crate::features::profiles::services::ProfileService;
use crate::shared::types::ApiResponse;

/// Get the current user's profile
#[utoipa::path(
    get,
    path = "/api/profiles/me",
    responses(
        (status = 200, description = "Current profile", body = ApiResponse<ProfileResponseDto>),
        (status = 404, description = "Profile not found")
    ),
    security(("bearer_auth" = [])),
    tag = "profiles"
)]
pub async fn get_me(
    State(service): State<Arc<ProfileService>>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<ProfileResponseDto>>> {
    let profile = service.get(user.id).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}

/// Update the current user's profile
#[utoipa::path(
    put,
    path = "/api/profiles/me",
    request_body = UpdateOwnProfileDto,
    responses(
        (status = 200, description = "Updated profile", body = ApiResponse<ProfileResponseDto>),
    ),
    security(("bearer_auth" = [])),
    tag = "profiles"
)]
pub async fn update_me(
    State(service): State<Arc<ProfileService>>,
    user: AuthenticatedUser,
    AppJson(data): AppJson<UpdateOwnProfileDto>,
) -> Result<Json<ApiResponse<ProfileResponseDto>>> {
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let profile = service.update_own(user.id, &data).await?;
    Ok(Json(ApiResponse::success(
        Some(profile),
        Some("Perfil atualizado".to_string()),
        None,
    )))
}

/// Upload the current user's profile photo
///
/// Accepts multipart/form-data with a single `file` field.
#[utoipa::path(
    post,
    path = "/api/profiles/me/photo",
    request_body(content_type = "multipart/form-data", description = "Image file"),
    responses(
        (status = 200, description = "Updated profile", body = ApiResponse<ProfileResponseDto>),
        (status = 400, description = "Not an image or over the size limit")
    ),
    security(("bearer_auth" = [])),
    tag = "profiles"
)]
pub async fn upload_photo(
    State(service): State<Arc<ProfileService>>,
    user: AuthenticatedUser,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<ProfileResponseDto>>> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name = "foto.jpg".to_string();
    let mut content_type = "application/octet-stream".to_string();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        if field.name() != Some("file") {
            continue;
        }

        if let Some(ct) = field.content_type() {
            content_type = ct.to_string();
        }
        if let Some(name) = field.file_name() {
            file_name = name.to_string();
        }

        let data = field.bytes().await.map_err(|e| {
            AppError::BadRequest(format!("Failed to read file data: {}", e))
        })?;
        file_data = Some(data.to_vec());
    }

    let file_data =
        file_data.ok_or_else(|| AppError::BadRequest("Nenhum arquivo enviado".to_string()))?;

    let profile = service
        .upload_photo(user.id, &file_name, &content_type, file_data)
        .await?;

    Ok(Json(ApiResponse::success(
        Some(profile),
        Some("Foto atualizada".to_string()),
        None,
    )))
}

/// Get the public view of a member's profile
#[utoipa::path(
    get,
    path = "/api/profiles/{id}",
    params(("id" = Uuid, Path, description = "Profile id")),
    responses(
        (status = 200, description = "Public profile", body = ApiResponse<PublicProfileDto>),
        (status = 404, description = "Profile not found")
    ),
    security(("bearer_auth" = [])),
    tag = "profiles"
)]
pub async fn get_public_profile(
    State(service): State<Arc<ProfileService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PublicProfileDto>>> {
    let profile = service.get_public(id).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}

/// List all profiles (admin)
#[utoipa::path(
    get,
    path = "/api/profiles",
    params(ListProfilesQuery),
    responses(
        (status = 200, description = "Profiles", body = ApiResponse<Vec<ProfileResponseDto>>),
        (status = 403, description = "Admin access required")
    ),
    security(("bearer_auth" = [])),
    tag = "profiles"
)]
pub async fn list_profiles(
    State(service): State<Arc<ProfileService>>,
    RequireAdmin(_user): RequireAdmin,
    Query(query): Query<ListProfilesQuery>,
) -> Result<Json<ApiResponse<Vec<ProfileResponseDto>>>> {
    let profiles = service.list(&query).await?;
    let total = profiles.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(profiles),
        None,
        Some(crate::shared::types::Meta { total }),
    )))
}

/// Update a member's role or status (admin)
#[utoipa::path(
    put,
    path = "/api/profiles/{id}",
    params(("id" = Uuid, Path, description = "Profile id")),
    request_body = UpdateProfileAdminDto,
    responses(
        (status = 200, description = "Updated profile", body = ApiResponse<ProfileResponseDto>),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Profile not found")
    ),
    security(("bearer_auth" = [])),
    tag = "profiles"
)]
pub async fn update_profile_admin(
    State(service): State<Arc<ProfileService>>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<Uuid>,
    AppJson(data): AppJson<UpdateProfileAdminDto>,
) -> Result<Json<ApiResponse<ProfileResponseDto>>> {
    let profile = service.update_admin(id, &data).await?;
    Ok(Json(ApiResponse::success(
        Some(profile),
        Some("Perfil atualizado".to_string()),
        None,
    )))
}

/// Delete a profile (admin)
#[utoipa::path(
    delete,
    path = "/api/profiles/{id}",
    params(("id" = Uuid, Path, description = "Profile id")),
    responses(
        (status = 200, description = "Profile deleted"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Profile not found")
    ),
    security(("bearer_auth" = [])),
    tag = "profiles"
)]
pub async fn delete_profile(
    State(service): State<Arc<ProfileService>>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Perfil removido".to_string()),
        None,
    )))
}
