use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireModerator;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::feed::dtos::{
    CreateCommentDto, CreatePostDto, FeedPageDto, LikeToggleDto, UpdatePostDto, UploadedImageDto,
};
use crate::features::feed::services::FeedService;
use crate::features::feed::store::{FeedComment, FeedPost};
use crate::shared::types::ApiResponse;

#[derive(Debug, Deserialize, IntoParams)]
pub struct FeedQuery {
    /// Page number (1-indexed); pages append into the loaded feed
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

/// Load a feed page (10 posts, pinned first, newest first)
#[utoipa::path(
    get,
    path = "/api/feed",
    params(FeedQuery),
    responses(
        (status = 200, description = "Accumulated feed", body = ApiResponse<FeedPageDto>),
    ),
    security(("bearer_auth" = [])),
    tag = "feed"
)]
pub async fn load_feed(
    State(service): State<Arc<FeedService>>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<ApiResponse<FeedPageDto>>> {
    let page = service.load_page(query.page).await?;
    Ok(Json(ApiResponse::success(Some(page), None, None)))
}

/// Create a post (weekly quota applies)
#[utoipa::path(
    post,
    path = "/api/feed/posts",
    request_body = CreatePostDto,
    responses(
        (status = 200, description = "Created post", body = ApiResponse<FeedPost>),
        (status = 429, description = "Weekly quota reached")
    ),
    security(("bearer_auth" = [])),
    tag = "feed"
)]
pub async fn create_post(
    State(service): State<Arc<FeedService>>,
    user: AuthenticatedUser,
    AppJson(data): AppJson<CreatePostDto>,
) -> Result<Json<ApiResponse<FeedPost>>> {
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let post = service.create_post(&user, &data).await?;
    Ok(Json(ApiResponse::success(
        Some(post),
        Some("Publicação criada".to_string()),
        None,
    )))
}

/// Upload a post image
///
/// Accepts multipart/form-data with a single `file` field. The returned
/// URL goes into `image_url` when creating the post.
#[utoipa::path(
    post,
    path = "/api/feed/images",
    request_body(content_type = "multipart/form-data", description = "Image file"),
    responses(
        (status = 200, description = "Stored image URL", body = ApiResponse<UploadedImageDto>),
        (status = 400, description = "Not an image or over the size limit")
    ),
    security(("bearer_auth" = [])),
    tag = "feed"
)]
pub async fn upload_image(
    State(service): State<Arc<FeedService>>,
    user: AuthenticatedUser,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<UploadedImageDto>>> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name = "imagem.jpg".to_string();
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

    let url = service
        .upload_image(&user, &file_name, &content_type, file_data)
        .await?;

    Ok(Json(ApiResponse::success(
        Some(UploadedImageDto { url }),
        Some("Imagem enviada".to_string()),
        None,
    )))
}

/// Edit a post's text (owner or moderator)
#[utoipa::path(
    put,
    path = "/api/feed/posts/{id}",
    params(("id" = Uuid, Path, description = "Post id")),
    request_body = UpdatePostDto,
    responses(
        (status = 200, description = "Post updated"),
        (status = 403, description = "Not the owner or a moderator"),
        (status = 404, description = "Post not found")
    ),
    security(("bearer_auth" = [])),
    tag = "feed"
)]
pub async fn update_post(
    State(service): State<Arc<FeedService>>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    AppJson(data): AppJson<UpdatePostDto>,
) -> Result<Json<ApiResponse<()>>> {
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.update_post(&user, id, &data).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Publicação atualizada".to_string()),
        None,
    )))
}

/// Delete a post (owner or moderator)
#[utoipa::path(
    delete,
    path = "/api/feed/posts/{id}",
    params(("id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post deleted"),
        (status = 403, description = "Not the owner or a moderator"),
        (status = 404, description = "Post not found")
    ),
    security(("bearer_auth" = [])),
    tag = "feed"
)]
pub async fn delete_post(
    State(service): State<Arc<FeedService>>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete_post(&user, id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Publicação excluída".to_string()),
        None,
    )))
}

/// Toggle the caller's like on a post
#[utoipa::path(
    post,
    path = "/api/feed/posts/{id}/like",
    params(("id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 200, description = "Like toggled", body = ApiResponse<LikeToggleDto>),
    ),
    security(("bearer_auth" = [])),
    tag = "feed"
)]
pub async fn toggle_like(
    State(service): State<Arc<FeedService>>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<LikeToggleDto>>> {
    let result = service.toggle_like(&user, id).await?;
    Ok(Json(ApiResponse::success(Some(result), None, None)))
}

/// Comment on a post
#[utoipa::path(
    post,
    path = "/api/feed/posts/{id}/comments",
    params(("id" = Uuid, Path, description = "Post id")),
    request_body = CreateCommentDto,
    responses(
        (status = 200, description = "Created comment", body = ApiResponse<FeedComment>),
    ),
    security(("bearer_auth" = [])),
    tag = "feed"
)]
pub async fn add_comment(
    State(service): State<Arc<FeedService>>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    AppJson(data): AppJson<CreateCommentDto>,
) -> Result<Json<ApiResponse<FeedComment>>> {
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let comment = service.add_comment(&user, id, &data).await?;
    Ok(Json(ApiResponse::success(
        Some(comment),
        Some("Comentário adicionado".to_string()),
        None,
    )))
}

/// Delete a comment (owner or moderator)
#[utoipa::path(
    delete,
    path = "/api/feed/posts/{id}/comments/{comment_id}",
    params(
        ("id" = Uuid, Path, description = "Post id"),
        ("comment_id" = Uuid, Path, description = "Comment id")
    ),
    responses(
        (status = 200, description = "Comment deleted"),
        (status = 403, description = "Not the owner or a moderator"),
        (status = 404, description = "Comment not found")
    ),
    security(("bearer_auth" = [])),
    tag = "feed"
)]
pub async fn delete_comment(
    State(service): State<Arc<FeedService>>,
    user: AuthenticatedUser,
    Path((id, comment_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete_comment(&user, id, comment_id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Comentário excluído".to_string()),
        None,
    )))
}

/// Toggle a post's pinned flag (moderators only)
#[utoipa::path(
    post,
    path = "/api/feed/posts/{id}/pin",
    params(("id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 200, description = "Pin toggled", body = ApiResponse<bool>),
        (status = 404, description = "Post not found")
    ),
    security(("bearer_auth" = [])),
    tag = "feed"
)]
pub async fn toggle_pin(
    State(service): State<Arc<FeedService>>,
    _guard: RequireModerator,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<bool>>> {
    let pinned = service.toggle_pin(id).await?;
    let message = if pinned {
        "Publicação fixada"
    } else {
        "Publicação desafixada"
    };
    Ok(Json(ApiResponse::success(
        Some(pinned),
        Some(message.to_string()),
        None,
    )))
}
