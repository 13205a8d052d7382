use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::{RequireAdmin, RequireModerator};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::minutes::dtos::{
    CreateMinuteDto, GeneratedNumberDto, MinuteListItemDto, MinuteLogDto, MinuteResponseDto,
    PdfUrlDto, UpdateMinuteDto,
};
use crate::features::minutes::services::MinuteService;
use crate::shared::types::ApiResponse;

/// Mint the next sequential minute number
#[utoipa::path(
    get,
    path = "/api/minutes/generate-number",
    responses(
        (status = 200, description = "Next number", body = ApiResponse<GeneratedNumberDto>),
    ),
    security(("bearer_auth" = [])),
    tag = "minutes"
)]
pub async fn generate_number(
    State(service): State<Arc<MinuteService>>,
    _guard: RequireModerator,
) -> Result<Json<ApiResponse<GeneratedNumberDto>>> {
    let number = service.generate_number().await?;
    Ok(Json(ApiResponse::success(
        Some(GeneratedNumberDto { number }),
        None,
        None,
    )))
}

/// Create a minute
#[utoipa::path(
    post,
    path = "/api/minutes",
    request_body = CreateMinuteDto,
    responses(
        (status = 200, description = "Created minute", body = ApiResponse<MinuteResponseDto>),
    ),
    security(("bearer_auth" = [])),
    tag = "minutes"
)]
pub async fn create_minute(
    State(service): State<Arc<MinuteService>>,
    _guard: RequireModerator,
    user: AuthenticatedUser,
    AppJson(data): AppJson<CreateMinuteDto>,
) -> Result<Json<ApiResponse<MinuteResponseDto>>> {
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let minute = service.create(user.id, &data).await?;
    Ok(Json(ApiResponse::success(
        Some(minute),
        Some("Ata criada".to_string()),
        None,
    )))
}

/// List minutes newest-date-first
#[utoipa::path(
    get,
    path = "/api/minutes",
    responses(
        (status = 200, description = "Minute list", body = ApiResponse<Vec<MinuteListItemDto>>),
    ),
    security(("bearer_auth" = [])),
    tag = "minutes"
)]
pub async fn list_minutes(
    State(service): State<Arc<MinuteService>>,
) -> Result<Json<ApiResponse<Vec<MinuteListItemDto>>>> {
    let minutes = service.list().await?;
    Ok(Json(ApiResponse::success(Some(minutes), None, None)))
}

/// Get a minute with its parsed summary
#[utoipa::path(
    get,
    path = "/api/minutes/{id}",
    params(("id" = Uuid, Path, description = "Minute id")),
    responses(
        (status = 200, description = "Minute", body = ApiResponse<MinuteResponseDto>),
        (status = 404, description = "Minute not found")
    ),
    security(("bearer_auth" = [])),
    tag = "minutes"
)]
pub async fn get_minute(
    State(service): State<Arc<MinuteService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MinuteResponseDto>>> {
    let minute = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(minute), None, None)))
}

/// Edit a minute's header fields
#[utoipa::path(
    put,
    path = "/api/minutes/{id}",
    params(("id" = Uuid, Path, description = "Minute id")),
    request_body = UpdateMinuteDto,
    responses(
        (status = 200, description = "Updated minute", body = ApiResponse<MinuteResponseDto>),
        (status = 404, description = "Minute not found")
    ),
    security(("bearer_auth" = [])),
    tag = "minutes"
)]
pub async fn update_minute(
    State(service): State<Arc<MinuteService>>,
    _guard: RequireModerator,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    AppJson(data): AppJson<UpdateMinuteDto>,
) -> Result<Json<ApiResponse<MinuteResponseDto>>> {
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let minute = service.update(user.id, id, &data).await?;
    Ok(Json(ApiResponse::success(
        Some(minute),
        Some("Ata atualizada".to_string()),
        None,
    )))
}

/// Delete a minute and its attached PDF
#[utoipa::path(
    delete,
    path = "/api/minutes/{id}",
    params(("id" = Uuid, Path, description = "Minute id")),
    responses(
        (status = 200, description = "Minute deleted"),
        (status = 404, description = "Minute not found")
    ),
    security(("bearer_auth" = [])),
    tag = "minutes"
)]
pub async fn delete_minute(
    State(service): State<Arc<MinuteService>>,
    _guard: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Ata excluída".to_string()),
        None,
    )))
}

/// Attach the signed PDF
///
/// Accepts multipart/form-data with a single `file` field. Only
/// `application/pdf` up to 10 MB is accepted.
#[utoipa::path(
    post,
    path = "/api/minutes/{id}/pdf",
    params(("id" = Uuid, Path, description = "Minute id")),
    request_body(content_type = "multipart/form-data", description = "PDF file"),
    responses(
        (status = 200, description = "Updated minute", body = ApiResponse<MinuteResponseDto>),
        (status = 400, description = "Not a PDF or over the size limit"),
        (status = 404, description = "Minute not found")
    ),
    security(("bearer_auth" = [])),
    tag = "minutes"
)]
pub async fn upload_pdf(
    State(service): State<Arc<MinuteService>>,
    _guard: RequireModerator,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<MinuteResponseDto>>> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name = "ata.pdf".to_string();
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

    let file_data = file_data
        .ok_or_else(|| AppError::BadRequest("Nenhum arquivo enviado".to_string()))?;

    let minute = service
        .upload_pdf(user.id, id, &file_name, &content_type, file_data)
        .await?;

    Ok(Json(ApiResponse::success(
        Some(minute),
        Some("PDF anexado".to_string()),
        None,
    )))
}

/// Presigned download URL for the attached PDF
#[utoipa::path(
    get,
    path = "/api/minutes/{id}/pdf",
    params(("id" = Uuid, Path, description = "Minute id")),
    responses(
        (status = 200, description = "Download URL", body = ApiResponse<PdfUrlDto>),
        (status = 404, description = "Minute or PDF not found")
    ),
    security(("bearer_auth" = [])),
    tag = "minutes"
)]
pub async fn get_pdf_url(
    State(service): State<Arc<MinuteService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PdfUrlDto>>> {
    let url = service.pdf_url(id).await?;
    Ok(Json(ApiResponse::success(Some(PdfUrlDto { url }), None, None)))
}

/// Archive a minute (requires an attached PDF)
#[utoipa::path(
    post,
    path = "/api/minutes/{id}/archive",
    params(("id" = Uuid, Path, description = "Minute id")),
    responses(
        (status = 200, description = "Archived minute", body = ApiResponse<MinuteResponseDto>),
        (status = 400, description = "No PDF attached"),
        (status = 404, description = "Minute not found")
    ),
    security(("bearer_auth" = [])),
    tag = "minutes"
)]
pub async fn archive_minute(
    State(service): State<Arc<MinuteService>>,
    _guard: RequireModerator,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MinuteResponseDto>>> {
    let minute = service.archive(user.id, id).await?;
    Ok(Json(ApiResponse::success(
        Some(minute),
        Some("Ata arquivada".to_string()),
        None,
    )))
}

/// Generate the AI summary for a minute
#[utoipa::path(
    post,
    path = "/api/minutes/{id}/summary",
    params(("id" = Uuid, Path, description = "Minute id")),
    responses(
        (status = 200, description = "Minute with fresh summary", body = ApiResponse<MinuteResponseDto>),
        (status = 404, description = "Minute not found"),
        (status = 502, description = "Webhook failure")
    ),
    security(("bearer_auth" = [])),
    tag = "minutes"
)]
pub async fn request_summary(
    State(service): State<Arc<MinuteService>>,
    _guard: RequireModerator,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MinuteResponseDto>>> {
    let minute = service.request_summary(user.id, id).await?;
    Ok(Json(ApiResponse::success(
        Some(minute),
        Some("Resumo gerado".to_string()),
        None,
    )))
}

/// Audit history for a minute
#[utoipa::path(
    get,
    path = "/api/minutes/{id}/logs",
    params(("id" = Uuid, Path, description = "Minute id")),
    responses(
        (status = 200, description = "Log entries", body = ApiResponse<Vec<MinuteLogDto>>),
    ),
    security(("bearer_auth" = [])),
    tag = "minutes"
)]
pub async fn get_logs(
    State(service): State<Arc<MinuteService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<MinuteLogDto>>>> {
    let logs = service.logs(id).await?;
    Ok(Json(ApiResponse::success(Some(logs), None, None)))
}
