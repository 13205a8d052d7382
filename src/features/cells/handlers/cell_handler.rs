use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::{RequireAdmin, RequireModerator};
use crate::features::cells::dtos::{
    AddCellMemberDto, AttendanceRowDto, CellListItemDto, CellMemberDto, CellResponseDto,
    CreateCellDto, CreateMeetingDto, MeetingWithAttendanceDto, RecordAttendanceDto,
    ResolveAddressQuery, SaveLocationDto, UpdateCellDto,
};
use crate::features::cells::models::{CellMeeting, ResolvedLocation};
use crate::features::cells::services::CellService;
use crate::shared::types::ApiResponse;

/// Resolve a postal code to an address and best-effort coordinates
#[utoipa::path(
    get,
    path = "/api/cells/resolve-address",
    params(ResolveAddressQuery),
    responses(
        (status = 200, description = "Resolved address", body = ApiResponse<ResolvedLocation>),
        (status = 404, description = "Unknown postal code")
    ),
    security(("bearer_auth" = [])),
    tag = "cells"
)]
pub async fn resolve_address(
    State(service): State<Arc<CellService>>,
    _guard: RequireModerator,
    Query(query): Query<ResolveAddressQuery>,
) -> Result<Json<ApiResponse<ResolvedLocation>>> {
    let location = service.resolve_address(&query.postal_code).await?;

    let message = match &location.source {
        Some(source) => format!("Localização encontrada via {}", source.display_name()),
        None => "Endereço encontrado, marque o ponto manualmente no mapa".to_string(),
    };

    Ok(Json(ApiResponse::success(
        Some(location),
        Some(message),
        None,
    )))
}

/// Create a cell
#[utoipa::path(
    post,
    path = "/api/cells",
    request_body = CreateCellDto,
    responses(
        (status = 200, description = "Created cell", body = ApiResponse<CellResponseDto>),
    ),
    security(("bearer_auth" = [])),
    tag = "cells"
)]
pub async fn create_cell(
    State(service): State<Arc<CellService>>,
    _guard: RequireModerator,
    AppJson(data): AppJson<CreateCellDto>,
) -> Result<Json<ApiResponse<CellResponseDto>>> {
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let cell = service.create(&data).await?;
    Ok(Json(ApiResponse::success(
        Some(cell),
        Some("Célula criada".to_string()),
        None,
    )))
}

/// List cells with leader names and member counts
#[utoipa::path(
    get,
    path = "/api/cells",
    responses(
        (status = 200, description = "Cell list", body = ApiResponse<Vec<CellListItemDto>>),
    ),
    security(("bearer_auth" = [])),
    tag = "cells"
)]
pub async fn list_cells(
    State(service): State<Arc<CellService>>,
) -> Result<Json<ApiResponse<Vec<CellListItemDto>>>> {
    let cells = service.list().await?;
    Ok(Json(ApiResponse::success(Some(cells), None, None)))
}

/// Get a cell by id
#[utoipa::path(
    get,
    path = "/api/cells/{id}",
    params(("id" = Uuid, Path, description = "Cell id")),
    responses(
        (status = 200, description = "Cell", body = ApiResponse<CellResponseDto>),
        (status = 404, description = "Cell not found")
    ),
    security(("bearer_auth" = [])),
    tag = "cells"
)]
pub async fn get_cell(
    State(service): State<Arc<CellService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CellResponseDto>>> {
    let cell = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(cell), None, None)))
}

/// Update a cell
#[utoipa::path(
    put,
    path = "/api/cells/{id}",
    params(("id" = Uuid, Path, description = "Cell id")),
    request_body = UpdateCellDto,
    responses(
        (status = 200, description = "Updated cell", body = ApiResponse<CellResponseDto>),
        (status = 404, description = "Cell not found")
    ),
    security(("bearer_auth" = [])),
    tag = "cells"
)]
pub async fn update_cell(
    State(service): State<Arc<CellService>>,
    _guard: RequireModerator,
    Path(id): Path<Uuid>,
    AppJson(data): AppJson<UpdateCellDto>,
) -> Result<Json<ApiResponse<CellResponseDto>>> {
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let cell = service.update(id, &data).await?;
    Ok(Json(ApiResponse::success(
        Some(cell),
        Some("Célula atualizada".to_string()),
        None,
    )))
}

/// Delete a cell
#[utoipa::path(
    delete,
    path = "/api/cells/{id}",
    params(("id" = Uuid, Path, description = "Cell id")),
    responses(
        (status = 200, description = "Cell deleted"),
        (status = 404, description = "Cell not found")
    ),
    security(("bearer_auth" = [])),
    tag = "cells"
)]
pub async fn delete_cell(
    State(service): State<Arc<CellService>>,
    _guard: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Célula removida".to_string()),
        None,
    )))
}

/// Save explicit coordinates for a cell (manual map placement)
#[utoipa::path(
    put,
    path = "/api/cells/{id}/location",
    params(("id" = Uuid, Path, description = "Cell id")),
    request_body = SaveLocationDto,
    responses(
        (status = 200, description = "Updated cell", body = ApiResponse<CellResponseDto>),
        (status = 404, description = "Cell not found")
    ),
    security(("bearer_auth" = [])),
    tag = "cells"
)]
pub async fn save_location(
    State(service): State<Arc<CellService>>,
    _guard: RequireModerator,
    Path(id): Path<Uuid>,
    AppJson(data): AppJson<SaveLocationDto>,
) -> Result<Json<ApiResponse<CellResponseDto>>> {
    let cell = service.save_location(id, &data).await?;
    Ok(Json(ApiResponse::success(
        Some(cell),
        Some("Localização salva".to_string()),
        None,
    )))
}

/// List the members of a cell
#[utoipa::path(
    get,
    path = "/api/cells/{id}/members",
    params(("id" = Uuid, Path, description = "Cell id")),
    responses(
        (status = 200, description = "Member list", body = ApiResponse<Vec<CellMemberDto>>),
    ),
    security(("bearer_auth" = [])),
    tag = "cells"
)]
pub async fn list_members(
    State(service): State<Arc<CellService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<CellMemberDto>>>> {
    let members = service.list_members(id).await?;
    Ok(Json(ApiResponse::success(Some(members), None, None)))
}

/// Add a member to a cell
#[utoipa::path(
    post,
    path = "/api/cells/{id}/members",
    params(("id" = Uuid, Path, description = "Cell id")),
    request_body = AddCellMemberDto,
    responses(
        (status = 200, description = "Added member", body = ApiResponse<CellMemberDto>),
        (status = 409, description = "Already a member")
    ),
    security(("bearer_auth" = [])),
    tag = "cells"
)]
pub async fn add_member(
    State(service): State<Arc<CellService>>,
    _guard: RequireModerator,
    Path(id): Path<Uuid>,
    AppJson(data): AppJson<AddCellMemberDto>,
) -> Result<Json<ApiResponse<CellMemberDto>>> {
    let member = service.add_member(id, &data).await?;
    Ok(Json(ApiResponse::success(
        Some(member),
        Some("Membro adicionado à célula".to_string()),
        None,
    )))
}

/// Remove a member from a cell
#[utoipa::path(
    delete,
    path = "/api/cells/{id}/members/{member_id}",
    params(
        ("id" = Uuid, Path, description = "Cell id"),
        ("member_id" = Uuid, Path, description = "Member profile id")
    ),
    responses(
        (status = 200, description = "Member removed"),
        (status = 404, description = "Membership not found")
    ),
    security(("bearer_auth" = [])),
    tag = "cells"
)]
pub async fn remove_member(
    State(service): State<Arc<CellService>>,
    _guard: RequireModerator,
    Path((id, member_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<()>>> {
    service.remove_member(id, member_id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Membro removido da célula".to_string()),
        None,
    )))
}

/// Register a held meeting
#[utoipa::path(
    post,
    path = "/api/cells/{id}/meetings",
    params(("id" = Uuid, Path, description = "Cell id")),
    request_body = CreateMeetingDto,
    responses(
        (status = 200, description = "Created meeting", body = ApiResponse<CellMeeting>),
    ),
    security(("bearer_auth" = [])),
    tag = "cells"
)]
pub async fn create_meeting(
    State(service): State<Arc<CellService>>,
    _guard: RequireModerator,
    Path(id): Path<Uuid>,
    AppJson(data): AppJson<CreateMeetingDto>,
) -> Result<Json<ApiResponse<CellMeeting>>> {
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let meeting = service.create_meeting(id, &data).await?;
    Ok(Json(ApiResponse::success(
        Some(meeting),
        Some("Reunião registrada".to_string()),
        None,
    )))
}

/// List a cell's meetings newest-first, with attendance
#[utoipa::path(
    get,
    path = "/api/cells/{id}/meetings",
    params(("id" = Uuid, Path, description = "Cell id")),
    responses(
        (status = 200, description = "Meetings", body = ApiResponse<Vec<MeetingWithAttendanceDto>>),
    ),
    security(("bearer_auth" = [])),
    tag = "cells"
)]
pub async fn list_meetings(
    State(service): State<Arc<CellService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<MeetingWithAttendanceDto>>>> {
    let meetings = service.list_meetings(id).await?;
    Ok(Json(ApiResponse::success(Some(meetings), None, None)))
}

/// Upsert attendance flags for a meeting
#[utoipa::path(
    put,
    path = "/api/cells/meetings/{meeting_id}/attendance",
    params(("meeting_id" = Uuid, Path, description = "Meeting id")),
    request_body = RecordAttendanceDto,
    responses(
        (status = 200, description = "Attendance recorded", body = ApiResponse<Vec<AttendanceRowDto>>),
    ),
    security(("bearer_auth" = [])),
    tag = "cells"
)]
pub async fn record_attendance(
    State(service): State<Arc<CellService>>,
    _guard: RequireModerator,
    Path(meeting_id): Path<Uuid>,
    AppJson(data): AppJson<RecordAttendanceDto>,
) -> Result<Json<ApiResponse<Vec<AttendanceRowDto>>>> {
    let attendance = service.record_attendance(meeting_id, &data).await?;
    Ok(Json(ApiResponse::success(
        Some(attendance),
        Some("Presenças registradas".to_string()),
        None,
    )))
}
