use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::cells::{
    dtos as cells_dtos, handlers as cells_handlers, models as cells_models,
};
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::feed::{dtos as feed_dtos, handlers as feed_handlers, store as feed_store};
use crate::features::minutes::{
    dtos as minutes_dtos, handlers as minutes_handlers, models as minutes_models,
};
use crate::features::profiles::{
    dtos as profiles_dtos, handlers as profiles_handlers, models as profiles_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Profiles
        profiles_handlers::get_me,
        profiles_handlers::update_me,
        profiles_handlers::upload_photo,
        profiles_handlers::get_public_profile,
        profiles_handlers::list_profiles,
        profiles_handlers::update_profile_admin,
        profiles_handlers::delete_profile,
        // Cells
        cells_handlers::resolve_address,
        cells_handlers::create_cell,
        cells_handlers::list_cells,
        cells_handlers::get_cell,
        cells_handlers::update_cell,
        cells_handlers::delete_cell,
        cells_handlers::save_location,
        cells_handlers::list_members,
        cells_handlers::add_member,
        cells_handlers::remove_member,
        cells_handlers::create_meeting,
        cells_handlers::list_meetings,
        cells_handlers::record_attendance,
        // Feed
        feed_handlers::load_feed,
        feed_handlers::create_post,
        feed_handlers::upload_image,
        feed_handlers::update_post,
        feed_handlers::delete_post,
        feed_handlers::toggle_like,
        feed_handlers::toggle_pin,
        feed_handlers::add_comment,
        feed_handlers::delete_comment,
        // Minutes
        minutes_handlers::generate_number,
        minutes_handlers::create_minute,
        minutes_handlers::list_minutes,
        minutes_handlers::get_minute,
        minutes_handlers::update_minute,
        minutes_handlers::delete_minute,
        minutes_handlers::upload_pdf,
        minutes_handlers::get_pdf_url,
        minutes_handlers::archive_minute,
        minutes_handlers::request_summary,
        minutes_handlers::get_logs,
        // Dashboard
        dashboard_handlers::get_stats,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Profiles
            profiles_models::Role,
            profiles_models::ProfileStatus,
            profiles_dtos::ProfileResponseDto,
            profiles_dtos::PublicProfileDto,
            profiles_dtos::UpdateOwnProfileDto,
            profiles_dtos::UpdateProfileAdminDto,
            ApiResponse<profiles_dtos::ProfileResponseDto>,
            ApiResponse<profiles_dtos::PublicProfileDto>,
            ApiResponse<Vec<profiles_dtos::ProfileResponseDto>>,
            // Cells
            cells_models::ResolvedAddress,
            cells_models::Coordinate,
            cells_models::GeocodeSource,
            cells_models::ResolvedLocation,
            cells_models::CellMeeting,
            cells_dtos::CreateCellDto,
            cells_dtos::UpdateCellDto,
            cells_dtos::SaveLocationDto,
            cells_dtos::CellResponseDto,
            cells_dtos::CellListItemDto,
            cells_dtos::AddCellMemberDto,
            cells_dtos::CellMemberDto,
            cells_dtos::CreateMeetingDto,
            cells_dtos::AttendanceEntryDto,
            cells_dtos::RecordAttendanceDto,
            cells_dtos::AttendanceRowDto,
            cells_dtos::MeetingWithAttendanceDto,
            ApiResponse<cells_models::ResolvedLocation>,
            ApiResponse<cells_dtos::CellResponseDto>,
            ApiResponse<Vec<cells_dtos::CellListItemDto>>,
            ApiResponse<cells_dtos::CellMemberDto>,
            ApiResponse<Vec<cells_dtos::CellMemberDto>>,
            ApiResponse<cells_models::CellMeeting>,
            ApiResponse<Vec<cells_dtos::MeetingWithAttendanceDto>>,
            ApiResponse<Vec<cells_dtos::AttendanceRowDto>>,
            // Feed
            feed_store::FeedPost,
            feed_store::FeedComment,
            feed_store::FeedLike,
            feed_dtos::CreatePostDto,
            feed_dtos::UpdatePostDto,
            feed_dtos::CreateCommentDto,
            feed_dtos::LikeToggleDto,
            feed_dtos::FeedPageDto,
            feed_dtos::UploadedImageDto,
            ApiResponse<feed_dtos::FeedPageDto>,
            ApiResponse<feed_dtos::UploadedImageDto>,
            ApiResponse<feed_store::FeedPost>,
            ApiResponse<feed_store::FeedComment>,
            ApiResponse<feed_dtos::LikeToggleDto>,
            // Minutes
            minutes_models::MinuteStatus,
            minutes_models::MinuteType,
            minutes_dtos::CreateMinuteDto,
            minutes_dtos::UpdateMinuteDto,
            minutes_dtos::MinuteSummaryDto,
            minutes_dtos::MinuteResponseDto,
            minutes_dtos::MinuteListItemDto,
            minutes_dtos::GeneratedNumberDto,
            minutes_dtos::PdfUrlDto,
            minutes_dtos::MinuteLogDto,
            ApiResponse<minutes_dtos::MinuteResponseDto>,
            ApiResponse<Vec<minutes_dtos::MinuteListItemDto>>,
            ApiResponse<minutes_dtos::GeneratedNumberDto>,
            ApiResponse<minutes_dtos::PdfUrlDto>,
            ApiResponse<Vec<minutes_dtos::MinuteLogDto>>,
            // Dashboard
            dashboard_dtos::DashboardStatsDto,
            ApiResponse<dashboard_dtos::DashboardStatsDto>,
        )
    ),
    tags(
        (name = "profiles", description = "Member profiles and roles"),
        (name = "cells", description = "Cell groups, membership, meetings and location resolution"),
        (name = "feed", description = "Social feed with likes, comments and pinning"),
        (name = "minutes", description = "Meeting minutes with PDF attachment and AI summaries"),
        (name = "dashboard", description = "Aggregate counters"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "IPR Sinop API",
        version = "0.1.0",
        description = "API documentation for the IPR Sinop administration system",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
