use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::feed::store::FeedPost;

/// Request to create a feed post
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePostDto {
    #[validate(length(min = 1, max = 2000, message = "Conteúdo é obrigatório"))]
    pub content: String,
    pub image_url: Option<String>,
}

/// Request to edit a post's text
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePostDto {
    #[validate(length(min = 1, max = 2000, message = "Conteúdo é obrigatório"))]
    pub content: String,
}

/// Request to comment on a post
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCommentDto {
    #[validate(length(min = 1, max = 1000, message = "Comentário é obrigatório"))]
    pub content: String,
}

/// URL of a stored post image
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadedImageDto {
    pub url: String,
}

/// Result of a like toggle
#[derive(Debug, Serialize, ToSchema)]
pub struct LikeToggleDto {
    /// Whether the post is liked by the caller after the toggle
    pub liked: bool,
    pub like_count: usize,
}

/// One loaded feed page plus the accumulated projection
#[derive(Debug, Serialize, ToSchema)]
pub struct FeedPageDto {
    /// Full in-memory projection after this page was merged
    pub posts: Vec<FeedPost>,
    /// Whether another page exists beyond the loaded ones
    pub has_more: bool,
}
