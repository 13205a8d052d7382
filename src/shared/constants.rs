/// Feed page size; pages append into the in-memory projection
pub const DEFAULT_PAGE_SIZE: i64 = 10;

// =============================================================================
// FEED QUOTA
// =============================================================================

/// Sliding window for the weekly post quota
pub const QUOTA_WINDOW_DAYS: i64 = 7;

/// Weekly post limit for leaders
pub const LEADER_WEEKLY_POST_LIMIT: i64 = 4;

/// Weekly post limit for ordinary members
pub const MEMBER_WEEKLY_POST_LIMIT: i64 = 3;

// =============================================================================
// STORAGE
// =============================================================================

/// Maximum size for an attached minute PDF
pub const MAX_PDF_SIZE_BYTES: usize = 10 * 1024 * 1024;

/// Maximum size for an uploaded photo (post image or avatar)
pub const MAX_IMAGE_SIZE_BYTES: usize = 5 * 1024 * 1024;

/// Object key prefix for minute documents
pub const DOCUMENTS_PREFIX: &str = "documents";

/// Object key prefix for feed post images
pub const POST_IMAGES_PREFIX: &str = "posts";

/// Object key prefix for profile photos
pub const AVATARS_PREFIX: &str = "avatars";
