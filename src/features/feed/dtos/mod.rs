pub mod feed_dto;

pub use feed_dto::{
    CreateCommentDto, CreatePostDto, FeedPageDto, LikeToggleDto, UpdatePostDto, UploadedImageDto,
};
