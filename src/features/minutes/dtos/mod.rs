pub mod minute_dto;

pub use minute_dto::{
    CreateMinuteDto, GeneratedNumberDto, MinuteListItemDto, MinuteLogDto, MinuteResponseDto,
    MinuteSummaryDto, PdfUrlDto, UpdateMinuteDto,
};
