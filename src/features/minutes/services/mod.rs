pub mod minute_service;
pub mod summary_client;

pub use minute_service::MinuteService;
pub use summary_client::SummaryClient;
