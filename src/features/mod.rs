pub mod auth;
pub mod cells;
pub mod dashboard;
pub mod feed;
pub mod minutes;
pub mod profiles;
