mod minute_handler;

pub use minute_handler::*;
