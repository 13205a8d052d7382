pub mod minute;

pub use minute::{Minute, MinuteStatus, MinuteType};
