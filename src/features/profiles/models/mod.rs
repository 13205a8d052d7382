mod profile;

pub use profile::{Profile, ProfileStatus, Role};
