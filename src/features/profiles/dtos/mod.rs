mod profile_dto;

pub use profile_dto::{
    ListProfilesQuery, ProfileResponseDto, PublicProfileDto, UpdateOwnProfileDto,
    UpdateProfileAdminDto,
};
