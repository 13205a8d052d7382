pub mod cell_dto;

pub use cell_dto::{
    AddCellMemberDto, AttendanceEntryDto, AttendanceRowDto, CellListItemDto, CellMemberDto,
    CellResponseDto, CreateCellDto, CreateMeetingDto, MeetingWithAttendanceDto,
    RecordAttendanceDto, ResolveAddressQuery, SaveLocationDto, UpdateCellDto,
};
