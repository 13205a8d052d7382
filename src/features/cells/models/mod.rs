pub mod cell;
pub mod location;

pub use cell::{Cell, CellAttendance, CellMeeting, CellMember};
pub use location::{Coordinate, GeocodeSource, ResolvedAddress, ResolvedLocation};
