mod cell_handler;

pub use cell_handler::*;
