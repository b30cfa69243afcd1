//! Top-level module for mesh topology types.
//!
//! - [`cell_type::CellType`]: volumetric cell kinds and their VTK ids
//! - [`cell::Cell`]: ordered node indices tagged with a cell kind

pub mod cell;
pub mod cell_type;

pub use cell::Cell;
pub use cell_type::CellType;
