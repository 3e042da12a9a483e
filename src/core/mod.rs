//! Robot Core Module
//!
//! Stage data structures:
//! - Cell: Individual character cell
//! - Grid: 2D stage buffer

pub mod cell;
pub mod grid;

pub use cell::{Cell, Color};
pub use grid::Grid;
