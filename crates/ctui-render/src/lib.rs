#![forbid(unsafe_code)]

//! Render primitives: cells, the grid, and styles.

pub mod cell;
pub mod grid;
pub mod style;

pub use cell::{rune_width, Cell};
pub use grid::Grid;
pub use style::{AttrMask, Color, Style};
