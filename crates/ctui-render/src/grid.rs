#![forbid(unsafe_code)]

//! Grid storage: a row-major sequence of cells.
//!
//! # Invariants
//!
//! 1. `cells.len() == width * height`
//! 2. Out-of-bounds writes are silent no-ops; out-of-bounds reads
//!    return `None`.
//! 3. Resize preserves the top-left intersection of old and new
//!    dimensions; cells outside it start as (space, default style,
//!    width 1, dirty).

use crate::cell::Cell;
use crate::style::Style;

/// A 2D grid of [`Cell`]s, stored row-major (`index = y * width + x`).
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell fresh (empty content, dirty).
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::new(); width * height],
        }
    }

    /// Grid width in cells.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    /// Write content and style at (x, y). A wide primary rune also marks
    /// the follower cell at x+1. Out of bounds is a no-op.
    pub fn set_cell(&mut self, x: i32, y: i32, style: Style, chars: &[char]) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        self.cells[i].set(chars, style);
        if self.cells[i].width() == 2 {
            if let Some(fi) = self.index(x + 1, y) {
                self.cells[fi].put_follower(style);
            }
        }
    }

    /// Copy another cell's style and runes into (x, y).
    pub fn put_cell(&mut self, x: i32, y: i32, cell: &Cell) {
        self.set_cell(x, y, cell.style(), cell.chars());
    }

    /// Read the cell at (x, y), or `None` out of bounds.
    #[must_use]
    pub fn get_cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i].clone())
    }

    /// Borrow the cell at (x, y) mutably. Reconciler use.
    pub fn cell_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        self.index(x, y).map(move |i| &mut self.cells[i])
    }

    /// Rewrite every cell to (space, `style`) and mark it dirty.
    pub fn clear(&mut self, style: Style) {
        for cell in &mut self.cells {
            cell.reset(style);
        }
    }

    /// Mark every cell dirty without changing content.
    pub fn invalidate_all(&mut self) {
        for cell in &mut self.cells {
            cell.set_dirty(true);
        }
    }

    /// Resize to (new_width, new_height), keeping the contents of the
    /// top-left intersection. New cells are fresh (space, default style,
    /// width 1, dirty).
    pub fn resize(&mut self, new_width: usize, new_height: usize) {
        if new_width == self.width && new_height == self.height {
            return;
        }
        let mut cells = vec![Cell::new(); new_width * new_height];
        let keep_w = self.width.min(new_width);
        let keep_h = self.height.min(new_height);
        for y in 0..keep_h {
            for x in 0..keep_w {
                cells[y * new_width + x] = self.cells[y * self.width + x].clone();
            }
        }
        self.width = new_width;
        self.height = new_height;
        self.cells = cells;
    }
}

#[cfg(test)]
mod tests {
    use super::Grid;
    use crate::style::{AttrMask, Color, Style};

    fn red() -> Style {
        Style::new(Color::Red, Color::Default, AttrMask::empty())
    }

    #[test]
    fn len_matches_dimensions() {
        let g = Grid::new(7, 3);
        assert_eq!(g.width(), 7);
        assert_eq!(g.height(), 3);
        assert!(g.get_cell(6, 2).is_some());
        assert!(g.get_cell(7, 2).is_none());
        assert!(g.get_cell(6, 3).is_none());
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut g = Grid::new(4, 4);
        g.set_cell(2, 1, red(), &['Z']);
        let cell = g.get_cell(2, 1).unwrap();
        assert_eq!(cell.chars(), &['Z']);
        assert_eq!(cell.style(), red());
    }

    #[test]
    fn out_of_bounds_writes_are_no_ops() {
        let mut g = Grid::new(3, 3);
        let before = g.get_cell(0, 0).unwrap();
        g.set_cell(-1, 0, red(), &['A']);
        g.set_cell(0, -1, red(), &['A']);
        g.set_cell(3, 0, red(), &['A']);
        g.set_cell(0, 3, red(), &['A']);
        assert_eq!(g.get_cell(0, 0).unwrap(), before);
        assert!(g.get_cell(3, 0).is_none());
    }

    #[test]
    fn wide_rune_marks_follower() {
        let mut g = Grid::new(4, 1);
        g.set_cell(1, 0, red(), &['日']);
        let leader = g.get_cell(1, 0).unwrap();
        let follower = g.get_cell(2, 0).unwrap();
        assert_eq!(leader.width(), 2);
        assert_eq!(follower.width(), 0);
        assert_eq!(follower.style(), red());
    }

    #[test]
    fn wide_rune_in_last_column_has_no_follower() {
        let mut g = Grid::new(3, 1);
        g.set_cell(2, 0, red(), &['日']);
        assert_eq!(g.get_cell(2, 0).unwrap().width(), 2);
        // No panic, nothing written past the edge.
        assert!(g.get_cell(3, 0).is_none());
    }

    #[test]
    fn clear_rewrites_everything() {
        let mut g = Grid::new(2, 2);
        g.set_cell(0, 0, red(), &['A']);
        g.clear(red());
        for y in 0..2 {
            for x in 0..2 {
                let c = g.get_cell(x, y).unwrap();
                assert!(c.chars().is_empty());
                assert_eq!(c.style(), red());
                assert!(c.is_dirty());
            }
        }
    }

    #[test]
    fn invalidate_marks_all_dirty() {
        let mut g = Grid::new(2, 2);
        for y in 0..2 {
            for x in 0..2 {
                g.cell_mut(x, y).unwrap().set_dirty(false);
            }
        }
        g.invalidate_all();
        assert!((0..2).all(|y| (0..2).all(|x| g.get_cell(x, y).unwrap().is_dirty())));
    }

    #[test]
    fn resize_preserves_intersection() {
        let mut g = Grid::new(4, 3);
        g.set_cell(1, 1, red(), &['Q']);
        g.set_cell(3, 2, red(), &['R']);

        g.resize(2, 2);
        assert_eq!(g.get_cell(1, 1).unwrap().chars(), &['Q']);
        assert!(g.get_cell(3, 2).is_none());

        g.resize(5, 4);
        assert_eq!(g.get_cell(1, 1).unwrap().chars(), &['Q']);
        // Region outside the old grid comes back fresh.
        let fresh = g.get_cell(4, 3).unwrap();
        assert!(fresh.chars().is_empty());
        assert_eq!(fresh.style(), Style::DEFAULT);
        assert!(fresh.is_dirty());
    }

    #[test]
    fn resize_to_same_size_is_a_no_op() {
        let mut g = Grid::new(3, 3);
        g.set_cell(0, 0, red(), &['A']);
        g.cell_mut(0, 0).unwrap().set_dirty(false);
        g.resize(3, 3);
        assert!(!g.get_cell(0, 0).unwrap().is_dirty());
    }
}
