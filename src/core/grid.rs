//! Robot Cell Grid - The stage buffer
//!
//! A 2D array of cells the robots are drawn onto.
//! Tracks dirty cells so animation frames only redraw what changed.

use super::cell::{Cell, Color};
use crate::surface::Surface;

/// The display grid - a 2D array of cells
pub struct Grid {
    /// Grid width in columns
    pub cols: usize,
    /// Grid height in rows
    pub rows: usize,
    /// Color used by subsequent `write_at` calls
    pub pen: Color,
    /// The cell buffer (row-major order)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new grid with given dimensions
    pub fn new(cols: usize, rows: usize) -> Self {
        let cells = vec![Cell::default(); cols * rows];
        Self { cols, rows, pen: Color::White, cells }
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.cols && y < self.rows {
            Some(y * self.cols + x)
        } else {
            None
        }
    }

    /// Get a reference to a cell
    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Get a mutable reference to a cell
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Set a cell at position; out of range positions are ignored
    pub fn set(&mut self, x: usize, y: usize, char: char, fg: Color) {
        if let Some(cell) = self.get_mut(x, y) {
            cell.set(char, fg);
        }
    }

    /// Read back a run of characters starting at a position
    pub fn text_at(&self, x: usize, y: usize, len: usize) -> String {
        (x..x + len)
            .filter_map(|px| self.get(px, y))
            .map(|c| c.char)
            .collect()
    }

    /// Blank every cell
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    /// Mark all cells as clean
    pub fn mark_all_clean(&mut self) {
        for cell in &mut self.cells {
            cell.dirty = false;
        }
    }

    /// Check if any cells are dirty
    pub fn is_dirty(&self) -> bool {
        self.cells.iter().any(|c| c.dirty)
    }

    /// Iterate over all cells with positions
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let x = i % self.cols;
            let y = i / self.cols;
            (x, y, cell)
        })
    }

    /// Iterate over dirty cells with positions
    pub fn iter_dirty(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        self.iter().filter(|(_, _, cell)| cell.dirty)
    }

    /// Resize the grid (content is lost)
    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![Cell::default(); cols * rows];
    }
}

impl Surface for Grid {
    fn write_at(&mut self, x: i32, y: i32, text: &str) {
        let Ok(y) = usize::try_from(y) else {
            return;
        };
        let fg = self.pen;
        for (i, ch) in text.chars().enumerate() {
            // Columns left of the grid are clipped, the rest of the run still lands
            let Ok(px) = usize::try_from(x + i as i32) else {
                continue;
            };
            if px >= self.cols {
                break;
            }
            self.set(px, y, ch, fg);
        }
    }

    fn set_pen(&mut self, fg: Color) {
        self.pen = fg;
    }
}
