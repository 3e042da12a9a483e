//! ANSI Renderer
//!
//! Renders the stage to any ANSI/VT100 compatible terminal.
//! - 16 colors (standard ANSI)
//! - Cursor addressing for sparse animation updates

use crate::core::{Cell, Color, Grid};
use super::Renderer;

/// ANSI escape sequences
const CSI: &str = "\x1b[";

/// ANSI renderer
pub struct AnsiRenderer {
    /// Track current color to minimize escape codes
    current_fg: Option<Color>,
}

impl Default for AnsiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnsiRenderer {
    pub fn new() -> Self {
        Self { current_fg: None }
    }

    /// Reset internal state
    pub fn reset(&mut self) {
        self.current_fg = None;
    }

    /// Generate cursor move sequence
    fn move_cursor(x: usize, y: usize) -> String {
        format!("{}{};{}H", CSI, y + 1, x + 1)
    }

    /// Render a single cell (color change + character)
    fn render_cell(&mut self, cell: &Cell) -> String {
        let mut output = String::new();
        if self.current_fg != Some(cell.fg) {
            output.push_str(&format!("{}{}m", CSI, cell.fg.fg_code()));
            self.current_fg = Some(cell.fg);
        }
        // Sanitize control characters to prevent terminal corruption
        let ch = cell.char;
        if ch < ' ' || ch == '\x7f' {
            output.push(' ');
        } else {
            output.push(ch);
        }
        output
    }
}

impl Renderer for AnsiRenderer {
    fn init(&mut self) -> String {
        self.reset();
        format!("{}2J{}H{}0m", CSI, CSI, CSI)
    }

    fn shutdown(&self) -> String {
        // Reset attributes, show cursor
        format!("{}0m{}?25h", CSI, CSI)
    }

    fn clear(&self) -> String {
        format!("{}2J{}H", CSI, CSI)
    }

    fn move_to(&mut self, x: usize, y: usize) -> String {
        // Prompts print in the terminal's default color
        self.current_fg = None;
        format!("{}{}0m", Self::move_cursor(x, y), CSI)
    }

    fn render_full(&mut self, grid: &Grid) -> String {
        let mut output = String::with_capacity(grid.cols * grid.rows * 4);

        self.reset();
        output.push_str(&format!("{}H{}0m", CSI, CSI));

        for y in 0..grid.rows {
            output.push_str(&Self::move_cursor(0, y));
            for x in 0..grid.cols {
                if let Some(cell) = grid.get(x, y) {
                    output.push_str(&self.render_cell(cell));
                }
            }
        }

        output
    }

    fn render_dirty(&mut self, grid: &Grid) -> String {
        let dirty_count = grid.iter_dirty().count();

        // If more than 50% dirty, do full redraw
        let total = grid.cols * grid.rows;
        if dirty_count > total / 2 {
            return self.render_full(grid);
        }

        let mut output = String::with_capacity(dirty_count * 12);
        let mut last: Option<(usize, usize)> = None;

        // Grid iteration is already row-major
        for (x, y, cell) in grid.iter_dirty() {
            let need_move = match last {
                Some((lx, ly)) => !(y == ly && x == lx + 1),
                None => true,
            };

            if need_move {
                output.push_str(&Self::move_cursor(x, y));
            }

            output.push_str(&self.render_cell(cell));
            last = Some((x, y));
        }

        output
    }
}
