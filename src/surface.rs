//! Display surfaces
//!
//! Everything that draws robots goes through [`Surface`], so drawing and
//! animation can be exercised against a bare [`Grid`] in tests and against
//! a live terminal through [`Screen`].

use std::io::{self, Write};

use crate::core::{Color, Grid};
use crate::renderer::{AnsiRenderer, Renderer};

/// A place robots can be drawn on
pub trait Surface {
    /// Write a run of characters starting at a cell
    fn write_at(&mut self, x: i32, y: i32, text: &str);

    /// Color for subsequent writes
    fn set_pen(&mut self, _fg: Color) {}

    /// Make pending writes visible
    fn present(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A terminal screen: a stage grid rendered as ANSI to a writer.
///
/// Prompt text is written straight through to the terminal below the
/// stage, bypassing the grid.
///
/// Writes are plain blocking `std::io::Write` calls. A screen is owned by
/// the single task that also reads input and applies decay ticks, and the
/// only awaits in that task are for input, ticks and pacing sleeps. So no
/// write ever races another or is interrupted halfway, and there is no
/// output channel between the app and the terminal.
pub struct Screen<W: Write> {
    pub grid: Grid,
    renderer: AnsiRenderer,
    out: W,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W, cols: usize, rows: usize) -> Self {
        Self {
            grid: Grid::new(cols, rows),
            renderer: AnsiRenderer::new(),
            out,
        }
    }

    /// Clear the terminal and take over rendering
    pub fn init(&mut self) -> io::Result<()> {
        let init = self.renderer.init();
        self.out.write_all(init.as_bytes())?;
        self.out.flush()
    }

    /// Restore terminal attributes
    pub fn shutdown(&mut self) -> io::Result<()> {
        let output = self.renderer.shutdown();
        self.out.write_all(output.as_bytes())?;
        self.out.flush()
    }

    /// Blank the stage and the terminal, growing the stage if needed.
    /// Callers keep sizes within [`Config`](crate::config::Config) limits.
    pub fn clear(&mut self, cols: usize, rows: usize) -> io::Result<()> {
        if cols > self.grid.cols || rows > self.grid.rows {
            self.grid.resize(cols.max(self.grid.cols), rows.max(self.grid.rows));
        } else {
            self.grid.clear();
        }
        let output = self.renderer.clear();
        self.out.write_all(output.as_bytes())
    }

    /// Redraw the whole stage
    pub fn present_full(&mut self) -> io::Result<()> {
        let output = self.renderer.render_full(&self.grid);
        self.grid.mark_all_clean();
        self.out.write_all(output.as_bytes())?;
        self.out.flush()
    }

    /// Move the terminal cursor so prompts print below the stage
    pub fn place_cursor(&mut self, x: usize, y: usize) -> io::Result<()> {
        let output = self.renderer.move_to(x, y);
        self.out.write_all(output.as_bytes())?;
        self.out.flush()
    }

    /// Write text without a newline and flush (prompts)
    pub fn ask(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }

    /// Write a full line
    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)?;
        self.out.flush()
    }

    pub fn writer(&self) -> &W {
        &self.out
    }
}

impl<W: Write> Surface for Screen<W> {
    fn write_at(&mut self, x: i32, y: i32, text: &str) {
        self.grid.write_at(x, y, text);
    }

    fn set_pen(&mut self, fg: Color) {
        self.grid.set_pen(fg);
    }

    fn present(&mut self) -> io::Result<()> {
        if !self.grid.is_dirty() {
            return Ok(());
        }
        let output = self.renderer.render_dirty(&self.grid);
        self.grid.mark_all_clean();
        self.out.write_all(output.as_bytes())?;
        self.out.flush()
    }
}
