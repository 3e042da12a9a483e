//! Robot Renderer Module
//!
//! Renderers convert the stage grid to terminal output.

pub mod ansi;

pub use ansi::AnsiRenderer;

/// Trait for renderers
pub trait Renderer {
    /// Initialize sequence
    fn init(&mut self) -> String;

    /// Shutdown sequence
    fn shutdown(&self) -> String;

    /// Clear screen
    fn clear(&self) -> String;

    /// Place the cursor (0-based) for text that follows the stage
    fn move_to(&mut self, x: usize, y: usize) -> String;

    /// Render entire grid
    fn render_full(&mut self, grid: &crate::core::Grid) -> String;

    /// Render only dirty cells
    fn render_dirty(&mut self, grid: &crate::core::Grid) -> String;
}
