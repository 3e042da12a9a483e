//! Robot Cell - One character position on the stage
//!
//! Each cell holds:
//! - Character (Unicode codepoint)
//! - Foreground color (0-15 ANSI)
//! - Dirty flag for incremental redraws

use serde::{Deserialize, Serialize};

/// Standard ANSI 16-color palette
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    #[default]
    White = 7,
    BrightBlack = 8,   // Gray
    BrightRed = 9,
    BrightGreen = 10,
    BrightYellow = 11,
    BrightBlue = 12,
    BrightMagenta = 13,
    BrightCyan = 14,
    BrightWhite = 15,
}

impl Color {
    /// ANSI SGR code for foreground
    pub fn fg_code(&self) -> u8 {
        let v = *self as u8;
        if v < 8 { 30 + v } else { 90 + (v - 8) }
    }
}

/// A single character cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub char: char,
    pub fg: Color,
    /// Whether this cell needs redrawing
    pub dirty: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            char: ' ',
            fg: Color::White,
            dirty: true,
        }
    }
}

impl Cell {
    pub fn new(char: char, fg: Color) -> Self {
        Self { char, fg, dirty: true }
    }

    /// Set character and color, marking dirty only on change
    pub fn set(&mut self, char: char, fg: Color) {
        if self.char != char || self.fg != fg {
            self.char = char;
            self.fg = fg;
            self.dirty = true;
        }
    }

    /// Blank the cell
    pub fn clear(&mut self) {
        self.set(' ', Color::White);
    }
}
