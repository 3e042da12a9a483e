//! Robot sprite
//!
//! Turns a robot into glyph strokes at stage positions derived from its
//! center, and paints them on a [`Surface`]:
//!
//! ```text
//!   ___
//!  |o_o|
//!  |___|
//! / | | \
//!   |_|
//!   / \
//! ```

use serde::Deserialize;

use crate::core::Color;
use crate::robot::{BodyPart, Point, Robot};
use crate::surface::Surface;

pub const HEAD_TOP: &str = " ___ ";
pub const EYES_OPEN: &str = "|o_o|";
pub const EYES_LEFT_CLOSED: &str = "|-_o|";
pub const EYES_RIGHT_CLOSED: &str = "|o_-|";
pub const MOUTH: &str = "|___|";
pub const TORSO: &str = "| |";
pub const WAIST: &str = "|_|";
pub const LEGS: &str = "/ \\";
pub const BLANK: &str = " ";

/// Horizontal distance from center to each arm
pub const ARM_REACH: i32 = 3;

/// One run of glyphs belonging to a body part
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stroke {
    pub part: BodyPart,
    pub at: Point,
    pub text: &'static str,
}

impl Stroke {
    pub fn new(part: BodyPart, at: Point, text: &'static str) -> Self {
        Self { part, at, text }
    }
}

/// Colors used for each body part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub head: Color,
    pub body: Color,
    pub arms: Color,
    pub legs: Color,
    /// Whole robot while its battery is low
    pub low_battery: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            head: Color::BrightCyan,
            body: Color::White,
            arms: Color::BrightYellow,
            legs: Color::White,
            low_battery: Color::BrightRed,
        }
    }
}

impl Palette {
    pub fn color(&self, part: BodyPart, low_battery: bool) -> Color {
        if low_battery {
            return self.low_battery;
        }
        match part {
            BodyPart::Head => self.head,
            BodyPart::Body => self.body,
            BodyPart::Arms => self.arms,
            BodyPart::Legs => self.legs,
        }
    }
}

/// Eye row with a given expression
pub fn eyes(center: Point, glyph: &'static str) -> Stroke {
    Stroke::new(BodyPart::Head, center.offset(-2, -1), glyph)
}

/// Both arms, lowered (resting) or raised one row higher
pub fn arms(center: Point, raised: bool) -> [Stroke; 2] {
    let (row, left, right) = if raised {
        (0, "\\", "/")
    } else {
        (1, "/", "\\")
    };
    [
        Stroke::new(BodyPart::Arms, center.offset(-ARM_REACH, row), left),
        Stroke::new(BodyPart::Arms, center.offset(ARM_REACH, row), right),
    ]
}

/// Blank out both arm cells at the lowered or raised row
pub fn erase_arms(center: Point, raised: bool) -> [Stroke; 2] {
    let row = if raised { 0 } else { 1 };
    [
        Stroke::new(BodyPart::Arms, center.offset(-ARM_REACH, row), BLANK),
        Stroke::new(BodyPart::Arms, center.offset(ARM_REACH, row), BLANK),
    ]
}

/// Every stroke of a robot at rest, head first
pub fn strokes(center: Point) -> Vec<Stroke> {
    let mut out = vec![
        Stroke::new(BodyPart::Head, center.offset(-2, -2), HEAD_TOP),
        eyes(center, EYES_OPEN),
        Stroke::new(BodyPart::Head, center.offset(-2, 0), MOUTH),
        Stroke::new(BodyPart::Body, center.offset(-1, 1), TORSO),
        Stroke::new(BodyPart::Body, center.offset(-1, 2), WAIST),
    ];
    out.extend(arms(center, false));
    out.push(Stroke::new(BodyPart::Legs, center.offset(-1, 3), LEGS));
    out
}

/// Paint strokes in the palette color of their body part
pub fn paint<S: Surface + ?Sized>(surface: &mut S, strokes: &[Stroke], palette: &Palette, low_battery: bool) {
    for stroke in strokes {
        surface.set_pen(palette.color(stroke.part, low_battery));
        surface.write_at(stroke.at.x, stroke.at.y, stroke.text);
    }
}

/// Draw a whole robot
pub fn draw<S: Surface + ?Sized>(surface: &mut S, robot: &Robot, palette: &Palette) {
    paint(surface, &strokes(robot.center()), palette, robot.battery().is_low());
}

/// Bottom-right corner (exclusive) a robot occupies
pub fn extent(center: Point) -> (usize, usize) {
    let cols = (center.x + ARM_REACH + 1).max(0) as usize;
    let rows = (center.y + 4).max(0) as usize;
    (cols, rows)
}
