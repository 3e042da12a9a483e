//! Gesture animation
//!
//! A gesture is a fixed list of frames. Each frame is a handful of strokes
//! painted over the robot, presented, then held for the pacing interval.
//! Gestures run one after another in the order a [`Routine`] lists them.

use std::io;
use std::time::Duration;

use log::debug;
use serde::Deserialize;

use crate::robot::{Point, Robot};
use crate::sprite::{self, Palette, Stroke};
use crate::surface::Surface;

/// How many times each gesture repeats its cycle
pub const REPETITIONS: usize = 5;

/// Strokes painted together before pausing
pub type Frame = Vec<Stroke>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    /// Arms up, arms down
    Wave,
    /// Open, left closed, open, right closed
    Blink,
}

impl Gesture {
    pub fn frames(&self, center: Point) -> Vec<Frame> {
        match self {
            Gesture::Wave => wave(center),
            Gesture::Blink => blink(center),
        }
    }
}

fn wave(center: Point) -> Vec<Frame> {
    let mut frames = Vec::with_capacity(REPETITIONS * 2);
    for _ in 0..REPETITIONS {
        let mut up: Frame = sprite::erase_arms(center, false).to_vec();
        up.extend(sprite::arms(center, true));
        frames.push(up);

        let mut down: Frame = sprite::erase_arms(center, true).to_vec();
        down.extend(sprite::arms(center, false));
        frames.push(down);
    }
    frames
}

fn blink(center: Point) -> Vec<Frame> {
    let cycle = [
        sprite::EYES_OPEN,
        sprite::EYES_LEFT_CLOSED,
        sprite::EYES_OPEN,
        sprite::EYES_RIGHT_CLOSED,
    ];
    let mut frames: Vec<Frame> = Vec::with_capacity(REPETITIONS * cycle.len() + 1);
    for _ in 0..REPETITIONS {
        for glyph in cycle {
            frames.push(vec![sprite::eyes(center, glyph)]);
        }
    }
    // Always finish with both eyes open
    frames.push(vec![sprite::eyes(center, sprite::EYES_OPEN)]);
    frames
}

/// An ordered list of gestures played back to back
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Routine {
    gestures: Vec<Gesture>,
}

impl Default for Routine {
    fn default() -> Self {
        Self::new(vec![Gesture::Wave, Gesture::Blink])
    }
}

impl Routine {
    pub fn new(gestures: Vec<Gesture>) -> Self {
        Self { gestures }
    }

    pub fn gestures(&self) -> &[Gesture] {
        &self.gestures
    }
}

/// Plays gestures on a surface at a fixed pace
pub struct Animator {
    pace: Duration,
    palette: Palette,
}

impl Animator {
    pub fn new(pace: Duration, palette: Palette) -> Self {
        Self { pace, palette }
    }

    pub fn pace(&self) -> Duration {
        self.pace
    }

    /// Play a single gesture to completion
    pub async fn perform<S: Surface>(&self, gesture: Gesture, robot: &Robot, surface: &mut S) -> io::Result<()> {
        debug!("{} performs {:?}", robot.name, gesture);
        let low = robot.battery().is_low();
        for frame in gesture.frames(robot.center()) {
            sprite::paint(surface, &frame, &self.palette, low);
            surface.present()?;
            tokio::time::sleep(self.pace).await;
        }
        Ok(())
    }

    /// Play every gesture of a routine in order
    pub async fn play<S: Surface>(&self, routine: &Routine, robot: &Robot, surface: &mut S) -> io::Result<()> {
        for gesture in routine.gestures() {
            self.perform(*gesture, robot, surface).await?;
        }
        Ok(())
    }
}
