//! ASCII Robot
//!
//! Terminal robots drawn in ASCII art that wave, blink, merge and slowly
//! run down their batteries.
//!
//! # Overview
//!
//! - A cell grid stage with an ANSI renderer
//! - A robot entity with body-part lookup, recharge, merge and
//!   low-battery notifications
//! - Sprite drawing and paced gesture animation on any [`Surface`]
//! - Per-robot decay timers feeding one tick queue
//! - An interactive command loop tying it together
//!
//! # Example
//!
//! ```
//! use ascii_robot::core::Grid;
//! use ascii_robot::robot::{BodyPart, Point, Robot};
//! use ascii_robot::sprite::{self, Palette};
//!
//! let robot = Robot::new("Robo", 10, 10);
//! assert_eq!(robot.body_part_coordinates(BodyPart::Head), Point::new(8, 8));
//!
//! let mut grid = Grid::new(20, 15);
//! sprite::draw(&mut grid, &robot, &Palette::default());
//! assert_eq!(grid.text_at(8, 9, 5), "|o_o|");
//! ```

pub mod core;
pub mod renderer;
pub mod surface;
pub mod robot;
pub mod sprite;
pub mod animator;
pub mod scheduler;
pub mod config;
pub mod app;

// Re-export commonly used types
pub use core::{Cell, Color, Grid};
pub use renderer::{AnsiRenderer, Renderer};
pub use surface::{Screen, Surface};
pub use robot::{BodyPart, InvalidBodyPart, Point, Robot};
pub use animator::{Animator, Gesture, Routine};
pub use scheduler::{DecayScheduler, Tick};
pub use config::Config;
pub use app::App;
