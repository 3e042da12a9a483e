//! Runtime configuration
//!
//! Defaults reproduce the classic demo timings. A TOML file can override
//! any subset of fields:
//!
//! ```toml
//! decay_period_ms = 2000
//! pace_ms = 250
//! low_battery_trigger = "on_crossing"
//! routine = ["blink", "wave"]
//! max_cols = 120
//!
//! [palette]
//! head = "bright_green"
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::animator::Routine;
use crate::robot::LowBatteryTrigger;
use crate::sprite::Palette;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Battery drains one unit per period
    pub decay_period_ms: u64,
    /// Pause between animation frames
    pub pace_ms: u64,
    /// How long info and merge results stay on screen
    pub hold_ms: u64,
    /// How long recharging takes
    pub recharge_ms: u64,
    /// Largest stage a robot may extend to; centers beyond it are refused
    pub max_cols: u16,
    pub max_rows: u16,
    pub low_battery_trigger: LowBatteryTrigger,
    /// Gestures played by "wave and blink eyes", in order
    pub routine: Routine,
    pub palette: Palette,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            decay_period_ms: 10_000,
            pace_ms: 500,
            hold_ms: 3_000,
            recharge_ms: 4_000,
            max_cols: 200,
            max_rows: 100,
            low_battery_trigger: LowBatteryTrigger::EveryTick,
            routine: Routine::default(),
            palette: Palette::default(),
        }
    }
}

impl Config {
    /// Parse a TOML document
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid configuration")
    }

    /// Read and parse a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in {}", path.display()))
    }

    pub fn decay_period(&self) -> Duration {
        Duration::from_millis(self.decay_period_ms.max(1))
    }

    pub fn pace(&self) -> Duration {
        Duration::from_millis(self.pace_ms)
    }

    pub fn hold(&self) -> Duration {
        Duration::from_millis(self.hold_ms)
    }

    pub fn recharge(&self) -> Duration {
        Duration::from_millis(self.recharge_ms)
    }

    /// Whether a stage of `cols` x `rows` cells is within the limits
    pub fn fits_stage(&self, (cols, rows): (usize, usize)) -> bool {
        cols <= usize::from(self.max_cols) && rows <= usize::from(self.max_rows)
    }
}
