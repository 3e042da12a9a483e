//! Battery charge tracking

/// Charge level of a fresh or recharged battery
pub const FULL: u8 = 100;

/// Levels strictly below this count as low
pub const LOW_THRESHOLD: u8 = 10;

/// Where a battery sits in its discharge cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryState {
    /// Exactly 100%
    Full,
    /// 10-99%
    Decaying,
    /// 1-9%
    Low,
    /// 0%
    Depleted,
}

impl BatteryState {
    pub fn from_level(level: u8) -> Self {
        match level {
            0 => BatteryState::Depleted,
            l if l < LOW_THRESHOLD => BatteryState::Low,
            l if l < FULL => BatteryState::Decaying,
            _ => BatteryState::Full,
        }
    }
}

/// Battery with a level clamped to 0-100
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Battery {
    level: u8,
}

impl Default for Battery {
    fn default() -> Self {
        Self { level: FULL }
    }
}

impl Battery {
    /// Create a battery at an arbitrary level (clamped to 100)
    pub fn with_level(level: u8) -> Self {
        Self { level: level.min(FULL) }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn state(&self) -> BatteryState {
        BatteryState::from_level(self.level)
    }

    /// Check if battery is low (< 10%)
    pub fn is_low(&self) -> bool {
        self.level < LOW_THRESHOLD
    }

    /// Drop one unit of charge, never going below zero. Returns the new level.
    pub fn drain(&mut self) -> u8 {
        self.level = self.level.saturating_sub(1);
        self.level
    }

    /// Jump back to full
    pub fn recharge(&mut self) {
        self.level = FULL;
    }

    /// Integer-truncated mean of two batteries
    pub fn average(a: &Battery, b: &Battery) -> Battery {
        let mean = (u16::from(a.level) + u16::from(b.level)) / 2;
        Battery::with_level(mean as u8)
    }
}
