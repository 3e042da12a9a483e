//! Robot Entity
//!
//! A robot has a name, a center on the stage and a battery. Everything
//! drawn for a robot is placed relative to its center. The battery is
//! drained one unit per decay tick; listeners registered with
//! [`Robot::on_battery_low`] hear about it once the charge drops below 10%.

pub mod battery;
pub mod body;

use std::fmt;

use log::{debug, info};
use serde::{Deserialize, Serialize};

pub use battery::{Battery, BatteryState, LOW_THRESHOLD};
pub use body::{BodyPart, InvalidBodyPart};

/// A cell position on the stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// When low-battery listeners are notified
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LowBatteryTrigger {
    /// Every decay tick that leaves the level below the threshold
    #[default]
    EveryTick,
    /// Only the tick that takes the level from >= threshold to below it
    OnCrossing,
}

/// Callback invoked with the robot whose battery is low
pub type BatteryLowListener = Box<dyn FnMut(&Robot) + Send + Sync>;

/// Outcome of a recharge, carrying the lines shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recharge {
    pub name: String,
    pub previous_level: u8,
    pub level: u8,
}

impl Recharge {
    /// Status before, progress, and completion lines in display order
    pub fn lines(&self) -> [String; 3] {
        [
            format!("Current battery level: {}%", self.previous_level),
            "Recharging...".to_string(),
            format!(
                "Robot: ({}) is recharged. Battery level is now: {}%",
                self.name, self.level
            ),
        ]
    }
}

/// An ASCII robot
pub struct Robot {
    pub name: String,
    center: Point,
    battery: Battery,
    trigger: LowBatteryTrigger,
    listeners: Vec<BatteryLowListener>,
}

impl fmt::Debug for Robot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Robot")
            .field("name", &self.name)
            .field("center", &self.center)
            .field("battery", &self.battery.level())
            .field("trigger", &self.trigger)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Robot {
    /// Create a robot with a full battery centered at (x, y)
    pub fn new(name: impl Into<String>, x: u16, y: u16) -> Self {
        Self::at(name.into(), Point::new(i32::from(x), i32::from(y)), Battery::default())
    }

    fn at(name: String, center: Point, battery: Battery) -> Self {
        Self {
            name,
            center,
            battery,
            trigger: LowBatteryTrigger::default(),
            listeners: Vec::new(),
        }
    }

    /// Builder-style trigger selection
    pub fn with_low_battery_trigger(mut self, trigger: LowBatteryTrigger) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn battery(&self) -> &Battery {
        &self.battery
    }

    pub fn battery_level(&self) -> u8 {
        self.battery.level()
    }

    /// Where a body part is anchored on the stage
    pub fn body_part_coordinates(&self, part: BodyPart) -> Point {
        let (dx, dy) = part.offset();
        self.center.offset(dx, dy)
    }

    /// Look up a body part by its typed name
    pub fn coordinates_of(&self, part: &str) -> Result<Point, InvalidBodyPart> {
        let part: BodyPart = part.parse()?;
        Ok(self.body_part_coordinates(part))
    }

    /// Refill the battery to 100%
    pub fn recharge(&mut self) -> Recharge {
        let previous_level = self.battery.level();
        self.battery.recharge();
        info!("{} recharged from {}%", self.name, previous_level);
        Recharge {
            name: self.name.clone(),
            previous_level,
            level: self.battery.level(),
        }
    }

    /// Combine two robots into a new one.
    ///
    /// The name is both names back to back, the center and battery level
    /// are truncated averages. Neither input changes and the new robot
    /// starts without listeners.
    pub fn merge(&self, other: &Robot) -> Robot {
        let center = Point::new(
            (self.center.x + other.center.x) / 2,
            (self.center.y + other.center.y) / 2,
        );
        let name = format!("{}{}", self.name, other.name);
        let battery = Battery::average(&self.battery, &other.battery);
        info!("Merged {} and {} into {} at {}", self.name, other.name, name, center);
        Robot::at(name, center, battery).with_low_battery_trigger(self.trigger)
    }

    /// Subscribe to low-battery notifications
    pub fn on_battery_low<F>(&mut self, listener: F)
    where
        F: FnMut(&Robot) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// One decay period elapsed: drain a unit and notify listeners if low.
    /// Returns the new level.
    pub fn decay(&mut self) -> u8 {
        let before = self.battery.level();
        let level = self.battery.drain();
        debug!("{} battery {}% -> {}%", self.name, before, level);

        let fire = match self.trigger {
            LowBatteryTrigger::EveryTick => level < LOW_THRESHOLD,
            LowBatteryTrigger::OnCrossing => before >= LOW_THRESHOLD && level < LOW_THRESHOLD,
        };
        if fire {
            self.notify_battery_low();
        }
        level
    }

    fn notify_battery_low(&mut self) {
        // Listeners borrow the robot, so they are moved out while they run
        let mut listeners = std::mem::take(&mut self.listeners);
        for listener in listeners.iter_mut() {
            listener(&*self);
        }
        listeners.append(&mut self.listeners);
        self.listeners = listeners;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn counting(robot: &mut Robot) -> Arc<Mutex<Vec<String>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        robot.on_battery_low(move |r| {
            sink.lock().unwrap().push(format!("{}:{}", r.name, r.battery_level()));
        });
        seen
    }

    #[test]
    fn test_body_part_offsets() {
        let robot = Robot::new("Robo", 10, 10);
        assert_eq!(robot.body_part_coordinates(BodyPart::Head), Point::new(8, 8));
        assert_eq!(robot.body_part_coordinates(BodyPart::Body), Point::new(9, 11));
        assert_eq!(robot.body_part_coordinates(BodyPart::Arms), Point::new(7, 11));
        assert_eq!(robot.body_part_coordinates(BodyPart::Legs), Point::new(9, 13));
    }

    #[test]
    fn test_body_part_offsets_across_centers() {
        for x in 3..40u16 {
            for y in (3..30u16).step_by(7) {
                let robot = Robot::new("r", x, y);
                for part in BodyPart::ALL {
                    let (dx, dy) = part.offset();
                    let p = robot.body_part_coordinates(part);
                    assert_eq!((p.x, p.y), (i32::from(x) + dx, i32::from(y) + dy));
                    assert!(p.x >= 0 && p.y >= 0);
                }
            }
        }
    }

    #[test]
    fn test_coordinates_of_by_name() {
        let robot = Robot::new("Robo", 10, 10);
        assert_eq!(robot.coordinates_of("head"), Ok(Point::new(8, 8)));
        assert_eq!(robot.coordinates_of("tail"), Err(InvalidBodyPart("tail".into())));
    }

    #[test]
    fn test_new_robot_is_full() {
        let robot = Robot::new("Robo", 0, 0);
        assert_eq!(robot.battery_level(), 100);
        assert_eq!(robot.battery().state(), BatteryState::Full);
    }

    #[test]
    fn test_recharge_from_any_level() {
        let mut robot = Robot::new("Robo", 5, 5);
        for _ in 0..150 {
            robot.decay();
        }
        assert_eq!(robot.battery_level(), 0);

        let report = robot.recharge();
        assert_eq!(robot.battery_level(), 100);
        assert_eq!(report.previous_level, 0);
        assert_eq!(
            report.lines(),
            [
                "Current battery level: 0%".to_string(),
                "Recharging...".to_string(),
                "Robot: (Robo) is recharged. Battery level is now: 100%".to_string(),
            ]
        );
    }

    #[test]
    fn test_decay_reaches_expected_level() {
        let mut robot = Robot::new("Robo", 5, 5);
        for n in 1..=120u8 {
            let level = robot.decay();
            assert_eq!(level, 100u8.saturating_sub(n));
        }
    }

    #[test]
    fn test_merge() {
        let mut a = Robot::new("Alpha", 10, 10);
        let b = Robot::new("Beta", 20, 21);
        for _ in 0..7 {
            a.decay();
        }

        let merged = a.merge(&b);
        assert_eq!(merged.name, "AlphaBeta");
        assert_eq!(merged.center(), Point::new(15, 15));
        assert_eq!(merged.battery_level(), (93 + 100) / 2);

        assert_eq!(a.name, "Alpha");
        assert_eq!(a.center(), Point::new(10, 10));
        assert_eq!(a.battery_level(), 93);
        assert_eq!(b.center(), Point::new(20, 21));
        assert_eq!(b.battery_level(), 100);
    }

    #[test]
    fn test_merge_same_names_concatenate() {
        let a = Robot::new("R", 1, 1);
        let b = Robot::new("R", 2, 2);
        assert_eq!(a.merge(&b).name, "RR");
    }

    #[test]
    fn test_merged_robot_has_no_listeners() {
        let mut a = Robot::new("A", 10, 10);
        let seen = counting(&mut a);
        let b = Robot::new("B", 10, 10);
        let mut merged = a.merge(&b);
        for _ in 0..100 {
            merged.decay();
        }
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_low_battery_fires_every_tick_below_threshold() {
        let mut robot = Robot::new("Robo", 5, 5);
        let seen = counting(&mut robot);

        for _ in 0..90 {
            robot.decay();
        }
        assert_eq!(robot.battery_level(), 10);
        assert!(seen.lock().unwrap().is_empty());

        robot.decay();
        robot.decay();
        robot.decay();
        assert_eq!(*seen.lock().unwrap(), vec!["Robo:9", "Robo:8", "Robo:7"]);

        // Depleted robots keep reporting
        for _ in 0..20 {
            robot.decay();
        }
        assert_eq!(seen.lock().unwrap().len(), 23);
        assert_eq!(seen.lock().unwrap().last().unwrap(), "Robo:0");
    }

    #[test]
    fn test_low_battery_fires_once_per_crossing() {
        let mut robot = Robot::new("Robo", 5, 5).with_low_battery_trigger(LowBatteryTrigger::OnCrossing);
        let seen = counting(&mut robot);

        for _ in 0..120 {
            robot.decay();
        }
        assert_eq!(*seen.lock().unwrap(), vec!["Robo:9"]);

        robot.recharge();
        for _ in 0..95 {
            robot.decay();
        }
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_listener_can_read_robot() {
        let mut robot = Robot::new("Robo", 5, 5);
        let seen = counting(&mut robot);
        let second = counting(&mut robot);
        for _ in 0..91 {
            robot.decay();
        }
        assert_eq!(*seen.lock().unwrap(), vec!["Robo:9"]);
        assert_eq!(*second.lock().unwrap(), vec!["Robo:9"]);
    }
}
