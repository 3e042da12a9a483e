//! Interactive command loop
//!
//! Asks for two robots, then repeats a small menu until the user quits.
//! Keyboard lines and battery ticks are consumed by the same task, so a
//! low-battery notice never lands in the middle of a redraw.

use std::io::Write;
use std::sync::OnceLock;

use anyhow::Result;
use log::{debug, info, warn};
use regex::Regex;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};
use tokio::sync::mpsc;

use crate::animator::Animator;
use crate::config::Config;
use crate::robot::{Point, Robot};
use crate::scheduler::{DecayScheduler, Tick};
use crate::sprite;
use crate::surface::Screen;

/// The demo always works with a pair of robots
pub const ROBOT_COUNT: usize = 2;

/// Menu commands, matched exactly as typed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Info,
    Recharge,
    Merge,
    Quit,
    WaveAndBlink,
}

impl Action {
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "info" => Some(Action::Info),
            "recharge" => Some(Action::Recharge),
            "merge" => Some(Action::Merge),
            "quit" => Some(Action::Quit),
            "wave and blink eyes" => Some(Action::WaveAndBlink),
            _ => None,
        }
    }

    pub fn word(&self) -> &'static str {
        match self {
            Action::Info => "info",
            Action::Recharge => "recharge",
            Action::Merge => "merge",
            Action::Quit => "quit",
            Action::WaveAndBlink => "wave and blink eyes",
        }
    }
}

fn center_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d+,\d+$").expect("valid center pattern"))
}

/// Parse `"x,y"` with non-negative integers that fit on a terminal
pub fn parse_center(input: &str) -> Option<(u16, u16)> {
    if !center_pattern().is_match(input) {
        return None;
    }
    let (x, y) = input.split_once(',')?;
    Some((x.parse().ok()?, y.parse().ok()?))
}

/// Parse a 1-based robot choice into an index
pub fn parse_selection(input: &str) -> Option<usize> {
    match input.trim() {
        "1" => Some(0),
        "2" => Some(1),
        _ => None,
    }
}

/// Notice printed for each low-battery event
pub fn battery_low_notice(robot: &Robot) -> String {
    format!("{}'s battery is less than 10%.", robot.name)
}

/// The interactive session: robots, screen, input and decay timers
pub struct App<R, W: Write> {
    config: Config,
    robots: Vec<Robot>,
    screen: Screen<W>,
    input: Lines<BufReader<R>>,
    scheduler: DecayScheduler,
    animator: Animator,
    notices_tx: mpsc::UnboundedSender<String>,
    notices_rx: mpsc::UnboundedReceiver<String>,
}

impl<R, W> App<R, W>
where
    R: AsyncRead + Unpin,
    W: Write,
{
    pub fn new(config: Config, input: R, output: W) -> Self {
        let (notices_tx, notices_rx) = mpsc::unbounded_channel();
        let animator = Animator::new(config.pace(), config.palette);
        Self {
            robots: Vec::with_capacity(ROBOT_COUNT),
            screen: Screen::new(output, 0, 0),
            input: BufReader::new(input).lines(),
            scheduler: DecayScheduler::new(),
            animator,
            notices_tx,
            notices_rx,
            config,
        }
    }

    pub fn robots(&self) -> &[Robot] {
        &self.robots
    }

    pub fn output(&self) -> &W {
        self.screen.writer()
    }

    /// Run until the user quits or input ends. Decay timers are always
    /// shut down and the terminal restored before returning.
    pub async fn run(&mut self) -> Result<()> {
        self.screen.init()?;
        let result = self.session().await;
        self.scheduler.shutdown().await;
        self.screen.shutdown()?;
        result
    }

    async fn session(&mut self) -> Result<()> {
        for index in 0..ROBOT_COUNT {
            let Some(robot) = self.enter_robot(index).await? else {
                return Ok(());
            };
            self.robots.push(robot);
            self.screen.say("")?;
        }
        self.redraw()?;

        loop {
            self.screen.ask("\nWhat is your name? ")?;
            let Some(user) = self.read_line().await? else {
                return Ok(());
            };
            self.screen.say(&format!("Hello {}", user))?;

            self.screen
                .ask("What do you want to do? (info, wave and blink eyes, recharge, merge, quit): ")?;
            let Some(line) = self.read_line().await? else {
                return Ok(());
            };

            let Some(action) = Action::parse(&line) else {
                self.screen.say("Invalid option! Please try again.")?;
                continue;
            };
            info!("{} chose {}", user, action.word());

            let carry_on = match action {
                Action::Info => self.info().await?,
                Action::Recharge => self.recharge().await?,
                Action::Merge => self.merge().await?,
                Action::WaveAndBlink => self.wave_and_blink().await?,
                Action::Quit => {
                    self.screen.say(&format!("Goodbye {}!", user))?;
                    false
                }
            };
            if !carry_on {
                return Ok(());
            }
        }
    }

    /// Prompt for a center and a name, then wire up the robot's notices
    /// and decay timer
    async fn enter_robot(&mut self, index: usize) -> Result<Option<Robot>> {
        let (x, y) = loop {
            self.screen
                .ask("Enter the coordinates of the center of the robot in format (x,y): ")?;
            let Some(line) = self.read_line().await? else {
                return Ok(None);
            };
            match parse_center(&line) {
                Some((x, y)) if self.fits_stage(x, y) => break (x, y),
                Some(_) => debug!("Center {:?} is off the stage", line),
                None => debug!("Rejected center {:?}", line),
            }
        };

        self.screen.ask("Enter name of Robot: ")?;
        let Some(name) = self.read_line().await? else {
            return Ok(None);
        };

        let mut robot = Robot::new(name, x, y).with_low_battery_trigger(self.config.low_battery_trigger);
        let notices = self.notices_tx.clone();
        robot.on_battery_low(move |r| {
            let _ = notices.send(battery_low_notice(r));
        });
        self.scheduler.schedule(index, self.config.decay_period());
        info!("Robot {} is {:?}", index + 1, robot);
        Ok(Some(robot))
    }

    /// Whether a robot centered here stays within the configured stage
    fn fits_stage(&self, x: u16, y: u16) -> bool {
        let center = Point::new(i32::from(x), i32::from(y));
        self.config.fits_stage(sprite::extent(center))
    }

    /// Next input line, applying battery ticks while waiting.
    /// Queued ticks are applied before a line that is already waiting.
    /// `None` once input is exhausted.
    async fn read_line(&mut self) -> Result<Option<String>> {
        loop {
            tokio::select! {
                biased;
                Some(tick) = self.scheduler.next_tick() => {
                    self.apply_tick(tick)?;
                }
                line = self.input.next_line() => {
                    return Ok(line?.map(|l| l.trim_end_matches('\r').to_string()));
                }
            }
        }
    }

    fn apply_tick(&mut self, tick: Tick) -> Result<()> {
        if let Some(robot) = self.robots.get_mut(tick.robot) {
            robot.decay();
        }
        while let Ok(notice) = self.notices_rx.try_recv() {
            warn!("{}", notice);
            self.screen.say(&notice)?;
        }
        Ok(())
    }

    async fn select_robot(&mut self, action: Action) -> Result<Option<usize>> {
        loop {
            self.screen
                .ask(&format!("Which robot do you want to {}? (1 or 2): ", action.word()))?;
            let Some(line) = self.read_line().await? else {
                return Ok(None);
            };
            if let Some(index) = parse_selection(&line) {
                return Ok(Some(index));
            }
        }
    }

    async fn info(&mut self) -> Result<bool> {
        self.screen.ask(
            "Which part of robot's body you want to see its coordinates? (head, body, arms, legs): ",
        )?;
        let Some(part) = self.read_line().await? else {
            return Ok(false);
        };

        let message = match self.robots[0].coordinates_of(&part) {
            Ok(at) => format!("The coordinates of where the {} is, are: {}", part, at),
            Err(e) => {
                debug!("{}", e);
                "Invalid option!".to_string()
            }
        };
        self.screen.say(&message)?;
        self.hold().await;
        self.redraw()?;
        Ok(true)
    }

    async fn recharge(&mut self) -> Result<bool> {
        let Some(index) = self.select_robot(Action::Recharge).await? else {
            return Ok(false);
        };
        let [before, progress, done] = self.robots[index].recharge().lines();
        self.screen.say(&before)?;
        self.screen.say(&progress)?;
        tokio::time::sleep(self.config.recharge()).await;
        self.screen.say(&done)?;
        self.hold().await;
        self.redraw()?;
        Ok(true)
    }

    async fn merge(&mut self) -> Result<bool> {
        let merged = self.robots[0].merge(&self.robots[1]);
        let (cols, rows) = sprite::extent(merged.center());
        self.screen.clear(cols, rows)?;
        sprite::draw(&mut self.screen, &merged, &self.config.palette);
        self.screen.present_full()?;
        self.place_prompt(&[merged.center()])?;
        self.screen.say(&format!(
            "{} is at {} with {}% battery.",
            merged.name,
            merged.center(),
            merged.battery_level()
        ))?;
        self.hold().await;
        self.redraw()?;
        Ok(true)
    }

    async fn wave_and_blink(&mut self) -> Result<bool> {
        let Some(index) = self.select_robot(Action::WaveAndBlink).await? else {
            return Ok(false);
        };
        self.animator
            .play(&self.config.routine, &self.robots[index], &mut self.screen)
            .await?;
        self.redraw()?;
        Ok(true)
    }

    async fn hold(&mut self) {
        tokio::time::sleep(self.config.hold()).await;
    }

    /// Clear, draw every robot, and park the cursor below them
    fn redraw(&mut self) -> Result<()> {
        let (cols, rows) = self
            .robots
            .iter()
            .map(|r| sprite::extent(r.center()))
            .fold((0, 0), |(c, r), (rc, rr)| (c.max(rc), r.max(rr)));
        self.screen.clear(cols, rows)?;
        for robot in &self.robots {
            sprite::draw(&mut self.screen, robot, &self.config.palette);
        }
        self.screen.present_full()?;
        let centers: Vec<Point> = self.robots.iter().map(|r| r.center()).collect();
        self.place_prompt(&centers)
    }

    /// Cursor to the legs row of the lowest robot, then below it
    fn place_prompt(&mut self, centers: &[Point]) -> Result<()> {
        let max_x = centers.iter().map(|c| c.x).max().unwrap_or(0);
        let max_y = centers.iter().map(|c| c.y).max().unwrap_or(0);
        self.screen
            .place_cursor((max_x - 1).max(0) as usize, (max_y + 3).max(0) as usize)?;
        self.screen.say("\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::AsyncWriteExt;

    fn quick_config() -> Config {
        Config {
            decay_period_ms: 10_000,
            pace_ms: 1,
            hold_ms: 1,
            recharge_ms: 1,
            ..Config::default()
        }
    }

    async fn run_script(config: Config, script: &'static str) -> App<&'static [u8], Vec<u8>> {
        let mut app = App::new(config, script.as_bytes(), Vec::new());
        app.run().await.unwrap();
        app
    }

    fn transcript(app: &App<&'static [u8], Vec<u8>>) -> String {
        String::from_utf8_lossy(app.output()).into_owned()
    }

    #[test]
    fn test_parse_center() {
        assert_eq!(parse_center("10,20"), Some((10, 20)));
        assert_eq!(parse_center("0,0"), Some((0, 0)));
        assert_eq!(parse_center("10, 20"), None);
        assert_eq!(parse_center("-1,2"), None);
        assert_eq!(parse_center("a,b"), None);
        assert_eq!(parse_center("1,2,3"), None);
        assert_eq!(parse_center(""), None);
        // Digits, but too large for a terminal cell
        assert_eq!(parse_center("99999999,1"), None);
    }

    #[test]
    fn test_parse_action_words() {
        assert_eq!(Action::parse("info"), Some(Action::Info));
        assert_eq!(Action::parse("wave and blink eyes"), Some(Action::WaveAndBlink));
        assert_eq!(Action::parse("wave"), None);
        assert_eq!(Action::parse("Quit"), None);
        for action in [Action::Info, Action::Recharge, Action::Merge, Action::Quit, Action::WaveAndBlink] {
            assert_eq!(Action::parse(action.word()), Some(action));
        }
    }

    #[test]
    fn test_parse_selection() {
        assert_eq!(parse_selection("1"), Some(0));
        assert_eq!(parse_selection("2"), Some(1));
        assert_eq!(parse_selection("3"), None);
        assert_eq!(parse_selection("0"), None);
        assert_eq!(parse_selection("one"), None);
    }

    #[test]
    fn test_battery_low_notice() {
        let robot = Robot::new("Robo", 1, 1);
        assert_eq!(battery_low_notice(&robot), "Robo's battery is less than 10%.");
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_info_and_quit() {
        let app = run_script(
            quick_config(),
            "bad\n10,10\nAlpha\n20,12\nBeta\nSam\ninfo\nhead\nSam\ninfo\ntail\nSam\njump\nSam\nquit\n",
        )
        .await;
        let out = transcript(&app);

        // The malformed center was asked for again
        assert_eq!(out.matches("Enter the coordinates of the center").count(), 3);
        assert!(out.contains("Hello Sam"));
        assert!(out.contains("The coordinates of where the head is, are: (8,8)"));
        assert!(out.contains("Invalid option!\n"));
        assert!(out.contains("Invalid option! Please try again."));
        assert!(out.ends_with("Goodbye Sam!\n\x1b[0m\x1b[?25h"));

        assert_eq!(app.robots().len(), 2);
        assert_eq!(app.robots()[1].name, "Beta");
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_refuses_centers_off_the_stage() {
        let app = run_script(
            quick_config(),
            "65535,65535\n197,5\n5,97\n5,5\nA\n196,96\nB\nme\nquit\n",
        )
        .await;
        let out = transcript(&app);

        assert_eq!(out.matches("Enter the coordinates of the center").count(), 5);
        assert_eq!(app.robots()[0].name, "A");
        assert_eq!(app.robots()[1].center(), Point::new(196, 96));
        assert_eq!((app.screen.grid.cols, app.screen.grid.rows), (200, 100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_redraw_parks_cursor_below_robots() {
        let app = run_script(quick_config(), "10,10\nA\n20,12\nB\nme\nquit\n").await;
        let out = transcript(&app);

        // (max_x - 1, max_y + 3) = (19, 15), 1-based on the wire
        assert!(out.contains("\x1b[16;20H\x1b[0m\n\n\nWhat is your name? "));
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_merge_parks_cursor_below_merged_robot() {
        let app = run_script(quick_config(), "10,10\nA\n20,20\nB\nme\nmerge\nme\nquit\n").await;
        let out = transcript(&app);

        // Merged center (15,15) puts the cursor at (14, 18)
        assert!(out.contains("\x1b[19;15H\x1b[0m\n\nAB is at (15,15) with 100% battery."));
    }

    #[tokio::test(start_paused = true)]
    async fn test_queued_ticks_apply_before_waiting_input() {
        let config = Config {
            decay_period_ms: 100,
            hold_ms: 1_000,
            ..quick_config()
        };
        // Ticks pile up during the info hold; the script lines behind it
        // are all readable at once.
        let app = run_script(config, "5,5\nA\n9,9\nB\nme\ninfo\nhead\nme\nrecharge\n1\nme\nquit\n").await;
        let out = transcript(&app);

        assert!(
            out.contains("Current battery level: 90%") || out.contains("Current battery level: 91%"),
            "{}",
            out
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_merge_leaves_robots_untouched() {
        let app = run_script(quick_config(), "10,10\nA\n20,20\nB\nme\nmerge\nme\nquit\n").await;
        let out = transcript(&app);

        assert!(out.contains("AB is at (15,15) with 100% battery."));
        assert_eq!(app.robots()[0].center().x, 10);
        assert_eq!(app.robots()[1].center().x, 20);
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_recharge_reselects_until_valid() {
        let app = run_script(quick_config(), "5,5\nA\n9,9\nB\nme\nrecharge\n7\n2\nme\nquit\n").await;
        let out = transcript(&app);

        assert_eq!(out.matches("Which robot do you want to recharge? (1 or 2): ").count(), 2);
        assert!(out.contains("Current battery level: 100%"));
        assert!(out.contains("Robot: (B) is recharged. Battery level is now: 100%"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_wave_and_blink_redraws_robot() {
        let app = run_script(quick_config(), "5,5\nA\n12,5\nB\nme\nwave and blink eyes\n2\nme\nquit\n").await;
        let out = transcript(&app);

        assert!(out.contains("Which robot do you want to wave and blink eyes? (1 or 2): "));
        // Robot B's left arm raised to its center row
        assert!(out.contains("\x1b[6;10H\x1b[93m\\"));
        // Left eye closing only redraws the changed cell
        assert!(out.contains("\x1b[5;12H\x1b[96m-") || out.contains("\x1b[5;12H-"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_of_input_quits_quietly() {
        let app = run_script(quick_config(), "5,5\nA\n").await;
        assert_eq!(app.robots().len(), 1);
        assert!(!transcript(&app).contains("Goodbye"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_low_battery_notices_arrive_between_prompts() {
        let config = Config {
            decay_period_ms: 10,
            ..quick_config()
        };
        let (mut keyboard, input) = tokio::io::duplex(1024);
        let session = tokio::spawn(async move {
            let mut app = App::new(config, input, Vec::new());
            app.run().await.unwrap();
            app
        });

        keyboard.write_all(b"5,5\nA\n9,9\nB\n").await.unwrap();
        tokio::time::sleep(Duration::from_millis(925)).await;
        keyboard.write_all(b"me\nquit\n").await.unwrap();

        let app = session.await.unwrap();
        let out = String::from_utf8_lossy(app.output()).into_owned();
        assert!(out.contains("A's battery is less than 10%."));
        assert!(out.contains("B's battery is less than 10%."));
        assert!(app.robots().iter().all(|r| r.battery_level() < 10));
    }
}
