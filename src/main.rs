//! ASCII Robot Binary
//!
//! Run with: cargo run -- [options]
//!
//! Logging goes to stderr and defaults to warnings only, so it does not
//! scribble over the robots. Use `RUST_LOG=debug` with stderr redirected
//! to a file to watch ticks and commands.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;

use ascii_robot::robot::LowBatteryTrigger;
use ascii_robot::{App, Config};

#[derive(Debug, Parser)]
#[command(name = "ascii-robot", version, about = "ASCII robots that wave, blink, merge and run down their batteries")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Milliseconds per battery unit drained
    #[arg(long)]
    decay_ms: Option<u64>,

    /// Milliseconds between animation frames
    #[arg(long)]
    pace_ms: Option<u64>,

    /// Warn only when the battery first drops below 10%, not on every tick
    #[arg(long)]
    warn_once: bool,
}

impl Args {
    /// Load the config file if given, then apply command line overrides
    fn into_config(self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(ms) = self.decay_ms {
            config.decay_period_ms = ms;
        }
        if let Some(ms) = self.pace_ms {
            config.pace_ms = ms;
        }
        if self.warn_once {
            config.low_battery_trigger = LowBatteryTrigger::OnCrossing;
        }
        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Args::parse().into_config()?;
    info!("Starting with {:?}", config);

    let mut app = App::new(config, tokio::io::stdin(), std::io::stdout());
    app.run().await
}
