//! Command-line flags, the optional TOML config file, and the seed file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use chrono::Duration;
use clap::Parser;
use roster_core::{
  creator::NewCreator,
  policy::{DEFAULT_FOLLOW_UP_DAYS, GuestCapacity},
};
use serde::Deserialize;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug, Default)]
#[command(name = "roster", about = "Terminal board for creator outreach and the guest list")]
pub struct Args {
  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE", env = "ROSTER_CONFIG")]
  pub config: Option<PathBuf>,

  /// JSON file with creators to load at startup.
  #[arg(long, value_name = "FILE", env = "ROSTER_SEED")]
  pub seed: Option<PathBuf>,

  /// Maximum number of final guests (default: 7).
  #[arg(long, env = "ROSTER_GUEST_CAPACITY")]
  pub guest_capacity: Option<usize>,

  /// Write logs to this file; the terminal belongs to the board.
  #[arg(long, value_name = "FILE", env = "ROSTER_LOG_FILE")]
  pub log_file: Option<PathBuf>,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default, Debug)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
  pub guest_capacity: Option<usize>,
  pub follow_up_days: Option<u32>,
  pub seed:           Option<PathBuf>,
  pub log_file:       Option<PathBuf>,
}

impl ConfigFile {
  pub fn load(path: &Path) -> Result<Self> {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parsing config file {}", path.display()))
  }
}

// ─── Resolved settings ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
  pub guest_capacity:  GuestCapacity,
  pub follow_up_after: Duration,
  pub seed:            Option<PathBuf>,
  pub log_file:        Option<PathBuf>,
}

impl Settings {
  /// CLI flags override the config file, which overrides defaults.
  pub fn resolve(args: Args, file: ConfigFile) -> Result<Self> {
    let guest_capacity = match args.guest_capacity.or(file.guest_capacity) {
      Some(n) => GuestCapacity::new(n).ok_or_else(|| anyhow!("guest capacity must be at least 1"))?,
      None => GuestCapacity::default(),
    };
    let follow_up_days = file.follow_up_days.unwrap_or(DEFAULT_FOLLOW_UP_DAYS);

    Ok(Self {
      guest_capacity,
      follow_up_after: Duration::days(i64::from(follow_up_days)),
      seed: args.seed.or(file.seed),
      log_file: args.log_file.or(file.log_file),
    })
  }
}

/// Read a JSON array of new-creator payloads.
pub fn load_seed(path: &Path) -> Result<Vec<NewCreator>> {
  let raw = std::fs::read_to_string(path)
    .with_context(|| format!("reading seed file {}", path.display()))?;
  serde_json::from_str(&raw).with_context(|| format!("parsing seed file {}", path.display()))
}
