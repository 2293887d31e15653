//! `roster`: terminal board for creator outreach and the event guest list.
//!
//! # Usage
//!
//! ```
//! roster --seed creators.json
//! roster --config ~/.config/roster/config.toml --log-file roster.log
//! ```

mod app;
mod form;
mod settings;
mod ui;

use std::{
  fs::File,
  io,
  sync::Mutex,
  time::Duration,
};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use roster_core::roster::{RosterEvent, RosterStore};
use settings::{Args, ConfigFile, Settings};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  let args = Args::parse();

  let file_cfg = match &args.config {
    Some(path) => ConfigFile::load(path)?,
    None => ConfigFile::default(),
  };
  let settings = Settings::resolve(args, file_cfg)?;

  // The terminal belongs to the board, so logs only go to a file.
  if let Some(path) = &settings.log_file {
    let file =
      File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
      .with_env_filter(
        EnvFilter::builder()
          .with_default_directive(LevelFilter::INFO.into())
          .from_env_lossy(),
      )
      .with_ansi(false)
      .with_writer(Mutex::new(file))
      .init();
  }

  let mut store = RosterStore::new(settings.guest_capacity);
  store.subscribe(log_event);

  if let Some(path) = &settings.seed {
    let payloads = settings::load_seed(path)?;
    store
      .seed(payloads)
      .with_context(|| format!("seeding roster from {}", path.display()))?;
  }

  tracing::info!(
    guest_capacity = settings.guest_capacity.get(),
    creators = store.creators().len(),
    "starting board"
  );
  let mut app = App::new(store, settings.follow_up_after);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, &mut app);

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

fn log_event(event: &RosterEvent, roster: &[roster_core::creator::Creator]) {
  match event {
    RosterEvent::FinalGuest { id, on } => {
      let guests = roster_core::policy::guest_count(roster);
      tracing::info!(%id, on, guests, "guest list changed");
    }
    RosterEvent::OutreachStatus { id, status, .. } => {
      tracing::info!(%id, %status, "outreach status changed");
    }
    other => tracing::trace!(?other, "roster event"),
  }
}

// ─── Event loop ───────────────────────────────────────────────────────────────

fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    if !event::poll(Duration::from_millis(250)).context("polling terminal events")? {
      continue;
    }

    match event::read().context("reading terminal event")? {
      // Windows reports releases too.
      Event::Key(key) if key.kind == KeyEventKind::Press => {
        if !app.handle_key(key) {
          break;
        }
      }
      Event::Resize(_, _) => {
        // Terminal will redraw on next iteration.
      }
      _ => {}
    }
  }

  Ok(())
}
