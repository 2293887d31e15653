//! TUI rendering: orchestrates all panes.

pub mod board;
pub mod creator_detail;
pub mod creator_list;
pub mod popups;
pub mod shortlist;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Paragraph, Tabs},
};
use roster_core::{creator::OutreachStatus, policy::RosterCounts};

use crate::app::{App, Mode, Screen, View};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, tabs, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Length(1), // tabs
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  draw_tabs(f, rows[1], app);
  draw_body(f, rows[2], app);
  draw_status(f, rows[3], app);

  match app.mode {
    Mode::Filter => popups::draw_filter_panel(f, area, app),
    Mode::AddForm => popups::draw_add_form(f, area, app),
    Mode::Edit(field) => popups::draw_edit_prompt(f, area, app, field),
    Mode::Normal | Mode::Search => {}
  }
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%Y-%m-%d").to_string();
  let counts = RosterCounts::tally(app.store.creators());
  let capacity = app.store.guest_capacity().get();

  let left = Span::styled(
    " roster",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let middle = Span::styled(
    format!(
      "  {} creators · {} shortlisted · {} preselected · {}/{} guests",
      counts.total, counts.shortlisted, counts.preselected, counts.guests, capacity
    ),
    Style::default().fg(Color::Gray),
  );
  let right = Span::styled(format!("{date} "), Style::default().fg(Color::Gray));

  // Simple left-right header: pad the middle.
  let used = (left.width() + middle.width() + right.width()) as u16;
  let pad = area.width.saturating_sub(used);

  let line = Line::from(vec![left, middle, Span::raw(" ".repeat(pad as usize)), right]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::DarkGray)),
    area,
  );
}

fn draw_tabs(f: &mut Frame, area: Rect, app: &App) {
  let titles = View::ALL
    .iter()
    .enumerate()
    .map(|(i, v)| format!("{} {}", i + 1, v.title()));
  let tabs = Tabs::new(titles)
    .select(app.view.index())
    .style(Style::default().fg(Color::DarkGray))
    .highlight_style(
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    );
  f.render_widget(tabs, area);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body(f: &mut Frame, area: Rect, app: &App) {
  let (main, detail) = if app.screen == Screen::Detail {
    let cols = Layout::default()
      .direction(Direction::Horizontal)
      .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
      .split(area);
    (cols[0], Some(cols[1]))
  } else {
    (area, None)
  };

  match app.view {
    View::All => creator_list::draw(f, main, app, "Creators"),
    View::Shortlist => shortlist::draw(f, main, app),
    View::Preselected => creator_list::draw(f, main, app, "Preselected"),
    View::Guests => creator_list::draw_guests(f, main, app),
    View::Board => board::draw(f, main, app),
  }

  if let Some(detail) = detail {
    creator_detail::draw(f, detail, app);
  }
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match app.mode {
    Mode::Search => ("SEARCH", "Type to filter  Esc clear  Enter keep"),
    Mode::Filter => ("FILTER", "←→ facet  ↑↓ option  Space toggle  c clear  Esc close"),
    Mode::AddForm => ("ADD", "Tab next field  Enter save  Esc cancel"),
    Mode::Edit(_) => ("EDIT", "Enter save  Esc cancel"),
    Mode::Normal if app.view == View::Board => (
      "BOARD",
      "←→ column  ↑↓ move  </> status  Enter detail  q quit",
    ),
    Mode::Normal => (
      "NORMAL",
      "1-5 view  / search  f filter  s/p/g toggle  K/J rank  a add  q quit",
    ),
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(format!("  {status}"), Style::default().fg(Color::DarkGray));

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}

// ─── Shared formatting ────────────────────────────────────────────────────────

/// Compact follower count: `950`, `23.5k`, `1.2M`.
pub(crate) fn followers_label(count: u64) -> String {
  match count {
    0..1_000 => count.to_string(),
    1_000..1_000_000 => trim_decimal(count as f64 / 1_000.0, "k"),
    _ => trim_decimal(count as f64 / 1_000_000.0, "M"),
  }
}

fn trim_decimal(value: f64, suffix: &str) -> String {
  let text = format!("{value:.1}");
  let text = text.strip_suffix(".0").unwrap_or(&text);
  format!("{text}{suffix}")
}

pub(crate) fn status_color(status: OutreachStatus) -> Color {
  match status {
    OutreachStatus::NotContacted => Color::Gray,
    OutreachStatus::MessageSent => Color::Blue,
    OutreachStatus::FollowUp => Color::Yellow,
    OutreachStatus::Responded => Color::Cyan,
    OutreachStatus::Accepted => Color::Green,
    OutreachStatus::Declined => Color::Red,
  }
}

pub(crate) fn cursor_style() -> Style {
  Style::default()
    .bg(Color::Blue)
    .fg(Color::White)
    .add_modifier(Modifier::BOLD)
}
