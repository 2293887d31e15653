//! Creator table for the All, Preselected and Guests views.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table, TableState},
};
use roster_core::{creator::Creator, policy};

use super::{cursor_style, followers_label, status_color};
use crate::app::{App, Mode};

/// Render the current view's creators as a table into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App, label: &str) {
  let visible = app.visible();
  let total = app.store.creators().len();

  // Title with count.
  let title = if !app.filter.is_empty() && label == "Creators" {
    format!(" {label} ({}/{}) ", visible.len(), total)
  } else {
    format!(" {label} ({}) ", visible.len())
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let mut inner_area = block.inner(area);
  f.render_widget(block, area);

  // Search bar along the bottom while typing or while text is set.
  let searching = app.mode == Mode::Search;
  if (searching || !app.filter.text.is_empty()) && inner_area.height > 2 {
    let search_area = Rect {
      x:      inner_area.x,
      y:      inner_area.y + inner_area.height - 1,
      width:  inner_area.width,
      height: 1,
    };
    inner_area.height = inner_area.height.saturating_sub(1);

    let text = if searching {
      format!("/{}_", app.filter.text)
    } else {
      format!("/{}", app.filter.text)
    };
    f.render_widget(
      Paragraph::new(text).style(Style::default().fg(Color::Yellow)),
      search_area,
    );
  }

  if visible.is_empty() {
    let hint = if total == 0 {
      "No creators yet. Press a to add one."
    } else {
      "Nothing here."
    };
    f.render_widget(
      Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
      inner_area,
    );
    return;
  }

  let rows: Vec<Row> = visible.iter().map(|c| creator_row(c)).collect();
  let table = Table::new(rows, [
    Constraint::Min(16),    // name
    Constraint::Min(14),    // handle
    Constraint::Length(7),  // followers
    Constraint::Length(17), // tier
    Constraint::Min(12),    // niches
    Constraint::Length(14), // status
    Constraint::Length(8),  // flags
  ])
  .header(header_row())
  .row_highlight_style(cursor_style());

  let mut state = TableState::default().with_selected(Some(app.list_cursor));
  f.render_stateful_widget(table, inner_area, &mut state);
}

/// Guests view: a capacity gauge above the table.
pub fn draw_guests(f: &mut Frame, area: Rect, app: &App) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(3), Constraint::Min(0)])
    .split(area);

  let guests = policy::guest_count(app.store.creators());
  let capacity = app.store.guest_capacity();
  let full = policy::is_guest_capacity_reached(app.store.creators(), capacity);

  let gauge = Gauge::default()
    .block(
      Block::default()
        .title(" Guest list ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray)),
    )
    .gauge_style(Style::default().fg(if full { Color::Red } else { Color::Green }))
    .ratio((guests as f64 / capacity.get() as f64).min(1.0))
    .label(if full {
      format!("{guests}/{} · full", capacity.get())
    } else {
      format!("{guests}/{}", capacity.get())
    });
  f.render_widget(gauge, rows[0]);

  draw(f, rows[1], app, "Guests");
}

fn header_row() -> Row<'static> {
  Row::new(["Name", "Handle", "Followers", "Tier", "Niches", "Status", ""]).style(
    Style::default()
      .fg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  )
}

fn creator_row<'a>(c: &'a Creator) -> Row<'a> {
  let niches = c
    .niches
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join(", ");

  Row::new(vec![
    Cell::from(c.name.as_str()),
    Cell::from(Span::styled(c.handle.as_str(), Style::default().fg(Color::DarkGray))),
    Cell::from(followers_label(c.follower_count)),
    Cell::from(c.tier.to_string()),
    Cell::from(niches),
    Cell::from(Span::styled(
      c.outreach_status.to_string(),
      Style::default().fg(status_color(c.outreach_status)),
    )),
    Cell::from(flags(c)),
  ])
}

/// Compact membership badges: `#3 P G`.
pub(crate) fn flags(c: &Creator) -> Line<'static> {
  let mut spans = Vec::new();
  if let Some(rank) = c.rank {
    spans.push(Span::styled(format!("#{rank} "), Style::default().fg(Color::Magenta)));
  }
  if c.is_preselected {
    spans.push(Span::styled("P ", Style::default().fg(Color::Yellow)));
  }
  if c.is_final_guest {
    spans.push(Span::styled(
      "G",
      Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD),
    ));
  }
  Line::from(spans)
}
