//! Ranked shortlist view.

use ratatui::{
  Frame,
  layout::{Constraint, Rect},
  style::{Color, Modifier, Style},
  text::Span,
  widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use super::{creator_list::flags, cursor_style, followers_label, status_color};
use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let shortlist = app.visible();

  let block = Block::default()
    .title(format!(" Shortlist ({}) · K/J move ", shortlist.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  if shortlist.is_empty() {
    f.render_widget(
      Paragraph::new("No one is shortlisted. Press s on a creator to add them.")
        .style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  }

  let rows: Vec<Row> = shortlist
    .iter()
    .map(|c| {
      let rank = c.rank.map(|r| r.to_string()).unwrap_or_else(|| "–".into());
      Row::new(vec![
        Cell::from(Span::styled(
          format!("{rank:>3}"),
          Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
        )),
        Cell::from(c.name.as_str()),
        Cell::from(c.handle.as_str()),
        Cell::from(followers_label(c.follower_count)),
        Cell::from(Span::styled(
          c.outreach_status.to_string(),
          Style::default().fg(status_color(c.outreach_status)),
        )),
        Cell::from(flags(c)),
      ])
    })
    .collect();

  let table = Table::new(rows, [
    Constraint::Length(4),
    Constraint::Min(16),
    Constraint::Min(14),
    Constraint::Length(9),
    Constraint::Length(14),
    Constraint::Length(8),
  ])
  .header(
    Row::new(["Rank", "Name", "Handle", "Followers", "Status", ""]).style(
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    ),
  )
  .row_highlight_style(cursor_style());

  let mut state = TableState::default().with_selected(Some(app.list_cursor));
  f.render_stateful_widget(table, inner, &mut state);
}
