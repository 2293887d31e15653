//! Outreach board: one column per status, in workflow order.

use chrono::Utc;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState},
};
use roster_core::policy;

use super::{cursor_style, status_color};
use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let columns = policy::board_columns(app.store.creators());
  let now = Utc::now();

  let areas = Layout::default()
    .direction(Direction::Horizontal)
    .constraints(vec![Constraint::Ratio(1, columns.len() as u32); columns.len()])
    .split(area);

  for (i, ((status, creators), column_area)) in columns.iter().zip(areas.iter()).enumerate() {
    let selected = i == app.board_column;
    let color = status_color(*status);

    let block = Block::default()
      .title(Span::styled(
        format!(" {status} ({}) ", creators.len()),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
      ))
      .borders(Borders::ALL)
      .border_style(if selected {
        Style::default().fg(color)
      } else {
        Style::default().fg(Color::DarkGray)
      });

    let items: Vec<ListItem> = creators
      .iter()
      .map(|c| {
        let mut spans = vec![Span::raw(c.name.clone())];
        if policy::needs_follow_up(c, now, app.follow_up_after) {
          spans.push(Span::styled(
            " !",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
          ));
        }
        if c.is_final_guest {
          spans.push(Span::styled(" G", Style::default().fg(Color::Green)));
        }
        ListItem::new(Line::from(spans))
      })
      .collect();

    let mut state = ListState::default();
    if selected && !creators.is_empty() {
      state.select(Some(app.list_cursor));
    }

    f.render_stateful_widget(
      List::new(items)
        .block(block)
        .highlight_style(cursor_style()),
      *column_area,
      &mut state,
    );
  }
}
