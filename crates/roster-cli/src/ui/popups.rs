//! Overlays drawn above the body: filter panel, add form, edit prompt.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use super::cursor_style;
use crate::{
  app::{App, EditField, Facet},
  form::Field,
};

// ─── Filter panel ─────────────────────────────────────────────────────────────

pub fn draw_filter_panel(f: &mut Frame, area: Rect, app: &App) {
  let popup = centered_rect(70, 60, area);
  f.render_widget(Clear, popup);

  let block = Block::default()
    .title(" Filters · Space toggle · c clear · Esc close ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(popup);
  f.render_widget(block, popup);

  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Ratio(1, 3); 3])
    .split(inner);

  for (i, facet) in Facet::ALL.iter().enumerate() {
    let focused = i == app.facet_cursor.facet;
    let items: Vec<ListItem> = app
      .facet_options(*facet)
      .into_iter()
      .map(|(label, on)| {
        let mark = if on { "[x] " } else { "[ ] " };
        let style = if on {
          Style::default().fg(Color::Yellow)
        } else {
          Style::default()
        };
        ListItem::new(Line::from(vec![Span::styled(mark, style), Span::styled(label, style)]))
      })
      .collect();

    let mut state = ListState::default();
    if focused {
      state.select(Some(app.facet_cursor.option));
    }

    let title_style = if focused {
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::DarkGray)
    };
    f.render_stateful_widget(
      List::new(items)
        .block(Block::default().title(Span::styled(facet.title(), title_style)))
        .highlight_style(cursor_style()),
      cols[i],
      &mut state,
    );
  }
}

// ─── Add form ─────────────────────────────────────────────────────────────────

pub fn draw_add_form(f: &mut Frame, area: Rect, app: &App) {
  let popup = centered_rect(70, 70, area);
  f.render_widget(Clear, popup);

  let block = Block::default()
    .title(" New creator · Tab next · Enter save · Esc cancel ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(popup);
  f.render_widget(block, popup);

  let form = &app.form;
  let mut lines: Vec<Line> = Field::ALL
    .iter()
    .map(|field| {
      let focused = form.focused() == *field;
      let label_style = if focused {
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD)
      } else {
        Style::default().fg(Color::Gray)
      };
      let value = form.value(*field);
      let mut spans = vec![
        Span::styled(format!("{:<18}", field.label()), label_style),
        Span::raw(value.to_string()),
      ];
      if focused {
        spans.push(Span::styled("_", Style::default().fg(Color::Cyan)));
        if value.is_empty() && !field.hint().is_empty() {
          spans.push(Span::styled(
            format!(" {}", field.hint()),
            Style::default().fg(Color::DarkGray),
          ));
        }
      }
      Line::from(spans)
    })
    .collect();

  if !form.problems.is_empty() {
    lines.push(Line::from(""));
    lines.extend(form.problems.iter().map(|p| {
      Line::from(Span::styled(format!("• {p}"), Style::default().fg(Color::Red)))
    }));
  }

  f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

// ─── Edit prompt ──────────────────────────────────────────────────────────────

pub fn draw_edit_prompt(f: &mut Frame, area: Rect, app: &App, field: EditField) {
  let popup = centered_rect(60, 20, area);
  f.render_widget(Clear, popup);

  let title = match field {
    EditField::Notes => " Notes ",
    EditField::Tags => " Tags (comma-separated) ",
  };
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));

  f.render_widget(
    Paragraph::new(format!("{}_", app.edit_buffer))
      .block(block)
      .wrap(Wrap { trim: false }),
    popup,
  );
}

/// A rect of `percent_x` by `percent_y` centered in `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Percentage((100 - percent_y) / 2),
      Constraint::Percentage(percent_y),
      Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

  Layout::default()
    .direction(Direction::Horizontal)
    .constraints([
      Constraint::Percentage((100 - percent_x) / 2),
      Constraint::Percentage(percent_x),
      Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(rows[1])[1]
}
