//! Creator detail pane, right of the current view.

use chrono::Utc;
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};
use roster_core::{creator::Creator, policy};

use super::{followers_label, status_color};
use crate::app::App;

// ─── Public entry ─────────────────────────────────────────────────────────────

/// Render the detail pane for the creator under the cursor into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let Some(c) = app.cursor_creator() else {
    let block = Block::default()
      .title(" Detail ")
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
      Paragraph::new("Select a creator and press Enter.").style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  };

  let block = Block::default()
    .title(format!(" {} ", c.name))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let para = Paragraph::new(lines(c, app)).wrap(Wrap { trim: false });
  f.render_widget(para, inner);
}

// ─── Line building ────────────────────────────────────────────────────────────

fn lines(c: &Creator, app: &App) -> Vec<Line<'static>> {
  let join = |items: Vec<String>| items.join(", ");
  let mut lines = vec![
    field("handle", c.handle.clone()),
    field("profile", c.profile_url.clone()),
    field("platforms", join(c.platforms.iter().map(ToString::to_string).collect())),
    field("niches", join(c.niches.iter().map(ToString::to_string).collect())),
    field(
      "followers",
      format!("{} · {}", followers_label(c.follower_count), c.tier),
    ),
  ];

  let optional = [
    ("city", c.city.clone()),
    ("engagement", c.engagement.map(|e| format!("{e:.1}%"))),
    ("email", c.email.clone()),
    ("phone", c.phone.clone()),
    ("media kit", c.media_kit_url.clone()),
    ("owner", c.owner.clone()),
    ("cost", c.cost_estimate.map(|v| format!("${v}"))),
    ("exchange", c.exchange_type.clone()),
  ];
  lines.extend(
    optional
      .into_iter()
      .filter_map(|(label, value)| value.map(|v| field(label, v))),
  );

  // Membership and outreach.
  lines.push(Line::from(""));
  let membership = [
    c.rank.map(|r| format!("shortlist #{r}")),
    c.is_preselected.then(|| "preselected".to_string()),
    c.is_final_guest.then(|| "final guest".to_string()),
  ]
  .into_iter()
  .flatten()
  .collect::<Vec<_>>();
  lines.push(field(
    "membership",
    if membership.is_empty() {
      "—".to_string()
    } else {
      membership.join(" · ")
    },
  ));

  let mut status = vec![
    label_span("status"),
    Span::styled(
      c.outreach_status.to_string(),
      Style::default().fg(status_color(c.outreach_status)),
    ),
  ];
  if policy::needs_follow_up(c, Utc::now(), app.follow_up_after) {
    status.push(Span::styled(
      "  follow-up overdue",
      Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    ));
  }
  lines.push(Line::from(status));
  lines.push(field(
    "last contact",
    c.last_contacted_at
      .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
      .unwrap_or_else(|| "never".to_string()),
  ));

  // Free-form.
  lines.push(Line::from(""));
  lines.push(field(
    "tags",
    if c.tags.is_empty() {
      "—".to_string()
    } else {
      c.tags.join(", ")
    },
  ));
  lines.push(Line::from(label_span("notes")));
  if c.notes.is_empty() {
    lines.push(Line::from(Span::styled("  (none)", Style::default().fg(Color::DarkGray))));
  } else {
    lines.extend(c.notes.lines().map(|l| Line::from(format!("  {l}"))));
  }
  for link in &c.evidence {
    lines.push(field("evidence", link.clone()));
  }

  lines.push(Line::from(""));
  lines.push(Line::from(Span::styled(
    "n notes  t tags  </> status  Esc close",
    Style::default().fg(Color::DarkGray),
  )));
  lines
}

fn label_span(label: &str) -> Span<'static> {
  Span::styled(
    format!("{label:<14}"),
    Style::default()
      .fg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  )
}

fn field(label: &str, value: String) -> Line<'static> {
  Line::from(vec![label_span(label), Span::raw(value)])
}
