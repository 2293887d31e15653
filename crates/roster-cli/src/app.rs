//! Application state machine and event dispatcher.

use chrono::Duration;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use roster_core::{
  creator::{Creator, Niche, OutreachStatus, Tier},
  policy::{self, RosterFilter},
  roster::{Direction, RosterStore},
};
use strum::IntoEnumIterator;
use uuid::Uuid;

use crate::form::CreatorForm;

// ─── Views and modes ──────────────────────────────────────────────────────────

/// Which slice of the roster the body shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
  All,
  Shortlist,
  Preselected,
  Guests,
  Board,
}

impl View {
  pub const ALL: [Self; 5] = [
    Self::All,
    Self::Shortlist,
    Self::Preselected,
    Self::Guests,
    Self::Board,
  ];

  pub fn title(self) -> &'static str {
    match self {
      Self::All => "All",
      Self::Shortlist => "Shortlist",
      Self::Preselected => "Preselected",
      Self::Guests => "Guests",
      Self::Board => "Board",
    }
  }

  pub fn index(self) -> usize { Self::ALL.iter().position(|v| *v == self).unwrap_or_default() }

  fn next(self) -> Self { Self::ALL[(self.index() + 1) % Self::ALL.len()] }

  fn previous(self) -> Self { Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()] }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// Body shows only the current view.
  List,
  /// Detail pane open beside the view for the creator under the cursor.
  Detail,
}

/// Where keystrokes go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
  Normal,
  Search,
  Filter,
  AddForm,
  Edit(EditField),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
  Notes,
  Tags,
}

/// Filter facets, in panel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
  Niche,
  Tier,
  Status,
}

impl Facet {
  pub const ALL: [Self; 3] = [Self::Niche, Self::Tier, Self::Status];

  pub fn title(self) -> &'static str {
    match self {
      Self::Niche => "Niche",
      Self::Tier => "Tier",
      Self::Status => "Status",
    }
  }
}

/// Facet column and option row under the filter panel cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FacetCursor {
  pub facet:  usize,
  pub option: usize,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  pub store: RosterStore,

  pub view:   View,
  pub screen: Screen,
  pub mode:   Mode,

  /// Search text and facet selections for the All view.
  pub filter:       RosterFilter,
  pub facet_cursor: FacetCursor,

  pub form: CreatorForm,

  /// Text being edited in [`Mode::Edit`] and the creator it belongs to.
  pub edit_buffer: String,
  pub edit_target: Option<Uuid>,

  /// Cursor within the current view's list (within the column on the board).
  pub list_cursor:  usize,
  /// Selected column on the board view.
  pub board_column: usize,

  /// Follow-ups older than this are flagged on the board.
  pub follow_up_after: Duration,

  /// One-line message shown in the status bar.
  pub status_msg: String,
}

impl App {
  pub fn new(store: RosterStore, follow_up_after: Duration) -> Self {
    Self {
      store,
      view: View::All,
      screen: Screen::List,
      mode: Mode::Normal,
      filter: RosterFilter::default(),
      facet_cursor: FacetCursor::default(),
      form: CreatorForm::default(),
      edit_buffer: String::new(),
      edit_target: None,
      list_cursor: 0,
      board_column: 0,
      follow_up_after,
      status_msg: String::new(),
    }
  }

  // ── Derived lists ─────────────────────────────────────────────────────────

  /// Creators listed by the current view, in display order.
  pub fn visible(&self) -> Vec<&Creator> {
    let roster = self.store.creators();
    match self.view {
      View::All => policy::filter_roster(roster, &self.filter),
      View::Shortlist => policy::shortlist_ordered(roster),
      View::Preselected => policy::preselected(roster),
      View::Guests => policy::final_guests(roster),
      View::Board => policy::board_columns(roster)
        .into_iter()
        .nth(self.board_column)
        .map(|(_, column)| column)
        .unwrap_or_default(),
    }
  }

  pub fn cursor_creator(&self) -> Option<&Creator> {
    self.visible().get(self.list_cursor).copied()
  }

  /// Label and selection state for each option of `facet`.
  pub fn facet_options(&self, facet: Facet) -> Vec<(String, bool)> {
    match facet {
      Facet::Niche => Niche::iter()
        .map(|n| (n.to_string(), self.filter.niches.contains(&n)))
        .collect(),
      Facet::Tier => Tier::iter()
        .map(|t| (t.to_string(), self.filter.tiers.contains(&t)))
        .collect(),
      Facet::Status => OutreachStatus::WORKFLOW
        .iter()
        .map(|s| (s.to_string(), self.filter.statuses.contains(s)))
        .collect(),
    }
  }

  fn clamp_cursor(&mut self) {
    let len = self.visible().len();
    self.list_cursor = self.list_cursor.min(len.saturating_sub(1));
  }

  /// Put the cursor on `id` if the current view lists it.
  fn follow(&mut self, id: Uuid) {
    match self.visible().iter().position(|c| c.id == id) {
      Some(i) => self.list_cursor = i,
      None => self.clamp_cursor(),
    }
  }

  fn switch_view(&mut self, view: View) {
    if self.view != view {
      self.view = view;
      self.list_cursor = 0;
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    match self.mode {
      Mode::Normal => return self.handle_normal_key(key),
      Mode::Search => self.handle_search_key(key),
      Mode::Filter => self.handle_filter_key(key),
      Mode::AddForm => self.handle_form_key(key),
      Mode::Edit(field) => self.handle_edit_key(key, field),
    }
    true
  }

  fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
    self.status_msg.clear();

    match key.code {
      KeyCode::Char('q') => return false,

      // Views
      KeyCode::Tab => self.switch_view(self.view.next()),
      KeyCode::BackTab => self.switch_view(self.view.previous()),
      KeyCode::Char(c @ '1'..='5') => {
        self.switch_view(View::ALL[c as usize - '1' as usize]);
      }

      // Navigation
      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.visible().len();
        if self.list_cursor + 1 < len {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.list_cursor = self.list_cursor.saturating_sub(1);
      }
      KeyCode::Left | KeyCode::Char('h') => {
        if self.view == View::Board && self.board_column > 0 {
          self.board_column -= 1;
          self.clamp_cursor();
        } else if self.view != View::Board {
          self.screen = Screen::List;
        }
      }
      KeyCode::Right | KeyCode::Char('l') => {
        if self.view == View::Board {
          if self.board_column + 1 < OutreachStatus::WORKFLOW.len() {
            self.board_column += 1;
            self.clamp_cursor();
          }
        } else if self.cursor_creator().is_some() {
          self.screen = Screen::Detail;
        }
      }
      KeyCode::Enter => {
        if self.cursor_creator().is_some() {
          self.screen = Screen::Detail;
        }
      }
      KeyCode::Esc => self.screen = Screen::List,

      // Search and filters
      KeyCode::Char('/') => {
        self.switch_view(View::All);
        self.mode = Mode::Search;
      }
      KeyCode::Char('f') => {
        self.switch_view(View::All);
        self.mode = Mode::Filter;
      }
      KeyCode::Char('c') => {
        self.filter = RosterFilter::default();
        self.clamp_cursor();
        self.status_msg = "Filters cleared".into();
      }

      // Membership
      KeyCode::Char('s') => self.toggle_shortlisted(),
      KeyCode::Char('p') => self.toggle_preselected(),
      KeyCode::Char('g') => self.toggle_final_guest(),
      KeyCode::Char('K') => self.reorder(Direction::Up),
      KeyCode::Char('J') => self.reorder(Direction::Down),

      // Outreach
      KeyCode::Char('>') | KeyCode::Char('.') => self.step_status(true),
      KeyCode::Char('<') | KeyCode::Char(',') => self.step_status(false),

      // Editing
      KeyCode::Char('a') => {
        self.form = CreatorForm::default();
        self.mode = Mode::AddForm;
      }
      KeyCode::Char('n') => self.begin_edit(EditField::Notes),
      KeyCode::Char('t') => self.begin_edit(EditField::Tags),

      _ => {}
    }
    true
  }

  fn handle_search_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.mode = Mode::Normal;
        self.filter.text.clear();
      }
      KeyCode::Enter => self.mode = Mode::Normal,
      KeyCode::Backspace => {
        self.filter.text.pop();
      }
      KeyCode::Char(c) => self.filter.text.push(c),
      _ => {}
    }
    self.list_cursor = 0;
  }

  fn handle_filter_key(&mut self, key: KeyEvent) {
    let facet = Facet::ALL[self.facet_cursor.facet];
    match key.code {
      KeyCode::Esc | KeyCode::Char('f') | KeyCode::Char('q') => self.mode = Mode::Normal,
      KeyCode::Left | KeyCode::Char('h') => {
        self.facet_cursor.facet = self.facet_cursor.facet.saturating_sub(1);
        self.facet_cursor.option = 0;
      }
      KeyCode::Right | KeyCode::Char('l') => {
        if self.facet_cursor.facet + 1 < Facet::ALL.len() {
          self.facet_cursor.facet += 1;
          self.facet_cursor.option = 0;
        }
      }
      KeyCode::Down | KeyCode::Char('j') => {
        if self.facet_cursor.option + 1 < self.facet_options(facet).len() {
          self.facet_cursor.option += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.facet_cursor.option = self.facet_cursor.option.saturating_sub(1);
      }
      KeyCode::Char(' ') | KeyCode::Enter => {
        let option = self.facet_cursor.option;
        match facet {
          Facet::Niche => {
            if let Some(n) = Niche::iter().nth(option) {
              self.filter.toggle_niche(n);
            }
          }
          Facet::Tier => {
            if let Some(t) = Tier::iter().nth(option) {
              self.filter.toggle_tier(t);
            }
          }
          Facet::Status => {
            if let Some(s) = OutreachStatus::WORKFLOW.get(option) {
              self.filter.toggle_status(*s);
            }
          }
        }
        self.list_cursor = 0;
      }
      KeyCode::Char('c') => {
        self.filter = RosterFilter {
          text: std::mem::take(&mut self.filter.text),
          ..RosterFilter::default()
        };
        self.list_cursor = 0;
      }
      _ => {}
    }
  }

  fn handle_form_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => self.mode = Mode::Normal,
      KeyCode::Tab | KeyCode::Down => self.form.focus_next(),
      KeyCode::BackTab | KeyCode::Up => self.form.focus_previous(),
      KeyCode::Backspace => self.form.pop(),
      KeyCode::Enter => self.submit_form(),
      KeyCode::Char(c) => self.form.push(c),
      _ => {}
    }
  }

  fn handle_edit_key(&mut self, key: KeyEvent, field: EditField) {
    match key.code {
      KeyCode::Esc => {
        self.mode = Mode::Normal;
        self.edit_target = None;
      }
      KeyCode::Enter => {
        if let Some(id) = self.edit_target.take() {
          let change = match field {
            EditField::Notes => self.store.update_notes(id, self.edit_buffer.trim()),
            EditField::Tags => self
              .store
              .set_tags(id, self.edit_buffer.split(',').map(str::to_owned)),
          };
          if change.is_applied() {
            self.status_msg = match field {
              EditField::Notes => "Notes saved".into(),
              EditField::Tags => "Tags saved".into(),
            };
          }
        }
        self.mode = Mode::Normal;
      }
      KeyCode::Backspace => {
        self.edit_buffer.pop();
      }
      KeyCode::Char(c) => self.edit_buffer.push(c),
      _ => {}
    }
  }

  // ── Actions ───────────────────────────────────────────────────────────────

  fn toggle_shortlisted(&mut self) {
    let Some((id, name, on)) = self
      .cursor_creator()
      .map(|c| (c.id, c.name.clone(), !c.is_shortlisted))
    else {
      return;
    };
    if self.store.set_shortlisted(id, on).is_applied() {
      self.status_msg = match self.store.get(id).and_then(|c| c.rank) {
        Some(rank) => format!("{name} shortlisted at #{rank}"),
        None => format!("{name} removed from the shortlist"),
      };
    }
    self.follow(id);
  }

  fn toggle_preselected(&mut self) {
    let Some((id, name, on)) = self
      .cursor_creator()
      .map(|c| (c.id, c.name.clone(), !c.is_preselected))
    else {
      return;
    };
    if self.store.set_preselected(id, on).is_applied() {
      self.status_msg = if on {
        format!("{name} preselected")
      } else {
        format!("{name} no longer preselected")
      };
    }
    self.follow(id);
  }

  fn toggle_final_guest(&mut self) {
    let Some((id, name, on)) = self
      .cursor_creator()
      .map(|c| (c.id, c.name.clone(), !c.is_final_guest))
    else {
      return;
    };
    match self.store.set_final_guest(id, on) {
      Ok(change) if change.is_applied() => {
        let guests = policy::guest_count(self.store.creators());
        let capacity = self.store.guest_capacity().get();
        self.status_msg = if on {
          format!("{name} added to the guest list ({guests}/{capacity})")
        } else {
          format!("{name} removed from the guest list ({guests}/{capacity})")
        };
      }
      Ok(_) => {}
      Err(e) => self.status_msg = format!("Cannot invite {name}: {e}"),
    }
    self.follow(id);
  }

  fn reorder(&mut self, direction: Direction) {
    let Some(id) = self.cursor_creator().map(|c| c.id) else {
      return;
    };
    self.store.reorder_shortlist(id, direction);
    self.follow(id);
  }

  /// Move the cursor creator one stage along the pipeline. Does nothing at
  /// either end of the workflow.
  fn step_status(&mut self, forward: bool) {
    let Some((id, current)) = self.cursor_creator().map(|c| (c.id, c.outreach_status)) else {
      return;
    };
    let status = if forward {
      current.next()
    } else {
      current.previous()
    };
    if status == current {
      return;
    }

    self.store.set_outreach_status(id, status);
    self.status_msg = format!("Status: {status}");
    if self.view == View::Board {
      self.board_column = OutreachStatus::WORKFLOW
        .iter()
        .position(|s| *s == status)
        .unwrap_or(self.board_column);
    }
    self.follow(id);
  }

  fn begin_edit(&mut self, field: EditField) {
    let Some(creator) = self.cursor_creator() else {
      return;
    };
    let (id, buffer) = match field {
      EditField::Notes => (creator.id, creator.notes.clone()),
      EditField::Tags => (creator.id, creator.tags.join(", ")),
    };
    self.edit_target = Some(id);
    self.edit_buffer = buffer;
    self.mode = Mode::Edit(field);
  }

  fn submit_form(&mut self) {
    match self.form.payload() {
      Ok(input) => {
        let created = self.store.create(input);
        let (id, name) = (created.id, created.name.clone());
        self.mode = Mode::Normal;
        self.switch_view(View::All);
        self.follow(id);
        self.status_msg = format!("Added {name}");
      }
      Err(problems) => self.form.problems = problems,
    }
  }
}
