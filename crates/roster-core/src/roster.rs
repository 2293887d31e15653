//! [`RosterStore`], the single owner of every creator record.
//!
//! All mutations go through the store. Each one runs to completion before
//! returning and reports what it did as a [`Change`]. Consumers re-derive
//! views (see [`crate::policy`]) after every applied change; listeners
//! registered with [`RosterStore::subscribe`] are told about each one.
//!
//! Operations on an unknown id are silent no-ops reported as
//! [`Change::UnknownCreator`], never as errors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  creator::{Creator, NewCreator, OutreachStatus},
  policy::{self, GuestCapacity},
};

// ─── Mutation results ────────────────────────────────────────────────────────

/// What a mutation did to the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
  /// State changed and listeners were notified.
  Applied,
  /// The request was already satisfied; nothing changed.
  Unchanged,
  /// No creator has the given id; nothing changed.
  UnknownCreator,
}

impl Change {
  pub fn is_applied(self) -> bool { matches!(self, Self::Applied) }
}

/// Direction for [`RosterStore::reorder_shortlist`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
  /// Towards rank 1.
  Up,
  Down,
}

// ─── Change notification ─────────────────────────────────────────────────────

/// Published after every applied mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RosterEvent {
  Created { id: Uuid },
  Shortlisted { id: Uuid, rank: Option<u32> },
  Preselected { id: Uuid, on: bool },
  FinalGuest { id: Uuid, on: bool },
  OutreachStatus {
    id:     Uuid,
    status: OutreachStatus,
    at:     DateTime<Utc>,
  },
  /// Shortlist ranks were reassigned after moving `id`.
  Reranked { id: Uuid },
  NotesUpdated { id: Uuid },
  TagsUpdated { id: Uuid },
}

/// Receives each [`RosterEvent`] together with the roster as it stands after
/// the change.
pub trait RosterListener {
  fn on_change(&mut self, event: &RosterEvent, roster: &[Creator]);
}

impl<F> RosterListener for F
where
  F: FnMut(&RosterEvent, &[Creator]),
{
  fn on_change(&mut self, event: &RosterEvent, roster: &[Creator]) { self(event, roster) }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// In-memory roster, newest creator first.
pub struct RosterStore {
  creators:       Vec<Creator>,
  guest_capacity: GuestCapacity,
  revision:       u64,
  listeners:      Vec<Box<dyn RosterListener>>,
}

impl Default for RosterStore {
  fn default() -> Self { Self::new(GuestCapacity::default()) }
}

impl std::fmt::Debug for RosterStore {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("RosterStore")
      .field("creators", &self.creators.len())
      .field("guest_capacity", &self.guest_capacity)
      .field("revision", &self.revision)
      .field("listeners", &self.listeners.len())
      .finish()
  }
}

impl RosterStore {
  /// An empty roster with a fixed guest capacity.
  pub fn new(guest_capacity: GuestCapacity) -> Self {
    Self {
      creators: Vec::new(),
      guest_capacity,
      revision: 0,
      listeners: Vec::new(),
    }
  }

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Every creator, newest first.
  pub fn creators(&self) -> &[Creator] { &self.creators }

  pub fn get(&self, id: Uuid) -> Option<&Creator> { self.creators.iter().find(|c| c.id == id) }

  pub fn guest_capacity(&self) -> GuestCapacity { self.guest_capacity }

  /// Incremented once per applied mutation.
  pub fn revision(&self) -> u64 { self.revision }

  pub fn subscribe(&mut self, listener: impl RosterListener + 'static) {
    self.listeners.push(Box::new(listener));
  }

  fn index_of(&self, id: Uuid) -> Option<usize> { self.creators.iter().position(|c| c.id == id) }

  fn publish(&mut self, event: RosterEvent) -> Change {
    self.revision += 1;
    tracing::debug!(revision = self.revision, ?event, "roster changed");
    for listener in &mut self.listeners {
      listener.on_change(&event, &self.creators);
    }
    Change::Applied
  }

  fn unknown(id: Uuid, operation: &'static str) -> Change {
    tracing::debug!(%id, operation, "ignoring mutation for unknown creator");
    Change::UnknownCreator
  }

  // ── Creation ──────────────────────────────────────────────────────────

  /// Insert a new creator at the front of the roster and return it.
  ///
  /// The payload is assumed valid; see [`NewCreator::validate`].
  pub fn create(&mut self, input: NewCreator) -> &Creator {
    let creator = Creator::from_new(Uuid::new_v4(), input);
    let id = creator.id;
    self.creators.insert(0, creator);
    self.publish(RosterEvent::Created { id });
    &self.creators[0]
  }

  /// Validate and create every payload, in order, so the last one ends up
  /// first. Nothing is inserted if any payload is invalid.
  pub fn seed(&mut self, payloads: impl IntoIterator<Item = NewCreator>) -> Result<Vec<Uuid>> {
    let payloads = payloads
      .into_iter()
      .map(NewCreator::validate)
      .collect::<Result<Vec<_>>>()?;

    let ids: Vec<Uuid> = payloads
      .into_iter()
      .map(|input| self.create(input).id)
      .collect();
    tracing::info!(count = ids.len(), "seeded roster");
    Ok(ids)
  }

  // ── Membership ────────────────────────────────────────────────────────

  /// Add to or remove from the ranked shortlist.
  ///
  /// A newly shortlisted creator is appended after the current highest rank.
  /// Removal clears the rank and leaves the others untouched, so a gap may
  /// remain until the next [`RosterStore::reorder_shortlist`].
  pub fn set_shortlisted(&mut self, id: Uuid, shortlisted: bool) -> Change {
    let Some(index) = self.index_of(id) else {
      return Self::unknown(id, "set_shortlisted");
    };
    if self.creators[index].is_shortlisted == shortlisted {
      return Change::Unchanged;
    }

    let rank = shortlisted.then(|| {
      self
        .creators
        .iter()
        .filter(|c| c.is_shortlisted && c.id != id)
        .filter_map(|c| c.rank)
        .max()
        .unwrap_or(0)
        + 1
    });

    let creator = &mut self.creators[index];
    creator.is_shortlisted = shortlisted;
    creator.rank = rank;
    self.publish(RosterEvent::Shortlisted { id, rank })
  }

  pub fn set_preselected(&mut self, id: Uuid, preselected: bool) -> Change {
    let Some(index) = self.index_of(id) else {
      return Self::unknown(id, "set_preselected");
    };
    let creator = &mut self.creators[index];
    if creator.is_preselected == preselected {
      return Change::Unchanged;
    }
    creator.is_preselected = preselected;
    self.publish(RosterEvent::Preselected { id, on: preselected })
  }

  /// Add to or remove from the final guest list.
  ///
  /// Adding fails with [`Error::CapacityExceeded`] when the list is already
  /// full; the creator is left untouched. Removal always succeeds.
  pub fn set_final_guest(&mut self, id: Uuid, guest: bool) -> Result<Change> {
    let Some(index) = self.index_of(id) else {
      return Ok(Self::unknown(id, "set_final_guest"));
    };
    if self.creators[index].is_final_guest == guest {
      return Ok(Change::Unchanged);
    }

    if guest {
      let others = self
        .creators
        .iter()
        .filter(|c| c.is_final_guest && c.id != id)
        .count();
      let capacity = self.guest_capacity.get();
      if others >= capacity {
        tracing::warn!(%id, capacity, "guest list is full; rejecting final guest");
        return Err(Error::CapacityExceeded { capacity });
      }
    }

    self.creators[index].is_final_guest = guest;
    Ok(self.publish(RosterEvent::FinalGuest { id, on: guest }))
  }

  // ── Outreach ──────────────────────────────────────────────────────────

  /// Move a creator to `status` and stamp the contact time with now.
  pub fn set_outreach_status(&mut self, id: Uuid, status: OutreachStatus) -> Change {
    self.set_outreach_status_at(id, status, Utc::now())
  }

  /// As [`RosterStore::set_outreach_status`], with an explicit contact time.
  /// Any transition is allowed, including backwards ones.
  pub fn set_outreach_status_at(
    &mut self,
    id: Uuid,
    status: OutreachStatus,
    at: DateTime<Utc>,
  ) -> Change {
    let Some(index) = self.index_of(id) else {
      return Self::unknown(id, "set_outreach_status");
    };
    let creator = &mut self.creators[index];
    creator.outreach_status = status;
    creator.last_contacted_at = Some(at);
    self.publish(RosterEvent::OutreachStatus { id, status, at })
  }

  // ── Ranking ───────────────────────────────────────────────────────────

  /// Swap a shortlisted creator with its neighbour in `direction`, then
  /// renumber the whole shortlist 1..K.
  ///
  /// Moving the first creator up or the last one down only renumbers. Ids
  /// that are not shortlisted are ignored.
  pub fn reorder_shortlist(&mut self, id: Uuid, direction: Direction) -> Change {
    if self.index_of(id).is_none() {
      return Self::unknown(id, "reorder_shortlist");
    }

    let mut order: Vec<usize> = (0..self.creators.len())
      .filter(|&i| self.creators[i].is_shortlisted)
      .collect();
    order.sort_by_key(|&i| policy::rank_key(&self.creators[i]));

    let Some(position) = order.iter().position(|&i| self.creators[i].id == id) else {
      return Change::Unchanged;
    };

    match direction {
      Direction::Up if position > 0 => order.swap(position - 1, position),
      Direction::Down if position + 1 < order.len() => order.swap(position, position + 1),
      _ => {}
    }

    let mut changed = false;
    for (slot, &index) in order.iter().enumerate() {
      let rank = Some(slot as u32 + 1);
      let creator = &mut self.creators[index];
      if creator.rank != rank {
        creator.rank = rank;
        changed = true;
      }
    }

    if changed {
      self.publish(RosterEvent::Reranked { id })
    } else {
      Change::Unchanged
    }
  }

  // ── Free-form fields ──────────────────────────────────────────────────

  pub fn update_notes(&mut self, id: Uuid, notes: impl Into<String>) -> Change {
    let Some(index) = self.index_of(id) else {
      return Self::unknown(id, "update_notes");
    };
    let notes = notes.into();
    let creator = &mut self.creators[index];
    if creator.notes == notes {
      return Change::Unchanged;
    }
    creator.notes = notes;
    self.publish(RosterEvent::NotesUpdated { id })
  }

  /// Replace the tag list. Blank tags are dropped and duplicates collapsed,
  /// keeping first occurrence order.
  pub fn set_tags(&mut self, id: Uuid, tags: impl IntoIterator<Item = String>) -> Change {
    let Some(index) = self.index_of(id) else {
      return Self::unknown(id, "set_tags");
    };
    let mut cleaned: Vec<String> = Vec::new();
    for tag in tags {
      let tag = tag.trim().to_owned();
      if !tag.is_empty() && !cleaned.contains(&tag) {
        cleaned.push(tag);
      }
    }

    let creator = &mut self.creators[index];
    if creator.tags == cleaned {
      return Change::Unchanged;
    }
    creator.tags = cleaned;
    self.publish(RosterEvent::TagsUpdated { id })
  }
}
