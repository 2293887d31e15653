//! Derived views over the roster.
//!
//! Everything here is read-only and recomputed from scratch; nothing caches
//! across mutations.

use std::{collections::HashSet, num::NonZeroUsize};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::creator::{Creator, Niche, OutreachStatus, Tier};

// ─── Guest capacity ──────────────────────────────────────────────────────────

/// Maximum number of creators that may hold final-guest status at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuestCapacity(NonZeroUsize);

impl GuestCapacity {
  pub const DEFAULT: Self = match NonZeroUsize::new(7) {
    Some(n) => Self(n),
    None => unreachable!(),
  };

  /// `None` for zero.
  pub fn new(capacity: usize) -> Option<Self> { NonZeroUsize::new(capacity).map(Self) }

  pub fn get(self) -> usize { self.0.get() }
}

impl Default for GuestCapacity {
  fn default() -> Self { Self::DEFAULT }
}

/// Days a follow-up may sit without contact before it is flagged.
pub const DEFAULT_FOLLOW_UP_DAYS: u32 = 3;

// ─── Membership views ────────────────────────────────────────────────────────

pub fn tier_of(follower_count: u64) -> Tier { Tier::from_followers(follower_count) }

pub fn guest_count(roster: &[Creator]) -> usize {
  roster.iter().filter(|c| c.is_final_guest).count()
}

pub fn is_guest_capacity_reached(roster: &[Creator], capacity: GuestCapacity) -> bool {
  guest_count(roster) >= capacity.get()
}

/// Sort key that places a missing rank after every present one.
pub(crate) fn rank_key(creator: &Creator) -> u32 { creator.rank.unwrap_or(u32::MAX) }

/// Shortlisted creators by rank ascending. Creators without a rank come last,
/// in roster order.
pub fn shortlist_ordered(roster: &[Creator]) -> Vec<&Creator> {
  let mut shortlist: Vec<&Creator> = roster.iter().filter(|c| c.is_shortlisted).collect();
  shortlist.sort_by_key(|c| rank_key(c));
  shortlist
}

pub fn preselected(roster: &[Creator]) -> Vec<&Creator> {
  roster.iter().filter(|c| c.is_preselected).collect()
}

pub fn final_guests(roster: &[Creator]) -> Vec<&Creator> {
  roster.iter().filter(|c| c.is_final_guest).collect()
}

/// Membership totals shown in the board header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RosterCounts {
  pub total:       usize,
  pub shortlisted: usize,
  pub preselected: usize,
  pub guests:      usize,
}

impl RosterCounts {
  pub fn tally(roster: &[Creator]) -> Self {
    roster.iter().fold(
      Self {
        total: roster.len(),
        ..Self::default()
      },
      |mut counts, c| {
        counts.shortlisted += usize::from(c.is_shortlisted);
        counts.preselected += usize::from(c.is_preselected);
        counts.guests += usize::from(c.is_final_guest);
        counts
      },
    )
  }
}

// ─── Outreach board ──────────────────────────────────────────────────────────

/// One column per outreach status, in workflow order, each in roster order.
pub fn board_columns(roster: &[Creator]) -> Vec<(OutreachStatus, Vec<&Creator>)> {
  OutreachStatus::WORKFLOW
    .iter()
    .map(|status| {
      let column = roster
        .iter()
        .filter(|c| c.outreach_status == *status)
        .collect();
      (*status, column)
    })
    .collect()
}

/// A follow-up is stale once the last contact is older than `after`.
pub fn needs_follow_up(creator: &Creator, now: DateTime<Utc>, after: Duration) -> bool {
  creator.outreach_status == OutreachStatus::FollowUp
    && creator
      .last_contacted_at
      .is_some_and(|at| now.signed_duration_since(at) > after)
}

// ─── Filtering ───────────────────────────────────────────────────────────────

/// Search text plus facet selections. Facets combine with AND; values within
/// a facet combine with OR; an empty facet matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterFilter {
  /// Case-insensitive substring over name and handle.
  pub text:     String,
  pub niches:   HashSet<Niche>,
  pub tiers:    HashSet<Tier>,
  pub statuses: HashSet<OutreachStatus>,
}

impl RosterFilter {
  pub fn is_empty(&self) -> bool {
    self.text.is_empty() && self.niches.is_empty() && self.tiers.is_empty() && self.statuses.is_empty()
  }

  pub fn matches(&self, creator: &Creator) -> bool {
    let needle = self.text.to_lowercase();
    let text_match = needle.is_empty()
      || creator.name.to_lowercase().contains(&needle)
      || creator.handle.to_lowercase().contains(&needle);
    let niche_match =
      self.niches.is_empty() || creator.niches.iter().any(|n| self.niches.contains(n));
    let tier_match = self.tiers.is_empty() || self.tiers.contains(&creator.tier);
    let status_match = self.statuses.is_empty() || self.statuses.contains(&creator.outreach_status);

    text_match && niche_match && tier_match && status_match
  }

  pub fn toggle_niche(&mut self, niche: Niche) { toggle(&mut self.niches, niche) }

  pub fn toggle_tier(&mut self, tier: Tier) { toggle(&mut self.tiers, tier) }

  pub fn toggle_status(&mut self, status: OutreachStatus) { toggle(&mut self.statuses, status) }
}

fn toggle<T: std::hash::Hash + Eq>(set: &mut HashSet<T>, value: T) {
  if !set.remove(&value) {
    set.insert(value);
  }
}

/// Creators matching `filter`, in roster order.
pub fn filter_roster<'a>(roster: &'a [Creator], filter: &RosterFilter) -> Vec<&'a Creator> {
  roster.iter().filter(|c| filter.matches(c)).collect()
}
