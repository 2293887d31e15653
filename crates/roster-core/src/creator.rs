//! Creator records: the unit the board tracks.
//!
//! A creator enters the roster once, through [`crate::roster::RosterStore::create`],
//! and is never removed. Membership flags and the outreach status change in
//! place; everything else is carried for display.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use uuid::Uuid;

// ─── Classification ──────────────────────────────────────────────────────────

/// Follower counts below this are [`Tier::Nano`].
pub const MICRO_FLOOR: u64 = 10_000;
/// Follower counts above this are [`Tier::Macro`]; the value itself is Micro.
pub const MICRO_CEILING: u64 = 100_000;

/// Audience-size class derived from the follower count. Never set directly.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Tier {
  #[strum(serialize = "Nano", to_string = "Nano (<10k)")]
  Nano,
  #[strum(serialize = "Micro", to_string = "Micro (10k-100k)")]
  Micro,
  #[strum(serialize = "Macro", to_string = "Macro (100k+)")]
  Macro,
}

impl Tier {
  pub fn from_followers(follower_count: u64) -> Self {
    if follower_count < MICRO_FLOOR {
      Self::Nano
    } else if follower_count <= MICRO_CEILING {
      Self::Micro
    } else {
      Self::Macro
    }
  }
}

/// Where a creator publishes.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Platform {
  Instagram,
  TikTok,
  YouTube,
  Blog,
}

/// Content category. A creator has one or more.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum Niche {
  Food,
  Drinks,
  Lifestyle,
  Fashion,
  Travel,
  Fitness,
  Comedy,
  Art,
  #[strum(serialize = "RealEstate", to_string = "Real Estate")]
  RealEstate,
  Photography,
}

// ─── Outreach pipeline ───────────────────────────────────────────────────────

/// Stage of a creator in the contact workflow.
///
/// Variants are declared in workflow order, but no ordering is enforced on
/// transitions: any status may follow any other.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum OutreachStatus {
  #[default]
  #[strum(serialize = "NotContacted", to_string = "Not contacted")]
  NotContacted,
  #[strum(serialize = "MessageSent", to_string = "Message sent")]
  MessageSent,
  #[strum(serialize = "FollowUp", to_string = "Follow-up")]
  FollowUp,
  Responded,
  Accepted,
  Declined,
}

impl OutreachStatus {
  /// All statuses in workflow order.
  pub const WORKFLOW: [Self; 6] = [
    Self::NotContacted,
    Self::MessageSent,
    Self::FollowUp,
    Self::Responded,
    Self::Accepted,
    Self::Declined,
  ];

  fn position(self) -> usize {
    Self::WORKFLOW
      .iter()
      .position(|s| *s == self)
      .unwrap_or_default()
  }

  /// The following workflow stage, or `self` at the end of the pipeline.
  pub fn next(self) -> Self {
    Self::WORKFLOW
      .get(self.position() + 1)
      .copied()
      .unwrap_or(self)
  }

  /// The preceding workflow stage, or `self` at the start of the pipeline.
  pub fn previous(self) -> Self {
    match self.position() {
      0 => self,
      i => Self::WORKFLOW[i - 1],
    }
  }
}

// ─── Creator ─────────────────────────────────────────────────────────────────

/// One guest candidate.
///
/// `rank` is `Some` exactly when `is_shortlisted` is true. `tier` is computed
/// from `follower_count` when the record is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creator {
  pub id:                Uuid,
  pub name:              String,
  pub handle:            String,
  pub platforms:         Vec<Platform>,
  pub profile_url:       String,
  pub niches:            Vec<Niche>,
  pub city:              Option<String>,
  pub follower_count:    u64,
  pub tier:              Tier,
  /// Engagement rate as a percentage, when known.
  pub engagement:        Option<f32>,
  pub email:             Option<String>,
  pub phone:             Option<String>,
  pub media_kit_url:     Option<String>,

  pub is_shortlisted:    bool,
  pub rank:              Option<u32>,
  pub is_preselected:    bool,
  pub is_final_guest:    bool,

  pub outreach_status:   OutreachStatus,
  /// Set by every outreach status change; `None` until the first one.
  pub last_contacted_at: Option<DateTime<Utc>>,
  /// Team member in charge of this outreach.
  pub owner:             Option<String>,

  pub notes:             String,
  pub tags:              Vec<String>,
  pub cost_estimate:     Option<u32>,
  /// Kind of exchange offered (dinner, product, paid post, ...).
  pub exchange_type:     Option<String>,
  /// Links to published content.
  pub evidence:          Vec<String>,
}

impl Creator {
  /// Build a fresh record: every membership flag off, status
  /// [`OutreachStatus::NotContacted`], empty notes and tags.
  pub fn from_new(id: Uuid, input: NewCreator) -> Self {
    Self {
      id,
      name: input.name,
      handle: input.handle,
      platforms: input.platforms,
      profile_url: input.profile_url,
      niches: input.niches,
      city: input.city,
      follower_count: input.follower_count,
      tier: Tier::from_followers(input.follower_count),
      engagement: input.engagement,
      email: input.email.filter(|e| !e.trim().is_empty()),
      phone: input.phone,
      media_kit_url: input.media_kit_url,
      is_shortlisted: false,
      rank: None,
      is_preselected: false,
      is_final_guest: false,
      outreach_status: OutreachStatus::NotContacted,
      last_contacted_at: None,
      owner: input.owner,
      notes: String::new(),
      tags: Vec::new(),
      cost_estimate: input.cost_estimate,
      exchange_type: input.exchange_type,
      evidence: Vec::new(),
    }
  }
}

// ─── NewCreator ──────────────────────────────────────────────────────────────

/// Input to [`crate::roster::RosterStore::create`].
///
/// Callers run [`NewCreator::validate`] first; the store assumes a valid
/// payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewCreator {
  pub name:           String,
  pub handle:         String,
  pub follower_count: u64,
  pub profile_url:    String,
  pub platforms:      Vec<Platform>,
  pub niches:         Vec<Niche>,
  #[serde(default)]
  pub email:          Option<String>,
  #[serde(default)]
  pub city:           Option<String>,
  #[serde(default)]
  pub phone:          Option<String>,
  #[serde(default)]
  pub engagement:     Option<f32>,
  #[serde(default)]
  pub media_kit_url:  Option<String>,
  #[serde(default)]
  pub owner:          Option<String>,
  #[serde(default)]
  pub cost_estimate:  Option<u32>,
  #[serde(default)]
  pub exchange_type:  Option<String>,
}

impl NewCreator {
  /// Convenience constructor with the required fields; optional ones empty.
  pub fn new(
    name: impl Into<String>,
    handle: impl Into<String>,
    follower_count: u64,
    profile_url: impl Into<String>,
    platforms: Vec<Platform>,
    niches: Vec<Niche>,
  ) -> Self {
    Self {
      name: name.into(),
      handle: handle.into(),
      follower_count,
      profile_url: profile_url.into(),
      platforms,
      niches,
      ..Self::default()
    }
  }
}
