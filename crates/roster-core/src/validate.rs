//! Field checks for new-creator payloads.
//!
//! The roster store trusts its input; front ends run these checks before
//! calling [`crate::roster::RosterStore::create`].

use thiserror::Error;

use crate::{Error, Result, creator::NewCreator};

/// One problem with a [`NewCreator`] payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("name is required")]
  MissingName,
  #[error("handle is required")]
  MissingHandle,
  #[error("follower count must be at least 1")]
  NoFollowers,
  #[error("profile URL is required")]
  MissingProfileUrl,
  #[error("profile URL must start with http")]
  MalformedProfileUrl,
  #[error("select at least one platform")]
  NoPlatform,
  #[error("select at least one niche")]
  NoNiche,
}

impl NewCreator {
  /// Every problem with this payload, in field order. Empty means valid.
  pub fn problems(&self) -> Vec<ValidationError> {
    let mut problems = Vec::new();
    if self.name.trim().is_empty() {
      problems.push(ValidationError::MissingName);
    }
    if self.handle.trim().is_empty() {
      problems.push(ValidationError::MissingHandle);
    }
    if self.follower_count == 0 {
      problems.push(ValidationError::NoFollowers);
    }
    let url = self.profile_url.trim();
    if url.is_empty() {
      problems.push(ValidationError::MissingProfileUrl);
    } else if !url.starts_with("http") {
      problems.push(ValidationError::MalformedProfileUrl);
    }
    if self.platforms.is_empty() {
      problems.push(ValidationError::NoPlatform);
    }
    if self.niches.is_empty() {
      problems.push(ValidationError::NoNiche);
    }
    problems
  }

  /// `Ok(self)` when the payload has no problems, otherwise
  /// [`Error::Invalid`] listing all of them.
  pub fn validate(self) -> Result<Self> {
    let problems = self.problems();
    if problems.is_empty() {
      Ok(self)
    } else {
      Err(Error::Invalid(problems))
    }
  }
}
