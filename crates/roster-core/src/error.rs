//! Error types for `roster-core`.

use thiserror::Error;

use crate::validate::ValidationError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  /// Enabling another final guest would exceed the configured capacity.
  #[error("guest list is full ({capacity} guests)")]
  CapacityExceeded { capacity: usize },

  #[error("invalid creator payload: {}", join(.0))]
  Invalid(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
  errors
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join("; ")
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
