//! Core types and rules for the creator outreach board.
//!
//! The crate owns the creator roster, the membership flags a creator moves
//! through (shortlist, preselection, final guest list), the outreach pipeline,
//! and the pure functions deriving views from the roster. It has no I/O; the
//! terminal front end and any other display layer depend on it.

pub mod creator;
pub mod error;
pub mod policy;
pub mod roster;
pub mod validate;

pub use error::{Error, Result};

#[cfg(test)]
mod tests;
