//! Cross-session player identities and lifetime statistics.
//!
//! This module implements:
//! - Player profiles with optional contact handles
//! - Per-game settlement records
//! - The incremental statistics fold and its from-scratch reconciliation
//! - Error types for profile operations

pub mod error;
pub mod types;

#[cfg(test)]
mod stats_props;

pub use error::ProfileError;
pub use types::{ContactInfo, PlayerProfile, PlayerStats, SessionRecord};
