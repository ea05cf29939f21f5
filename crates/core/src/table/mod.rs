//! Active-game bookkeeping.
//!
//! This module implements the single-table ledger:
//! - Game settings with silent defaulting
//! - Seat state and the lock/cash-out state machine
//! - Chip-stack operations (adjust, rebuy) with the zero-floor invariant
//! - Batch cash-out with the settlement integrity check
//! - Error types for table operations

pub mod error;
pub mod game;
pub mod settlement;
pub mod types;

#[cfg(test)]
mod game_props;

pub use error::TableError;
pub use game::GameTable;
pub use settlement::SettlementReport;
pub use types::{GameSettings, TablePlayer};
