//! The ledger controller and its pure action transitions.
//!
//! This module implements:
//! - The `Ledger` owning the active game, game history, and profile roster
//! - Game lifecycle (start, end) including the end-of-game statistics fold
//! - Action/outcome enums and the pure `apply` transition
//! - Error types aggregating table and profile failures

pub mod action;
pub mod error;
pub mod ledger;

pub use action::{Action, Outcome, StateScope, apply};
pub use error::EngineError;
pub use ledger::Ledger;
