//! Table error types.

use chipbook_shared::types::{Chips, SeatId};
use thiserror::Error;

/// Errors that can occur during table operations.
///
/// Every error leaves the table untouched; a caller that treats rejected
/// operations as no-ops can simply discard the `Err`.
#[derive(Debug, Error)]
pub enum TableError {
    // ========== Seat Errors ==========
    /// No seat with the given ID exists at this table.
    #[error("Seat not found: {0}")]
    SeatNotFound(SeatId),

    /// The seat is locked and cannot be mutated.
    #[error("Seat {0} is locked")]
    SeatLocked(SeatId),

    /// The seat has cashed out; its state is terminal.
    #[error("Seat {0} has already cashed out")]
    SeatCashedOut(SeatId),

    // ========== Amount Errors ==========
    /// A buy-in cannot be negative.
    #[error("Buy-in cannot be negative: {0}")]
    NegativeBuyIn(Chips),

    /// A rebuy must be a positive amount.
    #[error("Rebuy amount must be positive: {0}")]
    NonPositiveRebuy(Chips),

    // ========== Settlement Errors ==========
    /// Cash-out requires at least one active, locked seat.
    #[error("No locked seats to cash out")]
    NoLockedSeats,

    /// Under the strict settlement policy, mismatched totals block cash-out.
    #[error("Table is unbalanced. Player total: {player_total}, on table: {money_on_table}")]
    UnbalancedTable {
        /// Sum of active seats' chip stacks.
        player_total: Chips,
        /// Tracked money on the table.
        money_on_table: Chips,
    },

    // ========== Lifecycle Errors ==========
    /// The game has already ended.
    #[error("Game has already ended")]
    GameEnded,
}

impl TableError {
    /// Returns the error code for shells that need a stable identifier.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::SeatNotFound(_) => "SEAT_NOT_FOUND",
            Self::SeatLocked(_) => "SEAT_LOCKED",
            Self::SeatCashedOut(_) => "SEAT_CASHED_OUT",
            Self::NegativeBuyIn(_) => "NEGATIVE_BUY_IN",
            Self::NonPositiveRebuy(_) => "NON_POSITIVE_REBUY",
            Self::NoLockedSeats => "NO_LOCKED_SEATS",
            Self::UnbalancedTable { .. } => "UNBALANCED_TABLE",
            Self::GameEnded => "GAME_ENDED",
        }
    }
}
