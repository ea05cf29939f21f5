//! Settlement report produced by the batch cash-out.

use chipbook_shared::types::{Chips, SeatId};
use serde::{Deserialize, Serialize};

/// Outcome of cashing out the locked seats.
///
/// The discrepancy is computed before any seat transitions, against the
/// totals the host compared on screen: the sum of active stacks ("player
/// total") and the tracked running total ("on table").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementReport {
    /// Seats that transitioned to cashed out, in table order.
    pub cashed_out: Vec<SeatId>,
    /// Sum of the cashed-out seats' final stacks.
    pub total_cash_out: Chips,
    /// Sum of all active stacks before the cash-out.
    pub player_total: Chips,
    /// Tracked money on the table before the cash-out.
    pub money_on_table: Chips,
    /// `player_total - money_on_table`; zero when the table reconciles.
    pub discrepancy: Chips,
}

impl SettlementReport {
    /// Returns true if the table totals agreed at cash-out time.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.discrepancy.is_zero()
    }
}
