//! Cash-out settlement policy.

use serde::{Deserialize, Serialize};

/// Policy applied when cashing out locked players while the table totals
/// disagree (active chip total vs. tracked money on the table).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementPolicy {
    /// A mismatch blocks the cash-out until the host corrects the counts.
    Strict,
    /// A mismatch is reported but the cash-out proceeds.
    #[default]
    Advisory,
}

impl SettlementPolicy {
    /// Returns true if a total mismatch should block the cash-out.
    #[must_use]
    pub fn blocks_on_mismatch(self) -> bool {
        matches!(self, Self::Strict)
    }
}
