//! Table domain types: game settings and seat state.

use chrono::{DateTime, Utc};
use chipbook_shared::config::GameDefaults;
use chipbook_shared::types::{Chips, ProfileId, SeatId};
use serde::{Deserialize, Serialize};

/// Input for starting a new game.
///
/// Every field is optional; missing fields degrade silently to the fixed
/// defaults ("Poker Game", 1/2 blinds, 30 buy-in).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSettings {
    /// Table display name.
    pub table_name: Option<String>,
    /// Small blind amount.
    pub small_blind: Option<Chips>,
    /// Big blind amount.
    pub big_blind: Option<Chips>,
    /// Default buy-in for new seats and rebuys.
    pub default_buy_in: Option<Chips>,
}

impl From<&GameDefaults> for GameSettings {
    fn from(defaults: &GameDefaults) -> Self {
        Self {
            table_name: Some(defaults.table_name.clone()),
            small_blind: Some(defaults.small_blind),
            big_blind: Some(defaults.big_blind),
            default_buy_in: Some(defaults.default_buy_in),
        }
    }
}

/// A player's seat state within one game.
///
/// Seats move through `seated(unlocked) <-> seated(locked) -> cashed out`;
/// cashed out is terminal and reachable only from the locked state via the
/// batch cash-out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TablePlayer {
    /// Unique identifier for this seat.
    pub id: SeatId,
    /// Display name. Duplicates are allowed across seats.
    pub name: String,
    /// Back-reference to a player profile, if the seat was filled from one.
    /// The profile may since have been deleted; lookups must tolerate that.
    pub profile_id: Option<ProfileId>,
    /// Cumulative amount bought in, increased by rebuys.
    pub buy_in: Chips,
    /// Current chip stack. Never negative.
    pub current_chips: Chips,
    /// False once the seat has cashed out.
    pub is_active: bool,
    /// Locked seats cannot be adjusted or rebought; lock is a prerequisite
    /// for cash-out.
    pub is_locked: bool,
    /// When the seat was added to the table.
    pub added_at: DateTime<Utc>,
    /// When the seat cashed out. Absent until then.
    pub cash_out_time: Option<DateTime<Utc>>,
}

impl TablePlayer {
    /// Creates a freshly seated, unlocked player whose stack equals the
    /// buy-in.
    #[must_use]
    pub fn seat(
        name: String,
        profile_id: Option<ProfileId>,
        buy_in: Chips,
        added_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: SeatId::new(),
            name,
            profile_id,
            buy_in,
            current_chips: buy_in,
            is_active: true,
            is_locked: false,
            added_at,
            cash_out_time: None,
        }
    }

    /// Returns true if the seat's stack can still be mutated.
    #[must_use]
    pub fn is_mutable(&self) -> bool {
        self.is_active && !self.is_locked
    }

    /// Returns true if the seat has cashed out (terminal state).
    #[must_use]
    pub fn is_cashed_out(&self) -> bool {
        !self.is_active
    }

    /// Session profit so far: current stack minus cumulative buy-in.
    #[must_use]
    pub fn profit(&self) -> Chips {
        self.current_chips - self.buy_in
    }
}
