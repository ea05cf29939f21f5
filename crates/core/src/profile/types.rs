//! Profile domain types: identities, session records, and statistics.

use chrono::{DateTime, Utc};
use chipbook_shared::types::{Chips, GameId, ProfileId};
use serde::{Deserialize, Serialize};

use crate::table::{GameTable, TablePlayer};

/// Optional contact handles for settling up after a game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    /// Venmo username.
    pub venmo: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
}

/// A profile's settlement from one completed game.
///
/// Appended exactly once per completed game per participating profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// The game this settlement came from. The game stays in history even
    /// if the profile is later deleted.
    pub game_id: GameId,
    /// When the game ended.
    pub date: Option<DateTime<Utc>>,
    /// Cumulative buy-in over the session.
    pub buy_in: Chips,
    /// Final stack at game end.
    pub cash_out: Chips,
    /// `cash_out - buy_in`.
    pub profit: Chips,
    /// Session length, rounded to whole minutes; 0 when the game carries no
    /// end timestamp.
    pub duration_minutes: i64,
}

impl SessionRecord {
    /// Builds the settlement record for one seat of a finished game.
    #[must_use]
    pub fn settle(game: &GameTable, seat: &TablePlayer) -> Self {
        let duration_minutes = game
            .end_time
            .map_or(0, |end| round_minutes(end - game.start_time));

        Self {
            game_id: game.id,
            date: game.end_time,
            buy_in: seat.buy_in,
            cash_out: seat.current_chips,
            profit: seat.profit(),
            duration_minutes,
        }
    }
}

/// Rounds a duration to whole minutes using integer arithmetic.
fn round_minutes(duration: chrono::Duration) -> i64 {
    (duration.num_milliseconds() + 30_000).div_euclid(60_000)
}

/// Lifetime aggregates over a profile's sessions.
///
/// Updated incrementally by [`PlayerStats::record`] on each game
/// completion; [`PlayerStats::recompute`] rebuilds the same aggregates from
/// scratch so drift between the two is detectable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Number of completed sessions.
    pub total_sessions: u32,
    /// Sum of buy-ins across sessions.
    pub total_buy_ins: Chips,
    /// Sum of cash-outs across sessions.
    pub total_cash_outs: Chips,
    /// Lifetime profit (may be negative).
    pub net_profit: Chips,
    /// Best single-session profit. Zero until a winning session exists.
    pub biggest_win: Chips,
    /// Worst single-session profit. Zero until a losing session exists.
    pub biggest_loss: Chips,
}

impl PlayerStats {
    /// Folds one session into the aggregates.
    pub fn record(&mut self, session: &SessionRecord) {
        self.total_sessions += 1;
        self.total_buy_ins += session.buy_in;
        self.total_cash_outs += session.cash_out;
        self.net_profit += session.profit;
        self.biggest_win = self.biggest_win.max(session.profit);
        self.biggest_loss = self.biggest_loss.min(session.profit);
    }

    /// Rebuilds the aggregates from a full session history.
    #[must_use]
    pub fn recompute(sessions: &[SessionRecord]) -> Self {
        let mut stats = Self::default();
        for session in sessions {
            stats.record(session);
        }
        stats
    }

    /// Returns true if the incremental aggregates match a from-scratch
    /// recompute over `sessions`.
    #[must_use]
    pub fn is_consistent_with(&self, sessions: &[SessionRecord]) -> bool {
        *self == Self::recompute(sessions)
    }
}

/// A cross-session player identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProfile {
    /// Unique identifier.
    pub id: ProfileId,
    /// Display name.
    pub name: String,
    /// Optional contact handles.
    pub contact: ContactInfo,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
    /// Settlement records, one per completed game, append-only.
    pub sessions: Vec<SessionRecord>,
    /// Aggregates folded over `sessions`.
    pub stats: PlayerStats,
}

impl PlayerProfile {
    /// Creates a profile with zeroed stats and no session history.
    #[must_use]
    pub fn new(name: String, contact: ContactInfo, created_at: DateTime<Utc>) -> Self {
        Self {
            id: ProfileId::new(),
            name,
            contact,
            created_at,
            sessions: Vec::new(),
            stats: PlayerStats::default(),
        }
    }

    /// Appends a settlement record and folds it into the stats.
    pub fn record_session(&mut self, session: SessionRecord) {
        self.stats.record(&session);
        self.sessions.push(session);
    }
}
