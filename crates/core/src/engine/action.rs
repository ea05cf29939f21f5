//! Ledger operations as data: actions, outcomes, and the pure transition.

use chipbook_shared::types::{Chips, ProfileId, SeatId, SettlementPolicy};

use super::error::EngineError;
use super::ledger::Ledger;
use crate::profile::ContactInfo;
use crate::table::{GameSettings, GameTable, SettlementReport};

/// A single user-facing ledger operation.
#[derive(Debug, Clone)]
pub enum Action {
    /// Start a new game, replacing any active one.
    StartGame {
        /// Game settings; missing fields degrade to defaults.
        settings: GameSettings,
    },
    /// End the active game and fold statistics into linked profiles.
    EndGame,
    /// Seat a new player by name.
    AddPlayer {
        /// Display name.
        name: String,
        /// Initial buy-in.
        buy_in: Chips,
    },
    /// Seat a batch of profiles, all with the same buy-in.
    SeatProfiles {
        /// Profiles to seat; unknown or already-seated IDs are skipped.
        profile_ids: Vec<ProfileId>,
        /// Buy-in applied to every new seat.
        buy_in: Chips,
    },
    /// Adjust a seat's stack by a delta, clamped at zero.
    UpdateChips {
        /// Target seat.
        seat_id: SeatId,
        /// Positive or negative chip delta.
        delta: Chips,
    },
    /// Add a rebuy to a seat.
    Rebuy {
        /// Target seat.
        seat_id: SeatId,
        /// Rebuy amount; must be positive.
        amount: Chips,
    },
    /// Flip a seat's lock.
    ToggleLock {
        /// Target seat.
        seat_id: SeatId,
    },
    /// Cash out every active, locked seat.
    CashOutLocked {
        /// Settlement integrity policy.
        policy: SettlementPolicy,
    },
    /// Create a player profile.
    AddProfile {
        /// Display name; must be non-blank.
        name: String,
        /// Optional contact handles.
        contact: ContactInfo,
    },
    /// Remove a profile from the roster.
    DeleteProfile {
        /// Profile to remove.
        profile_id: ProfileId,
    },
}

/// Which persisted structure an action owns, for save-after-mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateScope {
    /// Only the active game changes.
    ActiveGame,
    /// Only the profile roster changes.
    Profiles,
    /// A game ended: history and profiles change and the active slot
    /// empties.
    GameLifecycle,
}

impl Action {
    /// The persisted structure this action mutates on success.
    #[must_use]
    pub fn scope(&self) -> StateScope {
        match self {
            Self::StartGame { .. }
            | Self::AddPlayer { .. }
            | Self::SeatProfiles { .. }
            | Self::UpdateChips { .. }
            | Self::Rebuy { .. }
            | Self::ToggleLock { .. }
            | Self::CashOutLocked { .. } => StateScope::ActiveGame,
            Self::EndGame => StateScope::GameLifecycle,
            Self::AddProfile { .. } | Self::DeleteProfile { .. } => StateScope::Profiles,
        }
    }
}

/// What an action produced.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// A game started; `replaced` is the displaced active game, if any.
    GameStarted {
        /// Active game that was discarded without reconciliation.
        replaced: Option<GameTable>,
    },
    /// The active game ended; the finalized game is returned.
    GameEnded(GameTable),
    /// A player was seated.
    PlayerAdded(SeatId),
    /// Profiles were seated (possibly fewer than requested).
    ProfilesSeated(Vec<SeatId>),
    /// A stack was adjusted; carries the new stack.
    ChipsUpdated(Chips),
    /// A rebuy was applied.
    RebuyApplied,
    /// A lock was flipped; carries the new lock state.
    LockToggled(bool),
    /// Locked seats were cashed out.
    CashedOut(SettlementReport),
    /// A profile was created.
    ProfileAdded(ProfileId),
    /// A profile was deleted.
    ProfileDeleted,
}

/// Applies one action to the ledger as a pure transition
/// `(state, action) -> (state, result)`.
///
/// On error the returned state is unchanged from the input.
#[must_use]
pub fn apply(mut state: Ledger, action: Action) -> (Ledger, Result<Outcome, EngineError>) {
    let result = match action {
        Action::StartGame { settings } => Ok(Outcome::GameStarted {
            replaced: state.start_game(settings),
        }),
        Action::EndGame => state.end_game().map(Outcome::GameEnded),
        Action::AddPlayer { name, buy_in } => {
            state.add_player(name, buy_in).map(Outcome::PlayerAdded)
        }
        Action::SeatProfiles {
            profile_ids,
            buy_in,
        } => state
            .add_players_from_profiles(&profile_ids, buy_in)
            .map(Outcome::ProfilesSeated),
        Action::UpdateChips { seat_id, delta } => state
            .update_chips(seat_id, delta)
            .map(Outcome::ChipsUpdated),
        Action::Rebuy { seat_id, amount } => {
            state.rebuy(seat_id, amount).map(|()| Outcome::RebuyApplied)
        }
        Action::ToggleLock { seat_id } => state.toggle_lock(seat_id).map(Outcome::LockToggled),
        Action::CashOutLocked { policy } => {
            state.cash_out_locked(policy).map(Outcome::CashedOut)
        }
        Action::AddProfile { name, contact } => {
            state.add_profile(name, contact).map(Outcome::ProfileAdded)
        }
        Action::DeleteProfile { profile_id } => state
            .delete_profile(profile_id)
            .map(|()| Outcome::ProfileDeleted),
    };

    (state, result)
}
