//! The ledger controller.

use chrono::Utc;
use chipbook_shared::types::{Chips, ProfileId, SeatId, SettlementPolicy};

use super::error::EngineError;
use crate::profile::{ContactInfo, PlayerProfile, ProfileError, SessionRecord};
use crate::table::{GameSettings, GameTable, SettlementReport};

/// The whole ledger state: at most one active game, the completed-game
/// history (most-recent-first), and the profile roster.
///
/// A single owned value holds everything; there is no global mutable slot,
/// and every operation below is also reachable as a pure transition through
/// [`super::action::apply`].
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    active_game: Option<GameTable>,
    history: Vec<GameTable>,
    profiles: Vec<PlayerProfile>,
}

impl Ledger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a ledger from persisted state.
    #[must_use]
    pub fn hydrate(
        active_game: Option<GameTable>,
        history: Vec<GameTable>,
        profiles: Vec<PlayerProfile>,
    ) -> Self {
        Self {
            active_game,
            history,
            profiles,
        }
    }

    /// The active game, if one is running.
    #[must_use]
    pub fn active_game(&self) -> Option<&GameTable> {
        self.active_game.as_ref()
    }

    /// Completed games, most recent first.
    #[must_use]
    pub fn history(&self) -> &[GameTable] {
        &self.history
    }

    /// The profile roster.
    #[must_use]
    pub fn profiles(&self) -> &[PlayerProfile] {
        &self.profiles
    }

    /// Looks up a profile. The target may have been deleted, so callers
    /// must treat the result as possibly missing.
    #[must_use]
    pub fn profile(&self, profile_id: ProfileId) -> Option<&PlayerProfile> {
        self.profiles.iter().find(|p| p.id == profile_id)
    }

    // ========== Game lifecycle ==========

    /// Starts a new game, replacing any prior active game without
    /// reconciling it. The displaced game (if any) is returned so a shell
    /// can surface the data loss instead of dropping it silently.
    pub fn start_game(&mut self, settings: GameSettings) -> Option<GameTable> {
        self.active_game
            .replace(GameTable::open(settings, Utc::now()))
    }

    /// Ends the active game: stamps the end time, folds a settlement record
    /// into every linked profile's statistics, and prepends the finalized
    /// game to history.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoActiveGame`] if no game is running.
    pub fn end_game(&mut self) -> Result<GameTable, EngineError> {
        let mut game = self.active_game.take().ok_or(EngineError::NoActiveGame)?;
        if let Err(err) = game.close(Utc::now()) {
            // Put the game back so a failed close leaves state untouched.
            self.active_game = Some(game);
            return Err(err.into());
        }

        for seat in &game.players {
            let Some(profile_id) = seat.profile_id else {
                continue;
            };
            // The profile may have been deleted mid-game; its seat record
            // simply keeps the dangling reference.
            if let Some(profile) = self.profiles.iter_mut().find(|p| p.id == profile_id) {
                profile.record_session(SessionRecord::settle(&game, seat));
            }
        }

        self.history.insert(0, game.clone());
        Ok(game)
    }

    // ========== Seat & chip operations ==========

    /// Seats a new player at the active game.
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        buy_in: Chips,
    ) -> Result<SeatId, EngineError> {
        let game = self.active_game_mut()?;
        Ok(game.add_player(name, None, buy_in, Utc::now())?)
    }

    /// Seats a batch of profiles at the active game, all with the same
    /// buy-in. Unknown profile IDs are skipped (the roster lookup is always
    /// possibly-missing), as are profiles already seated at this table.
    pub fn add_players_from_profiles(
        &mut self,
        profile_ids: &[ProfileId],
        buy_in: Chips,
    ) -> Result<Vec<SeatId>, EngineError> {
        let entries: Vec<(ProfileId, String)> = profile_ids
            .iter()
            .filter_map(|id| self.profile(*id).map(|p| (p.id, p.name.clone())))
            .collect();

        let game = self.active_game_mut()?;
        Ok(game.seat_profiles(entries, buy_in, Utc::now())?)
    }

    /// Adjusts a seat's stack by a delta, clamped at zero.
    pub fn update_chips(&mut self, seat_id: SeatId, delta: Chips) -> Result<Chips, EngineError> {
        Ok(self.active_game_mut()?.update_chips(seat_id, delta)?)
    }

    /// Adds a rebuy to a seat.
    pub fn rebuy(&mut self, seat_id: SeatId, amount: Chips) -> Result<(), EngineError> {
        Ok(self.active_game_mut()?.rebuy(seat_id, amount)?)
    }

    /// Flips the lock on a seat, returning the new lock state.
    pub fn toggle_lock(&mut self, seat_id: SeatId) -> Result<bool, EngineError> {
        Ok(self.active_game_mut()?.toggle_lock(seat_id)?)
    }

    /// Cashes out every active, locked seat under the given settlement
    /// policy.
    pub fn cash_out_locked(
        &mut self,
        policy: SettlementPolicy,
    ) -> Result<SettlementReport, EngineError> {
        Ok(self.active_game_mut()?.cash_out_locked(policy, Utc::now())?)
    }

    // ========== Profile management ==========

    /// Creates a profile with zeroed stats and empty session history.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::EmptyName`] if the trimmed name is empty.
    pub fn add_profile(
        &mut self,
        name: impl Into<String>,
        contact: ContactInfo,
    ) -> Result<ProfileId, EngineError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ProfileError::EmptyName.into());
        }

        let profile = PlayerProfile::new(name, contact, Utc::now());
        let id = profile.id;
        self.profiles.push(profile);
        Ok(id)
    }

    /// Removes a profile from the roster. Historical games keep their
    /// (now dangling) `profile_id` references.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::NotFound`] if no such profile exists.
    pub fn delete_profile(&mut self, profile_id: ProfileId) -> Result<(), EngineError> {
        let before = self.profiles.len();
        self.profiles.retain(|p| p.id != profile_id);
        if self.profiles.len() == before {
            return Err(ProfileError::NotFound(profile_id).into());
        }
        Ok(())
    }

    fn active_game_mut(&mut self) -> Result<&mut GameTable, EngineError> {
        self.active_game.as_mut().ok_or(EngineError::NoActiveGame)
    }
}
