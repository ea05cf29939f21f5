//! The game table aggregate and its seat/chip operations.

use chrono::{DateTime, Utc};
use chipbook_shared::config::GameDefaults;
use chipbook_shared::types::{Chips, GameId, ProfileId, SeatId, SettlementPolicy};
use serde::{Deserialize, Serialize};

use super::error::TableError;
use super::settlement::SettlementReport;
use super::types::{GameSettings, TablePlayer};

/// One cash game: the table configuration, its seats, and the running
/// money-on-table total.
///
/// Best-effort invariant: `money_on_table` equals the sum of active seats'
/// stacks. Chip adjustments deliberately leave it untouched (chips move
/// between players, not on or off the table), so the two can drift when the
/// host mis-enters a count; the cash-out settlement reports the difference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameTable {
    /// Unique identifier.
    pub id: GameId,
    /// Table display name.
    pub table_name: String,
    /// Small blind amount.
    pub small_blind: Chips,
    /// Big blind amount.
    pub big_blind: Chips,
    /// Default buy-in for new seats and rebuys.
    pub default_buy_in: Chips,
    /// When the game started.
    pub start_time: DateTime<Utc>,
    /// When the game ended. Absent while active.
    pub end_time: Option<DateTime<Utc>>,
    /// False once the game has ended.
    pub is_active: bool,
    /// Running total of chips believed to be in play.
    pub money_on_table: Chips,
    /// Seats in the order they were added. Never removed within a game.
    pub players: Vec<TablePlayer>,
}

impl GameTable {
    /// Opens a new table from (possibly partial) settings.
    ///
    /// Missing settings degrade silently to the fixed defaults.
    #[must_use]
    pub fn open(settings: GameSettings, started_at: DateTime<Utc>) -> Self {
        let defaults = GameDefaults::default();
        Self {
            id: GameId::new(),
            table_name: settings.table_name.unwrap_or(defaults.table_name),
            small_blind: settings.small_blind.unwrap_or(defaults.small_blind),
            big_blind: settings.big_blind.unwrap_or(defaults.big_blind),
            default_buy_in: settings.default_buy_in.unwrap_or(defaults.default_buy_in),
            start_time: started_at,
            end_time: None,
            is_active: true,
            money_on_table: Chips::ZERO,
            players: Vec::new(),
        }
    }

    /// Seats a new player with the given buy-in.
    ///
    /// Duplicate display names are allowed. The buy-in may be zero (a seat
    /// reserved before chips are bought) but never negative.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::NegativeBuyIn`] without seating anyone.
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        profile_id: Option<ProfileId>,
        buy_in: Chips,
        at: DateTime<Utc>,
    ) -> Result<SeatId, TableError> {
        if buy_in.is_negative() {
            return Err(TableError::NegativeBuyIn(buy_in));
        }

        let seat = TablePlayer::seat(name.into(), profile_id, buy_in, at);
        let id = seat.id;
        self.money_on_table += buy_in;
        self.players.push(seat);
        Ok(id)
    }

    /// Seats a batch of profiles, all with the same buy-in.
    ///
    /// Deduplication is strictly by profile ID: a profile that already has
    /// a seat at this table (active or cashed out) is skipped. Name
    /// collisions are allowed and never block seating.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::NegativeBuyIn`] without seating anyone.
    pub fn seat_profiles(
        &mut self,
        profiles: impl IntoIterator<Item = (ProfileId, String)>,
        buy_in: Chips,
        at: DateTime<Utc>,
    ) -> Result<Vec<SeatId>, TableError> {
        if buy_in.is_negative() {
            return Err(TableError::NegativeBuyIn(buy_in));
        }

        let mut seated = Vec::new();
        for (profile_id, name) in profiles {
            if self.is_profile_seated(profile_id) {
                continue;
            }
            let seat = TablePlayer::seat(name, Some(profile_id), buy_in, at);
            seated.push(seat.id);
            self.money_on_table += buy_in;
            self.players.push(seat);
        }
        Ok(seated)
    }

    /// Adjusts a seat's stack by a (possibly negative) delta, clamping the
    /// result at zero. The money-on-table total is unchanged: chips are
    /// conserved by player-to-player transfer.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the stack untouched, if the seat is
    /// unknown, locked, or cashed out.
    pub fn update_chips(&mut self, seat_id: SeatId, delta: Chips) -> Result<Chips, TableError> {
        let seat = self.mutable_seat(seat_id)?;
        seat.current_chips = seat.current_chips.saturating_add_clamped(delta);
        Ok(seat.current_chips)
    }

    /// Adds a rebuy: both the cumulative buy-in and the stack grow by
    /// `amount`, and so does the money on the table.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving all totals untouched, if the amount is not
    /// positive or the seat is unknown, locked, or cashed out.
    pub fn rebuy(&mut self, seat_id: SeatId, amount: Chips) -> Result<(), TableError> {
        if !amount.is_positive() {
            return Err(TableError::NonPositiveRebuy(amount));
        }

        let seat = self.mutable_seat(seat_id)?;
        seat.buy_in += amount;
        seat.current_chips += amount;
        self.money_on_table += amount;
        Ok(())
    }

    /// Flips the lock on an active seat, returning the new lock state.
    ///
    /// # Errors
    ///
    /// Returns an error if the seat is unknown or has cashed out (the
    /// cashed-out state is terminal and may not be unlocked back open).
    pub fn toggle_lock(&mut self, seat_id: SeatId) -> Result<bool, TableError> {
        let seat = self.active_seat_mut(seat_id)?;
        seat.is_locked = !seat.is_locked;
        Ok(seat.is_locked)
    }

    /// Cashes out every seat that is simultaneously active and locked.
    ///
    /// The settlement totals are computed first; under
    /// [`SettlementPolicy::Strict`] a nonzero discrepancy refuses the whole
    /// operation, while [`SettlementPolicy::Advisory`] (the default)
    /// proceeds and carries the discrepancy in the report. All other seats
    /// are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::NoLockedSeats`] if no active seat is locked,
    /// or [`TableError::UnbalancedTable`] under the strict policy.
    pub fn cash_out_locked(
        &mut self,
        policy: SettlementPolicy,
        at: DateTime<Utc>,
    ) -> Result<SettlementReport, TableError> {
        if !self
            .players
            .iter()
            .any(|p| p.is_active && p.is_locked)
        {
            return Err(TableError::NoLockedSeats);
        }

        let player_total = self.player_total();
        let money_on_table = self.money_on_table;
        let discrepancy = player_total - money_on_table;

        if policy.blocks_on_mismatch() && !discrepancy.is_zero() {
            return Err(TableError::UnbalancedTable {
                player_total,
                money_on_table,
            });
        }

        let mut cashed_out = Vec::new();
        let mut total_cash_out = Chips::ZERO;
        for seat in &mut self.players {
            if seat.is_active && seat.is_locked {
                seat.is_active = false;
                seat.cash_out_time = Some(at);
                total_cash_out += seat.current_chips;
                cashed_out.push(seat.id);
            }
        }
        self.money_on_table -= total_cash_out;

        Ok(SettlementReport {
            cashed_out,
            total_cash_out,
            player_total,
            money_on_table,
            discrepancy,
        })
    }

    /// Ends the game, stamping the end time.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::GameEnded`] if the game already ended.
    pub fn close(&mut self, at: DateTime<Utc>) -> Result<(), TableError> {
        if !self.is_active {
            return Err(TableError::GameEnded);
        }
        self.end_time = Some(at);
        self.is_active = false;
        Ok(())
    }

    /// Sum of active seats' chip stacks ("Player Total").
    #[must_use]
    pub fn player_total(&self) -> Chips {
        self.players
            .iter()
            .filter(|p| p.is_active)
            .map(|p| p.current_chips)
            .sum()
    }

    /// `player_total() - money_on_table`; zero when the table reconciles.
    #[must_use]
    pub fn discrepancy(&self) -> Chips {
        self.player_total() - self.money_on_table
    }

    /// Number of seats still in active play.
    #[must_use]
    pub fn active_seat_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_active).count()
    }

    /// Returns true if at least one active seat is locked (the gate for
    /// enabling cash-out).
    #[must_use]
    pub fn has_locked_seats(&self) -> bool {
        self.players.iter().any(|p| p.is_active && p.is_locked)
    }

    /// Looks up a seat by ID.
    #[must_use]
    pub fn seat(&self, seat_id: SeatId) -> Option<&TablePlayer> {
        self.players.iter().find(|p| p.id == seat_id)
    }

    /// Returns true if the profile already holds a seat at this table.
    #[must_use]
    pub fn is_profile_seated(&self, profile_id: ProfileId) -> bool {
        self.players
            .iter()
            .any(|p| p.profile_id == Some(profile_id))
    }

    /// Resolves a seat that may still be mutated, enforcing the state
    /// machine: unknown -> cashed out -> locked, in that order.
    fn mutable_seat(&mut self, seat_id: SeatId) -> Result<&mut TablePlayer, TableError> {
        let seat = self
            .players
            .iter_mut()
            .find(|p| p.id == seat_id)
            .ok_or(TableError::SeatNotFound(seat_id))?;
        if seat.is_cashed_out() {
            return Err(TableError::SeatCashedOut(seat_id));
        }
        if seat.is_locked {
            return Err(TableError::SeatLocked(seat_id));
        }
        Ok(seat)
    }

    /// Resolves an active seat regardless of lock state.
    fn active_seat_mut(&mut self, seat_id: SeatId) -> Result<&mut TablePlayer, TableError> {
        let seat = self
            .players
            .iter_mut()
            .find(|p| p.id == seat_id)
            .ok_or(TableError::SeatNotFound(seat_id))?;
        if seat.is_cashed_out() {
            return Err(TableError::SeatCashedOut(seat_id));
        }
        Ok(seat)
    }
}
