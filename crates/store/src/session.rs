//! The app-facing ledger session: apply an action, persist as a side
//! effect.

use chipbook_core::engine::{Action, EngineError, Ledger, Outcome, StateScope, apply};
use tracing::warn;

use super::error::StoreError;
use super::service::LedgerStore;

/// A hydrated ledger bound to its store.
///
/// Each dispatched action runs the pure engine transition, then writes the
/// owning structure back as a fire-and-forget side effect: persistence
/// failures are logged and never roll back or fail the operation.
pub struct LedgerSession {
    ledger: Ledger,
    store: LedgerStore,
}

impl LedgerSession {
    /// Open a session by hydrating the ledger from storage.
    ///
    /// # Errors
    ///
    /// Returns an error if stored state exists but cannot be decoded.
    pub async fn open(store: LedgerStore) -> Result<Self, StoreError> {
        let ledger = store.load().await?;
        Ok(Self { ledger, store })
    }

    /// The current ledger state.
    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Apply one action and persist the structure it owns.
    ///
    /// # Errors
    ///
    /// Returns the engine error for a rejected action; the ledger and the
    /// stored blobs are unchanged in that case.
    pub async fn dispatch(&mut self, action: Action) -> Result<Outcome, EngineError> {
        let scope = action.scope();
        let (next, result) = apply(std::mem::take(&mut self.ledger), action);
        self.ledger = next;

        if result.is_ok() {
            self.persist_scope(scope).await;
        }
        result
    }

    /// Write a full snapshot of the current state.
    ///
    /// # Errors
    ///
    /// Returns an error if any blob cannot be written.
    pub async fn flush(&self) -> Result<(), StoreError> {
        self.store.persist(&self.ledger).await
    }

    async fn persist_scope(&self, scope: StateScope) {
        let written = match scope {
            StateScope::ActiveGame => match self.ledger.active_game() {
                Some(game) => self.store.save_active_game(game).await,
                None => self.store.remove_active_game().await,
            },
            StateScope::Profiles => self.store.save_profiles(self.ledger.profiles()).await,
            StateScope::GameLifecycle => {
                // A game just ended: the active slot empties (the key is
                // removed, not nulled) and both history and profiles grew.
                let removed = self.store.remove_active_game().await;
                let history = self.store.save_history(self.ledger.history()).await;
                let profiles = self.store.save_profiles(self.ledger.profiles()).await;
                removed.and(history).and(profiles)
            }
        };

        if let Err(err) = written {
            warn!(
                error = %err,
                code = err.error_code(),
                "persistence write failed; ledger state kept in memory only"
            );
        }
    }
}
