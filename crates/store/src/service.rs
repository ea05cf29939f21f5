//! The key-value blob store over OpenDAL's local filesystem service.

use chipbook_core::engine::Ledger;
use chipbook_core::profile::PlayerProfile;
use chipbook_core::table::GameTable;
use chipbook_shared::config::StorageSettings;
use opendal::{ErrorKind, Operator, services};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::StoreError;

/// Logical key holding the serialized active game, removed when a game
/// ends.
pub const ACTIVE_GAME_KEY: &str = "active-game";
/// Logical key holding the serialized game history, most recent first.
pub const GAME_HISTORY_KEY: &str = "game-history";
/// Logical key holding the serialized profile roster.
pub const PLAYER_PROFILES_KEY: &str = "player-profiles";

/// Persists ledger state as opaque JSON blobs under three logical keys.
///
/// Every save re-serializes the owning structure whole; there is no
/// incremental or partial write.
pub struct LedgerStore {
    operator: Operator,
}

impl LedgerStore {
    /// Create a store rooted at the configured local directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend cannot be initialized.
    pub fn from_config(settings: &StorageSettings) -> Result<Self, StoreError> {
        let root = settings
            .root
            .to_str()
            .ok_or_else(|| StoreError::configuration("invalid storage root path"))?;
        let builder = services::Fs::default().root(root);
        let operator = Operator::new(builder)
            .map_err(|e| StoreError::configuration(e.to_string()))?
            .finish();
        Ok(Self { operator })
    }

    /// Hydrate a full ledger from storage.
    ///
    /// Absent keys hydrate to empty structures (no active game, empty
    /// history, empty roster); a present-but-undecodable blob is an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupt`] for undecodable records or an
    /// operation error from the backend.
    pub async fn load(&self) -> Result<Ledger, StoreError> {
        let active_game: Option<GameTable> = self.read_key(ACTIVE_GAME_KEY).await?;
        let history: Vec<GameTable> = self.read_key(GAME_HISTORY_KEY).await?.unwrap_or_default();
        let profiles: Vec<PlayerProfile> = self
            .read_key(PLAYER_PROFILES_KEY)
            .await?
            .unwrap_or_default();

        debug!(
            active = active_game.is_some(),
            games = history.len(),
            profiles = profiles.len(),
            "hydrated ledger from storage"
        );
        Ok(Ledger::hydrate(active_game, history, profiles))
    }

    /// Write the active game blob.
    pub async fn save_active_game(&self, game: &GameTable) -> Result<(), StoreError> {
        self.write_key(ACTIVE_GAME_KEY, game).await
    }

    /// Remove the active game blob entirely (a finished game is removed,
    /// never written as null). Removing an absent key is fine.
    pub async fn remove_active_game(&self) -> Result<(), StoreError> {
        self.operator
            .delete(ACTIVE_GAME_KEY)
            .await
            .map_err(StoreError::from)
    }

    /// Write the game history blob.
    pub async fn save_history(&self, history: &[GameTable]) -> Result<(), StoreError> {
        self.write_key(GAME_HISTORY_KEY, history).await
    }

    /// Write the profile roster blob.
    pub async fn save_profiles(&self, profiles: &[PlayerProfile]) -> Result<(), StoreError> {
        self.write_key(PLAYER_PROFILES_KEY, profiles).await
    }

    /// Write a full ledger snapshot: all three keys, with the active-game
    /// key removed when no game is running.
    pub async fn persist(&self, ledger: &Ledger) -> Result<(), StoreError> {
        match ledger.active_game() {
            Some(game) => self.save_active_game(game).await?,
            None => self.remove_active_game().await?,
        }
        self.save_history(ledger.history()).await?;
        self.save_profiles(ledger.profiles()).await
    }

    async fn read_key<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let bytes = match self.operator.read(key).await {
            Ok(buffer) => buffer.to_vec(),
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| StoreError::corrupt(key, e.to_string()))
    }

    async fn write_key<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(value).map_err(|e| StoreError::Encode {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        debug!(key, bytes = bytes.len(), "writing ledger blob");
        self.operator
            .write(key, bytes)
            .await
            .map_err(StoreError::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chipbook_core::table::GameSettings;
    use chipbook_shared::types::Chips;
    use chrono::Utc;
    use std::path::PathBuf;

    fn temp_settings() -> (StorageSettings, PathBuf) {
        let root = std::env::temp_dir().join(format!("chipbook-store-{}", uuid::Uuid::now_v7()));
        (StorageSettings { root: root.clone() }, root)
    }

    fn sample_game() -> GameTable {
        let mut game = GameTable::open(GameSettings::default(), Utc::now());
        game.add_player("Alice", None, Chips::new(30), Utc::now())
            .unwrap();
        game
    }

    #[tokio::test]
    async fn test_load_from_empty_storage_is_empty() {
        let (settings, root) = temp_settings();
        let store = LedgerStore::from_config(&settings).unwrap();

        let ledger = store.load().await.unwrap();
        assert!(ledger.active_game().is_none());
        assert!(ledger.history().is_empty());
        assert!(ledger.profiles().is_empty());

        std::fs::remove_dir_all(root).ok();
    }

    #[tokio::test]
    async fn test_active_game_round_trip() {
        let (settings, root) = temp_settings();
        let store = LedgerStore::from_config(&settings).unwrap();
        let game = sample_game();

        store.save_active_game(&game).await.unwrap();
        let loaded = store.load().await.unwrap();
        let active = loaded.active_game().unwrap();
        assert_eq!(active.id, game.id);
        assert_eq!(active.money_on_table, Chips::new(30));
        assert_eq!(active.players.len(), 1);
        assert_eq!(active.players[0].name, "Alice");

        std::fs::remove_dir_all(root).ok();
    }

    #[tokio::test]
    async fn test_remove_active_game_deletes_the_key() {
        let (settings, root) = temp_settings();
        let store = LedgerStore::from_config(&settings).unwrap();

        store.save_active_game(&sample_game()).await.unwrap();
        store.remove_active_game().await.unwrap();
        assert!(store.load().await.unwrap().active_game().is_none());

        // Removing an already-absent key is not an error.
        store.remove_active_game().await.unwrap();

        std::fs::remove_dir_all(root).ok();
    }

    #[tokio::test]
    async fn test_full_snapshot_round_trip() {
        let (settings, root) = temp_settings();
        let store = LedgerStore::from_config(&settings).unwrap();

        let mut ledger = Ledger::new();
        ledger.add_profile("Alice", Default::default()).unwrap();
        ledger.start_game(GameSettings::default());
        ledger.end_game().unwrap();
        ledger.start_game(GameSettings::default());

        store.persist(&ledger).await.unwrap();
        let loaded = store.load().await.unwrap();
        assert!(loaded.active_game().is_some());
        assert_eq!(loaded.history().len(), 1);
        assert_eq!(loaded.profiles().len(), 1);
        assert_eq!(loaded.profiles()[0].name, "Alice");

        std::fs::remove_dir_all(root).ok();
    }

    #[tokio::test]
    async fn test_corrupt_blob_is_reported_with_its_key() {
        let (settings, root) = temp_settings();
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join(GAME_HISTORY_KEY), b"not json at all").unwrap();

        let store = LedgerStore::from_config(&settings).unwrap();
        let err = store.load().await.unwrap_err();
        assert!(matches!(
            &err,
            StoreError::Corrupt { key, .. } if key == GAME_HISTORY_KEY
        ));

        std::fs::remove_dir_all(root).ok();
    }
}
