//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;

use crate::types::{Chips, SettlementPolicy};

/// Application configuration.
///
/// Every field has a default so a freshly installed host needs no config
/// file at all; `config/*.toml` files and `CHIPBOOK`-prefixed environment
/// variables layer on top.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Local storage configuration.
    #[serde(default)]
    pub storage: StorageSettings,
    /// Defaults applied to missing game-setup fields.
    #[serde(default)]
    pub game: GameDefaults,
    /// Cash-out settlement configuration.
    #[serde(default)]
    pub settlement: SettlementSettings,
}

/// Local storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Root directory for persisted ledger blobs.
    #[serde(default = "default_storage_root")]
    pub root: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            root: default_storage_root(),
        }
    }
}

fn default_storage_root() -> PathBuf {
    PathBuf::from("./chipbook")
}

/// Defaults applied when a game is started with missing settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GameDefaults {
    /// Table display name.
    #[serde(default = "default_table_name")]
    pub table_name: String,
    /// Small blind amount.
    #[serde(default = "default_small_blind")]
    pub small_blind: Chips,
    /// Big blind amount.
    #[serde(default = "default_big_blind")]
    pub big_blind: Chips,
    /// Default buy-in amount for new seats and rebuys.
    #[serde(default = "default_buy_in")]
    pub default_buy_in: Chips,
}

impl Default for GameDefaults {
    fn default() -> Self {
        Self {
            table_name: default_table_name(),
            small_blind: default_small_blind(),
            big_blind: default_big_blind(),
            default_buy_in: default_buy_in(),
        }
    }
}

fn default_table_name() -> String {
    "Poker Game".to_string()
}

fn default_small_blind() -> Chips {
    Chips::new(1)
}

fn default_big_blind() -> Chips {
    Chips::new(2)
}

fn default_buy_in() -> Chips {
    Chips::new(30)
}

/// Cash-out settlement configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettlementSettings {
    /// Whether a table-total mismatch blocks or merely accompanies a
    /// cash-out.
    #[serde(default)]
    pub policy: SettlementPolicy,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("CHIPBOOK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
