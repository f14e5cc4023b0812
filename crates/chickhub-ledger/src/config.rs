//! # Ledger Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CHICKHUB_DB_PATH=/srv/chickhub/chickhub.db                         │
//! │     CHICKHUB_NOTIFICATION_TTL_SECS=5                                   │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/chickhub/chickhub.toml (Linux)                           │
//! │     ~/Library/Application Support/com.chickhub.chickhub/chickhub.toml  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "ChickHub"
//! currency_symbol = "₹"
//!
//! [database]
//! path = "/srv/chickhub/chickhub.db"
//! max_connections = 5
//!
//! [prices]
//! boneless_100g = 120.0
//! boneless_20g = 25.0
//! pakoda_100g = 80.0
//!
//! [expenses]
//! tea_cup_rate = 1.5
//!
//! [notifications]
//! ttl_secs = 3
//! ```
//!
//! Amounts are written in rupees and converted to [`Money`] on use.

use std::path::PathBuf;
use std::time::Duration;

use chickhub_core::{Money, UnitPrices, DEFAULT_TEA_CUP_RATE};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{LedgerError, LedgerResult};

const CONFIG_FILE_NAME: &str = "chickhub.toml";
const DATABASE_FILE_NAME: &str = "chickhub.db";

/// Rupees (as written in the config file) to paise, rounded to the nearest
/// paisa. `None` when the amount is not finite or does not fit in `i64` paise.
pub fn rupees_to_money(rupees: f64) -> Option<Money> {
    let paise = (rupees * 100.0).round();
    // `i64::MAX as f64` rounds up to 2^63, hence the strict upper bound.
    if paise.is_finite() && paise >= i64::MIN as f64 && paise < i64::MAX as f64 {
        Some(Money::from_paise(paise as i64))
    } else {
        None
    }
}

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_store_name")]
    pub name: String,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_store_name() -> String {
    "ChickHub".to_string()
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite file. Falls back to the platform data directory when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: None,
            max_connections: default_max_connections(),
        }
    }
}

/// Unit prices of the named items, in rupees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSettings {
    #[serde(default = "default_boneless_100g")]
    pub boneless_100g: f64,

    #[serde(default = "default_boneless_20g")]
    pub boneless_20g: f64,

    #[serde(default = "default_pakoda_100g")]
    pub pakoda_100g: f64,
}

fn default_boneless_100g() -> f64 {
    120.0
}
fn default_boneless_20g() -> f64 {
    25.0
}
fn default_pakoda_100g() -> f64 {
    80.0
}

impl Default for PriceSettings {
    fn default() -> Self {
        PriceSettings {
            boneless_100g: default_boneless_100g(),
            boneless_20g: default_boneless_20g(),
            pakoda_100g: default_pakoda_100g(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseSettings {
    /// Price of one tea cup, in rupees.
    #[serde(default = "default_tea_cup_rate")]
    pub tea_cup_rate: f64,
}

fn default_tea_cup_rate() -> f64 {
    1.5
}

impl Default for ExpenseSettings {
    fn default() -> Self {
        ExpenseSettings {
            tea_cup_rate: default_tea_cup_rate(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationSettings {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_ttl_secs() -> u64 {
    3
}

impl Default for NotificationSettings {
    fn default() -> Self {
        NotificationSettings {
            ttl_secs: default_ttl_secs(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete ChickHub configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub prices: PriceSettings,

    #[serde(default)]
    pub expenses: ExpenseSettings,

    #[serde(default)]
    pub notifications: NotificationSettings,
}

impl LedgerConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (chickhub.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> LedgerResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file, returning the path written.
    pub fn save(&self, config_path: Option<PathBuf>) -> LedgerResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| LedgerError::Config("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Config saved");
        Ok(path)
    }

    pub fn validate(&self) -> LedgerResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(LedgerError::Config("store.name must not be empty".into()));
        }

        if self.database.max_connections == 0 {
            return Err(LedgerError::Config(
                "database.max_connections must be greater than 0".into(),
            ));
        }

        let prices = [
            ("prices.boneless_100g", self.prices.boneless_100g),
            ("prices.boneless_20g", self.prices.boneless_20g),
            ("prices.pakoda_100g", self.prices.pakoda_100g),
        ];
        for (field, value) in prices {
            if rupees_to_money(value).filter(Money::is_positive).is_none() {
                return Err(LedgerError::Config(format!(
                    "{} must be a positive amount, got: {}",
                    field, value
                )));
            }
        }

        let rate = self.expenses.tea_cup_rate;
        if rupees_to_money(rate).filter(|m| !m.is_negative()).is_none() {
            return Err(LedgerError::Config(format!(
                "expenses.tea_cup_rate must not be negative, got: {}",
                rate
            )));
        }

        if self.notifications.ttl_secs == 0 {
            return Err(LedgerError::Config(
                "notifications.ttl_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(name) = std::env::var("CHICKHUB_STORE_NAME") {
            self.store.name = name;
        }

        if let Ok(path) = std::env::var("CHICKHUB_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = Some(PathBuf::from(path));
        }

        if let Ok(max) = std::env::var("CHICKHUB_DB_MAX_CONNECTIONS") {
            match max.parse::<u32>() {
                Ok(n) => self.database.max_connections = n,
                Err(_) => warn!(value = %max, "Ignoring invalid CHICKHUB_DB_MAX_CONNECTIONS"),
            }
        }

        if let Ok(rate) = std::env::var("CHICKHUB_TEA_CUP_RATE") {
            match rate.parse::<f64>() {
                Ok(r) => {
                    debug!(rate = r, "Overriding tea cup rate from environment");
                    self.expenses.tea_cup_rate = r;
                }
                Err(_) => warn!(value = %rate, "Ignoring invalid CHICKHUB_TEA_CUP_RATE"),
            }
        }

        if let Ok(ttl) = std::env::var("CHICKHUB_NOTIFICATION_TTL_SECS") {
            match ttl.parse::<u64>() {
                Ok(secs) => self.notifications.ttl_secs = secs,
                Err(_) => warn!(value = %ttl, "Ignoring invalid CHICKHUB_NOTIFICATION_TTL_SECS"),
            }
        }
    }

    /// `chickhub.toml` in the platform config directory.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "chickhub", "chickhub")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Configured database file, or `chickhub.db` in the platform data directory.
    pub fn database_path(&self) -> Option<PathBuf> {
        self.database.path.clone().or_else(|| {
            directories::ProjectDirs::from("com", "chickhub", "chickhub")
                .map(|dirs| dirs.data_dir().join(DATABASE_FILE_NAME))
        })
    }

    /// Configured unit prices. An amount that [`validate`](Self::validate)
    /// would reject falls back to its default.
    pub fn unit_prices(&self) -> UnitPrices {
        let defaults = UnitPrices::default();
        UnitPrices {
            boneless_100g: rupees_to_money(self.prices.boneless_100g)
                .unwrap_or(defaults.boneless_100g),
            boneless_20g: rupees_to_money(self.prices.boneless_20g)
                .unwrap_or(defaults.boneless_20g),
            pakoda_100g: rupees_to_money(self.prices.pakoda_100g)
                .unwrap_or(defaults.pakoda_100g),
        }
    }

    pub fn tea_cup_rate(&self) -> Money {
        rupees_to_money(self.expenses.tea_cup_rate).unwrap_or(DEFAULT_TEA_CUP_RATE)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_secs(self.notifications.ttl_secs)
    }
}
