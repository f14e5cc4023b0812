//! # chickhub-ledger: Ledger Store for ChickHub
//!
//! Keeps the stall's sales, expenses, menu and chicken stock in memory,
//! synchronized with a persistence backend, and exposes the read API the
//! dashboard, reports and inventory views render from.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         chickhub-ledger                                 │
//! │                                                                         │
//! │   ┌──────────────┐   load / mutate   ┌──────────────────┐               │
//! │   │ LedgerStore  │ ────────────────► │ LedgerBackend    │ ── SQLite     │
//! │   │              │ ◄──────────────── │ (chickhub-db)    │               │
//! │   │  RwLock<     │     echoes        └──────────────────┘               │
//! │   │   state>     │                                                      │
//! │   │              │ ── post ──► Notifier (single message, TTL)           │
//! │   └──────┬───────┘                                                      │
//! │          │ read accessors (aggregates from chickhub-core)               │
//! │          ▼                                                              │
//! │   presentation layer (apps/cli)                                         │
//! │                                                                         │
//! │   LedgerConfig: defaults → chickhub.toml → CHICKHUB_* env               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust,ignore
//! let db = Database::new(DbConfig::new(path)).await?;
//! let store = LedgerStore::from_config(db, &config);
//! store.load().await?;
//! println!("Profit: {}", store.total_profit());
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod notification;
pub mod store;

pub use backend::LedgerBackend;
pub use config::LedgerConfig;
pub use error::{LedgerError, LedgerResult, Operation};
pub use notification::{Notification, Notifier, Severity, DEFAULT_NOTIFICATION_TTL};
pub use store::{LedgerSnapshot, LedgerStore, LedgerSummary, LOAD_FAILURE_MESSAGE};
