//! # chickhub-db: Database Layer for ChickHub
//!
//! This crate is the persistence service behind the ledger store. It uses
//! SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ChickHub Data Flow                               │
//! │                                                                         │
//! │  LedgerStore::add_expense                                              │
//! │       │  (via the LedgerBackend trait)                                  │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   chickhub-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │   │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                │   │  (embedded)  │  │   │
//! │  │   │               │    │ SaleRepo       │   │ 001_initial  │  │   │
//! │  │   │ SqlitePool    │◄───│ ExpenseRepo    │   │ _schema.sql  │  │   │
//! │  │   │               │    │ MenuRepo       │   │              │  │   │
//! │  │   │               │    │ InventoryRepo  │   │              │  │   │
//! │  │   └───────────────┘    └────────────────┘   └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ~/.local/share/chickhub/chickhub.db                           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (sale, expense, menu, inventory)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use chickhub_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("chickhub.db")).await?;
//!
//! let sales = db.sales().list().await?;
//! let stock = db.inventory().get().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::expense::ExpenseRepository;
pub use repository::inventory::InventoryRepository;
pub use repository::menu::MenuRepository;
pub use repository::sale::SaleRepository;
