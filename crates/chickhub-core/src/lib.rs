//! # chickhub-core: Pure Business Logic for ChickHub
//!
//! This crate holds the record types and every derivation the ledger needs,
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ChickHub Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation (CLI / any UI)                        │   │
//! │  │     Billing ──► Inventory ──► Reports ──► Configure             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 chickhub-ledger (LedgerStore)                   │   │
//! │  │    load, add_sale, add_expense, menu CRUD, read accessors      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ chickhub-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌────────┐ ┌───────────┐ ┌─────────┐ ┌───────┐  │   │
//! │  │   │  types  │ │ money  │ │ aggregate │ │ planner │ │ bill  │  │   │
//! │  │   │  Sale   │ │ Money  │ │ totals    │ │ packs   │ │ Bill  │  │   │
//! │  │   │ Expense │ │        │ │ daily     │ │         │ │       │  │   │
//! │  │   └─────────┘ └────────┘ └───────────┘ └─────────┘ └───────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Record types (Sale, Expense, MenuItem, InventoryLevel)
//! - [`money`] - Money type with integer arithmetic (paise, no floats)
//! - [`aggregate`] - Revenue, expense, profit and the daily series
//! - [`planner`] - Pack suggestions from chicken stock
//! - [`bill`] - Builds a sale from menu items picked at the counter
//! - [`validation`] - Business rule validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chickhub_core::planner::pack_suggestions;
//!
//! let packs = pack_suggestions(250);
//! assert_eq!(packs.packs_100g, 2);
//! assert_eq!(packs.mixed.packs_20g, 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregate;
pub mod bill;
pub mod error;
pub mod money;
pub mod planner;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Calendar-day format used for every `date` field (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Cost of one tea cup, applied before an expense is stored (₹1.50).
pub const DEFAULT_TEA_CUP_RATE: Money = Money::from_paise(150);

/// Maximum length of a menu item name.
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum distinct lines on a single bill.
pub const MAX_BILL_LINES: usize = 50;
