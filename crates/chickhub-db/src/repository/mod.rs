//! # Repository Module
//!
//! Database repository implementations for ChickHub.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Persistence Contract                                 │
//! │                                                                         │
//! │  Record        list()   create()   update(id, patch)   delete(id)      │
//! │  ──────        ──────   ────────   ─────────────────   ──────────      │
//! │  Sale            ✓         ✓                                            │
//! │  Expense         ✓         ✓ (+ inventory increment, one transaction)  │
//! │  MenuItem        ✓         ✓              ✓                ✓            │
//! │  Inventory     get()    add_stock()                                     │
//! │                                                                         │
//! │  list() returns most-recent-first.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`SaleRepository`](sale::SaleRepository) - Sales
//! - [`ExpenseRepository`](expense::ExpenseRepository) - Expenses and the stock increment
//! - [`MenuRepository`](menu::MenuRepository) - Menu item CRUD
//! - [`InventoryRepository`](inventory::InventoryRepository) - The singleton stock row

pub mod expense;
pub mod inventory;
pub mod menu;
pub mod sale;
