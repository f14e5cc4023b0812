//! # Persistence Backend
//!
//! The store talks to its system of record only through [`LedgerBackend`].
//!
//! ```text
//! ┌──────────────────┐        LedgerBackend         ┌──────────────────────┐
//! │   LedgerStore    │ ───────────────────────────► │ chickhub_db::Database│
//! │                  │  list_* / create_* /         │ (SQLite)             │
//! │                  │  update_menu_item /          └──────────────────────┘
//! │                  │  delete_menu_item            ┌──────────────────────┐
//! │                  │ ───────────────────────────► │ test doubles         │
//! └──────────────────┘                              └──────────────────────┘
//! ```
//!
//! `list_*` results arrive most-recent-first; the store keeps that order but
//! does not depend on it for any aggregate.

use std::future::Future;

use chickhub_core::{
    Expense, InventoryLevel, MenuItem, MenuItemPatch, NewExpense, NewMenuItem, NewSale, Sale,
};
use chickhub_db::{Database, DbError};

/// CRUD contract of the persistence service.
pub trait LedgerBackend: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn list_sales(&self) -> impl Future<Output = Result<Vec<Sale>, Self::Error>> + Send;

    fn list_expenses(&self) -> impl Future<Output = Result<Vec<Expense>, Self::Error>> + Send;

    fn list_menu_items(&self)
        -> impl Future<Output = Result<Vec<MenuItem>, Self::Error>> + Send;

    /// The stock singleton, `None` if no expense was ever recorded.
    fn get_inventory(
        &self,
    ) -> impl Future<Output = Result<Option<InventoryLevel>, Self::Error>> + Send;

    fn create_sale(&self, sale: NewSale)
        -> impl Future<Output = Result<Sale, Self::Error>> + Send;

    /// Persists the expense and adds its `chicken_weight` to the stock
    /// singleton, creating the singleton if absent.
    fn create_expense(
        &self,
        expense: NewExpense,
    ) -> impl Future<Output = Result<Expense, Self::Error>> + Send;

    fn create_menu_item(
        &self,
        item: NewMenuItem,
    ) -> impl Future<Output = Result<MenuItem, Self::Error>> + Send;

    fn update_menu_item(
        &self,
        id: &str,
        patch: &MenuItemPatch,
    ) -> impl Future<Output = Result<MenuItem, Self::Error>> + Send;

    /// Deleting an absent id succeeds.
    fn delete_menu_item(&self, id: &str) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

// =============================================================================
// SQLite Implementation
// =============================================================================

impl LedgerBackend for Database {
    type Error = DbError;

    async fn list_sales(&self) -> Result<Vec<Sale>, DbError> {
        self.sales().list().await
    }

    async fn list_expenses(&self) -> Result<Vec<Expense>, DbError> {
        self.expenses().list().await
    }

    async fn list_menu_items(&self) -> Result<Vec<MenuItem>, DbError> {
        self.menu().list().await
    }

    async fn get_inventory(&self) -> Result<Option<InventoryLevel>, DbError> {
        self.inventory().get().await
    }

    async fn create_sale(&self, sale: NewSale) -> Result<Sale, DbError> {
        self.sales().create(sale).await
    }

    async fn create_expense(&self, expense: NewExpense) -> Result<Expense, DbError> {
        let (expense, _level) = self.expenses().create(expense).await?;
        Ok(expense)
    }

    async fn create_menu_item(&self, item: NewMenuItem) -> Result<MenuItem, DbError> {
        self.menu().create(item).await
    }

    async fn update_menu_item(&self, id: &str, patch: &MenuItemPatch) -> Result<MenuItem, DbError> {
        self.menu().update(id, patch).await
    }

    async fn delete_menu_item(&self, id: &str) -> Result<(), DbError> {
        self.menu().delete(id).await?;
        Ok(())
    }
}
