//! # Ledger Store
//!
//! The in-memory copy of the stall's books, kept in step with the backend.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         add_sale(input)                                 │
//! │                                                                         │
//! │  1. validate_new_sale(input) ──── Err ──► notify "Failed to add sale"  │
//! │          │                                return Mutation error        │
//! │          ▼                                                              │
//! │  2. backend.create_sale(input) ── Err ──► (same)                       │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  3. echo.is_balanced()? ───────── no ───► (same)                       │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  4. prepend echo to sales, notify "Sale added successfully!"           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Collections change only after the backend confirms; there is no
//! optimistic insert and no retry. `add_expense` additionally bumps the local
//! stock figure by the expense's chicken weight instead of re-fetching it.
//!
//! State sits behind a `std::sync::RwLock` that is only taken inside
//! synchronous helpers, so no guard ever lives across an `.await`.

use std::sync::{PoisonError, RwLock};

use chickhub_core::aggregate::{self, DailyEntry, ItemSales, PeriodSummary};
use chickhub_core::bill::{Bill, Customer};
use chickhub_core::planner::{self, PackSuggestions};
use chickhub_core::validation::{
    validate_menu_item_patch, validate_new_expense, validate_new_menu_item, validate_new_sale,
    ExpenseEntry,
};
use chickhub_core::{
    CoreError, Expense, MenuItem, MenuItemPatch, Money, NewExpense, NewMenuItem, NewSale,
    PaymentType, Sale, UnitPrices, ValidationError, DEFAULT_TEA_CUP_RATE,
};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::backend::LedgerBackend;
use crate::config::LedgerConfig;
use crate::error::{LedgerError, LedgerResult, Operation};
use crate::notification::{Notification, Notifier};

/// Notification text when [`LedgerStore::load`] fails.
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load data from database";

#[derive(Debug, Default)]
struct LedgerState {
    sales: Vec<Sale>,
    expenses: Vec<Expense>,
    menu_items: Vec<MenuItem>,
    chicken_stock_grams: i64,
    loading: bool,
}

/// A cloned view of the collections for one render pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LedgerSnapshot {
    pub sales: Vec<Sale>,
    pub expenses: Vec<Expense>,
    pub menu_items: Vec<MenuItem>,
    pub chicken_stock_grams: i64,
}

/// Dashboard figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LedgerSummary {
    pub revenue: Money,
    pub expenses: Money,
    pub profit: Money,
    pub profit_margin: f64,
    pub chicken_stock_grams: i64,
}

pub struct LedgerStore<B: LedgerBackend> {
    backend: B,
    state: RwLock<LedgerState>,
    notifier: Notifier,
    prices: UnitPrices,
    tea_cup_rate: Money,
}

impl<B: LedgerBackend> LedgerStore<B> {
    /// Empty store with default prices and notification window.
    pub fn new(backend: B) -> Self {
        LedgerStore {
            backend,
            state: RwLock::new(LedgerState::default()),
            notifier: Notifier::default(),
            prices: UnitPrices::default(),
            tea_cup_rate: DEFAULT_TEA_CUP_RATE,
        }
    }

    pub fn from_config(backend: B, config: &LedgerConfig) -> Self {
        LedgerStore {
            backend,
            state: RwLock::new(LedgerState::default()),
            notifier: Notifier::new(config.notification_ttl()),
            prices: config.unit_prices(),
            tea_cup_rate: config.tea_cup_rate(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Fetches all four collections concurrently and replaces the in-memory
    /// state. If any fetch fails nothing is applied.
    pub async fn load(&self) -> LedgerResult<()> {
        self.write_state(|state| state.loading = true);
        debug!("Loading ledger data");

        let (sales, expenses, menu_items, inventory) = tokio::join!(
            self.backend.list_sales(),
            self.backend.list_expenses(),
            self.backend.list_menu_items(),
            self.backend.get_inventory(),
        );

        let fetched = (|| -> Result<_, B::Error> {
            Ok((sales?, expenses?, menu_items?, inventory?))
        })();

        match fetched {
            Ok((sales, expenses, menu_items, inventory)) => {
                let stock = inventory.map(|level| level.chicken_stock_grams).unwrap_or(0);
                info!(
                    sales = sales.len(),
                    expenses = expenses.len(),
                    menu_items = menu_items.len(),
                    chicken_stock_grams = stock,
                    "Ledger loaded"
                );

                self.write_state(|state| {
                    state.sales = sales;
                    state.expenses = expenses;
                    state.menu_items = menu_items;
                    state.chicken_stock_grams = stock;
                    state.loading = false;
                });
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Failed to load ledger data");
                self.write_state(|state| state.loading = false);
                self.notifier.error(LOAD_FAILURE_MESSAGE);
                Err(LedgerError::load(e))
            }
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub async fn add_sale(&self, sale: NewSale) -> LedgerResult<Sale> {
        let op = Operation::AddSale;

        if let Err(e) = validate_new_sale(&sale) {
            return Err(self.reject(op, e));
        }

        let saved = match self.backend.create_sale(sale).await {
            Ok(saved) => saved,
            Err(e) => return Err(self.reject(op, e)),
        };

        if !saved.is_balanced() {
            let mismatch = CoreError::PaymentMismatch {
                cash: saved.cash.paise(),
                upi: saved.upi.paise(),
                total: saved.total.paise(),
            };
            return Err(self.reject(op, mismatch));
        }

        info!(id = %saved.id, total = %saved.total, "Sale added");
        self.write_state(|state| state.sales.insert(0, saved.clone()));
        self.notifier.success(op.success_message());
        Ok(saved)
    }

    /// Books the expense and adds its chicken weight to the local stock.
    /// An expense with no chicken (0 g) leaves the stock as it is.
    pub async fn add_expense(&self, expense: NewExpense) -> LedgerResult<Expense> {
        let op = Operation::AddExpense;

        if let Err(e) = validate_new_expense(&expense) {
            return Err(self.reject(op, e));
        }

        let weight = expense.chicken_weight;
        if self.chicken_stock_grams().checked_add(weight).is_none() {
            return Err(self.reject(op, ValidationError::too_large("chicken_weight")));
        }

        let saved = match self.backend.create_expense(expense).await {
            Ok(saved) => saved,
            Err(e) => return Err(self.reject(op, e)),
        };

        if !saved.is_balanced() {
            let mismatch = CoreError::ExpenseTotalMismatch {
                total: saved.total.paise(),
                sum: saved.cost_fields_sum().paise(),
            };
            return Err(self.reject(op, mismatch));
        }

        info!(id = %saved.id, total = %saved.total, grams = weight, "Expense added");
        self.write_state(|state| {
            state.expenses.insert(0, saved.clone());
            state.chicken_stock_grams = state.chicken_stock_grams.saturating_add(weight);
        });
        self.notifier.success(op.success_message());
        Ok(saved)
    }

    /// Prices the tea cups at the configured rate, totals the entry and books it.
    pub async fn record_expense(&self, entry: ExpenseEntry) -> LedgerResult<Expense> {
        match entry.into_new_expense(self.tea_cup_rate) {
            Ok(expense) => self.add_expense(expense).await,
            Err(e) => Err(self.reject(Operation::AddExpense, e)),
        }
    }

    /// Turns a bill into a sale paid entirely by `payment_type` and books it.
    pub async fn charge_bill(
        &self,
        bill: &Bill,
        date: &str,
        customer: Customer,
        payment_type: PaymentType,
    ) -> LedgerResult<Sale> {
        match bill.to_new_sale(date, customer, payment_type) {
            Ok(sale) => {
                debug!(lines = bill.lines.len(), total = %bill.total(), "Charging bill");
                self.add_sale(sale).await
            }
            Err(e) => Err(self.reject(Operation::AddSale, e)),
        }
    }

    pub async fn add_menu_item(&self, item: NewMenuItem) -> LedgerResult<MenuItem> {
        let op = Operation::AddMenuItem;

        if let Err(e) = validate_new_menu_item(&item) {
            return Err(self.reject(op, e));
        }

        match self.backend.create_menu_item(item).await {
            Ok(saved) => {
                info!(id = %saved.id, name = %saved.name, "Menu item added");
                self.write_state(|state| state.menu_items.insert(0, saved.clone()));
                self.notifier.success(op.success_message());
                Ok(saved)
            }
            Err(e) => Err(self.reject(op, e)),
        }
    }

    /// Replaces the record matching `id` with the backend's echo.
    pub async fn update_menu_item(&self, id: &str, patch: MenuItemPatch) -> LedgerResult<MenuItem> {
        let op = Operation::UpdateMenuItem;

        if let Err(e) = validate_menu_item_patch(&patch) {
            return Err(self.reject(op, e));
        }

        match self.backend.update_menu_item(id, &patch).await {
            Ok(saved) => {
                info!(id = %saved.id, "Menu item updated");
                self.write_state(|state| {
                    if let Some(slot) = state.menu_items.iter_mut().find(|m| m.id == id) {
                        *slot = saved.clone();
                    }
                });
                self.notifier.success(op.success_message());
                Ok(saved)
            }
            Err(e) => Err(self.reject(op, e)),
        }
    }

    /// Removes the record matching `id`. An unknown id is not an error.
    pub async fn delete_menu_item(&self, id: &str) -> LedgerResult<()> {
        let op = Operation::DeleteMenuItem;

        match self.backend.delete_menu_item(id).await {
            Ok(()) => {
                let removed = self.write_state(|state| {
                    let before = state.menu_items.len();
                    state.menu_items.retain(|m| m.id != id);
                    before - state.menu_items.len()
                });
                info!(id = %id, removed, "Menu item deleted");
                self.notifier.success(op.success_message());
                Ok(())
            }
            Err(e) => Err(self.reject(op, e)),
        }
    }

    // =========================================================================
    // Read Accessors
    // =========================================================================

    pub fn sales(&self) -> Vec<Sale> {
        self.read_state(|state| state.sales.clone())
    }

    pub fn expenses(&self) -> Vec<Expense> {
        self.read_state(|state| state.expenses.clone())
    }

    pub fn menu_items(&self) -> Vec<MenuItem> {
        self.read_state(|state| state.menu_items.clone())
    }

    pub fn chicken_stock_grams(&self) -> i64 {
        self.read_state(|state| state.chicken_stock_grams)
    }

    pub fn stock_kg(&self) -> f64 {
        planner::stock_kg(self.chicken_stock_grams())
    }

    pub fn pack_suggestions(&self) -> PackSuggestions {
        planner::pack_suggestions(self.chicken_stock_grams())
    }

    pub fn total_revenue(&self) -> Money {
        self.read_state(|state| aggregate::total_revenue(&state.sales))
    }

    pub fn total_expenses(&self) -> Money {
        self.read_state(|state| aggregate::total_expenses(&state.expenses))
    }

    pub fn total_profit(&self) -> Money {
        self.read_state(|state| aggregate::total_profit(&state.sales, &state.expenses))
    }

    /// Profit as a percentage of revenue; `0.0` with no revenue.
    pub fn profit_margin(&self) -> f64 {
        self.summary().profit_margin
    }

    pub fn daily_series(&self) -> Vec<DailyEntry> {
        self.read_state(|state| aggregate::daily_series(&state.sales, &state.expenses))
    }

    /// Sales report totals for `start..=end`.
    pub fn period_summary(&self, start: NaiveDate, end: NaiveDate) -> PeriodSummary {
        self.read_state(|state| {
            aggregate::period_summary(&state.sales, &state.expenses, start, end)
        })
    }

    pub fn item_sales(&self) -> Vec<ItemSales> {
        self.read_state(|state| aggregate::item_sales(&state.sales, &self.prices))
    }

    pub fn summary(&self) -> LedgerSummary {
        self.read_state(|state| {
            let revenue = aggregate::total_revenue(&state.sales);
            let expenses = aggregate::total_expenses(&state.expenses);
            let profit = revenue - expenses;
            LedgerSummary {
                revenue,
                expenses,
                profit,
                profit_margin: aggregate::profit_margin(revenue, profit),
                chicken_stock_grams: state.chicken_stock_grams,
            }
        })
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        self.read_state(|state| LedgerSnapshot {
            sales: state.sales.clone(),
            expenses: state.expenses.clone(),
            menu_items: state.menu_items.clone(),
            chicken_stock_grams: state.chicken_stock_grams,
        })
    }

    pub fn is_loading(&self) -> bool {
        self.read_state(|state| state.loading)
    }

    /// The current notification, if it has not expired.
    pub fn notification(&self) -> Option<Notification> {
        self.notifier.current()
    }

    pub fn clear_notification(&self) {
        self.notifier.clear();
    }

    pub fn unit_prices(&self) -> UnitPrices {
        self.prices
    }

    pub fn tea_cup_rate(&self) -> Money {
        self.tea_cup_rate
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn read_state<R>(&self, f: impl FnOnce(&LedgerState) -> R) -> R {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    fn write_state<R>(&self, f: impl FnOnce(&mut LedgerState) -> R) -> R {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    /// Logs a failed mutation and posts its error notification.
    fn reject<E>(&self, operation: Operation, source: E) -> LedgerError
    where
        E: Into<crate::error::BoxError>,
    {
        let err = LedgerError::mutation(operation, source);
        error!(operation = %operation, error = %err, "Mutation failed");
        self.notifier.error(operation.failure_message());
        err
    }
}
