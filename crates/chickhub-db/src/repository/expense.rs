//! # Expense Repository
//!
//! Recording an expense also buys stock: the insert and the inventory
//! increment commit together or not at all.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BEGIN                                                                  │
//! │    INSERT INTO expenses (...)                                           │
//! │    inventory.chicken_stock_grams += chicken_weight                      │
//! │  COMMIT                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chickhub_core::{Expense, InventoryLevel, Money, NewExpense};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use crate::repository::inventory::add_stock_in;

#[derive(Debug, FromRow)]
struct ExpenseRow {
    id: String,
    date: String,
    chicken_weight: i64,
    chicken_cost: Money,
    masala: Money,
    oil: Money,
    gas: Money,
    tea_cups: Money,
    breading: Money,
    total: Money,
    created_at: DateTime<Utc>,
}

impl From<ExpenseRow> for Expense {
    fn from(row: ExpenseRow) -> Self {
        Expense {
            id: row.id,
            date: row.date,
            chicken_weight: row.chicken_weight,
            chicken_cost: row.chicken_cost,
            masala: row.masala,
            oil: row.oil,
            gas: row.gas,
            tea_cups: row.tea_cups,
            breading: row.breading,
            total: row.total,
            created_at: row.created_at,
        }
    }
}

/// Repository for expense database operations.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    pool: SqlitePool,
}

impl ExpenseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ExpenseRepository { pool }
    }

    /// All expenses, most recent first.
    pub async fn list(&self) -> DbResult<Vec<Expense>> {
        let rows: Vec<ExpenseRow> = sqlx::query_as(
            r#"
            SELECT id, date, chicken_weight, chicken_cost, masala, oil, gas,
                   tea_cups, breading, total, created_at
            FROM expenses
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Fetched expenses");

        Ok(rows.into_iter().map(Expense::from).collect())
    }

    /// Inserts an expense and adds its chicken weight to the stock in one
    /// transaction. Returns the stored expense and the new stock level.
    pub async fn create(&self, new_expense: NewExpense) -> DbResult<(Expense, InventoryLevel)> {
        let expense = new_expense.into_expense(Uuid::new_v4().to_string(), Utc::now());

        debug!(
            id = %expense.id,
            date = %expense.date,
            chicken_weight = expense.chicken_weight,
            total = %expense.total,
            "Inserting expense"
        );

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO expenses (
                id, date, chicken_weight, chicken_cost, masala, oil, gas,
                tea_cups, breading, total, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&expense.id)
        .bind(&expense.date)
        .bind(expense.chicken_weight)
        .bind(expense.chicken_cost)
        .bind(expense.masala)
        .bind(expense.oil)
        .bind(expense.gas)
        .bind(expense.tea_cups)
        .bind(expense.breading)
        .bind(expense.total)
        .bind(expense.created_at)
        .execute(&mut *tx)
        .await?;

        let level = add_stock_in(&mut *tx, expense.chicken_weight).await?;

        tx.commit().await?;

        Ok((expense, level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig, DbError};

    fn new_expense(weight: i64, cost: i64) -> NewExpense {
        NewExpense {
            date: "2024-01-01".to_string(),
            chicken_weight: weight,
            chicken_cost: Money::from_rupees(cost),
            masala: Money::from_rupees(10),
            oil: Money::zero(),
            gas: Money::zero(),
            tea_cups: Money::from_paise(150),
            breading: Money::zero(),
            total: Money::from_rupees(cost + 10) + Money::from_paise(150),
        }
    }

    #[tokio::test]
    async fn test_create_increments_stock() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.expenses();

        let (expense, level) = repo.create(new_expense(500, 80)).await.unwrap();
        assert_eq!(level.chicken_stock_grams, 500);

        let (_, level) = repo.create(new_expense(1200, 200)).await.unwrap();
        assert_eq!(level.chicken_stock_grams, 1700);

        let expenses = repo.list().await.unwrap();
        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[1].id, expense.id);
        assert_eq!(expenses[1].tea_cups, Money::from_paise(150));
        assert!(expenses.iter().all(|e| e.is_balanced()));
    }

    #[tokio::test]
    async fn test_failed_insert_leaves_stock_untouched() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.expenses().create(new_expense(300, 50)).await.unwrap();

        let mut bad = new_expense(400, 60);
        bad.masala = Money::from_rupees(-1);
        let err = db.expenses().create(bad).await.unwrap_err();
        assert!(matches!(err, DbError::ConstraintViolation { .. }));

        let level = db.inventory().get().await.unwrap().unwrap();
        assert_eq!(level.chicken_stock_grams, 300);
        assert_eq!(db.expenses().list().await.unwrap().len(), 1);
    }
}
