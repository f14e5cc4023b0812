//! # Inventory Repository
//!
//! The single stock row. It is created lazily by the first expense and only
//! ever moves by read-modify-write increments.
//!
//! ```text
//! add_expense(weight = w)
//!   ├── SELECT chicken_stock_grams FROM inventory WHERE id = 'main'
//!   ├── row missing?  INSERT ('main', w)
//!   └── row present?  UPDATE ... SET chicken_stock_grams = current + w
//! ```

use chickhub_core::InventoryLevel;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Primary key of the singleton inventory row.
pub const INVENTORY_ID: &str = "main";

#[derive(Debug, FromRow)]
struct InventoryRow {
    id: String,
    chicken_stock_grams: i64,
    updated_at: DateTime<Utc>,
}

impl From<InventoryRow> for InventoryLevel {
    fn from(row: InventoryRow) -> Self {
        InventoryLevel {
            id: row.id,
            chicken_stock_grams: row.chicken_stock_grams,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for the inventory singleton.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        InventoryRepository { pool }
    }

    /// The stock row, or `None` before the first expense.
    pub async fn get(&self) -> DbResult<Option<InventoryLevel>> {
        let mut conn = self.pool.acquire().await?;
        fetch(&mut *conn).await
    }

    /// Adds `grams` to the stock, creating the row if it is absent.
    pub async fn add_stock(&self, grams: i64) -> DbResult<InventoryLevel> {
        let mut tx = self.pool.begin().await?;
        let level = add_stock_in(&mut *tx, grams).await?;
        tx.commit().await?;
        Ok(level)
    }
}

async fn fetch(conn: &mut SqliteConnection) -> DbResult<Option<InventoryLevel>> {
    let row: Option<InventoryRow> = sqlx::query_as(
        "SELECT id, chicken_stock_grams, updated_at FROM inventory WHERE id = ?1",
    )
    .bind(INVENTORY_ID)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(row.map(InventoryLevel::from))
}

/// Read-modify-write increment on an open connection, so callers can run it
/// inside their own transaction.
pub(crate) async fn add_stock_in(
    conn: &mut SqliteConnection,
    grams: i64,
) -> DbResult<InventoryLevel> {
    let now = Utc::now();

    let level = match fetch(conn).await? {
        Some(current) => {
            let stock = current
                .chicken_stock_grams
                .checked_add(grams)
                .ok_or_else(|| DbError::ConstraintViolation {
                    message: "chicken_stock_grams out of range".to_string(),
                })?;
            sqlx::query(
                "UPDATE inventory SET chicken_stock_grams = ?1, updated_at = ?2 WHERE id = ?3",
            )
            .bind(stock)
            .bind(now)
            .bind(INVENTORY_ID)
            .execute(&mut *conn)
            .await?;

            InventoryLevel {
                id: current.id,
                chicken_stock_grams: stock,
                updated_at: now,
            }
        }
        None => {
            sqlx::query(
                "INSERT INTO inventory (id, chicken_stock_grams, updated_at) VALUES (?1, ?2, ?3)",
            )
            .bind(INVENTORY_ID)
            .bind(grams)
            .bind(now)
            .execute(&mut *conn)
            .await?;

            InventoryLevel {
                id: INVENTORY_ID.to_string(),
                chicken_stock_grams: grams,
                updated_at: now,
            }
        }
    };

    debug!(
        added = grams,
        stock = level.chicken_stock_grams,
        "Inventory updated"
    );

    Ok(level)
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};

    #[tokio::test]
    async fn test_absent_until_first_increment() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.inventory().get().await.unwrap().is_none());

        let level = db.inventory().add_stock(500).await.unwrap();
        assert_eq!(level.chicken_stock_grams, 500);

        let level = db.inventory().add_stock(250).await.unwrap();
        assert_eq!(level.chicken_stock_grams, 750);

        let stored = db.inventory().get().await.unwrap().unwrap();
        assert_eq!(stored.chicken_stock_grams, 750);
        assert_eq!(stored.id, super::INVENTORY_ID);
    }

    #[tokio::test]
    async fn test_overflowing_increment_is_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.inventory().add_stock(i64::MAX).await.unwrap();

        let result = db.inventory().add_stock(1).await;
        assert!(matches!(result, Err(DbError::ConstraintViolation { .. })));

        let stored = db.inventory().get().await.unwrap().unwrap();
        assert_eq!(stored.chicken_stock_grams, i64::MAX);
    }
}
