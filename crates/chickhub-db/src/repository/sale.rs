//! # Sale Repository
//!
//! Sales are written once and never updated. The item counts live in a JSON
//! text column so the free-text `other` line travels with them.

use chickhub_core::{Money, NewSale, PaymentType, Sale, SaleItems};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};

/// A `sales` row as stored.
#[derive(Debug, FromRow)]
struct SaleRow {
    id: String,
    date: String,
    customer_name: Option<String>,
    customer_mobile: Option<String>,
    items_json: String,
    cash: Money,
    upi: Money,
    total: Money,
    payment_type: PaymentType,
    created_at: DateTime<Utc>,
}

impl TryFrom<SaleRow> for Sale {
    type Error = DbError;

    fn try_from(row: SaleRow) -> DbResult<Self> {
        let items: SaleItems = serde_json::from_str(&row.items_json)?;

        Ok(Sale {
            id: row.id,
            date: row.date,
            customer_name: row.customer_name,
            customer_mobile: row.customer_mobile,
            items,
            cash: row.cash,
            upi: row.upi,
            total: row.total,
            payment_type: row.payment_type,
            created_at: row.created_at,
        })
    }
}

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// All sales, most recent first.
    pub async fn list(&self) -> DbResult<Vec<Sale>> {
        let rows: Vec<SaleRow> = sqlx::query_as(
            r#"
            SELECT id, date, customer_name, customer_mobile, items_json,
                   cash, upi, total, payment_type, created_at
            FROM sales
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Fetched sales");

        rows.into_iter().map(Sale::try_from).collect()
    }

    /// Inserts a sale, assigning its id and creation timestamp.
    pub async fn create(&self, new_sale: NewSale) -> DbResult<Sale> {
        let sale = new_sale.into_sale(Uuid::new_v4().to_string(), Utc::now());
        let items_json = serde_json::to_string(&sale.items)?;

        debug!(id = %sale.id, date = %sale.date, total = %sale.total, "Inserting sale");

        sqlx::query(
            r#"
            INSERT INTO sales (
                id, date, customer_name, customer_mobile, items_json,
                cash, upi, total, payment_type, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.date)
        .bind(&sale.customer_name)
        .bind(&sale.customer_mobile)
        .bind(&items_json)
        .bind(sale.cash)
        .bind(sale.upi)
        .bind(sale.total)
        .bind(sale.payment_type)
        .bind(sale.created_at)
        .execute(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Number of stored sales.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
