//! # Menu Repository
//!
//! Full CRUD for menu items. Sales never reference these rows, so edits and
//! deletes leave sales history alone.

use chickhub_core::{MenuCategory, MenuItem, MenuItemPatch, Money, NewMenuItem};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};

#[derive(Debug, FromRow)]
struct MenuItemRow {
    id: String,
    name: String,
    category: MenuCategory,
    price: Money,
    created_at: DateTime<Utc>,
}

impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        MenuItem {
            id: row.id,
            name: row.name,
            category: row.category,
            price: row.price,
            created_at: row.created_at,
        }
    }
}

/// Repository for menu item operations.
#[derive(Debug, Clone)]
pub struct MenuRepository {
    pool: SqlitePool,
}

impl MenuRepository {
    pub fn new(pool: SqlitePool) -> Self {
        MenuRepository { pool }
    }

    /// All menu items, most recent first.
    pub async fn list(&self) -> DbResult<Vec<MenuItem>> {
        let rows: Vec<MenuItemRow> = sqlx::query_as(
            r#"
            SELECT id, name, category, price, created_at
            FROM menu_items
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Fetched menu items");

        Ok(rows.into_iter().map(MenuItem::from).collect())
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<MenuItem>> {
        let row: Option<MenuItemRow> = sqlx::query_as(
            "SELECT id, name, category, price, created_at FROM menu_items WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(MenuItem::from))
    }

    pub async fn create(&self, new_item: NewMenuItem) -> DbResult<MenuItem> {
        let item = new_item.into_menu_item(Uuid::new_v4().to_string(), Utc::now());

        debug!(id = %item.id, name = %item.name, price = %item.price, "Inserting menu item");

        sqlx::query(
            r#"
            INSERT INTO menu_items (id, name, category, price, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(item.category)
        .bind(item.price)
        .bind(item.created_at)
        .execute(&self.pool)
        .await?;

        Ok(item)
    }

    /// Applies `patch` to the item with `id` and returns the updated item.
    ///
    /// ## Errors
    /// `DbError::NotFound` when no item has that id.
    pub async fn update(&self, id: &str, patch: &MenuItemPatch) -> DbResult<MenuItem> {
        let mut tx = self.pool.begin().await?;

        let current: Option<MenuItemRow> = sqlx::query_as(
            "SELECT id, name, category, price, created_at FROM menu_items WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let current = current
            .map(MenuItem::from)
            .ok_or_else(|| DbError::not_found("MenuItem", id))?;
        let updated = patch.apply_to(&current);

        sqlx::query("UPDATE menu_items SET name = ?1, category = ?2, price = ?3 WHERE id = ?4")
            .bind(&updated.name)
            .bind(updated.category)
            .bind(updated.price)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!(id = %id, "Updated menu item");
        Ok(updated)
    }

    /// Deletes the item with `id`. Returns whether a row was removed;
    /// deleting an absent id is not an error.
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let removed = result.rows_affected() > 0;
        debug!(id = %id, removed, "Deleted menu item");
        Ok(removed)
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_items")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    fn new_item(name: &str, category: MenuCategory, rupees: i64) -> NewMenuItem {
        NewMenuItem {
            name: name.to_string(),
            category,
            price: Money::from_rupees(rupees),
        }
    }

    #[tokio::test]
    async fn test_crud_cycle() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.menu();

        let item = repo
            .create(new_item("Chicken Biryani", MenuCategory::MainCourse, 150))
            .await
            .unwrap();

        let fetched = repo.get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(fetched.category, MenuCategory::MainCourse);

        let patch = MenuItemPatch {
            price: Some(Money::from_rupees(160)),
            ..Default::default()
        };
        let updated = repo.update(&item.id, &patch).await.unwrap();
        assert_eq!(updated.name, "Chicken Biryani");
        assert_eq!(updated.price, Money::from_rupees(160));

        assert!(repo.delete(&item.id).await.unwrap());
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let patch = MenuItemPatch {
            name: Some("Tea".to_string()),
            ..Default::default()
        };

        let err = db.menu().update("missing", &patch).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_missing_is_noop() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.menu()
            .create(new_item("Tea", MenuCategory::Beverages, 10))
            .await
            .unwrap();

        assert!(!db.menu().delete("missing").await.unwrap());
        assert_eq!(db.menu().count().await.unwrap(), 1);
    }
}
