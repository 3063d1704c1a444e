//! Inventory repository

use serde::Serialize;
use uuid::Uuid;

use super::DbPool;
use crate::{Error, Result};

/// A stocked inventory item
#[derive(Debug, Clone, Serialize)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub quantity: i64,
    pub location: Option<String>,
}

/// Inventory repository
#[derive(Clone)]
pub struct InventoryRepo {
    pool: DbPool,
}

impl InventoryRepo {
    /// Create a new inventory repository
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Add an item
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails
    pub fn create(&self, name: &str, quantity: i64, location: Option<&str>) -> Result<InventoryItem> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        let id = Uuid::new_v4().to_string();
        conn.execute(
            "INSERT INTO inventory (id, name, quantity, location) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![id, name, quantity, location],
        )
        .map_err(|e| Error::Database(e.to_string()))?;

        Ok(InventoryItem {
            id,
            name: name.to_string(),
            quantity,
            location: location.map(ToString::to_string),
        })
    }

    /// List all items
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails
    pub fn list_all(&self) -> Result<Vec<InventoryItem>> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        let mut stmt = conn
            .prepare("SELECT id, name, quantity, location FROM inventory ORDER BY name")
            .map_err(|e| Error::Database(e.to_string()))?;

        let items = stmt
            .query_map([], Self::row_to_item)
            .map_err(|e| Error::Database(e.to_string()))?
            .filter_map(std::result::Result::ok)
            .collect();

        Ok(items)
    }

    /// Update an item
    ///
    /// # Errors
    ///
    /// Returns error if the item does not exist or the operation fails
    pub fn update(&self, id: &str, name: &str, quantity: i64, location: Option<&str>) -> Result<InventoryItem> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        let changed = conn
            .execute(
                "UPDATE inventory SET name = ?1, quantity = ?2, location = ?3 WHERE id = ?4",
                rusqlite::params![name, quantity, location, id],
            )
            .map_err(|e| Error::Database(e.to_string()))?;

        if changed == 0 {
            return Err(Error::NotFound(format!("inventory item {id}")));
        }

        conn.query_row(
            "SELECT id, name, quantity, location FROM inventory WHERE id = ?1",
            [id],
            Self::row_to_item,
        )
        .map_err(|e| Error::Database(e.to_string()))
    }

    /// Delete an item
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails
    pub fn delete(&self, id: &str) -> Result<()> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        conn.execute("DELETE FROM inventory WHERE id = ?1", [id])
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }

    fn row_to_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<InventoryItem> {
        Ok(InventoryItem {
            id: row.get(0)?,
            name: row.get(1)?,
            quantity: row.get(2)?,
            location: row.get(3)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory;

    #[test]
    fn test_crud_roundtrip() {
        let repo = InventoryRepo::new(init_memory().unwrap());

        let item = repo.create("Syringes", 200, Some("Store B")).unwrap();
        assert_eq!(item.quantity, 200);

        let item = repo.update(&item.id, "Syringes", 150, Some("Store A")).unwrap();
        assert_eq!(item.quantity, 150);
        assert_eq!(item.location.as_deref(), Some("Store A"));

        repo.delete(&item.id).unwrap();
        assert!(repo.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_update_missing_item() {
        let repo = InventoryRepo::new(init_memory().unwrap());
        assert!(repo.update("missing", "x", 1, None).is_err());
    }
}
