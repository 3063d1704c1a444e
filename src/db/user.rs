//! User repository for staff account management
//!
//! Accounts carry a username and a role only. Authentication is not part of
//! this service; no credential material is stored or compared.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{DbPool, parse_datetime};
use crate::{Error, Result};

/// A staff account
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User repository
#[derive(Clone)]
pub struct UserRepo {
    pool: DbPool,
}

impl UserRepo {
    /// Create a new user repository
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a user
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails
    pub fn create(&self, username: &str, role: &str) -> Result<User> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO users (id, username, role, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)",
            [&id, username, role, &now],
        )
        .map_err(|e| Error::Database(e.to_string()))?;

        Ok(User {
            id,
            username: username.to_string(),
            role: role.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
    }

    /// Find a user by username (returns None if not found)
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails
    pub fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        let user = conn
            .query_row(
                "SELECT id, username, role, created_at, updated_at FROM users WHERE username = ?1",
                [username],
                Self::row_to_user,
            )
            .ok();

        Ok(user)
    }

    /// List all users
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails
    pub fn list_all(&self) -> Result<Vec<User>> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        let mut stmt = conn
            .prepare("SELECT id, username, role, created_at, updated_at FROM users ORDER BY created_at DESC")
            .map_err(|e| Error::Database(e.to_string()))?;

        let users = stmt
            .query_map([], Self::row_to_user)
            .map_err(|e| Error::Database(e.to_string()))?
            .filter_map(std::result::Result::ok)
            .collect();

        Ok(users)
    }

    /// Update a user's username and role
    ///
    /// # Errors
    ///
    /// Returns error if the user does not exist or the operation fails
    pub fn update(&self, id: &str, username: &str, role: &str) -> Result<User> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;
        let now = Utc::now().to_rfc3339();

        let changed = conn
            .execute(
                "UPDATE users SET username = ?1, role = ?2, updated_at = ?3 WHERE id = ?4",
                [username, role, &now, id],
            )
            .map_err(|e| Error::Database(e.to_string()))?;

        if changed == 0 {
            return Err(Error::NotFound(format!("user {id}")));
        }

        conn.query_row(
            "SELECT id, username, role, created_at, updated_at FROM users WHERE id = ?1",
            [id],
            Self::row_to_user,
        )
        .map_err(|e| Error::Database(e.to_string()))
    }

    /// Delete a user
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails
    pub fn delete(&self, id: &str) -> Result<()> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        conn.execute("DELETE FROM users WHERE id = ?1", [id])
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }

    fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
        Ok(User {
            id: row.get(0)?,
            username: row.get(1)?,
            role: row.get(2)?,
            created_at: parse_datetime(&row.get::<_, String>(3)?),
            updated_at: parse_datetime(&row.get::<_, String>(4)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory;

    fn setup() -> UserRepo {
        let pool = init_memory().unwrap();
        UserRepo::new(pool)
    }

    #[test]
    fn test_create_and_find() {
        let repo = setup();

        let user = repo.create("frontdesk1", "receptionist").unwrap();
        assert_eq!(user.username, "frontdesk1");
        assert_eq!(user.role, "receptionist");

        let found = repo.find_by_username("frontdesk1").unwrap().unwrap();
        assert_eq!(found.id, user.id);
    }

    #[test]
    fn test_update_user() {
        let repo = setup();

        let user = repo.create("drsharma", "doctor").unwrap();
        let updated = repo.update(&user.id, "drsharma2", "admin").unwrap();
        assert_eq!(updated.username, "drsharma2");
        assert_eq!(updated.role, "admin");
    }

    #[test]
    fn test_update_missing_user() {
        let repo = setup();
        assert!(repo.update("nope", "x", "admin").is_err());
    }

    #[test]
    fn test_delete_user() {
        let repo = setup();

        let user = repo.create("temp", "admin").unwrap();
        repo.delete(&user.id).unwrap();
        assert!(repo.find_by_username("temp").unwrap().is_none());
    }

    #[test]
    fn test_list_all() {
        let repo = setup();

        repo.create("a", "doctor").unwrap();
        repo.create("b", "receptionist").unwrap();
        assert_eq!(repo.list_all().unwrap().len(), 2);
    }
}
