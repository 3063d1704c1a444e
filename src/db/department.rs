//! Department repository

use serde::Serialize;
use uuid::Uuid;

use super::DbPool;
use crate::{Error, Result};

/// A hospital department
#[derive(Debug, Clone, Serialize)]
pub struct Department {
    pub id: String,
    pub name: String,
}

/// Department repository
#[derive(Clone)]
pub struct DepartmentRepo {
    pool: DbPool,
}

impl DepartmentRepo {
    /// Create a new department repository
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a department
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails
    pub fn create(&self, name: &str) -> Result<Department> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        let id = Uuid::new_v4().to_string();
        conn.execute("INSERT INTO departments (id, name) VALUES (?1, ?2)", [&id, name])
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(Department {
            id,
            name: name.to_string(),
        })
    }

    /// List all departments
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails
    pub fn list_all(&self) -> Result<Vec<Department>> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        let mut stmt = conn
            .prepare("SELECT id, name FROM departments ORDER BY name")
            .map_err(|e| Error::Database(e.to_string()))?;

        let departments = stmt
            .query_map([], |row| {
                Ok(Department {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })
            .map_err(|e| Error::Database(e.to_string()))?
            .filter_map(std::result::Result::ok)
            .collect();

        Ok(departments)
    }

    /// Find a department by name (returns None if not found)
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails
    pub fn find_by_name(&self, name: &str) -> Result<Option<Department>> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        let department = conn
            .query_row("SELECT id, name FROM departments WHERE name = ?1", [name], |row| {
                Ok(Department {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })
            .ok();

        Ok(department)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory;

    #[test]
    fn test_create_and_list() {
        let repo = DepartmentRepo::new(init_memory().unwrap());

        repo.create("Oncology").unwrap();
        repo.create("Dermatology").unwrap();

        let all = repo.list_all().unwrap();
        assert_eq!(all.len(), 2);
        // Ordered by name
        assert_eq!(all[0].name, "Dermatology");
    }

    #[test]
    fn test_find_by_name() {
        let repo = DepartmentRepo::new(init_memory().unwrap());

        repo.create("Gynecology").unwrap();
        assert!(repo.find_by_name("Gynecology").unwrap().is_some());
        assert!(repo.find_by_name("Cardiology").unwrap().is_none());
    }
}
