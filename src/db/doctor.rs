//! Doctor repository

use serde::Serialize;
use uuid::Uuid;

use super::DbPool;
use crate::{Error, Result};

/// A practicing doctor
#[derive(Debug, Clone, Serialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialty: String,
}

/// Doctor repository
#[derive(Clone)]
pub struct DoctorRepo {
    pool: DbPool,
}

impl DoctorRepo {
    /// Create a new doctor repository
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a doctor
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails
    pub fn create(&self, name: &str, specialty: &str) -> Result<Doctor> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        let id = Uuid::new_v4().to_string();
        conn.execute(
            "INSERT INTO doctors (id, name, specialty) VALUES (?1, ?2, ?3)",
            [&id, name, specialty],
        )
        .map_err(|e| Error::Database(e.to_string()))?;

        Ok(Doctor {
            id,
            name: name.to_string(),
            specialty: specialty.to_string(),
        })
    }

    /// List all doctors
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails
    pub fn list_all(&self) -> Result<Vec<Doctor>> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        let mut stmt = conn
            .prepare("SELECT id, name, specialty FROM doctors ORDER BY name")
            .map_err(|e| Error::Database(e.to_string()))?;

        let doctors = stmt
            .query_map([], |row| {
                Ok(Doctor {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    specialty: row.get(2)?,
                })
            })
            .map_err(|e| Error::Database(e.to_string()))?
            .filter_map(std::result::Result::ok)
            .collect();

        Ok(doctors)
    }

    /// Count all doctors
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails
    pub fn count(&self) -> Result<i64> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        conn.query_row("SELECT COUNT(*) FROM doctors", [], |row| row.get(0))
            .map_err(|e| Error::Database(e.to_string()))
    }
}
