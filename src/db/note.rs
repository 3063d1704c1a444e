//! Notes and walk-in queue repositories

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{DbPool, parse_datetime};
use crate::{Error, Result};

/// A free-form reception note
#[derive(Debug, Clone, Serialize)]
pub struct Note {
    pub id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Note repository
#[derive(Clone)]
pub struct NoteRepo {
    pool: DbPool,
}

impl NoteRepo {
    /// Create a new note repository
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a note
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails
    pub fn create(&self, content: &str) -> Result<Note> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO notes (id, content, timestamp) VALUES (?1, ?2, ?3)",
            [&id, content, &now],
        )
        .map_err(|e| Error::Database(e.to_string()))?;

        Ok(Note {
            id,
            content: content.to_string(),
            timestamp: Utc::now(),
        })
    }

    /// List all notes
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails
    pub fn list_all(&self) -> Result<Vec<Note>> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        let mut stmt = conn
            .prepare("SELECT id, content, timestamp FROM notes ORDER BY timestamp DESC")
            .map_err(|e| Error::Database(e.to_string()))?;

        let notes = stmt
            .query_map([], |row| {
                Ok(Note {
                    id: row.get(0)?,
                    content: row.get(1)?,
                    timestamp: parse_datetime(&row.get::<_, String>(2)?),
                })
            })
            .map_err(|e| Error::Database(e.to_string()))?
            .filter_map(std::result::Result::ok)
            .collect();

        Ok(notes)
    }
}

/// A walk-in queue entry at the reception desk
#[derive(Debug, Clone, Serialize)]
pub struct QueueEntry {
    pub id: String,
    pub patient_name: String,
    pub doctor_name: String,
    pub timestamp: DateTime<Utc>,
}

/// Queue repository
#[derive(Clone)]
pub struct QueueRepo {
    pool: DbPool,
}

impl QueueRepo {
    /// Create a new queue repository
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Enqueue a walk-in patient for a doctor
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails
    pub fn create(&self, patient_name: &str, doctor_name: &str) -> Result<QueueEntry> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO queue (id, patient_name, doctor_name, timestamp) VALUES (?1, ?2, ?3, ?4)",
            [&id, patient_name, doctor_name, &now],
        )
        .map_err(|e| Error::Database(e.to_string()))?;

        Ok(QueueEntry {
            id,
            patient_name: patient_name.to_string(),
            doctor_name: doctor_name.to_string(),
            timestamp: Utc::now(),
        })
    }

    /// List the queue in arrival order
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails
    pub fn list_all(&self) -> Result<Vec<QueueEntry>> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        let mut stmt = conn
            .prepare("SELECT id, patient_name, doctor_name, timestamp FROM queue ORDER BY timestamp")
            .map_err(|e| Error::Database(e.to_string()))?;

        let entries = stmt
            .query_map([], |row| {
                Ok(QueueEntry {
                    id: row.get(0)?,
                    patient_name: row.get(1)?,
                    doctor_name: row.get(2)?,
                    timestamp: parse_datetime(&row.get::<_, String>(3)?),
                })
            })
            .map_err(|e| Error::Database(e.to_string()))?
            .filter_map(std::result::Result::ok)
            .collect();

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory;

    #[test]
    fn test_notes_roundtrip() {
        let repo = NoteRepo::new(init_memory().unwrap());

        repo.create("Order more gloves").unwrap();
        let notes = repo.list_all().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].content, "Order more gloves");
    }

    #[test]
    fn test_queue_arrival_order() {
        let repo = QueueRepo::new(init_memory().unwrap());

        repo.create("Rahul Sharma", "Dr. Sharma").unwrap();
        repo.create("Priya Patel", "Dr. Patel").unwrap();

        let entries = repo.list_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].patient_name, "Rahul Sharma");
    }
}
