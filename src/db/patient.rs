//! Patient repository
//!
//! Patients carry the full visit-tracking field set used by the reception
//! and doctor views; all fields except the name are optional.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DbPool, parse_datetime};
use crate::{Error, Result};

/// A registered patient
#[derive(Debug, Clone, Serialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub last_visited: Option<String>,
    pub last_diagnosis: Option<String>,
    pub purpose_of_visit: Option<String>,
    pub notes: Option<String>,
    pub is_emergency: bool,
    pub extra_documents: Option<String>,
    pub status: Option<String>,
    pub reception_notes: Option<String>,
    pub documents_carried: Option<String>,
    pub previous_visits_count: Option<i64>,
    pub previous_visit_date: Option<String>,
    pub department_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Patient fields accepted on create and update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientInput {
    pub name: String,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub last_visited: Option<String>,
    pub last_diagnosis: Option<String>,
    pub purpose_of_visit: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub is_emergency: bool,
    pub extra_documents: Option<String>,
    pub status: Option<String>,
    pub reception_notes: Option<String>,
    pub documents_carried: Option<String>,
    pub previous_visits_count: Option<i64>,
    pub previous_visit_date: Option<String>,
    pub department_id: Option<String>,
}

/// Patient repository
#[derive(Clone)]
pub struct PatientRepo {
    pool: DbPool,
}

impl PatientRepo {
    /// Create a new patient repository
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Register a patient
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails
    pub fn create(&self, input: &PatientInput) -> Result<Patient> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO patients (id, name, height, weight, last_visited, last_diagnosis,
                 purpose_of_visit, notes, is_emergency, extra_documents, status,
                 reception_notes, documents_carried, previous_visits_count,
                 previous_visit_date, department_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
            rusqlite::params![
                id,
                input.name,
                input.height,
                input.weight,
                input.last_visited,
                input.last_diagnosis,
                input.purpose_of_visit,
                input.notes,
                input.is_emergency,
                input.extra_documents,
                input.status,
                input.reception_notes,
                input.documents_carried,
                input.previous_visits_count,
                input.previous_visit_date,
                input.department_id,
                now,
            ],
        )
        .map_err(|e| Error::Database(e.to_string()))?;

        self.find(&id)?
            .ok_or_else(|| Error::Database("patient vanished after insert".to_string()))
    }

    /// Find a patient by id (returns None if not found)
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails
    pub fn find(&self, id: &str) -> Result<Option<Patient>> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        let patient = conn
            .query_row(
                &format!("{SELECT_PATIENT} WHERE id = ?1"),
                [id],
                Self::row_to_patient,
            )
            .ok();

        Ok(patient)
    }

    /// Find a patient by exact name (returns None if not found)
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails
    pub fn find_by_name(&self, name: &str) -> Result<Option<Patient>> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        let patient = conn
            .query_row(
                &format!("{SELECT_PATIENT} WHERE name = ?1"),
                [name],
                Self::row_to_patient,
            )
            .ok();

        Ok(patient)
    }

    /// List all patients
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails
    pub fn list_all(&self) -> Result<Vec<Patient>> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        let mut stmt = conn
            .prepare(&format!("{SELECT_PATIENT} ORDER BY created_at DESC"))
            .map_err(|e| Error::Database(e.to_string()))?;

        let patients = stmt
            .query_map([], Self::row_to_patient)
            .map_err(|e| Error::Database(e.to_string()))?
            .filter_map(std::result::Result::ok)
            .collect();

        Ok(patients)
    }

    /// Update a patient's full field set
    ///
    /// # Errors
    ///
    /// Returns error if the patient does not exist or the operation fails
    pub fn update(&self, id: &str, input: &PatientInput) -> Result<Patient> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        let changed = conn
            .execute(
                "UPDATE patients SET name = ?1, height = ?2, weight = ?3, last_visited = ?4,
                     last_diagnosis = ?5, purpose_of_visit = ?6, notes = ?7, is_emergency = ?8,
                     extra_documents = ?9, status = ?10, reception_notes = ?11,
                     documents_carried = ?12, previous_visits_count = ?13,
                     previous_visit_date = ?14, department_id = ?15
                 WHERE id = ?16",
                rusqlite::params![
                    input.name,
                    input.height,
                    input.weight,
                    input.last_visited,
                    input.last_diagnosis,
                    input.purpose_of_visit,
                    input.notes,
                    input.is_emergency,
                    input.extra_documents,
                    input.status,
                    input.reception_notes,
                    input.documents_carried,
                    input.previous_visits_count,
                    input.previous_visit_date,
                    input.department_id,
                    id,
                ],
            )
            .map_err(|e| Error::Database(e.to_string()))?;

        if changed == 0 {
            return Err(Error::NotFound(format!("patient {id}")));
        }

        self.find(id)?
            .ok_or_else(|| Error::Database("patient vanished after update".to_string()))
    }

    /// Count all patients
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails
    pub fn count(&self) -> Result<i64> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        conn.query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))
            .map_err(|e| Error::Database(e.to_string()))
    }

    fn row_to_patient(row: &rusqlite::Row<'_>) -> rusqlite::Result<Patient> {
        Ok(Patient {
            id: row.get(0)?,
            name: row.get(1)?,
            height: row.get(2)?,
            weight: row.get(3)?,
            last_visited: row.get(4)?,
            last_diagnosis: row.get(5)?,
            purpose_of_visit: row.get(6)?,
            notes: row.get(7)?,
            is_emergency: row.get(8)?,
            extra_documents: row.get(9)?,
            status: row.get(10)?,
            reception_notes: row.get(11)?,
            documents_carried: row.get(12)?,
            previous_visits_count: row.get(13)?,
            previous_visit_date: row.get(14)?,
            department_id: row.get(15)?,
            created_at: parse_datetime(&row.get::<_, String>(16)?),
        })
    }
}

const SELECT_PATIENT: &str = "SELECT id, name, height, weight, last_visited, last_diagnosis,
     purpose_of_visit, notes, is_emergency, extra_documents, status, reception_notes,
     documents_carried, previous_visits_count, previous_visit_date, department_id, created_at
 FROM patients";
