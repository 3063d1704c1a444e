//! Meeting repository
//!
//! Scheduling rows plus the joined listings the dashboards consume
//! (meeting with patient and doctor names resolved).

use serde::Serialize;
use uuid::Uuid;

use super::DbPool;
use crate::{Error, Result};

/// A scheduled meeting row
#[derive(Debug, Clone, Serialize)]
pub struct Meeting {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub date: String,
    pub time: String,
}

/// A meeting joined with its patient and doctor names
#[derive(Debug, Clone, Serialize)]
pub struct ScheduledMeeting {
    pub id: String,
    pub date: String,
    pub time: String,
    pub patient_name: String,
    pub doctor_name: String,
}

/// Meeting repository
#[derive(Clone)]
pub struct MeetingRepo {
    pool: DbPool,
}

impl MeetingRepo {
    /// Create a new meeting repository
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Schedule a meeting
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails
    pub fn create(&self, patient_id: &str, doctor_id: &str, date: &str, time: &str) -> Result<Meeting> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        let id = Uuid::new_v4().to_string();
        conn.execute(
            "INSERT INTO meetings (id, patient_id, doctor_id, date, time) VALUES (?1, ?2, ?3, ?4, ?5)",
            [&id, patient_id, doctor_id, date, time],
        )
        .map_err(|e| Error::Database(e.to_string()))?;

        Ok(Meeting {
            id,
            patient_id: patient_id.to_string(),
            doctor_id: doctor_id.to_string(),
            date: date.to_string(),
            time: time.to_string(),
        })
    }

    /// List all meetings with patient and doctor names resolved
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails
    pub fn list_scheduled(&self) -> Result<Vec<ScheduledMeeting>> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        let mut stmt = conn
            .prepare(
                "SELECT m.id, m.date, m.time, p.name, d.name
                 FROM meetings m
                 JOIN patients p ON p.id = m.patient_id
                 JOIN doctors d ON d.id = m.doctor_id",
            )
            .map_err(|e| Error::Database(e.to_string()))?;

        let meetings = stmt
            .query_map([], Self::row_to_scheduled)
            .map_err(|e| Error::Database(e.to_string()))?
            .filter_map(std::result::Result::ok)
            .collect();

        Ok(meetings)
    }

    /// List a doctor's meetings, most recent first
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails
    pub fn list_for_doctor(&self, doctor_id: &str) -> Result<Vec<ScheduledMeeting>> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        let mut stmt = conn
            .prepare(
                "SELECT m.id, m.date, m.time, p.name, d.name
                 FROM meetings m
                 JOIN patients p ON p.id = m.patient_id
                 JOIN doctors d ON d.id = m.doctor_id
                 WHERE m.doctor_id = ?1
                 ORDER BY m.date DESC, m.time DESC",
            )
            .map_err(|e| Error::Database(e.to_string()))?;

        let meetings = stmt
            .query_map([doctor_id], Self::row_to_scheduled)
            .map_err(|e| Error::Database(e.to_string()))?
            .filter_map(std::result::Result::ok)
            .collect();

        Ok(meetings)
    }

    fn row_to_scheduled(row: &rusqlite::Row<'_>) -> rusqlite::Result<ScheduledMeeting> {
        Ok(ScheduledMeeting {
            id: row.get(0)?,
            date: row.get(1)?,
            time: row.get(2)?,
            patient_name: row.get(3)?,
            doctor_name: row.get(4)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{DoctorRepo, PatientRepo, init_memory, patient::PatientInput};

    struct Fixture {
        meetings: MeetingRepo,
        patient_id: String,
        doctor_id: String,
    }

    fn setup() -> Fixture {
        let pool = init_memory().unwrap();

        let patient = PatientRepo::new(pool.clone())
            .create(&PatientInput {
                name: "Amit Kumar".to_string(),
                ..PatientInput::default()
            })
            .unwrap();
        let doctor = DoctorRepo::new(pool.clone()).create("Dr. Gupta", "Orthopedic").unwrap();

        Fixture {
            meetings: MeetingRepo::new(pool),
            patient_id: patient.id,
            doctor_id: doctor.id,
        }
    }

    #[test]
    fn test_scheduled_listing_resolves_names() {
        let fx = setup();

        fx.meetings
            .create(&fx.patient_id, &fx.doctor_id, "2023-06-01", "10:30")
            .unwrap();

        let listed = fx.meetings.list_scheduled().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].patient_name, "Amit Kumar");
        assert_eq!(listed[0].doctor_name, "Dr. Gupta");
    }

    #[test]
    fn test_doctor_listing_sorted_descending() {
        let fx = setup();

        fx.meetings
            .create(&fx.patient_id, &fx.doctor_id, "2023-06-01", "09:00")
            .unwrap();
        fx.meetings
            .create(&fx.patient_id, &fx.doctor_id, "2023-06-02", "10:00")
            .unwrap();
        fx.meetings
            .create(&fx.patient_id, &fx.doctor_id, "2023-06-02", "08:00")
            .unwrap();

        let listed = fx.meetings.list_for_doctor(&fx.doctor_id).unwrap();
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0].date, "2023-06-02");
        assert_eq!(listed[0].time, "10:00");
        assert_eq!(listed[2].date, "2023-06-01");
    }

    #[test]
    fn test_unknown_doctor_has_no_meetings() {
        let fx = setup();
        assert!(fx.meetings.list_for_doctor("unknown").unwrap().is_empty());
    }
}
