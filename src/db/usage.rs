//! Software usage and reporting repository
//!
//! Usage rows link a department and a user; the report joins both names.
//! The visits report groups patients by their department.

use serde::Serialize;
use uuid::Uuid;

use super::DbPool;
use crate::{Error, Result};

/// A recorded software usage interval
#[derive(Debug, Clone, Serialize)]
pub struct UsageRecord {
    pub id: String,
    pub department_id: String,
    pub user_id: String,
    pub start_time: String,
    pub end_time: String,
    pub duration_minutes: i64,
}

/// A usage row joined with department and user names
#[derive(Debug, Clone, Serialize)]
pub struct UsageReportRow {
    pub id: String,
    pub start_time: String,
    pub end_time: String,
    pub duration_minutes: i64,
    pub department_name: String,
    pub user_username: String,
}

/// Patient count per department
#[derive(Debug, Clone, Serialize)]
pub struct DepartmentVisits {
    pub department_name: String,
    pub total_patients: i64,
}

/// Usage repository
#[derive(Clone)]
pub struct UsageRepo {
    pool: DbPool,
}

impl UsageRepo {
    /// Create a new usage repository
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Record a usage interval
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails
    pub fn create(
        &self,
        department_id: &str,
        user_id: &str,
        start_time: &str,
        end_time: &str,
        duration_minutes: i64,
    ) -> Result<UsageRecord> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        let id = Uuid::new_v4().to_string();
        conn.execute(
            "INSERT INTO software_usage (id, department_id, user_id, start_time, end_time, duration_minutes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![id, department_id, user_id, start_time, end_time, duration_minutes],
        )
        .map_err(|e| Error::Database(e.to_string()))?;

        Ok(UsageRecord {
            id,
            department_id: department_id.to_string(),
            user_id: user_id.to_string(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            duration_minutes,
        })
    }

    /// Usage report joined with department and user names
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails
    pub fn report(&self) -> Result<Vec<UsageReportRow>> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        let mut stmt = conn
            .prepare(
                "SELECT s.id, s.start_time, s.end_time, s.duration_minutes, d.name, u.username
                 FROM software_usage s
                 JOIN departments d ON d.id = s.department_id
                 JOIN users u ON u.id = s.user_id",
            )
            .map_err(|e| Error::Database(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(UsageReportRow {
                    id: row.get(0)?,
                    start_time: row.get(1)?,
                    end_time: row.get(2)?,
                    duration_minutes: row.get(3)?,
                    department_name: row.get(4)?,
                    user_username: row.get(5)?,
                })
            })
            .map_err(|e| Error::Database(e.to_string()))?
            .filter_map(std::result::Result::ok)
            .collect();

        Ok(rows)
    }

    /// Patient counts grouped by department
    ///
    /// Patients without a department link are left out, matching the
    /// inner-join semantics of the original report.
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails
    pub fn visits_by_department(&self) -> Result<Vec<DepartmentVisits>> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        let mut stmt = conn
            .prepare(
                "SELECT d.name, COUNT(*) FROM patients p
                 JOIN departments d ON d.id = p.department_id
                 GROUP BY d.name",
            )
            .map_err(|e| Error::Database(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(DepartmentVisits {
                    department_name: row.get(0)?,
                    total_patients: row.get(1)?,
                })
            })
            .map_err(|e| Error::Database(e.to_string()))?
            .filter_map(std::result::Result::ok)
            .collect();

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{DepartmentRepo, PatientRepo, UserRepo, init_memory, patient::PatientInput};

    #[test]
    fn test_report_joins_names() {
        let pool = init_memory().unwrap();
        let department = DepartmentRepo::new(pool.clone()).create("Oncology").unwrap();
        let user = UserRepo::new(pool.clone()).create("drsharma", "doctor").unwrap();
        let repo = UsageRepo::new(pool);

        repo.create(&department.id, &user.id, "09:00", "09:45", 45).unwrap();

        let report = repo.report().unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].department_name, "Oncology");
        assert_eq!(report[0].user_username, "drsharma");
        assert_eq!(report[0].duration_minutes, 45);
    }

    #[test]
    fn test_visits_grouped_by_department() {
        let pool = init_memory().unwrap();
        let departments = DepartmentRepo::new(pool.clone());
        let patients = PatientRepo::new(pool.clone());

        let oncology = departments.create("Oncology").unwrap();
        let ortho = departments.create("Orthopedic").unwrap();

        for (name, dept) in [("A", &oncology.id), ("B", &oncology.id), ("C", &ortho.id)] {
            patients
                .create(&PatientInput {
                    name: name.to_string(),
                    department_id: Some(dept.clone()),
                    ..PatientInput::default()
                })
                .unwrap();
        }
        // No department link: excluded from the report
        patients
            .create(&PatientInput {
                name: "D".to_string(),
                ..PatientInput::default()
            })
            .unwrap();

        let mut visits = UsageRepo::new(pool).visits_by_department().unwrap();
        visits.sort_by(|a, b| a.department_name.cmp(&b.department_name));

        assert_eq!(visits.len(), 2);
        assert_eq!(visits[0].department_name, "Oncology");
        assert_eq!(visits[0].total_patients, 2);
        assert_eq!(visits[1].total_patients, 1);
    }
}
