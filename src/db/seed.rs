//! Demo dataset seeding
//!
//! Idempotent: each block checks for existing rows before inserting, so
//! seeding an already-populated database is a no-op.

use super::{DbPool, DepartmentRepo, DoctorRepo, PatientRepo, UserRepo, patient::PatientInput};
use crate::Result;

const DEPARTMENTS: &[&str] = &["Oncology", "Gastronomy", "Gynecology", "Orthopedic", "Dermatology"];

const DOCTORS: &[(&str, &str)] = &[
    ("Dr. Sharma", "Oncology"),
    ("Dr. Patel", "Gastronomy"),
    ("Dr. Kumar", "Gynecology"),
    ("Dr. Gupta", "Orthopedic"),
    ("Dr. Singh", "Dermatology"),
];

const USERS: &[(&str, &str)] = &[
    ("doctor1", "doctor"),
    ("receptionist1", "receptionist"),
    ("admin", "admin"),
];

/// Seed demo departments, doctors, staff accounts and patients
///
/// # Errors
///
/// Returns error if a database operation fails
pub fn run(pool: &DbPool) -> Result<()> {
    let departments = DepartmentRepo::new(pool.clone());
    for name in DEPARTMENTS {
        if departments.find_by_name(name)?.is_none() {
            departments.create(name)?;
        }
    }

    let users = UserRepo::new(pool.clone());
    for (username, role) in USERS {
        if users.find_by_username(username)?.is_none() {
            users.create(username, role)?;
        }
    }

    let doctors = DoctorRepo::new(pool.clone());
    if doctors.count()? == 0 {
        for (name, specialty) in DOCTORS {
            doctors.create(name, specialty)?;
        }
    }

    let patients = PatientRepo::new(pool.clone());
    if patients.count()? == 0 {
        for input in demo_patients() {
            patients.create(&input)?;
        }
    }

    tracing::info!("demo dataset seeded");
    Ok(())
}

fn demo_patients() -> Vec<PatientInput> {
    let rows = [
        (
            "Rahul Sharma",
            175.0,
            72.0,
            "2023-05-15",
            "Hypertension - Prescribed medication and lifestyle changes",
            "online",
        ),
        (
            "Priya Patel",
            162.0,
            58.0,
            "2023-05-10",
            "Type 2 Diabetes - Adjusted insulin dosage",
            "offline",
        ),
        (
            "Amit Kumar",
            168.0,
            65.0,
            "2023-05-12",
            "Asthma - Prescribed new inhaler",
            "no-show",
        ),
        (
            "Neha Gupta",
            170.0,
            60.0,
            "2023-05-14",
            "Migraine - Recommended specialist consultation",
            "online",
        ),
        (
            "Sanjay Singh",
            180.0,
            85.0,
            "2023-05-08",
            "Obesity - Dietary plan and exercise regimen",
            "offline",
        ),
    ];

    rows.into_iter()
        .map(|(name, height, weight, visited, diagnosis, status)| PatientInput {
            name: name.to_string(),
            height: Some(height),
            weight: Some(weight),
            last_visited: Some(visited.to_string()),
            last_diagnosis: Some(diagnosis.to_string()),
            status: Some(status.to_string()),
            ..PatientInput::default()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory;

    #[test]
    fn test_seed_populates_collections() {
        let pool = init_memory().unwrap();
        run(&pool).unwrap();

        assert_eq!(DepartmentRepo::new(pool.clone()).list_all().unwrap().len(), 5);
        assert_eq!(DoctorRepo::new(pool.clone()).count().unwrap(), 5);
        assert_eq!(PatientRepo::new(pool.clone()).count().unwrap(), 5);
        assert_eq!(UserRepo::new(pool).list_all().unwrap().len(), 3);
    }

    #[test]
    fn test_seed_is_idempotent() {
        let pool = init_memory().unwrap();
        run(&pool).unwrap();
        run(&pool).unwrap();

        assert_eq!(DoctorRepo::new(pool.clone()).count().unwrap(), 5);
        assert_eq!(DepartmentRepo::new(pool).list_all().unwrap().len(), 5);
    }
}
