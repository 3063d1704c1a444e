//! Shared test utilities

use medisync_gateway::{DbPool, db};

/// Set up an in-memory test database
#[must_use]
pub fn setup_test_db() -> DbPool {
    db::init_memory().expect("failed to init test db")
}

/// Create a test patient in the database
pub fn create_test_patient(db: &DbPool, name: &str) -> medisync_gateway::db::Patient {
    let repo = medisync_gateway::db::PatientRepo::new(db.clone());
    repo.create(&medisync_gateway::db::patient::PatientInput {
        name: name.to_string(),
        ..Default::default()
    })
    .expect("failed to create test patient")
}

/// Create a test doctor in the database
pub fn create_test_doctor(db: &DbPool, name: &str, specialty: &str) -> medisync_gateway::db::Doctor {
    let repo = medisync_gateway::db::DoctorRepo::new(db.clone());
    repo.create(name, specialty).expect("failed to create test doctor")
}
