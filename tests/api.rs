//! Collection integration tests
//!
//! Exercises the repositories backing the API endpoints against an
//! in-memory database, including the joined listings and reports.

use medisync_gateway::db::{
    ConversationRepo, DepartmentRepo, InventoryRepo, MeetingRepo, NoteRepo, QueueRepo, UsageRepo,
    UserRepo, seed,
};

mod common;

#[test]
fn test_seeded_database_serves_dashboards() {
    let db = common::setup_test_db();
    seed::run(&db).unwrap();

    let departments = DepartmentRepo::new(db.clone()).list_all().unwrap();
    assert_eq!(departments.len(), 5);
    assert!(departments.iter().any(|d| d.name == "Oncology"));

    let users = UserRepo::new(db).list_all().unwrap();
    assert_eq!(users.len(), 3);
    assert!(users.iter().any(|u| u.role == "receptionist"));
}

#[test]
fn test_meeting_schedule_join() {
    let db = common::setup_test_db();

    let patient = common::create_test_patient(&db, "Rahul Sharma");
    let doctor = common::create_test_doctor(&db, "Dr. Sharma", "Oncology");

    let meetings = MeetingRepo::new(db);
    meetings.create(&patient.id, &doctor.id, "2023-06-10", "11:00").unwrap();

    let listed = meetings.list_scheduled().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].patient_name, "Rahul Sharma");
    assert_eq!(listed[0].doctor_name, "Dr. Sharma");

    let per_doctor = meetings.list_for_doctor(&doctor.id).unwrap();
    assert_eq!(per_doctor.len(), 1);
}

#[test]
fn test_conversation_storage_per_patient() {
    let db = common::setup_test_db();
    common::create_test_patient(&db, "Neha Gupta");

    let conversations = ConversationRepo::new(db);
    let data = serde_json::json!([
        {
            "speaker": "doctor",
            "original": "How are you feeling today?",
            "translated": "आप आज कैसा महसूस कर रहे हैं?",
            "doctor_language": "English",
            "patient_language": "Hindi"
        }
    ]);

    conversations.create("Neha Gupta", &data).unwrap();

    let stored = conversations.list_for_patient("Neha Gupta").unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].conversation_data, data);
    assert!(conversations.list_for_patient("Unknown").unwrap().is_empty());
}

#[test]
fn test_inventory_lifecycle() {
    let db = common::setup_test_db();
    let inventory = InventoryRepo::new(db);

    let item = inventory.create("Gloves", 500, Some("Store A")).unwrap();
    let item = inventory.update(&item.id, "Gloves", 450, Some("Store A")).unwrap();
    assert_eq!(item.quantity, 450);

    inventory.delete(&item.id).unwrap();
    assert!(inventory.list_all().unwrap().is_empty());
}

#[test]
fn test_usage_report_and_visits() {
    let db = common::setup_test_db();

    let department = DepartmentRepo::new(db.clone()).create("Dermatology").unwrap();
    let user = UserRepo::new(db.clone()).create("drsingh", "doctor").unwrap();

    let usage = UsageRepo::new(db);
    usage.create(&department.id, &user.id, "08:00", "08:30", 30).unwrap();

    let report = usage.report().unwrap();
    assert_eq!(report.len(), 1);
    assert_eq!(report[0].department_name, "Dermatology");
    assert_eq!(report[0].user_username, "drsingh");
}

#[test]
fn test_notes_and_queue() {
    let db = common::setup_test_db();

    NoteRepo::new(db.clone()).create("Confirm tomorrow's schedule").unwrap();

    let queue = QueueRepo::new(db.clone());
    queue.create("Amit Kumar", "Dr. Kumar").unwrap();
    queue.create("Sanjay Singh", "Dr. Singh").unwrap();

    let entries = queue.list_all().unwrap();
    assert_eq!(entries.len(), 2);
    // Walk-ins are served in arrival order
    assert_eq!(entries[0].patient_name, "Amit Kumar");

    let notes = NoteRepo::new(db).list_all().unwrap();
    assert_eq!(notes.len(), 1);
}
