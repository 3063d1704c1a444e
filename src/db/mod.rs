//! Database module for the front-desk collections
//!
//! One repository per collection over a shared `SQLite` pool. Multi-step
//! mutations are not wrapped in transactions; concurrent requests see the
//! driver's default isolation only.

pub mod conversation;
pub mod department;
pub mod doctor;
pub mod inventory;
pub mod meeting;
pub mod note;
pub mod notification;
pub mod patient;
mod schema;
pub mod seed;
pub mod usage;
pub mod user;

use std::path::Path;

use chrono::{DateTime, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;

use crate::{Error, Result};

pub use conversation::{Conversation, ConversationRepo};
pub use department::{Department, DepartmentRepo};
pub use doctor::{Doctor, DoctorRepo};
pub use inventory::{InventoryItem, InventoryRepo};
pub use meeting::{Meeting, MeetingRepo, ScheduledMeeting};
pub use note::{Note, NoteRepo, QueueEntry, QueueRepo};
pub use notification::{Notification, NotificationRepo};
pub use patient::{Patient, PatientRepo};
pub use schema::SCHEMA_VERSION;
pub use usage::{DepartmentVisits, UsageRecord, UsageReportRow, UsageRepo};
pub use user::{User, UserRepo};

/// Database connection pool
pub type DbPool = Pool<SqliteConnectionManager>;

/// Pooled database connection
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Initialize the database
///
/// # Errors
///
/// Returns error if the database cannot be opened or migrated
pub fn init<P: AsRef<Path>>(path: P) -> Result<DbPool> {
    let manager = SqliteConnectionManager::file(path);
    let pool = Pool::builder()
        .max_size(4)
        .build(manager)
        .map_err(|e| Error::Database(e.to_string()))?;

    let conn = pool.get().map_err(|e| Error::Database(e.to_string()))?;
    schema::init(&conn)?;

    tracing::info!(version = SCHEMA_VERSION, "database initialized");
    Ok(pool)
}

/// Initialize an in-memory database (for testing)
///
/// # Errors
///
/// Returns error if the database cannot be initialized
pub fn init_memory() -> Result<DbPool> {
    // Use a uniquely-named shared-cache in-memory database so the pool can
    // hand out more than one connection backed by the same data. A private
    // `:memory:` connection per pool slot would give each connection its own
    // empty database, and a `max_size(1)` pool deadlocks whenever a repo holds
    // a connection and acquires a second one (e.g. `create` calling `find`).
    let name = format!("file:memdb_{}?mode=memory&cache=shared", uuid::Uuid::new_v4());
    let manager = SqliteConnectionManager::file(name);
    let pool = Pool::builder()
        .max_size(4)
        .build(manager)
        .map_err(|e| Error::Database(e.to_string()))?;

    let conn = pool.get().map_err(|e| Error::Database(e.to_string()))?;
    schema::init(&conn)?;

    Ok(pool)
}

pub(crate) fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_memory() {
        let pool = init_memory().unwrap();
        let _conn = pool.get().unwrap();
    }
}
