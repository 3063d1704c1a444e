//! Notification repository

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{DbPool, parse_datetime};
use crate::{Error, Result};

/// A notification sent to a staff member or group
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: String,
    pub recipient_type: String,
    pub recipient_id: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Notification repository
#[derive(Clone)]
pub struct NotificationRepo {
    pool: DbPool,
}

impl NotificationRepo {
    /// Create a new notification repository
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Record a notification
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails
    pub fn create(&self, recipient_type: &str, recipient_id: &str, message: &str) -> Result<Notification> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO notifications (id, recipient_type, recipient_id, message, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            [&id, recipient_type, recipient_id, message, &now],
        )
        .map_err(|e| Error::Database(e.to_string()))?;

        Ok(Notification {
            id,
            recipient_type: recipient_type.to_string(),
            recipient_id: recipient_id.to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
        })
    }

    /// List all notifications, most recent first
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails
    pub fn list_all(&self) -> Result<Vec<Notification>> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        let mut stmt = conn
            .prepare(
                "SELECT id, recipient_type, recipient_id, message, timestamp
                 FROM notifications ORDER BY timestamp DESC",
            )
            .map_err(|e| Error::Database(e.to_string()))?;

        let notifications = stmt
            .query_map([], |row| {
                Ok(Notification {
                    id: row.get(0)?,
                    recipient_type: row.get(1)?,
                    recipient_id: row.get(2)?,
                    message: row.get(3)?,
                    timestamp: parse_datetime(&row.get::<_, String>(4)?),
                })
            })
            .map_err(|e| Error::Database(e.to_string()))?
            .filter_map(std::result::Result::ok)
            .collect();

        Ok(notifications)
    }
}
