//! Stored conversation transcripts
//!
//! Completed translator sessions are stored per patient name as JSON
//! conversation data and listed most recent first.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{DbPool, parse_datetime};
use crate::{Error, Result};

/// A stored conversation transcript
#[derive(Debug, Clone, Serialize)]
pub struct Conversation {
    pub id: String,
    pub patient_name: String,
    pub conversation_data: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

/// Conversation repository
#[derive(Clone)]
pub struct ConversationRepo {
    pool: DbPool,
}

impl ConversationRepo {
    /// Create a new conversation repository
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Store a conversation for a patient
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails
    pub fn create(&self, patient_name: &str, conversation_data: &serde_json::Value) -> Result<Conversation> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let data = serde_json::to_string(conversation_data)?;

        conn.execute(
            "INSERT INTO conversations (id, patient_name, conversation_data, timestamp)
             VALUES (?1, ?2, ?3, ?4)",
            [&id, patient_name, &data, &now],
        )
        .map_err(|e| Error::Database(e.to_string()))?;

        Ok(Conversation {
            id,
            patient_name: patient_name.to_string(),
            conversation_data: conversation_data.clone(),
            timestamp: Utc::now(),
        })
    }

    /// List a patient's conversations, most recent first
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails
    pub fn list_for_patient(&self, patient_name: &str) -> Result<Vec<Conversation>> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        let mut stmt = conn
            .prepare(
                "SELECT id, patient_name, conversation_data, timestamp
                 FROM conversations WHERE patient_name = ?1 ORDER BY timestamp DESC",
            )
            .map_err(|e| Error::Database(e.to_string()))?;

        let conversations = stmt
            .query_map([patient_name], |row| {
                let data: String = row.get(2)?;
                Ok(Conversation {
                    id: row.get(0)?,
                    patient_name: row.get(1)?,
                    conversation_data: serde_json::from_str(&data)
                        .unwrap_or(serde_json::Value::Null),
                    timestamp: parse_datetime(&row.get::<_, String>(3)?),
                })
            })
            .map_err(|e| Error::Database(e.to_string()))?
            .filter_map(std::result::Result::ok)
            .collect();

        Ok(conversations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory;

    #[test]
    fn test_store_and_list_for_patient() {
        let repo = ConversationRepo::new(init_memory().unwrap());

        let data = serde_json::json!([
            {"speaker": "doctor", "original": "Hello", "translated": "नमस्ते"}
        ]);
        repo.create("Neha Gupta", &data).unwrap();
        repo.create("Neha Gupta", &serde_json::json!([])).unwrap();
        repo.create("Someone Else", &serde_json::json!([])).unwrap();

        let stored = repo.list_for_patient("Neha Gupta").unwrap();
        assert_eq!(stored.len(), 2);
        assert!(stored.iter().all(|c| c.patient_name == "Neha Gupta"));
    }

    #[test]
    fn test_round_trips_json_payload() {
        let repo = ConversationRepo::new(init_memory().unwrap());

        let data = serde_json::json!({"entries": [{"original": "How are you?"}]});
        repo.create("Sanjay Singh", &data).unwrap();

        let stored = repo.list_for_patient("Sanjay Singh").unwrap();
        assert_eq!(stored[0].conversation_data, data);
    }
}
