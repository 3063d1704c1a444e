//! Error types for the Medisync gateway

use thiserror::Error;

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the gateway
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Speech recognition error
    #[error("recognition error: {0}")]
    Recognition(String),

    /// Translation service error
    #[error("translation error: {0}")]
    Translation(String),

    /// Speech synthesis error
    #[error("synthesis error: {0}")]
    Synthesis(String),

    /// Conversation pipeline error
    #[error("conversation error: {0}")]
    Conversation(String),

    /// Transcript export error
    #[error("export error: {0}")]
    Export(String),

    /// Database error
    #[error("database error: {0}")]
    Database(String),

    /// `SQLite` error
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Resource not found
    #[error("not found: {0}")]
    NotFound(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
