//! Medisync Gateway - hospital front-desk service
//!
//! This library provides the core functionality for the gateway:
//! - Front-desk collections (users, doctors, patients, meetings, inventory,
//!   notifications, notes, queue) over a JSON-over-HTTP API
//! - The doctor-patient conversation pipeline (speech capture, medical
//!   translation, speech synthesis) with exportable transcripts
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                    Clients                           │
//! │   Reception  │  Doctor  │  Admin  │  Translator     │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │               Medisync Gateway                       │
//! │   API  │  Collections  │  Conversation pipeline     │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │           External services                          │
//! │   Chat completion  │  Transcription  │  TTS         │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod server;
pub mod translator;

pub use config::Config;
pub use db::{DbConn, DbPool};
pub use error::{Error, Result};
pub use translator::{
    ConversationEntry, ConversationSession, CycleObserver, CycleState, Orchestrator, Speaker,
    Voice, select_voice,
};
