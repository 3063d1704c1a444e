//! HTTP API for the front-desk gateway
//!
//! Every handler answers with the envelope `{"message": "success", "data"}`
//! on success or `{"error": <message>}` on failure: HTTP 400 for storage and
//! service errors, 404 for missing lookups.

pub mod conversations;
pub mod doctors;
pub mod health;
pub mod inventory;
pub mod meetings;
pub mod notes;
pub mod notifications;
pub mod patients;
pub mod reports;
pub mod translator;
pub mod users;

use std::sync::Arc;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::db::{
    ConversationRepo, DbPool, DepartmentRepo, DoctorRepo, InventoryRepo, MeetingRepo, NoteRepo,
    NotificationRepo, PatientRepo, QueueRepo, UsageRepo, UserRepo,
};
use crate::translator::{RemoteSynthesizer, SpeechRecognizer, Translator};

/// Conversation pipeline providers, each present only when configured
#[derive(Clone, Default)]
pub struct Providers {
    pub translator: Option<Arc<dyn Translator>>,
    pub recognizer: Option<Arc<dyn SpeechRecognizer>>,
    pub synthesizer: Option<Arc<RemoteSynthesizer>>,
    /// Voice identifier for server-side synthesis
    pub tts_voice: String,
}

/// Shared state for API handlers
#[derive(Clone)]
pub struct ApiState {
    pub db: DbPool,
    pub users: UserRepo,
    pub departments: DepartmentRepo,
    pub doctors: DoctorRepo,
    pub patients: PatientRepo,
    pub meetings: MeetingRepo,
    pub inventory: InventoryRepo,
    pub conversations: ConversationRepo,
    pub notifications: NotificationRepo,
    pub usage: UsageRepo,
    pub notes: NoteRepo,
    pub queue: QueueRepo,
    pub providers: Providers,
}

impl ApiState {
    /// Build API state from a database pool and pipeline providers
    #[must_use]
    pub fn new(db: DbPool, providers: Providers) -> Self {
        Self {
            users: UserRepo::new(db.clone()),
            departments: DepartmentRepo::new(db.clone()),
            doctors: DoctorRepo::new(db.clone()),
            patients: PatientRepo::new(db.clone()),
            meetings: MeetingRepo::new(db.clone()),
            inventory: InventoryRepo::new(db.clone()),
            conversations: ConversationRepo::new(db.clone()),
            notifications: NotificationRepo::new(db.clone()),
            usage: UsageRepo::new(db.clone()),
            notes: NoteRepo::new(db.clone()),
            queue: QueueRepo::new(db.clone()),
            db,
            providers,
        }
    }
}

/// Success envelope
#[derive(Serialize)]
pub struct Success<T> {
    pub message: &'static str,
    pub data: T,
}

/// Success acknowledgement without a data payload
#[derive(Serialize)]
pub struct Ack {
    pub message: &'static str,
}

/// Wrap a payload in the success envelope
pub fn success<T: Serialize>(data: T) -> Json<Success<T>> {
    Json(Success {
        message: "success",
        data,
    })
}

/// Bare success acknowledgement
#[must_use]
pub fn ack() -> Json<Ack> {
    Json(Ack { message: "success" })
}

/// API error answered as `{"error": <message>}`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// A 404 for a missing lookup
    pub fn not_found(what: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: what.into(),
        }
    }

    /// A 503 for an unconfigured capability
    pub fn unavailable(what: impl Into<String>) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: what.into(),
        }
    }
}

impl From<crate::Error> for ApiError {
    fn from(err: crate::Error) -> Self {
        let status = match &err {
            crate::Error::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorBody {
            error: String,
        }

        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

/// Assemble the full application router
pub fn router(state: Arc<ApiState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(health::router(state.clone()))
        .merge(users::router(state.clone()))
        .merge(doctors::router(state.clone()))
        .merge(patients::router(state.clone()))
        .merge(meetings::router(state.clone()))
        .merge(inventory::router(state.clone()))
        .merge(conversations::router(state.clone()))
        .merge(notifications::router(state.clone()))
        .merge(reports::router(state.clone()))
        .merge(notes::router(state.clone()))
        .merge(translator::router(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
