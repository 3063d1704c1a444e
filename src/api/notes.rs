//! Notes and walk-in queue endpoints

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    routing::get,
};
use serde::Deserialize;

use super::{ApiError, ApiState, Success, success};
use crate::db::{Note, QueueEntry};

#[derive(Deserialize)]
struct CreateNote {
    content: String,
}

#[derive(Deserialize)]
struct Enqueue {
    patient_name: String,
    doctor_name: String,
}

async fn list_notes(State(state): State<Arc<ApiState>>) -> Result<Json<Success<Vec<Note>>>, ApiError> {
    let notes = state.notes.list_all()?;
    Ok(success(notes))
}

async fn create_note(
    State(state): State<Arc<ApiState>>,
    Json(body): Json<CreateNote>,
) -> Result<Json<Success<Note>>, ApiError> {
    let note = state.notes.create(&body.content)?;
    Ok(success(note))
}

async fn list_queue(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Success<Vec<QueueEntry>>>, ApiError> {
    let entries = state.queue.list_all()?;
    Ok(success(entries))
}

async fn enqueue(
    State(state): State<Arc<ApiState>>,
    Json(body): Json<Enqueue>,
) -> Result<Json<Success<QueueEntry>>, ApiError> {
    let entry = state.queue.create(&body.patient_name, &body.doctor_name)?;
    Ok(success(entry))
}

/// Build notes/queue router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/notes", get(list_notes).post(create_note))
        .route("/queue", get(list_queue).post(enqueue))
        .with_state(state)
}
