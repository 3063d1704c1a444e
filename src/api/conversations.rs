//! Stored conversation transcript endpoints

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use serde::Deserialize;

use super::{ApiError, ApiState, Success, success};
use crate::db::Conversation;

#[derive(Deserialize)]
struct StoreConversation {
    patient_name: String,
    conversation_data: serde_json::Value,
}

async fn store(
    State(state): State<Arc<ApiState>>,
    Json(body): Json<StoreConversation>,
) -> Result<Json<Success<Conversation>>, ApiError> {
    let conversation = state
        .conversations
        .create(&body.patient_name, &body.conversation_data)?;
    Ok(success(conversation))
}

async fn list_for_patient(
    State(state): State<Arc<ApiState>>,
    Path(patient_name): Path<String>,
) -> Result<Json<Success<Vec<Conversation>>>, ApiError> {
    let conversations = state.conversations.list_for_patient(&patient_name)?;
    Ok(success(conversations))
}

/// Build conversation router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/api/conversations", post(store))
        .route("/api/conversations/{patient_name}", get(list_for_patient))
        .with_state(state)
}
