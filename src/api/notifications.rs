//! Notification endpoints

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    routing::post,
};
use serde::Deserialize;

use super::{ApiError, ApiState, Success, success};
use crate::db::Notification;

#[derive(Deserialize)]
struct SendNotification {
    recipient_type: String,
    recipient_id: String,
    message: String,
}

async fn send(
    State(state): State<Arc<ApiState>>,
    Json(body): Json<SendNotification>,
) -> Result<Json<Success<Notification>>, ApiError> {
    let notification =
        state
            .notifications
            .create(&body.recipient_type, &body.recipient_id, &body.message)?;
    Ok(success(notification))
}

/// Build notification router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/notifications", post(send))
        .with_state(state)
}
