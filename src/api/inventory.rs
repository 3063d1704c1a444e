//! Inventory endpoints

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};
use serde::Deserialize;

use super::{Ack, ApiError, ApiState, Success, ack, success};
use crate::db::InventoryItem;

#[derive(Deserialize)]
struct ItemBody {
    name: String,
    quantity: i64,
    location: Option<String>,
}

async fn list(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Success<Vec<InventoryItem>>>, ApiError> {
    let items = state.inventory.list_all()?;
    Ok(success(items))
}

async fn create(
    State(state): State<Arc<ApiState>>,
    Json(body): Json<ItemBody>,
) -> Result<Json<Success<InventoryItem>>, ApiError> {
    let item = state
        .inventory
        .create(&body.name, body.quantity, body.location.as_deref())?;
    Ok(success(item))
}

async fn update(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    Json(body): Json<ItemBody>,
) -> Result<Json<Success<InventoryItem>>, ApiError> {
    let item = state
        .inventory
        .update(&id, &body.name, body.quantity, body.location.as_deref())?;
    Ok(success(item))
}

async fn delete(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<Ack>, ApiError> {
    state.inventory.delete(&id)?;
    Ok(ack())
}

/// Build inventory router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/inventory", get(list).post(create))
        .route("/inventory/{id}", put(update).delete(delete))
        .with_state(state)
}
