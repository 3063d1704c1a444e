//! User management endpoints

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};
use serde::Deserialize;

use super::{Ack, ApiError, ApiState, Success, ack, success};
use crate::db::User;

#[derive(Deserialize)]
struct CreateUser {
    username: String,
    role: String,
}

#[derive(Deserialize)]
struct UpdateUser {
    username: String,
    role: String,
}

async fn list(State(state): State<Arc<ApiState>>) -> Result<Json<Success<Vec<User>>>, ApiError> {
    let users = state.users.list_all()?;
    Ok(success(users))
}

async fn create(
    State(state): State<Arc<ApiState>>,
    Json(body): Json<CreateUser>,
) -> Result<Json<Success<User>>, ApiError> {
    let user = state.users.create(&body.username, &body.role)?;
    Ok(success(user))
}

async fn update(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    Json(body): Json<UpdateUser>,
) -> Result<Json<Success<User>>, ApiError> {
    let user = state.users.update(&id, &body.username, &body.role)?;
    Ok(success(user))
}

async fn delete(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<Ack>, ApiError> {
    state.users.delete(&id)?;
    Ok(ack())
}

/// Build user management router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/users", get(list).post(create))
        .route("/users/{id}", put(update).delete(delete))
        .with_state(state)
}
