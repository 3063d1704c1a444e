//! Patient endpoints

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};

use super::{ApiError, ApiState, Success, success};
use crate::db::{Patient, patient::PatientInput};

async fn list(State(state): State<Arc<ApiState>>) -> Result<Json<Success<Vec<Patient>>>, ApiError> {
    let patients = state.patients.list_all()?;
    Ok(success(patients))
}

async fn create(
    State(state): State<Arc<ApiState>>,
    Json(body): Json<PatientInput>,
) -> Result<Json<Success<Patient>>, ApiError> {
    let patient = state.patients.create(&body)?;
    Ok(success(patient))
}

async fn update(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    Json(body): Json<PatientInput>,
) -> Result<Json<Success<Patient>>, ApiError> {
    let patient = state.patients.update(&id, &body)?;
    Ok(success(patient))
}

async fn find_by_name(
    State(state): State<Arc<ApiState>>,
    Path(name): Path<String>,
) -> Result<Json<Success<Patient>>, ApiError> {
    let patient = state
        .patients
        .find_by_name(&name)?
        .ok_or_else(|| ApiError::not_found("Patient not found"))?;
    Ok(success(patient))
}

/// Build patient router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/patients", get(list).post(create))
        .route("/patients/{id}", put(update))
        .route("/patients/name/{name}", get(find_by_name))
        .with_state(state)
}
