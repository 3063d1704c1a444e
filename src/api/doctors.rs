//! Doctor and department endpoints

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    routing::get,
};
use serde::Deserialize;

use super::{ApiError, ApiState, Success, success};
use crate::db::{Department, Doctor};

#[derive(Deserialize)]
struct CreateDoctor {
    name: String,
    specialty: String,
}

#[derive(Deserialize)]
struct CreateDepartment {
    name: String,
}

async fn list_doctors(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Success<Vec<Doctor>>>, ApiError> {
    let doctors = state.doctors.list_all()?;
    Ok(success(doctors))
}

async fn create_doctor(
    State(state): State<Arc<ApiState>>,
    Json(body): Json<CreateDoctor>,
) -> Result<Json<Success<Doctor>>, ApiError> {
    let doctor = state.doctors.create(&body.name, &body.specialty)?;
    Ok(success(doctor))
}

async fn list_departments(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Success<Vec<Department>>>, ApiError> {
    let departments = state.departments.list_all()?;
    Ok(success(departments))
}

async fn create_department(
    State(state): State<Arc<ApiState>>,
    Json(body): Json<CreateDepartment>,
) -> Result<Json<Success<Department>>, ApiError> {
    let department = state.departments.create(&body.name)?;
    Ok(success(department))
}

/// Build doctor/department router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/doctors", get(list_doctors).post(create_doctor))
        .route("/departments", get(list_departments).post(create_department))
        .with_state(state)
}
