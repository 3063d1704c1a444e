//! Meeting scheduling endpoints

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::Deserialize;

use super::{ApiError, ApiState, Success, success};
use crate::db::{Meeting, ScheduledMeeting};

#[derive(Deserialize)]
struct CreateMeeting {
    patient_id: String,
    doctor_id: String,
    date: String,
    time: String,
}

async fn list(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Success<Vec<ScheduledMeeting>>>, ApiError> {
    let meetings = state.meetings.list_scheduled()?;
    Ok(success(meetings))
}

async fn create(
    State(state): State<Arc<ApiState>>,
    Json(body): Json<CreateMeeting>,
) -> Result<Json<Success<Meeting>>, ApiError> {
    let meeting = state
        .meetings
        .create(&body.patient_id, &body.doctor_id, &body.date, &body.time)?;
    Ok(success(meeting))
}

async fn list_for_doctor(
    State(state): State<Arc<ApiState>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Success<Vec<ScheduledMeeting>>>, ApiError> {
    let meetings = state.meetings.list_for_doctor(&doctor_id)?;
    Ok(success(meetings))
}

/// Build meeting router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/meetings", get(list).post(create))
        .route("/meetings/doctor/{doctor_id}", get(list_for_doctor))
        .with_state(state)
}
