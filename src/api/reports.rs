//! Software usage and reporting endpoints

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    routing::get,
};
use serde::Deserialize;

use super::{ApiError, ApiState, Success, success};
use crate::db::{DepartmentVisits, UsageRecord, UsageReportRow};

#[derive(Deserialize)]
struct RecordUsage {
    department_id: String,
    user_id: String,
    start_time: String,
    end_time: String,
    duration_minutes: i64,
}

async fn record(
    State(state): State<Arc<ApiState>>,
    Json(body): Json<RecordUsage>,
) -> Result<Json<Success<UsageRecord>>, ApiError> {
    let usage = state.usage.create(
        &body.department_id,
        &body.user_id,
        &body.start_time,
        &body.end_time,
        body.duration_minutes,
    )?;
    Ok(success(usage))
}

async fn report(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Success<Vec<UsageReportRow>>>, ApiError> {
    let rows = state.usage.report()?;
    Ok(success(rows))
}

async fn visits_by_department(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Success<Vec<DepartmentVisits>>>, ApiError> {
    let rows = state.usage.visits_by_department()?;
    Ok(success(rows))
}

/// Build reporting router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/software-usage", get(report).post(record))
        .route("/patient-visits-by-department", get(visits_by_department))
        .with_state(state)
}
