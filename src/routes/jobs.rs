//! Job board routes
//!
//! Listing is public; posting is staff-only (route layer); applying is
//! student-only (route layer). Posting additionally re-asserts the staff
//! requirement at method level.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::auth::models::CurrentUser;
use crate::auth::policy;
use crate::server::AppState;
use crate::store::jobs::ApplyError;

#[derive(Debug, Deserialize)]
pub struct PostJobRequest {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub description: String,
}

pub async fn list_jobs(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({ "jobs": state.jobs.list() }))
}

pub async fn post_job(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<PostJobRequest>,
) -> Response {
    if let Err(e) = user.require_any(policy::STAFF) {
        return e.into_response();
    }

    let job = state.jobs.post(
        &payload.title,
        &payload.company,
        &payload.description,
        &user.username,
    );
    tracing::info!(job_id = %job.id, posted_by = %user.username, "job posted");
    (StatusCode::CREATED, Json(json!({ "job": job }))).into_response()
}

pub async fn apply(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(job_id): Path<Uuid>,
) -> Response {
    match state.jobs.apply(job_id, &user.username) {
        Ok(application) => {
            tracing::info!(job_id = %job_id, applicant = %user.username, "application recorded");
            (StatusCode::CREATED, Json(json!({ "application": application }))).into_response()
        }
        Err(ApplyError::UnknownJob) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "job not found" })),
        )
            .into_response(),
        Err(ApplyError::AlreadyApplied) => (
            StatusCode::CONFLICT,
            Json(json!({ "error": "already applied" })),
        )
            .into_response(),
    }
}
