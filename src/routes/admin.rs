//! Admin routes
//!
//! The route table only demands an authenticated identity here; the handler
//! imposes the stricter Admin requirement at method level. Both checks must
//! pass.

use axum::extract::State;
use axum::response::Json;
use serde_json::json;

use crate::auth::error::AuthError;
use crate::auth::models::{CurrentUser, Role};
use crate::server::AppState;

pub async fn overview(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<serde_json::Value>, AuthError> {
    user.require(Role::Admin)?;

    Ok(Json(json!({
        "users": state.users.count(),
        "jobs": state.jobs.job_count(),
        "applications": state.jobs.application_count(),
    })))
}
