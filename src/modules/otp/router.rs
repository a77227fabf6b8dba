use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{generate_code, submit_code};

/// Code issue route; the main router gates this to drivers.
pub fn init_code_issue_router() -> Router<AppState> {
    Router::new().route("/generate", post(generate_code))
}

/// Code submission route; the main router gates this to students.
pub fn init_code_submit_router() -> Router<AppState> {
    Router::new().route("/submit", post(submit_code))
}
