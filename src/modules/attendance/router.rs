use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    list_all_attendance, list_student_attendance, mark_attendance, student_attendance_summary,
};

/// Routes whose access rule depends on the request (self vs staff),
/// checked in the handlers.
pub fn init_attendance_router() -> Router<AppState> {
    Router::new()
        .route("/mark", post(mark_attendance))
        .route("/{student_id}", get(list_student_attendance))
        .route("/{student_id}/summary", get(student_attendance_summary))
}

/// The aggregate listing, gated to staff by a router layer.
pub fn init_attendance_overview_router() -> Router<AppState> {
    Router::new().route("/", get(list_all_attendance))
}
