use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{get_latest_location, update_location};

/// Position reporting; the main router gates this to drivers.
pub fn init_location_report_router() -> Router<AppState> {
    Router::new().route("/", post(update_location))
}

/// Position queries, open to every authenticated role.
pub fn init_location_query_router() -> Router<AppState> {
    Router::new().route("/{driver_id}", get(get_latest_location))
}
