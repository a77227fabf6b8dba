use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

use super::controller::{create_bus, delete_bus, list_buses};

/// Listing is open to every authenticated role; create and delete check
/// for the admin role in the handlers (the paths overlap with the open
/// listing, so a router layer cannot split them).
pub fn init_buses_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_buses))
        .route("/", post(create_bus))
        .route("/{id}", delete(delete_bus))
}
