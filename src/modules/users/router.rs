use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

use super::controller::{create_user, get_profile, list_users, update_profile};

/// Admin-gated user management (layered in the main router).
pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/", post(create_user))
}

/// Self-service profile routes, open to every authenticated role.
pub fn init_profile_router() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_profile))
        .route("/me", put(update_profile))
}
