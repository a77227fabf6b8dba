use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::role::{require_admin, require_driver, require_staff, require_student};
use crate::modules::attendance::router::{init_attendance_overview_router, init_attendance_router};
use crate::modules::auth::router::init_auth_router;
use crate::modules::buses::router::init_buses_router;
use crate::modules::locations::router::{init_location_query_router, init_location_report_router};
use crate::modules::otp::router::{init_code_issue_router, init_code_submit_router};
use crate::modules::users::router::{init_profile_router, init_users_router};
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "Backend is running",
        "time": chrono::Utc::now(),
    }))
}

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route("/health", get(health))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router())
                .nest(
                    "/users",
                    init_users_router()
                        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
                        .merge(init_profile_router()),
                )
                .nest(
                    "/attendance",
                    init_attendance_overview_router()
                        .route_layer(middleware::from_fn_with_state(state.clone(), require_staff))
                        .merge(init_attendance_router()),
                )
                .nest(
                    "/otp",
                    init_code_issue_router()
                        .route_layer(middleware::from_fn_with_state(state.clone(), require_driver))
                        .merge(init_code_submit_router().route_layer(
                            middleware::from_fn_with_state(state.clone(), require_student),
                        )),
                )
                .nest("/buses", init_buses_router())
                .nest(
                    "/driver/location",
                    init_location_report_router()
                        .route_layer(middleware::from_fn_with_state(state.clone(), require_driver))
                        .merge(init_location_query_router()),
                ),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
