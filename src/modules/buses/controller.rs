use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::check_any_role;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::users::model::UserRole;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{Bus, CreateBusDto};
use super::service::BusService;

/// List buses (any authenticated role)
#[utoipa::path(
    get,
    path = "/api/buses",
    responses(
        (status = 200, description = "All buses", body = [Bus]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Buses"
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_buses(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<Vec<Bus>>, AppError> {
    let buses = BusService::list_buses(&state.db).await?;
    Ok(Json(buses))
}

/// Create a bus (admins)
#[utoipa::path(
    post,
    path = "/api/buses",
    request_body = CreateBusDto,
    responses(
        (status = 201, description = "Bus created", body = Bus),
        (status = 400, description = "Validation error or duplicate bus number", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin only", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Buses"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn create_bus(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateBusDto>,
) -> Result<(StatusCode, Json<Bus>), AppError> {
    check_any_role(&auth_user, &[UserRole::Admin])?;
    let bus = BusService::create_bus(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(bus)))
}

/// Delete a bus (admins)
#[utoipa::path(
    delete,
    path = "/api/buses/{id}",
    params(("id" = Uuid, Path, description = "Bus id")),
    responses(
        (status = 204, description = "Bus deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin only", body = ErrorResponse),
        (status = 404, description = "Unknown bus", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Buses"
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_bus(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    check_any_role(&auth_user, &[UserRole::Admin])?;
    BusService::delete_bus(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
