use axum::Json;
use axum::extract::{Path, State};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{DriverLocation, LocationAck, LocationUpdateDto};
use super::service::LocationService;

/// Report the driver's current position (drivers)
#[utoipa::path(
    post,
    path = "/api/driver/location",
    request_body = LocationUpdateDto,
    responses(
        (status = 200, description = "Location stored", body = LocationAck),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Only drivers can update location", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Driver location"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn update_location(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<LocationUpdateDto>,
) -> Result<Json<LocationAck>, AppError> {
    let driver_id = auth_user.user_id()?;
    LocationService::record(&state.db, driver_id, dto).await?;
    Ok(Json(LocationAck {
        message: "Location updated".to_string(),
    }))
}

/// Latest known position for a driver (any authenticated role)
#[utoipa::path(
    get,
    path = "/api/driver/location/{driver_id}",
    params(("driver_id" = Uuid, Path, description = "Driver user id")),
    responses(
        (status = 200, description = "Newest fix", body = DriverLocation),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "No location reported yet", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Driver location"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_latest_location(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(driver_id): Path<Uuid>,
) -> Result<Json<DriverLocation>, AppError> {
    let location = LocationService::latest(&state.db, driver_id).await?;
    Ok(Json(location))
}
