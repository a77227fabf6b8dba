use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::attendance::model::AttendanceRecord;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{GenerateCodeResponse, SubmitCodeRequest};
use super::service::OtpService;

/// Generate a fresh attendance code (drivers)
#[utoipa::path(
    post,
    path = "/api/otp/generate",
    responses(
        (status = 200, description = "Code issued, replaces any prior code", body = GenerateCodeResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Only drivers can issue codes", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance codes"
)]
#[instrument(skip(state, auth_user))]
pub async fn generate_code(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<GenerateCodeResponse>, AppError> {
    let issuer = auth_user.user_id()?;
    Ok(Json(OtpService::generate(&state.codes, issuer)))
}

/// Submit an attendance code (students, records the submitter)
#[utoipa::path(
    post,
    path = "/api/otp/submit",
    request_body = SubmitCodeRequest,
    responses(
        (status = 201, description = "Code matched, attendance recorded", body = AttendanceRecord),
        (status = 400, description = "Code does not match the active code", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Only students can submit codes", body = ErrorResponse),
        (status = 404, description = "No active code", body = ErrorResponse),
        (status = 409, description = "Code already used", body = ErrorResponse),
        (status = 410, description = "Code expired", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance codes"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn submit_code(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<SubmitCodeRequest>,
) -> Result<(StatusCode, Json<AttendanceRecord>), AppError> {
    let student_id = auth_user.user_id()?;
    let record = OtpService::submit(&state.db, &state.codes, student_id, &dto.code).await?;
    Ok((StatusCode::CREATED, Json(record)))
}
