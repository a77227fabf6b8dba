use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::{check_any_role, check_self_or_roles};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::users::model::UserRole;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    AttendanceRecord, AttendanceSummary, AttendanceWithStudent, MarkAttendanceDto,
    MarkAttendanceResponse,
};
use super::service::AttendanceService;

/// Mark attendance directly (students, own record only)
#[utoipa::path(
    post,
    path = "/api/attendance/mark",
    request_body = MarkAttendanceDto,
    responses(
        (status = 201, description = "Attendance recorded", body = MarkAttendanceResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not a student, or not your own record", body = ErrorResponse),
        (status = 404, description = "Unknown student", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn mark_attendance(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<MarkAttendanceDto>,
) -> Result<(StatusCode, Json<MarkAttendanceResponse>), AppError> {
    check_any_role(&auth_user, &[UserRole::Student])?;
    if auth_user.user_id()? != dto.student_id {
        return Err(AppError::forbidden(anyhow::anyhow!(
            "Students can only mark their own attendance"
        )));
    }

    let record = AttendanceService::append(&state.db, dto.student_id, &dto.status).await?;
    Ok((
        StatusCode::CREATED,
        Json(MarkAttendanceResponse { id: record.id }),
    ))
}

/// List one student's attendance, newest first
#[utoipa::path(
    get,
    path = "/api/attendance/{student_id}",
    params(("student_id" = Uuid, Path, description = "Student user id")),
    responses(
        (status = 200, description = "Records for the student", body = [AttendanceRecord]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not your record and not staff", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state, auth_user))]
pub async fn list_student_attendance(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Vec<AttendanceRecord>>, AppError> {
    check_self_or_roles(
        &auth_user,
        student_id,
        &[UserRole::Teacher, UserRole::Admin],
    )?;

    let records = AttendanceService::list_by_student(&state.db, student_id).await?;
    Ok(Json(records))
}

/// Attendance stats for one student over the trailing 30 days
#[utoipa::path(
    get,
    path = "/api/attendance/{student_id}/summary",
    params(("student_id" = Uuid, Path, description = "Student user id")),
    responses(
        (status = 200, description = "Derived stats", body = AttendanceSummary),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not your record and not staff", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state, auth_user))]
pub async fn student_attendance_summary(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(student_id): Path<Uuid>,
) -> Result<Json<AttendanceSummary>, AppError> {
    check_self_or_roles(
        &auth_user,
        student_id,
        &[UserRole::Teacher, UserRole::Admin],
    )?;

    let summary = AttendanceService::summary(&state.db, student_id).await?;
    Ok(Json(summary))
}

/// Full ledger with student identity (teachers and admins)
#[utoipa::path(
    get,
    path = "/api/attendance",
    responses(
        (status = 200, description = "All records, newest first", body = [AttendanceWithStudent]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Students and drivers may not view the full ledger", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn list_all_attendance(
    State(state): State<AppState>,
) -> Result<Json<Vec<AttendanceWithStudent>>, AppError> {
    let records = AttendanceService::list_all(&state.db).await?;
    Ok(Json(records))
}
