//! Role-based authorization for the HTTP surface.
//!
//! Two mechanisms, both matching on the closed [`UserRole`] enum:
//!
//! 1. Router layers via [`require_roles`] and the per-role wrappers, for
//!    routes where one role set covers the whole nested router
//! 2. [`check_any_role`] / [`check_self_or_roles`] helpers inside
//!    handlers, for routes whose rule depends on the request (e.g. a
//!    student reading their own attendance)

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::middleware::auth::AuthUser;
use crate::modules::users::model::UserRole;
use crate::state::AppState;
use crate::utils::errors::AppError;
use uuid::Uuid;

/// Middleware that rejects any authenticated user whose role is not in
/// `allowed_roles`. Authentication failures surface as 401, role
/// failures as 403.
pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed_roles: &[UserRole],
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    check_any_role(&auth_user, allowed_roles)?;

    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Layer for admin-only routers (user and bus management).
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, &[UserRole::Admin]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Layer for staff routers: teachers and admins (aggregate attendance).
pub async fn require_staff(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, &[UserRole::Teacher, UserRole::Admin]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Layer for driver-only routers (code generation, location updates).
pub async fn require_driver(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, &[UserRole::Driver]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Layer for student-only routers (code submission).
pub async fn require_student(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, &[UserRole::Student]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Check that the user holds one of `allowed_roles`.
pub fn check_any_role(auth_user: &AuthUser, allowed_roles: &[UserRole]) -> Result<(), AppError> {
    let role = auth_user.role();
    if !allowed_roles.contains(&role) {
        return Err(AppError::forbidden(anyhow::anyhow!(
            "Access denied for role {}",
            role
        )));
    }
    Ok(())
}

/// Check that the user either is `subject` themselves or holds one of
/// `privileged_roles`. Used where students may act on their own records
/// while staff may act on anyone's.
pub fn check_self_or_roles(
    auth_user: &AuthUser,
    subject: Uuid,
    privileged_roles: &[UserRole],
) -> Result<(), AppError> {
    if auth_user.user_id()? == subject {
        return Ok(());
    }
    check_any_role(auth_user, privileged_roles).map_err(|_| {
        AppError::forbidden(anyhow::anyhow!(
            "Access denied: not your record and role {} is not permitted",
            auth_user.role()
        ))
    })
}
