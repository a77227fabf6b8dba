use axum::http::StatusCode;
use campusride::middleware::auth::AuthUser;
use campusride::middleware::role::{check_any_role, check_self_or_roles};
use campusride::modules::auth::model::Claims;
use campusride::modules::users::model::UserRole;
use uuid::Uuid;

fn create_test_auth_user(role: UserRole) -> AuthUser {
    AuthUser(Claims {
        sub: Uuid::new_v4().to_string(),
        email: "test@example.com".to_string(),
        role,
        exp: 9999999999,
        iat: 1234567890,
    })
}

#[test]
fn test_check_any_role_exact_match() {
    assert!(check_any_role(&create_test_auth_user(UserRole::Admin), &[UserRole::Admin]).is_ok());
    assert!(check_any_role(&create_test_auth_user(UserRole::Driver), &[UserRole::Driver]).is_ok());
    assert!(
        check_any_role(&create_test_auth_user(UserRole::Student), &[UserRole::Student]).is_ok()
    );
    assert!(
        check_any_role(&create_test_auth_user(UserRole::Teacher), &[UserRole::Teacher]).is_ok()
    );
}

#[test]
fn test_check_any_role_multiple_allowed() {
    let staff = [UserRole::Teacher, UserRole::Admin];

    assert!(check_any_role(&create_test_auth_user(UserRole::Teacher), &staff).is_ok());
    assert!(check_any_role(&create_test_auth_user(UserRole::Admin), &staff).is_ok());
    assert!(check_any_role(&create_test_auth_user(UserRole::Student), &staff).is_err());
    assert!(check_any_role(&create_test_auth_user(UserRole::Driver), &staff).is_err());
}

#[test]
fn test_role_failure_is_forbidden_not_unauthorized() {
    let err =
        check_any_role(&create_test_auth_user(UserRole::Student), &[UserRole::Admin]).unwrap_err();

    assert_eq!(err.status, StatusCode::FORBIDDEN);
}

#[test]
fn test_check_self_allows_own_subject() {
    let user = create_test_auth_user(UserRole::Student);
    let own_id = user.user_id().unwrap();

    assert!(check_self_or_roles(&user, own_id, &[UserRole::Teacher, UserRole::Admin]).is_ok());
}

#[test]
fn test_check_self_rejects_foreign_subject_without_role() {
    let user = create_test_auth_user(UserRole::Student);

    let err = check_self_or_roles(&user, Uuid::new_v4(), &[UserRole::Teacher, UserRole::Admin])
        .unwrap_err();
    assert_eq!(err.status, StatusCode::FORBIDDEN);
}

#[test]
fn test_check_self_privileged_roles_reach_any_subject() {
    for role in [UserRole::Teacher, UserRole::Admin] {
        let user = create_test_auth_user(role);
        assert!(
            check_self_or_roles(&user, Uuid::new_v4(), &[UserRole::Teacher, UserRole::Admin])
                .is_ok()
        );
    }
}

#[test]
fn test_driver_never_reaches_student_records() {
    let driver = create_test_auth_user(UserRole::Driver);

    let err = check_self_or_roles(&driver, Uuid::new_v4(), &[UserRole::Teacher, UserRole::Admin])
        .unwrap_err();
    assert_eq!(err.status, StatusCode::FORBIDDEN);
}
