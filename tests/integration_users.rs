mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use campusride::modules::users::model::UserRole;
use common::{create_test_user, generate_unique_email, setup_test_app, token_for};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

fn authed_request(method: &str, uri: &str, token: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token));

    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_lists_users(pool: PgPool) {
    let admin =
        create_test_user(&pool, &generate_unique_email(), "pass1234", UserRole::Admin).await;
    create_test_user(&pool, &generate_unique_email(), "pass1234", UserRole::Student).await;

    let (app, state) = setup_test_app(pool);
    let token = token_for(&admin, &state.jwt_config);

    let response = app
        .oneshot(authed_request("GET", "/api/users", &token, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let users: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();

    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|u| u.get("password").is_none()));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_user_listing_is_admin_only(pool: PgPool) {
    let (app, state) = setup_test_app(pool.clone());

    for role in [UserRole::Student, UserRole::Driver, UserRole::Teacher] {
        let user = create_test_user(&pool, &generate_unique_email(), "pass1234", role).await;
        let token = token_for(&user, &state.jwt_config);

        let response = app
            .clone()
            .oneshot(authed_request("GET", "/api/users", &token, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN, "role {:?}", role);
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_creates_user_with_role(pool: PgPool) {
    let admin =
        create_test_user(&pool, &generate_unique_email(), "pass1234", UserRole::Admin).await;
    let (app, state) = setup_test_app(pool);
    let token = token_for(&admin, &state.jwt_config);
    let email = generate_unique_email();

    let response = app
        .oneshot(authed_request(
            "POST",
            "/api/users",
            &token,
            Some(json!({
                "name": "New Driver",
                "email": email,
                "password": "secret123",
                "role": "driver"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let user: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(user["role"], "driver");
    assert_eq!(user["email"], email);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_every_role_reads_own_profile(pool: PgPool) {
    let (app, state) = setup_test_app(pool.clone());

    for role in [
        UserRole::Student,
        UserRole::Driver,
        UserRole::Teacher,
        UserRole::Admin,
    ] {
        let user = create_test_user(&pool, &generate_unique_email(), "pass1234", role).await;
        let token = token_for(&user, &state.jwt_config);

        let response = app
            .clone()
            .oneshot(authed_request("GET", "/api/users/me", &token, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "role {:?}", role);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let profile: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(profile["id"], user.id.to_string());
        assert_eq!(profile["role"], role.as_str());
        assert!(profile.get("password").is_none());
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_profile_update_merges_fields(pool: PgPool) {
    let student =
        create_test_user(&pool, &generate_unique_email(), "pass1234", UserRole::Student).await;
    let (app, state) = setup_test_app(pool);
    let token = token_for(&student, &state.jwt_config);

    let response = app
        .clone()
        .oneshot(authed_request(
            "PUT",
            "/api/users/me",
            &token,
            Some(json!({ "phone": "555-0102", "department": "CSE", "year": "3" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let profile: serde_json::Value = serde_json::from_slice(&body).unwrap();

    // Updated fields land, untouched fields survive.
    assert_eq!(profile["phone"], "555-0102");
    assert_eq!(profile["department"], "CSE");
    assert_eq!(profile["year"], "3");
    assert_eq!(profile["name"], "Test User");
    assert_eq!(profile["email"], student.email);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_profile_requires_token(pool: PgPool) {
    let (app, _state) = setup_test_app(pool);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/users/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
