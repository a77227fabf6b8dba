mod common;

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use campusride::modules::users::model::UserRole;
use campusride::router::init_router;
use common::{
    create_test_user, generate_unique_email, setup_test_app, test_state_with_code_ttl, token_for,
};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

fn authed_post(uri: &str, token: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method("POST")
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

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_driver_generates_six_digit_code(pool: PgPool) {
    let driver =
        create_test_user(&pool, &generate_unique_email(), "pass1234", UserRole::Driver).await;
    let (app, state) = setup_test_app(pool);
    let token = token_for(&driver, &state.jwt_config);

    let response = app
        .oneshot(authed_post("/api/otp/generate", &token, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let code = body["code"].as_str().unwrap();
    let numeric: u32 = code.parse().unwrap();

    assert_eq!(code.len(), 6);
    assert!((100_000..=999_999).contains(&numeric));
    assert_eq!(body["qr_payload"], body["code"]);
    assert_eq!(body["ttl_seconds"], 30);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_only_drivers_generate_codes(pool: PgPool) {
    let (app, state) = setup_test_app(pool.clone());

    for role in [UserRole::Student, UserRole::Teacher, UserRole::Admin] {
        let user = create_test_user(&pool, &generate_unique_email(), "pass1234", role).await;
        let token = token_for(&user, &state.jwt_config);

        let response = app
            .clone()
            .oneshot(authed_post("/api/otp/generate", &token, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN, "role {:?}", role);
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_submit_correct_code_records_attendance(pool: PgPool) {
    let driver =
        create_test_user(&pool, &generate_unique_email(), "pass1234", UserRole::Driver).await;
    let student =
        create_test_user(&pool, &generate_unique_email(), "pass1234", UserRole::Student).await;
    let (app, state) = setup_test_app(pool.clone());

    let driver_token = token_for(&driver, &state.jwt_config);
    let response = app
        .clone()
        .oneshot(authed_post("/api/otp/generate", &driver_token, None))
        .await
        .unwrap();
    let code = json_body(response).await["code"].as_str().unwrap().to_string();

    let student_token = token_for(&student, &state.jwt_config);
    let response = app
        .oneshot(authed_post(
            "/api/otp/submit",
            &student_token,
            Some(json!({ "code": code })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let record = json_body(response).await;
    assert_eq!(record["student_id"], student.id.to_string());
    assert_eq!(record["status"], "Present");

    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM attendance WHERE student_id = $1 AND status = 'Present'",
    )
    .bind(student.id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_second_submission_of_consumed_code_is_conflict(pool: PgPool) {
    let driver =
        create_test_user(&pool, &generate_unique_email(), "pass1234", UserRole::Driver).await;
    let first =
        create_test_user(&pool, &generate_unique_email(), "pass1234", UserRole::Student).await;
    let second =
        create_test_user(&pool, &generate_unique_email(), "pass1234", UserRole::Student).await;
    let (app, state) = setup_test_app(pool.clone());

    let driver_token = token_for(&driver, &state.jwt_config);
    let response = app
        .clone()
        .oneshot(authed_post("/api/otp/generate", &driver_token, None))
        .await
        .unwrap();
    let code = json_body(response).await["code"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(authed_post(
            "/api/otp/submit",
            &token_for(&first, &state.jwt_config),
            Some(json!({ "code": code })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(authed_post(
            "/api/otp/submit",
            &token_for(&second, &state.jwt_config),
            Some(json!({ "code": code })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Exactly one record in total came out of the two submissions.
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM attendance")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_wrong_code_is_rejected_and_code_survives(pool: PgPool) {
    let driver =
        create_test_user(&pool, &generate_unique_email(), "pass1234", UserRole::Driver).await;
    let student =
        create_test_user(&pool, &generate_unique_email(), "pass1234", UserRole::Student).await;
    let (app, state) = setup_test_app(pool.clone());

    let driver_token = token_for(&driver, &state.jwt_config);
    let response = app
        .clone()
        .oneshot(authed_post("/api/otp/generate", &driver_token, None))
        .await
        .unwrap();
    let code = json_body(response).await["code"].as_str().unwrap().to_string();
    let wrong = if code == "123456" { "654321" } else { "123456" };

    let student_token = token_for(&student, &state.jwt_config);
    let response = app
        .clone()
        .oneshot(authed_post(
            "/api/otp/submit",
            &student_token,
            Some(json!({ "code": wrong })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The active code is untouched by the wrong guess.
    let response = app
        .oneshot(authed_post(
            "/api/otp/submit",
            &student_token,
            Some(json!({ "code": code })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_submit_with_no_active_code_is_404(pool: PgPool) {
    let student =
        create_test_user(&pool, &generate_unique_email(), "pass1234", UserRole::Student).await;
    let (app, state) = setup_test_app(pool);

    let response = app
        .oneshot(authed_post(
            "/api/otp/submit",
            &token_for(&student, &state.jwt_config),
            Some(json!({ "code": "123456" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_expired_code_is_gone_and_creates_no_record(pool: PgPool) {
    let driver =
        create_test_user(&pool, &generate_unique_email(), "pass1234", UserRole::Driver).await;
    let student =
        create_test_user(&pool, &generate_unique_email(), "pass1234", UserRole::Student).await;

    // Zero TTL: every code is past its deadline the moment it is issued.
    let state = test_state_with_code_ttl(pool.clone(), Duration::from_secs(0));
    let app = init_router(state.clone());

    let response = app
        .clone()
        .oneshot(authed_post(
            "/api/otp/generate",
            &token_for(&driver, &state.jwt_config),
            None,
        ))
        .await
        .unwrap();
    let code = json_body(response).await["code"].as_str().unwrap().to_string();

    let response = app
        .oneshot(authed_post(
            "/api/otp/submit",
            &token_for(&student, &state.jwt_config),
            Some(json!({ "code": code })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::GONE);

    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM attendance")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_only_students_submit_codes(pool: PgPool) {
    let (app, state) = setup_test_app(pool.clone());

    for role in [UserRole::Driver, UserRole::Teacher, UserRole::Admin] {
        let user = create_test_user(&pool, &generate_unique_email(), "pass1234", role).await;
        let token = token_for(&user, &state.jwt_config);

        let response = app
            .clone()
            .oneshot(authed_post(
                "/api/otp/submit",
                &token,
                Some(json!({ "code": "123456" })),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN, "role {:?}", role);
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_non_numeric_code_is_validation_error(pool: PgPool) {
    let student =
        create_test_user(&pool, &generate_unique_email(), "pass1234", UserRole::Student).await;
    let (app, state) = setup_test_app(pool);
    let token = token_for(&student, &state.jwt_config);

    for bad in ["12345", "1234567", "12a456"] {
        let response = app
            .clone()
            .oneshot(authed_post(
                "/api/otp/submit",
                &token,
                Some(json!({ "code": bad })),
            ))
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "code {:?}",
            bad
        );
    }
}
