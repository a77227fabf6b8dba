use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use campusride::config::cors::CorsConfig;
use campusride::config::jwt::JwtConfig;
use campusride::config::otp::OtpConfig;
use campusride::config::rate_limit::RateLimitConfig;
use campusride::modules::otp::engine::CodeEngine;
use campusride::modules::users::model::UserRole;
use campusride::router::init_router;
use campusride::state::AppState;
use campusride::utils::jwt::create_access_token;
use campusride::utils::password::hash_password;
use sqlx::PgPool;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

pub async fn create_test_user(
    pool: &PgPool,
    email: &str,
    password: &str,
    role: UserRole,
) -> TestUser {
    let hashed = hash_password(password).unwrap();

    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (name, email, password, role)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind("Test User")
    .bind(email)
    .bind(hashed)
    .bind(role)
    .fetch_one(pool)
    .await
    .unwrap();

    TestUser {
        id,
        email: email.to_string(),
        password: password.to_string(),
        role,
    }
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

/// Mint a bearer token for the user with the same config the test app
/// verifies against.
#[allow(dead_code)]
pub fn token_for(user: &TestUser, jwt_config: &JwtConfig) -> String {
    create_access_token(user.id, &user.email, user.role, jwt_config).unwrap()
}

pub fn test_state(pool: PgPool) -> AppState {
    test_state_with_code_ttl(pool, Duration::from_secs(30))
}

/// State with an explicit code TTL, for tests that need instant expiry.
#[allow(dead_code)]
pub fn test_state_with_code_ttl(pool: PgPool, ttl: Duration) -> AppState {
    dotenvy::dotenv().ok();
    AppState {
        db: pool,
        jwt_config: JwtConfig::from_env(),
        otp_config: OtpConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        rate_limit_config: RateLimitConfig::from_env(),
        codes: Arc::new(CodeEngine::new(ttl)),
    }
}

#[allow(dead_code)]
pub fn setup_test_app(pool: PgPool) -> (Router, AppState) {
    let state = test_state(pool);
    (init_router(state.clone()), state)
}
