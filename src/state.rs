use sqlx::PgPool;
use std::sync::Arc;

use crate::config::cors::CorsConfig;
use crate::config::database::init_db_pool;
use crate::config::jwt::JwtConfig;
use crate::config::otp::OtpConfig;
use crate::config::rate_limit::RateLimitConfig;
use crate::modules::otp::engine::CodeEngine;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub otp_config: OtpConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
    /// Shared attendance code engine; the expiry sweeper holds a clone.
    pub codes: Arc<CodeEngine>,
}

pub async fn init_app_state() -> AppState {
    let otp_config = OtpConfig::from_env();
    let codes = Arc::new(CodeEngine::new(otp_config.ttl()));

    AppState {
        db: init_db_pool().await,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        rate_limit_config: RateLimitConfig::from_env(),
        otp_config,
        codes,
    }
}
