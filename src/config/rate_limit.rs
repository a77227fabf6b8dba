use tower_governor::governor::{GovernorConfig, GovernorConfigBuilder};
use tower_governor::key_extractor::PeerIpKeyExtractor;

/// Per-peer-IP rate limit profiles.
///
/// Login is throttled harder than the rest of the API: credential
/// guessing is the only abuse vector this service realistically sees.
#[derive(Clone, Debug)]
pub struct RateLimitConfig {
    pub login_per_second: u64,
    pub login_burst_size: u32,
    pub api_per_second: u64,
    pub api_burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            login_per_second: 1,
            login_burst_size: 5,
            api_per_second: 10,
            api_burst_size: 50,
        }
    }
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            login_per_second: read_env("RATE_LIMIT_LOGIN_PER_SECOND", defaults.login_per_second),
            login_burst_size: read_env("RATE_LIMIT_LOGIN_BURST_SIZE", defaults.login_burst_size),
            api_per_second: read_env("RATE_LIMIT_API_PER_SECOND", defaults.api_per_second),
            api_burst_size: read_env("RATE_LIMIT_API_BURST_SIZE", defaults.api_burst_size),
        }
    }

    pub fn login_governor_config(
        &self,
    ) -> GovernorConfig<PeerIpKeyExtractor, ::governor::middleware::NoOpMiddleware> {
        build_governor(self.login_per_second, self.login_burst_size)
    }

    pub fn api_governor_config(
        &self,
    ) -> GovernorConfig<PeerIpKeyExtractor, ::governor::middleware::NoOpMiddleware> {
        build_governor(self.api_per_second, self.api_burst_size)
    }
}

fn read_env<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn build_governor(
    per_second: u64,
    burst_size: u32,
) -> GovernorConfig<PeerIpKeyExtractor, ::governor::middleware::NoOpMiddleware> {
    GovernorConfigBuilder::default()
        .per_second(per_second)
        .burst_size(burst_size)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .expect("Failed to build rate limiter config")
}
