use std::env;
use std::time::Duration;

/// Configuration for the attendance code engine.
///
/// The code lifetime defaults to 30 seconds; the sweeper wakes once a
/// second to retire overdue codes (1-second countdown resolution).
#[derive(Clone, Debug)]
pub struct OtpConfig {
    pub ttl_seconds: u64,
    pub sweep_interval_seconds: u64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: 30,
            sweep_interval_seconds: 1,
        }
    }
}

impl OtpConfig {
    pub fn from_env() -> Self {
        Self {
            ttl_seconds: env::var("OTP_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            sweep_interval_seconds: env::var("OTP_SWEEP_INTERVAL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
        }
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds)
    }
}
