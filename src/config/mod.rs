//! Configuration modules for the campusride API.
//!
//! Each submodule handles one aspect of configuration, loaded from
//! environment variables with sensible development defaults.
//!
//! - [`cors`]: allowed origins for the web dashboard
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`jwt`]: bearer token secret and lifetime
//! - [`otp`]: attendance code lifetime and sweep cadence
//! - [`rate_limit`]: API rate limiting configuration

pub mod cors;
pub mod database;
pub mod jwt;
pub mod otp;
pub mod rate_limit;
