//! Middleware for authentication and authorization.
//!
//! 1. The client sends `Authorization: Bearer <token>`
//! 2. [`auth::AuthUser`] verifies the token and exposes the claims
//! 3. [`role`] gates check the claimed role against the endpoint's table
//! 4. The handler runs only if both checks pass
//!
//! A missing or bad token is 401; a valid token with the wrong role
//! is 403. The two are never conflated.

pub mod auth;
pub mod role;
