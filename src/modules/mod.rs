pub mod attendance;
pub mod auth;
pub mod buses;
pub mod locations;
pub mod otp;
pub mod users;

pub use self::auth::model::LoginRequest;
pub use self::users::model::{User, UserRole};
