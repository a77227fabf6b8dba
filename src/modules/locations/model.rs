use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// One GPS fix reported by a driver. Appended per report; reads return
/// the newest fix only (latest wins).
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct DriverLocation {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub lat: f64,
    pub lng: f64,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LocationUpdateDto {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LocationAck {
    pub message: String,
}
