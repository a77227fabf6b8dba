use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A campus bus. Plain managed entity; no attendance semantics attach
/// to it.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Bus {
    pub id: Uuid,
    pub bus_no: String,
    pub bus_type: String,
    pub status: String,
    pub driver_id: Option<Uuid>,
    pub capacity: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBusDto {
    #[validate(length(min = 1))]
    pub bus_no: String,
    pub bus_type: Option<String>,
    pub status: Option<String>,
    pub driver_id: Option<Uuid>,
    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
}
