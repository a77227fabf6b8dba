use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Response to a driver's generate request.
///
/// `qr_payload` is what the dashboard renders as a QR image; scanning it
/// yields exactly the code string, so scanned and typed submissions are
/// the same input channel.
#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateCodeResponse {
    pub code: String,
    pub qr_payload: String,
    pub ttl_seconds: u64,
    pub issued_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitCodeRequest {
    #[validate(length(min = 6, max = 6, message = "code must be exactly 6 digits"))]
    pub code: String,
}
