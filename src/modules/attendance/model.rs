//! Attendance ledger models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// One ledger entry. Append-only: rows are never mutated after insert,
/// and nothing stops a student accruing several rows on the same day.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub student_id: Uuid,
    pub date: DateTime<Utc>,
    pub status: String,
    pub recorded_at: DateTime<Utc>,
}

/// Ledger entry joined with the student's name and email, for the staff
/// overview listing.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, ToSchema)]
pub struct AttendanceWithStudent {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub status: String,
    pub student_id: Uuid,
    pub student_name: String,
    pub student_email: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MarkAttendanceDto {
    pub student_id: Uuid,
    #[validate(length(min = 1))]
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MarkAttendanceResponse {
    pub id: Uuid,
}

/// Derived stats over a trailing window, computed on read and never
/// stored. A calendar date with at least one record counts as present.
#[derive(Debug, Serialize, PartialEq, Eq, ToSchema)]
pub struct AttendanceSummary {
    pub window_days: i64,
    pub present_count: i64,
    pub absent_count: i64,
    /// Percentage, rounded to the nearest integer.
    pub rate: i64,
}
