use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::users::model::UserRole;
use crate::utils::errors::AppError;

use super::model::{AttendanceRecord, AttendanceSummary, AttendanceWithStudent};

/// Trailing window for derived attendance stats.
pub const SUMMARY_WINDOW_DAYS: i64 = 30;

pub struct AttendanceService;

impl AttendanceService {
    /// Append a ledger entry for `student_id`. The referenced user must
    /// exist and hold the student role; nothing else can carry records.
    #[instrument(skip(db))]
    pub async fn append(
        db: &PgPool,
        student_id: Uuid,
        status: &str,
    ) -> Result<AttendanceRecord, AppError> {
        let role = sqlx::query_scalar::<_, UserRole>("SELECT role FROM users WHERE id = $1")
            .bind(student_id)
            .fetch_optional(db)
            .await
            .map_err(AppError::upstream)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))?;

        if role != UserRole::Student {
            return Err(AppError::unprocessable(anyhow::anyhow!(
                "Attendance can only be recorded for students"
            )));
        }

        let record = sqlx::query_as::<_, AttendanceRecord>(
            "INSERT INTO attendance (student_id, status)
             VALUES ($1, $2)
             RETURNING id, student_id, date, status, recorded_at",
        )
        .bind(student_id)
        .bind(status)
        .fetch_one(db)
        .await
        .map_err(AppError::upstream)?;

        Ok(record)
    }

    /// All records for one student, newest first.
    #[instrument(skip(db))]
    pub async fn list_by_student(
        db: &PgPool,
        student_id: Uuid,
    ) -> Result<Vec<AttendanceRecord>, AppError> {
        let records = sqlx::query_as::<_, AttendanceRecord>(
            "SELECT id, student_id, date, status, recorded_at
             FROM attendance
             WHERE student_id = $1
             ORDER BY date DESC",
        )
        .bind(student_id)
        .fetch_all(db)
        .await
        .map_err(AppError::upstream)?;

        Ok(records)
    }

    /// The whole ledger joined with student identity, newest first.
    #[instrument(skip(db))]
    pub async fn list_all(db: &PgPool) -> Result<Vec<AttendanceWithStudent>, AppError> {
        let records = sqlx::query_as::<_, AttendanceWithStudent>(
            "SELECT a.id, a.date, a.status,
                    u.id AS student_id, u.name AS student_name, u.email AS student_email
             FROM attendance a
             JOIN users u ON u.id = a.student_id
             ORDER BY a.date DESC",
        )
        .fetch_all(db)
        .await
        .map_err(AppError::upstream)?;

        Ok(records)
    }

    /// Stats over the trailing window: distinct calendar dates with at
    /// least one record count as present, the remainder as absent.
    #[instrument(skip(db))]
    pub async fn summary(db: &PgPool, student_id: Uuid) -> Result<AttendanceSummary, AppError> {
        let present_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(DISTINCT (date AT TIME ZONE 'UTC')::date)
             FROM attendance
             WHERE student_id = $1
               AND date >= NOW() - make_interval(days => $2)",
        )
        .bind(student_id)
        .bind(SUMMARY_WINDOW_DAYS as i32)
        .fetch_one(db)
        .await
        .map_err(AppError::upstream)?;

        let present_count = present_count.min(SUMMARY_WINDOW_DAYS);
        let rate = ((present_count as f64 / SUMMARY_WINDOW_DAYS as f64) * 100.0).round() as i64;

        Ok(AttendanceSummary {
            window_days: SUMMARY_WINDOW_DAYS,
            present_count,
            absent_count: SUMMARY_WINDOW_DAYS - present_count,
            rate,
        })
    }
}
