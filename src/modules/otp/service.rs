use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::attendance::model::AttendanceRecord;
use crate::modules::attendance::service::AttendanceService;
use crate::utils::errors::AppError;

use super::engine::{CodeEngine, SubmitError};
use super::model::GenerateCodeResponse;

pub struct OtpService;

impl OtpService {
    /// Issue a fresh code for the driver, replacing any prior one.
    #[instrument(skip(engine))]
    pub fn generate(engine: &CodeEngine, issuer: Uuid) -> GenerateCodeResponse {
        let generated = engine.generate(issuer);
        tracing::info!(driver = %issuer, ttl = generated.ttl_seconds, "attendance code issued");

        GenerateCodeResponse {
            qr_payload: generated.code.clone(),
            code: generated.code,
            ttl_seconds: generated.ttl_seconds,
            issued_at: generated.issued_at,
        }
    }

    /// Verify a submitted code and, on the winning match, append a
    /// Present record for the submitting student.
    ///
    /// The consume decision is atomic in the engine; the ledger append is
    /// one INSERT. If the append fails the code is reinstated, so no
    /// submission leaves a consumed code without a visible record.
    #[instrument(skip(db, engine, code))]
    pub async fn submit(
        db: &PgPool,
        engine: &CodeEngine,
        student_id: Uuid,
        code: &str,
    ) -> Result<AttendanceRecord, AppError> {
        if code.len() != 6 || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AppError::unprocessable(anyhow::anyhow!(
                "code must be exactly 6 digits"
            )));
        }

        let claim = engine.try_consume(code).map_err(submit_rejection)?;

        match AttendanceService::append(db, student_id, "Present").await {
            Ok(record) => {
                tracing::info!(
                    student = %student_id,
                    driver = %claim.issuer,
                    record = %record.id,
                    "attendance verified via code"
                );
                Ok(record)
            }
            Err(err) => {
                engine.reinstate(&claim);
                Err(err)
            }
        }
    }
}

fn submit_rejection(err: SubmitError) -> AppError {
    match err {
        SubmitError::NoActiveCode => AppError::not_found(err),
        SubmitError::CodeMismatch => AppError::bad_request(err),
        SubmitError::CodeExpired => AppError::gone(err),
        SubmitError::AlreadyConsumed => AppError::conflict(err),
    }
}
