use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{DriverLocation, LocationUpdateDto};

pub struct LocationService;

impl LocationService {
    #[instrument(skip(db, dto))]
    pub async fn record(
        db: &PgPool,
        driver_id: Uuid,
        dto: LocationUpdateDto,
    ) -> Result<DriverLocation, AppError> {
        let location = sqlx::query_as::<_, DriverLocation>(
            "INSERT INTO driver_locations (driver_id, lat, lng)
             VALUES ($1, $2, $3)
             RETURNING id, driver_id, lat, lng, recorded_at",
        )
        .bind(driver_id)
        .bind(dto.lat)
        .bind(dto.lng)
        .fetch_one(db)
        .await
        .map_err(AppError::upstream)?;

        Ok(location)
    }

    /// Newest fix for the driver, if any has been reported.
    #[instrument(skip(db))]
    pub async fn latest(db: &PgPool, driver_id: Uuid) -> Result<DriverLocation, AppError> {
        let location = sqlx::query_as::<_, DriverLocation>(
            "SELECT id, driver_id, lat, lng, recorded_at
             FROM driver_locations
             WHERE driver_id = $1
             ORDER BY recorded_at DESC
             LIMIT 1",
        )
        .bind(driver_id)
        .fetch_optional(db)
        .await
        .map_err(AppError::upstream)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("No location reported yet")))?;

        Ok(location)
    }
}
