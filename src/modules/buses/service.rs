use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{Bus, CreateBusDto};

pub struct BusService;

impl BusService {
    #[instrument(skip(db))]
    pub async fn list_buses(db: &PgPool) -> Result<Vec<Bus>, AppError> {
        let buses = sqlx::query_as::<_, Bus>(
            "SELECT id, bus_no, bus_type, status, driver_id, capacity
             FROM buses
             ORDER BY bus_no",
        )
        .fetch_all(db)
        .await
        .map_err(AppError::upstream)?;

        Ok(buses)
    }

    #[instrument(skip(db, dto))]
    pub async fn create_bus(db: &PgPool, dto: CreateBusDto) -> Result<Bus, AppError> {
        let bus = sqlx::query_as::<_, Bus>(
            "INSERT INTO buses (bus_no, bus_type, status, driver_id, capacity)
             VALUES ($1, COALESCE($2, 'Transport'), COALESCE($3, 'Running'), $4, COALESCE($5, 40))
             RETURNING id, bus_no, bus_type, status, driver_id, capacity",
        )
        .bind(&dto.bus_no)
        .bind(dto.bus_type)
        .bind(dto.status)
        .bind(dto.driver_id)
        .bind(dto.capacity)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(anyhow::anyhow!(
                        "Bus {} already exists",
                        dto.bus_no
                    ));
                }
            }
            AppError::upstream(e)
        })?;

        Ok(bus)
    }

    #[instrument(skip(db))]
    pub async fn delete_bus(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM buses WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(AppError::upstream)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Bus not found")));
        }

        Ok(())
    }
}
