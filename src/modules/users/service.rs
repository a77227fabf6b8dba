use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

use super::model::{CreateUserDto, UpdateProfileDto, User, UserSummary};

const USER_COLUMNS: &str =
    "id, name, email, role, phone, department, year, student_no, created_at, updated_at";

pub struct UserService;

impl UserService {
    #[instrument(skip(db))]
    pub async fn list_users(db: &PgPool) -> Result<Vec<UserSummary>, AppError> {
        let users = sqlx::query_as::<_, UserSummary>(
            "SELECT id, name, email, role FROM users ORDER BY name",
        )
        .fetch_all(db)
        .await
        .map_err(AppError::upstream)?;

        Ok(users)
    }

    #[instrument(skip(db, dto))]
    pub async fn create_user(db: &PgPool, dto: CreateUserDto) -> Result<User, AppError> {
        let hashed_password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (name, email, password, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&hashed_password)
        .bind(dto.role)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(anyhow::anyhow!(
                        "User with email {} already exists",
                        dto.email
                    ));
                }
            }
            AppError::upstream(e)
        })?;

        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn get_profile(db: &PgPool, user_id: Uuid) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id)
        .fetch_optional(db)
        .await
        .map_err(AppError::upstream)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        Ok(user)
    }

    /// Merge the provided fields into the profile; omitted fields keep
    /// their current value.
    #[instrument(skip(db, dto))]
    pub async fn update_profile(
        db: &PgPool,
        user_id: Uuid,
        dto: UpdateProfileDto,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET
                name = COALESCE($1, name),
                phone = COALESCE($2, phone),
                department = COALESCE($3, department),
                year = COALESCE($4, year),
                student_no = COALESCE($5, student_no),
                updated_at = NOW()
             WHERE id = $6
             RETURNING {USER_COLUMNS}"
        ))
        .bind(dto.name)
        .bind(dto.phone)
        .bind(dto.department)
        .bind(dto.year)
        .bind(dto.student_no)
        .bind(user_id)
        .fetch_optional(db)
        .await
        .map_err(AppError::upstream)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        Ok(user)
    }
}
