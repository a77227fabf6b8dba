use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::users::model::{User, UserRole};
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::{hash_password, verify_password};

use super::model::{LoginRequest, LoginResponse, RegisterRequestDto, RegisterResponse};

const USER_COLUMNS: &str =
    "id, name, email, role, phone, department, year, student_no, created_at, updated_at";

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto))]
    pub async fn register_user(
        db: &PgPool,
        dto: RegisterRequestDto,
    ) -> Result<RegisterResponse, AppError> {
        let existing = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE email = $1")
            .bind(&dto.email)
            .fetch_optional(db)
            .await
            .map_err(AppError::upstream)?;

        if existing.is_some() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Email already exists"
            )));
        }

        let hashed_password = hash_password(&dto.password)?;
        let role = dto.role.unwrap_or(UserRole::Student);

        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO users (name, email, password, role) VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&hashed_password)
        .bind(role)
        .fetch_one(db)
        .await
        .map_err(AppError::upstream)?;

        Ok(RegisterResponse { id })
    }

    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct UserWithPassword {
            id: Uuid,
            name: String,
            email: String,
            password: String,
            role: UserRole,
            phone: Option<String>,
            department: Option<String>,
            year: Option<String>,
            student_no: Option<String>,
            created_at: chrono::DateTime<chrono::Utc>,
            updated_at: chrono::DateTime<chrono::Utc>,
        }

        let row = sqlx::query_as::<_, UserWithPassword>(&format!(
            "SELECT {USER_COLUMNS}, password FROM users WHERE email = $1"
        ))
        .bind(&dto.email)
        .fetch_optional(db)
        .await
        .map_err(AppError::upstream)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        let is_valid = verify_password(&dto.password, &row.password)?;
        if !is_valid {
            return Err(AppError::unauthorized(anyhow::anyhow!("Invalid password")));
        }

        let token = create_access_token(row.id, &row.email, row.role, jwt_config)?;

        Ok(LoginResponse {
            token,
            user: User {
                id: row.id,
                name: row.name,
                email: row.email,
                role: row.role,
                phone: row.phone,
                department: row.department,
                year: row.year,
                student_no: row.student_no,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        })
    }
}
