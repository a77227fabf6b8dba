//! Maintenance commands dispatched from `main` on argv.
//!
//! - `create-admin <name> <email> <password>`: bootstrap an admin account
//! - `seed`: wipe and repopulate the database with demo users, a week of
//!   attendance history, and a couple of buses

use fake::Fake;
use fake::faker::name::en::Name;
use rand::seq::SliceRandom;
use sqlx::PgPool;
use uuid::Uuid;

use crate::modules::users::model::UserRole;
use crate::utils::password::hash_password;

pub async fn create_admin(
    db: &PgPool,
    name: &str,
    email: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let hashed_password =
        hash_password(password).map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let result = sqlx::query(
        "INSERT INTO users (name, email, password, role)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (email) DO NOTHING",
    )
    .bind(name)
    .bind(email)
    .bind(hashed_password)
    .bind(UserRole::Admin)
    .execute(db)
    .await?;

    if result.rows_affected() == 0 {
        return Err("User with this email already exists".into());
    }

    Ok(())
}

/// Demo data set: one user per role plus a few generated students, each
/// student with a week of attendance history. Everything logs in with
/// password `123456`.
pub async fn seed_demo_data(db: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    sqlx::query("DELETE FROM attendance").execute(db).await?;
    sqlx::query("DELETE FROM driver_locations").execute(db).await?;
    sqlx::query("DELETE FROM buses").execute(db).await?;
    sqlx::query("DELETE FROM users").execute(db).await?;

    // Demo credentials only; low cost keeps reseeding instant.
    let password_hash = bcrypt::hash("123456", 4)?;

    let mut users: Vec<(String, String, UserRole)> = vec![
        ("Admin User".to_string(), "admin@campus.edu".to_string(), UserRole::Admin),
        ("Student User".to_string(), "student@campus.edu".to_string(), UserRole::Student),
        ("Driver User".to_string(), "driver@campus.edu".to_string(), UserRole::Driver),
        ("Teacher User".to_string(), "teacher@campus.edu".to_string(), UserRole::Teacher),
    ];
    for i in 1..=3 {
        let name: String = Name().fake();
        users.push((name, format!("student{}@campus.edu", i), UserRole::Student));
    }

    let mut student_ids = Vec::new();
    let mut driver_id = None;
    for (name, email, role) in &users {
        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO users (name, email, password, role)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(name)
        .bind(email)
        .bind(&password_hash)
        .bind(role)
        .fetch_one(db)
        .await?;

        match role {
            UserRole::Student => student_ids.push(id),
            UserRole::Driver => driver_id = Some(id),
            _ => {}
        }
    }

    // A week of history per student, mostly present.
    let statuses = ["Present", "Present", "Present", "Absent", "Present"];
    for student_id in &student_ids {
        // Pick the week's statuses before touching the database so the
        // thread-local rng never lives across an await.
        let picks: Vec<&str> = {
            let mut rng = rand::thread_rng();
            (0..7)
                .map(|_| statuses.choose(&mut rng).copied().unwrap_or("Present"))
                .collect()
        };

        for (days_ago, status) in picks.into_iter().enumerate() {
            let days_ago = days_ago as i32;
            sqlx::query(
                "INSERT INTO attendance (student_id, status, date, recorded_at)
                 VALUES ($1, $2, NOW() - make_interval(days => $3), NOW() - make_interval(days => $3))",
            )
            .bind(student_id)
            .bind(status)
            .bind(days_ago)
            .execute(db)
            .await?;
        }
    }

    sqlx::query(
        "INSERT INTO buses (bus_no, bus_type, status, driver_id, capacity)
         VALUES ('BUS-01', 'Transport', 'Running', $1, 40),
                ('BUS-02', 'Transport', 'Idle', NULL, 32)",
    )
    .bind(driver_id)
    .execute(db)
    .await?;

    println!(
        "Seeded {} users ({} students), 7 days of attendance, 2 buses",
        users.len(),
        student_ids.len()
    );

    Ok(())
}
