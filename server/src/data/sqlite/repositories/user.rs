//! User repository for SQLite operations

use sqlx::SqlitePool;

use crate::data::sqlite::SqliteError;
use crate::data::types::{UserCredentialsRow, UserRow};

type UserTuple = (i64, String, String, i64, f64, i64);

fn to_row((id, email, username, points, co2_saved, created_at): UserTuple) -> UserRow {
    UserRow {
        id,
        email,
        username,
        points,
        co2_saved,
        created_at,
    }
}

/// Create a new user with zero points and zero CO₂ saved
///
/// A duplicate email surfaces as `SqliteError::Conflict`.
pub async fn create_user(
    pool: &SqlitePool,
    email: &str,
    username: &str,
    password_hash: &str,
) -> Result<UserRow, SqliteError> {
    let now = chrono::Utc::now().timestamp();

    let result = sqlx::query(
        "INSERT INTO users (email, password_hash, username, points, co2_saved, created_at) VALUES (?, ?, ?, 0, 0, ?)",
    )
    .bind(email)
    .bind(password_hash)
    .bind(username)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| SqliteError::conflict_on_unique(e, "email already registered"))?;

    Ok(UserRow {
        id: result.last_insert_rowid(),
        email: email.to_string(),
        username: username.to_string(),
        points: 0,
        co2_saved: 0.0,
        created_at: now,
    })
}

/// Get a user by ID
pub async fn get_user(pool: &SqlitePool, id: i64) -> Result<Option<UserRow>, SqliteError> {
    let row = sqlx::query_as::<_, UserTuple>(
        "SELECT id, email, username, points, co2_saved, created_at FROM users WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(to_row))
}

/// Get the stored password hash for an email
pub async fn get_credentials_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<UserCredentialsRow>, SqliteError> {
    let row = sqlx::query_as::<_, (i64, String)>(
        "SELECT id, password_hash FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|(id, password_hash)| UserCredentialsRow { id, password_hash }))
}

/// Check if a user exists
pub async fn user_exists(pool: &SqlitePool, id: i64) -> Result<bool, SqliteError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}
