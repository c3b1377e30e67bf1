//! User management and authentication queries

use crate::error::{Result, StorageError};
use crate::expenses::millis;
use chrono::{SubsecRound, Utc};
use spendwise_core::types::{NewUser, User, UserId};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Create a user with a freshly generated ID
///
/// # Errors
///
/// Returns [`StorageError::Duplicate`] if the email is already registered
pub async fn create(pool: &SqlitePool, new_user: NewUser) -> Result<User> {
    let user = User {
        id: UserId::generate(),
        name: new_user.name,
        email: new_user.email,
        created_at: Utc::now().trunc_subsecs(3),
    };

    sqlx::query(
        "INSERT INTO users (id, name, email, password_hash, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&user.id)
    .bind(&user.name)
    .bind(&user.email)
    .bind(&new_user.password_hash)
    .bind(user.created_at.timestamp_millis())
    .execute(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            StorageError::Duplicate(format!("email {}", user.email))
        }
        other => StorageError::Database(other),
    })?;

    Ok(user)
}

/// Get a user by ID
pub async fn get_by_id(pool: &SqlitePool, id: &UserId) -> Result<Option<User>> {
    let row = sqlx::query("SELECT id, name, email, created_at FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(from_row).transpose()
}

/// Get a user together with their password hash
///
/// # Returns
///
/// `None` if no user has that email
pub async fn find_credentials(pool: &SqlitePool, email: &str) -> Result<Option<(User, String)>> {
    let row = sqlx::query(
        "SELECT id, name, email, created_at, password_hash FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    row.map(|row| -> Result<(User, String)> {
        let user = from_row(&row)?;
        let hash: String = row.try_get("password_hash")?;
        Ok((user, hash))
    })
    .transpose()
}

/// Get all users
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query("SELECT id, name, email, created_at FROM users ORDER BY name")
        .fetch_all(pool)
        .await?;

    rows.iter().map(from_row).collect()
}

fn from_row(row: &SqliteRow) -> Result<User> {
    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        created_at: millis(row.try_get("created_at")?)?,
    })
}
