//! Expense queries
//!
//! Timestamps are stored as UTC milliseconds so `ORDER BY date` is numeric.

use crate::error::{Result, StorageError};
use chrono::{DateTime, Utc};
use spendwise_core::types::{Expense, ExpenseId, UserId};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

const COLUMNS: &str = "id, owner_id, title, amount, category, date, created_at, updated_at";

/// Insert a new expense
pub async fn insert(pool: &SqlitePool, expense: &Expense) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO expenses (id, owner_id, title, amount, category, date, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&expense.id)
    .bind(&expense.owner)
    .bind(&expense.title)
    .bind(expense.amount)
    .bind(&expense.category)
    .bind(expense.date.timestamp_millis())
    .bind(expense.created_at.timestamp_millis())
    .bind(expense.updated_at.timestamp_millis())
    .execute(pool)
    .await?;

    Ok(())
}

/// Get expense by ID
pub async fn get_by_id(pool: &SqlitePool, id: &ExpenseId) -> Result<Option<Expense>> {
    let row = sqlx::query(&format!("SELECT {COLUMNS} FROM expenses WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(from_row).transpose()
}

/// Get all expenses of one owner, newest first
pub async fn get_by_owner(pool: &SqlitePool, owner: &UserId) -> Result<Vec<Expense>> {
    let rows = sqlx::query(&format!(
        "SELECT {COLUMNS} FROM expenses WHERE owner_id = ? ORDER BY date DESC, created_at DESC"
    ))
    .bind(owner)
    .fetch_all(pool)
    .await?;

    rows.iter().map(from_row).collect()
}

/// Overwrite title, amount, category, date and updated_at.
///
/// The owner column is part of the filter and never written.
pub async fn update(pool: &SqlitePool, expense: &Expense) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE expenses
        SET title = ?, amount = ?, category = ?, date = ?, updated_at = ?
        WHERE id = ? AND owner_id = ?
        "#,
    )
    .bind(&expense.title)
    .bind(expense.amount)
    .bind(&expense.category)
    .bind(expense.date.timestamp_millis())
    .bind(expense.updated_at.timestamp_millis())
    .bind(&expense.id)
    .bind(&expense.owner)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete an expense owned by `owner`
pub async fn delete(pool: &SqlitePool, id: &ExpenseId, owner: &UserId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM expenses WHERE id = ? AND owner_id = ?")
        .bind(id)
        .bind(owner)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

fn from_row(row: &SqliteRow) -> Result<Expense> {
    Ok(Expense {
        id: row.try_get("id")?,
        owner: row.try_get("owner_id")?,
        title: row.try_get("title")?,
        amount: row.try_get("amount")?,
        category: row.try_get("category")?,
        date: millis(row.try_get("date")?)?,
        created_at: millis(row.try_get("created_at")?)?,
        updated_at: millis(row.try_get("updated_at")?)?,
    })
}

pub(crate) fn millis(value: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(value)
        .ok_or_else(|| StorageError::CorruptRow(format!("invalid timestamp: {value}")))
}
