use crate::{expenses, users};
use async_trait::async_trait;
use spendwise_core::{
    error::Result,
    storage::{ExpenseStore, UserStore},
    types::*,
};
use sqlx::SqlitePool;

/// `SQLite`-backed store
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExpenseStore for SqliteStore {
    async fn insert_expense(&self, expense: &Expense) -> Result<()> {
        Ok(expenses::insert(&self.pool, expense).await?)
    }

    async fn get_expense(&self, id: &ExpenseId) -> Result<Option<Expense>> {
        Ok(expenses::get_by_id(&self.pool, id).await?)
    }

    async fn list_expenses(&self, owner: &UserId) -> Result<Vec<Expense>> {
        Ok(expenses::get_by_owner(&self.pool, owner).await?)
    }

    async fn update_expense(&self, expense: &Expense) -> Result<bool> {
        Ok(expenses::update(&self.pool, expense).await?)
    }

    async fn delete_expense(&self, id: &ExpenseId, owner: &UserId) -> Result<bool> {
        Ok(expenses::delete(&self.pool, id, owner).await?)
    }
}

#[async_trait]
impl UserStore for SqliteStore {
    async fn create_user(&self, user: NewUser) -> Result<User> {
        Ok(users::create(&self.pool, user).await?)
    }

    async fn get_user(&self, id: &UserId) -> Result<Option<User>> {
        Ok(users::get_by_id(&self.pool, id).await?)
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<(User, String)>> {
        Ok(users::find_credentials(&self.pool, email).await?)
    }

    async fn get_all_users(&self) -> Result<Vec<User>> {
        Ok(users::get_all(&self.pool).await?)
    }
}
