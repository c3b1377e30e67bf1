//! Storage traits
//!
//! These abstract persistence so the expense rules can run against `SQLite`
//! in production and an in-memory map in tests. Implementations do not
//! enforce ownership themselves; callers check `Expense::is_owned_by`.

use crate::error::Result;
use crate::types::{Expense, ExpenseId, NewUser, User, UserId};
use async_trait::async_trait;

/// Persistence for expense records
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Insert a freshly created expense
    async fn insert_expense(&self, expense: &Expense) -> Result<()>;

    /// Get an expense by ID regardless of owner
    async fn get_expense(&self, id: &ExpenseId) -> Result<Option<Expense>>;

    /// All expenses of `owner`, newest `date` first
    async fn list_expenses(&self, owner: &UserId) -> Result<Vec<Expense>>;

    /// Overwrite the mutable fields of an existing expense in one write.
    ///
    /// Returns `false` if no row matched `expense.id` and `expense.owner`.
    async fn update_expense(&self, expense: &Expense) -> Result<bool>;

    /// Remove an expense owned by `owner`.
    ///
    /// Returns `false` if nothing was deleted.
    async fn delete_expense(&self, id: &ExpenseId, owner: &UserId) -> Result<bool>;
}

/// Persistence for user accounts and their credentials
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create a user; fails with `Duplicate` if the email is taken
    async fn create_user(&self, user: NewUser) -> Result<User>;

    /// Get a user by ID
    async fn get_user(&self, id: &UserId) -> Result<Option<User>>;

    /// Look up a user and their password hash by (normalized) email
    async fn find_credentials(&self, email: &str) -> Result<Option<(User, String)>>;

    /// Get all users, ordered by name
    async fn get_all_users(&self) -> Result<Vec<User>>;
}
