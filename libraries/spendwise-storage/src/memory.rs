//! In-memory store with the same contract as [`crate::SqliteStore`]

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use spendwise_core::{
    error::{Result, SpendwiseError},
    storage::{ExpenseStore, UserStore},
    types::*,
};
use std::collections::HashMap;
use tokio::sync::RwLock;

struct StoredUser {
    user: User,
    password_hash: String,
}

/// Volatile store, mainly for tests and demos
#[derive(Default)]
pub struct MemoryStore {
    expenses: RwLock<HashMap<ExpenseId, Expense>>,
    users: RwLock<HashMap<UserId, StoredUser>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExpenseStore for MemoryStore {
    async fn insert_expense(&self, expense: &Expense) -> Result<()> {
        let mut expenses = self.expenses.write().await;
        if expenses.contains_key(&expense.id) {
            return Err(SpendwiseError::Duplicate(format!("expense {}", expense.id)));
        }
        expenses.insert(expense.id.clone(), expense.clone());
        Ok(())
    }

    async fn get_expense(&self, id: &ExpenseId) -> Result<Option<Expense>> {
        Ok(self.expenses.read().await.get(id).cloned())
    }

    async fn list_expenses(&self, owner: &UserId) -> Result<Vec<Expense>> {
        let mut owned: Vec<Expense> = self
            .expenses
            .read()
            .await
            .values()
            .filter(|e| e.is_owned_by(owner))
            .cloned()
            .collect();

        owned.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(owned)
    }

    async fn update_expense(&self, expense: &Expense) -> Result<bool> {
        let mut expenses = self.expenses.write().await;
        match expenses.get_mut(&expense.id) {
            Some(stored) if stored.is_owned_by(&expense.owner) => {
                stored.title.clone_from(&expense.title);
                stored.amount = expense.amount;
                stored.category.clone_from(&expense.category);
                stored.date = expense.date;
                stored.updated_at = expense.updated_at;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_expense(&self, id: &ExpenseId, owner: &UserId) -> Result<bool> {
        let mut expenses = self.expenses.write().await;
        if expenses.get(id).is_some_and(|e| e.is_owned_by(owner)) {
            expenses.remove(id);
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        let mut users = self.users.write().await;
        let taken = users
            .values()
            .any(|stored| stored.user.email == new_user.email);
        if taken {
            return Err(SpendwiseError::Duplicate(format!("email {}", new_user.email)));
        }

        let user = User {
            id: UserId::generate(),
            name: new_user.name,
            email: new_user.email,
            created_at: Utc::now().trunc_subsecs(3),
        };
        users.insert(
            user.id.clone(),
            StoredUser {
                user: user.clone(),
                password_hash: new_user.password_hash,
            },
        );
        Ok(user)
    }

    async fn get_user(&self, id: &UserId) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .get(id)
            .map(|stored| stored.user.clone()))
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<(User, String)>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|stored| stored.user.email == email)
            .map(|stored| (stored.user.clone(), stored.password_hash.clone())))
    }

    async fn get_all_users(&self) -> Result<Vec<User>> {
        let mut all: Vec<User> = self
            .users
            .read()
            .await
            .values()
            .map(|stored| stored.user.clone())
            .collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }
}
