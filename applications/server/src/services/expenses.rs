/// Expense service - owner-scoped CRUD over an `ExpenseStore`
use spendwise_core::{
    error::{Result, SpendwiseError},
    storage::ExpenseStore,
    types::{Expense, ExpenseId, ExpensePatch, NewExpense, UserId},
};
use std::sync::Arc;

/// Every operation takes the caller resolved by the auth layer. Expenses of
/// other users are reported as not found, never as forbidden.
#[derive(Clone)]
pub struct ExpenseService {
    store: Arc<dyn ExpenseStore>,
}

impl ExpenseService {
    pub fn new(store: Arc<dyn ExpenseStore>) -> Self {
        Self { store }
    }

    /// Persist a new expense owned by `owner`
    pub async fn create(&self, owner: &UserId, input: NewExpense) -> Result<Expense> {
        let expense = Expense::create(owner.clone(), input);
        self.store.insert_expense(&expense).await?;

        tracing::info!(expense_id = %expense.id, owner = %owner, "Expense created");
        Ok(expense)
    }

    /// All of `owner`'s expenses, newest first
    pub async fn list(&self, owner: &UserId) -> Result<Vec<Expense>> {
        self.store.list_expenses(owner).await
    }

    /// One expense by its client-supplied id
    pub async fn get(&self, owner: &UserId, raw_id: &str) -> Result<Expense> {
        let id = ExpenseId::parse(raw_id)?;
        self.find_owned(owner, &id).await
    }

    /// Merge `patch` into an owned expense.
    ///
    /// An empty patch returns the stored record without writing.
    pub async fn update(&self, owner: &UserId, raw_id: &str, patch: ExpensePatch) -> Result<Expense> {
        let id = ExpenseId::parse(raw_id)?;
        let mut expense = self.find_owned(owner, &id).await?;

        if !expense.apply(patch) {
            return Ok(expense);
        }

        // Row may have been deleted since the read
        if !self.store.update_expense(&expense).await? {
            return Err(not_found(&id));
        }

        tracing::info!(expense_id = %id, owner = %owner, "Expense updated");
        Ok(expense)
    }

    /// Permanently remove an owned expense
    pub async fn delete(&self, owner: &UserId, raw_id: &str) -> Result<()> {
        let id = ExpenseId::parse(raw_id)?;
        let expense = self.find_owned(owner, &id).await?;

        if !self.store.delete_expense(&expense.id, owner).await? {
            return Err(not_found(&id));
        }

        tracing::info!(expense_id = %id, owner = %owner, "Expense deleted");
        Ok(())
    }

    async fn find_owned(&self, owner: &UserId, id: &ExpenseId) -> Result<Expense> {
        match self.store.get_expense(id).await? {
            Some(expense) if expense.is_owned_by(owner) => Ok(expense),
            Some(_) => {
                tracing::debug!(expense_id = %id, caller = %owner, "Expense owned by another user");
                Err(not_found(id))
            }
            None => Err(not_found(id)),
        }
    }
}

fn not_found(id: &ExpenseId) -> SpendwiseError {
    SpendwiseError::not_found("Expense", id.as_str())
}
