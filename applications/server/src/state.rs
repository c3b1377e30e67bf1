/// Shared application state
use crate::services::{AuthService, ExpenseService};
use spendwise_core::UserStore;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub expenses: ExpenseService,
    pub users: Arc<dyn UserStore>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(
        expenses: ExpenseService,
        users: Arc<dyn UserStore>,
        auth_service: Arc<AuthService>,
    ) -> Self {
        Self {
            expenses,
            users,
            auth_service,
        }
    }
}
