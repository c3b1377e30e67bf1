//! Spendwise Server Library
//!
//! Authenticated expense-tracking HTTP API: account endpoints plus
//! owner-scoped CRUD over expense records.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use api::create_router;
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::{AuthService, ExpenseService, IdentityResolver};
pub use state::AppState;
