/// Server services
pub mod auth;
pub mod expenses;

pub use auth::{AuthService, IdentityResolver};
pub use expenses::ExpenseService;
