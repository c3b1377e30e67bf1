//! Spendwise Core
//!
//! Storage-agnostic domain types, traits, and error handling for Spendwise.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Expense`, `NewExpense`, `ExpensePatch`, `User`
//! - **Core Traits**: `ExpenseStore`, `UserStore`
//! - **Error Handling**: Unified `SpendwiseError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use spendwise_core::types::{Expense, NewExpense, UserId};
//!
//! let owner = UserId::generate();
//! let new_expense = NewExpense::new(Some("Coffee"), Some(4.5), Some("Food"), None).unwrap();
//! let expense = Expense::create(owner.clone(), new_expense);
//!
//! assert!(expense.is_owned_by(&owner));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{Result, SpendwiseError};
pub use storage::{ExpenseStore, UserStore};

pub use types::{Expense, ExpenseId, ExpensePatch, NewExpense, NewUser, User, UserId};
