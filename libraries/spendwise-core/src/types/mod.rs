//! Domain types

mod expense;
mod ids;
mod user;

pub use expense::{parse_date, Expense, ExpensePatch, NewExpense, AMOUNT_MESSAGE};
pub use ids::{ExpenseId, UserId};
pub use user::{normalize_email, NewUser, User};
