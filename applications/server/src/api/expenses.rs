/// Expenses API routes
use crate::{
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use spendwise_core::{
    types::{parse_date, Expense, ExpensePatch, NewExpense, AMOUNT_MESSAGE},
    SpendwiseError,
};

/// Body of both create and update.
///
/// Unknown keys (including any `owner` the client sends) are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ExpenseRequest {
    pub title: Option<String>,
    pub amount: Option<AmountInput>,
    pub category: Option<String>,
    pub date: Option<String>,
}

/// HTML forms submit numbers as strings
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    fn is_blank(&self) -> bool {
        matches!(self, AmountInput::Text(text) if text.trim().is_empty())
    }

    /// `None` for a blank string
    fn into_value(self) -> std::result::Result<Option<f64>, SpendwiseError> {
        match self {
            AmountInput::Number(n) => Ok(Some(n)),
            AmountInput::Text(text) if text.trim().is_empty() => Ok(None),
            AmountInput::Text(text) => text
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| SpendwiseError::invalid_input(AMOUNT_MESSAGE)),
        }
    }
}

impl ExpenseRequest {
    fn amount(&self) -> std::result::Result<Option<f64>, SpendwiseError> {
        self.amount
            .clone()
            .map(AmountInput::into_value)
            .transpose()
            .map(Option::flatten)
    }

    fn date(&self) -> std::result::Result<Option<chrono::DateTime<chrono::Utc>>, SpendwiseError> {
        self.date.as_deref().map(parse_date).transpose().map(Option::flatten)
    }

    fn into_new_expense(self) -> std::result::Result<NewExpense, SpendwiseError> {
        let amount = self.amount()?;
        let date = self.date()?;
        NewExpense::new(self.title.as_deref(), amount, self.category.as_deref(), date)
    }

    /// A blank amount on create is a missing field; on update it is an
    /// amount that can't be applied.
    fn into_patch(self) -> std::result::Result<ExpensePatch, SpendwiseError> {
        if self.amount.as_ref().is_some_and(AmountInput::is_blank) {
            return Err(SpendwiseError::invalid_input(AMOUNT_MESSAGE));
        }
        let amount = self.amount()?;
        let date = self.date()?;
        ExpensePatch::new(self.title.as_deref(), amount, self.category.as_deref(), date)
    }
}

#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    pub message: &'static str,
    pub expense: Expense,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// POST /api/expenses/add
pub async fn add_expense(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    payload: std::result::Result<Json<ExpenseRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ExpenseResponse>)> {
    let Json(req) = payload?;
    let input = req.into_new_expense()?;

    let expense = app_state.expenses.create(auth.user_id(), input).await?;

    Ok((
        StatusCode::CREATED,
        Json(ExpenseResponse {
            message: "Expense added successfully",
            expense,
        }),
    ))
}

/// GET /api/expenses
/// All of the caller's expenses, newest first
pub async fn list_expenses(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Vec<Expense>>> {
    let expenses = app_state.expenses.list(auth.user_id()).await?;
    Ok(Json(expenses))
}

/// GET /api/expenses/:id
pub async fn get_expense(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<Expense>> {
    let expense = app_state.expenses.get(auth.user_id(), &id).await?;
    Ok(Json(expense))
}

/// PUT /api/expenses/:id
/// Only the fields present in the body change
pub async fn update_expense(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<String>,
    payload: std::result::Result<Json<ExpenseRequest>, JsonRejection>,
) -> Result<Json<ExpenseResponse>> {
    let Json(req) = payload?;
    // Id problems win over body problems
    let patch = req.into_patch();
    let expense = match patch {
        Ok(patch) => app_state.expenses.update(auth.user_id(), &id, patch).await?,
        Err(err) => {
            app_state.expenses.get(auth.user_id(), &id).await?;
            return Err(ServerError::from(err));
        }
    };

    Ok(Json(ExpenseResponse {
        message: "Expense updated successfully",
        expense,
    }))
}

/// DELETE /api/expenses/:id
pub async fn delete_expense(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    app_state.expenses.delete(auth.user_id(), &id).await?;

    Ok(Json(MessageResponse {
        message: "Expense deleted successfully",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: serde_json::Value) -> ExpenseRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn amount_accepts_number_or_numeric_string() {
        let from_number = request(serde_json::json!({ "amount": 4.5 }));
        assert_eq!(from_number.amount().unwrap(), Some(4.5));

        let from_text = request(serde_json::json!({ "amount": " 12.25 " }));
        assert_eq!(from_text.amount().unwrap(), Some(12.25));

        let blank = request(serde_json::json!({ "amount": "" }));
        assert_eq!(blank.amount().unwrap(), None);

        let junk = request(serde_json::json!({ "amount": "lots" }));
        assert!(junk.amount().is_err());
    }

    #[test]
    fn owner_in_payload_is_ignored() {
        let req = request(serde_json::json!({
            "title": "Coffee",
            "amount": 4.5,
            "category": "Food",
            "owner": "someone-else",
        }));
        let input = req.into_new_expense().unwrap();
        assert_eq!(input.title, "Coffee");
    }

    #[test]
    fn create_without_title_is_missing_field() {
        let req = request(serde_json::json!({ "amount": 4.5, "category": "Food" }));
        assert!(matches!(
            req.into_new_expense(),
            Err(SpendwiseError::MissingField("title"))
        ));
    }

    #[test]
    fn patch_with_blank_amount_is_rejected() {
        let req = request(serde_json::json!({ "amount": "" }));
        assert!(matches!(
            req.into_patch(),
            Err(SpendwiseError::InvalidInput(msg)) if msg == AMOUNT_MESSAGE
        ));

        let req = request(serde_json::json!({ "title": "Coffee", "amount": " ", "category": "Food" }));
        assert!(matches!(
            req.into_new_expense(),
            Err(SpendwiseError::MissingField("amount"))
        ));
    }

    #[test]
    fn patch_with_blank_date_leaves_date_alone() {
        let req = request(serde_json::json!({ "amount": "5", "date": "" }));
        let patch = req.into_patch().unwrap();
        assert_eq!(patch.amount, Some(5.0));
        assert!(patch.date.is_none());
        assert!(patch.title.is_none());
    }
}
