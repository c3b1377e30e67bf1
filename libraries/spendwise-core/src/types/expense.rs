/// Expense domain types
use super::ids::{ExpenseId, UserId};
use crate::error::{Result, SpendwiseError};
use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// A single spending entry owned by exactly one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique expense identifier, immutable
    pub id: ExpenseId,

    /// User that created the expense, immutable
    pub owner: UserId,

    /// Short description, never blank
    pub title: String,

    /// Positive, currency-agnostic magnitude
    pub amount: f64,

    /// Free-form label
    pub category: String,

    /// When the money was spent
    pub date: DateTime<Utc>,

    /// When the record was created
    pub created_at: DateTime<Utc>,
    /// Last time an update changed a field
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Build a fresh record for `owner` from validated input
    pub fn create(owner: UserId, input: NewExpense) -> Self {
        let now = now();
        Self {
            id: ExpenseId::generate(),
            owner,
            title: input.title,
            amount: input.amount,
            category: input.category,
            date: input.date.map_or(now, |date| date.trunc_subsecs(3)),
            created_at: now,
            updated_at: now,
        }
    }

    /// Ownership predicate checked before every read-by-id or mutation
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner == user_id
    }

    /// Merge a patch into this record.
    ///
    /// Returns `true` if any field was applied. `updated_at` only moves when
    /// something changed.
    pub fn apply(&mut self, patch: ExpensePatch) -> bool {
        if patch.is_empty() {
            return false;
        }

        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(date) = patch.date {
            self.date = date.trunc_subsecs(3);
        }

        self.updated_at = now();
        true
    }
}

/// Validated input for creating an expense
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// Trimmed, non-empty title
    pub title: String,
    /// Finite and greater than zero
    pub amount: f64,
    /// Trimmed, non-empty category
    pub category: String,
    /// Defaults to creation time when `None`
    pub date: Option<DateTime<Utc>>,
}

impl NewExpense {
    /// Validate raw create input.
    ///
    /// `title`, `amount` and `category` are required; blank strings count as
    /// missing.
    pub fn new(
        title: Option<&str>,
        amount: Option<f64>,
        category: Option<&str>,
        date: Option<DateTime<Utc>>,
    ) -> Result<Self> {
        let title = required_text(title, "title")?;
        let amount = validate_amount(amount.ok_or(SpendwiseError::MissingField("amount"))?)?;
        let category = required_text(category, "category")?;

        Ok(Self {
            title,
            amount,
            category,
            date,
        })
    }
}

/// Partial replacement of expense fields.
///
/// A `Some` field is an intent to update and has already been validated;
/// `None` leaves the stored value untouched. The owner is not patchable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpensePatch {
    /// Replacement title
    pub title: Option<String>,
    /// Replacement amount
    pub amount: Option<f64>,
    /// Replacement category
    pub category: Option<String>,
    /// Replacement date
    pub date: Option<DateTime<Utc>>,
}

impl ExpensePatch {
    /// Validate the supplied fields of an update.
    ///
    /// Nothing is required here, so a blank title or category is an
    /// `InvalidInput` naming the field rather than a `MissingField`.
    pub fn new(
        title: Option<&str>,
        amount: Option<f64>,
        category: Option<&str>,
        date: Option<DateTime<Utc>>,
    ) -> Result<Self> {
        Ok(Self {
            title: title.map(|t| non_blank(t, "title")).transpose()?,
            amount: amount.map(validate_amount).transpose()?,
            category: category.map(|c| non_blank(c, "category")).transpose()?,
            date,
        })
    }

    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.amount.is_none() && self.category.is_none() && self.date.is_none()
    }
}

/// Parse a client-supplied date.
///
/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates (midnight UTC).
/// Blank input yields `None`.
pub fn parse_date(raw: &str) -> Result<Option<DateTime<Utc>>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(timestamp.with_timezone(&Utc).trunc_subsecs(3)));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|midnight| Some(midnight.and_utc()))
        .ok_or_else(|| SpendwiseError::invalid_input(format!("date is not a valid date: {raw}")))
}

/// Current time at the millisecond precision records are stored with
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

fn required_text(value: Option<&str>, field: &'static str) -> Result<String> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(SpendwiseError::MissingField(field)),
    }
}

fn non_blank(value: &str, field: &'static str) -> Result<String> {
    let text = value.trim();
    if text.is_empty() {
        return Err(SpendwiseError::invalid_input(format!("{field} must not be empty")));
    }
    Ok(text.to_string())
}

/// Message for any amount that is not a finite number above zero
pub const AMOUNT_MESSAGE: &str = "amount must be a positive number";

fn validate_amount(amount: f64) -> Result<f64> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(SpendwiseError::invalid_input(AMOUNT_MESSAGE))
    }
}
