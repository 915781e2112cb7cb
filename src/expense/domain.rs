//! Core expense domain types.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::UserID;

/// Database identifier for an expense.
pub type ExpenseId = i64;

/// Something a user paid for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense.
    pub id: ExpenseId,
    /// What was bought, e.g. "Apple".
    pub title: String,
    /// A free-form grouping, e.g. "Groceries".
    pub category: String,
    /// How the expense was paid for, e.g. "cash".
    pub paid_by: String,
    /// How much was spent. Never zero.
    pub amount: f64,
    /// When the expense was recorded, in UTC.
    pub created_at: OffsetDateTime,
    /// The user who recorded the expense and the only one allowed to delete it.
    pub user_id: UserID,
}

/// The validated fields for a new expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    /// What was bought.
    pub title: String,
    /// A free-form grouping.
    pub category: String,
    /// How the expense was paid for.
    pub paid_by: String,
    /// How much was spent.
    pub amount: f64,
}

/// The columns shown in the expense list.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseSummary {
    pub id: ExpenseId,
    pub title: String,
    pub amount: f64,
}

/// The raw expense form.
///
/// Every field is optional so that a form with missing fields can be told
/// apart from a form with empty fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseForm {
    pub title: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "paidby")]
    pub paid_by: Option<String>,
    pub amount: Option<String>,
}

impl ExpenseForm {
    /// Whether the form has every field, even if some are empty.
    pub fn is_complete(&self) -> bool {
        self.title.is_some()
            && self.category.is_some()
            && self.paid_by.is_some()
            && self.amount.is_some()
    }
}

/// The validation error for each field of an [ExpenseForm], if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    /// Error for the title field.
    pub title: Option<&'static str>,
    /// Error for the category field.
    pub category: Option<&'static str>,
    /// Error for the paid by field.
    pub paid_by: Option<&'static str>,
    /// Error for the amount field.
    pub amount: Option<&'static str>,
}

impl FieldErrors {
    /// Whether every field passed validation.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.category.is_none()
            && self.paid_by.is_none()
            && self.amount.is_none()
    }
}
