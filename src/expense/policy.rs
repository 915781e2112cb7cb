//! The rules for creating and deleting expenses.

use rusqlite::Connection;

use crate::{
    Error, UserID,
    expense::{
        Expense, ExpenseForm, ExpenseId, FieldErrors, NewExpense,
        db::{delete_expense, get_expense},
    },
};

pub const TITLE_REQUIRED: &str = "title is required";
pub const CATEGORY_REQUIRED: &str = "category is required";
pub const PAID_BY_REQUIRED: &str = "paid by is required";
pub const AMOUNT_NOT_A_NUMBER: &str = "amount must be a number";
pub const AMOUNT_ZERO: &str = "amount can not be zero";

fn validate_required(value: Option<&str>, error_message: &'static str) -> Option<&'static str> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => None,
        _ => Some(error_message),
    }
}

fn parse_amount(raw_amount: Option<&str>) -> Result<f64, &'static str> {
    let amount = raw_amount
        .map(str::trim)
        .and_then(|amount| amount.parse::<f64>().ok())
        .filter(|amount| amount.is_finite())
        .ok_or(AMOUNT_NOT_A_NUMBER)?;

    // Amounts are shown in cents, so anything that rounds to 0.00 counts as zero.
    if (amount * 100.0).round() == 0.0 {
        return Err(AMOUNT_ZERO);
    }

    Ok(amount)
}

/// Check every field of `form` and build the expense to store.
///
/// Text fields are trimmed and must not be empty. The amount must be a
/// finite number that is not zero when rounded to cents.
///
/// # Errors
///
/// Returns the error message for every invalid field at once.
pub fn validate_create(form: &ExpenseForm) -> Result<NewExpense, FieldErrors> {
    let amount = parse_amount(form.amount.as_deref());

    let errors = FieldErrors {
        title: validate_required(form.title.as_deref(), TITLE_REQUIRED),
        category: validate_required(form.category.as_deref(), CATEGORY_REQUIRED),
        paid_by: validate_required(form.paid_by.as_deref(), PAID_BY_REQUIRED),
        amount: amount.err(),
    };

    match amount {
        Ok(amount) if errors.is_empty() => Ok(NewExpense {
            title: form.title.as_deref().unwrap_or_default().trim().to_owned(),
            category: form.category.as_deref().unwrap_or_default().trim().to_owned(),
            paid_by: form.paid_by.as_deref().unwrap_or_default().trim().to_owned(),
            amount,
        }),
        _ => Err(errors),
    }
}

/// Whether `user_id` may delete `expense`: only its owner can.
pub fn authorize_delete(expense: &Expense, user_id: UserID) -> bool {
    expense.user_id == user_id
}

/// Delete the expense `expense_id` on behalf of `user_id`.
///
/// # Errors
///
/// Returns:
/// - [Error::DeleteMissingExpense] if there is no such expense,
/// - [Error::NotExpenseOwner] if `user_id` does not own the expense,
/// - [Error::SqlError] if some other SQL related error occurred.
pub fn delete_expense_as(
    expense_id: ExpenseId,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    let expense = match get_expense(expense_id, connection) {
        Ok(expense) => expense,
        Err(Error::NotFound) => return Err(Error::DeleteMissingExpense),
        Err(error) => return Err(error),
    };

    if !authorize_delete(&expense, user_id) {
        tracing::warn!(
            "User {user_id} tried to delete expense {expense_id} owned by user {}",
            expense.user_id
        );
        return Err(Error::NotExpenseOwner);
    }

    delete_expense(expense_id, connection)
}
