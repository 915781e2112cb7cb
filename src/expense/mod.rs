//! Expenses: recording what was bought, listing them and deleting your own.

mod create;
mod db;
mod domain;
mod list;
mod policy;
mod view;

pub use create::{create_expense_endpoint, get_new_expense_page};
pub use db::{
    count_expenses, create_expense, create_expense_table, get_expense, get_expense_summaries,
};
pub use domain::{Expense, ExpenseForm, ExpenseId, ExpenseSummary, FieldErrors, NewExpense};
pub use list::get_expenses_page;
pub use policy::{authorize_delete, delete_expense_as, validate_create};
pub use view::{expense_action_endpoint, get_expense_page};
