//! Database operations for expenses.

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error, UserID,
    expense::{Expense, ExpenseId, ExpenseSummary, NewExpense},
};

/// Create an expense owned by `owner` and return it with its generated ID.
///
/// The creation time is set to the current UTC time.
pub fn create_expense(
    new_expense: NewExpense,
    owner: UserID,
    connection: &Connection,
) -> Result<Expense, Error> {
    let created_at = OffsetDateTime::now_utc();

    connection.execute(
        "INSERT INTO expense (title, category, paid_by, amount, created_at, user_id)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
        (
            &new_expense.title,
            &new_expense.category,
            &new_expense.paid_by,
            new_expense.amount,
            created_at,
            owner.as_i64(),
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Expense {
        id,
        title: new_expense.title,
        category: new_expense.category,
        paid_by: new_expense.paid_by,
        amount: new_expense.amount,
        created_at,
        user_id: owner,
    })
}

/// Retrieve a single expense by ID.
///
/// # Errors
///
/// Returns an [Error::NotFound] if there is no expense with `expense_id`.
pub fn get_expense(expense_id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    connection
        .prepare(
            "SELECT id, title, category, paid_by, amount, created_at, user_id
            FROM expense WHERE id = :id;",
        )?
        .query_row(&[(":id", &expense_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve the id, title and amount of every expense, newest first.
pub fn get_expense_summaries(connection: &Connection) -> Result<Vec<ExpenseSummary>, Error> {
    connection
        .prepare("SELECT id, title, amount FROM expense ORDER BY created_at DESC, id DESC;")?
        .query_map([], |row| {
            Ok(ExpenseSummary {
                id: row.get(0)?,
                title: row.get(1)?,
                amount: row.get(2)?,
            })
        })?
        .map(|maybe_summary| maybe_summary.map_err(|error| error.into()))
        .collect()
}

/// Delete an expense by ID. Returns an error if the expense doesn't exist.
pub fn delete_expense(expense_id: ExpenseId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM expense WHERE id = ?1", [expense_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingExpense);
    }

    Ok(())
}

/// Get the number of expenses in the database.
pub fn count_expenses(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM expense;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Initialize the expense table and indexes.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS expense (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            category TEXT NOT NULL,
            paid_by TEXT NOT NULL,
            amount REAL NOT NULL,
            created_at TEXT NOT NULL,
            user_id INTEGER NOT NULL,
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_expense_created_at ON expense(created_at);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    Ok(Expense {
        id: row.get(0)?,
        title: row.get(1)?,
        category: row.get(2)?,
        paid_by: row.get(3)?,
        amount: row.get(4)?,
        created_at: row.get(5)?,
        user_id: UserID::new(row.get(6)?),
    })
}
