use rusqlite::Connection;

use crate::{
    PasswordHash, User, Username,
    db::initialize,
    expense::{Expense, NewExpense, create_expense},
    user::create_user,
};

/// An in-memory database with every table created.
pub(crate) fn get_test_connection() -> Connection {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    initialize(&connection).expect("Could not initialize database");

    connection
}

/// Insert a user with a cheap, unvalidated password hash.
#[track_caller]
pub(crate) fn create_test_user(username: &str, connection: &Connection) -> User {
    create_user(
        Username::new_unchecked(username),
        PasswordHash::new_unchecked("not a real hash"),
        connection,
    )
    .expect("Could not create test user")
}

#[track_caller]
pub(crate) fn create_test_expense(
    title: &str,
    amount: f64,
    owner: &User,
    connection: &Connection,
) -> Expense {
    let new_expense = NewExpense {
        title: title.to_owned(),
        category: "Groceries".to_owned(),
        paid_by: "cc".to_owned(),
        amount,
    };

    create_expense(new_expense, owner.id, connection).expect("Could not create test expense")
}
