//! Sample data for trying out the app locally.

use rusqlite::Connection;

use crate::{
    Error, PasswordHash, User, Username,
    expense::{NewExpense, create_expense},
    user::create_user,
};

/// The user that owns the sample expenses. The password is "twixrox".
const SEED_USERNAME: &str = "mannan";
const SEED_PASSWORD_HASH: &str = "$2b$10$K7L1OJ45/4Y2nIvhRVpCe.FSmhDdWoXehVzJptJ/op0lSsvqNu/1u";

/// Title, category, paid by and amount of each sample expense.
const SEED_EXPENSES: [(&str, &str, &str, f64); 4] = [
    ("Apple", "Groceris", "cc", 40.0),
    ("Bhindi", "Groceris", "cash", 10.0),
    ("Kiwi", "Groceris", "cc", 140.0),
    ("Orange", "Groceris", "cash", 120.0),
];

/// Add a sample user and their expenses to an initialized database.
///
/// Everything is added in one transaction.
///
/// # Errors
///
/// Returns [Error::DuplicateUsername] if the database has already been seeded,
/// or an [Error::SqlError] if the data could not be inserted.
pub fn seed(connection: &mut Connection) -> Result<User, Error> {
    let transaction = connection.transaction()?;

    let user = create_user(
        Username::new_unchecked(SEED_USERNAME),
        PasswordHash::new_unchecked(SEED_PASSWORD_HASH),
        &transaction,
    )?;

    for (title, category, paid_by, amount) in SEED_EXPENSES {
        let new_expense = NewExpense {
            title: title.to_owned(),
            category: category.to_owned(),
            paid_by: paid_by.to_owned(),
            amount,
        };
        create_expense(new_expense, user.id, &transaction)?;
    }

    transaction.commit()?;

    tracing::info!(
        "Seeded user {SEED_USERNAME} with {} expenses",
        SEED_EXPENSES.len()
    );

    Ok(user)
}
