//! An expense tracker for small groups of people.
//!
//! Users register and log in, record who paid for what, and browse the
//! expenses everyone has added. Only the user who created an expense may
//! delete it.
//!
//! This library provides a web server that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod app_state;
mod auth;
mod db;
mod endpoints;
mod expense;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod password;
mod routing;
mod seed;
mod timezone;
mod user;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use auth::{IdentityProvider, Session};
pub use db::initialize as initialize_db;
pub use expense::{
    Expense, ExpenseId, FieldErrors, NewExpense, authorize_delete, create_expense,
    delete_expense_as, get_expense, validate_create,
};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use password::{PasswordHash, ValidatedPassword};
pub use routing::build_router;
pub use seed::seed;
pub use timezone::get_local_offset;
pub use user::{User, UserID, Username, get_user_by_id, get_user_by_username};

use crate::{
    auth::unauthorized_response, html::error_view,
    internal_server_error::InternalServerError, not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The username and password did not match a registered user.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The auth token cookie is missing from the cookie jar in the request.
    #[error("no cookies in the cookie jar :(")]
    CookieMissing,

    /// The auth token in the cookie jar has passed its expiry date.
    #[error("the auth token has expired")]
    TokenExpired,

    /// The user provided a password that is too easy to guess.
    #[error("password is too weak: {0}")]
    TooWeak(String),

    /// The user provided a username that is too short.
    #[error("username must be at least {0} characters long")]
    UsernameTooShort(usize),

    /// The username is already taken by another user.
    #[error("the username \"{0}\" is already taken")]
    DuplicateUsername(String),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The request needs a logged in user but there is no valid session.
    #[error("you must be logged in to do that")]
    Unauthorized,

    /// The logged in user tried to change an expense that belongs to someone else.
    #[error("the expense belongs to another user")]
    NotExpenseOwner,

    /// A form was submitted with an `intent` the handler does not support.
    #[error("the intent {0:?} is not supported")]
    UnsupportedIntent(Option<String>),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to delete an expense that does not exist
    #[error("tried to delete an expense that is not in the database")]
    DeleteMissingExpense,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::DeleteMissingExpense => (
                StatusCode::NOT_FOUND,
                error_view(
                    "Not Found",
                    "404",
                    "Can't delete what does not exist.",
                    "The expense may have already been deleted.",
                ),
            )
                .into_response(),
            Error::Unauthorized => {
                unauthorized_response("You must be logged in to do that.", None)
            }
            Error::NotExpenseOwner => (
                StatusCode::FORBIDDEN,
                error_view(
                    "Forbidden",
                    "403",
                    "Pssh, nice try. That's not your expense.",
                    "Only the user who added an expense can delete it.",
                ),
            )
                .into_response(),
            Error::UnsupportedIntent(intent) => {
                tracing::warn!("Received a form with the unsupported intent {intent:?}");

                (
                    StatusCode::BAD_REQUEST,
                    error_view(
                        "Bad Request",
                        "400",
                        "What you're trying to do is not allowed.",
                        "Go back and try again using the buttons on the page.",
                    ),
                )
                    .into_response()
            }
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}
