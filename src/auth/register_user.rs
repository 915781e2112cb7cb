//! The registration page for creating a new account.
use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::{
    AppState, Error, PasswordHash, Username, ValidatedPassword,
    auth::set_auth_cookie,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_ERROR_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
        link, log_in_register, password_input, username_input,
    },
    user::create_user,
};

/// The minimum number of characters the password should have to be considered valid on the client side (server-side validation is done on top of this validation).
const PASSWORD_INPUT_MIN_LENGTH: u8 = 14;

fn confirm_password_input(min_length: u8, error_message: Option<&str>) -> Markup {
    html! {
        div
        {
            label
                for="confirm-password"
                class=(FORM_LABEL_STYLE)
            {
                "Confirm Password"
            }

            input
                type="password"
                name="confirm_password"
                id="confirm-password"
                placeholder="••••••••"
                class=(FORM_TEXT_INPUT_STYLE)
                required
                minlength=(min_length)
                autofocus[error_message.is_some()]
            ;

            @if let Some(error_message) = error_message
            {
                p class=(FORM_ERROR_STYLE) { (error_message) }
            }
        }
    }
}

/// The error messages to show next to each field of the registration form.
#[derive(Debug, Default)]
struct RegistrationErrors {
    username: Option<String>,
    password: Option<String>,
    confirm_password: Option<String>,
}

fn registration_form(username: &str, errors: RegistrationErrors) -> Markup {
    html! {
        form
            method="post"
            action=(endpoints::REGISTER_VIEW)
            class="space-y-4 md:space-y-6"
        {
            (username_input(username, errors.username.as_deref()))
            (password_input(PASSWORD_INPUT_MIN_LENGTH, errors.password.as_deref()))
            (confirm_password_input(PASSWORD_INPUT_MIN_LENGTH, errors.confirm_password.as_deref()))

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                "Create Account"
            }

            p class="text-sm font-light text-gray-500 dark:text-gray-400"
            {
                "Already have an account? "
                (link(endpoints::LOG_IN_VIEW, "Log in here"))
            }
        }
    }
}

fn registration_page(username: &str, errors: RegistrationErrors) -> Markup {
    let form = registration_form(username, errors);
    let content = log_in_register("Create Account", &form);

    base("Register", &content)
}

/// Display the registration page.
pub async fn get_register_page() -> Response {
    registration_page("", RegistrationErrors::default()).into_response()
}

/// The state needed for creating a new user.
#[derive(Debug, Clone)]
pub struct RegistrationState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
    /// The database connection for storing the new user.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for RegistrationState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            db_connection: state.db_connection.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<RegistrationState> for Key {
    fn from_ref(state: &RegistrationState) -> Self {
        state.cookie_key.clone()
    }
}

#[derive(Serialize, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

/// Create a new user, log them in and send them to the expenses page.
///
/// Invalid input is reported next to the offending field with a 400 status.
pub async fn register_user(
    State(state): State<RegistrationState>,
    jar: PrivateCookieJar,
    Form(user_data): Form<RegisterForm>,
) -> Response {
    let invalid_form_response = |errors: RegistrationErrors| {
        (
            StatusCode::BAD_REQUEST,
            registration_page(&user_data.username, errors),
        )
            .into_response()
    };

    let username = match Username::new(&user_data.username) {
        Ok(username) => username,
        Err(error) => {
            return invalid_form_response(RegistrationErrors {
                username: Some(error.to_string()),
                ..Default::default()
            });
        }
    };

    let validated_password =
        match ValidatedPassword::new(&user_data.password, &[username.as_ref()]) {
            Ok(password) => password,
            Err(error) => {
                return invalid_form_response(RegistrationErrors {
                    password: Some(error.to_string()),
                    ..Default::default()
                });
            }
        };

    if user_data.password != user_data.confirm_password {
        return invalid_form_response(RegistrationErrors {
            confirm_password: Some("Passwords do not match".to_owned()),
            ..Default::default()
        });
    }

    let password_hash = match PasswordHash::new(validated_password, PasswordHash::DEFAULT_COST) {
        Ok(hash) => hash,
        Err(error) => {
            tracing::error!("an error occurred while hashing a password: {error}");
            return error.into_response();
        }
    };

    let user = {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(_) => return Error::DatabaseLockError.into_response(),
        };

        match create_user(username, password_hash, &connection) {
            Ok(user) => user,
            Err(error @ Error::DuplicateUsername(_)) => {
                return invalid_form_response(RegistrationErrors {
                    username: Some(error.to_string()),
                    ..Default::default()
                });
            }
            Err(error) => {
                tracing::error!("An unhandled error occurred while inserting a new user: {error}");
                return error.into_response();
            }
        }
    };

    tracing::info!("Registered user {} ({})", user.username, user.id);

    match set_auth_cookie(jar, user.id, state.cookie_duration) {
        Ok(jar) => (jar, Redirect::to(endpoints::EXPENSES_VIEW)).into_response(),
        Err(error) => {
            tracing::error!("An error occurred while setting the auth cookie: {error}");
            error.into_response()
        }
    }
}
