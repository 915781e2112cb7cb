//! Expense creation page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, IdentityProvider, Session,
    auth::unauthorized_response,
    endpoints::{self, format_endpoint},
    expense::{ExpenseForm, FieldErrors, create_expense, validate_create},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_ERROR_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, base,
    },
    navigation::NavBar,
    user::get_username,
};

const UNAUTHORIZED_MESSAGE: &str = "You must be logged in to add an expense.";
const FORM_NOT_SUBMITTED_CORRECTLY: &str = "Form not submitted correctly.";

/// The state needed for creating an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

fn unauthorized() -> Response {
    unauthorized_response(UNAUTHORIZED_MESSAGE, Some(endpoints::NEW_EXPENSE_VIEW))
}

/// Render the expense creation page, or a 401 page for visitors.
pub async fn get_new_expense_page(
    State(state): State<CreateExpenseState>,
    session: Session,
) -> Response {
    let Ok(user_id) = session.require_user_id() else {
        return unauthorized();
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match get_username(Some(user_id), &connection) {
        Ok(Some(username)) => new_expense_view(
            username.as_ref(),
            &ExpenseForm::default(),
            &FieldErrors::default(),
            None,
        )
        .into_response(),
        Ok(None) => unauthorized(),
        Err(error) => error.into_response(),
    }
}

/// Handle the expense creation form.
///
/// Invalid forms are shown again with the submitted values and an error
/// message for each invalid field. On success the client is redirected to
/// the new expense.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    session: Session,
    Form(form): Form<ExpenseForm>,
) -> Response {
    let Ok(user_id) = session.require_user_id() else {
        return unauthorized();
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    let username = match get_username(Some(user_id), &connection) {
        Ok(Some(username)) => username,
        Ok(None) => return unauthorized(),
        Err(error) => return error.into_response(),
    };

    if !form.is_complete() {
        return (
            StatusCode::BAD_REQUEST,
            new_expense_view(
                username.as_ref(),
                &form,
                &FieldErrors::default(),
                Some(FORM_NOT_SUBMITTED_CORRECTLY),
            ),
        )
            .into_response();
    }

    let new_expense = match validate_create(&form) {
        Ok(new_expense) => new_expense,
        Err(field_errors) => {
            return (
                StatusCode::BAD_REQUEST,
                new_expense_view(username.as_ref(), &form, &field_errors, None),
            )
                .into_response();
        }
    };

    match create_expense(new_expense, user_id, &connection) {
        Ok(expense) => {
            tracing::info!("User {user_id} created expense {}", expense.id);
            Redirect::to(&format_endpoint(endpoints::EXPENSE_VIEW, expense.id)).into_response()
        }
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating an expense: {error}");
            error.into_response()
        }
    }
}

fn new_expense_view(
    username: &str,
    form: &ExpenseForm,
    field_errors: &FieldErrors,
    form_error: Option<&str>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_EXPENSE_VIEW, Some(username)).into_html();
    let form = new_expense_form_view(form, field_errors, form_error);

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Add Expense", &content)
}

fn text_field(
    name: &str,
    label: &str,
    value: Option<&str>,
    error_message: Option<&str>,
) -> Markup {
    html! {
        div
        {
            label for=(name) class=(FORM_LABEL_STYLE) { (label) }

            input
                id=(name)
                type="text"
                name=(name)
                value=[value]
                required
                class=(FORM_TEXT_INPUT_STYLE);

            @if let Some(error_message) = error_message {
                p class=(FORM_ERROR_STYLE) role="alert" { (error_message) }
            }
        }
    }
}

fn new_expense_form_view(
    form: &ExpenseForm,
    field_errors: &FieldErrors,
    form_error: Option<&str>,
) -> Markup {
    html! {
        form
            method="post"
            action=(endpoints::NEW_EXPENSE_VIEW)
            class="w-full space-y-4 md:space-y-6"
        {
            h1 class="text-xl font-bold" { "Add Expense" }

            (text_field("title", "Title", form.title.as_deref(), field_errors.title))
            (text_field("category", "Category", form.category.as_deref(), field_errors.category))
            (text_field("paidby", "Paid by", form.paid_by.as_deref(), field_errors.paid_by))

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                input
                    id="amount"
                    type="number"
                    name="amount"
                    step="0.01"
                    value=[form.amount.as_deref()]
                    required
                    class=(FORM_TEXT_INPUT_STYLE);

                @if let Some(error_message) = field_errors.amount {
                    p class=(FORM_ERROR_STYLE) role="alert" { (error_message) }
                }
            }

            @if let Some(form_error) = form_error {
                p id="form-error" class=(FORM_ERROR_STYLE) role="alert" { (form_error) }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add" }
        }
    }
}
