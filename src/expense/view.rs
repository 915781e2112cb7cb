//! The page for a single expense and the form actions on it.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::{format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    AppState, Error, IdentityProvider, Session,
    endpoints::{self, format_endpoint},
    expense::{Expense, ExpenseId, delete_expense_as, get_expense},
    html::{BUTTON_DELETE_STYLE, PAGE_CONTAINER_STYLE, base, format_amount, link},
    navigation::NavBar,
    timezone::to_local_date_time,
    user::get_username,
};

const CREATED_AT_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");

/// The only form action supported on an expense.
const DELETE_INTENT: &str = "delete";

/// The state needed for viewing and acting on a single expense.
#[derive(Debug, Clone)]
pub struct ExpenseState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render a single expense.
///
/// The delete button is only shown to the owner of the expense.
pub async fn get_expense_page(
    State(state): State<ExpenseState>,
    Path(expense_id): Path<ExpenseId>,
    session: Session,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    let expense = match get_expense(expense_id, &connection) {
        Ok(expense) => expense,
        Err(error) => return error.into_response(),
    };

    let username = match get_username(session.get_user_id(), &connection) {
        Ok(username) => username,
        Err(error) => return error.into_response(),
    };

    let Some(created_at) = to_local_date_time(expense.created_at, &state.local_timezone)
        .and_then(|created_at| created_at.format(CREATED_AT_FORMAT).ok())
    else {
        return Error::InvalidTimezoneError(state.local_timezone).into_response();
    };

    let is_owner = session.get_user_id() == Some(expense.user_id);

    expense_view(
        &expense,
        &created_at,
        is_owner,
        username.as_ref().map(|name| name.as_ref()),
    )
    .into_response()
}

fn expense_view(
    expense: &Expense,
    created_at: &str,
    is_owner: bool,
    username: Option<&str>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::EXPENSE_VIEW, username).into_html();
    let expense_url = format_endpoint(endpoints::EXPENSE_VIEW, expense.id);

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-md space-y-4"
            {
                h1 class="text-xl font-bold" { (expense.title) }

                dl class="grid grid-cols-2 gap-2"
                {
                    dt { "Category" }
                    dd data-field="category" { (expense.category) }
                    dt { "Paid by" }
                    dd data-field="paid_by" { (expense.paid_by) }
                    dt { "Amount" }
                    dd data-field="amount" class="tabular-nums" { (format_amount(expense.amount)) }
                    dt { "Added" }
                    dd data-field="created_at" { (created_at) }
                }

                @if is_owner {
                    form method="post" action=(expense_url)
                    {
                        input type="hidden" name="intent" value=(DELETE_INTENT);
                        button type="submit" class=(BUTTON_DELETE_STYLE) { "Delete" }
                    }
                }

                p { (link(endpoints::EXPENSES_VIEW, "Back to Expenses")) }
            }
        }
    };

    base(&expense.title, &content)
}

/// The form submitted to act on an expense.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ExpenseActionForm {
    /// What to do with the expense. Only "delete" is supported.
    pub intent: Option<String>,
}

/// Handle a form action on an expense.
///
/// The checks run in order: the intent must be "delete", the user must be
/// logged in, the expense must exist and the user must own it. On success the
/// expense is deleted and the client is redirected to the expenses page.
pub async fn expense_action_endpoint(
    State(state): State<ExpenseState>,
    Path(expense_id): Path<ExpenseId>,
    session: Session,
    Form(form): Form<ExpenseActionForm>,
) -> Response {
    if form.intent.as_deref() != Some(DELETE_INTENT) {
        return Error::UnsupportedIntent(form.intent).into_response();
    }

    let user_id = match session.require_user_id() {
        Ok(user_id) => user_id,
        Err(error) => return error.into_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match delete_expense_as(expense_id, user_id, &connection) {
        Ok(()) => {
            tracing::info!("User {user_id} deleted expense {expense_id}");
            Redirect::to(endpoints::EXPENSES_VIEW).into_response()
        }
        Err(error) => error.into_response(),
    }
}


#[cfg(test)]
mod expense_action_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Form,
        extract::{Path, State},
        http::StatusCode,
    };

    use crate::{
        Session, endpoints,
        expense::{count_expenses, get_expense},
        test_utils::{
            assert_redirect, create_test_expense, create_test_user, get_test_connection,
            parse_html_document,
        },
    };

    use super::{ExpenseActionForm, ExpenseState, expense_action_endpoint};

    fn get_state(connection: rusqlite::Connection) -> ExpenseState {
        ExpenseState {
            local_timezone: "Etc/UTC".to_owned(),
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    fn delete_form() -> Form<ExpenseActionForm> {
        Form(ExpenseActionForm {
            intent: Some("delete".to_owned()),
        })
    }

    #[tokio::test]
    async fn owner_can_delete() {
        let connection = get_test_connection();
        let owner = create_test_user("mannan", &connection);
        let expense = create_test_expense("Apple", 40.0, &owner, &connection);
        let state = get_state(connection);

        let response = expense_action_endpoint(
            State(state.clone()),
            Path(expense.id),
            Session::logged_in(owner.id),
            delete_form(),
        )
        .await;

        assert_redirect(&response, endpoints::EXPENSES_VIEW);
        let connection = state.db_connection.lock().unwrap();
        assert!(get_expense(expense.id, &connection).is_err());
    }

    #[tokio::test]
    async fn other_user_is_forbidden() {
        let connection = get_test_connection();
        let owner = create_test_user("mannan", &connection);
        let other = create_test_user("kiwi", &connection);
        let expense = create_test_expense("Apple", 40.0, &owner, &connection);
        let state = get_state(connection);

        let response = expense_action_endpoint(
            State(state.clone()),
            Path(expense.id),
            Session::logged_in(other.id),
            delete_form(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let html = parse_html_document(response).await;
        assert!(
            html.root_element()
                .text()
                .any(|text| text.contains("Pssh, nice try. That's not your expense."))
        );
        assert_eq!(count_expenses(&state.db_connection.lock().unwrap()), Ok(1));
    }

    #[tokio::test]
    async fn visitor_is_unauthorized() {
        let connection = get_test_connection();
        let owner = create_test_user("mannan", &connection);
        let expense = create_test_expense("Apple", 40.0, &owner, &connection);
        let state = get_state(connection);

        let response = expense_action_endpoint(
            State(state.clone()),
            Path(expense.id),
            Session::anonymous(),
            delete_form(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(count_expenses(&state.db_connection.lock().unwrap()), Ok(1));
    }

    #[tokio::test]
    async fn missing_expense_is_not_found() {
        let connection = get_test_connection();
        let user = create_test_user("mannan", &connection);

        let response = expense_action_endpoint(
            State(get_state(connection)),
            Path(42),
            Session::logged_in(user.id),
            delete_form(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = parse_html_document(response).await;
        assert!(
            html.root_element()
                .text()
                .any(|text| text.contains("Can't delete what does not exist."))
        );
    }

    #[tokio::test]
    async fn unsupported_intent_is_bad_request() {
        let connection = get_test_connection();
        let owner = create_test_user("mannan", &connection);
        let expense = create_test_expense("Apple", 40.0, &owner, &connection);
        let state = get_state(connection);

        for intent in [None, Some("update".to_owned())] {
            let response = expense_action_endpoint(
                State(state.clone()),
                Path(expense.id),
                Session::logged_in(owner.id),
                Form(ExpenseActionForm { intent }),
            )
            .await;

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }

        assert_eq!(count_expenses(&state.db_connection.lock().unwrap()), Ok(1));
    }

    #[tokio::test]
    async fn intent_is_checked_before_log_in() {
        let connection = get_test_connection();

        let response = expense_action_endpoint(
            State(get_state(connection)),
            Path(1),
            Session::anonymous(),
            Form(ExpenseActionForm::default()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
