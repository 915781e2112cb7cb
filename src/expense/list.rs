//! The page listing every expense.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, IdentityProvider, Session,
    endpoints::{self, format_endpoint},
    expense::{ExpenseSummary, get_expense_summaries},
    html::{BUTTON_PRIMARY_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base, format_amount, link},
    navigation::NavBar,
    user::get_username,
};

/// The state needed for the expenses page.
#[derive(Debug, Clone)]
pub struct ExpensesPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExpensesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the list of expenses, newest first.
///
/// Anyone may view the list. Logged in users are greeted by name and get a
/// log out button, visitors get a log in link.
pub async fn get_expenses_page(
    State(state): State<ExpensesPageState>,
    session: Session,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    let username = match get_username(session.get_user_id(), &connection) {
        Ok(username) => username,
        Err(error) => return error.into_response(),
    };

    let expenses = match get_expense_summaries(&connection) {
        Ok(expenses) => expenses,
        Err(error) => {
            tracing::error!("Could not get expenses: {error}");
            return error.into_response();
        }
    };

    expenses_view(&expenses, username.as_ref().map(|name| name.as_ref())).into_response()
}

fn expenses_view(expenses: &[ExpenseSummary], username: Option<&str>) -> Markup {
    let nav_bar = NavBar::new(endpoints::EXPENSES_VIEW, username).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-2xl space-y-4"
            {
                div class="flex justify-between items-center"
                {
                    h1 class="text-xl font-bold" { "Expenses" }

                    @if username.is_some() {
                        form method="post" action=(endpoints::LOG_OUT)
                        {
                            button type="submit" class=(LINK_STYLE) { "Logout" }
                        }
                    } @else {
                        (link(endpoints::LOG_IN_VIEW, "Login"))
                    }
                }

                a
                    href=(endpoints::NEW_EXPENSE_VIEW)
                    class={ "block text-center " (BUTTON_PRIMARY_STYLE) }
                {
                    "Add Expense"
                }

                @if expenses.is_empty() {
                    p data-empty-list="true" { "No expenses yet." }
                } @else {
                    ul class="divide-y divide-gray-200 dark:divide-gray-700"
                    {
                        @for expense in expenses {
                            li class="flex justify-between py-3" data-expense-id=(expense.id)
                            {
                                (link(&format_endpoint(endpoints::EXPENSE_VIEW, expense.id), &expense.title))
                                span class="tabular-nums" { (format_amount(expense.amount)) }
                            }
                        }
                    }
                }
            }
        }
    };

    base("Expenses", &content)
}

#[cfg(test)]
mod expenses_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use scraper::{Html, Selector};

    use crate::{
        Session,
        test_utils::{
            assert_content_type, assert_status_ok, assert_valid_html, create_test_expense,
            create_test_user, get_test_connection, parse_html_document,
        },
    };

    use super::{ExpensesPageState, get_expenses_page};

    fn list_items(html: &Html) -> Vec<(String, String)> {
        html.select(&Selector::parse("li[data-expense-id]").unwrap())
            .map(|li| {
                let title = li
                    .select(&Selector::parse("a").unwrap())
                    .next()
                    .expect("No link found")
                    .text()
                    .collect::<String>();
                let amount = li
                    .select(&Selector::parse("span").unwrap())
                    .next()
                    .expect("No amount found")
                    .text()
                    .collect::<String>();
                (title, amount)
            })
            .collect()
    }

    #[tokio::test]
    async fn lists_expenses_newest_first() {
        let connection = get_test_connection();
        let user = create_test_user("mannan", &connection);
        create_test_expense("Apple", 40.0, &user, &connection);
        create_test_expense("Kiwi", 1234.5, &user, &connection);
        let state = ExpensesPageState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        let response = get_expenses_page(State(state), Session::anonymous()).await;

        assert_status_ok(&response);
        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert_eq!(
            list_items(&html),
            vec![
                ("Kiwi".to_owned(), "1,234.50".to_owned()),
                ("Apple".to_owned(), "40.00".to_owned()),
            ]
        );
    }

    #[tokio::test]
    async fn shows_empty_message_without_expenses() {
        let state = ExpensesPageState {
            db_connection: Arc::new(Mutex::new(get_test_connection())),
        };

        let response = get_expenses_page(State(state), Session::anonymous()).await;

        let html = parse_html_document(response).await;
        assert!(list_items(&html).is_empty());
        assert!(
            html.select(&Selector::parse("[data-empty-list]").unwrap())
                .next()
                .is_some()
        );
    }

    #[tokio::test]
    async fn visitors_get_log_in_link() {
        let state = ExpensesPageState {
            db_connection: Arc::new(Mutex::new(get_test_connection())),
        };

        let response = get_expenses_page(State(state), Session::anonymous()).await;

        let html = parse_html_document(response).await;
        let log_in_links = html
            .select(&Selector::parse("a[href='/log_in']").unwrap())
            .map(|a| a.text().collect::<String>())
            .collect::<Vec<_>>();
        assert!(log_in_links.contains(&"Login".to_owned()));
        assert!(
            html.select(&Selector::parse("[data-greeting]").unwrap())
                .next()
                .is_none()
        );
        assert!(
            html.select(&Selector::parse("form[action='/log_out']").unwrap())
                .next()
                .is_none()
        );
    }

    #[tokio::test]
    async fn logged_in_user_is_greeted_and_can_log_out() {
        let connection = get_test_connection();
        let user = create_test_user("mannan", &connection);
        let state = ExpensesPageState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        let response = get_expenses_page(State(state), Session::logged_in(user.id)).await;

        let html = parse_html_document(response).await;
        let greeting = html
            .select(&Selector::parse("[data-greeting]").unwrap())
            .next()
            .expect("No greeting found")
            .text()
            .collect::<String>();
        assert_eq!(greeting.trim(), "Hi mannan");
        let log_out_form = html
            .select(&Selector::parse("form[action='/log_out']").unwrap())
            .next()
            .expect("No log out form found");
        assert_eq!(log_out_form.value().attr("method"), Some("post"));
        assert!(
            html.select(&Selector::parse("a[href='/expenses/create']").unwrap())
                .any(|a| a.text().collect::<String>().trim() == "Add Expense")
        );
    }
}
