//! Application router configuration.

use axum::{Router, response::Redirect, routing::get};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    auth::{get_log_in_page, get_register_page, log_out, post_log_in, register_user},
    endpoints,
    expense::{
        create_expense_endpoint, expense_action_endpoint, get_expense_page, get_expenses_page,
        get_new_expense_page,
    },
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
///
/// Pages decide for themselves what visitors may see, so there is no auth
/// layer. Handlers that change data reply with a 401 page for visitors.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::EXPENSES_VIEW, get(get_expenses_page))
        .route(
            endpoints::NEW_EXPENSE_VIEW,
            get(get_new_expense_page).post(create_expense_endpoint),
        )
        .route(
            endpoints::EXPENSE_VIEW,
            get(get_expense_page).post(expense_action_endpoint),
        )
        .route(endpoints::LOG_IN_VIEW, get(get_log_in_page).post(post_log_in))
        .route(
            endpoints::REGISTER_VIEW,
            get(get_register_page).post(register_user),
        )
        .route(endpoints::LOG_OUT, get(log_out).post(log_out))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the expenses page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::EXPENSES_VIEW)
}

#[cfg(test)]
mod root_route_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{endpoints, routing::get_index_page};

    #[tokio::test]
    async fn root_redirects_to_expenses() {
        let response = get_index_page().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::EXPENSES_VIEW);
    }
}
