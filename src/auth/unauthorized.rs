use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{auth::build_log_in_redirect_url_from_target, endpoints, html::error_view_with_action};

/// The page shown when a visitor tries to do something that needs a logged in user.
///
/// The log-in link sends the user back to `redirect_target` afterwards, if given.
pub fn unauthorized_response(description: &str, redirect_target: Option<&str>) -> Response {
    let log_in_url = redirect_target
        .and_then(build_log_in_redirect_url_from_target)
        .unwrap_or_else(|| endpoints::LOG_IN_VIEW.to_owned());

    (
        StatusCode::UNAUTHORIZED,
        error_view_with_action(
            "Unauthorized",
            "401",
            description,
            "Log in and try again.",
            (&log_in_url, "Login"),
        ),
    )
        .into_response()
}
