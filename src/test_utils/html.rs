use axum::{body::Body, response::Response};
use scraper::Html;

/// Read the whole body of a handler's response and parse it as a page.
pub(crate) async fn parse_html_document(response: Response<Body>) -> Html {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not get response body");
    let text = std::str::from_utf8(&body).expect("Response body is not UTF-8");

    Html::parse_document(text)
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(
        html.errors.is_empty(),
        "Got HTML parsing errors: {:?}",
        html.errors
    );
}
