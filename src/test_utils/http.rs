use axum::{
    body::Body,
    http::{StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Response},
};
use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, Key},
};
use time::Duration;

use crate::{UserID, auth::set_auth_cookie};

#[track_caller]
pub(crate) fn assert_status_ok(response: &Response<Body>) {
    assert_eq!(response.status(), StatusCode::OK);
}

#[track_caller]
pub(crate) fn assert_content_type(response: &Response<Body>, content_type: &str) {
    let content_type_header = response
        .headers()
        .get("content-type")
        .expect("content-type header missing");
    assert_eq!(content_type_header, content_type);
}

#[track_caller]
pub(crate) fn get_header(response: &Response<Body>, header_name: &str) -> String {
    let header_error_message = format!("Headers missing {header_name}");

    response
        .headers()
        .get(header_name)
        .expect(&header_error_message)
        .to_str()
        .expect("Could not convert to str")
        .to_string()
}

#[track_caller]
pub(crate) fn assert_redirect(response: &Response<Body>, endpoint: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(get_header(response, "location"), endpoint);
}

/// Build the encrypted auth cookie a browser would send back after `user_id` logged in.
#[track_caller]
pub(crate) fn get_auth_cookie(key: &Key, user_id: UserID, duration: Duration) -> Cookie<'static> {
    let jar = set_auth_cookie(PrivateCookieJar::new(key.clone()), user_id, duration)
        .expect("Could not set auth cookie");

    // `jar.get` returns the decrypted cookie, the header holds the encrypted one.
    let response = jar.into_response();
    let header = get_header(&response, SET_COOKIE.as_str());

    Cookie::parse(header).expect("Could not parse cookie")
}
