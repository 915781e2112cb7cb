//! User authentication: the auth cookie, the request session and the
//! log-in, log-out and registration pages.

mod cookie;
mod log_in;
mod log_out;
mod redirect;
mod register_user;
mod session;
mod token;
mod unauthorized;

pub(crate) use cookie::{DEFAULT_COOKIE_DURATION, invalidate_auth_cookie, set_auth_cookie};
pub use log_in::{get_log_in_page, post_log_in};
pub use log_out::log_out;
pub use redirect::build_log_in_redirect_url_from_target;
pub use register_user::{get_register_page, register_user};
pub use session::{IdentityProvider, Session};
pub(crate) use token::Token;
pub use unauthorized::unauthorized_response;

#[cfg(test)]
pub(crate) use cookie::COOKIE_TOKEN;
