//! Resolves a request to the user who sent it, if anyone.

use std::convert::Infallible;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};

use crate::{Error, UserID, auth::cookie::get_token_from_cookies};

/// Something that knows which user, if any, is making the current request.
pub trait IdentityProvider {
    /// The ID of the logged in user, or `None` for visitors.
    fn get_user_id(&self) -> Option<UserID>;

    /// The ID of the logged in user.
    ///
    /// # Errors
    ///
    /// Returns an [Error::Unauthorized] if nobody is logged in.
    fn require_user_id(&self) -> Result<UserID, Error> {
        self.get_user_id().ok_or(Error::Unauthorized)
    }
}

/// The identity carried by the auth cookie of a request.
///
/// Extracting a `Session` never fails: a missing, tampered or expired cookie
/// gives an anonymous session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Session {
    user_id: Option<UserID>,
}

impl Session {
    /// A session for a visitor who is not logged in.
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    /// A session for the user `user_id`.
    pub fn logged_in(user_id: UserID) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }
}

impl IdentityProvider for Session {
    fn get_user_id(&self) -> Option<UserID> {
        self.user_id
    }
}

impl<S> FromRequestParts<S> for Session
where
    Key: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = PrivateCookieJar::<Key>::from_request_parts(parts, state).await?;

        match get_token_from_cookies(&jar) {
            Ok(token) => Ok(Session::logged_in(token.user_id)),
            Err(Error::CookieMissing) => Ok(Session::anonymous()),
            Err(error) => {
                tracing::debug!("Ignoring auth cookie: {error}");
                Ok(Session::anonymous())
            }
        }
    }
}
