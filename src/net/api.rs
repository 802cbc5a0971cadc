//! REST calls for the user session endpoints.
//!
//! ERROR HANDLING
//! ==============
//! The identity lookup hands the raw envelope to `SessionStore`, which
//! decides what counts as a usable identity. Login and logout surface
//! failures as `AuthError` so the login page can show the backend message.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use serde_json::Value;

use crate::net::http::{HttpClient, HttpError, Transport};
use crate::net::types::{Envelope, LoginUser};
use crate::state::session::{IdentitySource, SessionStore};
use crate::util::browser::Browser;

pub const USER_LOGIN_ENDPOINT: &str = "/api/user/login";
pub const USER_LOGOUT_ENDPOINT: &str = "/api/user/logout";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("{message} (code {code})")]
    Rejected { code: i64, message: String },
    #[error("login response carried no user")]
    MissingUser,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    user_account: &'a str,
    user_password: &'a str,
}

/// Fetch the logged-in user envelope from the identity endpoint.
///
/// # Errors
///
/// Returns any transport error, or `HttpError::Decode` when the body is not
/// an envelope.
pub async fn get_login_user<T: Transport, B: Browser>(
    client: &HttpClient<T, B>,
) -> Result<Envelope<Value>, HttpError> {
    let path = client.config().identity_path.clone();
    client.get(&path).await?.envelope()
}

/// Log in with account and password via `POST /api/user/login`.
///
/// # Errors
///
/// Returns `AuthError::Rejected` with the backend message on a non-zero
/// code, `AuthError::MissingUser` when the success envelope is empty.
pub async fn user_login<T: Transport, B: Browser>(
    client: &HttpClient<T, B>,
    account: &str,
    password: &str,
) -> Result<LoginUser, AuthError> {
    let body = LoginRequest { user_account: account, user_password: password };
    let envelope: Envelope<LoginUser> = client.post_json(USER_LOGIN_ENDPOINT, &body).await?.envelope()?;
    let envelope = reject_failure(envelope)?;
    envelope.data.ok_or(AuthError::MissingUser)
}

/// End the server session via `POST /api/user/logout`.
///
/// # Errors
///
/// Returns `AuthError::Rejected` on a non-zero code.
pub async fn user_logout<T: Transport, B: Browser>(client: &HttpClient<T, B>) -> Result<(), AuthError> {
    let envelope: Envelope<Value> = client
        .post_json(USER_LOGOUT_ENDPOINT, &serde_json::json!({}))
        .await?
        .envelope()?;
    reject_failure(envelope).map(|_| ())
}

fn reject_failure<D>(envelope: Envelope<D>) -> Result<Envelope<D>, AuthError> {
    if envelope.is_success() {
        Ok(envelope)
    } else {
        Err(AuthError::Rejected {
            code: envelope.code,
            message: envelope.message.unwrap_or_else(|| "request failed".to_owned()),
        })
    }
}

impl<T: Transport, B: Browser> IdentitySource for HttpClient<T, B> {
    async fn fetch_login_user(&self) -> Result<Envelope<Value>, HttpError> {
        get_login_user(self).await
    }
}

impl<T: Transport, B: Browser> SessionStore<HttpClient<T, B>> {
    /// Log in and store the returned identity.
    ///
    /// # Errors
    ///
    /// See [`user_login`]; the snapshot is unchanged on error.
    pub async fn login(&self, account: &str, password: &str) -> Result<LoginUser, AuthError> {
        let user = user_login(self.source(), account, password).await?;
        self.complete_login(user.clone());
        Ok(user)
    }

    /// Log out and reset to the anonymous sentinel.
    ///
    /// # Errors
    ///
    /// See [`user_logout`]; the snapshot is unchanged on error.
    pub async fn logout(&self) -> Result<(), AuthError> {
        user_logout(self.source()).await?;
        self.complete_logout();
        Ok(())
    }
}
