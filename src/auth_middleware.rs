//! Extractors that resolve the current console user from the session store.
//!
//! The session token is read from the session cookie (name from
//! [`AppConfig::session_cookie`](crate::config::AppConfig)) or, for scripted
//! clients, from an `Authorization: Bearer <token>` header.
//!
//! - [`CurrentUser`] never fails: anonymous requests get `CurrentUser(None)`.
//! - [`AuthenticatedUser`] fails with 401 when there is no live session.
//!
//! Once resolved, the user is stored in the request extensions so that the
//! route guard and later extractors do not hit the store twice.

use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, web};
use futures::future::{Ready, ready};
use std::ops::Deref;

use crate::{AppState, error::AppError, models::User};

/// Reads the session token carried by a request, if any.
pub fn session_token(req: &HttpRequest, cookie_name: &str) -> Option<String> {
    if let Some(cookie) = req.cookie(cookie_name) {
        return Some(cookie.value().to_string());
    }
    req.headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// Resolves the user for `req`, caching the answer in the request extensions.
pub fn resolve_user(req: &HttpRequest) -> Option<User> {
    if let Some(cached) = req.extensions().get::<CurrentUser>() {
        return cached.0.clone();
    }

    let state = req.app_data::<web::Data<AppState>>()?;
    let user = session_token(req, &state.config.session_cookie)
        .and_then(|token| state.sessions.user(&token));

    if let Some(user) = &user {
        tracing::debug!(user_id = %user.id, role = ?user.role, "Resolved session user");
    }
    req.extensions_mut().insert(CurrentUser(user.clone()));
    user
}

/// The current user, or `None` for anonymous requests.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<User>);

impl CurrentUser {
    pub fn user(&self) -> Option<&User> {
        self.0.as_ref()
    }
}

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(CurrentUser(resolve_user(req))))
    }
}

/// A user with a live session. Extraction fails with 401 otherwise.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl Deref for AuthenticatedUser {
    type Target = User;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(match resolve_user(req) {
            Some(user) => Ok(AuthenticatedUser(user)),
            None => {
                tracing::warn!(path = %req.path(), "Request without a live session");
                Err(AppError::Unauthorized)
            }
        })
    }
}
