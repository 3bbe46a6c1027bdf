//! Console sign-in endpoints: login, logout, and current-user lookup.
//!
//! Credentials are checked by the business backend; this service only keeps
//! the resulting user in its session store and hands the browser an opaque
//! HttpOnly session cookie.

use actix_web::{
    HttpRequest, HttpResponse,
    cookie::{Cookie, SameSite, time::Duration as CookieDuration},
    web,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    AppState,
    access::{Action, allowed_actions},
    auth_middleware::{AuthenticatedUser, session_token},
    error::AppError,
    models::User,
    services::BackendError,
};

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Body returned by login and `/me`: the user plus the generic actions their
/// role permits, so the browser can pre-compute which buttons to show.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionView {
    pub user: User,
    pub allowed_actions: Vec<Action>,
}

impl SessionView {
    fn new(user: User) -> Self {
        let allowed_actions = allowed_actions(Some(&user)).to_vec();
        Self {
            user,
            allowed_actions,
        }
    }
}

fn session_cookie(state: &AppState, token: String) -> Cookie<'static> {
    Cookie::build(state.config.session_cookie.clone(), token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::seconds(state.sessions.ttl().num_seconds()))
        .finish()
}

fn removal_cookie(state: &AppState) -> Cookie<'static> {
    let mut cookie = Cookie::build(state.config.session_cookie.clone(), "")
        .path("/")
        .finish();
    cookie.make_removal();
    cookie
}

/// Signs a staff member in.
///
/// # HTTP Method
/// `POST /api/auth/login`
///
/// # Request Body (JSON)
/// ```json
/// { "email": "admin@decor.test", "password": "secret" }
/// ```
///
/// # Success Response (200 OK)
/// Sets the session cookie and returns:
/// ```json
/// {
///   "user": { "id": 1, "email": "admin@decor.test", "name": "Admin", "role": "Admin" },
///   "allowed_actions": ["view", "create", "edit", "delete", "manage"]
/// }
/// ```
///
/// # Error Responses
/// - `400 Bad Request`: Invalid email or empty password
/// - `401 Unauthorized`: Backend rejected the credentials
/// - `502 Bad Gateway`: Backend unreachable or returned an error
/// - `500 Internal Server Error`: Session could not be stored
#[tracing::instrument(skip(state, form), fields(email = %form.email))]
pub async fn login(
    state: web::Data<AppState>,
    form: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    form.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    tracing::info!("Attempting console login");
    let login = state
        .backend
        .login(&form.email, &form.password)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "Console login failed"))?;

    let token = state.sessions.create(login.user.clone(), login.token)?;
    tracing::info!(
        user_id = %login.user.id,
        role = ?login.user.role,
        "Console login successful"
    );

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&state, token))
        .json(SessionView::new(login.user)))
}

/// Ends the caller's session. Always succeeds, even without a session.
///
/// `POST /api/auth/logout` → `204 No Content` with an expired cookie.
#[tracing::instrument(skip(state, req))]
pub async fn logout(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    if let Some(token) = session_token(&req, &state.config.session_cookie) {
        if let Some(session) = state.sessions.remove(&token) {
            tracing::info!(user_id = %session.user.id, "Console logout");
        }
    }
    HttpResponse::NoContent()
        .cookie(removal_cookie(&state))
        .finish()
}

/// Returns the signed-in user, re-validated against the backend.
///
/// # HTTP Method
/// `GET /api/auth/me`
///
/// # Behaviour
/// - Backend confirms the token: the cached user is refreshed (role changes
///   take effect immediately) and returned.
/// - Backend answers 401: the session is cleared and `401` is returned.
/// - Backend unreachable or failing: the cached user is returned.
#[tracing::instrument(skip(state, req, user), fields(user_id = %user.id))]
pub async fn me(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let token = session_token(&req, &state.config.session_cookie).ok_or(AppError::Unauthorized)?;
    let session = state.sessions.get(&token).ok_or(AppError::Unauthorized)?;

    match state.backend.current_user(&session.backend_token).await {
        Ok(fresh) => {
            if fresh.role != user.role {
                tracing::info!(old_role = ?user.role, new_role = ?fresh.role, "User role changed");
            }
            state.sessions.refresh_user(&token, fresh.clone());
            Ok(HttpResponse::Ok().json(SessionView::new(fresh)))
        }
        Err(BackendError::Unauthorized) => {
            state.sessions.remove(&token);
            tracing::warn!("Backend revoked session, cleared");
            Ok(HttpResponse::Unauthorized()
                .cookie(removal_cookie(&state))
                .json(serde_json::json!({ "error": AppError::Unauthorized.to_string() })))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Backend unavailable, serving cached user");
            Ok(HttpResponse::Ok().json(SessionView::new(user.0)))
        }
    }
}
