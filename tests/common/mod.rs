//! Shared fixtures for the integration tests.
//!
//! `state()` points the backend at a closed local port, so any test that
//! reaches it sees a connection failure. `state_with_backend` takes the URL
//! of a mock server instead.

#![allow(dead_code)]

use actix_web::{cookie::Cookie, web};
use decor_admin::{AppConfig, AppState, User, UserId, access::Role};

pub const COOKIE: &str = "decor_session";

pub fn state() -> web::Data<AppState> {
    state_with_backend("http://127.0.0.1:9")
}

pub fn state_with_backend(backend_url: &str) -> web::Data<AppState> {
    let config = AppConfig::from_lookup(|key| match key {
        "DECOR_BACKEND_URL" => Some(backend_url.to_string()),
        "DECOR_SESSION_TTL" => Some("1h".to_string()),
        _ => None,
    })
    .expect("test config");
    web::Data::new(AppState::new(config).expect("test state"))
}

pub fn user(id: i64, role: Role) -> User {
    User {
        id: UserId::Number(id),
        email: format!("{}@decor.test", role.as_str().to_lowercase()),
        name: format!("{role} {id}"),
        role: Some(role),
    }
}

/// Opens a session for `role` and returns the cookie carrying it.
pub fn login_as(state: &web::Data<AppState>, id: i64, role: Role) -> Cookie<'static> {
    let token = state
        .sessions
        .create(user(id, role), format!("backend-{id}"))
        .expect("session");
    Cookie::new(COOKIE, token)
}
