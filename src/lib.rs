//! Library entry point for the decor admin console service.
//!
//! Exports the access-control decision layer and the HTTP consumers built on
//! it, for use by the main binary and the integration tests.

pub mod access;
pub mod auth_middleware;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod route_guard;
pub mod route_table;
pub mod services;
pub mod session;

pub use auth_middleware::{AuthenticatedUser, CurrentUser};
pub use config::{AppConfig, ConfigError};
pub use error::AppError;
pub use logging::*;
pub use models::*;
pub use route_guard::RouteGuard;
pub use route_table::{RouteEntry, RouteTable};
pub use session::{SessionError, SessionStore};
