//! Handler module organization and route configuration.
//!
//! ```text
//! /api/
//! ├── GET  /health
//! ├── auth/
//! │   ├── POST /login
//! │   ├── POST /logout
//! │   └── GET  /me
//! ├── GET  /navigation
//! ├── access/
//! │   ├── GET  /actions
//! │   ├── POST /action
//! │   ├── GET  /route?path=
//! │   └── GET  /modules
//! └── GET  /modules/{predicate}
//! /console/{page}            (route guard)
//! ```

pub mod access;
pub mod auth;
pub mod console;
pub mod guard;
pub mod health;
pub mod modules;
pub mod navigation;

use actix_web::web;

use crate::route_guard::RouteGuard;

/// Registers the JSON API under `/api`.
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            // Session
            .route("/auth/login", web::post().to(auth::login))
            .route("/auth/logout", web::post().to(auth::logout))
            .route("/auth/me", web::get().to(auth::me))
            // Navigation and access checks
            .route("/navigation", web::get().to(navigation::get_navigation))
            .route("/access/actions", web::get().to(access::get_allowed_actions))
            .route("/access/action", web::post().to(access::check_action))
            .route("/access/route", web::get().to(access::check_route))
            .route("/access/modules", web::get().to(access::get_module_access))
            // Module data gate
            .route("/modules/{name}", web::get().to(modules::get_module_gate)),
    );
}

/// Registers the guarded console pages under `/console`.
pub fn configure_console_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/console")
            .wrap(RouteGuard::new("/console"))
            .route("/{page:.*}", web::get().to(console::get_page)),
    );
}

/// Registers everything; used by `main` and the integration tests.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    configure_api_routes(cfg);
    configure_console_routes(cfg);
}
