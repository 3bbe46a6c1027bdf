//! Health check endpoint for the decor_admin service.
//!
//! Provides a simple endpoint to verify service liveness for monitoring and orchestration.

use actix_web::{HttpResponse, Responder, web};
use once_cell::sync::Lazy;
use std::time::Instant;

use crate::AppState;

static START_TIME: Lazy<Instant> = Lazy::new(Instant::now);

/// Marks the service start; called once from `main` so uptime is measured
/// from boot rather than from the first health check.
pub fn mark_started() {
    Lazy::force(&START_TIME);
}

/// Returns a JSON response indicating the API is healthy.
///
/// # Example
/// ```json
/// { "status": "ok", "uptime_secs": 42, "active_sessions": 3 }
/// ```
#[tracing::instrument(skip(state))]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    tracing::info!("Health check endpoint called");
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "uptime_secs": START_TIME.elapsed().as_secs(),
        "active_sessions": state.sessions.len(),
    }))
}
