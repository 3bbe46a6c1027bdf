//! Main entry point for the decor_admin service.
//!
//! Loads configuration, installs structured logging, and serves the access
//! API and guarded console pages with Actix Web.

use actix_web::{App, HttpServer, middleware::Logger, web};
use decor_admin::{AppState, get_subscriber, handlers, init_subscriber};
use std::time::Duration;
use tracing_actix_web::TracingLogger;

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_state = AppState::from_env()?;

    let subscriber = get_subscriber(
        "decor_admin".to_string(),
        app_state.config.log_level.clone(),
        std::io::stdout,
    );
    init_subscriber(subscriber);
    handlers::health::mark_started();

    let bind = (app_state.config.bind_addr.clone(), app_state.config.port);
    tracing::info!(
        addr = %bind.0,
        port = bind.1,
        backend = %app_state.config.backend_url,
        session_ttl = %humantime::format_duration(app_state.config.session_ttl),
        "Starting decor_admin"
    );

    let sessions = app_state.sessions.clone();
    let sweeper = tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let purged = sessions.purge_expired();
            if purged > 0 {
                tracing::info!(purged, "Purged expired sessions");
            }
        }
    });

    let state = web::Data::new(app_state);
    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(TracingLogger::default())
            .wrap(Logger::default())
            .configure(handlers::configure_routes)
    })
    .bind(bind)?
    .run();

    let srv_handle = server.handle();
    let server_task = tokio::spawn(server);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Shutdown signal received");
            srv_handle.stop(true).await;
        }
        res = server_task => {
            match res {
                Ok(Err(e)) => tracing::error!("Server failed: {}", e),
                Err(e) => tracing::error!("Server task failed: {}", e),
                Ok(Ok(())) => {}
            }
        }
    }

    sweeper.abort();
    Ok(())
}
