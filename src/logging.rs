//! Application-wide structured logging.
//!
//! Bunyan-formatted JSON on the chosen sink, span fields carried into every
//! event by `JsonStorageLayer`, and `log` records from dependencies bridged
//! into `tracing`.

use tracing::{Subscriber, subscriber::set_global_default};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, Registry, fmt::MakeWriter, layer::SubscriberExt};

/// Composes the subscriber.
///
/// `RUST_LOG` wins over `env_filter` when set.
///
/// # Example
/// ```rust,no_run
/// use decor_admin::{get_subscriber, init_subscriber};
///
/// let subscriber = get_subscriber("decor_admin".into(), "info".into(), std::io::stdout);
/// init_subscriber(subscriber);
/// ```
pub fn get_subscriber<Sink>(
    name: String,
    env_filter: String,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{env_filter},actix_server=info,mio=warn")));
    let formatting_layer = BunyanFormattingLayer::new(name, sink);

    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// Installs `subscriber` as the global default. Call once, at startup.
///
/// A second call (for instance from tests sharing a process) logs a warning
/// instead of panicking.
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) {
    if let Err(e) = LogTracer::init() {
        eprintln!("log bridge already installed: {e}");
    }
    if let Err(e) = set_global_default(subscriber) {
        tracing::warn!(error = %e, "Global tracing subscriber already set");
    }
}
