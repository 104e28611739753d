use tracing::subscriber::{set_global_default, SetGlobalDefaultError};
use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::log::SetLoggerError;
use tracing_log::LogTracer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

#[derive(thiserror::Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to redirect log records to tracing.")]
    LoggerError(#[from] SetLoggerError),
    #[error("Failed to set the global tracing subscriber.")]
    SubscriberError(#[from] SetGlobalDefaultError),
}

/// Builds a subscriber emitting bunyan-formatted JSON to `sink`.
///
/// `RUST_LOG` wins over `env_filter` when it is set.
pub fn get_subscriber<Sink>(
    name: String,
    env_filter: String,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));
    let formatting_layer = BunyanFormattingLayer::new(name, sink);

    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// Installs `subscriber` globally. Must be called only once per process.
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) -> Result<(), TelemetryError> {
    // Records emitted through the `log` facade (eg: by sqlx) end up as tracing events
    LogTracer::init()?;
    set_global_default(subscriber)?;

    Ok(())
}
