//! Subscriber setup: `tracing` → `EnvFilter` → OpenTelemetry → trace file.

use super::exporter::file_tracer_provider;
use super::otlp::SCOPE_NAME;
use super::rotating::RotationPolicy;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::path::PathBuf;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Trace file name inside the plugin data directory.
pub const TRACE_FILE_NAME: &str = "shlichus-board-otlp.json";

/// Filter directive used when `trace_level` is not configured.
pub const DEFAULT_LEVEL: &str = "info";

/// Full path of the trace file.
#[must_use]
pub fn trace_file_path() -> PathBuf {
    crate::infrastructure::paths::get_data_dir().join(TRACE_FILE_NAME)
}

/// Installs the global subscriber.
///
/// The filter comes from `config.trace_level` (any `EnvFilter` directive,
/// e.g. `debug` or `shlichus_board::filter=trace`), defaulting to `info`.
/// Does nothing when the data directory cannot be created, and only the
/// first call in a process takes effect.
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SCOPE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = file_tracer_provider(trace_file_path(), RotationPolicy::default(), resource);

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(OpenTelemetryLayer::new(provider.tracer(SCOPE_NAME)))
        .try_init();
}
