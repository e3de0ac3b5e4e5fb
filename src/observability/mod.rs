//! OpenTelemetry tracing exported to a local OTLP/JSON file.
//!
//! ```text
//! tracing → EnvFilter → tracing-opentelemetry → FileSpanExporter → rotating file
//! ```
//!
//! The plugin sandbox has no network collector to talk to, so finished spans
//! are appended to `~/.local/share/zellij/shlichus-board/shlichus-board-otlp.json`
//! (rotated by size) for offline inspection.
//!
//! - [`init`]: subscriber setup from the plugin configuration
//! - [`exporter`]: the `SpanExporter` and tracer provider
//! - [`otlp`]: span to OTLP/JSON encoding
//! - [`rotating`]: size-rotated line writer

mod exporter;
mod init;
mod otlp;
mod rotating;

pub use init::{init_tracing, trace_file_path, TRACE_FILE_NAME};
pub use rotating::{RotatingFile, RotationPolicy};
