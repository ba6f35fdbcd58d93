//! Tracing subscriber setup.

use std::{env, io::IsTerminal};

use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

// ---

/// Map `APP_LOG_LEVEL` to a filter directive, defaulting to `debug`.
fn level_directive(level: Option<&str>) -> String {
    // ---
    let level = match level {
        Some("trace") => "trace",
        Some("debug") => "debug",
        Some("info") => "info",
        Some("warn") => "warn",
        Some("error") => "error",
        _ => "debug",
    };
    format!("{level},hyper=warn,reqwest=warn")
}

/// Initialize the global tracing subscriber for structured logging.
///
/// This function configures the [`tracing_subscriber`] with:
/// - Log target, file, and line number output enabled
/// - Color output controlled by TTY detection and `FORCE_COLOR` env var:
///   - `FORCE_COLOR=1|true|yes`: force colors on
///   - `FORCE_COLOR=0|false|no`: force colors off
///   - unset or other values: auto-detect TTY
/// - Span event emission mode controlled by the `APP_SPAN_EVENTS` env var:
///   - `"full"`       : emit ENTER, EXIT, and CLOSE events with timing
///   - `"enter_exit"` : emit ENTER and EXIT only
///   - unset or other values: emit CLOSE events only (default)
/// - Log level from `RUST_LOG` if set, otherwise from `APP_LOG_LEVEL`
///
/// Call once at startup, before any tracing macros run.
pub fn init_tracing() {
    // ---
    let span_events = match env::var("APP_SPAN_EVENTS").as_deref() {
        Ok("full") => FmtSpan::FULL,
        Ok("enter_exit") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::CLOSE,
    };

    let use_color = match env::var("FORCE_COLOR").as_deref() {
        Ok("1") | Ok("true") | Ok("yes") => true,
        Ok("0") | Ok("false") | Ok("no") => false,
        _ => std::io::stdout().is_terminal(),
    };

    let env_filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(level_directive(env::var("APP_LOG_LEVEL").ok().as_deref()))
    };

    tracing_subscriber::fmt()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(span_events)
        .with_env_filter(env_filter)
        .with_ansi(use_color)
        .compact()
        .init();
}
