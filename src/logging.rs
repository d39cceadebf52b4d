use std::io;
use tracing_appender::rolling;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

const DEFAULT_STDERR_FILTER: &str = "info,web_request=warn,render=warn";
const DEFAULT_FILE_FILTER: &str = "info,web_request=debug,render=debug";

/// Installs the global subscriber: a terse stderr layer and a daily rolling file
/// under `logs/dashboard.log`.
///
/// Stderr keeps stdout free for the dashboard itself. `RUST_LOG` overrides the
/// stderr filter; the file layer always records at debug for the crate targets.
pub fn configure_logging() {
    let stderr_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_STDERR_FILTER));

    let stderr_log = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_filter(stderr_filter);

    let file_appender = rolling::daily("logs", "dashboard.log");
    let file_log = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_filter(EnvFilter::new(DEFAULT_FILE_FILTER));

    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::Registry::default()
        .with(stderr_log)
        .with(file_log)
        .try_init();
}
