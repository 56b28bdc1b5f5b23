//! Logging infrastructure
//!
//! Structured logging setup for development and production environments.
//! `LOG_LEVEL` controls the max level, `LOG_DIR` (optional) adds a daily
//! rolling file appender.

use std::path::Path;

/// Initialize the logger from environment variables
pub fn init_logger() {
    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(&level, log_dir.as_deref());
}

/// Initialize the logger with optional file output
pub fn init_logger_with_file(log_level: &str, log_dir: Option<&str>) {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level.parse().unwrap_or(tracing::Level::INFO))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    // Add file output if log_dir is provided
    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists()
            && let Some(dir_str) = log_path.to_str()
        {
            let file_appender = tracing_appender::rolling::daily(dir_str, "roster-server");
            subscriber.with_writer(file_appender).init();
            return;
        }
    }

    subscriber.init();
}
