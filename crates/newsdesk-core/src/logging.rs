//! Tracing subscriber setup.
//!
//! The filter comes from `NEWSDESK_LOG` when set, otherwise from the
//! configured default level. The TUI owns the terminal, so it logs to a
//! daily-rolling file; CLI commands log to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "NEWSDESK_LOG";

const LOG_FILE_PREFIX: &str = "newsdesk.log";

/// Where log lines go.
#[derive(Debug, Clone)]
pub enum LogTarget {
    Stderr,
    /// Daily-rolling files under the given directory.
    File(PathBuf),
}

/// Keeps the non-blocking writer flushing. Hold it until exit.
#[derive(Debug, Default)]
#[must_use = "dropping the guard stops buffered log lines from being written"]
pub struct LogGuard {
    _worker: Option<WorkerGuard>,
}

/// Builds the filter: `NEWSDESK_LOG` wins, else `default_level`.
fn build_filter(env_value: Option<&str>, default_level: &str) -> EnvFilter {
    env_value
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok())
        .or_else(|| EnvFilter::try_new(default_level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Installs the global subscriber.
///
/// Calling this more than once is harmless: later calls keep the first
/// subscriber and return an inert guard.
///
/// # Errors
/// Returns an error if the log directory cannot be created.
pub fn init(target: LogTarget, default_level: &str) -> Result<LogGuard> {
    let env_value = std::env::var(LOG_ENV).ok();
    let filter = build_filter(env_value.as_deref(), default_level);

    match target {
        LogTarget::Stderr => {
            let layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init();
            Ok(LogGuard::default())
        }
        LogTarget::File(dir) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
            let (writer, worker) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            if tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
                .is_err()
            {
                return Ok(LogGuard::default());
            }
            Ok(LogGuard {
                _worker: Some(worker),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_overrides_default() {
        let filter = build_filter(Some("newsdesk_core=trace"), "warn");
        assert_eq!(filter.to_string(), "newsdesk_core=trace");
    }

    #[test]
    fn test_blank_env_falls_back() {
        assert_eq!(build_filter(Some("  "), "debug").to_string(), "debug");
        assert_eq!(build_filter(None, "warn").to_string(), "warn");
    }

    #[test]
    fn test_file_target_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        let _guard = init(LogTarget::File(logs.clone()), "info").unwrap();
        assert!(logs.is_dir());
    }
}
