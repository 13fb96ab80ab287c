//! Tracing setup.
//!
//! The interactive UI owns the terminal, so it logs to a file under
//! `${UADM_HOME}/logs`. One-shot commands log to stderr. `UADM_LOG` takes a
//! full `EnvFilter` directive and wins over the configured level.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "UADM_LOG";

/// File name used inside the logs directory.
pub const LOG_FILE_NAME: &str = "uadm.log";

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Append to `<dir>/uadm.log`.
    File(PathBuf),
    Stderr,
}

/// Builds the filter: `UADM_LOG` when set, else `level`, with chatty HTTP
/// internals held at `warn`.
fn build_env_filter(level: &str) -> Result<EnvFilter> {
    let base = std::env::var(LOG_ENV)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| level.to_string());

    let mut directives = vec![base];
    for noisy in ["hyper", "hyper_util", "reqwest", "h2"] {
        directives.push(format!("{noisy}=warn"));
    }

    let filter = directives.join(",");
    EnvFilter::try_new(&filter).with_context(|| format!("Invalid tracing filter '{filter}'"))
}

/// Installs the global subscriber.
///
/// For [`LogTarget::File`] the returned guard must be held until exit so
/// buffered lines are flushed. Calling this twice is harmless; the second
/// subscriber is ignored.
pub fn init(level: &str, target: LogTarget) -> Result<Option<WorkerGuard>> {
    let filter = build_env_filter(level)?;

    match target {
        LogTarget::File(dir) => {
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(&dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer)
                .try_init();
            tracing::debug!(dir = %dir.display(), "file logging initialized");
            Ok(Some(guard))
        }
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init();
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_build_env_filter_accepts_levels() {
        assert!(build_env_filter("debug").is_ok());
        assert!(build_env_filter("uadm_core=trace").is_ok());
    }

    #[test]
    fn test_build_env_filter_rejects_garbage() {
        if std::env::var(LOG_ENV).is_ok() {
            return;
        }
        assert!(build_env_filter("uadm=notalevel").is_err());
    }

    #[test]
    fn test_file_target_creates_directory() {
        let dir = tempdir().unwrap();
        let logs = dir.path().join("logs");

        let guard = init("info", LogTarget::File(logs.clone())).unwrap();
        assert!(guard.is_some());
        assert!(logs.is_dir());
    }
}
