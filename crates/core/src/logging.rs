use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// `~/.modscope/logs`, or `./.modscope/logs` when no home directory is known.
pub fn default_log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".modscope/logs")
}

/// Installs the global subscriber. Panics if one is already set; use
/// [`try_init_logging_in`] where that can happen.
pub fn init_logging(component: &str, to_stderr: bool) -> WorkerGuard {
    match try_init_logging_in(&default_log_dir(), component, to_stderr) {
        Ok(guard) => guard,
        Err(e) => panic!("failed to install tracing subscriber: {e}"),
    }
}

pub fn try_init_logging_in(
    log_dir: &Path,
    component: &str,
    to_stderr: bool,
) -> Result<WorkerGuard, TryInitError> {
    let _ = std::fs::create_dir_all(log_dir);

    // One file per day per component: `<log_dir>/<component>.YYYY-MM-DD`.
    let file_appender = tracing_appender::rolling::daily(log_dir, component);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    if to_stderr {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false);
        registry.with(stderr_layer).try_init()?;
    } else {
        registry.try_init()?;
    }

    Ok(guard)
}
