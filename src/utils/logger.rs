use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initialize file logging for the TUI, enabled by the PNGSLIM_DEBUG environment variable.
///
/// Stdout belongs to the terminal UI, so logs go to a daily rolling file.
pub fn init_logging() -> Option<WorkerGuard> {
    if std::env::var("PNGSLIM_DEBUG").is_ok() {
        let log_dir = log_dir();
        let _ = std::fs::create_dir_all(&log_dir);

        let file_appender = tracing_appender::rolling::daily(&log_dir, "pngslim.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::fmt()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .init();

        tracing::info!("pngslim logging initialized in {}", log_dir.display());
        Some(guard)
    } else {
        None
    }
}

/// Initialize stderr logging for headless mode, filtered by RUST_LOG (default: warn)
pub fn init_stderr_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

/// Send panic messages to the log instead of stderr while the TUI owns the screen.
///
/// Restore the default hook with `std::panic::take_hook` once the terminal is back.
pub fn log_panics() {
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("{}", info);
    }));
}

fn log_dir() -> PathBuf {
    std::env::var_os("XDG_DATA_HOME")
        .map(PathBuf::from)
        .or_else(dirs::data_local_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pngslim")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::capture_logs;

    #[test]
    fn test_panics_are_logged() {
        let logs = capture_logs(|| {
            log_panics();
            let result = std::panic::catch_unwind(|| panic!("strip blew up"));
            let _ = std::panic::take_hook();
            assert!(result.is_err());
        });
        assert!(logs.contains("ERROR"));
        assert!(logs.contains("strip blew up"));
    }
}
