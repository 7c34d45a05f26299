//! Structured logging for Helio.
//!
//! Wraps `tracing-subscriber` setup: console output with uptime timestamps and
//! module paths, `RUST_LOG` filtering, and an optional JSON log file in debug
//! builds. The configured `debug.log_level` is used when `RUST_LOG` is unset.

use helio_config::Config;
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config provide one.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log file written in debug builds.
pub const LOG_FILE_NAME: &str = "helio.log";

/// Resolve the filter string from config, falling back to [`DEFAULT_FILTER`].
pub fn filter_string(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.trim().is_empty() => {
            config.debug.log_level.trim().to_string()
        }
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Initialize the global tracing subscriber.
///
/// * `log_dir` - directory for the JSON log file (debug builds only)
/// * `debug_build` - whether file logging is enabled
/// * `config` - source of the log level override
///
/// ```no_run
/// use helio_config::Config;
/// use helio_log::init_logging;
///
/// let config = Config::default();
/// init_logging(None, false, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let filter_str = filter_string(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE_NAME))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        tracing::debug!(filter = %filter_str, log_dir = %log_dir.display(), "logging initialized");
        return;
    }

    subscriber.init();
    tracing::debug!(filter = %filter_str, "logging initialized");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_string_without_config() {
        assert_eq!(filter_string(None), "info");
    }

    #[test]
    fn test_filter_string_from_config() {
        let mut config = Config::default();
        config.debug.log_level = "debug,helio_scene=trace".to_string();
        assert_eq!(filter_string(Some(&config)), "debug,helio_scene=trace");
    }

    #[test]
    fn test_blank_config_level_falls_back() {
        let mut config = Config::default();
        config.debug.log_level = "   ".to_string();
        assert_eq!(filter_string(Some(&config)), DEFAULT_FILTER);
    }

    #[test]
    fn test_filter_string_trims_config_level() {
        let mut config = Config::default();
        config.debug.log_level = "  warn,helio_app=debug\n".to_string();
        assert_eq!(filter_string(Some(&config)), "warn,helio_app=debug");
    }

    #[test]
    fn test_debug_build_writes_log_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_dir = temp_dir.path().join("logs");

        init_logging(Some(&log_dir), true, None);
        tracing::error!("first line");

        let log_file = log_dir.join(LOG_FILE_NAME);
        assert!(log_file.is_file(), "{} missing", log_file.display());
        let contents = std::fs::read_to_string(&log_file).unwrap();
        assert!(contents.contains("first line"), "{contents}");
    }
}
