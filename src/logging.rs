//! Logger setup.
//!
//! The terminal is in raw mode while the app runs, so records go to a file
//! instead of stderr.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Once;

use crate::app_dirs::AppDirs;

/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "farmquest::catch_game=debug").
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub path: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            path: AppDirs::log_path(),
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
/// Falls back to stderr when the log file cannot be opened.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = &config.env_filter {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        if let Some(parent) = config.path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.path);
        let opened = file.is_ok();
        if let Ok(file) = file {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
            builder.write_style(env_logger::WriteStyle::Never);
        }

        // Another logger may already be installed (e.g. by a test harness)
        if builder.try_init().is_ok() {
            if opened {
                log::debug!("logging to {}", config.path.display());
            } else {
                log::warn!("could not open {}, logging to stderr", config.path.display());
            }
        }
    });
}
