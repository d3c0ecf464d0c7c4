//! Logger setup
//!
//! `env_logger` behind the `log` facade. The filter comes from the config
//! file's `log_filter`, falling back to `RUST_LOG` and then `info`.

use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "kgames=debug,miniquad=warn").
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
}

impl LoggingConfig {
    fn filter(self) -> String {
        self.env_filter
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| "info".to_string())
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config.filter();
        env_logger::Builder::new().parse_filters(&filter).init();
        log::debug!("logging initialized with \"{}\"", filter);
    });
}
