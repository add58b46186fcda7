//! Config defaults: fills unset values after loading.

use crate::schema::{ApiConfig, DisplayConfig, EscapevelConfig, LoggingConfig};

pub use escapevel_core::DEFAULT_BASE_URL;

/// Default escape threshold (m/s).
pub const DEFAULT_ESCAPE_VELOCITY_MPS: f64 = escapevel_core::ESCAPE_VELOCITY_MPS;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log directory name, relative to the config directory.
pub const DEFAULT_LOG_DIR_NAME: &str = "logs";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: EscapevelConfig) -> EscapevelConfig {
    let config = apply_api_defaults(config);
    let config = apply_display_defaults(config);
    apply_logging_defaults(config)
}

fn apply_api_defaults(mut config: EscapevelConfig) -> EscapevelConfig {
    let api = config.api.get_or_insert_with(ApiConfig::default);
    if api.base_url.is_none() {
        api.base_url = Some(DEFAULT_BASE_URL.to_string());
    }
    config
}

fn apply_display_defaults(mut config: EscapevelConfig) -> EscapevelConfig {
    let display = config.display.get_or_insert_with(DisplayConfig::default);
    if display.escape_velocity_mps.is_none() {
        display.escape_velocity_mps = Some(DEFAULT_ESCAPE_VELOCITY_MPS);
    }
    config
}

fn apply_logging_defaults(mut config: EscapevelConfig) -> EscapevelConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    if logging.level.is_none() {
        logging.level = Some(DEFAULT_LOG_LEVEL.to_string());
    }
    config
}
