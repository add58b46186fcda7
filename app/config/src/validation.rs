//! Config validation with user-friendly error messages.

use thiserror::Error;
use url::Url;

use crate::schema::EscapevelConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// All errors and warnings found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

pub fn validate(config: &EscapevelConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_api(config, &mut report);
    validate_display(config, &mut report);
    validate_logging(config, &mut report);
    report
}

fn validate_api(config: &EscapevelConfig, report: &mut ValidationReport) {
    let path = "api.baseUrl";
    let raw = config.base_url();
    let url = match Url::parse(raw) {
        Ok(url) => url,
        Err(e) => {
            report.error(path, format!("'{raw}' is not a valid URL: {e}"));
            return;
        }
    };
    match url.scheme() {
        "https" => {}
        "http" => {
            let local = matches!(url.host_str(), Some("localhost" | "127.0.0.1" | "::1" | "[::1]"));
            if !local {
                report.warn(path, "Plain http to a remote host; form data travels unencrypted");
            }
        }
        other => report.error(path, format!("Unsupported scheme '{other}'; use http or https")),
    }
    if url.query().is_some() || url.fragment().is_some() {
        report.warn(path, "Query and fragment are ignored when building endpoint URLs");
    }
}

fn validate_display(config: &EscapevelConfig, report: &mut ValidationReport) {
    let mps = config.escape_velocity_mps();
    if !mps.is_finite() || mps <= 0.0 {
        report.error(
            "display.escapeVelocityMps",
            format!("Threshold must be a positive number of m/s, got {mps}"),
        );
    }
}

fn validate_logging(config: &EscapevelConfig, report: &mut ValidationReport) {
    let level = config.log_level();
    if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        report.error(
            "logging.level",
            format!("Unknown level '{level}'; expected one of {}", LOG_LEVELS.join(", ")),
        );
    }
    if let Some(dir) = config.log_dir() {
        if dir.trim().is_empty() {
            report.error("logging.dir", "Log directory cannot be empty");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{DisplayConfig, LoggingConfig};

    #[test]
    fn defaults_are_valid() {
        let report = validate(&EscapevelConfig::default());
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn rejects_unparseable_url() {
        let mut config = EscapevelConfig::default();
        config.set_base_url("not a url");
        let report = validate(&config);
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].path, "api.baseUrl");
    }

    #[test]
    fn rejects_non_http_scheme() {
        let mut config = EscapevelConfig::default();
        config.set_base_url("ftp://example.com");
        assert!(!validate(&config).is_valid());
    }

    #[test]
    fn warns_on_remote_plain_http() {
        let mut config = EscapevelConfig::default();
        config.set_base_url("http://example.com");
        let report = validate(&config);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);

        config.set_base_url("http://localhost:5000");
        assert!(validate(&config).warnings.is_empty());
    }

    #[test]
    fn rejects_non_positive_threshold() {
        let config = EscapevelConfig {
            display: Some(DisplayConfig {
                escape_velocity_mps: Some(0.0),
            }),
            ..Default::default()
        };
        let report = validate(&config);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].path, "display.escapeVelocityMps");
    }

    #[test]
    fn rejects_unknown_log_level() {
        let config = EscapevelConfig {
            logging: Some(LoggingConfig {
                level: Some("loud".into()),
                dir: None,
            }),
            ..Default::default()
        };
        assert!(!validate(&config).is_valid());
    }
}
