//! `escapevel-config`: configuration for the escapevel client.
//!
//! Provides:
//! - Typed config schema (`api`, `display`, `logging`)
//! - YAML read/write
//! - `${ENV_VAR}` substitution and `ESCAPEVEL_API_URL` override
//! - Default value application
//! - Validation with errors and warnings

pub mod defaults;
pub mod env;
pub mod io;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{apply_env_overrides, resolve_env_vars_with, MissingEnvVarError, API_URL_ENV};
pub use io::{config_dir, config_file_path, log_dir, write_config};
pub use schema::EscapevelConfig;
pub use validation::{validate, ConfigValidationError, ValidationReport};

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};

/// A config ready for use, plus the warnings found while validating it.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: EscapevelConfig,
    pub warnings: Vec<ConfigValidationError>,
}

/// Load, substitute env vars, apply overrides and defaults, and validate.
///
/// This is the main entry point for loading a config at runtime. `env` is
/// usually the process environment, with command-line overrides layered on
/// top. Logging is not initialized yet, so warnings are handed back.
pub async fn load_and_prepare(path: &Path, env: &HashMap<String, String>) -> Result<LoadedConfig> {
    let raw = io::load_raw(path).await?;
    prepare(raw, env)
}

/// The load pipeline after the file has been read.
pub fn prepare(raw: serde_json::Value, env: &HashMap<String, String>) -> Result<LoadedConfig> {
    let value = resolve_env_vars_with(&raw, env).context("Failed to resolve env vars in config")?;

    let config: EscapevelConfig =
        serde_json::from_value(value).context("Failed to deserialize config")?;
    let config = apply_env_overrides(config, env);
    let config = apply_all_defaults(config);

    let report = validate(&config);
    if !report.is_valid() {
        let messages: Vec<String> = report.errors.iter().map(ToString::to_string).collect();
        bail!("Invalid configuration:\n  {}", messages.join("\n  "));
    }

    Ok(LoadedConfig {
        config,
        warnings: report.warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn pipeline_resolves_and_defaults() {
        let raw = json!({"api": {"baseUrl": "http://${HOST}:5000"}});
        let loaded = prepare(raw, &env(&[("HOST", "localhost")])).unwrap();
        assert_eq!(loaded.config.base_url(), "http://localhost:5000");
        assert_eq!(loaded.config.escape_velocity_mps(), 11_200.0);
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn env_override_beats_file() {
        let raw = json!({"api": {"baseUrl": "http://localhost:5000"}});
        let loaded = prepare(raw, &env(&[(API_URL_ENV, "https://other.example")])).unwrap();
        assert_eq!(loaded.config.base_url(), "https://other.example");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let raw = json!({"display": {"escapeVelocityMps": -5.0}});
        let err = prepare(raw, &HashMap::new()).unwrap_err().to_string();
        assert!(err.contains("display.escapeVelocityMps"));
    }

    #[test]
    fn unknown_shape_is_rejected() {
        let raw = json!({"display": {"escapeVelocityMps": "fast"}});
        assert!(prepare(raw, &HashMap::new()).is_err());
    }
}
