//! Config file read/write.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tokio::fs;
use tracing::{debug, info};

use crate::defaults::DEFAULT_LOG_DIR_NAME;
use crate::schema::EscapevelConfig;

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "ESCAPEVEL_CONFIG_DIR";

/// Resolve the config directory.
/// Priority: `ESCAPEVEL_CONFIG_DIR` env > `~/.escapevel/` > `./.escapevel/`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return PathBuf::from(dir);
    }
    match dirs::home_dir() {
        Some(home) => home.join(".escapevel"),
        None => PathBuf::from(".escapevel"),
    }
}

pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Where the rolling log goes: `logging.dir` if set, else `<config dir>/logs`.
pub fn log_dir(config: &EscapevelConfig, config_dir: &Path) -> PathBuf {
    match config.log_dir() {
        Some(dir) => PathBuf::from(dir),
        None => config_dir.join(DEFAULT_LOG_DIR_NAME),
    }
}

/// Read the config file as an untyped value tree.
///
/// Returns an empty object if the file doesn't exist (first run).
pub async fn load_raw(path: &Path) -> Result<Value> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(Value::Object(Default::default()));
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    // An empty file parses to null.
    let value: Option<Value> = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(value.unwrap_or_else(|| Value::Object(Default::default())))
}

/// Write config to disk atomically (write to temp file, rename).
pub async fn write_config(config: &EscapevelConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.with_context(|| {
            format!("Failed to create config directory: {}", parent.display())
        })?;
    }

    let yaml = serde_yaml::to_string(config).context("Failed to serialize config to YAML")?;

    let tmp_path = path.with_extension("yaml.tmp");
    fs::write(&tmp_path, yaml.as_bytes())
        .await
        .with_context(|| format!("Failed to write temp config: {}", tmp_path.display()))?;

    fs::rename(&tmp_path, path)
        .await
        .with_context(|| format!("Failed to rename temp config to: {}", path.display()))?;

    info!(path = %path.display(), "Wrote config");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("escapevel-io-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[tokio::test]
    async fn missing_file_is_empty_object() {
        let dir = scratch_dir("missing");
        let value = load_raw(&config_file_path(&dir)).await.unwrap();
        assert_eq!(value, serde_json::json!({}));
    }

    #[tokio::test]
    async fn write_then_load() {
        let dir = scratch_dir("write");
        let path = config_file_path(&dir);
        let mut config = EscapevelConfig::default();
        config.set_base_url("http://localhost:5000");

        write_config(&config, &path).await.unwrap();
        let value = load_raw(&path).await.unwrap();
        assert_eq!(value["api"]["baseUrl"], "http://localhost:5000");
        assert!(!path.with_extension("yaml.tmp").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn log_dir_defaults_under_config_dir() {
        let config = EscapevelConfig::default();
        assert_eq!(
            log_dir(&config, Path::new("/tmp/ev")),
            PathBuf::from("/tmp/ev/logs")
        );
    }
}
