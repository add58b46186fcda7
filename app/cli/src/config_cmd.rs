//! `escapevel config`: show the effective config, or write a starter file.

use std::path::Path;

use anyhow::{bail, Context, Result};

use escapevel_config::{apply_all_defaults, write_config, EscapevelConfig};

use crate::terminal_output::{note_info, note_success, paint, DIM};

pub fn show(config: &EscapevelConfig, path: &Path) -> Result<()> {
    let source = if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not found, using defaults)", path.display())
    };
    println!("{}", paint(DIM, &format!("# {source}")));
    print!("{}", serde_yaml::to_string(config).context("Failed to serialize config")?);
    Ok(())
}

/// Write the built-in defaults to `path`. Refuses to replace an existing
/// file unless `force` is set.
pub async fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        note_info("Pass --force to overwrite it");
        bail!("Config already exists at {}", path.display());
    }
    write_config(&apply_all_defaults(EscapevelConfig::default()), path).await?;
    note_success(&format!("Wrote {}", path.display()));
    Ok(())
}
