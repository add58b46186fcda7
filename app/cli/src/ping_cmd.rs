//! `escapevel ping`: check that the calculation service answers.

use std::time::Instant;

use anyhow::{bail, Result};
use tracing::info;

use escapevel_core::CalculatorApi;

use crate::terminal_output::{note_error, note_success};

pub async fn run(api: &dyn CalculatorApi) -> Result<()> {
    let started = Instant::now();
    match api.ping().await {
        Ok(message) => {
            let elapsed = started.elapsed().as_millis();
            info!(base_url = %api.base_url(), elapsed_ms = elapsed as u64, "Ping ok");
            note_success(&format!("{} replied {message:?} in {elapsed}ms", api.base_url()));
            Ok(())
        }
        Err(err) => {
            note_error(&err.to_string());
            bail!("{} is unreachable", api.base_url());
        }
    }
}
