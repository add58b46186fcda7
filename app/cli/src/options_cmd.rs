//! `escapevel options`: list materials and fuels side by side.

use anyhow::{bail, Result};

use escapevel_core::{ApiError, CalculatorApi};

use crate::terminal_output::{note_error, render_table};

/// Both lists as table columns. A failed list shows as an empty column.
pub fn options_table(materials: &Result<Vec<String>, ApiError>, fuels: &Result<Vec<String>, ApiError>) -> String {
    let empty = Vec::new();
    let materials = materials.as_ref().unwrap_or(&empty);
    let fuels = fuels.as_ref().unwrap_or(&empty);

    let rows: Vec<Vec<String>> = (0..materials.len().max(fuels.len()))
        .map(|i| {
            vec![
                materials.get(i).cloned().unwrap_or_default(),
                fuels.get(i).cloned().unwrap_or_default(),
            ]
        })
        .collect();
    render_table(&["Materials", "Fuels"], &rows)
}

pub async fn run(api: &dyn CalculatorApi) -> Result<()> {
    let (materials, fuels) = tokio::join!(api.materials(), api.fuels());

    print!("{}", options_table(&materials, &fuels));

    let failures: Vec<&ApiError> = [&materials, &fuels]
        .into_iter()
        .filter_map(|r| r.as_ref().err())
        .collect();
    for err in &failures {
        note_error(&err.to_string());
    }
    if failures.len() == 2 {
        bail!("Could not load options from {}", api.base_url());
    }
    Ok(())
}
