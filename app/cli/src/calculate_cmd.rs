//! `escapevel calculate`: one headless submission through the form session.

use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Args;
use tracing::info;

use escapevel_core::{
    format_delta_v, ApiError, AppState, CalculationResult, CalculatorApi, Endpoint, EscapeThreshold,
    FieldIssue, FieldKind, FormField, LoadStatus, Msg, RenderMode, Verdict,
};
use escapevel_tui::Session;

use crate::terminal_output::{note_error, note_success, note_warn, paint, BOLD};

#[derive(Debug, Clone, Args)]
pub struct CalculateArgs {
    /// Shell material, as listed by `escapevel options`
    #[arg(long)]
    pub material: String,
    /// Fuel type, as listed by `escapevel options`
    #[arg(long)]
    pub fuel_type: String,
    /// Rocket height in meters
    #[arg(long, allow_hyphen_values = true)]
    pub height: String,
    /// Rocket diameter in meters
    #[arg(long, allow_hyphen_values = true)]
    pub diameter: String,
    /// Fuel fill percentage (0-100)
    #[arg(long, allow_hyphen_values = true)]
    pub fill: String,
    /// Print the raw result as JSON
    #[arg(long)]
    pub json: bool,
}

impl CalculateArgs {
    fn fields(&self) -> [(FormField, &str); 5] {
        [
            (FormField::Material, &self.material),
            (FormField::FuelType, &self.fuel_type),
            (FormField::Height, &self.height),
            (FormField::Diameter, &self.diameter),
            (FormField::FuelFillPercentage, &self.fill),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CalculateOutcome {
    Blocked(Vec<(FormField, FieldIssue)>),
    Failed(ApiError),
    Computed {
        result: CalculationResult,
        verdict: Verdict,
    },
}

/// Drive a session through init, field entry and submit, and report where
/// it ended up. Submission does not wait for the option lists; each select
/// value is checked against whichever lists have loaded by the time the
/// calculation lands, and a warning is returned for every unlisted value.
pub async fn submit(
    api: Arc<dyn CalculatorApi>,
    threshold: EscapeThreshold,
    args: &CalculateArgs,
) -> (CalculateOutcome, Vec<String>) {
    let (mut session, mut rx) = Session::new(api, threshold);
    session.apply(Msg::Init);
    for (field, value) in args.fields() {
        session.apply(Msg::FieldChanged {
            field,
            value: value.to_string(),
        });
    }

    session.apply(Msg::Submit);
    if !session.state().form_issues.is_empty() {
        let issues = session.state().form_issues.clone();
        return (CalculateOutcome::Blocked(issues), unlisted_choices(session.state(), args));
    }
    session.settle_while(&mut rx, |state| state.loading).await;

    let state = session.state();
    let warnings = unlisted_choices(state, args);
    let outcome = match (state.render_mode(), &state.last_failure) {
        (RenderMode::Result { result, verdict }, _) => CalculateOutcome::Computed {
            result: result.clone(),
            verdict,
        },
        (_, Some(err)) => CalculateOutcome::Failed(err.clone()),
        (_, None) => CalculateOutcome::Failed(ApiError::Network {
            endpoint: Endpoint::Calculate,
            message: "request ended without a response".into(),
        }),
    };
    (outcome, warnings)
}

/// Select values missing from a loaded option list. Pending or failed lists
/// are not checked.
fn unlisted_choices(state: &AppState, args: &CalculateArgs) -> Vec<String> {
    args.fields()
        .into_iter()
        .filter_map(|(field, value)| match field.kind() {
            FieldKind::Select(kind) => {
                let options = state.options(kind);
                let unlisted = *options.status() == LoadStatus::Loaded
                    && !value.is_empty()
                    && !options.contains(value);
                unlisted.then(|| format!("{value:?} is not one of the listed {kind}"))
            }
            FieldKind::Number { .. } => None,
        })
        .collect()
}

pub async fn run(api: Arc<dyn CalculatorApi>, threshold: EscapeThreshold, args: CalculateArgs) -> Result<()> {
    let (outcome, warnings) = submit(api, threshold, &args).await;
    for warning in &warnings {
        note_warn(warning);
    }

    match outcome {
        CalculateOutcome::Blocked(issues) => {
            for (field, issue) in &issues {
                note_error(&format!("{}: {issue}", field.label()));
            }
            bail!("Form is incomplete ({} field(s) need attention)", issues.len());
        }
        CalculateOutcome::Failed(err) => {
            note_error(&err.to_string());
            bail!("Calculation failed");
        }
        CalculateOutcome::Computed { result, verdict } => {
            info!(delta_v = result.delta_v, escape = verdict.is_escape(), "Calculation complete");
            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
                return Ok(());
            }
            println!(
                "{}",
                paint(BOLD, &format!("Delta-V: {} m/s", format_delta_v(result.delta_v)))
            );
            match verdict {
                Verdict::Escape => note_success(verdict.headline()),
                Verdict::NoEscape => note_error(verdict.headline()),
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use escapevel_client::MockCalculatorApi;
    use tokio::sync::Notify;

    fn args() -> CalculateArgs {
        CalculateArgs {
            material: "Titanium".into(),
            fuel_type: "Liquid Hydrogen".into(),
            height: "50".into(),
            diameter: "4".into(),
            fill: "85.5".into(),
            json: false,
        }
    }

    fn listing() -> MockCalculatorApi {
        MockCalculatorApi::new()
            .with_materials(Ok(vec!["Titanium".into(), "Steel".into()]))
            .with_fuels(Ok(vec!["Liquid Hydrogen".into()]))
    }

    #[tokio::test]
    async fn sends_fields_verbatim_and_classifies() {
        let api = Arc::new(listing().with_delta_v(11_200.0));
        let (outcome, warnings) = submit(api.clone(), EscapeThreshold::default(), &args()).await;

        assert!(warnings.is_empty());
        assert!(matches!(
            outcome,
            CalculateOutcome::Computed { verdict: Verdict::Escape, .. }
        ));
        let sent = api.calculations();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].fuel_fill_percentage, "85.5");
        assert_eq!(sent[0].height, "50");
    }

    #[tokio::test]
    async fn unlisted_choice_warns_but_still_submits() {
        let api = Arc::new(listing().with_delta_v(9_000.0));
        let mut args = args();
        args.material = "Unobtainium".into();

        let (outcome, warnings) = submit(api.clone(), EscapeThreshold::default(), &args).await;
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Unobtainium"));
        assert!(matches!(
            outcome,
            CalculateOutcome::Computed { verdict: Verdict::NoEscape, .. }
        ));
        assert_eq!(api.calculations().len(), 1);
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_service() {
        let api = Arc::new(listing());
        let mut args = args();
        args.fill = "150".into();
        args.height = String::new();

        let (outcome, _) = submit(api.clone(), EscapeThreshold::default(), &args).await;
        let issues = match outcome {
            CalculateOutcome::Blocked(issues) => issues,
            other => panic!("expected blocked submit, got {other:?}"),
        };
        let fields: Vec<FormField> = issues.iter().map(|(f, _)| *f).collect();
        assert!(fields.contains(&FormField::Height));
        assert!(fields.contains(&FormField::FuelFillPercentage));
        assert!(api.calculations().is_empty());
    }

    #[tokio::test]
    async fn service_error_is_reported() {
        let err = ApiError::Status {
            endpoint: Endpoint::Calculate,
            status: 400,
            message: "Invalid material or fuel type".into(),
        };
        let api = Arc::new(listing().with_calculation(Err(err.clone())));

        let (outcome, _) = submit(api, EscapeThreshold::default(), &args()).await;
        assert_eq!(outcome, CalculateOutcome::Failed(err));
    }

    #[tokio::test]
    async fn hanging_option_list_does_not_delay_submission() {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(
            listing()
                .with_materials_gate(gate)
                .with_delta_v(12_000.0),
        );
        let (outcome, warnings) = tokio::time::timeout(
            Duration::from_secs(5),
            submit(api.clone(), EscapeThreshold::default(), &args()),
        )
        .await
        .expect("submit waited on /materials");

        assert!(matches!(outcome, CalculateOutcome::Computed { .. }));
        assert_eq!(api.calculations().len(), 1);
        assert!(warnings.is_empty());
    }

    #[tokio::test]
    async fn option_failure_does_not_block_submission() {
        let api = Arc::new(
            MockCalculatorApi::new()
                .with_materials(Err(ApiError::Network {
                    endpoint: Endpoint::Materials,
                    message: "connection refused".into(),
                }))
                .with_fuels(Ok(vec!["Liquid Hydrogen".into()]))
                .with_delta_v(12_000.0),
        );
        let (outcome, warnings) = submit(api, EscapeThreshold::default(), &args()).await;
        assert!(warnings.is_empty());
        assert!(matches!(outcome, CalculateOutcome::Computed { .. }));
    }
}
