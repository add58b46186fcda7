//! Diagnostic channel
//!
//! Every `Effect::Diagnose` the reducer emits ends up here as one structured
//! entry, tagged with the session it belongs to.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use escapevel_core::{Diagnostic, Verdict};

/// Tracing target for diagnostic entries, for filtering (`RUST_LOG=escapevel_diagnostics=info`).
pub const DIAGNOSTICS_TARGET: &str = "escapevel_diagnostics";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEvent {
    OptionsLoaded {
        list: String,
        count: usize,
    },
    OptionsFailed {
        list: String,
        error_kind: String,
        error: String,
    },
    SubmissionBlocked {
        fields: Vec<String>,
    },
    CalculationSucceeded {
        submission: u64,
        delta_v: f64,
        escape: bool,
    },
    CalculationFailed {
        submission: u64,
        error_kind: String,
        error: String,
    },
    StaleCompletionDropped {
        submission: u64,
    },
}

impl DiagnosticEvent {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::OptionsFailed { .. } | Self::CalculationFailed { .. })
    }
}

impl From<&Diagnostic> for DiagnosticEvent {
    fn from(diagnostic: &Diagnostic) -> Self {
        match diagnostic {
            Diagnostic::OptionsLoaded { kind, count } => Self::OptionsLoaded {
                list: kind.to_string(),
                count: *count,
            },
            Diagnostic::OptionsFailed { kind, error } => Self::OptionsFailed {
                list: kind.to_string(),
                error_kind: error.kind().to_string(),
                error: error.to_string(),
            },
            Diagnostic::SubmissionBlocked { fields } => Self::SubmissionBlocked {
                fields: fields.iter().map(|f| f.key().to_string()).collect(),
            },
            Diagnostic::CalculationSucceeded {
                submission,
                delta_v,
                verdict,
            } => Self::CalculationSucceeded {
                submission: *submission,
                delta_v: *delta_v,
                escape: *verdict == Verdict::Escape,
            },
            Diagnostic::CalculationFailed { submission, error } => Self::CalculationFailed {
                submission: *submission,
                error_kind: error.kind().to_string(),
                error: error.to_string(),
            },
            Diagnostic::StaleCompletionDropped { submission } => Self::StaleCompletionDropped {
                submission: *submission,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticEntry {
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: DiagnosticEvent,
}

pub struct DiagnosticLogger;

impl DiagnosticLogger {
    /// Record one diagnostic. Failures log at `warn`, everything else at `info`.
    pub fn record(session_id: &Uuid, diagnostic: &Diagnostic) -> DiagnosticEntry {
        let entry = DiagnosticEntry {
            session_id: session_id.to_string(),
            timestamp: Utc::now(),
            event: DiagnosticEvent::from(diagnostic),
        };

        let payload = serde_json::to_string(&entry).unwrap_or_default();
        if entry.event.is_failure() {
            warn!(target: DIAGNOSTICS_TARGET, session = %entry.session_id, entry = %payload, "Client diagnostic");
        } else {
            info!(target: DIAGNOSTICS_TARGET, session = %entry.session_id, entry = %payload, "Client diagnostic");
        }
        entry
    }
}
