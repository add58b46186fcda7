//! Client state and the reducer that drives it.
//!
//! All state transitions go through [`update`], which takes the current state
//! and one [`Msg`] and returns the next state plus the [`Effect`]s the runtime
//! must perform. Effects report back as further messages. Nothing here touches
//! the network or the terminal.

use uuid::Uuid;

use crate::error::ApiError;
use crate::escape::{EscapeThreshold, Verdict};
use crate::form::{FieldIssue, FormField, FormState};
use crate::types::{CalculationRequest, CalculationResult, OptionKind, OptionList};

/// Everything the client knows during one session.
#[derive(Debug, Clone)]
pub struct AppState {
    pub session_id: Uuid,
    pub threshold: EscapeThreshold,
    pub materials: OptionList,
    pub fuels: OptionList,
    pub form: FormState,
    pub loading: bool,
    pub result: Option<CalculationResult>,
    /// Most recent submission failure. Kept for diagnostics and the headless
    /// CLI; the form itself never displays it.
    pub last_failure: Option<ApiError>,
    /// Fields that blocked the last submit attempt.
    pub form_issues: Vec<(FormField, FieldIssue)>,
    submission: u64,
    initialized: bool,
    torn_down: bool,
}

impl AppState {
    pub fn new(threshold: EscapeThreshold) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            threshold,
            materials: OptionList::default(),
            fuels: OptionList::default(),
            form: FormState::default(),
            loading: false,
            result: None,
            last_failure: None,
            form_issues: Vec::new(),
            submission: 0,
            initialized: false,
            torn_down: false,
        }
    }

    pub fn options(&self, kind: OptionKind) -> &OptionList {
        match kind {
            OptionKind::Materials => &self.materials,
            OptionKind::Fuels => &self.fuels,
        }
    }

    fn options_mut(&mut self, kind: OptionKind) -> &mut OptionList {
        match kind {
            OptionKind::Materials => &mut self.materials,
            OptionKind::Fuels => &mut self.fuels,
        }
    }

    /// Number of the latest submission issued (0 before the first).
    pub fn submission(&self) -> u64 {
        self.submission
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// The submit control is disabled while a request is in flight.
    pub fn submit_enabled(&self) -> bool {
        !self.loading && !self.torn_down
    }

    pub fn issue_for(&self, field: FormField) -> Option<FieldIssue> {
        self.form_issues
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, issue)| *issue)
    }

    pub fn render_mode(&self) -> RenderMode<'_> {
        if self.loading {
            return RenderMode::Loading;
        }
        match &self.result {
            Some(result) => RenderMode::Result {
                result,
                verdict: self.threshold.classify(result.delta_v),
            },
            None => RenderMode::Idle,
        }
    }

    /// Apply a message in place and return the resulting effects.
    pub fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        let current = std::mem::take(self);
        let (next, effects) = update(current, msg);
        *self = next;
        effects
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(EscapeThreshold::default())
    }
}

/// The three mutually exclusive render modes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderMode<'a> {
    Idle,
    Loading,
    Result {
        result: &'a CalculationResult,
        verdict: Verdict,
    },
}

/// Inputs to the reducer: user actions and effect completions.
#[derive(Debug, Clone)]
pub enum Msg {
    /// First render. Triggers option loading.
    Init,
    OptionsLoaded {
        kind: OptionKind,
        outcome: Result<Vec<String>, ApiError>,
    },
    FieldChanged {
        field: FormField,
        value: String,
    },
    Submit,
    CalculationFinished {
        submission: u64,
        outcome: Result<CalculationResult, ApiError>,
    },
    /// The surface is going away; later completions are ignored.
    Teardown,
}

/// Work the runtime performs on behalf of the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchOptions(OptionKind),
    Calculate {
        submission: u64,
        request: CalculationRequest,
    },
    Diagnose(Diagnostic),
}

/// Entries for the diagnostic channel.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    OptionsLoaded {
        kind: OptionKind,
        count: usize,
    },
    OptionsFailed {
        kind: OptionKind,
        error: ApiError,
    },
    SubmissionBlocked {
        fields: Vec<FormField>,
    },
    CalculationSucceeded {
        submission: u64,
        delta_v: f64,
        verdict: Verdict,
    },
    CalculationFailed {
        submission: u64,
        error: ApiError,
    },
    StaleCompletionDropped {
        submission: u64,
    },
}

/// The reducer.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    if state.torn_down {
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::Init => {
            if state.initialized {
                Vec::new()
            } else {
                state.initialized = true;
                vec![
                    Effect::FetchOptions(OptionKind::Materials),
                    Effect::FetchOptions(OptionKind::Fuels),
                ]
            }
        }

        Msg::OptionsLoaded { kind, outcome } => {
            if !state.options(kind).is_pending() {
                return (state, Vec::new());
            }
            let diagnostic = match outcome {
                Ok(items) => {
                    let count = items.len();
                    *state.options_mut(kind) = OptionList::loaded(items);
                    Diagnostic::OptionsLoaded { kind, count }
                }
                Err(error) => {
                    *state.options_mut(kind) = OptionList::failed(error.clone());
                    Diagnostic::OptionsFailed { kind, error }
                }
            };
            vec![Effect::Diagnose(diagnostic)]
        }

        Msg::FieldChanged { field, value } => {
            state.form.set(field, value);
            state.form_issues.retain(|(f, _)| *f != field);
            Vec::new()
        }

        Msg::Submit => {
            if state.loading {
                return (state, Vec::new());
            }
            match state.form.validate() {
                Err(issues) => {
                    let fields = issues.iter().map(|(f, _)| *f).collect();
                    state.form_issues = issues;
                    vec![Effect::Diagnose(Diagnostic::SubmissionBlocked { fields })]
                }
                Ok(request) => {
                    state.form_issues.clear();
                    state.submission += 1;
                    state.loading = true;
                    state.result = None;
                    state.last_failure = None;
                    vec![Effect::Calculate {
                        submission: state.submission,
                        request,
                    }]
                }
            }
        }

        Msg::CalculationFinished {
            submission,
            outcome,
        } => {
            if submission != state.submission || !state.loading {
                return (
                    state,
                    vec![Effect::Diagnose(Diagnostic::StaleCompletionDropped {
                        submission,
                    })],
                );
            }
            state.loading = false;
            let diagnostic = match outcome {
                Ok(result) => {
                    let delta_v = result.delta_v;
                    state.result = Some(result);
                    Diagnostic::CalculationSucceeded {
                        submission,
                        delta_v,
                        verdict: state.threshold.classify(delta_v),
                    }
                }
                Err(error) => {
                    state.last_failure = Some(error.clone());
                    Diagnostic::CalculationFailed { submission, error }
                }
            };
            vec![Effect::Diagnose(diagnostic)]
        }

        Msg::Teardown => {
            state.torn_down = true;
            Vec::new()
        }
    };

    (state, effects)
}
