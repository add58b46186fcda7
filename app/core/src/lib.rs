pub mod channel;
pub mod effects;
pub mod error;
pub mod escape;
pub mod form;
pub mod state;
pub mod traits;
pub mod types;

pub use channel::MsgBus;
pub use effects::{perform, spawn_effect};
pub use error::{ApiError, Endpoint};
pub use escape::{format_delta_v, EscapeThreshold, Verdict, ESCAPE_VELOCITY_MPS};
pub use form::{FieldIssue, FieldKind, FormField, FormState};
pub use state::{update, AppState, Diagnostic, Effect, Msg, RenderMode};
pub use traits::{CalculatorApi, DEFAULT_BASE_URL};
pub use types::{CalculationRequest, CalculationResult, LoadStatus, OptionKind, OptionList};
