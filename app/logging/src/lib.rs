//! Telemetry and structured logging for escapevel.
//!
//! Handles subscriber setup (console + rolling NDJSON file) and the
//! diagnostic channel the form client reports into.

pub mod diagnostics;
pub mod logger;

pub use diagnostics::{DiagnosticEntry, DiagnosticEvent, DiagnosticLogger, DIAGNOSTICS_TARGET};
pub use logger::{init_logger, LogOptions};
