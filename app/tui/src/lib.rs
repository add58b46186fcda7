//! Terminal surface for the escapevel form client.
//!
//! `Session` owns the reducer state and performs its effects; `run_ui`
//! wires a session to a ratatui/crossterm terminal.

pub mod app;
pub mod art;
pub mod input;
pub mod render;
pub mod runtime;
pub mod session;

pub use app::{Focus, ViewState};
pub use input::handle_key_event;
pub use render::draw_ui;
pub use runtime::run_ui;
pub use session::Session;
