//! Keyboard Input Handler
//!
//! Turns crossterm key events into focus changes on `ViewState` and
//! reducer messages.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use escapevel_core::{AppState, FieldKind, Msg};

use crate::app::{cycle_option, Focus, ViewState};

/// Characters a numeric input accepts.
fn numeric_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')
}

/// Handle a single key event. Returns a message for the reducer, if any.
pub fn handle_key_event(key: KeyEvent, state: &AppState, view: &mut ViewState) -> Option<Msg> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c') if ctrl => quit(view),
        KeyCode::Esc => quit(view),
        KeyCode::Char('s') if ctrl => submit(state),
        KeyCode::Tab | KeyCode::Down => {
            view.focus = view.focus.next();
            None
        }
        KeyCode::BackTab | KeyCode::Up => {
            view.focus = view.focus.prev();
            None
        }
        KeyCode::Enter => match view.focus {
            Focus::Field(field) if matches!(field.kind(), FieldKind::Select(_)) => {
                view.focus = view.focus.next();
                None
            }
            _ => submit(state),
        },
        KeyCode::Left | KeyCode::Right => {
            let Focus::Field(field) = view.focus else {
                return None;
            };
            cycle_option(state, view, field, key.code == KeyCode::Right)
        }
        KeyCode::Backspace => match view.focus {
            Focus::Field(field) if matches!(field.kind(), FieldKind::Number { .. }) => {
                let mut value = state.form.get(field).to_string();
                value.pop()?;
                Some(Msg::FieldChanged { field, value })
            }
            _ => None,
        },
        KeyCode::Char(c) if !ctrl => match view.focus {
            Focus::Field(field) if matches!(field.kind(), FieldKind::Number { .. }) && numeric_char(c) => {
                let mut value = state.form.get(field).to_string();
                value.push(c);
                Some(Msg::FieldChanged { field, value })
            }
            _ => None,
        },
        _ => None,
    }
}

fn quit(view: &mut ViewState) -> Option<Msg> {
    view.should_quit = true;
    Some(Msg::Teardown)
}

/// The submit control does nothing while disabled.
fn submit(state: &AppState) -> Option<Msg> {
    state.submit_enabled().then_some(Msg::Submit)
}
