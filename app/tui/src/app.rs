//! TUI view state
//!
//! Terminal-only concerns that the reducer does not model: which control has
//! focus, spinner animation, select positions, and whether the loop should
//! exit.

use std::collections::HashMap;

use escapevel_core::{AppState, FieldKind, FormField, Msg};

/// Focusable controls, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(FormField),
    Submit,
}

impl Focus {
    const ORDER: [Focus; 6] = [
        Focus::Field(FormField::Material),
        Focus::Field(FormField::FuelType),
        Focus::Field(FormField::Height),
        Focus::Field(FormField::Diameter),
        Focus::Field(FormField::FuelFillPercentage),
        Focus::Submit,
    ];

    fn index(&self) -> usize {
        Self::ORDER.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.index() + len - 1) % len]
    }
}

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Debug, Clone)]
pub struct ViewState {
    pub focus: Focus,
    pub spinner_frame: usize,
    pub should_quit: bool,
    /// Choice index per select field; 0 is the placeholder.
    pub choices: HashMap<FormField, usize>,
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            focus: Focus::Field(FormField::Material),
            spinner_frame: 0,
            should_quit: false,
            choices: HashMap::new(),
        }
    }

    pub fn tick(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

/// Move a select field to its next (or previous) choice.
///
/// Choices are the placeholder (empty value) followed by the loaded options.
/// The position is remembered in `view`, so repeated entries stay reachable.
/// Returns `None` for non-select fields and for lists with no options.
pub fn cycle_option(state: &AppState, view: &mut ViewState, field: FormField, forward: bool) -> Option<Msg> {
    let FieldKind::Select(kind) = field.kind() else {
        return None;
    };
    let items = state.options(kind).items();
    if items.is_empty() {
        return None;
    }

    let choice = |i: usize| match i {
        0 => Some(""),
        n => items.get(n - 1).map(String::as_str),
    };
    let current = state.form.get(field);
    let index = match view.choices.get(&field) {
        Some(&i) if choice(i) == Some(current) => i,
        _ => items
            .iter()
            .position(|item| item == current)
            .map_or(0, |i| i + 1),
    };

    let choices = items.len() + 1;
    let next = if forward {
        (index + 1) % choices
    } else {
        (index + choices - 1) % choices
    };
    view.choices.insert(field, next);

    let value = choice(next).unwrap_or_default().to_string();
    Some(Msg::FieldChanged { field, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use escapevel_core::OptionKind;

    fn state_with_fuels(fuels: &[&str]) -> AppState {
        let mut state = AppState::default();
        state.dispatch(Msg::OptionsLoaded {
            kind: OptionKind::Fuels,
            outcome: Ok(fuels.iter().map(|f| f.to_string()).collect()),
        });
        state
    }

    fn value_of(msg: Option<Msg>) -> Option<String> {
        match msg {
            Some(Msg::FieldChanged { value, .. }) => Some(value),
            _ => None,
        }
    }

    #[test]
    fn focus_wraps_both_ways() {
        assert_eq!(Focus::Submit.next(), Focus::Field(FormField::Material));
        assert_eq!(Focus::Field(FormField::Material).prev(), Focus::Submit);
        assert_eq!(
            Focus::Field(FormField::Height).next(),
            Focus::Field(FormField::Diameter)
        );
    }

    #[test]
    fn cycles_through_placeholder() {
        let mut state = state_with_fuels(&["Hydrazine", "Nitrous Oxide"]);
        let mut view = ViewState::new();
        let field = FormField::FuelType;

        let first = cycle_option(&state, &mut view, field, true);
        assert_eq!(value_of(first.clone()).as_deref(), Some("Hydrazine"));
        state.dispatch(first.unwrap());

        let back = cycle_option(&state, &mut view, field, false);
        assert_eq!(value_of(back).as_deref(), Some(""));

        state.form.set(field, "Nitrous Oxide");
        assert_eq!(
            value_of(cycle_option(&state, &mut view, field, true)).as_deref(),
            Some("")
        );
    }

    #[test]
    fn repeated_entries_do_not_trap_cycling() {
        let mut state = state_with_fuels(&["A", "A", "B"]);
        let mut view = ViewState::new();
        let mut seen = Vec::new();
        for _ in 0..6 {
            let msg = cycle_option(&state, &mut view, FormField::FuelType, true).unwrap();
            seen.push(value_of(Some(msg.clone())).unwrap());
            state.dispatch(msg);
        }
        assert_eq!(seen, ["A", "A", "B", "", "A", "A"]);
    }

    #[test]
    fn empty_list_cannot_cycle() {
        let state = AppState::default();
        let mut view = ViewState::new();
        assert!(cycle_option(&state, &mut view, FormField::Material, true).is_none());
        assert!(cycle_option(&state, &mut view, FormField::Height, true).is_none());
    }

    #[test]
    fn spinner_advances() {
        let mut view = ViewState::new();
        let first = view.spinner();
        view.tick();
        assert_ne!(first, view.spinner());
    }
}
