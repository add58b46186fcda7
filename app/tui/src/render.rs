//! TUI Rendering
//!
//! Translates `AppState` + `ViewState` into ratatui widgets.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use escapevel_core::{format_delta_v, AppState, FieldKind, FormField, RenderMode, Verdict};

use crate::app::{Focus, ViewState};
use crate::art::verdict_art;

const TITLE: &str = "Rocket Escape Velocity Calculator";

const SUBMIT_LABEL: &str = "Calculate";
const SUBMIT_BUSY_LABEL: &str = "Calculating...";

pub fn draw_ui(f: &mut Frame, state: &AppState, view: &ViewState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(f.size());

    draw_intro(f, columns[0], state);
    draw_form(f, columns[1], state, view);
}

fn draw_intro(f: &mut Frame, area: Rect, state: &AppState) {
    let dim = Style::default().fg(Color::Gray);
    let lines = vec![
        Line::from(Span::styled(TITLE, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled(
            "Estimates a rocket's delta-v from its material, fuel, size and fuel level, \
             then checks whether that is enough to escape Earth's gravity.",
            dim,
        )),
        Line::from(""),
        Line::from(Span::styled("• Select a material for the rocket's shell.", dim)),
        Line::from(Span::styled("• Choose a fuel type and how full the tank is.", dim)),
        Line::from(Span::styled("• Enter height and diameter in meters.", dim)),
        Line::from(Span::styled("• Press Enter on Calculate.", dim)),
        Line::from(""),
        Line::from(Span::styled(
            format!("Escape threshold: {} m/s", format_delta_v(state.threshold.mps())),
            dim,
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Tab/↑↓ move  ←→ choose  Enter/Ctrl-S submit  Esc quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let intro = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(intro, area);
}

fn draw_form(f: &mut Frame, area: Rect, state: &AppState, view: &ViewState) {
    let mut constraints: Vec<Constraint> = FormField::ALL.iter().map(|_| Constraint::Length(3)).collect();
    constraints.push(Constraint::Length(3)); // Submit
    constraints.push(Constraint::Min(0)); // Outcome

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in FormField::ALL.into_iter().enumerate() {
        draw_field(f, rows[i], state, view, field);
    }
    draw_submit(f, rows[FormField::ALL.len()], state, view);
    draw_outcome(f, rows[FormField::ALL.len() + 1], state, view);
}

fn draw_field(f: &mut Frame, area: Rect, state: &AppState, view: &ViewState, field: FormField) {
    let focused = view.focus == Focus::Field(field);
    let value = state.form.get(field);

    let (text, text_style) = match field.kind() {
        FieldKind::Select(kind) if value.is_empty() => {
            (kind.placeholder().to_string(), Style::default().fg(Color::DarkGray))
        }
        FieldKind::Select(_) => (value.to_string(), Style::default()),
        FieldKind::Number { .. } => (value.to_string(), Style::default()),
    };
    let text = match field.kind() {
        FieldKind::Select(_) if focused => format!("< {text} >"),
        _ => text,
    };

    let mut title = vec![Span::raw(field.label())];
    if let Some(issue) = state.issue_for(field) {
        title.push(Span::styled(
            format!(" - {issue}"),
            Style::default().fg(Color::Red),
        ));
    }

    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else if state.issue_for(field).is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };

    let widget = Paragraph::new(Span::styled(text, text_style)).block(
        Block::default()
            .title(Line::from(title))
            .borders(Borders::ALL)
            .border_style(border),
    );
    f.render_widget(widget, area);
}

fn draw_submit(f: &mut Frame, area: Rect, state: &AppState, view: &ViewState) {
    let enabled = state.submit_enabled();
    let label = if enabled { SUBMIT_LABEL } else { SUBMIT_BUSY_LABEL };
    let style = match (enabled, view.focus == Focus::Submit) {
        (false, _) => Style::default().fg(Color::DarkGray),
        (true, true) => Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD),
        (true, false) => Style::default().fg(Color::Blue),
    };
    let button = Paragraph::new(Span::styled(label, style))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(style));
    f.render_widget(button, area);
}

fn draw_outcome(f: &mut Frame, area: Rect, state: &AppState, view: &ViewState) {
    let lines: Vec<Line> = match state.render_mode() {
        RenderMode::Idle => Vec::new(),
        RenderMode::Loading => vec![Line::from(""), Line::from(view.spinner())],
        RenderMode::Result { result, verdict } => {
            let color = match verdict {
                Verdict::Escape => Color::Green,
                Verdict::NoEscape => Color::Red,
            };
            let mut lines = vec![
                Line::from(Span::styled(
                    format!("Delta-V: {} m/s", format_delta_v(result.delta_v)),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(verdict.headline(), Style::default().fg(color))),
                Line::from(""),
            ];
            lines.extend(
                verdict_art(verdict)
                    .iter()
                    .map(|row| Line::from(Span::styled(*row, Style::default().fg(Color::Gray)))),
            );
            lines
        }
    };
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
