//! Terminal event loop.

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use escapevel_core::{CalculatorApi, EscapeThreshold, Msg};

use crate::app::ViewState;
use crate::input::handle_key_event;
use crate::render::draw_ui;
use crate::session::Session;

const TICK: Duration = Duration::from_millis(100);

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Run the interactive form until the user quits.
pub async fn run_ui(api: Arc<dyn CalculatorApi>, threshold: EscapeThreshold) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let outcome = event_loop(&mut terminal, api, threshold).await;
    if let Err(e) = restore_terminal(&mut terminal) {
        warn!(error = %e, "Failed to restore terminal");
    }
    outcome
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn event_loop(
    terminal: &mut Tui,
    api: Arc<dyn CalculatorApi>,
    threshold: EscapeThreshold,
) -> Result<()> {
    info!(base_url = %api.base_url(), "Starting form session");
    let (mut session, mut completions) = Session::new(api, threshold);
    let mut view = ViewState::new();
    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(TICK);

    session.apply(Msg::Init);

    while !view.should_quit {
        terminal.draw(|f| draw_ui(f, session.state(), &view))?;

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) => {
                    if let Some(msg) = handle_key_event(key, session.state(), &mut view) {
                        session.apply(msg);
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                None => break,
            },
            Some(msg) = completions.recv() => session.apply(msg),
            _ = ticker.tick() => {
                if session.state().loading {
                    view.tick();
                }
            }
        }
    }

    session.teardown();
    drop(completions);
    info!(
        session = %session.state().session_id,
        abandoned = session.in_flight(),
        "Form session closed"
    );
    Ok(())
}
