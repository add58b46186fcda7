//! One client session: reducer state plus effect execution.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use escapevel_core::{
    spawn_effect, AppState, CalculatorApi, Effect, EscapeThreshold, Msg, MsgBus,
};
use escapevel_logging::DiagnosticLogger;

/// Owns the state for the lifetime of one form session.
///
/// Network effects run as spawned tasks and report back on the receiver
/// returned by [`Session::new`]; feed whatever arrives there into
/// [`Session::apply`].
pub struct Session {
    state: AppState,
    api: Arc<dyn CalculatorApi>,
    tx: mpsc::Sender<Msg>,
    in_flight: usize,
}

impl Session {
    pub fn new(api: Arc<dyn CalculatorApi>, threshold: EscapeThreshold) -> (Self, mpsc::Receiver<Msg>) {
        let mut bus = MsgBus::new();
        let rx = bus.take_rx().expect("fresh bus rx already taken");
        let session = Self {
            state: AppState::new(threshold),
            api,
            tx: bus.tx,
            in_flight: 0,
        };
        (session, rx)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Requests spawned whose completion has not been applied yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Feed one message through the reducer and carry out its effects.
    pub fn apply(&mut self, msg: Msg) {
        if matches!(
            msg,
            Msg::OptionsLoaded { .. } | Msg::CalculationFinished { .. }
        ) {
            self.in_flight = self.in_flight.saturating_sub(1);
        }

        for effect in self.state.dispatch(msg) {
            match effect {
                Effect::Diagnose(diagnostic) => {
                    DiagnosticLogger::record(&self.state.session_id, &diagnostic);
                }
                effect => {
                    debug!(?effect, "Spawning effect");
                    if spawn_effect(Arc::clone(&self.api), effect, self.tx.clone()).is_some() {
                        self.in_flight += 1;
                    }
                }
            }
        }
    }

    /// Apply completions until nothing is in flight.
    pub async fn settle(&mut self, rx: &mut mpsc::Receiver<Msg>) {
        self.settle_while(rx, |_| true).await;
    }

    /// Apply completions while `pending` holds and something is in flight.
    pub async fn settle_while(
        &mut self,
        rx: &mut mpsc::Receiver<Msg>,
        pending: impl Fn(&AppState) -> bool,
    ) {
        while self.in_flight > 0 && pending(&self.state) {
            match rx.recv().await {
                Some(msg) => self.apply(msg),
                None => break,
            }
        }
    }

    /// Mark the session torn down. Drop the receiver afterwards so late
    /// completions fail to send.
    pub fn teardown(&mut self) {
        self.apply(Msg::Teardown);
    }
}
