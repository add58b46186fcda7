use tokio::sync::mpsc;
use tracing::debug;

use crate::state::Msg;

/// Default channel buffer size for effect completions.
const DEFAULT_BUFFER_SIZE: usize = 64;

/// Carries effect completions back to the task that owns the state.
///
/// Spawned effects hold clones of `tx`. Dropping the receiver on teardown
/// makes every later send fail, so late completions never reach the state.
pub struct MsgBus {
    pub tx: mpsc::Sender<Msg>,
    rx: Option<mpsc::Receiver<Msg>>,
}

impl MsgBus {
    pub fn new() -> Self {
        Self::with_buffer_size(DEFAULT_BUFFER_SIZE)
    }

    pub fn with_buffer_size(buffer: usize) -> Self {
        let (tx, rx) = mpsc::channel(buffer);
        debug!(buffer_size = buffer, "MsgBus initialized");
        Self { tx, rx: Some(rx) }
    }

    /// Take the receiver (can only be called once).
    pub fn take_rx(&mut self) -> Option<mpsc::Receiver<Msg>> {
        self.rx.take()
    }
}

impl Default for MsgBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delivers_messages() {
        let mut bus = MsgBus::new();
        let mut rx = bus.take_rx().unwrap();
        bus.tx.send(Msg::Submit).await.unwrap();
        assert!(matches!(rx.recv().await, Some(Msg::Submit)));
    }

    #[tokio::test]
    async fn take_rx_once() {
        let mut bus = MsgBus::new();
        assert!(bus.take_rx().is_some());
        assert!(bus.take_rx().is_none());
    }

    #[tokio::test]
    async fn send_fails_after_receiver_dropped() {
        let mut bus = MsgBus::new();
        drop(bus.take_rx());
        assert!(bus.tx.send(Msg::Teardown).await.is_err());
    }
}
