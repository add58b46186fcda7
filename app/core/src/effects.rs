//! Effect execution against a [`CalculatorApi`].

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::state::{Effect, Msg};
use crate::traits::CalculatorApi;

/// Run one network effect to completion and turn its outcome into a message.
///
/// `Diagnose` effects carry no I/O and yield `None`; the runtime records them.
pub async fn perform(api: &dyn CalculatorApi, effect: Effect) -> Option<Msg> {
    match effect {
        Effect::FetchOptions(kind) => Some(Msg::OptionsLoaded {
            kind,
            outcome: api.options(kind).await,
        }),
        Effect::Calculate {
            submission,
            request,
        } => Some(Msg::CalculationFinished {
            submission,
            outcome: api.calculate(&request).await,
        }),
        Effect::Diagnose(_) => None,
    }
}

/// Spawn a network effect; its completion is sent on `tx`.
///
/// A closed receiver means the surface was torn down; the completion is
/// discarded.
pub fn spawn_effect(
    api: Arc<dyn CalculatorApi>,
    effect: Effect,
    tx: mpsc::Sender<Msg>,
) -> Option<JoinHandle<()>> {
    if matches!(effect, Effect::Diagnose(_)) {
        return None;
    }
    Some(tokio::spawn(async move {
        if let Some(msg) = perform(api.as_ref(), effect).await {
            if tx.send(msg).await.is_err() {
                debug!("Receiver closed; dropping late completion");
            }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::MsgBus;
    use crate::error::{ApiError, Endpoint};
    use crate::state::Diagnostic;
    use crate::types::{CalculationRequest, CalculationResult, OptionKind};
    use async_trait::async_trait;

    struct Fixed;

    #[async_trait]
    impl CalculatorApi for Fixed {
        fn base_url(&self) -> &str {
            "http://fixed"
        }
        async fn materials(&self) -> Result<Vec<String>, ApiError> {
            Ok(vec!["Titanium".into()])
        }
        async fn fuels(&self) -> Result<Vec<String>, ApiError> {
            Err(ApiError::Decode {
                endpoint: Endpoint::Fuels,
                message: "expected a sequence".into(),
            })
        }
        async fn calculate(&self, req: &CalculationRequest) -> Result<CalculationResult, ApiError> {
            Ok(CalculationResult::new(req.height.len() as f64))
        }
        async fn ping(&self) -> Result<String, ApiError> {
            Ok("pong".into())
        }
    }

    fn request() -> CalculationRequest {
        CalculationRequest {
            material: "Titanium".into(),
            fuel_type: "Hydrazine".into(),
            height: "100".into(),
            diameter: "5".into(),
            fuel_fill_percentage: "100".into(),
        }
    }

    #[tokio::test]
    async fn fetch_options_maps_to_loaded() {
        let msg = perform(&Fixed, Effect::FetchOptions(OptionKind::Materials)).await;
        assert!(matches!(
            msg,
            Some(Msg::OptionsLoaded { kind: OptionKind::Materials, outcome: Ok(items) }) if items == ["Titanium"]
        ));
        let msg = perform(&Fixed, Effect::FetchOptions(OptionKind::Fuels)).await;
        assert!(matches!(
            msg,
            Some(Msg::OptionsLoaded { kind: OptionKind::Fuels, outcome: Err(ApiError::Decode { .. }) })
        ));
    }

    #[tokio::test]
    async fn calculate_carries_submission_number() {
        let msg = perform(
            &Fixed,
            Effect::Calculate {
                submission: 7,
                request: request(),
            },
        )
        .await;
        assert!(matches!(
            msg,
            Some(Msg::CalculationFinished { submission: 7, outcome: Ok(r) }) if r.delta_v == 3.0
        ));
    }

    #[tokio::test]
    async fn diagnose_is_not_spawned() {
        let bus = MsgBus::new();
        let effect = Effect::Diagnose(Diagnostic::StaleCompletionDropped { submission: 1 });
        assert!(spawn_effect(Arc::new(Fixed), effect, bus.tx.clone()).is_none());
    }

    #[tokio::test]
    async fn spawned_completion_after_teardown_is_discarded() {
        let mut bus = MsgBus::new();
        drop(bus.take_rx());
        let handle = spawn_effect(
            Arc::new(Fixed),
            Effect::FetchOptions(OptionKind::Materials),
            bus.tx.clone(),
        )
        .unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn spawned_completion_is_delivered() {
        let mut bus = MsgBus::new();
        let mut rx = bus.take_rx().unwrap();
        spawn_effect(
            Arc::new(Fixed),
            Effect::FetchOptions(OptionKind::Materials),
            bus.tx.clone(),
        );
        assert!(matches!(rx.recv().await, Some(Msg::OptionsLoaded { .. })));
    }
}
