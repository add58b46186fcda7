use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use escapevel_core::{ApiError, CalculationRequest, CalculationResult, CalculatorApi};

/// A calculator that returns canned responses and records submissions.
pub struct MockCalculatorApi {
    materials: Result<Vec<String>, ApiError>,
    fuels: Result<Vec<String>, ApiError>,
    calculation: Result<CalculationResult, ApiError>,
    gate: Option<Arc<Notify>>,
    materials_gate: Option<Arc<Notify>>,
    calls: Mutex<Vec<CalculationRequest>>,
}

impl MockCalculatorApi {
    pub fn new() -> Self {
        Self {
            materials: Ok(Vec::new()),
            fuels: Ok(Vec::new()),
            calculation: Ok(CalculationResult::new(0.0)),
            gate: None,
            materials_gate: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_materials(mut self, materials: Result<Vec<String>, ApiError>) -> Self {
        self.materials = materials;
        self
    }

    pub fn with_fuels(mut self, fuels: Result<Vec<String>, ApiError>) -> Self {
        self.fuels = fuels;
        self
    }

    pub fn with_delta_v(mut self, delta_v: f64) -> Self {
        self.calculation = Ok(CalculationResult::new(delta_v));
        self
    }

    pub fn with_calculation(mut self, calculation: Result<CalculationResult, ApiError>) -> Self {
        self.calculation = calculation;
        self
    }

    /// Hold every `calculate` call until the gate is notified.
    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Hold every `materials` call until the gate is notified.
    pub fn with_materials_gate(mut self, gate: Arc<Notify>) -> Self {
        self.materials_gate = Some(gate);
        self
    }

    /// Requests received by `calculate`, in order.
    pub fn calculations(&self) -> Vec<CalculationRequest> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl Default for MockCalculatorApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CalculatorApi for MockCalculatorApi {
    fn base_url(&self) -> &str {
        "mock://calculator"
    }

    async fn materials(&self) -> Result<Vec<String>, ApiError> {
        if let Some(gate) = &self.materials_gate {
            gate.notified().await;
        }
        self.materials.clone()
    }

    async fn fuels(&self) -> Result<Vec<String>, ApiError> {
        self.fuels.clone()
    }

    async fn calculate(&self, request: &CalculationRequest) -> Result<CalculationResult, ApiError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(request.clone());
        }
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.calculation.clone()
    }

    async fn ping(&self) -> Result<String, ApiError> {
        Ok("pong".to_string())
    }
}
