use async_trait::async_trait;

use crate::error::ApiError;
use crate::types::{CalculationRequest, CalculationResult, OptionKind};

/// Where the calculation service is hosted unless configured otherwise.
pub const DEFAULT_BASE_URL: &str = "https://escape-velocity-api.onrender.com";

/// The remote calculation service, as seen by the form client.
///
/// Implementations validate payloads at the boundary: anything that is not
/// the expected shape comes back as `ApiError::Decode`.
#[async_trait]
pub trait CalculatorApi: Send + Sync {
    /// Base URL requests are issued against.
    fn base_url(&self) -> &str;

    async fn materials(&self) -> Result<Vec<String>, ApiError>;

    async fn fuels(&self) -> Result<Vec<String>, ApiError>;

    async fn calculate(&self, request: &CalculationRequest) -> Result<CalculationResult, ApiError>;

    /// Liveness probe. Returns the service's reply message.
    async fn ping(&self) -> Result<String, ApiError>;

    async fn options(&self, kind: OptionKind) -> Result<Vec<String>, ApiError> {
        match kind {
            OptionKind::Materials => self.materials().await,
            OptionKind::Fuels => self.fuels().await,
        }
    }
}
