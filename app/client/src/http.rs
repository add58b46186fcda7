use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use escapevel_core::{
    ApiError, CalculationRequest, CalculationResult, CalculatorApi, Endpoint, DEFAULT_BASE_URL,
};

/// Longest slice of a non-JSON error body kept in an `ApiError::Status`.
const MAX_ERROR_BODY: usize = 200;

/// reqwest-backed client for the calculation service.
pub struct HttpCalculatorApi {
    client: Client,
    base_url: String,
}

impl HttpCalculatorApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, ApiError> {
        debug!(%endpoint, "GET");
        let response = self
            .client
            .get(self.url(endpoint))
            .send()
            .await
            .map_err(|e| network(endpoint, e))?;
        decode(endpoint, response).await
    }
}

impl Default for HttpCalculatorApi {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct PingBody {
    message: String,
}

fn network(endpoint: Endpoint, err: reqwest::Error) -> ApiError {
    ApiError::Network {
        endpoint,
        message: err.to_string(),
    }
}

/// Check the status, then parse the body as `T`.
async fn decode<T: DeserializeOwned>(endpoint: Endpoint, response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.bytes().await.map_err(|e| network(endpoint, e))?;

    if !status.is_success() {
        let message = match serde_json::from_slice::<ErrorBody>(&body) {
            Ok(parsed) => parsed.error,
            Err(_) => String::from_utf8_lossy(&body)
                .chars()
                .take(MAX_ERROR_BODY)
                .collect(),
        };
        return Err(ApiError::Status {
            endpoint,
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_slice(&body).map_err(|e| ApiError::Decode {
        endpoint,
        message: e.to_string(),
    })
}

#[async_trait]
impl CalculatorApi for HttpCalculatorApi {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn materials(&self) -> Result<Vec<String>, ApiError> {
        self.get_json(Endpoint::Materials).await
    }

    async fn fuels(&self) -> Result<Vec<String>, ApiError> {
        self.get_json(Endpoint::Fuels).await
    }

    async fn calculate(&self, request: &CalculationRequest) -> Result<CalculationResult, ApiError> {
        let endpoint = Endpoint::Calculate;
        debug!(%endpoint, material = %request.material, fuel = %request.fuel_type, "POST");
        let response = self
            .client
            .post(self.url(endpoint))
            .json(request)
            .send()
            .await
            .map_err(|e| network(endpoint, e))?;
        decode(endpoint, response).await
    }

    async fn ping(&self) -> Result<String, ApiError> {
        let body: PingBody = self.get_json(Endpoint::Ping).await?;
        Ok(body.message)
    }
}
