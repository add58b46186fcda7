use std::fmt;

use thiserror::Error;

/// Remote endpoints exposed by the calculation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Materials,
    Fuels,
    Calculate,
    Ping,
}

impl Endpoint {
    /// Path relative to the service base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Materials => "/materials",
            Self::Fuels => "/fuels",
            Self::Calculate => "/calculate",
            Self::Ping => "/ping",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Failure talking to the calculation service.
///
/// Every failure mode of a round-trip collapses into one of three kinds so
/// the reducer can treat them uniformly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("request to {endpoint} failed: {message}")]
    Network { endpoint: Endpoint, message: String },

    #[error("{endpoint} returned HTTP {status}: {message}")]
    Status {
        endpoint: Endpoint,
        status: u16,
        message: String,
    },

    #[error("malformed response from {endpoint}: {message}")]
    Decode { endpoint: Endpoint, message: String },
}

impl ApiError {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::Network { endpoint, .. }
            | Self::Status { endpoint, .. }
            | Self::Decode { endpoint, .. } => *endpoint,
        }
    }

    /// Short machine-friendly label used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network { .. } => "network",
            Self::Status { .. } => "status",
            Self::Decode { .. } => "decode",
        }
    }
}
