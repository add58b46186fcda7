//! Calculator API implementations.
//!
//! - [`HttpCalculatorApi`]: talks to the remote service over HTTP.
//! - [`MockCalculatorApi`]: canned responses plus call recording, for tests.

pub mod http;
pub mod mock;

pub use escapevel_core::DEFAULT_BASE_URL;
pub use http::HttpCalculatorApi;
pub use mock::MockCalculatorApi;
