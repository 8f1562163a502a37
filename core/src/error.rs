//! Error types for the Moota client.
//!
//! # Design
//! Non-2xx responses become either `Api` (generic) or an endpoint-specific
//! variant such as `Mutation`, chosen by the endpoint catalog. Both carry the
//! same `ApiFailure` payload so callers can match on the variant to tell them
//! apart and still inspect status and body uniformly. Transport and decoding
//! problems keep their message as a `String` so the whole enum stays `Clone`
//! and comparable in tests.

use serde_json::Value;
use thiserror::Error;

/// Message used when a failed response carries no usable `message` field.
pub const DEFAULT_ERROR_MESSAGE: &str = "unknown error";

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MootaError>;

/// The details of a non-2xx API response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiFailure {
    /// The body's `message` field, or [`DEFAULT_ERROR_MESSAGE`].
    pub message: String,
    pub status_code: u16,
    /// The full decoded body (`null` if it was empty or not JSON).
    pub body: Value,
}

impl ApiFailure {
    pub fn from_body(status_code: u16, body: Value) -> Self {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_ERROR_MESSAGE)
            .to_string();
        Self {
            message,
            status_code,
            body,
        }
    }
}

/// Errors returned by `MootaClient` operations and the dispatcher.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MootaError {
    /// Non-2xx response on an endpoint with no dedicated error type.
    #[error("moota api error (HTTP {}): {}", .0.status_code, .0.message)]
    Api(ApiFailure),

    /// Non-2xx response on a mutation endpoint.
    #[error("mutation request failed (HTTP {}): {}", .0.status_code, .0.message)]
    Mutation(ApiFailure),

    /// The transport could not complete the round-trip.
    #[error("transport error: {0}")]
    Transport(String),

    /// A successful response body was not valid JSON, or did not have the
    /// shape an accessor expected.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The request payload could not be serialized to JSON.
    #[error("request serialization failed: {0}")]
    Serialization(String),

    /// Client configuration is missing or invalid.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The catalog mapped an endpoint to a response type the operation does
    /// not return.
    #[error("unexpected response type for {path}: {found}")]
    UnexpectedResponse { path: String, found: &'static str },
}

impl MootaError {
    /// The failure payload, for both generic and endpoint-specific API errors.
    pub fn failure(&self) -> Option<&ApiFailure> {
        match self {
            MootaError::Api(failure) | MootaError::Mutation(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        self.failure().map(|f| f.status_code)
    }

    /// True if the server answered with a non-2xx status.
    pub fn is_api_error(&self) -> bool {
        self.failure().is_some()
    }
}
