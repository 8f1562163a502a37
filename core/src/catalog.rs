//! The endpoint catalog: which typed response or error an endpoint produces.
//!
//! # Design
//! Two maps keyed by the endpoint path exactly as registered. Lookups are
//! plain string equality, so a template such as
//! `/v2/mutation/{mutation_id}/note` only matches when the dispatcher is given
//! the template itself, never the path with a real id substituted. The maps
//! are read-only once built, so one catalog can be shared between threads.

use std::collections::HashMap;

use serde_json::Value;

use crate::endpoint;
use crate::error::{ApiFailure, MootaError};
use crate::response::{ApiResponse, BankAccountResponse, MutationResponse, TaggingResponse, TopupResponse};

/// Typed response shapes an endpoint can be registered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseKind {
    Mutation,
    BankAccount,
    Tagging,
    Topup,
}

impl ResponseKind {
    /// Wrap a decoded success body in this kind's response type.
    pub fn construct(self, body: Value) -> ApiResponse {
        match self {
            ResponseKind::Mutation => ApiResponse::Mutation(MutationResponse::new(body)),
            ResponseKind::BankAccount => ApiResponse::BankAccount(BankAccountResponse::new(body)),
            ResponseKind::Tagging => ApiResponse::Tagging(TaggingResponse::new(body)),
            ResponseKind::Topup => ApiResponse::Topup(TopupResponse::new(body)),
        }
    }
}

/// Endpoint-specific error types. Endpoints without an entry fail with
/// [`MootaError::Api`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Mutation,
}

impl ErrorKind {
    pub fn construct(self, failure: ApiFailure) -> MootaError {
        match self {
            ErrorKind::Mutation => MootaError::Mutation(failure),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EndpointCatalog {
    responses: HashMap<String, ResponseKind>,
    errors: HashMap<String, ErrorKind>,
}

impl EndpointCatalog {
    /// An empty catalog: every success passes through as raw JSON and every
    /// failure is a generic API error.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The registrations of the Moota v2 API.
    pub fn standard() -> Self {
        Self::empty()
            .with_response(endpoint::MUTATION_INDEX, ResponseKind::Mutation)
            .with_response(endpoint::MUTATION_STORE, ResponseKind::Mutation)
            .with_response(endpoint::BANK_INDEX, ResponseKind::BankAccount)
            .with_response(endpoint::BANK_STORE, ResponseKind::BankAccount)
            .with_response(endpoint::BANK_UPDATE, ResponseKind::BankAccount)
            .with_response(endpoint::TAGGING_STORE, ResponseKind::Tagging)
            .with_response(endpoint::TOPUP_INDEX, ResponseKind::Topup)
            .with_error(endpoint::MUTATION_INDEX, ErrorKind::Mutation)
            .with_error(endpoint::MUTATION_STORE, ErrorKind::Mutation)
            .with_error(endpoint::MUTATION_DESTROY, ErrorKind::Mutation)
    }

    pub fn with_response(mut self, path: impl Into<String>, kind: ResponseKind) -> Self {
        self.responses.insert(path.into(), kind);
        self
    }

    pub fn with_error(mut self, path: impl Into<String>, kind: ErrorKind) -> Self {
        self.errors.insert(path.into(), kind);
        self
    }

    pub fn response_kind(&self, path: &str) -> Option<ResponseKind> {
        self.responses.get(path).copied()
    }

    pub fn error_kind(&self, path: &str) -> Option<ErrorKind> {
        self.errors.get(path).copied()
    }
}
