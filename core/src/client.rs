//! The Moota API client.
//!
//! # Design
//! `MootaClient` owns its `Config`, the endpoint catalog and a transport, and
//! carries no mutable state between calls. Every operation is split the same
//! way: a `build_*` method produces an `HttpRequest` without I/O, then
//! [`MootaClient::execute`] sends it and runs the dispatcher on the result.
//! The operations themselves live on short-lived handles returned by
//! [`MootaClient::topup`], [`MootaClient::mutation`],
//! [`MootaClient::bank_account`] and [`MootaClient::tagging`].

use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::catalog::EndpointCatalog;
use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::domain::{BankAccounts, Mutations, Tagging, Topups};
use crate::error::{MootaError, Result};
use crate::http::{FormPart, HttpBody, HttpMethod, HttpRequest, HttpResponse};
use crate::response::ApiResponse;
use crate::transport::{Transport, UreqTransport};

#[derive(Debug, Clone)]
pub struct MootaClient<T = UreqTransport> {
    config: Config,
    catalog: EndpointCatalog,
    transport: T,
}

impl MootaClient<UreqTransport> {
    /// A client using the blocking ureq transport and the standard catalog.
    pub fn new(config: Config) -> Self {
        Self::with_transport(config, UreqTransport::default())
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(Config::from_env()?))
    }
}

impl<T: Transport> MootaClient<T> {
    pub fn with_transport(config: Config, transport: T) -> Self {
        Self {
            config,
            catalog: EndpointCatalog::standard(),
            transport,
        }
    }

    /// Replace the endpoint catalog used for dispatch.
    pub fn with_catalog(mut self, catalog: EndpointCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &EndpointCatalog {
        &self.catalog
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn topup(&self) -> Topups<'_, T> {
        Topups::new(self)
    }

    pub fn mutation(&self) -> Mutations<'_, T> {
        Mutations::new(self)
    }

    pub fn bank_account(&self) -> BankAccounts<'_, T> {
        BankAccounts::new(self)
    }

    pub fn tagging(&self) -> Tagging<'_, T> {
        Tagging::new(self)
    }

    /// Absolute URL for an already-resolved endpoint path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url(), path)
    }

    fn default_headers(&self) -> Vec<(String, String)> {
        vec![
            ("User-Agent".to_string(), self.config.user_agent().to_string()),
            ("Accept".to_string(), "application/json".to_string()),
            (
                "Authorization".to_string(),
                format!("Bearer {}", self.config.access_token()),
            ),
        ]
    }

    pub fn build_get(&self, path: &str, query: Vec<(String, String)>) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.url(path),
            headers: self.default_headers(),
            query,
            body: HttpBody::Empty,
        }
    }

    /// A POST with no body.
    pub fn build_post(&self, path: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url: self.url(path),
            headers: self.default_headers(),
            query: Vec::new(),
            body: HttpBody::Empty,
        }
    }

    pub fn build_json<B: Serialize>(&self, path: &str, payload: &B) -> Result<HttpRequest> {
        let body = serde_json::to_string(payload).map_err(|e| MootaError::Serialization(e.to_string()))?;
        let mut headers = self.default_headers();
        headers.push(("Content-Type".to_string(), "application/json".to_string()));
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.url(path),
            headers,
            query: Vec::new(),
            body: HttpBody::Json(body),
        })
    }

    pub fn build_multipart(&self, path: &str, parts: Vec<FormPart>) -> HttpRequest {
        let boundary = format!("moota-{}", Uuid::new_v4().simple());
        let mut headers = self.default_headers();
        headers.push((
            "Content-Type".to_string(),
            format!("multipart/form-data; boundary={boundary}"),
        ));
        HttpRequest {
            method: HttpMethod::Post,
            url: self.url(path),
            headers,
            query: Vec::new(),
            body: HttpBody::Multipart { boundary, parts },
        }
    }

    /// Run the dispatcher on a response to a request for `request_url`.
    pub fn dispatch(&self, response: &HttpResponse, request_url: &str) -> Result<ApiResponse> {
        Dispatcher::new(&self.catalog)
            .with_base_url(self.config.base_url())
            .dispatch(response, request_url)
    }

    /// Send `request` and dispatch the response. Exactly one request is made.
    pub fn execute(&self, request: HttpRequest) -> Result<ApiResponse> {
        debug!(method = request.method.as_str(), url = %request.url, "moota request");
        let response = self.transport.send(&request)?;
        self.dispatch(&response, &request.url)
    }
}
