//! The I/O boundary: executing an `HttpRequest` against the network.
//!
//! # Design
//! `MootaClient` only talks to the network through [`Transport`], so tests can
//! script responses and applications can bring their own HTTP stack.
//! [`UreqTransport`] is the blocking default. It disables ureq's
//! status-as-error behaviour so 4xx/5xx responses come back as data and the
//! dispatcher decides what they mean.

use std::time::Duration;

use tracing::{debug, instrument};

use crate::error::{MootaError, Result};
use crate::http::{HttpBody, HttpMethod, HttpRequest, HttpResponse};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Executes one HTTP round-trip. Any status code is a successful round-trip;
/// only failures to talk to the server are errors.
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        (**self).send(request)
    }
}

/// Blocking transport backed by a `ureq` agent.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl UreqTransport {
    /// `timeout` bounds the whole round-trip.
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    #[instrument(skip_all, fields(method = request.method.as_str(), url = %request.url))]
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let transport_err = |e: ureq::Error| MootaError::Transport(e.to_string());

        let mut response = match request.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(&request.url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                for (key, value) in &request.query {
                    builder = builder.query(key, value);
                }
                builder.call().map_err(transport_err)?
            }
            HttpMethod::Post => {
                let mut builder = self.agent.post(&request.url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                for (key, value) in &request.query {
                    builder = builder.query(key, value);
                }
                match &request.body {
                    HttpBody::Empty => builder.send_empty(),
                    body => builder.send(&body.to_bytes()[..]),
                }
                .map_err(transport_err)?
            }
        };

        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().map_err(transport_err)?;
        debug!(status, "moota response received");

        Ok(HttpResponse { status, body })
    }
}
