//! A scripted [`Transport`] for exercising `MootaClient` without a network.
//!
//! Responses are returned in the order they were pushed; every request is
//! recorded for later inspection.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use crate::error::{MootaError, Result};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<HttpResponse>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ScriptedTransport {
    pub fn push(&self, status: u16, body: &str) {
        self.push_response(HttpResponse::new(status, body));
    }

    pub fn push_response(&self, response: HttpResponse) {
        lock(&self.responses).push_back(Ok(response));
    }

    pub fn push_error(&self, message: &str) {
        lock(&self.responses).push_back(Err(MootaError::Transport(message.to_string())));
    }

    /// Every request sent so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        lock(&self.requests).last().cloned()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        lock(&self.requests).push(request.clone());
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| Err(MootaError::Transport("no scripted response left".to_string())))
    }
}
