//! Translate a raw HTTP response into a typed response or a typed error.
//!
//! # Design
//! The dispatcher keys everything on the path of the request URL. For a
//! non-2xx status it looks the path up in the catalog's error table and falls
//! back to [`MootaError::Api`]; for a 2xx status it looks the path up in the
//! response table and falls back to returning the decoded JSON untouched.
//! Every call decodes the body exactly once and yields exactly one of a
//! response or an error.
//!
//! Lookups compare the path with the registered key verbatim. A URL whose
//! `{placeholder}` was already replaced by a real id does not match its
//! template, so such calls get the passthrough response or the generic error.

use serde_json::Value;
use tracing::{debug, warn};
use url::{ParseError, Url};

use crate::catalog::EndpointCatalog;
use crate::error::{ApiFailure, MootaError, Result};
use crate::http::HttpResponse;
use crate::response::ApiResponse;

/// Base that bare paths are joined against before parsing.
const RELATIVE_BASE: &str = "http://localhost/";

/// The percent-decoded path of `url`, without scheme, authority, query or
/// fragment.
///
/// A bare path (`/v2/mutation?page=1`) is accepted and only loses its query.
/// An unparseable URL yields an empty path, which matches no catalog entry.
pub fn url_path(url: &str) -> String {
    let parsed = match Url::parse(url) {
        Err(ParseError::RelativeUrlWithoutBase) => Url::parse(RELATIVE_BASE).and_then(|base| base.join(url)),
        other => other,
    };
    let Ok(parsed) = parsed else {
        return String::new();
    };
    match urlencoding::decode(parsed.path()) {
        Ok(path) => path.into_owned(),
        Err(_) => parsed.path().to_string(),
    }
}

/// Decode a response body. Empty bodies decode to `null`.
fn decode_body(body: &str) -> std::result::Result<Value, serde_json::Error> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body)
}

#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'a> {
    catalog: &'a EndpointCatalog,
    base_url: &'a str,
}

impl<'a> Dispatcher<'a> {
    pub fn new(catalog: &'a EndpointCatalog) -> Self {
        Self { catalog, base_url: "" }
    }

    /// Match URLs under `base_url` by the part that follows it, so catalog
    /// keys stay relative to the API root even when the base URL has a path.
    pub fn with_base_url(mut self, base_url: &'a str) -> Self {
        self.base_url = base_url.trim_end_matches('/');
        self
    }

    /// The catalog key `url` is looked up under.
    pub fn endpoint_path(&self, url: &str) -> String {
        if !self.base_url.is_empty() {
            if let Some(rest) = url.strip_prefix(self.base_url) {
                if rest.is_empty() || rest.starts_with(['/', '?', '#']) {
                    return url_path(rest);
                }
            }
        }
        url_path(url)
    }

    pub fn dispatch(&self, response: &HttpResponse, request_url: &str) -> Result<ApiResponse> {
        let path = self.endpoint_path(request_url);

        if !response.is_success() {
            // A failed response keeps its status even if the body is not JSON.
            let body = decode_body(&response.body).unwrap_or(Value::Null);
            let failure = ApiFailure::from_body(response.status, body);
            let err = match self.catalog.error_kind(&path) {
                Some(kind) => kind.construct(failure),
                None => MootaError::Api(failure),
            };
            warn!(%path, status = response.status, error = %err, "moota request failed");
            return Err(err);
        }

        let body = decode_body(&response.body).map_err(|e| MootaError::Decode(e.to_string()))?;
        match self.catalog.response_kind(&path) {
            Some(kind) => {
                debug!(%path, status = response.status, kind = ?kind, "typed response");
                Ok(kind.construct(body))
            }
            None => {
                debug!(%path, status = response.status, "untyped response");
                Ok(ApiResponse::Json(body))
            }
        }
    }
}

/// Dispatch against `catalog` with no base URL.
pub fn dispatch(catalog: &EndpointCatalog, response: &HttpResponse, request_url: &str) -> Result<ApiResponse> {
    Dispatcher::new(catalog).dispatch(response, request_url)
}
