//! HTTP transport types.
//!
//! # Design
//! Requests and responses are plain data. Domain operations build an
//! `HttpRequest`, a [`Transport`](crate::transport::Transport) executes it and
//! hands back an `HttpResponse`, and the dispatcher interprets the response.
//! Keeping these as owned values lets tests substitute a scripted transport
//! without touching the network.

/// HTTP method for a request. The Moota API only uses GET and POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// One labeled part of a `multipart/form-data` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub contents: Vec<u8>,
    pub filename: Option<String>,
}

impl FormPart {
    pub fn text(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into().into_bytes(),
            filename: None,
        }
    }

    pub fn file(name: impl Into<String>, filename: impl Into<String>, contents: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            contents,
            filename: Some(filename.into()),
        }
    }
}

/// Request body variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpBody {
    Empty,
    /// A serialized JSON document.
    Json(String),
    /// Form parts, encoded with `boundary` when sent.
    Multipart { boundary: String, parts: Vec<FormPart> },
}

impl HttpBody {
    /// Encode the body into wire bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            HttpBody::Empty => Vec::new(),
            HttpBody::Json(body) => body.as_bytes().to_vec(),
            HttpBody::Multipart { boundary, parts } => encode_multipart(boundary, parts),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, HttpBody::Empty)
    }
}

/// Escape a quoted `Content-Disposition` parameter the way HTML form
/// submission does, so a value can never close the quote or start a new
/// header line.
fn escape_param(value: &str) -> String {
    value.replace('"', "%22").replace('\r', "%0D").replace('\n', "%0A")
}

fn encode_multipart(boundary: &str, parts: &[FormPart]) -> Vec<u8> {
    let mut out = Vec::new();
    for part in parts {
        out.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        match &part.filename {
            Some(filename) => out.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n",
                    escape_param(&part.name),
                    escape_param(filename)
                )
                .as_bytes(),
            ),
            None => out.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                    escape_param(&part.name)
                )
                .as_bytes(),
            ),
        }
        out.extend_from_slice(&part.contents);
        out.extend_from_slice(b"\r\n");
    }
    out.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    out
}

/// An HTTP request described as plain data.
///
/// `url` is fully resolved (base URL plus endpoint with placeholders
/// substituted); `query` is appended by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: HttpBody,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True iff the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
