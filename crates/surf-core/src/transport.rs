//! HTTP transport contract.
//!
//! Providers never talk to a concrete network stack. They hand an
//! [`HttpRequest`] to an [`HttpTransport`] and match on the [`TransportError`]
//! it returns, so the transport can be swapped out in tests or wrapped with
//! its own retry and timeout policy.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Header names whose values are redacted from `Debug` output.
const SENSITIVE_HEADERS: &[&str] = &["authorization"];

/// A fully built GET request.
#[derive(Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Absolute URL including the encoded query string.
    pub url: String,
    /// Request headers, in insertion order.
    pub headers: Vec<(String, String)>,
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(name, value)| {
                if SENSITIVE_HEADERS.contains(&name.to_ascii_lowercase().as_str()) {
                    (name.as_str(), "[REDACTED]")
                } else {
                    (name.as_str(), value.as_str())
                }
            })
            .collect();
        f.debug_struct("HttpRequest")
            .field("url", &self.url)
            .field("headers", &headers)
            .finish()
    }
}

impl HttpRequest {
    /// Creates a GET request for `url` with no headers.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
        }
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Returns the first value of the header `name` (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A successful (2xx) response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    /// Creates a response.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Failure reported by an [`HttpTransport`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request itself failed: the server answered with a non-2xx
    /// status, or the connection failed or timed out.
    #[error("request failed with status {status:?}")]
    Request {
        /// HTTP status, when the server answered.
        status: Option<u16>,
        /// Response body, when one was received.
        body: Option<String>,
    },

    /// The transport failed outside the request channel (client setup,
    /// invalid request, local I/O).
    #[error("transport failure: {0}")]
    Local(String),
}

impl TransportError {
    /// Creates a request-level error for a non-2xx response.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        Self::Request {
            status: Some(status),
            body: Some(body.into()),
        }
    }

    /// Returns true if this is a request-level error.
    #[must_use]
    pub const fn is_request_error(&self) -> bool {
        matches!(self, Self::Request { .. })
    }

    /// Returns the HTTP status and body of a request-level error.
    #[must_use]
    pub fn response_data(&self) -> Option<(Option<u16>, Option<&str>)> {
        match self {
            Self::Request { status, body } => Some((*status, body.as_deref())),
            Self::Local(_) => None,
        }
    }
}

/// Performs GET requests on behalf of a provider.
#[async_trait]
pub trait HttpTransport: Send + Sync + fmt::Debug {
    /// Performs `request` and returns the response body, or a classified error.
    ///
    /// Implementations own timeouts and connection pooling.
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}
