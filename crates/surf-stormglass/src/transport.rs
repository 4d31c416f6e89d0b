//! reqwest-backed [`HttpTransport`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use surf_core::{ForecastError, HttpRequest, HttpResponse, HttpTransport, Result, TransportError};
use tracing::debug;

use crate::PROVIDER_NAME;

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Production transport built on a pooled [`reqwest::Client`].
///
/// Non-2xx responses, connection failures and timeouts are reported as
/// [`TransportError::Request`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with the default 30 second timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a transport with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ForecastError::pre_request(PROVIDER_NAME, e.to_string()))?;
        Ok(Self { client })
    }

    /// Create a transport from an existing client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, request: &HttpRequest) -> std::result::Result<HttpResponse, TransportError> {
        let mut builder = self.client.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(classify)?;
        let status = response.status();

        if !status.is_success() {
            debug!(status = status.as_u16(), "Request failed");
            // The status is authoritative even when the error body cannot be read.
            return Err(TransportError::Request {
                status: Some(status.as_u16()),
                body: response.text().await.ok(),
            });
        }

        let body = response.text().await.map_err(classify)?;
        Ok(HttpResponse::new(status.as_u16(), body))
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_builder() {
        return TransportError::Local(err.to_string());
    }
    TransportError::Request {
        status: err.status().map(|s| s.as_u16()),
        body: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_invalid_url_is_local_failure() {
        let transport = ReqwestTransport::new().unwrap();
        let err = transport
            .get(&HttpRequest::get("not a url"))
            .await
            .unwrap_err();
        assert!(!err.is_request_error());
    }

    /// Serve one canned HTTP response on a local port, then close.
    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{addr}/point")
    }

    #[tokio::test]
    async fn test_error_status_carries_body() {
        let url = serve_once(
            "HTTP/1.1 429 Too Many Requests\r\nContent-Length: 22\r\nConnection: close\r\n\r\n{\"errors\":{\"key\":\"q\"}}",
        )
        .await;
        let err = ReqwestTransport::with_timeout(Duration::from_secs(5))
            .unwrap()
            .get(&HttpRequest::get(url))
            .await
            .unwrap_err();

        assert_eq!(
            err.response_data(),
            Some((Some(429), Some(r#"{"errors":{"key":"q"}}"#)))
        );
    }

    #[tokio::test]
    async fn test_error_status_survives_truncated_body() {
        let url = serve_once(
            "HTTP/1.1 429 Too Many Requests\r\nContent-Length: 100\r\nConnection: close\r\n\r\n{\"errors\"",
        )
        .await;
        let err = ReqwestTransport::with_timeout(Duration::from_secs(5))
            .unwrap()
            .get(&HttpRequest::get(url))
            .await
            .unwrap_err();

        assert!(err.is_request_error());
        assert_eq!(err.response_data(), Some((Some(429), None)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_request_failure() {
        let transport = ReqwestTransport::with_timeout(Duration::from_secs(2)).unwrap();
        let err = transport
            .get(&HttpRequest::get("http://127.0.0.1:1/point"))
            .await
            .unwrap_err();
        assert!(err.is_request_error());
        assert_eq!(err.response_data(), Some((None, None)));
    }
}
