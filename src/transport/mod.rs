//! HTTP transport layer for COS requests.
//!
//! Services hand a signed [`HttpRequest`] to an [`HttpTransport`] and get an
//! [`HttpResponse`] back, whatever its status. Deciding what a 404 or 409
//! means is left to the caller.

use crate::config::CosConfig;
use crate::error::{CosError, NetworkError};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::time::Duration;
use tracing::trace;

/// A signed request ready to go on the wire.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Upper-case HTTP method.
    pub method: String,
    /// Absolute URL, path and query already encoded.
    pub url: String,
    /// Request headers, signature included.
    pub headers: HashMap<String, String>,
    /// Request body, if any.
    pub body: Option<Bytes>,
}

impl HttpRequest {
    /// Bodiless request without headers.
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Attach a body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Add headers, replacing any with the same name.
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Header lookup, ignoring case.
    pub fn get_header(&self, name: &str) -> Option<&str> {
        lookup(&self.headers, name)
    }
}

/// A service answer. Header names keep the case the server sent.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers, repeated ones joined with `, `.
    pub headers: HashMap<String, String>,
    /// Response body; empty for HEAD.
    pub body: Bytes,
}

impl HttpResponse {
    /// Any 2xx, including the 202 of an accepted restore and the 204 of a
    /// delete.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Header lookup, ignoring case.
    pub fn get_header(&self, name: &str) -> Option<&str> {
        lookup(&self.headers, name)
    }

    /// `x-cos-request-id`, quoted in every error report.
    pub fn request_id(&self) -> Option<&str> {
        self.get_header("x-cos-request-id")
    }

    /// `x-cos-version-id`; only versioned buckets send it.
    pub fn version_id(&self) -> Option<&str> {
        self.get_header("x-cos-version-id")
    }

    /// `content-length`, if present and numeric.
    pub fn content_length(&self) -> Option<u64> {
        self.get_header("content-length")
            .and_then(|v| v.trim().parse().ok())
    }

    /// `content-type`.
    pub fn content_type(&self) -> Option<&str> {
        self.get_header("content-type")
    }

    /// The ETag as sent, surrounding quotes included.
    pub fn etag(&self) -> Option<&str> {
        self.get_header("etag")
    }
}

fn lookup<'a>(headers: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Sends requests to COS.
///
/// Non-2xx answers are returned as responses, not errors; only failures to
/// obtain an answer at all are errors.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send one request and return whatever the service answered.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, CosError>;
}

/// reqwest-backed transport configured from a [`CosConfig`].
pub struct ReqwestTransport {
    client: reqwest::Client,
    read_timeout: Duration,
}

impl ReqwestTransport {
    /// Build a transport honoring the timeouts, pool size and TLS
    /// verification of `config`.
    pub fn from_config(config: &CosConfig) -> Result<Self, CosError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.read_timeout)
            .pool_max_idle_per_host(config.max_connections as usize)
            .danger_accept_invalid_certs(!config.verify_ssl)
            .user_agent(concat!("tencent-cos-integration/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                CosError::Network(NetworkError::TlsError {
                    message: e.to_string(),
                })
            })?;

        Ok(Self {
            client,
            read_timeout: config.read_timeout,
        })
    }

    fn network_error(&self, error: reqwest::Error) -> CosError {
        if error.is_timeout() {
            CosError::Network(NetworkError::Timeout {
                duration: self.read_timeout,
            })
        } else if error.is_body() || error.is_decode() {
            CosError::Network(NetworkError::ConnectionFailed {
                message: format!("response body interrupted: {}", error),
            })
        } else {
            CosError::Network(NetworkError::ConnectionFailed {
                message: error.to_string(),
            })
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, CosError> {
        let method = reqwest::Method::from_bytes(request.method.as_bytes()).map_err(|_| {
            CosError::Network(NetworkError::ConnectionFailed {
                message: format!("unsupported HTTP method {}", request.method),
            })
        })?;
        let is_head = method == reqwest::Method::HEAD;

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        trace!(method = %request.method, url = %request.url, "Sending");
        let response = builder.send().await.map_err(|e| self.network_error(e))?;

        let status = response.status().as_u16();
        let headers = fold_headers(response.headers());
        let body = if is_head {
            Bytes::new()
        } else {
            response.bytes().await.map_err(|e| self.network_error(e))?
        };

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Collapse repeated headers into one comma-separated value and drop values
/// that are not visible ASCII.
fn fold_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, String> {
    let mut folded: HashMap<String, String> = HashMap::new();
    for (name, value) in headers {
        let Ok(value) = value.to_str() else {
            continue;
        };
        folded
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }
    folded
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("read_timeout", &self.read_timeout)
            .finish_non_exhaustive()
    }
}
