//! Configuration types for the COS client.
//!
//! A client is bound to one bucket, addressed by its virtual-hosted URL
//! (`http://<bucket>-<appid>.cos.<region>.myqcloud.com`). Service-level calls
//! (listing buckets) go to a separate service endpoint.

use crate::credentials::{CredentialsProvider, EnvCredentialsProvider};
use crate::error::{ConfigurationError, CosError};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Default endpoint for service-level operations.
pub const DEFAULT_SERVICE_URL: &str = "https://service.cos.myqcloud.com";

/// Characters left as-is when an object key becomes a URL path.
const KEY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// Configuration for the COS client.
#[derive(Clone)]
pub struct CosConfig {
    /// URL of the bound bucket.
    pub bucket_url: Url,

    /// Endpoint for `GET Service`.
    pub service_url: Url,

    /// Region (e.g. "ap-guangzhou"), derived from the bucket host if not set.
    pub region: Option<String>,

    /// Credentials provider.
    pub credentials_provider: Arc<dyn CredentialsProvider>,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Read timeout for a single request.
    pub read_timeout: Duration,

    /// Maximum idle connections kept per host.
    pub max_connections: u32,

    /// Verify SSL certificates.
    pub verify_ssl: bool,

    /// How long a request signature stays valid.
    pub sign_validity: Duration,
}

impl std::fmt::Debug for CosConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CosConfig")
            .field("bucket_url", &self.bucket_url.as_str())
            .field("service_url", &self.service_url.as_str())
            .field("region", &self.region)
            .field("credentials_provider", &self.credentials_provider.name())
            .field("connect_timeout", &self.connect_timeout)
            .field("read_timeout", &self.read_timeout)
            .field("max_connections", &self.max_connections)
            .field("verify_ssl", &self.verify_ssl)
            .field("sign_validity", &self.sign_validity)
            .finish()
    }
}

impl CosConfig {
    /// Create a new configuration builder.
    pub fn builder() -> CosConfigBuilder {
        CosConfigBuilder::default()
    }

    /// Host of the bound bucket, with port when one is set.
    pub fn bucket_host(&self) -> String {
        let host = self.bucket_url.host_str().unwrap_or_default();
        match self.bucket_url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        }
    }

    /// Region of the bound bucket.
    pub fn region(&self) -> Option<String> {
        self.region
            .clone()
            .or_else(|| self.bucket_url.host_str().and_then(region_from_host))
    }

    /// URL of an object in the bound bucket.
    pub fn object_url(&self, key: &str) -> Result<Url, CosError> {
        let mut url = self.bucket_url.clone();
        url.set_path(&format!("/{}", encode_key(key)));
        url.set_query(None);
        Ok(url)
    }

    /// Same configuration, bound to another bucket.
    pub fn for_bucket(&self, bucket_url: &str) -> Result<CosConfig, CosError> {
        let mut config = self.clone();
        config.bucket_url = parse_endpoint(bucket_url)?;
        config.region = None;
        Ok(config)
    }
}

/// Percent-encode an object key for use as a URL path, keeping `/`.
pub fn encode_key(key: &str) -> String {
    utf8_percent_encode(key, KEY_ENCODE_SET).to_string()
}

/// Region from a `<label>.cos.<region>.myqcloud.com` host.
pub fn region_from_host(host: &str) -> Option<String> {
    let mut parts = host.split('.');
    parts.next()?;
    if parts.next()? != "cos" {
        return None;
    }
    parts.next().map(String::from)
}

fn parse_endpoint(value: &str) -> Result<Url, CosError> {
    let url = Url::parse(value).map_err(|e| {
        CosError::Configuration(ConfigurationError::InvalidEndpoint {
            url: value.to_string(),
            details: e.to_string(),
        })
    })?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(CosError::Configuration(ConfigurationError::InvalidEndpoint {
            url: value.to_string(),
            details: "expected an http(s) URL with a host".to_string(),
        }));
    }

    Ok(url)
}

/// Builder for COS configuration.
#[derive(Default)]
pub struct CosConfigBuilder {
    bucket_url: Option<String>,
    service_url: Option<String>,
    region: Option<String>,
    credentials_provider: Option<Arc<dyn CredentialsProvider>>,
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
    max_connections: Option<u32>,
    verify_ssl: Option<bool>,
    sign_validity: Option<Duration>,
}

impl CosConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bucket URL.
    pub fn bucket_url(mut self, url: impl Into<String>) -> Self {
        self.bucket_url = Some(url.into());
        self
    }

    /// Set the service endpoint.
    pub fn service_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = Some(url.into());
        self
    }

    /// Set the region explicitly.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set the credentials provider.
    pub fn credentials_provider(mut self, provider: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials_provider = Some(provider);
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the read timeout.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    pub fn max_connections(mut self, connections: u32) -> Self {
        self.max_connections = Some(connections);
        self
    }

    /// Enable or disable SSL verification.
    pub fn verify_ssl(mut self, verify: bool) -> Self {
        self.verify_ssl = Some(verify);
        self
    }

    /// Set the signature validity window.
    pub fn sign_validity(mut self, validity: Duration) -> Self {
        self.sign_validity = Some(validity);
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Reads `COS_BUCKET_URL`, `COS_REGION` and `COS_TIMEOUT_MS`. Values
    /// already set on the builder are overridden.
    pub fn from_env(mut self) -> Self {
        if let Ok(url) = std::env::var("COS_BUCKET_URL") {
            self.bucket_url = Some(url);
        }
        if let Ok(region) = std::env::var("COS_REGION") {
            self.region = Some(region);
        }
        if let Ok(val) = std::env::var("COS_TIMEOUT_MS") {
            if let Ok(ms) = val.parse() {
                self.read_timeout = Some(Duration::from_millis(ms));
            }
        }
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<CosConfig, CosError> {
        let bucket_url = self
            .bucket_url
            .ok_or(CosError::Configuration(ConfigurationError::MissingBucketUrl))?;
        let bucket_url = parse_endpoint(&bucket_url)?;
        let service_url = parse_endpoint(self.service_url.as_deref().unwrap_or(DEFAULT_SERVICE_URL))?;

        let sign_validity = self.sign_validity.unwrap_or(Duration::from_secs(3600));
        if sign_validity.is_zero() {
            return Err(CosError::Configuration(
                ConfigurationError::InvalidConfiguration {
                    field: "sign_validity".to_string(),
                    message: "Signature validity must be positive".to_string(),
                },
            ));
        }

        Ok(CosConfig {
            bucket_url,
            service_url,
            region: self.region,
            credentials_provider: self
                .credentials_provider
                .unwrap_or_else(|| Arc::new(EnvCredentialsProvider::new())),
            connect_timeout: self.connect_timeout.unwrap_or(Duration::from_secs(5)),
            read_timeout: self.read_timeout.unwrap_or(Duration::from_secs(60)),
            max_connections: self.max_connections.unwrap_or(32),
            verify_ssl: self.verify_ssl.unwrap_or(true),
            sign_validity,
        })
    }
}
