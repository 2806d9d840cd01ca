//! Error types for the COS integration.
//!
//! Errors are grouped by where they arise: local configuration, credentials,
//! signing, request validation, the remote service, the network, and response
//! decoding. Service errors always carry the HTTP status so callers can make
//! status-based decisions (409 on create, 404 on read-back, and so on).

mod mapping;

pub use mapping::{classify, service_error_from_response, ErrorResponse};

use std::time::Duration;
use thiserror::Error;

/// Top-level error type for the COS integration.
#[derive(Debug, Error)]
pub enum CosError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Credential-related errors.
    #[error("Credentials error: {0}")]
    Credentials(#[from] CredentialsError),

    /// Request signing errors.
    #[error("Signing error: {0}")]
    Signing(#[from] SigningError),

    /// Request validation errors.
    #[error("Request error: {0}")]
    Request(#[from] RequestError),

    /// Non-2xx response from the service.
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    /// Network and transport errors.
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// Response parsing errors.
    #[error("Response error: {0}")]
    Response(#[from] ResponseError),

    /// Local file I/O errors (put from file, get to file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CosError {
    /// Returns the HTTP status code when the service answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            CosError::Service(e) => Some(e.status),
            _ => None,
        }
    }

    /// Returns the COS error code (e.g. `NoSuchBucket`) if available.
    pub fn code(&self) -> Option<&str> {
        match self {
            CosError::Service(e) if !e.code.is_empty() => Some(e.code.as_str()),
            _ => None,
        }
    }

    /// Returns the classified service error kind if available.
    pub fn kind(&self) -> Option<ServiceErrorKind> {
        match self {
            CosError::Service(e) => Some(e.kind()),
            _ => None,
        }
    }

    /// Returns the COS request ID if available.
    pub fn request_id(&self) -> Option<&str> {
        match self {
            CosError::Service(e) => e.request_id.as_deref(),
            _ => None,
        }
    }

    /// True for any 404 answer from the service.
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// True for any 409 answer from the service.
    pub fn is_conflict(&self) -> bool {
        self.status_code() == Some(409)
    }
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// No bucket URL was configured.
    #[error("Missing bucket URL: a bucket URL must be specified via config or environment")]
    MissingBucketUrl,

    /// Invalid endpoint URL.
    #[error("Invalid endpoint URL: {url} ({details})")]
    InvalidEndpoint {
        /// The invalid URL.
        url: String,
        /// Details about the validation error.
        details: String,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration: {field} - {message}")]
    InvalidConfiguration {
        /// The configuration field name.
        field: String,
        /// Error message.
        message: String,
    },
}

/// Credential-related errors.
#[derive(Debug, Error)]
pub enum CredentialsError {
    /// No credentials could be found.
    #[error("Credentials not found: {source_name} has no credentials")]
    NotFound {
        /// Name of the provider that was consulted.
        source_name: String,
    },

    /// Credentials are invalid.
    #[error("Invalid credentials: {message}")]
    Invalid {
        /// Details about why credentials are invalid.
        message: String,
    },
}

/// Request signing errors.
#[derive(Debug, Error)]
pub enum SigningError {
    /// The signing window could not be computed.
    #[error("Invalid key time: {message}")]
    InvalidKeyTime {
        /// Details about the key time error.
        message: String,
    },

    /// Signature calculation failed.
    #[error("Signature calculation failed: {message}")]
    CalculationFailed {
        /// Details about the calculation error.
        message: String,
    },
}

/// Request validation errors.
#[derive(Debug, Error)]
pub enum RequestError {
    /// General validation error.
    #[error("Validation error: {message}")]
    Validation {
        /// Details about the validation error.
        message: String,
    },

    /// Invalid object key.
    #[error("Invalid object key '{key}': {reason}")]
    InvalidObjectKey {
        /// The invalid object key.
        key: String,
        /// Reason why the key is invalid.
        reason: String,
    },

    /// Part number outside 1..=10000.
    #[error("Invalid part number {part_number}")]
    InvalidPartNumber {
        /// The rejected part number.
        part_number: u32,
    },
}

/// A non-2xx answer from the service.
#[derive(Debug, Clone, Error)]
#[error("HTTP {status} {code}: {message}")]
pub struct ServiceError {
    /// HTTP status code.
    pub status: u16,
    /// COS error code; empty for bodiless answers such as HEAD.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Resource the error refers to.
    pub resource: Option<String>,
    /// COS request ID.
    pub request_id: Option<String>,
}

impl ServiceError {
    /// Classify this error by code, falling back to the status.
    pub fn kind(&self) -> ServiceErrorKind {
        classify(self.status, &self.code)
    }
}

/// Classified service error codes the suite reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceErrorKind {
    /// `NoSuchBucket`.
    NoSuchBucket,
    /// `NoSuchKey`.
    NoSuchKey,
    /// `NoSuchUpload`.
    NoSuchUpload,
    /// A bucket sub-resource (lifecycle, CORS, replication, ...) is absent.
    NoSuchConfiguration,
    /// Any other or bodiless 404.
    NotFound,
    /// `BucketAlreadyOwnedByYou`.
    BucketAlreadyOwnedByYou,
    /// `BucketAlreadyExists`.
    BucketAlreadyExists,
    /// `BucketNotEmpty`.
    BucketNotEmpty,
    /// `RestoreAlreadyInProgress`.
    RestoreAlreadyInProgress,
    /// Any other or bodiless 409.
    Conflict,
    /// `InvalidArgument` and friends.
    InvalidArgument,
    /// `InvalidPart`.
    InvalidPart,
    /// `InvalidPartOrder`.
    InvalidPartOrder,
    /// `InvalidObjectState`.
    InvalidObjectState,
    /// `AccessDenied`.
    AccessDenied,
    /// `SignatureDoesNotMatch`.
    SignatureDoesNotMatch,
    /// `InvalidAccessKeyId`.
    InvalidAccessKeyId,
    /// 5xx answers.
    ServerError,
    /// Anything else.
    Other,
}

/// Network and transport errors.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Connection failed.
    #[error("Connection failed: {message}")]
    ConnectionFailed {
        /// Details about the connection failure.
        message: String,
    },

    /// Request timed out.
    #[error("Timeout after {duration:?}")]
    Timeout {
        /// How long the transport waited.
        duration: Duration,
    },

    /// TLS or client construction error.
    #[error("TLS error: {message}")]
    TlsError {
        /// Details about the TLS error.
        message: String,
    },
}

/// Response parsing errors.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// XML document could not be parsed.
    #[error("XML parse error: {message}")]
    XmlParseError {
        /// Details about the parse error.
        message: String,
    },

    /// XML document could not be built.
    #[error("XML build error: {message}")]
    XmlBuildError {
        /// Details about the serialisation error.
        message: String,
    },

    /// A required header or element was missing.
    #[error("Missing field in response: {field}")]
    MissingField {
        /// The missing field.
        field: String,
    },
}
