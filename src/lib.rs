//! Tencent COS Integration Module
//!
//! A bucket-scoped client for the Tencent Cloud Object Storage XML API (v5)
//! and a live integration harness that exercises it end to end.
//!
//! # Features
//!
//! - **Buckets**: create, head, delete, list, location, ACL, CORS,
//!   versioning, replication, inventory, logging, lifecycle
//! - **Objects**: put/get from memory or local files, head, delete, ACL,
//!   restore, copy
//! - **Multipart**: initiate, upload part, complete, abort, list
//! - **COS signatures**: `q-sign-algorithm=sha1` request signing
//! - **Harness**: per-test suite context, fixture naming, outcome
//!   classification and one scenario per live test
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cos::{CosClient, PutObjectRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), cos::CosError> {
//!     // Reads COS_BUCKET_URL, COS_SECRETID and COS_SECRETKEY
//!     let client = cos::create_client_from_env()?;
//!
//!     let output = client
//!         .objects()
//!         .put(&PutObjectRequest::new("hello.txt", "Hello, COS!"))
//!         .await?;
//!
//!     println!("Uploaded with ETag: {:?}", output.etag);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod harness;
pub mod mocks;
pub mod services;
pub mod signing;
pub mod transport;
pub mod types;
pub mod xml;

// Re-export main types at crate root
pub use client::{CosClient, CosClientBuilder, CosClientImpl};
pub use config::{CosConfig, CosConfigBuilder};
pub use credentials::{
    CosCredentials, CredentialsProvider, EnvCredentialsProvider, StaticCredentialsProvider,
};
pub use error::{
    ConfigurationError, CosError, CredentialsError, NetworkError, RequestError, ResponseError,
    ServiceError, ServiceErrorKind, SigningError,
};
pub use services::{BucketsService, MultipartService, ObjectsService, ServiceService};
pub use signing::{CosSigner, CosSignerV5};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
pub use types::{
    // Request types
    CopyObjectRequest,
    GetObjectRequest,
    InitiateMultipartUploadRequest,
    ListMultipartUploadsRequest,
    ListObjectsRequest,
    PutBucketRequest,
    PutObjectRequest,
    RestoreRequest,
    UploadPartRequest,
    // Response types
    AccessControlPolicy,
    CompleteMultipartUploadOutput,
    CopyObjectOutput,
    GetObjectOutput,
    HeadObjectOutput,
    InitiateMultipartUploadResult,
    ListAllMyBucketsResult,
    ListBucketResult,
    ListMultipartUploadsResult,
    PutObjectOutput,
    ResponseMeta,
    UploadPartOutput,
    // Common types
    AclHeaders,
    CannedAcl,
    CompletedPart,
    RestoreTier,
    StorageClass,
};

/// Create a new COS client from environment variables.
///
/// Reads:
/// - `COS_BUCKET_URL` for the bucket, `COS_REGION` to override the region
/// - `COS_SECRETID` and `COS_SECRETKEY` for credentials
/// - `COS_SESSION_TOKEN` for temporary credentials
/// - `COS_TIMEOUT_MS` for the read timeout
///
/// # Example
///
/// ```rust,no_run
/// let client = cos::create_client_from_env()?;
/// # Ok::<(), cos::CosError>(())
/// ```
pub fn create_client_from_env() -> Result<impl CosClient> {
    CosClientBuilder::new().from_env().build()
}

/// Create a new COS client with explicit configuration.
///
/// # Example
///
/// ```rust,no_run
/// use cos::{CosConfig, CosCredentials, StaticCredentialsProvider};
/// use std::sync::Arc;
///
/// let config = CosConfig::builder()
///     .bucket_url("https://examplebucket-1250000000.cos.ap-guangzhou.myqcloud.com")
///     .credentials_provider(Arc::new(StaticCredentialsProvider::new(
///         CosCredentials::new("AKID", "SECRET"),
///     )))
///     .build()?;
///
/// let client = cos::create_client(config)?;
/// # Ok::<(), cos::CosError>(())
/// ```
pub fn create_client(config: CosConfig) -> Result<impl CosClient> {
    CosClientBuilder::new().config(config).build()
}

/// Result type alias for COS operations.
pub type Result<T> = std::result::Result<T, CosError>;
