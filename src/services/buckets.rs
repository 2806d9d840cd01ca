//! Buckets service for COS bucket operations.
//!
//! All calls target the bucket the client is bound to.

use super::{build_url, parse_body, response_meta, xml_body, Dispatcher};
use crate::config::CosConfig;
use crate::error::CosError;
use crate::signing::CosSigner;
use crate::transport::HttpTransport;
use crate::types::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Service for COS bucket operations.
pub struct BucketsService {
    config: Arc<CosConfig>,
    dispatcher: Dispatcher,
}

impl BucketsService {
    /// Create a new buckets service.
    pub fn new(
        config: Arc<CosConfig>,
        transport: Arc<dyn HttpTransport>,
        signer: Arc<dyn CosSigner>,
    ) -> Self {
        Self {
            config,
            dispatcher: Dispatcher::new(transport, signer),
        }
    }

    /// Create the bucket.
    pub async fn put(&self, request: &PutBucketRequest) -> Result<ResponseMeta, CosError> {
        let mut headers = HashMap::new();
        request.acl.apply(&mut headers);

        let meta = self.send("PUT", None, &[], headers, None).await?;
        info!(bucket = %self.config.bucket_host(), "Created bucket");
        Ok(meta)
    }

    /// Check that the bucket exists and is accessible.
    ///
    /// A missing bucket is a `CosError::Service` with status 404.
    pub async fn head(&self) -> Result<ResponseMeta, CosError> {
        self.send("HEAD", None, &[], HashMap::new(), None).await
    }

    /// Delete the bucket. It must be empty.
    pub async fn delete(&self) -> Result<ResponseMeta, CosError> {
        let meta = self.send("DELETE", None, &[], HashMap::new(), None).await?;
        info!(bucket = %self.config.bucket_host(), "Deleted bucket");
        Ok(meta)
    }

    /// Whether the bucket exists.
    pub async fn exists(&self) -> Result<bool, CosError> {
        match self.head().await {
            Ok(_) => Ok(true),
            Err(e) if e.status_code() == Some(404) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// List objects (`GET Bucket`).
    pub async fn list_objects(
        &self,
        request: &ListObjectsRequest,
    ) -> Result<ListBucketResult, CosError> {
        let url = build_url(&self.config.bucket_url, "/", None, &request.query());
        let response = self
            .dispatcher
            .send("GET", &url, HashMap::new(), None, &self.config.bucket_host())
            .await?;

        let result: ListBucketResult = parse_body(&response)?;
        debug!(
            count = result.contents.len(),
            truncated = result.is_truncated,
            "Listed objects"
        );
        Ok(result)
    }

    /// Region the bucket lives in.
    pub async fn get_location(&self) -> Result<String, CosError> {
        let location: LocationConstraint = self.get_config("location", &[]).await?;
        Ok(location.location)
    }

    /// Replace the bucket ACL using ACL headers.
    pub async fn put_acl(&self, acl: &AclHeaders) -> Result<ResponseMeta, CosError> {
        let mut headers = HashMap::new();
        acl.apply(&mut headers);
        self.send("PUT", Some("acl"), &[], headers, None).await
    }

    /// Read the bucket ACL.
    pub async fn get_acl(&self) -> Result<AccessControlPolicy, CosError> {
        self.get_config("acl", &[]).await
    }

    /// Replace the bucket's CORS configuration.
    pub async fn put_cors(&self, config: &CorsConfiguration) -> Result<ResponseMeta, CosError> {
        self.put_config("cors", &[], config).await
    }

    /// Read the bucket's CORS configuration.
    pub async fn get_cors(&self) -> Result<CorsConfiguration, CosError> {
        self.get_config("cors", &[]).await
    }

    /// Remove the bucket's CORS configuration.
    pub async fn delete_cors(&self) -> Result<ResponseMeta, CosError> {
        self.delete_config("cors", &[]).await
    }

    /// Set the bucket's versioning state.
    pub async fn put_versioning(
        &self,
        config: &VersioningConfiguration,
    ) -> Result<ResponseMeta, CosError> {
        self.put_config("versioning", &[], config).await
    }

    /// Read the bucket's versioning state.
    pub async fn get_versioning(&self) -> Result<VersioningConfiguration, CosError> {
        self.get_config("versioning", &[]).await
    }

    /// Put a cross-region replication configuration. Versioning must be enabled.
    pub async fn put_replication(
        &self,
        config: &ReplicationConfiguration,
    ) -> Result<ResponseMeta, CosError> {
        self.put_config("replication", &[], config).await
    }

    /// Read the bucket's replication configuration.
    pub async fn get_replication(&self) -> Result<ReplicationConfiguration, CosError> {
        self.get_config("replication", &[]).await
    }

    /// Remove the bucket's replication configuration.
    pub async fn delete_replication(&self) -> Result<ResponseMeta, CosError> {
        self.delete_config("replication", &[]).await
    }

    /// Put the inventory configuration named `id`.
    pub async fn put_inventory(
        &self,
        id: &str,
        config: &InventoryConfiguration,
    ) -> Result<ResponseMeta, CosError> {
        self.put_config("inventory", &[("id", id.to_string())], config)
            .await
    }

    /// Read the inventory configuration named `id`.
    pub async fn get_inventory(&self, id: &str) -> Result<InventoryConfiguration, CosError> {
        self.get_config("inventory", &[("id", id.to_string())]).await
    }

    /// Remove the inventory configuration named `id`.
    pub async fn delete_inventory(&self, id: &str) -> Result<ResponseMeta, CosError> {
        self.delete_config("inventory", &[("id", id.to_string())])
            .await
    }

    /// Set where the bucket's access logs go.
    pub async fn put_logging(&self, status: &BucketLoggingStatus) -> Result<ResponseMeta, CosError> {
        self.put_config("logging", &[], status).await
    }

    /// Read the bucket's logging status.
    pub async fn get_logging(&self) -> Result<BucketLoggingStatus, CosError> {
        self.get_config("logging", &[]).await
    }

    /// Replace the bucket's lifecycle rules.
    pub async fn put_lifecycle(
        &self,
        config: &LifecycleConfiguration,
    ) -> Result<ResponseMeta, CosError> {
        self.put_config("lifecycle", &[], config).await
    }

    /// Read the lifecycle rules. A bucket without rules answers 404.
    pub async fn get_lifecycle(&self) -> Result<LifecycleConfiguration, CosError> {
        self.get_config("lifecycle", &[]).await
    }

    /// Remove the bucket's lifecycle rules.
    pub async fn delete_lifecycle(&self) -> Result<ResponseMeta, CosError> {
        self.delete_config("lifecycle", &[]).await
    }

    /// List in-progress multipart uploads.
    pub async fn list_multipart_uploads(
        &self,
        request: &ListMultipartUploadsRequest,
    ) -> Result<ListMultipartUploadsResult, CosError> {
        self.get_config("uploads", &request.query()).await
    }

    async fn send(
        &self,
        method: &str,
        subresource: Option<&str>,
        query: &[(&str, String)],
        headers: HashMap<String, String>,
        body: Option<bytes::Bytes>,
    ) -> Result<ResponseMeta, CosError> {
        let url = build_url(&self.config.bucket_url, "/", subresource, query);
        let response = self
            .dispatcher
            .send(method, &url, headers, body, &self.config.bucket_host())
            .await?;
        Ok(response_meta(&response))
    }

    async fn put_config<T: Serialize>(
        &self,
        subresource: &str,
        query: &[(&str, String)],
        document: &T,
    ) -> Result<ResponseMeta, CosError> {
        let (body, headers) = xml_body(document)?;
        let meta = self
            .send("PUT", Some(subresource), query, headers, Some(body))
            .await?;
        debug!(subresource, "Updated bucket configuration");
        Ok(meta)
    }

    async fn get_config<T: DeserializeOwned>(
        &self,
        subresource: &str,
        query: &[(&str, String)],
    ) -> Result<T, CosError> {
        let url = build_url(&self.config.bucket_url, "/", Some(subresource), query);
        let response = self
            .dispatcher
            .send("GET", &url, HashMap::new(), None, &self.config.bucket_host())
            .await?;
        parse_body(&response)
    }

    async fn delete_config(
        &self,
        subresource: &str,
        query: &[(&str, String)],
    ) -> Result<ResponseMeta, CosError> {
        self.send("DELETE", Some(subresource), query, HashMap::new(), None)
            .await
    }
}

impl std::fmt::Debug for BucketsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BucketsService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
