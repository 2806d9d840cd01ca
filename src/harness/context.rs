//! Per-test suite context.

use super::config::HarnessConfig;
use super::endpoint::BucketEndpoint;
use super::fixtures::SPECIAL_FILE_NAME;
use super::naming::RunId;
use super::outcome::tolerate_conflict;
use super::{init_tracing, HarnessError, OperationExt};
use crate::client::{CosClient, CosClientBuilder, CosClientImpl};
use crate::config::CosConfig;
use crate::error::CosError;
use crate::types::{CannedAcl, ListMultipartUploadsRequest, ListObjectsRequest, PutBucketRequest};
use tracing::{info, warn};

/// Everything a scenario needs: a client bound to the primary bucket, the
/// parsed endpoint, this run's id, the fixed fixture names and the harness
/// settings.
///
/// Built once per test and read-only afterwards.
pub struct SuiteContext {
    client: CosClientImpl,
    endpoint: BucketEndpoint,
    run: RunId,
    special_file_name: &'static str,
    config: HarnessConfig,
}

impl SuiteContext {
    /// Build a live context from the environment: `COS_TEST_*` settings,
    /// `COS_SECRETID`/`COS_SECRETKEY` credentials and a reqwest transport.
    pub async fn setup() -> Result<Self, HarnessError> {
        init_tracing();
        let config = HarnessConfig::from_env();

        let client = CosConfig::builder()
            .from_env()
            .bucket_url(config.bucket_url.clone())
            .build()
            .and_then(|cos_config| CosClientBuilder::new().config(cos_config).build())
            .map_err(|e| setup_error("cannot build client", e))?;

        Self::with_client(config, client).await
    }

    /// Build a context around an existing client, rebinding it to
    /// `config.bucket_url`, then create the primary bucket.
    pub async fn with_client(
        config: HarnessConfig,
        client: CosClientImpl,
    ) -> Result<Self, HarnessError> {
        let endpoint = BucketEndpoint::parse(&config.bucket_url)?;
        let client = client
            .for_bucket(&endpoint.url)
            .map_err(|e| setup_error("cannot bind client to bucket", e))?;

        let context = Self {
            client,
            endpoint,
            run: RunId::generate(),
            special_file_name: SPECIAL_FILE_NAME,
            config,
        };
        context.create_primary_bucket().await?;

        info!(
            bucket = %context.endpoint.label(),
            region = %context.endpoint.region,
            run = %context.run,
            "Suite context ready"
        );
        Ok(context)
    }

    async fn create_primary_bucket(&self) -> Result<(), HarnessError> {
        let request = PutBucketRequest::new().with_acl(CannedAcl::PublicRead);
        match self.client.buckets().put(&request).await {
            Ok(_) => Ok(()),
            Err(e) if e.is_conflict() => {
                info!(
                    bucket = %self.endpoint.label(),
                    code = e.code().unwrap_or_default(),
                    "Primary bucket already exists"
                );
                Ok(())
            }
            Err(e) => Err(setup_error("cannot create primary bucket", e)),
        }
    }

    /// Client bound to the primary bucket.
    pub fn client(&self) -> &CosClientImpl {
        &self.client
    }

    /// The parsed primary bucket URL.
    pub fn endpoint(&self) -> &BucketEndpoint {
        &self.endpoint
    }

    /// This run's id, carried by every generated name.
    pub fn run(&self) -> &RunId {
        &self.run
    }

    /// Settings the context was built with.
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Key prefix made of non-ASCII text and every printable symbol.
    pub fn special_file_name(&self) -> &str {
        self.special_file_name
    }

    /// Client for `<bucket>-<appid>` in the primary bucket's region, sharing
    /// the primary client's transport and credentials.
    pub fn sibling_client(&self, bucket: &str) -> Result<CosClientImpl, HarnessError> {
        self.client
            .for_bucket(&self.endpoint.sibling_url(bucket))
            .during("bind sibling bucket")
    }

    /// Create a sibling bucket with a public-read ACL, tolerating 409.
    pub async fn create_sibling_bucket(&self, bucket: &str) -> Result<CosClientImpl, HarnessError> {
        let sibling = self.sibling_client(bucket)?;
        let request = PutBucketRequest::new().with_acl(CannedAcl::PublicRead);
        tolerate_conflict(sibling.buckets().put(&request).await, "PutBucket")?;
        Ok(sibling)
    }

    /// Wait for writes to become visible.
    pub async fn settle(&self) {
        if !self.config.settle_delay.is_zero() {
            tokio::time::sleep(self.config.settle_delay).await;
        }
    }

    /// End of a test. With `sweep_on_teardown` set, aborts uploads and
    /// deletes objects in the primary bucket whose key carries this run's
    /// id. Nothing else is touched.
    pub async fn teardown(self) -> Result<(), HarnessError> {
        info!(run = %self.run, "tear down");
        if !self.config.sweep_on_teardown {
            return Ok(());
        }

        let aborted = self.abort_run_uploads().await?;
        let deleted = self.delete_run_objects().await?;
        info!(run = %self.run, aborted, deleted, "Swept run fixtures");
        Ok(())
    }

    async fn abort_run_uploads(&self) -> Result<usize, HarnessError> {
        let run = self.run.as_str();
        let mut request = ListMultipartUploadsRequest::new();
        let mut aborted = 0usize;
        loop {
            let page = self
                .client
                .buckets()
                .list_multipart_uploads(&request)
                .await
                .during("ListMultipartUploads")?;

            for upload in page.uploads.iter().filter(|u| u.key.contains(run)) {
                self.client
                    .multipart()
                    .abort(&upload.key, &upload.upload_id)
                    .await
                    .during("AbortMultipartUpload")?;
                aborted += 1;
            }

            if !page.is_truncated {
                return Ok(aborted);
            }
            let next_key = page
                .next_key_marker
                .filter(|k| !k.is_empty())
                .or_else(|| page.uploads.last().map(|u| u.key.clone()));
            let Some(next_key) = next_key else {
                warn!("Truncated upload listing without a marker, stopping sweep");
                return Ok(aborted);
            };
            let next_upload_id = page
                .next_upload_id_marker
                .filter(|id| !id.is_empty())
                .or_else(|| page.uploads.last().map(|u| u.upload_id.clone()));
            request = ListMultipartUploadsRequest::new().with_markers(next_key, next_upload_id);
        }
    }

    async fn delete_run_objects(&self) -> Result<usize, HarnessError> {
        let run = self.run.as_str();
        let mut marker: Option<String> = None;
        let mut deleted = 0usize;
        loop {
            let mut request = ListObjectsRequest::new().with_max_keys(1000);
            if let Some(ref m) = marker {
                request = request.with_marker(m.clone());
            }
            let page = self
                .client
                .buckets()
                .list_objects(&request)
                .await
                .during("GetBucket")?;

            for object in page.contents.iter().filter(|o| o.key.contains(run)) {
                self.client
                    .objects()
                    .delete(&object.key)
                    .await
                    .during("DeleteObject")?;
                deleted += 1;
            }

            if !page.is_truncated {
                return Ok(deleted);
            }
            marker = page
                .next_marker
                .or_else(|| page.contents.last().map(|o| o.key.clone()));
            if marker.is_none() {
                warn!("Truncated listing without a marker, stopping sweep");
                return Ok(deleted);
            }
        }
    }
}

impl std::fmt::Debug for SuiteContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuiteContext")
            .field("endpoint", &self.endpoint)
            .field("run", &self.run)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn setup_error(message: &str, source: CosError) -> HarnessError {
    HarnessError::Setup {
        message: format!("{}: {}", message, source),
        source: Some(source),
    }
}
