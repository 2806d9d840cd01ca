//! Service-level operations (`GET Service`).

use super::{build_url, parse_body, Dispatcher};
use crate::config::CosConfig;
use crate::error::CosError;
use crate::signing::CosSigner;
use crate::transport::HttpTransport;
use crate::types::ListAllMyBucketsResult;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Service for account-level operations.
pub struct ServiceService {
    config: Arc<CosConfig>,
    dispatcher: Dispatcher,
}

impl ServiceService {
    /// Create a new service-level client.
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

    /// List all buckets owned by the account.
    pub async fn list_buckets(&self) -> Result<ListAllMyBucketsResult, CosError> {
        let url = build_url(&self.config.service_url, "/", None, &[]);
        let response = self
            .dispatcher
            .send("GET", &url, HashMap::new(), None, "")
            .await?;

        let result: ListAllMyBucketsResult = parse_body(&response)?;
        info!(count = result.buckets.buckets.len(), "Listed buckets");
        Ok(result)
    }
}

impl std::fmt::Debug for ServiceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceService")
            .field("service_url", &self.config.service_url.as_str())
            .finish_non_exhaustive()
    }
}
