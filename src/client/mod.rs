//! COS client implementation.
//!
//! This module provides the main COS client interface and builder.

use crate::config::CosConfig;
use crate::error::CosError;
use crate::services::{BucketsService, MultipartService, ObjectsService, ServiceService};
use crate::signing::{CosSigner, CosSignerV5};
use crate::transport::{HttpTransport, ReqwestTransport};
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// COS client trait.
pub trait CosClient: Send + Sync {
    /// Get the service-level operations.
    fn service(&self) -> &ServiceService;

    /// Get the buckets service.
    fn buckets(&self) -> &BucketsService;

    /// Get the objects service.
    fn objects(&self) -> &ObjectsService;

    /// Get the multipart service.
    fn multipart(&self) -> &MultipartService;

    /// Get the client configuration.
    fn config(&self) -> &CosConfig;
}

/// COS client implementation.
pub struct CosClientImpl {
    config: Arc<CosConfig>,
    transport: Arc<dyn HttpTransport>,
    signer: Arc<dyn CosSigner>,

    service: OnceCell<ServiceService>,
    buckets: OnceCell<BucketsService>,
    objects: OnceCell<ObjectsService>,
    multipart: OnceCell<MultipartService>,
}

impl CosClientImpl {
    /// Create a new client signing with [`CosSignerV5`].
    pub fn new(config: CosConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let signer = Arc::new(CosSignerV5::new(
            config.credentials_provider.clone(),
            config.sign_validity,
        ));
        Self::with_signer(config, transport, signer)
    }

    /// Create a new client with a custom signer.
    pub fn with_signer(
        config: CosConfig,
        transport: Arc<dyn HttpTransport>,
        signer: Arc<dyn CosSigner>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            transport,
            signer,
            service: OnceCell::new(),
            buckets: OnceCell::new(),
            objects: OnceCell::new(),
            multipart: OnceCell::new(),
        }
    }

    /// A client for another bucket sharing this client's transport, signer
    /// and settings.
    pub fn for_bucket(&self, bucket_url: &str) -> Result<CosClientImpl, CosError> {
        Ok(Self::with_signer(
            self.config.for_bucket(bucket_url)?,
            self.transport.clone(),
            self.signer.clone(),
        ))
    }
}

impl CosClient for CosClientImpl {
    fn service(&self) -> &ServiceService {
        self.service.get_or_init(|| {
            ServiceService::new(
                self.config.clone(),
                self.transport.clone(),
                self.signer.clone(),
            )
        })
    }

    fn buckets(&self) -> &BucketsService {
        self.buckets.get_or_init(|| {
            BucketsService::new(
                self.config.clone(),
                self.transport.clone(),
                self.signer.clone(),
            )
        })
    }

    fn objects(&self) -> &ObjectsService {
        self.objects.get_or_init(|| {
            ObjectsService::new(
                self.config.clone(),
                self.transport.clone(),
                self.signer.clone(),
            )
        })
    }

    fn multipart(&self) -> &MultipartService {
        self.multipart.get_or_init(|| {
            MultipartService::new(
                self.config.clone(),
                self.transport.clone(),
                self.signer.clone(),
            )
        })
    }

    fn config(&self) -> &CosConfig {
        &self.config
    }
}

impl std::fmt::Debug for CosClientImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CosClientImpl")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for COS client.
#[derive(Default)]
pub struct CosClientBuilder {
    config: Option<CosConfig>,
    from_env: bool,
    transport: Option<Arc<dyn HttpTransport>>,
    signer: Option<Arc<dyn CosSigner>>,
}

impl CosClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the provided configuration.
    pub fn config(mut self, config: CosConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Load configuration from environment variables.
    pub fn from_env(mut self) -> Self {
        self.from_env = true;
        self
    }

    /// Use a custom HTTP transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Use a custom signer.
    pub fn signer(mut self, signer: Arc<dyn CosSigner>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Build the COS client.
    pub fn build(self) -> Result<CosClientImpl, CosError> {
        let config = match self.config {
            Some(config) => config,
            None if self.from_env => CosConfig::builder().from_env().build()?,
            None => CosConfig::builder().build()?,
        };

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::from_config(&config)?),
        };

        Ok(match self.signer {
            Some(signer) => CosClientImpl::with_signer(config, transport, signer),
            None => CosClientImpl::new(config, transport),
        })
    }
}
