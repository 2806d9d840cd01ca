//! Objects service for COS object operations.

use super::{build_url, parse_body, reject_error_body, response_meta, xml_body, Dispatcher};
use crate::config::{encode_key, CosConfig};
use crate::error::{CosError, RequestError};
use crate::signing::CosSigner;
use crate::transport::{HttpResponse, HttpTransport};
use crate::types::*;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Service for COS object operations.
pub struct ObjectsService {
    config: Arc<CosConfig>,
    dispatcher: Dispatcher,
}

impl ObjectsService {
    /// Create a new objects service.
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

    /// Upload an object from memory.
    pub async fn put(&self, request: &PutObjectRequest) -> Result<PutObjectOutput, CosError> {
        validate_key(&request.key)?;

        let mut headers = HashMap::new();
        headers.insert(
            "content-type".to_string(),
            request
                .content_type
                .clone()
                .unwrap_or_else(|| "application/octet-stream".to_string()),
        );
        if let Some(class) = request.storage_class {
            headers.insert("x-cos-storage-class".to_string(), class.as_str().to_string());
        }
        request.acl.apply(&mut headers);
        for (name, value) in &request.metadata {
            headers.insert(format!("x-cos-meta-{}", name.to_lowercase()), value.clone());
        }

        let response = self
            .send("PUT", &request.key, None, &[], headers, Some(request.body.clone()))
            .await?;

        info!(key = %request.key, size = request.body.len(), "Put object");
        Ok(PutObjectOutput {
            etag: response.etag().map(String::from),
            version_id: response.version_id().map(String::from),
            request_id: response.request_id().map(String::from),
        })
    }

    /// Upload the contents of a local file.
    pub async fn put_from_file(
        &self,
        key: &str,
        path: impl AsRef<Path>,
    ) -> Result<PutObjectOutput, CosError> {
        let data = tokio::fs::read(path.as_ref()).await?;
        debug!(path = %path.as_ref().display(), size = data.len(), "Read local file");
        self.put(&PutObjectRequest::new(key, data)).await
    }

    /// Read object metadata.
    ///
    /// A missing object is a `CosError::Service` with status 404.
    pub async fn head(&self, key: &str) -> Result<HeadObjectOutput, CosError> {
        validate_key(key)?;
        let response = self.send("HEAD", key, None, &[], HashMap::new(), None).await?;

        Ok(HeadObjectOutput {
            content_length: response.content_length(),
            content_type: response.content_type().map(String::from),
            etag: response.etag().map(String::from),
            last_modified: response.get_header("last-modified").map(String::from),
            storage_class: response.get_header("x-cos-storage-class").map(String::from),
            version_id: response.version_id().map(String::from),
            restore: response.get_header("x-cos-restore").map(String::from),
            request_id: response.request_id().map(String::from),
        })
    }

    /// Whether the object exists.
    pub async fn exists(&self, key: &str) -> Result<bool, CosError> {
        match self.head(key).await {
            Ok(_) => Ok(true),
            Err(e) if e.status_code() == Some(404) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Download an object into memory.
    pub async fn get(&self, request: &GetObjectRequest) -> Result<GetObjectOutput, CosError> {
        validate_key(&request.key)?;
        let response = self.get_response(request).await?;

        debug!(key = %request.key, size = response.body.len(), "Got object");
        Ok(GetObjectOutput {
            content_length: response.content_length(),
            content_type: response.content_type().map(String::from),
            etag: response.etag().map(String::from),
            version_id: response.version_id().map(String::from),
            request_id: response.request_id().map(String::from),
            body: response.body,
        })
    }

    /// Download an object into a local file, replacing its contents.
    pub async fn get_to_file(
        &self,
        request: &GetObjectRequest,
        path: impl AsRef<Path>,
    ) -> Result<GetObjectToFileOutput, CosError> {
        validate_key(&request.key)?;
        let response = self.get_response(request).await?;
        tokio::fs::write(path.as_ref(), &response.body).await?;

        debug!(key = %request.key, path = %path.as_ref().display(), "Wrote object to file");
        Ok(GetObjectToFileOutput {
            bytes_written: response.body.len() as u64,
            etag: response.etag().map(String::from),
            request_id: response.request_id().map(String::from),
        })
    }

    /// Delete an object.
    pub async fn delete(&self, key: &str) -> Result<ResponseMeta, CosError> {
        validate_key(key)?;
        let response = self
            .send("DELETE", key, None, &[], HashMap::new(), None)
            .await?;
        info!(key, "Deleted object");
        Ok(response_meta(&response))
    }

    /// Delete one version of an object.
    pub async fn delete_version(
        &self,
        key: &str,
        version_id: &str,
    ) -> Result<ResponseMeta, CosError> {
        validate_key(key)?;
        let query = [("versionId", version_id.to_string())];
        let response = self
            .send("DELETE", key, None, &query, HashMap::new(), None)
            .await?;
        Ok(response_meta(&response))
    }

    /// Replace the object ACL using ACL headers.
    pub async fn put_acl(&self, key: &str, acl: &AclHeaders) -> Result<ResponseMeta, CosError> {
        validate_key(key)?;
        let mut headers = HashMap::new();
        acl.apply(&mut headers);
        let response = self
            .send("PUT", key, Some("acl"), &[], headers, None)
            .await?;
        Ok(response_meta(&response))
    }

    /// Read the object ACL.
    pub async fn get_acl(&self, key: &str) -> Result<AccessControlPolicy, CosError> {
        validate_key(key)?;
        let response = self
            .send("GET", key, Some("acl"), &[], HashMap::new(), None)
            .await?;
        parse_body(&response)
    }

    /// Ask for a temporary copy of an archived object.
    ///
    /// The service answers 200 when a restored copy already exists and 202
    /// when the job is accepted; a job already in progress is a 409 error.
    pub async fn restore(
        &self,
        key: &str,
        request: &RestoreRequest,
    ) -> Result<ResponseMeta, CosError> {
        validate_key(key)?;
        let (body, headers) = xml_body(request)?;
        let response = self
            .send("POST", key, Some("restore"), &[], headers, Some(body))
            .await?;

        info!(key, status = response.status, "Requested object restore");
        Ok(response_meta(&response))
    }

    /// Copy an object into the bound bucket.
    pub async fn copy(&self, request: &CopyObjectRequest) -> Result<CopyObjectOutput, CosError> {
        validate_key(&request.key)?;

        let mut headers = HashMap::new();
        headers.insert("x-cos-copy-source".to_string(), request.copy_source_header());
        if let Some(ref directive) = request.metadata_directive {
            headers.insert("x-cos-metadata-directive".to_string(), directive.clone());
        }
        if let Some(class) = request.storage_class {
            headers.insert("x-cos-storage-class".to_string(), class.as_str().to_string());
        }
        request.acl.apply(&mut headers);

        let response = self
            .send("PUT", &request.key, None, &[], headers, None)
            .await?;

        reject_error_body(&response, &request.key)?;

        info!(key = %request.key, source = %request.source, "Copied object");
        Ok(CopyObjectOutput {
            result: parse_body(&response)?,
            version_id: response.version_id().map(String::from),
            request_id: response.request_id().map(String::from),
        })
    }

    async fn get_response(&self, request: &GetObjectRequest) -> Result<HttpResponse, CosError> {
        let mut headers = HashMap::new();
        if let Some((start, end)) = request.range {
            headers.insert("range".to_string(), format!("bytes={}-{}", start, end));
        }
        let query: Vec<(&str, String)> = request
            .version_id
            .iter()
            .map(|v| ("versionId", v.clone()))
            .collect();

        self.send("GET", &request.key, None, &query, headers, None)
            .await
    }

    async fn send(
        &self,
        method: &str,
        key: &str,
        subresource: Option<&str>,
        query: &[(&str, String)],
        headers: HashMap<String, String>,
        body: Option<bytes::Bytes>,
    ) -> Result<HttpResponse, CosError> {
        let path = format!("/{}", encode_key(key));
        let url = build_url(&self.config.bucket_url, &path, subresource, query);
        self.dispatcher
            .send(method, &url, headers, body, key)
            .await
    }
}

/// Reject keys the service cannot address.
pub(crate) fn validate_key(key: &str) -> Result<(), CosError> {
    if key.is_empty() {
        return Err(CosError::Request(RequestError::InvalidObjectKey {
            key: key.to_string(),
            reason: "key must not be empty".to_string(),
        }));
    }
    if key.len() > 850 {
        return Err(CosError::Request(RequestError::InvalidObjectKey {
            key: key.chars().take(32).collect(),
            reason: format!("key is {} bytes, the limit is 850", key.len()),
        }));
    }
    Ok(())
}

impl std::fmt::Debug for ObjectsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectsService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
