//! Multipart upload service for COS.

use super::objects::validate_key;
use super::{build_url, parse_body, reject_error_body, response_meta, xml_body, Dispatcher};
use crate::config::{encode_key, CosConfig};
use crate::error::{CosError, RequestError, ResponseError};
use crate::signing::CosSigner;
use crate::transport::{HttpResponse, HttpTransport};
use crate::types::*;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Highest part number the service accepts.
pub const MAX_PART_NUMBER: u32 = 10_000;

/// Service for COS multipart upload operations.
pub struct MultipartService {
    config: Arc<CosConfig>,
    dispatcher: Dispatcher,
}

impl MultipartService {
    /// Create a new multipart service.
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

    /// Start a multipart upload.
    pub async fn initiate(
        &self,
        request: &InitiateMultipartUploadRequest,
    ) -> Result<InitiateMultipartUploadResult, CosError> {
        validate_key(&request.key)?;

        let mut headers = HashMap::new();
        if let Some(ref content_type) = request.content_type {
            headers.insert("content-type".to_string(), content_type.clone());
        }
        if let Some(class) = request.storage_class {
            headers.insert("x-cos-storage-class".to_string(), class.as_str().to_string());
        }
        request.acl.apply(&mut headers);

        let response = self
            .send("POST", &request.key, Some("uploads"), &[], headers, None)
            .await?;
        let result: InitiateMultipartUploadResult = parse_body(&response)?;

        if result.upload_id.is_empty() {
            return Err(CosError::Response(ResponseError::MissingField {
                field: "UploadId".to_string(),
            }));
        }

        info!(key = %request.key, upload_id = %result.upload_id, "Initiated multipart upload");
        Ok(result)
    }

    /// Upload one part. The returned ETag comes from the response header.
    pub async fn upload_part(
        &self,
        request: &UploadPartRequest,
    ) -> Result<UploadPartOutput, CosError> {
        validate_key(&request.key)?;
        if request.part_number == 0 || request.part_number > MAX_PART_NUMBER {
            return Err(CosError::Request(RequestError::InvalidPartNumber {
                part_number: request.part_number,
            }));
        }

        let query = [
            ("partNumber", request.part_number.to_string()),
            ("uploadId", request.upload_id.clone()),
        ];
        let response = self
            .send(
                "PUT",
                &request.key,
                None,
                &query,
                HashMap::new(),
                Some(request.body.clone()),
            )
            .await?;

        let etag = response.etag().map(String::from).ok_or_else(|| {
            CosError::Response(ResponseError::MissingField {
                field: "ETag".to_string(),
            })
        })?;

        debug!(
            key = %request.key,
            part_number = request.part_number,
            size = request.body.len(),
            "Uploaded part"
        );
        Ok(UploadPartOutput {
            etag,
            request_id: response.request_id().map(String::from),
        })
    }

    /// Complete a multipart upload with the given parts, in ascending order.
    pub async fn complete(
        &self,
        key: &str,
        upload_id: &str,
        parts: &[CompletedPart],
    ) -> Result<CompleteMultipartUploadOutput, CosError> {
        validate_key(key)?;
        if parts.is_empty() {
            return Err(CosError::Request(RequestError::Validation {
                message: "at least one part is required".to_string(),
            }));
        }

        let mut parts = parts.to_vec();
        parts.sort_by_key(|p| p.part_number);
        let (body, headers) = xml_body(&CompleteMultipartUpload { parts })?;

        let query = [("uploadId", upload_id.to_string())];
        let response = self
            .send("POST", key, None, &query, headers, Some(body))
            .await?;
        reject_error_body(&response, key)?;

        info!(key, upload_id, "Completed multipart upload");
        Ok(CompleteMultipartUploadOutput {
            result: parse_body(&response)?,
            version_id: response.version_id().map(String::from),
            request_id: response.request_id().map(String::from),
        })
    }

    /// Abort a multipart upload and discard its parts.
    pub async fn abort(&self, key: &str, upload_id: &str) -> Result<ResponseMeta, CosError> {
        validate_key(key)?;
        let query = [("uploadId", upload_id.to_string())];
        let response = self
            .send("DELETE", key, None, &query, HashMap::new(), None)
            .await?;

        info!(key, upload_id, "Aborted multipart upload");
        Ok(response_meta(&response))
    }

    /// List the parts uploaded so far.
    pub async fn list_parts(&self, key: &str, upload_id: &str) -> Result<ListPartsResult, CosError> {
        validate_key(key)?;
        let query = [("uploadId", upload_id.to_string())];
        let response = self
            .send("GET", key, None, &query, HashMap::new(), None)
            .await?;
        parse_body(&response)
    }

    async fn send(
        &self,
        method: &str,
        key: &str,
        subresource: Option<&str>,
        query: &[(&str, String)],
        headers: HashMap<String, String>,
        body: Option<Bytes>,
    ) -> Result<HttpResponse, CosError> {
        let path = format!("/{}", encode_key(key));
        let url = build_url(&self.config.bucket_url, &path, subresource, query);
        self.dispatcher
            .send(method, &url, headers, body, key)
            .await
    }
}

impl std::fmt::Debug for MultipartService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultipartService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
