//! Request types for COS operations.
//!
//! Requests never name a bucket: a client is bound to one bucket URL.

use super::common::*;
use bytes::Bytes;
use serde::Serialize;
use std::collections::HashMap;

/// Request to create the bound bucket.
#[derive(Debug, Clone, Default)]
pub struct PutBucketRequest {
    /// ACL headers sent with the create call.
    pub acl: AclHeaders,
}

impl PutBucketRequest {
    /// Create with the bucket's default (private) ACL.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a canned ACL.
    pub fn with_acl(mut self, acl: CannedAcl) -> Self {
        self.acl = AclHeaders::canned(acl);
        self
    }
}

/// Query options for listing objects (`GET /`).
#[derive(Debug, Clone, Default)]
pub struct ListObjectsRequest {
    /// Only keys starting with this prefix.
    pub prefix: Option<String>,
    /// Roll keys up to the first delimiter after the prefix.
    pub delimiter: Option<String>,
    /// Start after this key.
    pub marker: Option<String>,
    /// At most this many keys; the service caps it at 1000.
    pub max_keys: Option<u32>,
    /// `url` asks the service to encode keys in the response.
    pub encoding_type: Option<String>,
}

impl ListObjectsRequest {
    /// List everything, one page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the key prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Set the delimiter.
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = Some(delimiter.into());
        self
    }

    /// Resume after `marker`.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = Some(marker.into());
        self
    }

    /// Set the page size.
    pub fn with_max_keys(mut self, max_keys: u32) -> Self {
        self.max_keys = Some(max_keys);
        self
    }

    pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(ref prefix) = self.prefix {
            query.push(("prefix", prefix.clone()));
        }
        if let Some(ref delimiter) = self.delimiter {
            query.push(("delimiter", delimiter.clone()));
        }
        if let Some(ref marker) = self.marker {
            query.push(("marker", marker.clone()));
        }
        if let Some(max_keys) = self.max_keys {
            query.push(("max-keys", max_keys.to_string()));
        }
        if let Some(ref encoding_type) = self.encoding_type {
            query.push(("encoding-type", encoding_type.clone()));
        }
        query
    }
}

/// Request to upload an object from memory.
#[derive(Debug, Clone)]
pub struct PutObjectRequest {
    /// Object key.
    pub key: String,
    /// Object content.
    pub body: Bytes,
    /// `content-type`; the service guesses when absent.
    pub content_type: Option<String>,
    /// `x-cos-storage-class`.
    pub storage_class: Option<StorageClass>,
    /// ACL headers.
    pub acl: AclHeaders,
    /// User metadata, sent as `x-cos-meta-<name>`.
    pub metadata: HashMap<String, String>,
}

impl PutObjectRequest {
    /// Upload `body` under `key`.
    pub fn new(key: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self {
            key: key.into(),
            body: body.into(),
            content_type: None,
            storage_class: None,
            acl: AclHeaders::default(),
            metadata: HashMap::new(),
        }
    }

    /// Set the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Set the storage class.
    pub fn with_storage_class(mut self, storage_class: StorageClass) -> Self {
        self.storage_class = Some(storage_class);
        self
    }

    /// Set a canned ACL.
    pub fn with_acl(mut self, acl: CannedAcl) -> Self {
        self.acl = AclHeaders::canned(acl);
        self
    }

    /// Add one `x-cos-meta-*` entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Request to read an object.
#[derive(Debug, Clone)]
pub struct GetObjectRequest {
    /// Object key.
    pub key: String,
    /// Read this version instead of the latest.
    pub version_id: Option<String>,
    /// Inclusive byte range.
    pub range: Option<(u64, u64)>,
}

impl GetObjectRequest {
    /// Read the whole latest version of `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            version_id: None,
            range: None,
        }
    }

    /// Read a specific version.
    pub fn with_version_id(mut self, version_id: impl Into<String>) -> Self {
        self.version_id = Some(version_id.into());
        self
    }

    /// Read bytes `start..=end` only.
    pub fn with_range(mut self, start: u64, end: u64) -> Self {
        self.range = Some((start, end));
        self
    }
}

/// Request to copy an object into the bound bucket.
#[derive(Debug, Clone)]
pub struct CopyObjectRequest {
    /// Destination key.
    pub key: String,
    /// Source as `<bucket-host>/<key>`.
    pub source: String,
    /// Copy this version of the source.
    pub source_version_id: Option<String>,
    /// `Copy` (default) or `Replaced`.
    pub metadata_directive: Option<String>,
    /// Storage class of the copy.
    pub storage_class: Option<StorageClass>,
    /// ACL of the copy.
    pub acl: AclHeaders,
}

impl CopyObjectRequest {
    /// Copy `source` to `key`.
    pub fn new(key: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            source: source.into(),
            source_version_id: None,
            metadata_directive: None,
            storage_class: None,
            acl: AclHeaders::default(),
        }
    }

    /// Copy a specific source version.
    pub fn with_source_version_id(mut self, version_id: impl Into<String>) -> Self {
        self.source_version_id = Some(version_id.into());
        self
    }

    /// Set the storage class of the copy.
    pub fn with_storage_class(mut self, storage_class: StorageClass) -> Self {
        self.storage_class = Some(storage_class);
        self
    }

    /// Value of the `x-cos-copy-source` header.
    pub fn copy_source_header(&self) -> String {
        match self.source_version_id {
            Some(ref version_id) => format!("{}?versionId={}", self.source, version_id),
            None => self.source.clone(),
        }
    }
}

/// `<RestoreRequest>` body for `POST /<key>?restore`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename = "RestoreRequest")]
pub struct RestoreRequest {
    /// How long the restored copy stays readable.
    #[serde(rename = "Days")]
    pub days: u32,
    /// Retrieval tier.
    #[serde(rename = "CASJobParameters")]
    pub job_parameters: RestoreJobParameters,
}

/// `<CASJobParameters>` of a restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestoreJobParameters {
    /// `Expedited`, `Standard` or `Bulk`.
    #[serde(rename = "Tier")]
    pub tier: String,
}

impl RestoreRequest {
    /// Restore for `days` days at `tier` speed.
    pub fn new(days: u32, tier: RestoreTier) -> Self {
        Self {
            days,
            job_parameters: RestoreJobParameters {
                tier: tier.as_str().to_string(),
            },
        }
    }
}

/// Request to start a multipart upload.
#[derive(Debug, Clone)]
pub struct InitiateMultipartUploadRequest {
    /// Object key of the upload.
    pub key: String,
    /// Content type of the assembled object.
    pub content_type: Option<String>,
    /// Storage class of the assembled object.
    pub storage_class: Option<StorageClass>,
    /// ACL of the assembled object.
    pub acl: AclHeaders,
}

impl InitiateMultipartUploadRequest {
    /// Start an upload for `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            content_type: None,
            storage_class: None,
            acl: AclHeaders::default(),
        }
    }

    /// Set the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Request to upload one part.
#[derive(Debug, Clone)]
pub struct UploadPartRequest {
    /// Object key of the upload.
    pub key: String,
    /// Id returned when the upload was initiated.
    pub upload_id: String,
    /// 1 to 10000.
    pub part_number: u32,
    /// Part content; every part but the last must be at least 1 MB.
    pub body: Bytes,
}

impl UploadPartRequest {
    /// Part `part_number` of upload `upload_id`.
    pub fn new(
        key: impl Into<String>,
        upload_id: impl Into<String>,
        part_number: u32,
        body: impl Into<Bytes>,
    ) -> Self {
        Self {
            key: key.into(),
            upload_id: upload_id.into(),
            part_number,
            body: body.into(),
        }
    }
}

/// `<CompleteMultipartUpload>` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename = "CompleteMultipartUpload")]
pub struct CompleteMultipartUpload {
    /// Parts in ascending part-number order.
    #[serde(rename = "Part")]
    pub parts: Vec<CompletedPart>,
}

/// Query options for listing in-progress multipart uploads.
#[derive(Debug, Clone, Default)]
pub struct ListMultipartUploadsRequest {
    /// Only uploads whose key starts with this prefix.
    pub prefix: Option<String>,
    /// Roll keys up to the first delimiter after the prefix.
    pub delimiter: Option<String>,
    /// Start after this key.
    pub key_marker: Option<String>,
    /// With `key_marker`, start after this upload of that key.
    pub upload_id_marker: Option<String>,
    /// At most this many uploads.
    pub max_uploads: Option<u32>,
}

impl ListMultipartUploadsRequest {
    /// List every upload, one page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the key prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Resume a listing after the given key and upload id.
    pub fn with_markers(
        mut self,
        key_marker: impl Into<String>,
        upload_id_marker: Option<String>,
    ) -> Self {
        self.key_marker = Some(key_marker.into());
        self.upload_id_marker = upload_id_marker;
        self
    }

    /// Set the page size.
    pub fn with_max_uploads(mut self, max_uploads: u32) -> Self {
        self.max_uploads = Some(max_uploads);
        self
    }

    pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(ref prefix) = self.prefix {
            query.push(("prefix", prefix.clone()));
        }
        if let Some(ref delimiter) = self.delimiter {
            query.push(("delimiter", delimiter.clone()));
        }
        if let Some(ref key_marker) = self.key_marker {
            query.push(("key-marker", key_marker.clone()));
        }
        if let Some(ref upload_id_marker) = self.upload_id_marker {
            query.push(("upload-id-marker", upload_id_marker.clone()));
        }
        if let Some(max_uploads) = self.max_uploads {
            query.push(("max-uploads", max_uploads.to_string()));
        }
        query
    }
}
