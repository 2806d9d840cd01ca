//! Response types for COS operations.

use super::common::*;
use bytes::Bytes;
use serde::Deserialize;

/// `<ListAllMyBucketsResult>` returned by `GET Service`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListAllMyBucketsResult {
    /// Account that owns the buckets.
    #[serde(rename = "Owner", default)]
    pub owner: Owner,
    /// Buckets of the account.
    #[serde(rename = "Buckets", default)]
    pub buckets: BucketList,
}

/// `<Buckets>` wrapper.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BucketList {
    /// One entry per bucket.
    #[serde(rename = "Bucket", default)]
    pub buckets: Vec<BucketSummary>,
}

/// A bucket in a service listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BucketSummary {
    /// `<name>-<appid>`.
    #[serde(rename = "Name", default)]
    pub name: String,
    /// Region, such as `ap-guangzhou`.
    #[serde(rename = "Location", default)]
    pub location: String,
    /// RFC 3339 creation time.
    #[serde(rename = "CreationDate", default)]
    pub creation_date: String,
}

/// `<ListBucketResult>` returned by `GET Bucket`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListBucketResult {
    /// Bucket label.
    #[serde(rename = "Name", default)]
    pub name: String,
    /// `url` when keys in this listing are URL-encoded.
    #[serde(rename = "EncodingType", default)]
    pub encoding_type: Option<String>,
    /// Prefix the listing was filtered by.
    #[serde(rename = "Prefix", default)]
    pub prefix: Option<String>,
    /// Marker the listing started after.
    #[serde(rename = "Marker", default)]
    pub marker: Option<String>,
    /// Page size asked for.
    #[serde(rename = "MaxKeys", default)]
    pub max_keys: Option<u32>,
    /// Delimiter the keys were rolled up at.
    #[serde(rename = "Delimiter", default)]
    pub delimiter: Option<String>,
    /// More keys follow this page.
    #[serde(rename = "IsTruncated", default)]
    pub is_truncated: bool,
    /// Marker for the next page, when truncated.
    #[serde(rename = "NextMarker", default)]
    pub next_marker: Option<String>,
    /// Objects in this page.
    #[serde(rename = "Contents", default)]
    pub contents: Vec<ObjectSummary>,
    /// Rolled-up key prefixes.
    #[serde(rename = "CommonPrefixes", default)]
    pub common_prefixes: Vec<CommonPrefix>,
}

/// An object in a bucket listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ObjectSummary {
    /// Object key.
    #[serde(rename = "Key", default)]
    pub key: String,
    /// Last modification time.
    #[serde(rename = "LastModified", default)]
    pub last_modified: String,
    /// ETag, quotes included.
    #[serde(rename = "ETag", default)]
    pub etag: String,
    /// Size in bytes.
    #[serde(rename = "Size", default)]
    pub size: u64,
    /// Storage class.
    #[serde(rename = "StorageClass", default)]
    pub storage_class: Option<String>,
}

/// A `<CommonPrefixes>` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CommonPrefix {
    /// Prefix up to and including the delimiter.
    #[serde(rename = "Prefix", default)]
    pub prefix: String,
}

/// `<LocationConstraint>` returned by `GET Bucket location`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationConstraint {
    /// Region name.
    #[serde(rename = "$text", default)]
    pub location: String,
}

/// `<AccessControlPolicy>` returned by bucket and object ACL reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessControlPolicy {
    /// Owner of the bucket or object.
    #[serde(rename = "Owner", default)]
    pub owner: Owner,
    /// Grants.
    #[serde(rename = "AccessControlList", default)]
    pub access_control_list: AccessControlList,
}

impl AccessControlPolicy {
    /// Every grant, owner grant included.
    pub fn grants(&self) -> &[Grant] {
        &self.access_control_list.grants
    }
}

/// `<AccessControlList>` wrapper.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessControlList {
    /// One entry per grant.
    #[serde(rename = "Grant", default)]
    pub grants: Vec<Grant>,
}

/// `<InitiateMultipartUploadResult>`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InitiateMultipartUploadResult {
    /// Bucket label.
    #[serde(rename = "Bucket", default)]
    pub bucket: String,
    /// Object key of the upload.
    #[serde(rename = "Key", default)]
    pub key: String,
    /// Id to pass to every later call on this upload.
    #[serde(rename = "UploadId", default)]
    pub upload_id: String,
}

/// `<CompleteMultipartUploadResult>`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompleteMultipartUploadResult {
    /// Object URL without scheme.
    #[serde(rename = "Location", default)]
    pub location: String,
    /// Bucket label.
    #[serde(rename = "Bucket", default)]
    pub bucket: String,
    /// Object key.
    #[serde(rename = "Key", default)]
    pub key: String,
    /// ETag of the assembled object.
    #[serde(rename = "ETag", default)]
    pub etag: String,
}

/// `<ListMultipartUploadsResult>`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMultipartUploadsResult {
    /// Bucket label.
    #[serde(rename = "Bucket", default)]
    pub bucket: String,
    /// Prefix the listing was filtered by.
    #[serde(rename = "Prefix", default)]
    pub prefix: Option<String>,
    /// Key the listing started after.
    #[serde(rename = "KeyMarker", default)]
    pub key_marker: Option<String>,
    /// Upload id the listing started after.
    #[serde(rename = "UploadIdMarker", default)]
    pub upload_id_marker: Option<String>,
    /// Key marker for the next page, when truncated.
    #[serde(rename = "NextKeyMarker", default)]
    pub next_key_marker: Option<String>,
    /// Upload id marker for the next page, when truncated.
    #[serde(rename = "NextUploadIdMarker", default)]
    pub next_upload_id_marker: Option<String>,
    /// Page size asked for.
    #[serde(rename = "MaxUploads", default)]
    pub max_uploads: Option<u32>,
    /// More uploads follow this page.
    #[serde(rename = "IsTruncated", default)]
    pub is_truncated: bool,
    /// Uploads in this page.
    #[serde(rename = "Upload", default)]
    pub uploads: Vec<UploadSummary>,
}

impl ListMultipartUploadsResult {
    /// Whether an upload with this key and id is in progress.
    pub fn contains(&self, key: &str, upload_id: &str) -> bool {
        self.uploads
            .iter()
            .any(|u| u.key == key && u.upload_id == upload_id)
    }
}

/// An in-progress upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UploadSummary {
    /// Object key.
    #[serde(rename = "Key", default)]
    pub key: String,
    /// Upload id.
    #[serde(rename = "UploadId", default)]
    pub upload_id: String,
    /// Storage class of the assembled object.
    #[serde(rename = "StorageClass", default)]
    pub storage_class: Option<String>,
    /// When the upload was initiated.
    #[serde(rename = "Initiated", default)]
    pub initiated: Option<String>,
}

/// `<ListPartsResult>`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPartsResult {
    /// Bucket label.
    #[serde(rename = "Bucket", default)]
    pub bucket: String,
    /// Object key.
    #[serde(rename = "Key", default)]
    pub key: String,
    /// Upload id.
    #[serde(rename = "UploadId", default)]
    pub upload_id: String,
    /// More parts follow this page.
    #[serde(rename = "IsTruncated", default)]
    pub is_truncated: bool,
    /// Parts uploaded so far.
    #[serde(rename = "Part", default)]
    pub parts: Vec<PartSummary>,
}

/// A part in a part listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PartSummary {
    /// Part number.
    #[serde(rename = "PartNumber", default)]
    pub part_number: u32,
    /// ETag, quotes included.
    #[serde(rename = "ETag", default)]
    pub etag: String,
    /// Size in bytes.
    #[serde(rename = "Size", default)]
    pub size: u64,
    /// Upload time.
    #[serde(rename = "LastModified", default)]
    pub last_modified: Option<String>,
}

/// `<CopyObjectResult>`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CopyObjectResult {
    /// ETag of the new object.
    #[serde(rename = "ETag", default)]
    pub etag: String,
    /// Modification time of the new object.
    #[serde(rename = "LastModified", default)]
    pub last_modified: Option<String>,
}

/// Output of a call whose only result is the HTTP exchange itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseMeta {
    /// HTTP status.
    pub status: u16,
    /// `x-cos-request-id`.
    pub request_id: Option<String>,
}

/// Output of put object (and put object from file).
#[derive(Debug, Clone, Default)]
pub struct PutObjectOutput {
    /// ETag of the stored object.
    pub etag: Option<String>,
    /// Present when the bucket has versioning enabled.
    pub version_id: Option<String>,
    /// `x-cos-request-id`.
    pub request_id: Option<String>,
}

/// Output of head object.
#[derive(Debug, Clone, Default)]
pub struct HeadObjectOutput {
    /// Object size in bytes.
    pub content_length: Option<u64>,
    /// Content type.
    pub content_type: Option<String>,
    /// ETag, quotes included.
    pub etag: Option<String>,
    /// Last modification time.
    pub last_modified: Option<String>,
    /// `x-cos-storage-class`; absent for `STANDARD`.
    pub storage_class: Option<String>,
    /// Version id, on versioned buckets.
    pub version_id: Option<String>,
    /// `x-cos-restore` status of an archived object.
    pub restore: Option<String>,
    /// `x-cos-request-id`.
    pub request_id: Option<String>,
}

/// Output of get object.
#[derive(Debug, Clone)]
pub struct GetObjectOutput {
    /// Object content.
    pub body: Bytes,
    /// `content-length` header.
    pub content_length: Option<u64>,
    /// Content type.
    pub content_type: Option<String>,
    /// ETag, quotes included.
    pub etag: Option<String>,
    /// Version id, on versioned buckets.
    pub version_id: Option<String>,
    /// `x-cos-request-id`.
    pub request_id: Option<String>,
}

/// Output of get object to a local file.
#[derive(Debug, Clone, Default)]
pub struct GetObjectToFileOutput {
    /// Bytes written to the file.
    pub bytes_written: u64,
    /// ETag, quotes included.
    pub etag: Option<String>,
    /// `x-cos-request-id`.
    pub request_id: Option<String>,
}

/// Output of copy object.
#[derive(Debug, Clone, Default)]
pub struct CopyObjectOutput {
    /// Parsed `<CopyObjectResult>`.
    pub result: CopyObjectResult,
    /// Version id of the copy, on versioned buckets.
    pub version_id: Option<String>,
    /// `x-cos-request-id`.
    pub request_id: Option<String>,
}

/// Output of upload part.
#[derive(Debug, Clone, Default)]
pub struct UploadPartOutput {
    /// Taken from the `ETag` response header.
    pub etag: String,
    /// `x-cos-request-id`.
    pub request_id: Option<String>,
}

/// Output of complete multipart upload.
#[derive(Debug, Clone, Default)]
pub struct CompleteMultipartUploadOutput {
    /// Parsed `<CompleteMultipartUploadResult>`.
    pub result: CompleteMultipartUploadResult,
    /// Version id of the assembled object, on versioned buckets.
    pub version_id: Option<String>,
    /// `x-cos-request-id`.
    pub request_id: Option<String>,
}
