//! Bucket sub-resource configuration documents.
//!
//! Each type here is both the body of a `PUT ?<subresource>` request and the
//! parsed body of the matching `GET`.

use serde::{Deserialize, Serialize};

/// `<CORSConfiguration>` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "CORSConfiguration")]
pub struct CorsConfiguration {
    /// CORS rules, matched in order.
    #[serde(rename = "CORSRule", default)]
    pub rules: Vec<CorsRule>,
}

/// A single CORS rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorsRule {
    /// Optional rule id.
    #[serde(rename = "ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Origins allowed to make cross-origin requests; `*` matches any.
    #[serde(rename = "AllowedOrigin", default)]
    pub allowed_origins: Vec<String>,
    /// Methods allowed, such as `PUT` and `GET`.
    #[serde(rename = "AllowedMethod", default)]
    pub allowed_methods: Vec<String>,
    /// Request headers a preflight may ask for.
    #[serde(rename = "AllowedHeader", default)]
    pub allowed_headers: Vec<String>,
    /// How long a browser may cache the preflight answer.
    #[serde(
        rename = "MaxAgeSeconds",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub max_age_seconds: Option<u32>,
    /// Response headers exposed to the browser.
    #[serde(rename = "ExposeHeader", default)]
    pub expose_headers: Vec<String>,
}

/// `<VersioningConfiguration>` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "VersioningConfiguration")]
pub struct VersioningConfiguration {
    /// `Enabled` or `Suspended`; absent on a bucket that never had versioning.
    #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl VersioningConfiguration {
    /// Versioning is on.
    pub const ENABLED: &'static str = "Enabled";
    /// Versioning was on and is paused.
    pub const SUSPENDED: &'static str = "Suspended";

    /// Document turning versioning on.
    pub fn enabled() -> Self {
        Self {
            status: Some(Self::ENABLED.to_string()),
        }
    }

    /// Document pausing versioning.
    pub fn suspended() -> Self {
        Self {
            status: Some(Self::SUSPENDED.to_string()),
        }
    }
}

/// `<ReplicationConfiguration>` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "ReplicationConfiguration")]
pub struct ReplicationConfiguration {
    /// CAM role COS assumes to write into the destination.
    #[serde(rename = "Role", default)]
    pub role: String,
    /// Replication rules.
    #[serde(rename = "Rule", default)]
    pub rules: Vec<ReplicationRule>,
}

/// A replication rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicationRule {
    /// Rule id.
    #[serde(rename = "ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// `Enabled` or `Disabled`.
    #[serde(rename = "Status", default)]
    pub status: String,
    /// Empty prefix replicates the whole bucket.
    #[serde(rename = "Prefix", default)]
    pub prefix: String,
    /// Where matching objects are copied.
    #[serde(rename = "Destination", default)]
    pub destination: ReplicationDestination,
}

/// Replication target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicationDestination {
    /// Resource name, e.g. `qcs::cos:ap-beijing::examplebucket-1250000000`.
    #[serde(rename = "Bucket", default)]
    pub bucket: String,
    /// Storage class of the replicas; the source class when absent.
    #[serde(
        rename = "StorageClass",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub storage_class: Option<String>,
}

/// `<InventoryConfiguration>` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "InventoryConfiguration")]
pub struct InventoryConfiguration {
    /// Inventory id; also the `id` query parameter.
    #[serde(rename = "Id", default)]
    pub id: String,
    /// `True` or `False`. The service echoes it back lowercased.
    #[serde(rename = "IsEnabled", default)]
    pub is_enabled: String,
    /// Where reports are written.
    #[serde(rename = "Destination", default)]
    pub destination: InventoryDestination,
    /// How often reports are produced.
    #[serde(rename = "Schedule", default)]
    pub schedule: InventorySchedule,
    /// Restricts the report to a key prefix.
    #[serde(rename = "Filter", default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<InventoryFilter>,
    /// `All` or `Current`.
    #[serde(rename = "IncludedObjectVersions", default)]
    pub included_object_versions: String,
    /// Extra columns in the report.
    #[serde(
        rename = "OptionalFields",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub optional_fields: Option<InventoryOptionalFields>,
}

impl InventoryConfiguration {
    /// Whether `IsEnabled` reads as true, ignoring case.
    pub fn enabled(&self) -> bool {
        self.is_enabled.eq_ignore_ascii_case("true")
    }
}

/// Inventory report destination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryDestination {
    /// Destination bucket and format.
    #[serde(rename = "COSBucketDestination", default)]
    pub bucket_destination: InventoryBucketDestination,
}

/// Bucket that receives inventory reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryBucketDestination {
    /// Report format, `CSV`.
    #[serde(rename = "Format", default)]
    pub format: String,
    /// Owner account of the destination bucket.
    #[serde(rename = "AccountId", default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// Resource name, e.g. `qcs::cos:ap-guangzhou::examplebucket-1250000000`.
    #[serde(rename = "Bucket", default)]
    pub bucket: String,
    /// Key prefix of the reports.
    #[serde(rename = "Prefix", default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

/// Inventory report schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySchedule {
    /// `Daily` or `Weekly`.
    #[serde(rename = "Frequency", default)]
    pub frequency: String,
}

/// Inventory object filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryFilter {
    /// Only keys with this prefix are listed.
    #[serde(rename = "Prefix", default)]
    pub prefix: String,
}

/// Optional inventory columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryOptionalFields {
    /// Column names, such as `Size` and `LastModifiedDate`.
    #[serde(rename = "Field", default)]
    pub fields: Vec<String>,
}

/// `<BucketLoggingStatus>` document. An empty status disables logging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "BucketLoggingStatus")]
pub struct BucketLoggingStatus {
    /// Where logs go; absent when logging is off.
    #[serde(
        rename = "LoggingEnabled",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub logging_enabled: Option<LoggingEnabled>,
}

/// Access log delivery target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingEnabled {
    /// Target bucket name, `<name>-<appid>`.
    #[serde(rename = "TargetBucket", default)]
    pub target_bucket: String,
    /// Key prefix of the log objects.
    #[serde(rename = "TargetPrefix", default)]
    pub target_prefix: String,
}

/// `<LifecycleConfiguration>` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "LifecycleConfiguration")]
pub struct LifecycleConfiguration {
    /// Lifecycle rules.
    #[serde(rename = "Rule", default)]
    pub rules: Vec<LifecycleRule>,
}

/// A lifecycle rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleRule {
    /// Rule id.
    #[serde(rename = "ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Objects the rule applies to.
    #[serde(rename = "Filter", default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<LifecycleFilter>,
    /// `Enabled` or `Disabled`.
    #[serde(rename = "Status", default)]
    pub status: String,
    /// Move objects to another storage class.
    #[serde(
        rename = "Transition",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub transition: Option<LifecycleTransition>,
    /// Delete objects.
    #[serde(
        rename = "Expiration",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub expiration: Option<LifecycleExpiration>,
    /// Abort uploads left incomplete.
    #[serde(
        rename = "AbortIncompleteMultipartUpload",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub abort_incomplete_multipart_upload: Option<AbortIncompleteMultipartUpload>,
}

/// Lifecycle object filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleFilter {
    /// Only keys with this prefix are affected.
    #[serde(rename = "Prefix", default)]
    pub prefix: String,
}

/// Storage class transition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleTransition {
    /// Days after creation.
    #[serde(rename = "Days", default, skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
    /// Target storage class, e.g. `Standard` or `ARCHIVE`.
    #[serde(rename = "StorageClass", default)]
    pub storage_class: String,
}

/// Object expiration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleExpiration {
    /// Days after creation.
    #[serde(rename = "Days", default, skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
}

/// Cleanup of incomplete multipart uploads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbortIncompleteMultipartUpload {
    /// Days after the upload was initiated.
    #[serde(rename = "DaysAfterInitiation")]
    pub days_after_initiation: u32,
}
