//! Fixture payloads, temp files and configuration documents.

use super::HarnessError;
use crate::types::*;
use bytes::Bytes;
use rand::RngCore;
use std::io::Write;
use tempfile::NamedTempFile;

/// Key prefix made of every printable ASCII symbol plus non-ASCII text.
pub const SPECIAL_FILE_NAME: &str = "中文→↓←→↖↗↙↘! \"#$%&'()*+,-./0123456789:;<=>@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_`abcdefghijklmnopqrstuvwxyz{|}~";

/// Misspelled canned ACL the service must reject.
pub const ILLEGAL_ACL: &str = "public-read-writ";

/// Size of the large single-request objects.
pub const TEN_MB: usize = 10 * 1024 * 1024;

/// Multipart part size.
pub const PART_SIZE: usize = 3 * 1024 * 1024;

/// Small object content used by the round-trip scenarios.
pub const SMALL_CONTENT: &[u8] = b"test";

/// `len` bytes of random lowercase hex text.
pub fn random_hex_payload(len: usize) -> Bytes {
    let mut raw = vec![0u8; (len + 1) / 2];
    rand::thread_rng().fill_bytes(&mut raw);
    let mut text = hex::encode(raw);
    text.truncate(len);
    Bytes::from(text)
}

/// Temp file holding `len` random hex bytes. The file is removed when the
/// handle drops; call [`NamedTempFile::close`] to observe removal errors.
pub fn temp_file_with_payload(len: usize) -> Result<(NamedTempFile, Bytes), HarnessError> {
    let payload = random_hex_payload(len);
    let mut file = NamedTempFile::new()?;
    file.write_all(&payload)?;
    file.flush()?;
    Ok((file, payload))
}

/// One rule allowing PUT and GET from `http://www.qq.com`.
pub fn cors_configuration() -> CorsConfiguration {
    CorsConfiguration {
        rules: vec![CorsRule {
            id: None,
            allowed_origins: vec!["http://www.qq.com".to_string()],
            allowed_methods: vec!["PUT".to_string(), "GET".to_string()],
            allowed_headers: vec!["x-cos-meta-test".to_string(), "x-cos-xx".to_string()],
            max_age_seconds: Some(500),
            expose_headers: vec!["x-cos-meta-test1".to_string()],
        }],
    }
}

/// One enabled rule replicating the whole bucket to `destination`.
pub fn replication_configuration(role: &str, destination: &str) -> ReplicationConfiguration {
    ReplicationConfiguration {
        role: role.to_string(),
        rules: vec![ReplicationRule {
            id: Some("1".to_string()),
            status: "Enabled".to_string(),
            prefix: String::new(),
            destination: ReplicationDestination {
                bucket: destination.to_string(),
                storage_class: None,
            },
        }],
    }
}

/// Id of the inventory configuration the suite writes.
pub const INVENTORY_ID: &str = "test1";

/// Daily CSV inventory of every version under `test`.
pub fn inventory_configuration(destination: &str) -> InventoryConfiguration {
    InventoryConfiguration {
        id: INVENTORY_ID.to_string(),
        is_enabled: "True".to_string(),
        destination: InventoryDestination {
            bucket_destination: InventoryBucketDestination {
                format: "CSV".to_string(),
                account_id: None,
                bucket: destination.to_string(),
                prefix: None,
            },
        },
        schedule: InventorySchedule {
            frequency: "Daily".to_string(),
        },
        filter: Some(InventoryFilter {
            prefix: "test".to_string(),
        }),
        included_object_versions: "All".to_string(),
        optional_fields: Some(InventoryOptionalFields {
            fields: vec!["Size".to_string(), "LastModifiedDate".to_string()],
        }),
    }
}

/// Access logs delivered to `target_bucket` with no key prefix.
pub fn logging_status(target_bucket: &str) -> BucketLoggingStatus {
    BucketLoggingStatus {
        logging_enabled: Some(LoggingEnabled {
            target_bucket: target_bucket.to_string(),
            target_prefix: String::new(),
        }),
    }
}

/// Id of the lifecycle rule the suite writes.
pub const LIFECYCLE_RULE_ID: &str = "1234";

/// Transition objects under `test` after ten days.
pub fn lifecycle_configuration() -> LifecycleConfiguration {
    LifecycleConfiguration {
        rules: vec![LifecycleRule {
            id: Some(LIFECYCLE_RULE_ID.to_string()),
            filter: Some(LifecycleFilter {
                prefix: "test".to_string(),
            }),
            status: "Enabled".to_string(),
            transition: Some(LifecycleTransition {
                days: Some(10),
                storage_class: "Standard".to_string(),
            }),
            expiration: None,
            abort_incomplete_multipart_upload: None,
        }],
    }
}

/// Two-day expedited restore.
pub fn restore_request() -> RestoreRequest {
    RestoreRequest::new(2, RestoreTier::Expedited)
}
