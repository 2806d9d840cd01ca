//! Offline test doubles.
//!
//! `MockTransport` answers from a queue of canned responses and records every
//! request; `TestFixtures` provides COS response bodies and ready-made clients.

mod signer;
mod transport;

pub use signer::{MockSigner, MOCK_AUTHORIZATION};
pub use transport::{MockResponse, MockTransport, Responder};

use crate::client::{CosClientBuilder, CosClientImpl};
use crate::config::CosConfig;
use crate::credentials::{CosCredentials, StaticCredentialsProvider};
use crate::error::CosError;
use std::collections::HashMap;
use std::sync::Arc;

/// Example key pair used throughout the tests.
pub const MOCK_SECRET_ID: &str = "AKIDEXAMPLEEXAMPLEEXAMPLEEXAMPLE";
/// Secret half of the example key pair.
pub const MOCK_SECRET_KEY: &str = "EXAMPLEKEYEXAMPLEKEYEXAMPLEKEY12";

/// Bucket URL used by the fixtures.
pub const TEST_BUCKET_URL: &str = "http://examplebucket-1250000000.cos.ap-guangzhou.myqcloud.com";

/// Test fixtures for COS operations.
pub struct TestFixtures;

impl TestFixtures {
    /// Configuration bound to [`TEST_BUCKET_URL`] with static example keys.
    pub fn config() -> Result<CosConfig, CosError> {
        CosConfig::builder()
            .bucket_url(TEST_BUCKET_URL)
            .credentials_provider(Arc::new(StaticCredentialsProvider::new(
                CosCredentials::new(MOCK_SECRET_ID, MOCK_SECRET_KEY),
            )))
            .build()
    }

    /// Client that signs with the real signer and sends through `transport`.
    pub fn client(transport: Arc<MockTransport>) -> Result<CosClientImpl, CosError> {
        CosClientBuilder::new()
            .config(Self::config()?)
            .transport(transport)
            .build()
    }

    /// `<Error>` body.
    pub fn error_xml(code: &str, message: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<Error>
    <Code>{}</Code>
    <Message>{}</Message>
    <Resource>examplebucket-1250000000.cos.ap-guangzhou.myqcloud.com</Resource>
    <RequestId>NjVhNGYxYmJfMTQ4NzM1MGJf</RequestId>
    <TraceId>OGVmYzZiMmQzYjA2OWNhODk0NTRkMTBiOWVmMDAxODc0OWRkZjk0ZDM1NmI1M2E2MTRlY2MzZDhmNmI5MWI1OTBjYzE2MjAxN2M1MzJiOTdkZjMxMDVlYTZjN2FiMmI0NTk3NWFiNjAyMzdjM2Q4NmQ2NmE1ZTI2NDM2YjZhY2Y=</TraceId>
</Error>"#,
            code, message
        )
    }

    /// `GET Service` body listing two buckets.
    pub fn list_buckets_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ListAllMyBucketsResult>
    <Owner>
        <ID>qcs::cam::uin/100000000001:uin/100000000001</ID>
        <DisplayName>100000000001</DisplayName>
    </Owner>
    <Buckets>
        <Bucket>
            <Name>examplebucket-1250000000</Name>
            <Location>ap-guangzhou</Location>
            <CreationDate>2024-01-01T00:00:00Z</CreationDate>
        </Bucket>
        <Bucket>
            <Name>logs-1250000000</Name>
            <Location>ap-beijing</Location>
            <CreationDate>2024-01-02T00:00:00Z</CreationDate>
        </Bucket>
    </Buckets>
</ListAllMyBucketsResult>"#
    }

    /// `GET Bucket` body with two objects under `中文`.
    pub fn list_objects_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ListBucketResult>
    <Name>examplebucket-1250000000</Name>
    <Prefix>中文</Prefix>
    <Marker/>
    <MaxKeys>3</MaxKeys>
    <IsTruncated>false</IsTruncated>
    <Contents>
        <Key>中文1.txt</Key>
        <LastModified>2024-01-15T10:30:00.000Z</LastModified>
        <ETag>"098f6bcd4621d373cade4e832627b4f6"</ETag>
        <Size>4</Size>
        <StorageClass>STANDARD</StorageClass>
    </Contents>
    <Contents>
        <Key>中文2.txt</Key>
        <LastModified>2024-01-16T11:30:00.000Z</LastModified>
        <ETag>"098f6bcd4621d373cade4e832627b4f6"</ETag>
        <Size>4</Size>
        <StorageClass>STANDARD_IA</StorageClass>
    </Contents>
</ListBucketResult>"#
    }

    /// `GET Bucket location` body.
    pub fn location_xml(region: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<LocationConstraint>{}</LocationConstraint>"#,
            region
        )
    }

    /// ACL body with the owner grant, plus an anonymous read grant when
    /// `public_read` is set.
    pub fn acl_xml(public_read: bool) -> String {
        let anonymous = if public_read {
            r#"
        <Grant>
            <Grantee xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:type="Group">
                <URI>http://cam.qcloud.com/groups/global/AllUsers</URI>
            </Grantee>
            <Permission>READ</Permission>
        </Grant>"#
        } else {
            ""
        };
        format!(
            r#"<AccessControlPolicy>
    <Owner>
        <ID>qcs::cam::uin/100000000001:uin/100000000001</ID>
        <DisplayName>qcs::cam::uin/100000000001:uin/100000000001</DisplayName>
    </Owner>
    <AccessControlList>
        <Grant>
            <Grantee xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:type="CanonicalUser">
                <ID>qcs::cam::uin/100000000001:uin/100000000001</ID>
                <DisplayName>qcs::cam::uin/100000000001:uin/100000000001</DisplayName>
            </Grantee>
            <Permission>FULL_CONTROL</Permission>
        </Grant>{}
    </AccessControlList>
</AccessControlPolicy>"#,
            anonymous
        )
    }

    /// CORS body with one rule.
    pub fn cors_xml() -> &'static str {
        r#"<CORSConfiguration>
    <CORSRule>
        <AllowedOrigin>http://www.qq.com</AllowedOrigin>
        <AllowedMethod>PUT</AllowedMethod>
        <AllowedMethod>GET</AllowedMethod>
        <AllowedHeader>x-cos-meta-test</AllowedHeader>
        <AllowedHeader>x-cos-xx</AllowedHeader>
        <ExposeHeader>x-cos-meta-test1</ExposeHeader>
        <MaxAgeSeconds>500</MaxAgeSeconds>
    </CORSRule>
</CORSConfiguration>"#
    }

    /// Versioning body with the given status.
    pub fn versioning_xml(status: &str) -> String {
        format!(
            "<VersioningConfiguration><Status>{}</Status></VersioningConfiguration>",
            status
        )
    }

    /// Replication body with one rule.
    pub fn replication_xml(role: &str, status: &str, destination: &str) -> String {
        format!(
            r#"<ReplicationConfiguration>
    <Role>{}</Role>
    <Rule>
        <ID>1</ID>
        <Status>{}</Status>
        <Prefix></Prefix>
        <Destination>
            <Bucket>{}</Bucket>
        </Destination>
    </Rule>
</ReplicationConfiguration>"#,
            role, status, destination
        )
    }

    /// Inventory body as the service echoes it (lowercase `IsEnabled`).
    pub fn inventory_xml(id: &str, destination: &str) -> String {
        format!(
            r#"<InventoryConfiguration>
    <Id>{}</Id>
    <IsEnabled>true</IsEnabled>
    <Destination>
        <COSBucketDestination>
            <Format>CSV</Format>
            <Bucket>{}</Bucket>
        </COSBucketDestination>
    </Destination>
    <Schedule>
        <Frequency>Daily</Frequency>
    </Schedule>
    <Filter>
        <Prefix>test</Prefix>
    </Filter>
    <IncludedObjectVersions>All</IncludedObjectVersions>
    <OptionalFields>
        <Field>Size</Field>
        <Field>LastModifiedDate</Field>
    </OptionalFields>
</InventoryConfiguration>"#,
            id, destination
        )
    }

    /// Logging body targeting `target_bucket`.
    pub fn logging_xml(target_bucket: &str) -> String {
        format!(
            r#"<BucketLoggingStatus>
    <LoggingEnabled>
        <TargetBucket>{}</TargetBucket>
        <TargetPrefix></TargetPrefix>
    </LoggingEnabled>
</BucketLoggingStatus>"#,
            target_bucket
        )
    }

    /// Lifecycle body with one transition rule.
    pub fn lifecycle_xml() -> &'static str {
        r#"<LifecycleConfiguration>
    <Rule>
        <ID>1234</ID>
        <Filter>
            <Prefix>test</Prefix>
        </Filter>
        <Status>Enabled</Status>
        <Transition>
            <Days>10</Days>
            <StorageClass>Standard</StorageClass>
        </Transition>
    </Rule>
</LifecycleConfiguration>"#
    }

    /// Initiate multipart upload body.
    pub fn initiate_multipart_xml(key: &str, upload_id: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<InitiateMultipartUploadResult>
    <Bucket>examplebucket-1250000000</Bucket>
    <Key>{}</Key>
    <UploadId>{}</UploadId>
</InitiateMultipartUploadResult>"#,
            key, upload_id
        )
    }

    /// List multipart uploads body with a single upload.
    pub fn list_multipart_uploads_xml(key: &str, upload_id: &str) -> String {
        format!(
            r#"<ListMultipartUploadsResult>
    <Bucket>examplebucket-1250000000</Bucket>
    <IsTruncated>false</IsTruncated>
    <Upload>
        <Key>{}</Key>
        <UploadId>{}</UploadId>
        <StorageClass>STANDARD</StorageClass>
        <Initiated>2024-01-15T10:30:00.000Z</Initiated>
    </Upload>
</ListMultipartUploadsResult>"#,
            key, upload_id
        )
    }

    /// Complete multipart upload body.
    pub fn complete_multipart_xml(key: &str) -> String {
        format!(
            r#"<CompleteMultipartUploadResult>
    <Location>examplebucket-1250000000.cos.ap-guangzhou.myqcloud.com/{0}</Location>
    <Bucket>examplebucket-1250000000</Bucket>
    <Key>{0}</Key>
    <ETag>"3a0f1fd698c235af9cf098cb74aa25bc-2"</ETag>
</CompleteMultipartUploadResult>"#,
            key
        )
    }

    /// Copy object body.
    pub fn copy_result_xml() -> &'static str {
        r#"<CopyObjectResult>
    <ETag>"098f6bcd4621d373cade4e832627b4f6"</ETag>
    <LastModified>2024-01-15T10:30:00Z</LastModified>
</CopyObjectResult>"#
    }

    /// Headers of a successful PUT object.
    pub fn put_object_headers(version_id: Option<&str>) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert("etag".to_string(), "\"098f6bcd4621d373cade4e832627b4f6\"".to_string());
        headers.insert("x-cos-request-id".to_string(), "NjVhNGYxYmJfMTQ4NzM1MGJf".to_string());
        if let Some(version_id) = version_id {
            headers.insert("x-cos-version-id".to_string(), version_id.to_string());
        }
        headers
    }
}
