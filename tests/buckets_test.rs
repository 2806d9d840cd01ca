//! Integration tests for BucketsService.

use cos::error::ServiceErrorKind;
use cos::mocks::{MockResponse, MockSigner, MockTransport, TestFixtures};
use cos::services::BucketsService;
use cos::types::*;
use cos::CosError;
use std::sync::Arc;
use url::Url;

fn create_test_service_with_transport(transport: Arc<MockTransport>) -> BucketsService {
    let config = Arc::new(TestFixtures::config().unwrap());
    let signer = Arc::new(MockSigner::new());
    BucketsService::new(config, transport, signer)
}

fn last_url(transport: &MockTransport) -> Url {
    Url::parse(&transport.last_request().unwrap().url).unwrap()
}

#[tokio::test]
async fn test_put_bucket_with_acl() {
    let transport = Arc::new(MockTransport::with_responses(vec![
        MockResponse::ok().with_header("x-cos-request-id", "req-1"),
    ]));
    let service = create_test_service_with_transport(transport.clone());

    let request = PutBucketRequest::new().with_acl(CannedAcl::PublicRead);
    let meta = service.put(&request).await.unwrap();
    assert_eq!(meta.status, 200);
    assert_eq!(meta.request_id.as_deref(), Some("req-1"));

    let recorded = transport.last_request().unwrap();
    assert_eq!(recorded.method, "PUT");
    assert_eq!(recorded.get_header("x-cos-acl"), Some("public-read"));
    assert_eq!(recorded.get_header("content-length"), Some("0"));
    assert!(recorded.get_header("authorization").is_some());
    assert_eq!(last_url(&transport).path(), "/");
}

#[tokio::test]
async fn test_put_bucket_already_owned() {
    let transport = Arc::new(MockTransport::with_responses(vec![
        MockResponse::cos_error(409, "BucketAlreadyOwnedByYou"),
    ]));
    let service = create_test_service_with_transport(transport);

    let err = service.put(&PutBucketRequest::new()).await.unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(err.code(), Some("BucketAlreadyOwnedByYou"));
    assert_eq!(err.kind(), Some(ServiceErrorKind::BucketAlreadyOwnedByYou));
    assert_eq!(err.request_id(), Some("NjVhNGYxYmJfMTQ4NzM1MGJf"));
}

#[tokio::test]
async fn test_head_missing_bucket_is_not_found() {
    let transport = Arc::new(MockTransport::with_responses(vec![
        MockResponse::status(404),
        MockResponse::status(404),
    ]));
    let service = create_test_service_with_transport(transport.clone());

    let err = service.head().await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.code(), None);
    assert_eq!(err.kind(), Some(ServiceErrorKind::NotFound));

    assert!(!service.exists().await.unwrap());
    assert_eq!(transport.request(0).unwrap().method, "HEAD");
}

#[tokio::test]
async fn test_list_objects_with_prefix() {
    let transport = Arc::new(MockTransport::with_responses(vec![
        MockResponse::ok_with_body(TestFixtures::list_objects_xml()),
    ]));
    let service = create_test_service_with_transport(transport.clone());

    let request = ListObjectsRequest::new().with_prefix("中文").with_max_keys(3);
    let result = service.list_objects(&request).await.unwrap();

    assert_eq!(result.name, "examplebucket-1250000000");
    assert_eq!(result.contents.len(), 2);
    assert_eq!(result.contents[0].key, "中文1.txt");
    assert_eq!(result.contents[1].storage_class.as_deref(), Some("STANDARD_IA"));
    assert!(!result.is_truncated);

    let url = last_url(&transport);
    assert_eq!(url.query(), Some("prefix=%E4%B8%AD%E6%96%87&max-keys=3"));
}

#[tokio::test]
async fn test_get_location() {
    let transport = Arc::new(MockTransport::with_responses(vec![
        MockResponse::ok_with_body(TestFixtures::location_xml("ap-guangzhou")),
    ]));
    let service = create_test_service_with_transport(transport.clone());

    assert_eq!(service.get_location().await.unwrap(), "ap-guangzhou");
    assert_eq!(last_url(&transport).query(), Some("location"));
}

#[tokio::test]
async fn test_put_acl_sends_raw_value() {
    let transport = Arc::new(MockTransport::with_responses(vec![
        MockResponse::cos_error(400, "InvalidArgument"),
    ]));
    let service = create_test_service_with_transport(transport.clone());

    let err = service
        .put_acl(&AclHeaders::raw("public-read-writ"))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(400));
    assert_eq!(err.kind(), Some(ServiceErrorKind::InvalidArgument));

    let recorded = transport.last_request().unwrap();
    assert_eq!(recorded.get_header("x-cos-acl"), Some("public-read-writ"));
    assert_eq!(last_url(&transport).query(), Some("acl"));
}

#[tokio::test]
async fn test_get_acl_grants() {
    let transport = Arc::new(MockTransport::with_responses(vec![
        MockResponse::ok_with_body(TestFixtures::acl_xml(false)),
        MockResponse::ok_with_body(TestFixtures::acl_xml(true)),
    ]));
    let service = create_test_service_with_transport(transport);

    let private = service.get_acl().await.unwrap();
    assert_eq!(private.grants().len(), 1);
    assert_eq!(private.grants()[0].permission, "FULL_CONTROL");

    let public = service.get_acl().await.unwrap();
    assert_eq!(public.grants().len(), 2);
    assert_eq!(
        public.grants()[1].grantee.uri.as_deref(),
        Some("http://cam.qcloud.com/groups/global/AllUsers")
    );
}

#[tokio::test]
async fn test_put_cors_sends_xml_with_md5() {
    let transport = Arc::new(MockTransport::with_responses(vec![MockResponse::ok()]));
    let service = create_test_service_with_transport(transport.clone());

    let config = CorsConfiguration {
        rules: vec![CorsRule {
            allowed_origins: vec!["http://www.qq.com".to_string()],
            allowed_methods: vec!["PUT".to_string(), "GET".to_string()],
            max_age_seconds: Some(500),
            ..Default::default()
        }],
    };
    service.put_cors(&config).await.unwrap();

    let recorded = transport.last_request().unwrap();
    let body = String::from_utf8(recorded.body.clone().unwrap().to_vec()).unwrap();
    assert!(body.contains("<AllowedOrigin>http://www.qq.com</AllowedOrigin>"));
    assert_eq!(recorded.get_header("content-type"), Some("application/xml"));
    assert!(recorded.get_header("content-md5").is_some());
    assert_eq!(
        recorded.get_header("content-length"),
        Some(body.len().to_string().as_str())
    );
    assert_eq!(last_url(&transport).query(), Some("cors"));
}

#[tokio::test]
async fn test_get_and_delete_cors() {
    let transport = Arc::new(MockTransport::with_responses(vec![
        MockResponse::ok_with_body(TestFixtures::cors_xml()),
        MockResponse::no_content(),
    ]));
    let service = create_test_service_with_transport(transport.clone());

    let cors = service.get_cors().await.unwrap();
    assert_eq!(cors.rules.len(), 1);
    assert_eq!(cors.rules[0].expose_headers, vec!["x-cos-meta-test1"]);

    let meta = service.delete_cors().await.unwrap();
    assert_eq!(meta.status, 204);
    assert_eq!(transport.last_request().unwrap().method, "DELETE");
}

#[tokio::test]
async fn test_versioning_round_trip() {
    let transport = Arc::new(MockTransport::with_responses(vec![
        MockResponse::ok(),
        MockResponse::ok_with_body(TestFixtures::versioning_xml("Enabled")),
    ]));
    let service = create_test_service_with_transport(transport.clone());

    service
        .put_versioning(&VersioningConfiguration::enabled())
        .await
        .unwrap();
    let sent = transport.request(0).unwrap();
    assert_eq!(
        &sent.body.unwrap()[..],
        b"<VersioningConfiguration><Status>Enabled</Status></VersioningConfiguration>"
    );

    let versioning = service.get_versioning().await.unwrap();
    assert_eq!(versioning.status.as_deref(), Some(VersioningConfiguration::ENABLED));
}

#[tokio::test]
async fn test_get_replication() {
    let transport = Arc::new(MockTransport::with_responses(vec![
        MockResponse::ok_with_body(TestFixtures::replication_xml(
            "qcs::cam::uin/100000000001:uin/100000000001",
            "Enabled",
            "qcs::cos:ap-beijing::backup-1250000000",
        )),
    ]));
    let service = create_test_service_with_transport(transport.clone());

    let replication = service.get_replication().await.unwrap();
    assert_eq!(replication.role, "qcs::cam::uin/100000000001:uin/100000000001");
    assert_eq!(replication.rules.len(), 1);
    assert_eq!(replication.rules[0].status, "Enabled");
    assert_eq!(
        replication.rules[0].destination.bucket,
        "qcs::cos:ap-beijing::backup-1250000000"
    );
    assert_eq!(last_url(&transport).query(), Some("replication"));
}

#[tokio::test]
async fn test_inventory_addresses_configuration_by_id() {
    let transport = Arc::new(MockTransport::with_responses(vec![
        MockResponse::ok(),
        MockResponse::ok_with_body(TestFixtures::inventory_xml(
            "test1",
            "qcs::cos:ap-guangzhou::dest-1250000000",
        )),
        MockResponse::no_content(),
    ]));
    let service = create_test_service_with_transport(transport.clone());

    let config = InventoryConfiguration {
        id: "test1".to_string(),
        is_enabled: "True".to_string(),
        included_object_versions: "All".to_string(),
        ..Default::default()
    };
    service.put_inventory("test1", &config).await.unwrap();
    assert_eq!(
        Url::parse(&transport.request(0).unwrap().url).unwrap().query(),
        Some("inventory&id=test1")
    );

    let inventory = service.get_inventory("test1").await.unwrap();
    assert_eq!(inventory.id, "test1");
    assert_eq!(inventory.is_enabled, "true");
    assert!(inventory.enabled());
    assert_eq!(
        inventory.destination.bucket_destination.bucket,
        "qcs::cos:ap-guangzhou::dest-1250000000"
    );

    service.delete_inventory("test1").await.unwrap();
    assert_eq!(last_url(&transport).query(), Some("inventory&id=test1"));
}

#[tokio::test]
async fn test_get_logging() {
    let transport = Arc::new(MockTransport::with_responses(vec![
        MockResponse::ok_with_body(TestFixtures::logging_xml("logs-1250000000")),
    ]));
    let service = create_test_service_with_transport(transport);

    let logging = service.get_logging().await.unwrap();
    assert_eq!(
        logging.logging_enabled.unwrap().target_bucket,
        "logs-1250000000"
    );
}

#[tokio::test]
async fn test_lifecycle_missing_is_not_found() {
    let transport = Arc::new(MockTransport::with_responses(vec![
        MockResponse::ok_with_body(TestFixtures::lifecycle_xml()),
        MockResponse::cos_error(404, "NoSuchLifecycleConfiguration"),
    ]));
    let service = create_test_service_with_transport(transport);

    let lifecycle = service.get_lifecycle().await.unwrap();
    let rule = &lifecycle.rules[0];
    assert_eq!(rule.id.as_deref(), Some("1234"));
    assert_eq!(rule.transition.as_ref().unwrap().days, Some(10));

    let err = service.get_lifecycle().await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.kind(), Some(ServiceErrorKind::NoSuchConfiguration));
}

#[tokio::test]
async fn test_list_multipart_uploads() {
    let transport = Arc::new(MockTransport::with_responses(vec![
        MockResponse::ok_with_body(TestFixtures::list_multipart_uploads_xml(
            "big.bin", "upload-1",
        )),
    ]));
    let service = create_test_service_with_transport(transport.clone());

    let request = ListMultipartUploadsRequest::new().with_prefix("big");
    let uploads = service.list_multipart_uploads(&request).await.unwrap();
    assert!(uploads.contains("big.bin", "upload-1"));
    assert!(!uploads.contains("big.bin", "upload-2"));
    assert_eq!(last_url(&transport).query(), Some("uploads&prefix=big"));
}

#[tokio::test]
async fn test_malformed_body_is_response_error() {
    let transport = Arc::new(MockTransport::with_responses(vec![
        MockResponse::ok_with_body("not xml at all"),
    ]));
    let service = create_test_service_with_transport(transport);

    let err = service.get_acl().await.unwrap_err();
    assert!(matches!(err, CosError::Response(_)));
}
