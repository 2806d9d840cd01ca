//! Offline tests for the live harness: every scenario driven through a mock
//! transport, plus setup and the teardown sweep.

use cos::harness::fixtures::{PART_SIZE, SPECIAL_FILE_NAME, TEN_MB};
use cos::harness::{scenarios, HarnessConfig, HarnessError, SuiteContext};
use cos::mocks::{MockResponse, MockTransport, TestFixtures, TEST_BUCKET_URL};
use percent_encoding::percent_decode_str;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

fn harness_config() -> HarnessConfig {
    HarnessConfig::default()
        .with_bucket_url(TEST_BUCKET_URL)
        .with_settle_delay(Duration::ZERO)
}

/// Context whose primary bucket creation succeeded; request 0 is that PUT.
async fn context(transport: &Arc<MockTransport>) -> SuiteContext {
    context_with(transport, harness_config()).await
}

async fn context_with(transport: &Arc<MockTransport>, config: HarnessConfig) -> SuiteContext {
    transport.queue_response(MockResponse::ok());
    let client = TestFixtures::client(transport.clone()).unwrap();
    SuiteContext::with_client(config, client).await.unwrap()
}

fn queue(transport: &MockTransport, responses: Vec<MockResponse>) {
    for response in responses {
        transport.queue_response(response);
    }
}

fn url_of(transport: &MockTransport, index: usize) -> Url {
    Url::parse(&transport.request(index).unwrap().url).unwrap()
}

fn is_mismatch(err: &HarnessError, expected_what: &str) -> bool {
    matches!(err, HarnessError::Mismatch { what, .. } if what == expected_what)
}

mod setup_tests {
    use super::*;

    #[tokio::test]
    async fn test_setup_creates_public_primary_bucket() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;

        let create = transport.request(0).unwrap();
        assert_eq!(create.method, "PUT");
        assert_eq!(create.get_header("x-cos-acl"), Some("public-read"));
        assert!(create.get_header("authorization").is_some());
        assert_eq!(
            url_of(&transport, 0).host_str(),
            Some("examplebucket-1250000000.cos.ap-guangzhou.myqcloud.com")
        );
        assert_eq!(ctx.endpoint().region, "ap-guangzhou");
        assert_eq!(ctx.run().as_str().len(), 8);
    }

    #[tokio::test]
    async fn test_setup_tolerates_owned_bucket() {
        let transport = Arc::new(MockTransport::with_responses(vec![
            MockResponse::cos_error(409, "BucketAlreadyOwnedByYou"),
        ]));
        let client = TestFixtures::client(transport.clone()).unwrap();

        let ctx = SuiteContext::with_client(harness_config(), client).await;
        assert!(ctx.is_ok());
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_setup_fails_when_bucket_cannot_be_created() {
        let transport = Arc::new(MockTransport::with_responses(vec![
            MockResponse::cos_error(403, "AccessDenied"),
        ]));
        let client = TestFixtures::client(transport).unwrap();

        let err = SuiteContext::with_client(harness_config(), client)
            .await
            .unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("cannot create primary bucket"));
    }

    #[tokio::test]
    async fn test_setup_rejects_non_cos_url() {
        let transport = Arc::new(MockTransport::new());
        let client = TestFixtures::client(transport.clone()).unwrap();

        let config = harness_config().with_bucket_url("http://localhost:9000");
        let err = SuiteContext::with_client(config, client).await.unwrap_err();
        assert!(matches!(err, HarnessError::Setup { .. }));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_each_context_gets_its_own_run_id() {
        let transport = Arc::new(MockTransport::new());
        let first = context(&transport).await;
        let second = context(&transport).await;
        assert_ne!(first.run().as_str(), second.run().as_str());
    }
}

mod teardown_tests {
    use super::*;

    #[tokio::test]
    async fn test_teardown_without_sweep_sends_nothing() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;

        ctx.teardown().await.unwrap();
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_teardown_sweep_only_touches_this_run() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context_with(&transport, harness_config().with_sweep_on_teardown(true)).await;
        let run = ctx.run().as_str().to_string();

        queue(
            &transport,
            vec![
                MockResponse::ok_with_body(format!(
                    "<ListMultipartUploadsResult><IsTruncated>false</IsTruncated>\
                     <Upload><Key>test_multipart-{0}</Key><UploadId>u-mine</UploadId></Upload>\
                     <Upload><Key>someone-else</Key><UploadId>u-other</UploadId></Upload>\
                     </ListMultipartUploadsResult>",
                    run
                )),
                MockResponse::no_content(),
                MockResponse::ok_with_body(format!(
                    "<ListBucketResult><IsTruncated>true</IsTruncated><NextMarker>m1</NextMarker>\
                     <Contents><Key>a-{0}</Key></Contents>\
                     <Contents><Key>b-other</Key></Contents>\
                     </ListBucketResult>",
                    run
                )),
                MockResponse::no_content(),
                MockResponse::ok_with_body(format!(
                    "<ListBucketResult><IsTruncated>false</IsTruncated>\
                     <Contents><Key>c-{0}</Key></Contents>\
                     </ListBucketResult>",
                    run
                )),
                MockResponse::no_content(),
            ],
        );

        ctx.teardown().await.unwrap();
        assert_eq!(transport.request_count(), 7);

        let abort = transport.request(2).unwrap();
        assert_eq!(abort.method, "DELETE");
        assert_eq!(url_of(&transport, 2).query(), Some("uploadId=u-mine"));

        assert_eq!(url_of(&transport, 3).query(), Some("max-keys=1000"));
        assert_eq!(transport.request(4).unwrap().method, "DELETE");
        assert_eq!(url_of(&transport, 4).path(), format!("/a-{}", run));
        assert!(url_of(&transport, 5).query().unwrap().contains("marker=m1"));
        assert_eq!(url_of(&transport, 6).path(), format!("/c-{}", run));
    }

    #[tokio::test]
    async fn test_teardown_sweep_pages_through_uploads() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context_with(&transport, harness_config().with_sweep_on_teardown(true)).await;
        let run = ctx.run().as_str().to_string();

        queue(
            &transport,
            vec![
                MockResponse::ok_with_body(
                    "<ListMultipartUploadsResult><IsTruncated>true</IsTruncated>\
                     <NextKeyMarker>other-key</NextKeyMarker>\
                     <NextUploadIdMarker>u-other</NextUploadIdMarker>\
                     <Upload><Key>other-key</Key><UploadId>u-other</UploadId></Upload>\
                     </ListMultipartUploadsResult>",
                ),
                MockResponse::ok_with_body(format!(
                    "<ListMultipartUploadsResult><IsTruncated>false</IsTruncated>\
                     <Upload><Key>test_multipart-{0}</Key><UploadId>u-late</UploadId></Upload>\
                     </ListMultipartUploadsResult>",
                    run
                )),
                MockResponse::no_content(),
                MockResponse::ok_with_body(
                    "<ListBucketResult><IsTruncated>false</IsTruncated></ListBucketResult>",
                ),
            ],
        );

        ctx.teardown().await.unwrap();
        assert_eq!(transport.request_count(), 5);

        assert_eq!(url_of(&transport, 1).query(), Some("uploads"));
        assert_eq!(
            url_of(&transport, 2).query(),
            Some("uploads&key-marker=other-key&upload-id-marker=u-other")
        );
        assert_eq!(transport.request(3).unwrap().method, "DELETE");
        assert_eq!(url_of(&transport, 3).query(), Some("uploadId=u-late"));
        assert_eq!(url_of(&transport, 4).query(), Some("max-keys=1000"));
    }

    #[tokio::test]
    async fn test_teardown_sweep_reports_listing_failure() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context_with(&transport, harness_config().with_sweep_on_teardown(true)).await;
        transport.queue_response(MockResponse::cos_error(403, "AccessDenied"));

        let err = ctx.teardown().await.unwrap_err();
        assert!(matches!(err, HarnessError::Cos { ref operation, .. } if operation == "ListMultipartUploads"));
        assert!(!err.is_fatal());
    }
}

mod bucket_scenario_tests {
    use super::*;

    #[tokio::test]
    async fn test_get_service() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        transport.queue_response(MockResponse::ok_with_body(TestFixtures::list_buckets_xml()));

        scenarios::get_service(&ctx).await.unwrap();
        assert_eq!(url_of(&transport, 1).host_str(), Some("service.cos.myqcloud.com"));
    }

    #[tokio::test]
    async fn test_put_head_delete_bucket() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        queue(
            &transport,
            vec![
                MockResponse::cos_error(409, "BucketAlreadyOwnedByYou"),
                MockResponse::ok(),
                MockResponse::no_content(),
                MockResponse::status(404),
            ],
        );

        scenarios::put_head_delete_bucket(&ctx).await.unwrap();

        let expected_host = format!(
            "gosdkbuckettest-{}-1250000000.cos.ap-guangzhou.myqcloud.com",
            ctx.run()
        );
        let methods: Vec<String> = transport.requests()[1..]
            .iter()
            .map(|r| r.method.clone())
            .collect();
        assert_eq!(methods, ["PUT", "HEAD", "DELETE", "HEAD"]);
        for index in 1..5 {
            assert_eq!(url_of(&transport, index).host_str(), Some(expected_host.as_str()));
        }
    }

    #[tokio::test]
    async fn test_put_head_delete_bucket_still_present() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        queue(
            &transport,
            vec![
                MockResponse::ok(),
                MockResponse::ok(),
                MockResponse::no_content(),
                MockResponse::ok(),
            ],
        );

        let err = scenarios::put_head_delete_bucket(&ctx).await.unwrap_err();
        assert!(matches!(err, HarnessError::UnexpectedSuccess { .. }));
    }

    #[tokio::test]
    async fn test_put_bucket_acl_illegal() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        transport.queue_response(MockResponse::cos_error(400, "InvalidArgument"));

        scenarios::put_bucket_acl_illegal(&ctx).await.unwrap();
        let request = transport.request(1).unwrap();
        assert_eq!(request.get_header("x-cos-acl"), Some("public-read-writ"));
        assert_eq!(url_of(&transport, 1).query(), Some("acl"));
    }

    #[tokio::test]
    async fn test_put_bucket_acl_illegal_accepted() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        transport.queue_response(MockResponse::ok());

        let err = scenarios::put_bucket_acl_illegal(&ctx).await.unwrap_err();
        assert!(matches!(err, HarnessError::UnexpectedSuccess { .. }));
    }

    #[tokio::test]
    async fn test_put_get_bucket_acl_normal() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        queue(
            &transport,
            vec![MockResponse::ok(), MockResponse::ok_with_body(TestFixtures::acl_xml(false))],
        );

        scenarios::put_get_bucket_acl_normal(&ctx).await.unwrap();
        assert_eq!(transport.request(1).unwrap().get_header("x-cos-acl"), Some("private"));
    }

    #[tokio::test]
    async fn test_put_get_bucket_acl_extra_grant() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        queue(
            &transport,
            vec![MockResponse::ok(), MockResponse::ok_with_body(TestFixtures::acl_xml(true))],
        );

        let err = scenarios::put_get_bucket_acl_normal(&ctx).await.unwrap_err();
        assert!(is_mismatch(&err, "bucket grant count"));
    }

    #[tokio::test]
    async fn test_get_bucket() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        transport.queue_response(MockResponse::ok_with_body(TestFixtures::list_objects_xml()));

        scenarios::get_bucket(&ctx).await.unwrap();
        assert_eq!(
            url_of(&transport, 1).query(),
            Some("prefix=%E4%B8%AD%E6%96%87&max-keys=3")
        );
    }

    #[tokio::test]
    async fn test_get_bucket_location() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        transport.queue_response(MockResponse::ok_with_body(TestFixtures::location_xml("ap-guangzhou")));

        scenarios::get_bucket_location(&ctx).await.unwrap();
    }

    #[tokio::test]
    async fn test_get_bucket_location_other_region() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        transport.queue_response(MockResponse::ok_with_body(TestFixtures::location_xml("ap-beijing")));

        let err = scenarios::get_bucket_location(&ctx).await.unwrap_err();
        assert!(is_mismatch(&err, "bucket location"));
    }

    #[tokio::test]
    async fn test_put_get_delete_cors() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        queue(
            &transport,
            vec![
                MockResponse::ok(),
                MockResponse::ok_with_body(TestFixtures::cors_xml()),
                MockResponse::no_content(),
            ],
        );

        scenarios::put_get_delete_cors(&ctx).await.unwrap();
        assert_eq!(transport.request(3).unwrap().method, "DELETE");
        assert_eq!(url_of(&transport, 3).query(), Some("cors"));
    }

    #[tokio::test]
    async fn test_versioning_and_replication() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        let config = ctx.config().clone();
        queue(
            &transport,
            vec![
                MockResponse::ok(),
                MockResponse::ok_with_body(TestFixtures::versioning_xml("Enabled")),
                MockResponse::ok(),
                MockResponse::ok_with_body(TestFixtures::replication_xml(
                    &config.replication_role,
                    "Enabled",
                    &config.replication_dest,
                )),
                MockResponse::no_content(),
            ],
        );

        scenarios::versioning_and_replication(&ctx).await.unwrap();

        let put_replication = transport.request(3).unwrap();
        let body = String::from_utf8(put_replication.body.unwrap().to_vec()).unwrap();
        assert!(body.contains(&config.replication_role));
        assert!(body.contains(&config.replication_dest));
        assert_eq!(transport.request(5).unwrap().method, "DELETE");
    }

    #[tokio::test]
    async fn test_versioning_not_enabled() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        queue(
            &transport,
            vec![
                MockResponse::ok(),
                MockResponse::ok_with_body(TestFixtures::versioning_xml("Suspended")),
            ],
        );

        let err = scenarios::versioning_and_replication(&ctx).await.unwrap_err();
        assert!(is_mismatch(&err, "versioning status"));
        assert_eq!(transport.request_count(), 3);
    }

    #[tokio::test]
    async fn test_bucket_inventory() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        let destination = ctx.config().inventory_dest.clone();
        queue(
            &transport,
            vec![
                MockResponse::ok(),
                MockResponse::ok_with_body(TestFixtures::inventory_xml("test1", &destination)),
                MockResponse::no_content(),
            ],
        );

        scenarios::bucket_inventory(&ctx).await.unwrap();

        let body = String::from_utf8(transport.request(1).unwrap().body.unwrap().to_vec()).unwrap();
        assert!(body.contains("<IsEnabled>True</IsEnabled>"));
        for index in 1..4 {
            assert_eq!(url_of(&transport, index).query(), Some("inventory&id=test1"));
        }
    }

    #[tokio::test]
    async fn test_bucket_logging() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        let target = ctx.config().logging_target.clone();
        queue(
            &transport,
            vec![MockResponse::ok(), MockResponse::ok_with_body(TestFixtures::logging_xml(&target))],
        );

        scenarios::bucket_logging(&ctx).await.unwrap();
    }

    #[tokio::test]
    async fn test_bucket_logging_disabled() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        queue(
            &transport,
            vec![
                MockResponse::ok(),
                MockResponse::ok_with_body("<BucketLoggingStatus></BucketLoggingStatus>"),
            ],
        );

        let err = scenarios::bucket_logging(&ctx).await.unwrap_err();
        assert!(is_mismatch(&err, "logging target bucket"));
    }

    #[tokio::test]
    async fn test_put_get_delete_lifecycle() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        queue(
            &transport,
            vec![
                MockResponse::ok(),
                MockResponse::ok_with_body(TestFixtures::lifecycle_xml()),
                MockResponse::no_content(),
            ],
        );

        scenarios::put_get_delete_lifecycle(&ctx).await.unwrap();
        assert_eq!(transport.request_count(), 4);

        let put = transport.request(1).unwrap();
        let body = String::from_utf8(put.body.unwrap().to_vec()).unwrap();
        assert!(body.contains("<ID>1234</ID>"));
        assert_eq!(url_of(&transport, 2).query(), Some("lifecycle"));
        assert_eq!(transport.request(2).unwrap().method, "GET");
        assert_eq!(transport.request(3).unwrap().method, "DELETE");
    }

    #[tokio::test]
    async fn test_lifecycle_read_back_not_found() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        queue(
            &transport,
            vec![
                MockResponse::ok(),
                MockResponse::cos_error(404, "NoSuchLifecycleConfiguration"),
                MockResponse::no_content(),
            ],
        );

        scenarios::put_get_delete_lifecycle(&ctx).await.unwrap();
        assert_eq!(transport.request(3).unwrap().method, "DELETE");
    }

    #[tokio::test]
    async fn test_lifecycle_read_back_server_error() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        queue(
            &transport,
            vec![MockResponse::ok(), MockResponse::cos_error(500, "InternalError")],
        );

        let err = scenarios::put_get_delete_lifecycle(&ctx).await.unwrap_err();
        assert!(matches!(err, HarnessError::Cos { ref operation, .. } if operation == "GetBucketLifecycle"));
    }

    #[tokio::test]
    async fn test_list_multipart_uploads() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        transport.queue_response(MockResponse::ok_with_body(TestFixtures::initiate_multipart_xml(
            "k", "u1",
        )));
        // List what was just initiated, next to someone else's upload.
        transport.queue_responder(|history| {
            let path = Url::parse(&history[1].url).unwrap().path().to_string();
            let key = percent_decode_str(&path[1..]).decode_utf8().unwrap().into_owned();
            MockResponse::ok_with_body(format!(
                "<ListMultipartUploadsResult><IsTruncated>false</IsTruncated>\
                 <Upload><Key>{}</Key><UploadId>u1</UploadId></Upload>\
                 <Upload><Key>other</Key><UploadId>u2</UploadId></Upload>\
                 </ListMultipartUploadsResult>",
                key
            ))
        });
        transport.queue_response(MockResponse::no_content());

        scenarios::list_multipart_uploads(&ctx).await.unwrap();

        assert_eq!(transport.request(1).unwrap().method, "POST");
        assert!(url_of(&transport, 1).path().starts_with("/test_multipart"));
        assert_eq!(url_of(&transport, 2).query(), Some("uploads"));
        assert_eq!(url_of(&transport, 3).query(), Some("uploadId=u1"));
    }

    #[tokio::test]
    async fn test_list_multipart_uploads_missing_upload() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        queue(
            &transport,
            vec![
                MockResponse::ok_with_body(TestFixtures::initiate_multipart_xml("k", "u1")),
                MockResponse::ok_with_body(TestFixtures::list_multipart_uploads_xml("other", "u2")),
                MockResponse::no_content(),
            ],
        );

        let err = scenarios::list_multipart_uploads(&ctx).await.unwrap_err();
        assert!(is_mismatch(&err, "listed upload key"));

        // The upload is aborted before the check.
        assert_eq!(transport.request(3).unwrap().method, "DELETE");
        assert_eq!(url_of(&transport, 3).query(), Some("uploadId=u1"));
    }
}

mod object_scenario_tests {
    use super::*;

    #[tokio::test]
    async fn test_put_head_get_delete_object_10mb() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        transport.queue_response(MockResponse::ok());
        transport.queue_response(MockResponse::ok().with_header("content-length", TEN_MB.to_string()));
        transport.queue_echo_of_last_put();
        transport.queue_response(MockResponse::no_content());
        transport.queue_response(MockResponse::status(404));

        scenarios::put_head_get_delete_object_10mb(&ctx).await.unwrap();
        assert_eq!(transport.request_count(), 6);

        let methods: Vec<String> = transport.requests().into_iter().map(|r| r.method).collect();
        assert_eq!(methods, ["PUT", "PUT", "HEAD", "GET", "DELETE", "HEAD"]);
        assert_eq!(url_of(&transport, 5).path(), url_of(&transport, 1).path());
    }

    #[tokio::test]
    async fn test_put_head_get_delete_object_10mb_still_present() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        transport.queue_response(MockResponse::ok());
        transport.queue_response(MockResponse::ok());
        transport.queue_echo_of_last_put();
        transport.queue_response(MockResponse::no_content());
        transport.queue_response(MockResponse::ok());

        let err = scenarios::put_head_get_delete_object_10mb(&ctx).await.unwrap_err();
        assert!(matches!(err, HarnessError::UnexpectedSuccess { .. }));
    }

    #[tokio::test]
    async fn test_put_head_get_delete_object_10mb_content_differs() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        queue(
            &transport,
            vec![
                MockResponse::ok(),
                MockResponse::ok().with_header("content-length", TEN_MB.to_string()),
                MockResponse::ok_with_body("short"),
                MockResponse::no_content(),
            ],
        );

        let err = scenarios::put_head_get_delete_object_10mb(&ctx).await.unwrap_err();
        assert!(is_mismatch(&err, "object content"));

        let put = transport.request(1).unwrap();
        assert_eq!(put.body.unwrap().len(), TEN_MB);
        assert!(url_of(&transport, 1).path().starts_with("/test/objectPut"));
        assert_eq!(transport.request(4).unwrap().method, "DELETE");
    }

    #[tokio::test]
    async fn test_put_head_get_delete_object_10mb_wrong_length() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        queue(
            &transport,
            vec![
                MockResponse::ok(),
                MockResponse::ok().with_header("content-length", "5"),
                MockResponse::ok_with_body("short"),
                MockResponse::no_content(),
            ],
        );

        let err = scenarios::put_head_get_delete_object_10mb(&ctx).await.unwrap_err();
        assert!(is_mismatch(&err, "head content length"));
    }

    #[tokio::test]
    async fn test_put_get_delete_object_by_file_10mb() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        transport.queue_response(MockResponse::ok());
        transport.queue_echo_of_last_put();
        transport.queue_response(MockResponse::no_content());
        transport.queue_response(MockResponse::status(404));

        scenarios::put_get_delete_object_by_file_10mb(&ctx).await.unwrap();

        let methods: Vec<String> = transport.requests().into_iter().map(|r| r.method).collect();
        assert_eq!(methods, ["PUT", "PUT", "GET", "DELETE", "HEAD"]);
        assert_eq!(transport.request(1).unwrap().body.unwrap().len(), TEN_MB);
        assert!(url_of(&transport, 4).path().starts_with("/test/objectPutByFile"));
    }

    #[tokio::test]
    async fn test_put_get_delete_object_by_file_short_download() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        queue(
            &transport,
            vec![
                MockResponse::ok(),
                MockResponse::ok_with_body("short"),
                MockResponse::no_content(),
            ],
        );

        let err = scenarios::put_get_delete_object_by_file_10mb(&ctx).await.unwrap_err();
        assert!(is_mismatch(&err, "downloaded bytes"));
        assert_eq!(transport.request(1).unwrap().body.unwrap().len(), TEN_MB);
    }

    #[tokio::test]
    async fn test_put_get_delete_object_special_name() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        queue(
            &transport,
            vec![
                MockResponse::ok(),
                MockResponse::ok_with_body("test"),
                MockResponse::no_content(),
            ],
        );

        scenarios::put_get_delete_object_special_name(&ctx).await.unwrap();

        let url = url_of(&transport, 1);
        assert!(url.query().is_none());
        let key = percent_decode_str(&url.path()[1..]).decode_utf8().unwrap();
        assert_eq!(ctx.special_file_name(), SPECIAL_FILE_NAME);
        assert!(key.starts_with(SPECIAL_FILE_NAME));
        assert!(key.ends_with(ctx.run().as_str()));
    }

    #[tokio::test]
    async fn test_put_object_to_non_exist_bucket() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        transport.queue_response(MockResponse::cos_error(404, "NoSuchBucket"));

        scenarios::put_object_to_non_exist_bucket(&ctx).await.unwrap();

        let url = url_of(&transport, 1);
        assert!(url.host_str().unwrap().starts_with("gosdknonexistbucket-"));
        assert_eq!(url.path(), "/test/objectPut.go");
    }

    #[tokio::test]
    async fn test_put_object_to_non_exist_bucket_forbidden() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        transport.queue_response(MockResponse::cos_error(403, "AccessDenied"));

        let err = scenarios::put_object_to_non_exist_bucket(&ctx).await.unwrap_err();
        assert!(matches!(err, HarnessError::UnexpectedStatus { status: 403, .. }));
    }

    #[tokio::test]
    async fn test_put_get_object_acl() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        queue(
            &transport,
            vec![
                MockResponse::ok(),
                MockResponse::ok(),
                MockResponse::ok_with_body(TestFixtures::acl_xml(true)),
                MockResponse::no_content(),
            ],
        );

        scenarios::put_get_object_acl(&ctx).await.unwrap();
        assert_eq!(transport.request(2).unwrap().get_header("x-cos-acl"), Some("public-read"));
    }

    #[tokio::test]
    async fn test_put_object_restore_in_progress() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        queue(
            &transport,
            vec![
                MockResponse::ok(),
                MockResponse::cos_error(409, "RestoreAlreadyInProgress"),
                MockResponse::no_content(),
            ],
        );

        scenarios::put_object_restore(&ctx).await.unwrap();

        let put = transport.request(1).unwrap();
        assert_eq!(put.get_header("x-cos-storage-class"), Some("ARCHIVE"));
        assert_eq!(transport.request(2).unwrap().method, "POST");
        assert_eq!(url_of(&transport, 2).query(), Some("restore"));
        assert_eq!(transport.request(3).unwrap().method, "DELETE");
    }

    #[tokio::test]
    async fn test_put_object_restore_accepted() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        queue(
            &transport,
            vec![MockResponse::ok(), MockResponse::status(202), MockResponse::no_content()],
        );

        scenarios::put_object_restore(&ctx).await.unwrap();
    }

    #[tokio::test]
    async fn test_put_object_restore_rejected() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        queue(
            &transport,
            vec![MockResponse::ok(), MockResponse::cos_error(403, "AccessDenied")],
        );

        let err = scenarios::put_object_restore(&ctx).await.unwrap_err();
        assert!(matches!(err, HarnessError::UnexpectedStatus { status: 403, .. }));
    }

    #[tokio::test]
    async fn test_copy_object() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        queue(
            &transport,
            vec![
                MockResponse::ok(),
                MockResponse::ok().with_headers(TestFixtures::put_object_headers(Some("v1"))),
                MockResponse::ok_with_body(TestFixtures::copy_result_xml()),
                MockResponse::ok_with_body("test"),
                MockResponse::no_content(),
                MockResponse::no_content(),
                MockResponse::no_content(),
            ],
        );

        scenarios::copy_object(&ctx).await.unwrap();

        let source_host = format!(
            "gosdkcopytest-{}-1250000000.cos.ap-guangzhou.myqcloud.com",
            ctx.run()
        );
        assert_eq!(url_of(&transport, 1).host_str(), Some(source_host.as_str()));
        assert_eq!(transport.request(1).unwrap().get_header("x-cos-acl"), Some("public-read"));

        let copy = transport.request(3).unwrap();
        let header = copy.get_header("x-cos-copy-source").unwrap();
        assert!(header.starts_with(&format!("{}/test/objectMove1", source_host)));
        assert!(header.ends_with("?versionId=v1"));
        assert!(url_of(&transport, 3).path().starts_with("/test/objectCopy"));

        // Destination object, source object, then the source bucket.
        assert_eq!(
            url_of(&transport, 5).host_str(),
            Some("examplebucket-1250000000.cos.ap-guangzhou.myqcloud.com")
        );
        assert_eq!(url_of(&transport, 6).host_str(), Some(source_host.as_str()));
        assert!(url_of(&transport, 6).path().starts_with("/test/objectMove1"));
        assert_eq!(url_of(&transport, 7).host_str(), Some(source_host.as_str()));
        assert_eq!(url_of(&transport, 7).path(), "/");
        assert_eq!(transport.request(7).unwrap().method, "DELETE");
    }

    #[tokio::test]
    async fn test_copy_object_failed_after_200() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        queue(
            &transport,
            vec![
                MockResponse::ok(),
                MockResponse::ok(),
                MockResponse::ok_with_body(TestFixtures::error_xml("InternalError", "copy failed")),
            ],
        );

        let err = scenarios::copy_object(&ctx).await.unwrap_err();
        assert!(matches!(err, HarnessError::Cos { ref operation, .. } if operation == "PutObjectCopy"));
    }
}

mod multipart_scenario_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_abort_multipart_upload() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        queue(
            &transport,
            vec![
                MockResponse::ok_with_body(TestFixtures::initiate_multipart_xml("k", "u1")),
                MockResponse::no_content(),
            ],
        );

        scenarios::create_abort_multipart_upload(&ctx).await.unwrap();
        assert_eq!(url_of(&transport, 1).query(), Some("uploads"));
        assert_eq!(url_of(&transport, 2).query(), Some("uploadId=u1"));
    }

    fn complete_responses(head_length: usize) -> Vec<MockResponse> {
        vec![
            MockResponse::ok_with_body(TestFixtures::initiate_multipart_xml("k", "u1")),
            MockResponse::ok().with_header("etag", "\"etag-1\""),
            MockResponse::ok().with_header("etag", "\"etag-2\""),
            MockResponse::ok_with_body(TestFixtures::complete_multipart_xml("k")),
            MockResponse::ok().with_header("content-length", head_length.to_string()),
            MockResponse::no_content(),
        ]
    }

    #[tokio::test]
    async fn test_create_complete_multipart_upload() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        queue(&transport, complete_responses(2 * PART_SIZE));

        scenarios::create_complete_multipart_upload(&ctx).await.unwrap();

        for (index, part_number) in [(2, 1), (3, 2)] {
            let part = transport.request(index).unwrap();
            assert_eq!(part.body.unwrap().len(), PART_SIZE);
            assert_eq!(
                url_of(&transport, index).query(),
                Some(format!("partNumber={}&uploadId=u1", part_number).as_str())
            );
        }
        let body = String::from_utf8(transport.request(4).unwrap().body.unwrap().to_vec()).unwrap();
        assert!(body.contains("<PartNumber>1</PartNumber>"));
        assert!(body.contains("<PartNumber>2</PartNumber>"));
        assert!(body.contains("etag-2"));
    }

    #[tokio::test]
    async fn test_create_complete_multipart_upload_wrong_size() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        queue(&transport, complete_responses(PART_SIZE));

        let err = scenarios::create_complete_multipart_upload(&ctx).await.unwrap_err();
        assert!(is_mismatch(&err, "assembled object size"));
        assert_eq!(transport.request(6).unwrap().method, "DELETE");
    }

    #[tokio::test]
    async fn test_complete_multipart_with_mismatched_parts() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        queue(
            &transport,
            vec![
                MockResponse::ok_with_body(TestFixtures::initiate_multipart_xml("k", "u1")),
                MockResponse::ok().with_header("etag", "\"etag-1\""),
                MockResponse::cos_error(400, "InvalidPart"),
                MockResponse::no_content(),
            ],
        );

        scenarios::complete_multipart_with_mismatched_parts(&ctx).await.unwrap();
        assert_eq!(transport.request(4).unwrap().method, "DELETE");
    }

    #[tokio::test]
    async fn test_complete_multipart_with_mismatched_parts_failed_after_200() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        queue(
            &transport,
            vec![
                MockResponse::ok_with_body(TestFixtures::initiate_multipart_xml("k", "u1")),
                MockResponse::ok().with_header("etag", "\"etag-1\""),
                MockResponse::ok_with_body(TestFixtures::error_xml("InvalidPart", "InvalidPart")),
                MockResponse::no_content(),
            ],
        );

        scenarios::complete_multipart_with_mismatched_parts(&ctx).await.unwrap();
        assert_eq!(transport.request(4).unwrap().method, "DELETE");
    }

    #[tokio::test]
    async fn test_complete_multipart_with_mismatched_parts_accepted() {
        let transport = Arc::new(MockTransport::new());
        let ctx = context(&transport).await;
        queue(
            &transport,
            vec![
                MockResponse::ok_with_body(TestFixtures::initiate_multipart_xml("k", "u1")),
                MockResponse::ok().with_header("etag", "\"etag-1\""),
                MockResponse::ok_with_body(TestFixtures::complete_multipart_xml("k")),
                MockResponse::no_content(),
            ],
        );

        let err = scenarios::complete_multipart_with_mismatched_parts(&ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, HarnessError::UnexpectedSuccess { .. }));
        // Aborted even though the check failed.
        assert_eq!(transport.request_count(), 5);
    }
}
