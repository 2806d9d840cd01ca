//! End-to-end scenarios, one per live test.
//!
//! Every scenario removes what it creates on the success path. A failing
//! assertion returns early and may leave fixtures behind; they carry the run
//! id, so the teardown sweep can find them.

use super::fixtures::{self, ILLEGAL_ACL, PART_SIZE, SMALL_CONTENT, TEN_MB};
use super::naming::{self, bucket_name, object_key};
use super::outcome::{
    ensure_eq, ensure_same_bytes, expect_error_status, expect_failure, expect_status,
    tolerate_conflict, tolerate_not_found,
};
use super::{HarnessError, OperationExt, SuiteContext};
use crate::client::CosClient;
use crate::config::encode_key;
use crate::types::*;
use tracing::info;

/// List every bucket of the account.
pub async fn get_service(ctx: &SuiteContext) -> Result<(), HarnessError> {
    let result = ctx
        .client()
        .service()
        .list_buckets()
        .await
        .during("GetService")?;
    info!(buckets = result.buckets.buckets.len(), "Listed buckets");
    Ok(())
}

/// Create, head and delete a bucket of this run.
pub async fn put_head_delete_bucket(ctx: &SuiteContext) -> Result<(), HarnessError> {
    let bucket = ctx.sibling_client(&bucket_name("gosdkbuckettest", ctx.run()))?;

    tolerate_conflict(
        bucket.buckets().put(&PutBucketRequest::new()).await,
        "PutBucket",
    )?;
    ctx.settle().await;

    bucket.buckets().head().await.during("HeadBucket")?;
    bucket.buckets().delete().await.during("DeleteBucket")?;
    expect_error_status(bucket.buckets().head().await, 404, "HeadBucket after delete")
}

/// A misspelled canned ACL must be rejected.
pub async fn put_bucket_acl_illegal(ctx: &SuiteContext) -> Result<(), HarnessError> {
    expect_failure(
        ctx.client()
            .buckets()
            .put_acl(&AclHeaders::raw(ILLEGAL_ACL))
            .await,
        "PutBucketACL",
    )?;
    Ok(())
}

/// A private bucket has only the owner grant.
pub async fn put_get_bucket_acl_normal(ctx: &SuiteContext) -> Result<(), HarnessError> {
    let buckets = ctx.client().buckets();
    buckets
        .put_acl(&AclHeaders::canned(CannedAcl::Private))
        .await
        .during("PutBucketACL")?;

    let policy = buckets.get_acl().await.during("GetBucketACL")?;
    ensure_eq("bucket grant count", 1, policy.grants().len())
}

/// List with a non-ASCII prefix and a small page.
pub async fn get_bucket(ctx: &SuiteContext) -> Result<(), HarnessError> {
    let request = ListObjectsRequest::new()
        .with_prefix("中文")
        .with_max_keys(3);
    let result = ctx
        .client()
        .buckets()
        .list_objects(&request)
        .await
        .during("GetBucket")?;

    if result.contents.len() > 3 {
        return Err(HarnessError::mismatch(
            "listed objects",
            "at most 3",
            result.contents.len(),
        ));
    }
    Ok(())
}

/// The bucket reports the region its URL names.
pub async fn get_bucket_location(ctx: &SuiteContext) -> Result<(), HarnessError> {
    let location = ctx
        .client()
        .buckets()
        .get_location()
        .await
        .during("GetBucketLocation")?;
    ensure_eq("bucket location", ctx.endpoint().region.as_str(), location.as_str())
}

/// Write one CORS rule, read it back, then delete the configuration.
pub async fn put_get_delete_cors(ctx: &SuiteContext) -> Result<(), HarnessError> {
    let buckets = ctx.client().buckets();
    buckets
        .put_cors(&fixtures::cors_configuration())
        .await
        .during("PutBucketCORS")?;

    let cors = buckets.get_cors().await.during("GetBucketCORS")?;
    ensure_eq("CORS rule count", 1, cors.rules.len())?;

    buckets.delete_cors().await.during("DeleteBucketCORS")?;
    Ok(())
}

/// Enable versioning, then replicate to the configured destination.
///
/// Versioning cannot be turned off again, so it is never reset.
pub async fn versioning_and_replication(ctx: &SuiteContext) -> Result<(), HarnessError> {
    let buckets = ctx.client().buckets();
    buckets
        .put_versioning(&VersioningConfiguration::enabled())
        .await
        .during("PutBucketVersioning")?;
    let versioning = buckets
        .get_versioning()
        .await
        .during("GetBucketVersioning")?;
    ensure_eq(
        "versioning status",
        VersioningConfiguration::ENABLED,
        versioning.status.as_deref().unwrap_or_default(),
    )?;

    let config = ctx.config();
    buckets
        .put_replication(&fixtures::replication_configuration(
            &config.replication_role,
            &config.replication_dest,
        ))
        .await
        .during("PutBucketReplication")?;

    let replication = buckets
        .get_replication()
        .await
        .during("GetBucketReplication")?;
    for rule in &replication.rules {
        ensure_eq("replication rule status", "Enabled", rule.status.as_str())?;
        ensure_eq(
            "replication destination",
            config.replication_dest.as_str(),
            rule.destination.bucket.as_str(),
        )?;
    }

    buckets
        .delete_replication()
        .await
        .during("DeleteBucketReplication")?;
    Ok(())
}

/// Write inventory `test1`, check the read-back, then delete it.
pub async fn bucket_inventory(ctx: &SuiteContext) -> Result<(), HarnessError> {
    let buckets = ctx.client().buckets();
    let destination = ctx.config().inventory_dest.as_str();
    buckets
        .put_inventory(
            fixtures::INVENTORY_ID,
            &fixtures::inventory_configuration(destination),
        )
        .await
        .during("PutBucketInventory")?;

    let inventory = buckets
        .get_inventory(fixtures::INVENTORY_ID)
        .await
        .during("GetBucketInventory")?;
    ensure_eq("inventory id", fixtures::INVENTORY_ID, inventory.id.as_str())?;
    // Written as "True", echoed back lowercased.
    ensure_eq("inventory IsEnabled", "true", inventory.is_enabled.as_str())?;
    ensure_eq(
        "inventory destination",
        destination,
        inventory.destination.bucket_destination.bucket.as_str(),
    )?;

    buckets
        .delete_inventory(fixtures::INVENTORY_ID)
        .await
        .during("DeleteBucketInventory")?;
    Ok(())
}

/// Point access logs at the configured target and read it back.
pub async fn bucket_logging(ctx: &SuiteContext) -> Result<(), HarnessError> {
    let buckets = ctx.client().buckets();
    let target = ctx.config().logging_target.as_str();
    buckets
        .put_logging(&fixtures::logging_status(target))
        .await
        .during("PutBucketLogging")?;

    let logging = buckets.get_logging().await.during("GetBucketLogging")?;
    let actual = logging
        .logging_enabled
        .map(|enabled| enabled.target_bucket)
        .unwrap_or_default();
    ensure_eq("logging target bucket", target, actual.as_str())
}

/// The read-back may 404 when another run deleted the rules in between.
pub async fn put_get_delete_lifecycle(ctx: &SuiteContext) -> Result<(), HarnessError> {
    let buckets = ctx.client().buckets();
    buckets
        .put_lifecycle(&fixtures::lifecycle_configuration())
        .await
        .during("PutBucketLifecycle")?;

    if let Some(lifecycle) = tolerate_not_found(buckets.get_lifecycle().await, "GetBucketLifecycle")? {
        info!(rules = lifecycle.rules.len(), "Read back lifecycle");
    }

    buckets
        .delete_lifecycle()
        .await
        .during("DeleteBucketLifecycle")?;
    Ok(())
}

/// A fresh upload shows up in the bucket's upload listing.
pub async fn list_multipart_uploads(ctx: &SuiteContext) -> Result<(), HarnessError> {
    let key = object_key("test_multipart", ctx.run());
    let client = ctx.client();
    let upload = client
        .multipart()
        .initiate(&InitiateMultipartUploadRequest::new(&key))
        .await
        .during("InitiateMultipartUpload")?;

    let uploads = client
        .buckets()
        .list_multipart_uploads(&ListMultipartUploadsRequest::new())
        .await
        .during("ListMultipartUploads")?;
    let listed: Vec<&str> = uploads
        .uploads
        .iter()
        .filter(|u| u.key == key)
        .map(|u| u.upload_id.as_str())
        .collect();

    client
        .multipart()
        .abort(&key, &upload.upload_id)
        .await
        .during("AbortMultipartUpload")?;

    if listed.is_empty() {
        return Err(HarnessError::mismatch("listed upload key", &key, "absent"));
    }
    for upload_id in listed {
        ensure_eq("listed upload id", upload.upload_id.as_str(), upload_id)?;
    }
    Ok(())
}

/// Round-trip a 10 MB payload through memory.
pub async fn put_head_get_delete_object_10mb(ctx: &SuiteContext) -> Result<(), HarnessError> {
    let key = object_key("test/objectPut", ctx.run());
    let payload = fixtures::random_hex_payload(TEN_MB);
    let objects = ctx.client().objects();

    objects
        .put(&PutObjectRequest::new(&key, payload.clone()))
        .await
        .during("PutObject")?;
    let head = objects.head(&key).await.during("HeadObject")?;
    let fetched = objects
        .get(&GetObjectRequest::new(&key))
        .await
        .during("GetObject")?;
    objects.delete(&key).await.during("DeleteObject")?;

    if let Some(length) = head.content_length {
        ensure_eq("head content length", TEN_MB as u64, length)?;
    }
    ensure_same_bytes("object content", &payload, &fetched.body)?;
    expect_error_status(objects.head(&key).await, 404, "HeadObject after delete")
}

/// Round-trip a 10 MB temp file; the download overwrites the same file.
pub async fn put_get_delete_object_by_file_10mb(ctx: &SuiteContext) -> Result<(), HarnessError> {
    let (file, payload) = fixtures::temp_file_with_payload(TEN_MB)?;
    let key = object_key("test/objectPutByFile", ctx.run());
    let objects = ctx.client().objects();

    objects
        .put_from_file(&key, file.path())
        .await
        .during("PutObjectFromFile")?;
    let written = objects
        .get_to_file(&GetObjectRequest::new(&key), file.path())
        .await
        .during("GetObjectToFile")?;
    objects.delete(&key).await.during("DeleteObject")?;

    ensure_eq("downloaded bytes", payload.len() as u64, written.bytes_written)?;
    let downloaded = tokio::fs::read(file.path()).await?;
    ensure_same_bytes("downloaded file", &payload, &downloaded)?;
    expect_error_status(objects.head(&key).await, 404, "HeadObject after delete")?;

    file.close()?;
    Ok(())
}

/// A key made of every printable symbol round-trips its content.
pub async fn put_get_delete_object_special_name(ctx: &SuiteContext) -> Result<(), HarnessError> {
    let key = object_key(ctx.special_file_name(), ctx.run());
    let objects = ctx.client().objects();

    objects
        .put(&PutObjectRequest::new(&key, SMALL_CONTENT))
        .await
        .during("PutObject")?;
    let fetched = objects
        .get(&GetObjectRequest::new(&key))
        .await
        .during("GetObject")?;
    objects.delete(&key).await.during("DeleteObject")?;

    ensure_same_bytes("object content", SMALL_CONTENT, &fetched.body)
}

/// Writing into a bucket that was never created answers 404.
pub async fn put_object_to_non_exist_bucket(ctx: &SuiteContext) -> Result<(), HarnessError> {
    let missing = ctx.sibling_client(&naming::nonexistent_bucket_name(ctx.run()))?;
    expect_error_status(
        missing
            .objects()
            .put(&PutObjectRequest::new("test/objectPut.go", SMALL_CONTENT))
            .await,
        404,
        "PutObject to missing bucket",
    )
}

/// A public-read object has the owner grant plus the anonymous read grant.
pub async fn put_get_object_acl(ctx: &SuiteContext) -> Result<(), HarnessError> {
    let key = object_key("test/objectACL.go", ctx.run());
    let objects = ctx.client().objects();

    objects
        .put(&PutObjectRequest::new(&key, SMALL_CONTENT))
        .await
        .during("PutObject")?;
    objects
        .put_acl(&key, &AclHeaders::canned(CannedAcl::PublicRead))
        .await
        .during("PutObjectACL")?;
    let policy = objects.get_acl(&key).await.during("GetObjectACL")?;
    objects.delete(&key).await.during("DeleteObject")?;

    ensure_eq("object grant count", 2, policy.grants().len())
}

/// Restoring an archived object answers 200 (already restored), 202
/// (accepted) or 409 (in progress).
pub async fn put_object_restore(ctx: &SuiteContext) -> Result<(), HarnessError> {
    let key = object_key("archivetest", ctx.run());
    let objects = ctx.client().objects();

    objects
        .put(&PutObjectRequest::new(&key, SMALL_CONTENT).with_storage_class(StorageClass::Archive))
        .await
        .during("PutObject archive")?;

    let status = expect_status(
        objects.restore(&key, &fixtures::restore_request()).await,
        &[200, 202, 409],
        "PostObjectRestore",
    )?;
    info!(key = %key, status, "Restore answered");

    objects.delete(&key).await.during("DeleteObject")?;
    Ok(())
}

/// Copy an object from a bucket of this run into the primary bucket.
pub async fn copy_object(ctx: &SuiteContext) -> Result<(), HarnessError> {
    let source_bucket = ctx
        .create_sibling_bucket(&bucket_name("gosdkcopytest", ctx.run()))
        .await?;
    let source_key = object_key("test/objectMove1", ctx.run());

    let put = source_bucket
        .objects()
        .put(&PutObjectRequest::new(&source_key, SMALL_CONTENT))
        .await
        .during("PutObject source")?;
    ctx.settle().await;

    let source = format!(
        "{}/{}",
        source_bucket.config().bucket_host(),
        encode_key(&source_key)
    );
    let dest_key = object_key("test/objectCopy", ctx.run());
    let mut request = CopyObjectRequest::new(&dest_key, source);
    if let Some(version_id) = put.version_id {
        request = request.with_source_version_id(version_id);
    }

    let objects = ctx.client().objects();
    objects.copy(&request).await.during("PutObjectCopy")?;
    let fetched = objects
        .get(&GetObjectRequest::new(&dest_key))
        .await
        .during("GetObject copy")?;

    objects.delete(&dest_key).await.during("DeleteObject copy")?;
    source_bucket
        .objects()
        .delete(&source_key)
        .await
        .during("DeleteObject source")?;
    source_bucket
        .buckets()
        .delete()
        .await
        .during("DeleteBucket source")?;

    ensure_same_bytes("copied content", SMALL_CONTENT, &fetched.body)
}

/// Initiate an upload, then abort it.
pub async fn create_abort_multipart_upload(ctx: &SuiteContext) -> Result<(), HarnessError> {
    let key = object_key("test_multipart", ctx.run());
    let multipart = ctx.client().multipart();

    let upload = multipart
        .initiate(&InitiateMultipartUploadRequest::new(&key))
        .await
        .during("InitiateMultipartUpload")?;
    multipart
        .abort(&key, &upload.upload_id)
        .await
        .during("AbortMultipartUpload")?;
    Ok(())
}

/// Upload two 3 MB parts and complete with the ETags the service returned.
pub async fn create_complete_multipart_upload(ctx: &SuiteContext) -> Result<(), HarnessError> {
    let key = object_key("test/test_complete_upload", ctx.run());
    let client = ctx.client();
    let multipart = client.multipart();

    let upload = multipart
        .initiate(&InitiateMultipartUploadRequest::new(&key))
        .await
        .during("InitiateMultipartUpload")?;

    let mut parts = Vec::with_capacity(2);
    for part_number in 1..=2 {
        let part = multipart
            .upload_part(&UploadPartRequest::new(
                &key,
                &upload.upload_id,
                part_number,
                fixtures::random_hex_payload(PART_SIZE),
            ))
            .await
            .during("UploadPart")?;
        parts.push(CompletedPart::new(part_number, part.etag));
    }

    multipart
        .complete(&key, &upload.upload_id, &parts)
        .await
        .during("CompleteMultipartUpload")?;

    let head = client.objects().head(&key).await.during("HeadObject")?;
    client.objects().delete(&key).await.during("DeleteObject")?;

    match head.content_length {
        Some(length) => ensure_eq("assembled object size", (2 * PART_SIZE) as u64, length),
        None => Ok(()),
    }
}

/// Completing with an ETag the service never issued must be rejected.
pub async fn complete_multipart_with_mismatched_parts(
    ctx: &SuiteContext,
) -> Result<(), HarnessError> {
    let key = object_key("test/test_mismatched_upload", ctx.run());
    let multipart = ctx.client().multipart();

    let upload = multipart
        .initiate(&InitiateMultipartUploadRequest::new(&key))
        .await
        .during("InitiateMultipartUpload")?;
    multipart
        .upload_part(&UploadPartRequest::new(
            &key,
            &upload.upload_id,
            1,
            fixtures::random_hex_payload(1024),
        ))
        .await
        .during("UploadPart")?;

    let bogus = [CompletedPart::new(1, "\"00000000000000000000000000000000\"")];
    let outcome = expect_failure(
        multipart.complete(&key, &upload.upload_id, &bogus).await,
        "CompleteMultipartUpload with wrong ETag",
    );

    multipart
        .abort(&key, &upload.upload_id)
        .await
        .during("AbortMultipartUpload")?;
    outcome.map(|_| ())
}
