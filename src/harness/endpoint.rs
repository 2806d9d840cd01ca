//! Bucket URL decomposition.

use super::HarnessError;
use url::Url;

/// A bucket URL split into the parts the suite names resources with.
///
/// The host must look like `<bucket>-<appid>.cos.<region>.myqcloud.com`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketEndpoint {
    /// The URL as given, without a trailing slash.
    pub url: String,
    /// `http` or `https`.
    pub scheme: String,
    /// Full host name.
    pub host: String,
    /// Bucket name without the app id.
    pub bucket: String,
    /// Numeric app id suffix of the bucket label.
    pub app_id: String,
    /// Region segment of the host, such as `ap-guangzhou`.
    pub region: String,
}

impl BucketEndpoint {
    /// Parse a bucket URL. Any deviation from the expected host shape is a
    /// setup error.
    pub fn parse(bucket_url: &str) -> Result<Self, HarnessError> {
        let url = Url::parse(bucket_url)
            .map_err(|e| HarnessError::setup(format!("invalid bucket URL {}: {}", bucket_url, e)))?;
        let host = url
            .host_str()
            .ok_or_else(|| HarnessError::setup(format!("bucket URL {} has no host", bucket_url)))?;

        let segments: Vec<&str> = host.split('.').collect();
        if segments.len() != 5 {
            return Err(HarnessError::setup(format!(
                "bucket host {} must have 5 dot-separated segments, found {}",
                host,
                segments.len()
            )));
        }

        // Bucket names may contain dashes; the app id never does.
        let (bucket, app_id) = segments[0]
            .rsplit_once('-')
            .filter(|(bucket, app_id)| !bucket.is_empty() && !app_id.is_empty())
            .ok_or_else(|| {
                HarnessError::setup(format!(
                    "bucket label {} must be <bucket>-<appid>",
                    segments[0]
                ))
            })?;

        Ok(Self {
            url: bucket_url.trim_end_matches('/').to_string(),
            scheme: url.scheme().to_string(),
            host: host.to_string(),
            bucket: bucket.to_string(),
            app_id: app_id.to_string(),
            region: segments[2].to_string(),
        })
    }

    /// `<bucket>-<appid>`, the name the service reports for this bucket.
    pub fn label(&self) -> String {
        format!("{}-{}", self.bucket, self.app_id)
    }

    /// URL of another bucket of the same account in the same region.
    pub fn sibling_url(&self, bucket: &str) -> String {
        format!(
            "{}://{}-{}.cos.{}.myqcloud.com",
            self.scheme, bucket, self.app_id, self.region
        )
    }

    /// Resource name of a bucket, as used by replication and inventory
    /// destinations: `qcs::cos:<region>::<bucket>-<appid>`.
    pub fn resource_name(&self) -> String {
        format!("qcs::cos:{}::{}", self.region, self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_parse_bucket_url() {
        let endpoint =
            BucketEndpoint::parse("http://cosgosdktest-1251668577.cos.ap-guangzhou.myqcloud.com")
                .unwrap();

        assert_eq!(endpoint.bucket, "cosgosdktest");
        assert_eq!(endpoint.app_id, "1251668577");
        assert_eq!(endpoint.region, "ap-guangzhou");
        assert_eq!(endpoint.host, "cosgosdktest-1251668577.cos.ap-guangzhou.myqcloud.com");
        assert_eq!(endpoint.label(), "cosgosdktest-1251668577");
    }

    #[test]
    fn test_parse_dashed_bucket_name() {
        let endpoint =
            BucketEndpoint::parse("https://my-test-bucket-1250000000.cos.ap-beijing.myqcloud.com/")
                .unwrap();

        assert_eq!(endpoint.bucket, "my-test-bucket");
        assert_eq!(endpoint.app_id, "1250000000");
        assert_eq!(endpoint.scheme, "https");
        assert_eq!(
            endpoint.url,
            "https://my-test-bucket-1250000000.cos.ap-beijing.myqcloud.com"
        );
    }

    #[test_case("http://bucket-1250000000.cos.ap-guangzhou.qcloud.myqcloud.com" ; "six segments")]
    #[test_case("http://bucket-1250000000.myqcloud.com" ; "three segments")]
    #[test_case("http://bucket.cos.ap-guangzhou.myqcloud.com" ; "label without app id")]
    #[test_case("http://-1250000000.cos.ap-guangzhou.myqcloud.com" ; "empty bucket")]
    #[test_case("not a url" ; "unparseable")]
    fn test_parse_rejects(url: &str) {
        let err = BucketEndpoint::parse(url).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_sibling_url_keeps_region_and_app_id() {
        let endpoint =
            BucketEndpoint::parse("http://cosgosdktest-1251668577.cos.ap-guangzhou.myqcloud.com")
                .unwrap();

        assert_eq!(
            endpoint.sibling_url("gosdkcopytest"),
            "http://gosdkcopytest-1251668577.cos.ap-guangzhou.myqcloud.com"
        );
        assert_eq!(
            endpoint.resource_name(),
            "qcs::cos:ap-guangzhou::cosgosdktest-1251668577"
        );
    }
}
