//! COS service implementations.
//!
//! - Service: list the buckets of the account
//! - Buckets: bucket lifecycle, listing, ACL and sub-resource configurations
//! - Objects: put, get, head, delete, ACL, restore and copy
//! - Multipart: multipart upload operations
//!
//! Every call goes out exactly once; there is no retry layer.

mod buckets;
mod multipart;
mod objects;
mod service;

pub use buckets::BucketsService;
pub use multipart::MultipartService;
pub use objects::ObjectsService;
pub use service::ServiceService;

use crate::error::{service_error_from_response, CosError};
use crate::signing::{cos_encode, CosSigner};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use crate::types::ResponseMeta;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use bytes::Bytes;
use md5::{Digest, Md5};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Signs and sends requests, turning non-2xx answers into [`CosError::Service`].
#[derive(Clone)]
pub(crate) struct Dispatcher {
    transport: Arc<dyn HttpTransport>,
    signer: Arc<dyn CosSigner>,
}

impl Dispatcher {
    pub(crate) fn new(transport: Arc<dyn HttpTransport>, signer: Arc<dyn CosSigner>) -> Self {
        Self { transport, signer }
    }

    /// Send one request. `resource` names the target in errors.
    pub(crate) async fn send(
        &self,
        method: &str,
        url: &Url,
        mut headers: HashMap<String, String>,
        body: Option<Bytes>,
        resource: &str,
    ) -> Result<HttpResponse, CosError> {
        let content_length = body.as_ref().map_or(0, |b| b.len());
        if body.is_some() || matches!(method, "PUT" | "POST") {
            headers.insert("content-length".to_string(), content_length.to_string());
        }

        let signed = self.signer.sign(method, url, &headers).await?;
        let mut request =
            HttpRequest::new(signed.method, signed.url.as_str()).with_headers(signed.headers);
        if let Some(body) = body {
            request = request.with_body(body);
        }

        let response = self.transport.send(request).await?;
        debug!(
            method,
            resource,
            status = response.status,
            request_id = response.request_id().unwrap_or_default(),
            "COS response"
        );

        if !response.is_success() {
            return Err(service_error_from_response(&response, resource));
        }
        Ok(response)
    }
}

/// Build a request URL from `base`, an already-encoded `path`, an optional
/// key-only sub-resource (`?acl`) and query parameters.
pub(crate) fn build_url(
    base: &Url,
    path: &str,
    subresource: Option<&str>,
    query: &[(&str, String)],
) -> Url {
    let mut url = base.clone();
    url.set_path(path);

    let mut pairs: Vec<String> = Vec::new();
    if let Some(subresource) = subresource {
        pairs.push(subresource.to_string());
    }
    pairs.extend(
        query
            .iter()
            .map(|(k, v)| format!("{}={}", cos_encode(k), cos_encode(v))),
    );

    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.set_query(Some(&pairs.join("&")));
    }
    url
}

/// Serialize an XML request body and the headers that describe it.
pub(crate) fn xml_body<T: Serialize>(
    document: &T,
) -> Result<(Bytes, HashMap<String, String>), CosError> {
    let xml = crate::xml::to_xml(document)?;
    let mut headers = HashMap::new();
    headers.insert("content-type".to_string(), "application/xml".to_string());
    headers.insert("content-md5".to_string(), content_md5(xml.as_bytes()));
    Ok((Bytes::from(xml), headers))
}

/// Base64 MD5 digest for the `Content-MD5` header.
pub(crate) fn content_md5(data: &[u8]) -> String {
    BASE64.encode(Md5::digest(data))
}

/// Fail a 2xx response whose body is an `<Error>` document. Copy and
/// complete-multipart can fail after the 200 status line has been sent.
pub(crate) fn reject_error_body(response: &HttpResponse, resource: &str) -> Result<(), CosError> {
    if String::from_utf8_lossy(&response.body).contains("<Error>") {
        return Err(service_error_from_response(response, resource));
    }
    Ok(())
}

/// Status and request id of a response whose body carries nothing else.
pub(crate) fn response_meta(response: &HttpResponse) -> ResponseMeta {
    ResponseMeta {
        status: response.status,
        request_id: response.request_id().map(String::from),
    }
}

/// Parse a successful XML response body.
pub(crate) fn parse_body<T: serde::de::DeserializeOwned>(
    response: &HttpResponse,
) -> Result<T, CosError> {
    crate::xml::from_xml(&String::from_utf8_lossy(&response.body))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://examplebucket-1250000000.cos.ap-guangzhou.myqcloud.com").unwrap()
    }

    #[test]
    fn test_build_url_subresource_only() {
        let url = build_url(&base(), "/", Some("acl"), &[]);
        assert_eq!(
            url.as_str(),
            "http://examplebucket-1250000000.cos.ap-guangzhou.myqcloud.com/?acl"
        );
    }

    #[test]
    fn test_build_url_query_encoded() {
        let url = build_url(
            &base(),
            "/",
            None,
            &[("prefix", "中文".to_string()), ("max-keys", "3".to_string())],
        );
        assert_eq!(url.query(), Some("prefix=%E4%B8%AD%E6%96%87&max-keys=3"));

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("prefix".to_string(), "中文".to_string()));
    }

    #[test]
    fn test_build_url_subresource_and_query() {
        let url = build_url(&base(), "/a.txt", Some("uploads"), &[]);
        assert_eq!(url.path(), "/a.txt");
        assert_eq!(url.query(), Some("uploads"));

        let url = build_url(&base(), "/a.txt", None, &[("uploadId", "x y".to_string())]);
        assert_eq!(url.query(), Some("uploadId=x%20y"));
    }

    #[test]
    fn test_reject_error_body() {
        let response = |body: &str| HttpResponse {
            status: 200,
            headers: HashMap::new(),
            body: Bytes::from(body.to_string()),
        };

        let err = reject_error_body(
            &response("<Error><Code>InternalError</Code><Message>retry</Message></Error>"),
            "a.txt",
        )
        .unwrap_err();
        assert_eq!(err.status_code(), Some(200));
        assert_eq!(err.code(), Some("InternalError"));

        assert!(reject_error_body(&response("<CopyObjectResult/>"), "a.txt").is_ok());
        assert!(reject_error_body(&response(""), "a.txt").is_ok());
    }

    #[test]
    fn test_content_md5() {
        // MD5("test") = 098f6bcd4621d373cade4e832627b4f6
        assert_eq!(content_md5(b"test"), "CY9rzUYh03PK3k6DJie09g==");
    }

    #[test]
    fn test_xml_body_headers() {
        let (body, headers) =
            xml_body(&crate::types::VersioningConfiguration::enabled()).unwrap();
        assert_eq!(
            &body[..],
            b"<VersioningConfiguration><Status>Enabled</Status></VersioningConfiguration>"
        );
        assert_eq!(headers["content-type"], "application/xml");
        assert_eq!(headers["content-md5"], content_md5(&body));
    }
}
