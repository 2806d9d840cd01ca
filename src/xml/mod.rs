//! XML utilities for COS request and response bodies.
//!
//! Configuration and result documents go through serde (`quick_xml::se` /
//! `quick_xml::de`). Error bodies are read with the event reader, since they
//! are parsed on failure paths where a partial result is still useful.

use crate::error::{CosError, ErrorResponse, ResponseError};
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Serialize a document into its XML body.
pub fn to_xml<T: Serialize>(document: &T) -> Result<String, CosError> {
    quick_xml::se::to_string(document).map_err(|e| {
        CosError::Response(ResponseError::XmlBuildError {
            message: e.to_string(),
        })
    })
}

/// Deserialize a response body into a document.
pub fn from_xml<T: DeserializeOwned>(xml: &str) -> Result<T, CosError> {
    quick_xml::de::from_str(xml).map_err(|e| {
        CosError::Response(ResponseError::XmlParseError {
            message: e.to_string(),
        })
    })
}

/// Parse a COS `<Error>` response.
pub fn parse_error_response(xml: &str) -> Result<ErrorResponse, CosError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut parsed = ErrorResponse::default();
    let mut current_element = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                current_element = String::from_utf8_lossy(e.name().as_ref()).to_string();
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().unwrap_or_default().to_string();
                match current_element.as_str() {
                    "Code" => parsed.code = text,
                    "Message" => parsed.message = text,
                    "Resource" => parsed.resource = Some(text),
                    "RequestId" => parsed.request_id = Some(text),
                    "TraceId" => parsed.trace_id = Some(text),
                    _ => {}
                }
            }
            Ok(Event::End(_)) => {
                current_element.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(CosError::Response(ResponseError::XmlParseError {
                    message: e.to_string(),
                }));
            }
            _ => {}
        }
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;

    #[test]
    fn test_parse_error_response() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
        <Error>
            <Code>NoSuchKey</Code>
            <Message>The specified key does not exist.</Message>
            <Resource>examplebucket-1250000000.cos.ap-guangzhou.myqcloud.com/a.txt</Resource>
            <RequestId>NjQ2ZTk2MzRfYjA</RequestId>
            <TraceId>OGVmYzZiMmQzYjA2OWNhODk0NTRkMTBiOWVmMDAxODc0OWRkZjk0ZDM1NmI1M2E2MTRlY2MzZDhmNmI5MWI1OTBjYzE2MjAxN2M1MzJiOTdkZjMxMDVlYTZjN2FiMmI0NTk3NWFiNjAyMzdjM2Q4NmQ2NmE1ZTI2NDM2YjZhY2Y=</TraceId>
        </Error>"#;

        let result = parse_error_response(xml).unwrap();
        assert_eq!(result.code, "NoSuchKey");
        assert_eq!(result.request_id.as_deref(), Some("NjQ2ZTk2MzRfYjA"));
        assert!(result.resource.unwrap().ends_with("/a.txt"));
        assert!(result.trace_id.is_some());
    }

    #[test]
    fn test_parse_error_response_malformed() {
        assert!(parse_error_response("<Error><Code>x</Mess>").is_err());
    }

    #[test]
    fn test_build_cors_configuration() {
        let doc = CorsConfiguration {
            rules: vec![CorsRule {
                allowed_origins: vec!["http://www.qq.com".to_string()],
                allowed_methods: vec!["PUT".to_string(), "GET".to_string()],
                allowed_headers: vec!["x-cos-meta-test".to_string(), "x-cos-xx".to_string()],
                max_age_seconds: Some(500),
                expose_headers: vec!["x-cos-meta-test1".to_string()],
                ..Default::default()
            }],
        };

        let xml = to_xml(&doc).unwrap();
        assert!(xml.starts_with("<CORSConfiguration><CORSRule>"));
        assert!(xml.contains("<AllowedMethod>PUT</AllowedMethod><AllowedMethod>GET</AllowedMethod>"));
        assert!(xml.contains("<MaxAgeSeconds>500</MaxAgeSeconds>"));
        assert!(!xml.contains("<ID>"));
    }

    #[test]
    fn test_parse_cors_configuration() {
        let xml = r#"<CORSConfiguration>
            <CORSRule>
                <AllowedOrigin>http://www.qq.com</AllowedOrigin>
                <AllowedMethod>PUT</AllowedMethod>
                <AllowedMethod>GET</AllowedMethod>
                <AllowedHeader>x-cos-meta-test</AllowedHeader>
                <AllowedHeader>x-cos-xx</AllowedHeader>
                <ExposeHeader>x-cos-meta-test1</ExposeHeader>
                <MaxAgeSeconds>500</MaxAgeSeconds>
            </CORSRule>
        </CORSConfiguration>"#;

        let doc: CorsConfiguration = from_xml(xml).unwrap();
        assert_eq!(doc.rules.len(), 1);
        assert_eq!(doc.rules[0].allowed_methods, vec!["PUT", "GET"]);
        assert_eq!(doc.rules[0].max_age_seconds, Some(500));
    }

    #[test]
    fn test_build_inventory_configuration() {
        let doc = InventoryConfiguration {
            id: "test1".to_string(),
            is_enabled: "True".to_string(),
            included_object_versions: "All".to_string(),
            filter: Some(InventoryFilter {
                prefix: "test".to_string(),
            }),
            optional_fields: Some(InventoryOptionalFields {
                fields: vec!["Size".to_string(), "LastModifiedDate".to_string()],
            }),
            schedule: InventorySchedule {
                frequency: "Daily".to_string(),
            },
            destination: InventoryDestination {
                bucket_destination: InventoryBucketDestination {
                    format: "CSV".to_string(),
                    bucket: "qcs::cos:ap-guangzhou::dest-1250000000".to_string(),
                    ..Default::default()
                },
            },
        };

        let xml = to_xml(&doc).unwrap();
        assert!(xml.starts_with("<InventoryConfiguration><Id>test1</Id><IsEnabled>True</IsEnabled>"));
        assert!(xml.contains(
            "<Destination><COSBucketDestination><Format>CSV</Format><Bucket>qcs::cos:ap-guangzhou::dest-1250000000</Bucket></COSBucketDestination></Destination>"
        ));
        assert!(xml.contains("<OptionalFields><Field>Size</Field><Field>LastModifiedDate</Field></OptionalFields>"));
    }

    #[test]
    fn test_parse_access_control_policy() {
        let xml = r#"<AccessControlPolicy>
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
                </Grant>
                <Grant>
                    <Grantee xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:type="Group">
                        <URI>http://cam.qcloud.com/groups/global/AllUsers</URI>
                    </Grantee>
                    <Permission>READ</Permission>
                </Grant>
            </AccessControlList>
        </AccessControlPolicy>"#;

        let policy: AccessControlPolicy = from_xml(xml).unwrap();
        assert_eq!(policy.grants().len(), 2);
        assert_eq!(policy.grants()[0].permission, "FULL_CONTROL");
        assert_eq!(
            policy.grants()[1].grantee.uri.as_deref(),
            Some("http://cam.qcloud.com/groups/global/AllUsers")
        );
    }

    #[test]
    fn test_parse_list_bucket_result() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
        <ListBucketResult>
            <Name>examplebucket-1250000000</Name>
            <Prefix>中文</Prefix>
            <Marker/>
            <MaxKeys>3</MaxKeys>
            <IsTruncated>false</IsTruncated>
            <Contents>
                <Key>中文a.txt</Key>
                <LastModified>2024-01-15T10:00:00.000Z</LastModified>
                <ETag>"098f6bcd4621d373cade4e832627b4f6"</ETag>
                <Size>4</Size>
                <Owner><ID>1250000000</ID></Owner>
                <StorageClass>STANDARD</StorageClass>
            </Contents>
        </ListBucketResult>"#;

        let result: ListBucketResult = from_xml(xml).unwrap();
        assert_eq!(result.name, "examplebucket-1250000000");
        assert_eq!(result.max_keys, Some(3));
        assert!(!result.is_truncated);
        assert_eq!(result.contents.len(), 1);
        assert_eq!(result.contents[0].key, "中文a.txt");
        assert_eq!(result.contents[0].size, 4);
    }

    #[test]
    fn test_parse_location_constraint() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
        <LocationConstraint>ap-guangzhou</LocationConstraint>"#;
        let location: LocationConstraint = from_xml(xml).unwrap();
        assert_eq!(location.location, "ap-guangzhou");
    }

    #[test]
    fn test_build_complete_multipart_upload() {
        let doc = CompleteMultipartUpload {
            parts: vec![CompletedPart::new(1, "etag-1"), CompletedPart::new(2, "etag-2")],
        };
        let xml = to_xml(&doc).unwrap();
        assert_eq!(
            xml,
            "<CompleteMultipartUpload><Part><PartNumber>1</PartNumber><ETag>etag-1</ETag></Part><Part><PartNumber>2</PartNumber><ETag>etag-2</ETag></Part></CompleteMultipartUpload>"
        );
    }

    #[test]
    fn test_build_restore_request() {
        let xml = to_xml(&RestoreRequest::new(2, RestoreTier::Expedited)).unwrap();
        assert_eq!(
            xml,
            "<RestoreRequest><Days>2</Days><CASJobParameters><Tier>Expedited</Tier></CASJobParameters></RestoreRequest>"
        );
    }

    #[test]
    fn test_parse_list_multipart_uploads() {
        let xml = r#"<ListMultipartUploadsResult>
            <Bucket>examplebucket-1250000000</Bucket>
            <IsTruncated>false</IsTruncated>
            <Upload>
                <Key>a.txt</Key>
                <UploadId>1585130821cbb7df1d11846c073ad648e8f33b087cec2381df437acdc833cf654b9ecc6361</UploadId>
                <StorageClass>STANDARD</StorageClass>
                <Initiated>2024-01-15T10:00:00.000Z</Initiated>
            </Upload>
            <Upload>
                <Key>b.txt</Key>
                <UploadId>other</UploadId>
            </Upload>
        </ListMultipartUploadsResult>"#;

        let result: ListMultipartUploadsResult = from_xml(xml).unwrap();
        assert_eq!(result.uploads.len(), 2);
        assert!(result.contains(
            "a.txt",
            "1585130821cbb7df1d11846c073ad648e8f33b087cec2381df437acdc833cf654b9ecc6361"
        ));
        assert!(!result.contains("a.txt", "other"));
    }

    #[test]
    fn test_logging_status_round_trip_shape() {
        let xml = to_xml(&BucketLoggingStatus {
            logging_enabled: Some(LoggingEnabled {
                target_bucket: "logs-1250000000".to_string(),
                target_prefix: "cos/".to_string(),
            }),
        })
        .unwrap();
        assert_eq!(
            xml,
            "<BucketLoggingStatus><LoggingEnabled><TargetBucket>logs-1250000000</TargetBucket><TargetPrefix>cos/</TargetPrefix></LoggingEnabled></BucketLoggingStatus>"
        );

        let parsed: BucketLoggingStatus = from_xml(&xml).unwrap();
        assert_eq!(
            parsed.logging_enabled.unwrap().target_bucket,
            "logs-1250000000"
        );
    }
}
