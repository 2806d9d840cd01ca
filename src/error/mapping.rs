//! Mapping from COS error responses to typed errors.

use super::*;
use crate::transport::HttpResponse;

/// Parsed COS `<Error>` document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorResponse {
    /// COS error code (e.g. "NoSuchKey").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Affected resource.
    pub resource: Option<String>,
    /// COS request ID.
    pub request_id: Option<String>,
    /// COS trace ID.
    pub trace_id: Option<String>,
}

/// Classify a service answer by error code, then by status.
pub fn classify(status: u16, code: &str) -> ServiceErrorKind {
    match code {
        "NoSuchBucket" => ServiceErrorKind::NoSuchBucket,
        "NoSuchKey" => ServiceErrorKind::NoSuchKey,
        "NoSuchUpload" => ServiceErrorKind::NoSuchUpload,
        "NoSuchLifecycleConfiguration"
        | "NoSuchCORSConfiguration"
        | "NoSuchBucketPolicy"
        | "NoSuchInventoryConfiguration"
        | "ReplicationConfigurationnotFoundError"
        | "NoSuchReplicationConfiguration" => ServiceErrorKind::NoSuchConfiguration,
        "BucketAlreadyOwnedByYou" => ServiceErrorKind::BucketAlreadyOwnedByYou,
        "BucketAlreadyExists" => ServiceErrorKind::BucketAlreadyExists,
        "BucketNotEmpty" => ServiceErrorKind::BucketNotEmpty,
        "RestoreAlreadyInProgress" => ServiceErrorKind::RestoreAlreadyInProgress,
        "InvalidArgument" | "InvalidRequest" | "MalformedXML" | "InvalidDigest" => {
            ServiceErrorKind::InvalidArgument
        }
        "InvalidPart" => ServiceErrorKind::InvalidPart,
        "InvalidPartOrder" => ServiceErrorKind::InvalidPartOrder,
        "InvalidObjectState" => ServiceErrorKind::InvalidObjectState,
        "AccessDenied" => ServiceErrorKind::AccessDenied,
        "SignatureDoesNotMatch" => ServiceErrorKind::SignatureDoesNotMatch,
        "InvalidAccessKeyId" => ServiceErrorKind::InvalidAccessKeyId,
        _ => match status {
            404 => ServiceErrorKind::NotFound,
            409 => ServiceErrorKind::Conflict,
            500..=599 => ServiceErrorKind::ServerError,
            _ => ServiceErrorKind::Other,
        },
    }
}

/// Build a [`CosError::Service`] from a non-2xx response, or from a 2xx one
/// whose body is an `<Error>` document.
///
/// Bodiless answers (HEAD, some 404s) keep an empty code; the status alone
/// then drives [`classify`].
pub fn service_error_from_response(response: &HttpResponse, resource: &str) -> CosError {
    let parsed = if response.body.is_empty() {
        ErrorResponse::default()
    } else {
        let body = String::from_utf8_lossy(&response.body);
        crate::xml::parse_error_response(&body).unwrap_or_else(|_| ErrorResponse {
            message: body.chars().take(100).collect(),
            ..ErrorResponse::default()
        })
    };

    CosError::Service(ServiceError {
        status: response.status,
        code: parsed.code,
        message: parsed.message,
        resource: parsed
            .resource
            .or_else(|| (!resource.is_empty()).then(|| resource.to_string())),
        request_id: parsed
            .request_id
            .or_else(|| response.request_id().map(String::from)),
    })
}
