//! Outcome classification for client calls.
//!
//! Scenarios accept some failures: a 409 when creating a bucket the account
//! already owns, a 404 when reading back a configuration the service has not
//! yet made visible. These helpers fold those answers into success and turn
//! everything else into a [`HarnessError`].

use super::{HarnessError, OperationExt};
use crate::error::CosError;
use crate::types::ResponseMeta;
use md5::{Digest, Md5};
use std::fmt::{Debug, Display};
use tracing::{info, warn};

/// `Ok(None)` when the service answered 409.
pub fn tolerate_conflict<T>(
    result: Result<T, CosError>,
    operation: &str,
) -> Result<Option<T>, HarnessError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_conflict() => {
            info!(operation, code = e.code().unwrap_or_default(), "Tolerated conflict");
            Ok(None)
        }
        Err(e) => Err(e).during(operation),
    }
}

/// `Ok(None)` when the service answered 404.
pub fn tolerate_not_found<T>(
    result: Result<T, CosError>,
    operation: &str,
) -> Result<Option<T>, HarnessError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_found() => {
            warn!(operation, code = e.code().unwrap_or_default(), "Tolerated not found");
            Ok(None)
        }
        Err(e) => Err(e).during(operation),
    }
}

/// The status of a call, which must be one of `accepted`, whether the
/// client reported it as success or as a service error.
pub fn expect_status(
    result: Result<ResponseMeta, CosError>,
    accepted: &[u16],
    operation: &str,
) -> Result<u16, HarnessError> {
    let status = match result {
        Ok(meta) => meta.status,
        Err(e) => match e.status_code() {
            Some(status) => status,
            None => return Err(e).during(operation),
        },
    };

    if accepted.contains(&status) {
        Ok(status)
    } else {
        Err(HarnessError::UnexpectedStatus {
            operation: operation.to_string(),
            status,
        })
    }
}

/// The error of a call that must fail.
pub fn expect_failure<T>(
    result: Result<T, CosError>,
    operation: &str,
) -> Result<CosError, HarnessError> {
    match result {
        Ok(_) => Err(HarnessError::UnexpectedSuccess {
            operation: operation.to_string(),
        }),
        Err(e) => {
            info!(operation, error = %e, "Call failed as expected");
            Ok(e)
        }
    }
}

/// A call that must fail with exactly `status`.
pub fn expect_error_status<T>(
    result: Result<T, CosError>,
    status: u16,
    operation: &str,
) -> Result<(), HarnessError> {
    let error = expect_failure(result, operation)?;
    match error.status_code() {
        Some(actual) if actual == status => Ok(()),
        Some(actual) => Err(HarnessError::UnexpectedStatus {
            operation: operation.to_string(),
            status: actual,
        }),
        None => Err(error).during(operation),
    }
}

/// Equality check reported as [`HarnessError::Mismatch`].
pub fn ensure_eq<T>(what: &str, expected: T, actual: T) -> Result<(), HarnessError>
where
    T: PartialEq + Debug + Display,
{
    if expected == actual {
        Ok(())
    } else {
        Err(HarnessError::mismatch(what, expected, actual))
    }
}

/// Byte-for-byte comparison. Large payloads are reported by length and MD5.
pub fn ensure_same_bytes(what: &str, expected: &[u8], actual: &[u8]) -> Result<(), HarnessError> {
    if expected == actual {
        return Ok(());
    }
    Err(HarnessError::mismatch(what, describe(expected), describe(actual)))
}

fn describe(data: &[u8]) -> String {
    if data.len() <= 64 {
        format!("{:?}", String::from_utf8_lossy(data))
    } else {
        format!("{} bytes, md5 {}", data.len(), hex::encode(Md5::digest(data)))
    }
}
