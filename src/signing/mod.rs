//! COS request signature implementation.
//!
//! Implements the `q-sign-algorithm=sha1` scheme of the COS XML API:
//!
//! ```text
//! SignKey      = hex(HMAC-SHA1(SecretKey, KeyTime))
//! HttpString   = method \n path \n params \n headers \n
//! StringToSign = "sha1" \n KeyTime \n hex(SHA1(HttpString)) \n
//! Signature    = hex(HMAC-SHA1(SignKey, StringToSign))
//! ```

mod canonical;
mod signer;

pub use canonical::{build_http_string, cos_encode, decode_path, format_pairs};
pub use signer::{CosSigner, CosSignerV5, SignedRequest};

use crate::credentials::CosCredentials;
use crate::error::SigningError;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha1::{Digest, Sha1};

type HmacSha1 = Hmac<Sha1>;

/// Signature algorithm identifier.
pub const COS_ALGORITHM: &str = "sha1";

/// Calculate SHA-1 hash of data as lowercase hex.
pub fn sha1_hex(data: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Calculate HMAC-SHA1 as lowercase hex.
pub fn hmac_sha1_hex(key: &[u8], data: &[u8]) -> Result<String, SigningError> {
    let mut mac = HmacSha1::new_from_slice(key).map_err(|e| SigningError::CalculationFailed {
        message: e.to_string(),
    })?;
    mac.update(data);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Build the `KeyTime` window `"{start};{end}"` in unix seconds.
pub fn build_key_time(
    start: &DateTime<Utc>,
    validity: std::time::Duration,
) -> Result<String, SigningError> {
    let validity = i64::try_from(validity.as_secs()).map_err(|_| SigningError::InvalidKeyTime {
        message: format!("validity of {}s is too large", validity.as_secs()),
    })?;
    let begin = start.timestamp();
    Ok(format!("{};{}", begin, begin + validity))
}

/// Check if a header takes part in the signature.
pub fn should_sign_header(header_name: &str) -> bool {
    let name = header_name.to_lowercase();
    matches!(
        name.as_str(),
        "host" | "content-type" | "content-md5" | "content-length" | "range"
    ) || name.starts_with("x-cos-")
}

/// Sign a request and return the `Authorization` header value.
///
/// `path` must already be decoded; `params` are the decoded query pairs.
pub fn sign_request(
    method: &str,
    path: &str,
    params: &[(String, String)],
    headers: &[(String, String)],
    credentials: &CosCredentials,
    key_time: &str,
) -> Result<String, SigningError> {
    let sign_key = hmac_sha1_hex(credentials.secret_key().as_bytes(), key_time.as_bytes())?;

    let (param_list, http_parameters) =
        format_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    let (header_list, http_headers) = format_pairs(
        headers
            .iter()
            .filter(|(k, _)| should_sign_header(k))
            .map(|(k, v)| (k.as_str(), v.as_str())),
    );

    let http_string = build_http_string(method, path, &http_parameters, &http_headers);
    let string_to_sign = format!(
        "{}\n{}\n{}\n",
        COS_ALGORITHM,
        key_time,
        sha1_hex(http_string.as_bytes())
    );
    let signature = hmac_sha1_hex(sign_key.as_bytes(), string_to_sign.as_bytes())?;

    Ok(format!(
        "q-sign-algorithm={}&q-ak={}&q-sign-time={}&q-key-time={}&q-header-list={}&q-url-param-list={}&q-signature={}",
        COS_ALGORITHM,
        credentials.secret_id(),
        key_time,
        key_time,
        header_list,
        param_list,
        signature
    ))
}
