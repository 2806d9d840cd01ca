//! Canonical `HttpString` building for COS request signatures.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters that are NOT percent-encoded in signed keys and values.
const COS_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// URL-encode a key or value the way the COS signature expects.
pub fn cos_encode(value: &str) -> String {
    utf8_percent_encode(value, COS_ENCODE_SET).to_string()
}

/// Decode a URL path into the `UriPathname` used by the signature.
pub fn decode_path(path: &str) -> String {
    if path.is_empty() {
        return "/".to_string();
    }
    percent_decode_str(path).decode_utf8_lossy().into_owned()
}

/// Format key/value pairs into `(KeyList, KeyValueString)`.
///
/// Keys are lowercased and encoded, values encoded, then sorted by key.
/// The key list is `;`-joined and the pair string `&`-joined.
pub fn format_pairs<'a, I>(pairs: I) -> (String, String)
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut encoded: Vec<(String, String)> = pairs
        .into_iter()
        .map(|(k, v)| (cos_encode(&k.to_lowercase()), cos_encode(v.trim())))
        .collect();
    encoded.sort();

    let list = encoded
        .iter()
        .map(|(k, _)| k.as_str())
        .collect::<Vec<_>>()
        .join(";");
    let joined = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    (list, joined)
}

/// Build the `HttpString` for a request.
pub fn build_http_string(
    method: &str,
    path: &str,
    http_parameters: &str,
    http_headers: &str,
) -> String {
    format!(
        "{}\n{}\n{}\n{}\n",
        method.to_lowercase(),
        path,
        http_parameters,
        http_headers
    )
}
