//! Fixture naming.
//!
//! Object keys are `<prefix><RFC 3339 timestamp>-<run id>`. Bucket names
//! cannot hold `:` or upper case, so they are `<prefix>-<run id>`.

use chrono::{SecondsFormat, Utc};
use rand::Rng;
use std::fmt;

/// Short random id shared by everything one harness context creates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunId(String);

impl RunId {
    /// Eight lowercase hex characters.
    pub fn generate() -> Self {
        let value: u32 = rand::thread_rng().gen();
        Self(format!("{:08x}", value))
    }

    /// The id as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RunId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Current UTC time, e.g. `2024-01-15T10:30:00Z`.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Object key for a fixture created by this run.
pub fn object_key(prefix: &str, run: &RunId) -> String {
    format!("{}{}-{}", prefix, timestamp(), run)
}

/// Bucket name (without app id) for a fixture bucket created by this run.
pub fn bucket_name(prefix: &str, run: &RunId) -> String {
    format!("{}-{}", prefix, run)
}

/// Name of a bucket this run never creates.
pub fn nonexistent_bucket_name(run: &RunId) -> String {
    bucket_name("gosdknonexistbucket", run)
}
