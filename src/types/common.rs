//! Common types shared across COS operations.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Canned ACL values accepted in the `x-cos-acl` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CannedAcl {
    /// Owner gets full control, nobody else has access.
    Private,
    /// Anyone may read.
    PublicRead,
    /// Anyone may read and write (bucket only).
    PublicReadWrite,
    /// Inherit the bucket ACL (object only).
    Default,
}

impl CannedAcl {
    /// Header value for this ACL.
    pub fn as_str(&self) -> &'static str {
        match self {
            CannedAcl::Private => "private",
            CannedAcl::PublicRead => "public-read",
            CannedAcl::PublicReadWrite => "public-read-write",
            CannedAcl::Default => "default",
        }
    }
}

impl fmt::Display for CannedAcl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CannedAcl {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "private" => Ok(CannedAcl::Private),
            "public-read" => Ok(CannedAcl::PublicRead),
            "public-read-write" => Ok(CannedAcl::PublicReadWrite),
            "default" => Ok(CannedAcl::Default),
            other => Err(format!("unknown canned ACL: {}", other)),
        }
    }
}

/// ACL header set for bucket or object ACL writes.
///
/// `acl` is kept as a raw string so that values the service rejects
/// (a misspelled canned ACL, for instance) can still be sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AclHeaders {
    /// `x-cos-acl`.
    pub acl: Option<String>,
    /// `x-cos-grant-read`.
    pub grant_read: Option<String>,
    /// `x-cos-grant-write`.
    pub grant_write: Option<String>,
    /// `x-cos-grant-full-control`.
    pub grant_full_control: Option<String>,
}

impl AclHeaders {
    /// Headers carrying a canned ACL.
    pub fn canned(acl: CannedAcl) -> Self {
        Self::raw(acl.as_str())
    }

    /// Headers carrying an arbitrary `x-cos-acl` value, unvalidated.
    pub fn raw(acl: impl Into<String>) -> Self {
        Self {
            acl: Some(acl.into()),
            ..Default::default()
        }
    }

    /// Grant read access to the given grantee string (e.g. `id="qcs::cam::uin/1:uin/1"`).
    pub fn with_grant_read(mut self, grantee: impl Into<String>) -> Self {
        self.grant_read = Some(grantee.into());
        self
    }

    /// Grant full control to the given grantee string.
    pub fn with_grant_full_control(mut self, grantee: impl Into<String>) -> Self {
        self.grant_full_control = Some(grantee.into());
        self
    }

    /// Write the non-empty headers into `headers`.
    pub fn apply(&self, headers: &mut HashMap<String, String>) {
        let pairs = [
            ("x-cos-acl", &self.acl),
            ("x-cos-grant-read", &self.grant_read),
            ("x-cos-grant-write", &self.grant_write),
            ("x-cos-grant-full-control", &self.grant_full_control),
        ];
        for (name, value) in pairs {
            if let Some(value) = value {
                headers.insert(name.to_string(), value.clone());
            }
        }
    }

    /// True when no header would be written.
    pub fn is_empty(&self) -> bool {
        self.acl.is_none()
            && self.grant_read.is_none()
            && self.grant_write.is_none()
            && self.grant_full_control.is_none()
    }
}

/// COS storage classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageClass {
    /// `STANDARD`.
    Standard,
    /// `STANDARD_IA`, infrequent access.
    StandardIa,
    /// `MAZ_STANDARD`, multi-AZ.
    MazStandard,
    /// `MAZ_STANDARD_IA`.
    MazStandardIa,
    /// `INTELLIGENT_TIERING`.
    IntelligentTiering,
    /// `ARCHIVE`; must be restored before reading.
    Archive,
    /// `DEEP_ARCHIVE`; must be restored before reading.
    DeepArchive,
}

impl StorageClass {
    /// Wire value, as used in `x-cos-storage-class` and XML documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageClass::Standard => "STANDARD",
            StorageClass::StandardIa => "STANDARD_IA",
            StorageClass::MazStandard => "MAZ_STANDARD",
            StorageClass::MazStandardIa => "MAZ_STANDARD_IA",
            StorageClass::IntelligentTiering => "INTELLIGENT_TIERING",
            StorageClass::Archive => "ARCHIVE",
            StorageClass::DeepArchive => "DEEP_ARCHIVE",
        }
    }

    /// Whether objects of this class must be restored before reading.
    pub fn requires_restore(&self) -> bool {
        matches!(self, StorageClass::Archive | StorageClass::DeepArchive)
    }
}

impl fmt::Display for StorageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageClass {
    type Err = String;

    /// Parsing is case-insensitive; lifecycle documents use `Standard`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "STANDARD" => Ok(StorageClass::Standard),
            "STANDARD_IA" => Ok(StorageClass::StandardIa),
            "MAZ_STANDARD" => Ok(StorageClass::MazStandard),
            "MAZ_STANDARD_IA" => Ok(StorageClass::MazStandardIa),
            "INTELLIGENT_TIERING" => Ok(StorageClass::IntelligentTiering),
            "ARCHIVE" => Ok(StorageClass::Archive),
            "DEEP_ARCHIVE" => Ok(StorageClass::DeepArchive),
            other => Err(format!("unknown storage class: {}", other)),
        }
    }
}

/// Retrieval speed for restoring an archived object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RestoreTier {
    /// Minutes.
    Expedited,
    /// Hours.
    Standard,
    /// Cheapest and slowest.
    Bulk,
}

impl RestoreTier {
    /// Value of `<Tier>` in a restore request.
    pub fn as_str(&self) -> &'static str {
        match self {
            RestoreTier::Expedited => "Expedited",
            RestoreTier::Standard => "Standard",
            RestoreTier::Bulk => "Bulk",
        }
    }
}

/// Bucket or object owner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    /// Account id, `qcs::cam::uin/<uin>:uin/<uin>`.
    #[serde(rename = "ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    #[serde(
        rename = "DisplayName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub display_name: Option<String>,
}

/// Grantee of an ACL grant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grantee {
    /// CAM id, for user grantees.
    #[serde(rename = "ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    #[serde(
        rename = "DisplayName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub display_name: Option<String>,
    /// Group URI, for `AllUsers` style grantees.
    #[serde(rename = "URI", default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// A single ACL grant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    /// Who the grant applies to.
    #[serde(rename = "Grantee", default)]
    pub grantee: Grantee,
    /// `READ`, `WRITE` or `FULL_CONTROL`.
    #[serde(rename = "Permission", default)]
    pub permission: String,
}

/// A part reference in a complete-multipart-upload request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedPart {
    /// Part number, 1 to 10000.
    #[serde(rename = "PartNumber")]
    pub part_number: u32,
    /// ETag the service returned for the part.
    #[serde(rename = "ETag")]
    pub etag: String,
}

impl CompletedPart {
    /// Reference part `part_number` by its ETag.
    pub fn new(part_number: u32, etag: impl Into<String>) -> Self {
        Self {
            part_number,
            etag: etag.into(),
        }
    }
}
