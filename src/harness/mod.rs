//! Live integration harness for the COS client.
//!
//! A [`SuiteContext`] binds a client to the primary test bucket and creates
//! that bucket (tolerating "already owned"). Each function in [`scenarios`]
//! drives one end-to-end flow through the client and checks what comes back:
//! status codes, read-back documents, object content.
//!
//! Failures are reported as [`HarnessError`]. Only setup errors are meant to
//! stop a whole run; everything else fails the one scenario that hit it.

mod config;
mod context;
mod endpoint;
pub mod fixtures;
pub mod naming;
pub mod outcome;
pub mod scenarios;

pub use config::HarnessConfig;
pub use context::SuiteContext;
pub use endpoint::BucketEndpoint;
pub use naming::RunId;

use crate::error::CosError;
use once_cell::sync::OnceCell;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors reported by the harness.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The suite cannot start: bad endpoint, or the primary bucket could not
    /// be created.
    #[error("Setup failed: {message}")]
    Setup {
        /// What could not be set up.
        message: String,
        /// Client error behind the failure, if any.
        #[source]
        source: Option<CosError>,
    },

    /// A client call failed unexpectedly.
    #[error("{operation} failed: {source}")]
    Cos {
        /// Operation that failed, such as `PutObject`.
        operation: String,
        /// The client error.
        #[source]
        source: CosError,
    },

    /// A call finished with a status outside the accepted set.
    #[error("{operation} returned unexpected status {status}")]
    UnexpectedStatus {
        /// Operation that answered.
        operation: String,
        /// HTTP status it answered with.
        status: u16,
    },

    /// A read-back value differs from what was written.
    #[error("{what}: expected {expected}, got {actual}")]
    Mismatch {
        /// The value compared.
        what: String,
        /// Value written or expected.
        expected: String,
        /// Value read back.
        actual: String,
    },

    /// A call that must fail succeeded.
    #[error("{operation} succeeded but was expected to fail")]
    UnexpectedSuccess {
        /// Operation that should have failed.
        operation: String,
    },

    /// Local temp file handling failed, cleanup included.
    #[error("Local file error: {0}")]
    Io(#[from] std::io::Error),
}

impl HarnessError {
    pub(crate) fn setup(message: impl Into<String>) -> Self {
        HarnessError::Setup {
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn mismatch(
        what: impl Into<String>,
        expected: impl ToString,
        actual: impl ToString,
    ) -> Self {
        HarnessError::Mismatch {
            what: what.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// True for errors that should abort the whole suite.
    pub fn is_fatal(&self) -> bool {
        matches!(self, HarnessError::Setup { .. })
    }
}

/// Attach the failing operation's name to a client error.
pub trait OperationExt<T> {
    /// Wrap an error as [`HarnessError::Cos`] naming `operation`.
    fn during(self, operation: &str) -> Result<T, HarnessError>;
}

impl<T> OperationExt<T> for Result<T, CosError> {
    fn during(self, operation: &str) -> Result<T, HarnessError> {
        self.map_err(|source| HarnessError::Cos {
            operation: operation.to_string(),
            source,
        })
    }
}

static TRACING: OnceCell<()> = OnceCell::new();

/// Install a fmt subscriber honoring `RUST_LOG` (default `info`) that writes
/// through the test harness's capture. Safe to call from every test.
pub fn init_tracing() {
    TRACING.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        // Another subscriber may already be installed by the embedding binary.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
