//! Signer stand-in that skips the HMAC chain.

use crate::error::CosError;
use crate::signing::{CosSigner, SignedRequest};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use url::Url;

/// `authorization` value stamped on every request.
pub const MOCK_AUTHORIZATION: &str =
    "q-sign-algorithm=sha1&q-ak=mock&q-sign-time=0;1&q-key-time=0;1&q-header-list=&q-url-param-list=&q-signature=mock";

/// Stamps a fixed authorization and remembers what it was asked to sign.
/// Can be primed to fail once.
#[derive(Default)]
pub struct MockSigner {
    fail_next: Mutex<Option<CosError>>,
    signed: Mutex<Vec<(String, Url)>>,
}

impl MockSigner {
    /// Signer that never fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// The next `sign` call returns `error`; later calls succeed.
    pub fn failing_once(error: CosError) -> Self {
        Self {
            fail_next: Mutex::new(Some(error)),
            ..Self::default()
        }
    }

    /// Method and URL of every request signed so far.
    pub fn signed(&self) -> Vec<(String, Url)> {
        self.signed.lock().clone()
    }
}

#[async_trait]
impl CosSigner for MockSigner {
    async fn sign(
        &self,
        method: &str,
        url: &Url,
        headers: &HashMap<String, String>,
    ) -> Result<SignedRequest, CosError> {
        if let Some(error) = self.fail_next.lock().take() {
            return Err(error);
        }
        self.signed.lock().push((method.to_string(), url.clone()));

        let mut headers = headers.clone();
        headers.insert("authorization".to_string(), MOCK_AUTHORIZATION.to_string());
        Ok(SignedRequest {
            method: method.to_string(),
            url: url.clone(),
            headers,
        })
    }
}

impl std::fmt::Debug for MockSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSigner")
            .field("signed", &self.signed.lock().len())
            .finish()
    }
}
