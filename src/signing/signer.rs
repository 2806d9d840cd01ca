//! COS request signer.

use super::*;
use crate::credentials::CredentialsProvider;
use crate::error::CosError;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// A signed request ready to be sent.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    /// HTTP method.
    pub method: String,
    /// Full URL including query string.
    pub url: Url,
    /// Headers to include, `authorization` among them.
    pub headers: HashMap<String, String>,
}

/// Trait for COS request signers.
#[async_trait]
pub trait CosSigner: Send + Sync {
    /// Sign a request.
    async fn sign(
        &self,
        method: &str,
        url: &Url,
        headers: &HashMap<String, String>,
    ) -> Result<SignedRequest, CosError>;
}

/// Default COS signer (`q-sign-algorithm=sha1`).
pub struct CosSignerV5 {
    credentials_provider: Arc<dyn CredentialsProvider>,
    validity: Duration,
}

impl CosSignerV5 {
    /// Create a new signer whose signatures are valid for `validity`.
    pub fn new(credentials_provider: Arc<dyn CredentialsProvider>, validity: Duration) -> Self {
        Self {
            credentials_provider,
            validity,
        }
    }

    fn host_header(url: &Url) -> String {
        let host = url.host_str().unwrap_or_default();
        match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        }
    }
}

#[async_trait]
impl CosSigner for CosSignerV5 {
    async fn sign(
        &self,
        method: &str,
        url: &Url,
        headers: &HashMap<String, String>,
    ) -> Result<SignedRequest, CosError> {
        let credentials = self.credentials_provider.get_credentials().await?;
        let key_time = build_key_time(&Utc::now(), self.validity)?;

        let mut final_headers: HashMap<String, String> = headers
            .iter()
            .filter(|(k, _)| !k.eq_ignore_ascii_case("host"))
            .map(|(k, v)| (k.to_lowercase(), v.clone()))
            .collect();
        final_headers.insert("host".to_string(), Self::host_header(url));

        if let Some(token) = credentials.session_token() {
            final_headers.insert("x-cos-security-token".to_string(), token.to_string());
        }

        let signing_headers: Vec<(String, String)> = final_headers
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let params: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        let authorization = sign_request(
            method,
            &decode_path(url.path()),
            &params,
            &signing_headers,
            &credentials,
            &key_time,
        )?;
        final_headers.insert("authorization".to_string(), authorization);

        Ok(SignedRequest {
            method: method.to_string(),
            url: url.clone(),
            headers: final_headers,
        })
    }
}

impl std::fmt::Debug for CosSignerV5 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CosSignerV5")
            .field("credentials_provider", &self.credentials_provider.name())
            .field("validity", &self.validity)
            .finish()
    }
}
