//! COS credentials management.
//!
//! A COS key pair is a `SecretId` (public, goes into the `Authorization`
//! header as `q-ak`) and a `SecretKey` (never leaves the process). Temporary
//! keys additionally carry a session token sent as `x-cos-security-token`.

mod env;

pub use env::EnvCredentialsProvider;

use crate::error::CosError;
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// A COS key pair, optionally temporary.
#[derive(Clone)]
pub struct CosCredentials {
    secret_id: String,
    secret_key: SecretString,
    session_token: Option<SecretString>,
}

impl CosCredentials {
    /// Credentials from a secret id and key.
    pub fn new(secret_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            secret_id: secret_id.into(),
            secret_key: SecretString::new(secret_key.into()),
            session_token: None,
        }
    }

    /// Temporary keys issued by STS come with a token; an empty token is
    /// treated as none.
    pub fn with_session_token(mut self, session_token: impl Into<String>) -> Self {
        let token = session_token.into();
        self.session_token = (!token.is_empty()).then(|| SecretString::new(token));
        self
    }

    /// `q-ak` in the authorization string.
    pub fn secret_id(&self) -> &str {
        &self.secret_id
    }

    /// Key material for `q-sign-key`. Never log it.
    pub fn secret_key(&self) -> &str {
        self.secret_key.expose_secret()
    }

    /// Value for `x-cos-security-token`.
    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_ref().map(|s| s.expose_secret().as_str())
    }
}

impl fmt::Debug for CosCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CosCredentials")
            .field("secret_id", &self.secret_id)
            .field("secret_key", &"[REDACTED]")
            .field("temporary", &self.session_token.is_some())
            .finish()
    }
}

/// Source of the key pair used to sign each request.
///
/// Consulted once per signature, so a provider may rotate keys between
/// requests.
#[async_trait]
pub trait CredentialsProvider: Send + Sync {
    /// Return the credentials to sign the next request with.
    async fn get_credentials(&self) -> Result<CosCredentials, CosError>;

    /// Shown in `Debug` output of the configuration.
    fn name(&self) -> &'static str;
}

/// Fixed key pair supplied at construction.
pub struct StaticCredentialsProvider {
    credentials: CosCredentials,
}

impl StaticCredentialsProvider {
    /// Always hand out `credentials`.
    pub fn new(credentials: CosCredentials) -> Self {
        Self { credentials }
    }
}

#[async_trait]
impl CredentialsProvider for StaticCredentialsProvider {
    async fn get_credentials(&self) -> Result<CosCredentials, CosError> {
        Ok(self.credentials.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

impl fmt::Debug for StaticCredentialsProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentialsProvider")
            .field("credentials", &self.credentials)
            .finish()
    }
}
