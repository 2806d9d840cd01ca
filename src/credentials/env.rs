//! Environment variable credentials provider.

use super::{CosCredentials, CredentialsProvider};
use crate::error::{CosError, CredentialsError};
use async_trait::async_trait;
use std::env;

/// Environment variable names for COS credentials.
pub const COS_SECRETID: &str = "COS_SECRETID";
/// Secret key variable.
pub const COS_SECRETKEY: &str = "COS_SECRETKEY";
/// Optional session token variable for temporary keys.
pub const COS_SESSION_TOKEN: &str = "COS_SESSION_TOKEN";

/// Credentials provider that reads from environment variables.
///
/// Variables are read on every call, so a missing key surfaces as an error on
/// each authenticated request rather than at client construction.
#[derive(Debug, Clone, Default)]
pub struct EnvCredentialsProvider {
    secret_id_var: Option<String>,
    secret_key_var: Option<String>,
    session_token_var: Option<String>,
}

impl EnvCredentialsProvider {
    /// Create a provider reading `COS_SECRETID` / `COS_SECRETKEY`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider with custom variable names.
    pub fn with_vars(
        secret_id_var: impl Into<String>,
        secret_key_var: impl Into<String>,
        session_token_var: Option<String>,
    ) -> Self {
        Self {
            secret_id_var: Some(secret_id_var.into()),
            secret_key_var: Some(secret_key_var.into()),
            session_token_var,
        }
    }

    fn secret_id_var(&self) -> &str {
        self.secret_id_var.as_deref().unwrap_or(COS_SECRETID)
    }

    fn secret_key_var(&self) -> &str {
        self.secret_key_var.as_deref().unwrap_or(COS_SECRETKEY)
    }

    fn session_token_var(&self) -> &str {
        self.session_token_var
            .as_deref()
            .unwrap_or(COS_SESSION_TOKEN)
    }

    fn read(&self, var: &str) -> Result<String, CosError> {
        let value = env::var(var).map_err(|_| {
            CosError::Credentials(CredentialsError::NotFound {
                source_name: format!("environment variable {}", var),
            })
        })?;

        if value.is_empty() {
            return Err(CosError::Credentials(CredentialsError::Invalid {
                message: format!("{} is empty", var),
            }));
        }

        Ok(value)
    }
}

#[async_trait]
impl CredentialsProvider for EnvCredentialsProvider {
    async fn get_credentials(&self) -> Result<CosCredentials, CosError> {
        let secret_id = self.read(self.secret_id_var())?;
        let secret_key = self.read(self.secret_key_var())?;

        let credentials = CosCredentials::new(secret_id, secret_key);
        Ok(match env::var(self.session_token_var()) {
            Ok(token) => credentials.with_session_token(token),
            Err(_) => credentials,
        })
    }

    fn name(&self) -> &'static str {
        "environment"
    }
}
