//! API key selection
//!
//! Callers may bring their own provider key in the `x-api-key` header. A
//! supplied key is validated against the provider first; if validation fails
//! for any reason the gateway quietly falls back to the default key loaded at
//! startup. The outcome records which key was used so responses can report it.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::core::providers::unified_provider::ProviderError;
use crate::utils::error::{GatewayError, Result};
use crate::utils::mask_secret;

/// Opaque provider API key
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key, for building upstream requests only
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&mask_secret(&self.0)).finish()
    }
}

/// Where the key used for a request came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyProvenance {
    /// The caller's own key, after it passed validation
    CallerSupplied,
    /// The gateway's default key
    Default,
}

impl KeyProvenance {
    pub fn is_default(self) -> bool {
        self == Self::Default
    }
}

/// A key together with its provenance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub key: ApiKey,
    pub provenance: KeyProvenance,
}

impl Credential {
    pub fn api_key(&self) -> &str {
        self.key.expose()
    }

    pub fn using_default_key(&self) -> bool {
        self.provenance.is_default()
    }
}

/// Checks whether a key is accepted by the provider
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValidator: Send + Sync {
    async fn validate(&self, api_key: &str) -> std::result::Result<(), ProviderError>;
}

/// Picks the key for each request
#[derive(Clone)]
pub struct CredentialResolver {
    default_key: ApiKey,
    validator: Arc<dyn KeyValidator>,
}

impl CredentialResolver {
    /// Fails when the default key is empty: it is the only guaranteed fallback
    pub fn new(default_key: impl Into<String>, validator: Arc<dyn KeyValidator>) -> Result<Self> {
        let default_key = default_key.into();
        if default_key.trim().is_empty() {
            return Err(GatewayError::config(
                "GOOGLE_API_KEY environment variable not set",
            ));
        }

        Ok(Self {
            default_key: ApiKey::new(default_key),
            validator,
        })
    }

    /// The default key with default provenance
    pub fn default_credential(&self) -> Credential {
        Credential {
            key: self.default_key.clone(),
            provenance: KeyProvenance::Default,
        }
    }

    /// Resolve the key for one request
    ///
    /// An absent or empty caller key goes straight to the default. A caller
    /// key that fails validation is logged and replaced by the default; the
    /// failure is never returned.
    pub async fn resolve(&self, supplied: Option<&str>) -> Credential {
        let Some(key) = supplied.filter(|k| !k.is_empty()) else {
            debug!("No caller API key supplied, using default key");
            return self.default_credential();
        };

        match self.validator.validate(key).await {
            Ok(()) => {
                debug!("Caller API key {} validated", mask_secret(key));
                Credential {
                    key: ApiKey::new(key),
                    provenance: KeyProvenance::CallerSupplied,
                }
            }
            Err(e) => {
                warn!("Invalid user API key, falling back to default key. Error: {}", e);
                self.default_credential()
            }
        }
    }

    /// Validate a caller key without any fallback
    pub async fn check(&self, api_key: &str) -> std::result::Result<(), ProviderError> {
        self.validator.validate(api_key).await
    }
}

impl fmt::Debug for CredentialResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialResolver")
            .field("default_key", &self.default_key)
            .finish_non_exhaustive()
    }
}
