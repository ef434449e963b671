//! API key credentials.

use std::fmt;

use base64::prelude::*;
use thiserror::Error;

/// Errors resolving the API key.
#[derive(Debug, Error)]
pub enum CredentialsError {
    /// Neither the command line nor the configuration supplied a key.
    #[error("Missing api key")]
    Missing,
    /// The provided API key was invalid.
    #[error("invalid API key: {reason}")]
    InvalidApiKey { reason: &'static str },
}

/// An opaque API key.
///
/// The key is only ever rendered into the Authorization header; `Debug`
/// output is redacted.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    /// Wraps an API key, rejecting empty or whitespace-only keys.
    pub fn new(api_key: impl Into<String>) -> Result<Self, CredentialsError> {
        let api_key = api_key.into();

        if api_key.is_empty() {
            return Err(CredentialsError::InvalidApiKey {
                reason: "API key cannot be empty",
            });
        }
        if api_key.trim().is_empty() {
            return Err(CredentialsError::InvalidApiKey {
                reason: "API key cannot be whitespace-only",
            });
        }

        Ok(Self { api_key })
    }

    /// Picks the explicit key if given, else the configured one.
    ///
    /// A blank configured key counts as missing.
    pub fn resolve(explicit: Option<&str>, configured: Option<&str>) -> Result<Self, CredentialsError> {
        if let Some(key) = explicit {
            return Self::new(key);
        }
        match configured.map(str::trim).filter(|key| !key.is_empty()) {
            Some(key) => Self::new(key),
            None => Err(CredentialsError::Missing),
        }
    }

    /// Authorization header value.
    ///
    /// The bare key is base64 encoded under the Basic scheme, with no
    /// `user:password` pair; the API expects exactly this encoding.
    pub fn authorization(&self) -> String {
        format!("Basic {}", BASE64_STANDARD.encode(&self.api_key))
    }
}
