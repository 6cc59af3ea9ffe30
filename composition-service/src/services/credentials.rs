//! Where the upstream API key comes from.

use secrecy::{ExposeSecret, Secret};
use std::env;

/// Source of the upstream credential, consulted on every request.
///
/// `Env` re-reads the variable each time so a key exported after startup
/// is picked up without a restart. Blank values count as absent.
#[derive(Debug, Clone)]
pub enum CredentialSource {
    Env(String),
    Fixed(Option<Secret<String>>),
}

impl CredentialSource {
    pub fn from_env(var: impl Into<String>) -> Self {
        CredentialSource::Env(var.into())
    }

    pub fn fixed(key: Option<&str>) -> Self {
        CredentialSource::Fixed(key.map(|k| Secret::new(k.to_string())))
    }

    /// Current key, if one is configured.
    pub fn api_key(&self) -> Option<Secret<String>> {
        match self {
            CredentialSource::Env(var) => env::var(var)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(Secret::new),
            CredentialSource::Fixed(key) => key
                .clone()
                .filter(|k| !k.expose_secret().trim().is_empty()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }
}
