use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// The message is shown to the visitor as-is.
    #[error("No es la palabra correcta.")]
    InvalidKey,
}

/// Holds the passphrase and answers whether a candidate matches it.
///
/// The comparison is an exact, case-sensitive string match. Not cryptographic.
#[derive(Debug)]
pub struct AccessGate {
    secret: SecretString,
}

impl AccessGate {
    pub const DEFAULT_KEY: &'static str = "natillas";

    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    pub fn validate_key(&self, candidate: &str) -> bool {
        candidate == self.secret.expose_secret()
    }

    /// Like [`AccessGate::validate_key`], but as a `Result` for `?` call sites.
    pub fn check(&self, candidate: &str) -> Result<(), AccessError> {
        if self.validate_key(candidate) {
            Ok(())
        } else {
            Err(AccessError::InvalidKey)
        }
    }
}

impl Default for AccessGate {
    fn default() -> Self {
        Self::new(SecretString::from(Self::DEFAULT_KEY.to_string()))
    }
}
