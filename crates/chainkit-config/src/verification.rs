//! Contract-verification service credential

use std::fmt;

use crate::{Error, Result};

/// Secret consulted when a definition does not name one
pub const DEFAULT_VERIFICATION_SECRET: &str = "ETHERSCAN_API_KEY";

/// API key for the external verification service.
///
/// A missing key is not an error until verification is attempted, since
/// compiling and local deployment never need it.
#[derive(Clone, PartialEq, Eq)]
pub struct VerificationCredential {
    secret: String,
    api_key: Option<String>,
}

impl VerificationCredential {
    pub fn new(secret: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            secret: secret.into(),
            api_key,
        }
    }

    /// Name of the secret the key is read from
    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// The key, for the verification uploader
    pub fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| Error::MissingVerificationKey {
                secret: self.secret.clone(),
            })
    }
}

impl fmt::Debug for VerificationCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationCredential")
            .field("secret", &self.secret)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_key_errors_on_use() {
        let credential = VerificationCredential::new(DEFAULT_VERIFICATION_SECRET, None);
        assert!(!credential.is_configured());

        let err = credential.api_key().unwrap_err();
        assert!(err.is_deferred());
        assert!(err.to_string().contains("ETHERSCAN_API_KEY"));
    }

    #[test]
    fn present_key_is_returned_and_redacted() {
        let credential =
            VerificationCredential::new(DEFAULT_VERIFICATION_SECRET, Some("T5352QKQ".into()));
        assert_eq!(credential.api_key().unwrap(), "T5352QKQ");
        assert!(!format!("{credential:?}").contains("T5352QKQ"));
    }
}
