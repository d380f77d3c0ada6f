use std::fmt;

use crate::errors::ReceiptVerificationError;

/// App-specific shared secret from App Store Connect, sent as the `password`
/// field of every verifyReceipt request.
#[derive(Clone, PartialEq, Eq)]
pub struct SharedSecret(String);

impl SharedSecret {
    pub fn new(value: impl Into<String>) -> Result<Self, ReceiptVerificationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ReceiptVerificationError::ConfigurationError(
                "App Store shared secret should have been set".to_owned(),
            ));
        }
        Ok(Self(value))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(<redacted>)")
    }
}
