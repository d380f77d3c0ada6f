use std::time::Duration;

use crate::constants::{
    APPLE_VERIFY_RECEIPT_PRODUCTION_URL, APPLE_VERIFY_RECEIPT_SANDBOX_URL, VERIFY_RECEIPT_TIMEOUT,
};

#[derive(Debug, Clone)]
pub struct VerifyReceiptConfig {
    /// Tried first for every receipt.
    pub production_url: String,
    /// Only tried if production reports a sandbox receipt.
    pub sandbox_url: String,
    /// Applied to each callout independently.
    pub timeout: Duration,
}

impl Default for VerifyReceiptConfig {
    fn default() -> Self {
        Self {
            production_url: APPLE_VERIFY_RECEIPT_PRODUCTION_URL.to_owned(),
            sandbox_url: APPLE_VERIFY_RECEIPT_SANDBOX_URL.to_owned(),
            timeout: VERIFY_RECEIPT_TIMEOUT,
        }
    }
}
