use std::time::Duration;

pub const APPLE_VERIFY_RECEIPT_PRODUCTION_URL: &str = "https://buy.itunes.apple.com/verifyReceipt";
pub const APPLE_VERIFY_RECEIPT_SANDBOX_URL: &str =
    "https://sandbox.itunes.apple.com/verifyReceipt";

/// Upper bound for a single verifyReceipt callout. A full verification can
/// take up to twice this long if the sandbox fallback is needed.
pub const VERIFY_RECEIPT_TIMEOUT: Duration = Duration::from_secs(20);
