use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReceiptVerificationError {
    /// Shared secret missing or rejected by Apple. Not retryable.
    #[error("configuration error: {0}")]
    ConfigurationError(String),

    #[error("failed to encode verifyReceipt request: {0}")]
    RequestEncoding(String),

    /// The callout could not be completed (connection, timeout, body read or
    /// non-2xx HTTP status).
    #[error("verifyReceipt callout to {url} failed: {message}")]
    TransportError {
        url: String,
        message: String,
        http_status: Option<u16>,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The response body was not a verifyReceipt envelope.
    #[error("malformed verifyReceipt envelope: {0}")]
    MalformedEnvelope(String),

    /// The envelope was readable, but its receipt info was not.
    #[error("malformed receipt info (status {status}): {message}")]
    MalformedShape { status: i64, message: String },

    /// Sandbox receipt sent to the production endpoint (21007).
    #[error("receipt is from the test environment but was sent to production")]
    WrongEnvironment,

    /// Production receipt sent to the sandbox endpoint (21008).
    #[error("receipt is from the production environment but was sent to sandbox")]
    ProductionReceiptInSandbox,

    /// Transient issue on Apple's side; the same request can be resent later.
    #[error("App Store could not process the receipt right now (status {status})")]
    Retryable { status: i64 },

    /// The receipt itself is bad; resending it will not help.
    #[error("receipt content is invalid (status {status})")]
    ContentInvalid { status: i64 },

    #[error("unrecognized verifyReceipt status {status}")]
    UnrecognizedStatus { status: i64 },
}

impl ReceiptVerificationError {
    /// Whether the caller may reasonably resend the same receipt later.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ReceiptVerificationError::Retryable { .. }
                | ReceiptVerificationError::TransportError { .. }
        )
    }

    /// Raw status code reported by Apple, if the error came from one.
    pub fn status(&self) -> Option<i64> {
        match self {
            ReceiptVerificationError::MalformedShape { status, .. }
            | ReceiptVerificationError::Retryable { status }
            | ReceiptVerificationError::ContentInvalid { status }
            | ReceiptVerificationError::UnrecognizedStatus { status } => Some(*status),
            ReceiptVerificationError::WrongEnvironment => Some(21007),
            ReceiptVerificationError::ProductionReceiptInSandbox => Some(21008),
            _ => None,
        }
    }

    /// `message` reads as "<function>; <what failed>; <debug payload>".
    pub(crate) fn transport(
        url: &str,
        function_name: &str,
        message: &str,
        source: reqwest::Error,
    ) -> Self {
        ReceiptVerificationError::TransportError {
            url: url.to_owned(),
            message: format!("{}; {}; {:?}", function_name, message, source),
            http_status: source.status().map(|s| s.as_u16()),
            source: Some(source),
        }
    }
}
