/// Status codes returned in the `status` field of a verifyReceipt response.
///
/// https://developer.apple.com/documentation/appstorereceipts/status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyStatus {
    Valid,
    /// The App Store could not read the JSON object you provided.
    Unreadable,
    /// The data in the receipt-data property was malformed or missing.
    ReceiptMalformed,
    /// The receipt could not be authenticated.
    NotAuthenticated,
    /// The shared secret you provided does not match the shared secret on
    /// file for your account.
    MismatchedSecret,
    /// The receipt server is not currently available.
    Unreachable,
    /// This receipt is valid but the subscription has expired.
    SubscriptionExpired,
    /// This receipt is from the test environment, but it was sent to the
    /// production environment for verification.
    ReceiptFromTest,
    /// This receipt is from the production environment, but it was sent to
    /// the test environment for verification.
    ReceiptFromProd,
    /// This receipt could not be authorized.
    Unauthorized,
    /// Internal data access error (21100-21199).
    InternalDataAccessError(i64),

    Other(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusSeverity {
    Valid,
    RetryHint,
    FatalConfigError,
    FatalContentError,
    WrongEnvironment,
    ExpiredButParseable,
    Unknown,
}

impl VerifyStatus {
    pub fn code(&self) -> i64 {
        match self {
            VerifyStatus::Valid => 0,
            VerifyStatus::Unreadable => 21000,
            VerifyStatus::ReceiptMalformed => 21002,
            VerifyStatus::NotAuthenticated => 21003,
            VerifyStatus::MismatchedSecret => 21004,
            VerifyStatus::Unreachable => 21005,
            VerifyStatus::SubscriptionExpired => 21006,
            VerifyStatus::ReceiptFromTest => 21007,
            VerifyStatus::ReceiptFromProd => 21008,
            VerifyStatus::Unauthorized => 21010,
            VerifyStatus::InternalDataAccessError(code) | VerifyStatus::Other(code) => *code,
        }
    }

    pub fn severity(&self) -> StatusSeverity {
        match self {
            VerifyStatus::Valid => StatusSeverity::Valid,
            VerifyStatus::Unreadable
            | VerifyStatus::Unreachable
            | VerifyStatus::InternalDataAccessError(_) => StatusSeverity::RetryHint,
            VerifyStatus::MismatchedSecret => StatusSeverity::FatalConfigError,
            VerifyStatus::ReceiptMalformed | VerifyStatus::NotAuthenticated => {
                StatusSeverity::FatalContentError
            }
            VerifyStatus::ReceiptFromTest | VerifyStatus::ReceiptFromProd => {
                StatusSeverity::WrongEnvironment
            }
            VerifyStatus::SubscriptionExpired => StatusSeverity::ExpiredButParseable,
            VerifyStatus::Unauthorized | VerifyStatus::Other(_) => StatusSeverity::Unknown,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            VerifyStatus::Valid => "The receipt is valid.",
            VerifyStatus::Unreadable => "The App Store could not read the JSON object you provided.",
            VerifyStatus::ReceiptMalformed => {
                "The data in the receipt-data property was malformed or missing."
            }
            VerifyStatus::NotAuthenticated => "The receipt could not be authenticated.",
            VerifyStatus::MismatchedSecret => {
                "The shared secret you provided does not match the shared secret on file for your account."
            }
            VerifyStatus::Unreachable => "The receipt server is not currently available.",
            VerifyStatus::SubscriptionExpired => {
                "This receipt is valid but the subscription has expired."
            }
            VerifyStatus::ReceiptFromTest => {
                "This receipt is from the test environment, but it was sent to the production environment for verification. Send it to the test environment instead."
            }
            VerifyStatus::ReceiptFromProd => {
                "This receipt is from the production environment, but it was sent to the test environment for verification. Send it to the production environment instead."
            }
            VerifyStatus::Unauthorized => "This receipt could not be authorized.",
            VerifyStatus::InternalDataAccessError(_) => "Internal data access error.",
            VerifyStatus::Other(_) => "",
        }
    }
}

impl From<i64> for VerifyStatus {
    fn from(code: i64) -> Self {
        match code {
            0 => VerifyStatus::Valid,
            21000 => VerifyStatus::Unreadable,
            21002 => VerifyStatus::ReceiptMalformed,
            21003 => VerifyStatus::NotAuthenticated,
            21004 => VerifyStatus::MismatchedSecret,
            21005 => VerifyStatus::Unreachable,
            21006 => VerifyStatus::SubscriptionExpired,
            21007 => VerifyStatus::ReceiptFromTest,
            21008 => VerifyStatus::ReceiptFromProd,
            21010 => VerifyStatus::Unauthorized,
            21100..=21199 => VerifyStatus::InternalDataAccessError(code),
            other => VerifyStatus::Other(other),
        }
    }
}
