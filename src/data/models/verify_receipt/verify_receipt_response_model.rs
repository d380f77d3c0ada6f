use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use serde_with::serde_as;

use super::common::{AppleDateFormat, Environment};

/// Top-level verifyReceipt response.
///
/// https://developer.apple.com/documentation/appstorereceipts/responsebody
///
/// The receipt info sub-documents are kept as generic JSON, since their shape
/// (single object or list) depends on the receipt style.
#[serde_as]
#[derive(Debug, Deserialize)]
pub(crate) struct VerifyReceiptResponseModel {
    pub(crate) status: i64,
    #[serde_as(as = "AppleDateFormat")]
    #[serde(default)]
    pub(crate) cancellation_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub(crate) latest_receipt_info: Option<Value>,
    #[serde(default)]
    pub(crate) latest_expired_receipt_info: Option<Value>,
    /// The environment for which the receipt was generated.
    #[serde(default)]
    pub(crate) environment: Option<Environment>,
    /// Only set for 21100-21199 status codes.
    #[serde(rename = "is-retryable", default)]
    pub(crate) is_retryable: bool,
}

/// Absent, null, `[]` and `{}` all count as "no receipt info".
pub(crate) fn is_empty_document(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    }
}
