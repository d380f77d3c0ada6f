use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use crate::{errors::ReceiptVerificationError, secrets::SharedSecret};

/// Request body for verifyReceipt.
///
/// https://developer.apple.com/documentation/appstorereceipts/requestbody
#[serde_as]
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct VerifyReceiptRequestModel {
    /// The Base64-encoded receipt data.
    pub(crate) receipt_data: String,
    /// Your app's shared secret.
    pub(crate) password: String,
    /// Only include the latest renewal transaction for any subscriptions.
    /// Apple expects this as a string.
    #[serde_as(as = "DisplayFromStr")]
    pub(crate) exclude_old_transactions: bool,
}

impl VerifyReceiptRequestModel {
    pub(crate) fn new(receipt_data: &str, secret: &SharedSecret) -> Self {
        Self {
            receipt_data: receipt_data.to_owned(),
            password: secret.expose().to_owned(),
            exclude_old_transactions: true,
        }
    }

    /// Encodes once into an immutable buffer, so the exact same bytes can be
    /// sent to both endpoints.
    pub(crate) fn encode(&self) -> Result<Bytes, ReceiptVerificationError> {
        serde_json::to_vec(self)
            .map(Bytes::from)
            .map_err(|e| ReceiptVerificationError::RequestEncoding(e.to_string()))
    }
}
