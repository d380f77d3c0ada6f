use serde_json::Value;
use tracing::{debug, error, warn};

use crate::{
    data::models::verify_receipt::{
        receipt_info_model::{LegacyReceiptInfoModel, ModernReceiptInfoModel, ReceiptInfoModel},
        verify_receipt_response_model::{is_empty_document, VerifyReceiptResponseModel},
    },
    domain::entities::{
        receipt_record::{ReceiptRecord, ReceiptStyle},
        verify_status::VerifyStatus,
    },
    errors::ReceiptVerificationError,
};

/// Turns a raw verifyReceipt response body into the latest receipt record, or
/// into an error classified by the response status.
pub(crate) fn parse_verify_receipt_response(
    data: &[u8],
) -> Result<ReceiptRecord, ReceiptVerificationError> {
    let response: VerifyReceiptResponseModel = serde_json::from_slice(data).map_err(|e| {
        warn!(error = %e, "verifyReceipt response could not be decoded");
        ReceiptVerificationError::MalformedEnvelope(e.to_string())
    })?;
    let status = VerifyStatus::from(response.status);
    debug!(
        status = response.status,
        environment = ?response.environment,
        "decoded verifyReceipt response"
    );

    // Expired info wins whenever it is present, or when Apple says the
    // subscription expired, regardless of latest_receipt_info.
    let expired_info = response
        .latest_expired_receipt_info
        .filter(|v| !is_empty_document(v));
    let receipt_info_data = if status == VerifyStatus::SubscriptionExpired || expired_info.is_some()
    {
        expired_info
    } else {
        response
            .latest_receipt_info
            .filter(|v| !is_empty_document(v))
    };

    if let Some(receipt_info) = receipt_info_data
        .map(|data| decode_receipt_info(data, response.status))
        .transpose()?
        .flatten()
    {
        let mut record = ReceiptRecord::from(receipt_info);
        if record.cancellation_time.is_none() {
            record.cancellation_time = response.cancellation_date;
        }
        return Ok(record);
    }

    Err(classify_status(status, response.is_retryable))
}

/// Probes the generic shape first, then commits to one of the two concrete
/// decoders. `Ok(None)` means neither shape matched.
fn decode_receipt_info(
    data: Value,
    status: i64,
) -> Result<Option<ReceiptInfoModel>, ReceiptVerificationError> {
    match data {
        Value::Object(fields) => {
            serde_json::from_value::<LegacyReceiptInfoModel>(Value::Object(fields))
                .map(|m| Some(ReceiptInfoModel::Legacy(m)))
                .map_err(|e| {
                    warn!(status, error = %e, "failed to decode iOS 6 style receipt info");
                    ReceiptVerificationError::MalformedShape {
                        status,
                        message: format!("legacy receipt info: {e}"),
                    }
                })
        }
        Value::Array(items) => {
            let mut infos = serde_json::from_value::<Vec<ModernReceiptInfoModel>>(Value::Array(
                items,
            ))
            .map_err(|e| {
                warn!(status, error = %e, "failed to decode iOS 7+ style receipt info");
                ReceiptVerificationError::MalformedShape {
                    status,
                    message: format!("receipt info list: {e}"),
                }
            })?;
            // Earlier entries are superseded renewals.
            Ok(infos.pop().map(ReceiptInfoModel::Modern))
        }
        _ => Ok(None),
    }
}

fn classify_status(status: VerifyStatus, is_retryable: bool) -> ReceiptVerificationError {
    let code = status.code();
    match status {
        VerifyStatus::ReceiptFromTest => ReceiptVerificationError::WrongEnvironment,
        VerifyStatus::ReceiptFromProd => ReceiptVerificationError::ProductionReceiptInSandbox,
        VerifyStatus::Unreadable
        | VerifyStatus::Unreachable
        | VerifyStatus::InternalDataAccessError(_) => {
            ReceiptVerificationError::Retryable { status: code }
        }
        VerifyStatus::ReceiptMalformed | VerifyStatus::NotAuthenticated => {
            ReceiptVerificationError::ContentInvalid { status: code }
        }
        VerifyStatus::MismatchedSecret => {
            error!("tried to verify receipt with wrong shared secret");
            ReceiptVerificationError::ConfigurationError(status.description().to_owned())
        }
        VerifyStatus::Valid => ReceiptVerificationError::MalformedShape {
            status: code,
            message: "valid status, but no receipt info".to_owned(),
        },
        _ if is_retryable => ReceiptVerificationError::Retryable { status: code },
        _ => ReceiptVerificationError::UnrecognizedStatus { status: code },
    }
}

impl From<ReceiptInfoModel> for ReceiptRecord {
    fn from(m: ReceiptInfoModel) -> Self {
        let expiration_time = m.expires_date();
        let (fields, style) = match m {
            ReceiptInfoModel::Legacy(l) => (l.fields, ReceiptStyle::Legacy),
            ReceiptInfoModel::Modern(l) => (l.fields, ReceiptStyle::Modern),
        };
        ReceiptRecord {
            product_id: fields.product_id,
            original_transaction_id: fields.original_transaction_id,
            transaction_id: fields.transaction_id,
            is_trial_period: fields.is_trial_period,
            quantity: fields.quantity,
            purchase_time: fields.purchase_date,
            original_purchase_time: fields.original_purchase_date,
            expiration_time,
            cancellation_time: fields.cancellation_date,
            style,
        }
    }
}
