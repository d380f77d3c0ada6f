use chrono::{DateTime, Utc};

/// Normalized view of the latest transaction in a verified receipt.
///
/// Timestamps are `None` when Apple omitted the field or sent it empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptRecord {
    pub product_id: String,
    /// Stays the same across subscription renewals; use this to identify the
    /// subscription.
    pub original_transaction_id: String,
    pub transaction_id: Option<String>,
    pub is_trial_period: bool,
    pub quantity: Option<u32>,
    pub purchase_time: Option<DateTime<Utc>>,
    pub original_purchase_time: Option<DateTime<Utc>>,
    pub expiration_time: Option<DateTime<Utc>>,
    pub cancellation_time: Option<DateTime<Utc>>,
    pub style: ReceiptStyle,
}

/// Which of the two receipt-info layouts the record was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptStyle {
    /// iOS 6 style: single object, expiry in `expires_date_formatted`.
    Legacy,
    /// iOS 7+ style: list of transactions, expiry in `expires_date`.
    Modern,
}

impl ReceiptRecord {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration_time.map(|t| t <= now).unwrap_or(false)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation_time.is_some()
    }
}
