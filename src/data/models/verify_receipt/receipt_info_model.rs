use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr};

use super::common::AppleDateFormat;

/// Fields shared by both receipt styles.
///
/// https://developer.apple.com/documentation/appstorereceipts/responsebody/latest_receipt_info
///
/// Apple sends numbers and booleans in these records as strings.
#[serde_as]
#[derive(Debug, Deserialize)]
pub(crate) struct ReceiptInfoFieldsModel {
    /// The number of consumable products purchased.
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub(crate) quantity: Option<u32>,
    /// The unique identifier of the product purchased.
    pub(crate) product_id: String,
    /// A unique identifier for a transaction such as a purchase, restore, or
    /// renewal.
    #[serde(default)]
    pub(crate) transaction_id: Option<String>,
    /// The transaction identifier of the original purchase.
    pub(crate) original_transaction_id: String,
    /// The time the App Store charged the user's account for a purchased or
    /// restored product, or for a subscription purchase or renewal after a
    /// lapse.
    #[serde_as(as = "AppleDateFormat")]
    #[serde(default)]
    pub(crate) purchase_date: Option<DateTime<Utc>>,
    /// The time of the original app purchase.
    #[serde_as(as = "AppleDateFormat")]
    #[serde(default)]
    pub(crate) original_purchase_date: Option<DateTime<Utc>>,
    /// The time Apple customer support canceled a transaction, or the time an
    /// auto-renewable subscription plan was upgraded.
    #[serde_as(as = "AppleDateFormat")]
    #[serde(default)]
    pub(crate) cancellation_date: Option<DateTime<Utc>>,
    /// An indicator of whether a subscription is in the free trial period.
    #[serde_as(as = "DisplayFromStr")]
    #[serde(default)]
    pub(crate) is_trial_period: bool,
}

/// iOS 6 style receipt info: a single object, with the expiry under
/// `expires_date_formatted` (`expires_date` holds milliseconds).
#[serde_as]
#[derive(Debug, Deserialize)]
pub(crate) struct LegacyReceiptInfoModel {
    #[serde(flatten)]
    pub(crate) fields: ReceiptInfoFieldsModel,
    #[serde_as(as = "AppleDateFormat")]
    #[serde(default)]
    pub(crate) expires_date_formatted: Option<DateTime<Utc>>,
}

/// iOS 7+ style receipt info: one entry of the `latest_receipt_info` list.
#[serde_as]
#[derive(Debug, Deserialize)]
pub(crate) struct ModernReceiptInfoModel {
    #[serde(flatten)]
    pub(crate) fields: ReceiptInfoFieldsModel,
    /// The time a subscription expires or when it will renew.
    #[serde_as(as = "AppleDateFormat")]
    #[serde(default)]
    pub(crate) expires_date: Option<DateTime<Utc>>,
}

#[derive(Debug)]
pub(crate) enum ReceiptInfoModel {
    Legacy(LegacyReceiptInfoModel),
    Modern(ModernReceiptInfoModel),
}

impl ReceiptInfoModel {
    pub(crate) fn expires_date(&self) -> Option<DateTime<Utc>> {
        match self {
            ReceiptInfoModel::Legacy(m) => m.expires_date_formatted,
            ReceiptInfoModel::Modern(m) => m.expires_date,
        }
    }
}
