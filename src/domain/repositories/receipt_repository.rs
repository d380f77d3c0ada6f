use async_trait::async_trait;

use crate::{domain::entities::receipt_record::ReceiptRecord, errors::ReceiptVerificationError};

#[async_trait]
pub trait ReceiptRepository: Send + Sync {
    /// Verifies the receipt against production, falling back to sandbox once
    /// if Apple reports a test receipt.
    async fn verify_receipt(
        &self,
        secret: &str,
        receipt_data: &str,
    ) -> Result<ReceiptRecord, ReceiptVerificationError>;
}
