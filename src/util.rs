use crate::{
    config::VerifyReceiptConfig,
    data::{
        datasources::verify_receipt_datasource::VerifyReceiptDatasourceImpl,
        repositories::receipt_repository_impl::ReceiptRepositoryImpl,
    },
    domain::{
        entities::receipt_record::ReceiptRecord, repositories::receipt_repository::ReceiptRepository,
    },
    errors::ReceiptVerificationError,
    secrets::SharedSecret,
};

pub struct ReceiptUtil<R: ReceiptRepository> {
    receipt_repository: R,
}

impl<R: ReceiptRepository> ReceiptUtil<R> {
    /// Wraps a custom repository, e.g. a stub in downstream tests.
    pub fn from_repository(receipt_repository: R) -> Self {
        Self { receipt_repository }
    }

    pub async fn verify_receipt(
        &self,
        secret: &str,
        receipt_data: &str,
    ) -> Result<ReceiptRecord, ReceiptVerificationError> {
        self.receipt_repository
            .verify_receipt(secret, receipt_data)
            .await
    }

    pub async fn verify_receipt_with_secret(
        &self,
        secret: &SharedSecret,
        receipt_data: &str,
    ) -> Result<ReceiptRecord, ReceiptVerificationError> {
        self.verify_receipt(secret.expose(), receipt_data).await
    }
}

impl ReceiptUtil<ReceiptRepositoryImpl<VerifyReceiptDatasourceImpl>> {
    pub fn new(config: VerifyReceiptConfig) -> Result<Self, ReceiptVerificationError> {
        Ok(Self {
            receipt_repository: ReceiptRepositoryImpl::new(&config)?,
        })
    }
}

/// Verifies a receipt against Apple's endpoints using the default
/// configuration.
pub async fn verify_receipt(
    secret: &str,
    receipt_data: &str,
) -> Result<ReceiptRecord, ReceiptVerificationError> {
    ReceiptUtil::new(VerifyReceiptConfig::default())?
        .verify_receipt(secret, receipt_data)
        .await
}
