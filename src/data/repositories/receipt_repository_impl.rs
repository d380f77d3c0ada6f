use async_trait::async_trait;
use tracing::debug;

use crate::{
    config::VerifyReceiptConfig,
    data::{
        datasources::verify_receipt_datasource::{
            VerifyReceiptDatasource, VerifyReceiptDatasourceImpl,
        },
        models::verify_receipt::verify_receipt_request_model::VerifyReceiptRequestModel,
        parsers::verify_receipt_response_parser::parse_verify_receipt_response,
    },
    domain::{
        entities::receipt_record::ReceiptRecord, repositories::receipt_repository::ReceiptRepository,
    },
    errors::ReceiptVerificationError,
    secrets::SharedSecret,
};

pub(crate) struct ReceiptRepositoryImpl<D: VerifyReceiptDatasource> {
    verify_receipt_datasource: D,
    production_url: String,
    sandbox_url: String,
}

#[async_trait]
impl<D: VerifyReceiptDatasource> ReceiptRepository for ReceiptRepositoryImpl<D> {
    async fn verify_receipt(
        &self,
        secret: &str,
        receipt_data: &str,
    ) -> Result<ReceiptRecord, ReceiptVerificationError> {
        let secret = SharedSecret::new(secret)?;
        let body = VerifyReceiptRequestModel::new(receipt_data, &secret).encode()?;

        // As per Apple's documentation, always try the production endpoint
        // first. Only the service knows which environment a receipt belongs
        // to, and it tells us with a 21007 status.
        //
        // https://developer.apple.com/library/archive/technotes/tn2413/_index.html#//apple_ref/doc/uid/DTS40016228-CH1-RECEIPTURL
        let production_response = self
            .verify_receipt_datasource
            .send_verify_request(&self.production_url, body.clone())
            .await?;
        match parse_verify_receipt_response(&production_response) {
            Err(ReceiptVerificationError::WrongEnvironment) => {
                debug!("sandbox receipt sent to production, retrying against sandbox");
                let sandbox_response = self
                    .verify_receipt_datasource
                    .send_verify_request(&self.sandbox_url, body)
                    .await?;
                parse_verify_receipt_response(&sandbox_response)
            }
            result => result,
        }
    }
}

impl<D: VerifyReceiptDatasource> ReceiptRepositoryImpl<D> {
    pub(crate) fn with_datasource(datasource: D, config: &VerifyReceiptConfig) -> Self {
        Self {
            verify_receipt_datasource: datasource,
            production_url: config.production_url.clone(),
            sandbox_url: config.sandbox_url.clone(),
        }
    }
}

impl ReceiptRepositoryImpl<VerifyReceiptDatasourceImpl> {
    pub(crate) fn new(config: &VerifyReceiptConfig) -> Result<Self, ReceiptVerificationError> {
        Ok(Self::with_datasource(
            VerifyReceiptDatasourceImpl::new(config.timeout)?,
            config,
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::VecDeque, sync::Mutex};

    use bytes::Bytes;
    use serde_json::json;

    use super::*;
    use crate::domain::entities::receipt_record::ReceiptStyle;

    /// Replays canned responses in order and records every request.
    struct MockVerifyReceiptDatasource {
        responses: Mutex<VecDeque<Result<Bytes, ReceiptVerificationError>>>,
        requests: Mutex<Vec<(String, Bytes)>>,
    }

    impl MockVerifyReceiptDatasource {
        fn new(responses: Vec<Result<Bytes, ReceiptVerificationError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<(String, Bytes)> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl VerifyReceiptDatasource for MockVerifyReceiptDatasource {
        async fn send_verify_request(
            &self,
            url: &str,
            body: Bytes,
        ) -> Result<Bytes, ReceiptVerificationError> {
            self.requests.lock().unwrap().push((url.to_owned(), body));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected extra verifyReceipt callout")
        }
    }

    fn ok(body: serde_json::Value) -> Result<Bytes, ReceiptVerificationError> {
        Ok(Bytes::from(serde_json::to_vec(&body).unwrap()))
    }

    fn valid_response() -> serde_json::Value {
        json!({
            "status": 0,
            "environment": "Production",
            "latest_receipt_info": [{
                "quantity": "1",
                "product_id": "com.example.monthly",
                "transaction_id": "1000000000000002",
                "original_transaction_id": "1000000000000001",
                "purchase_date": "2019-03-01 10:00:00 Etc/GMT",
                "expires_date": "2019-04-01 10:00:00 Etc/GMT",
                "is_trial_period": "true",
            }],
        })
    }

    fn repository(
        responses: Vec<Result<Bytes, ReceiptVerificationError>>,
    ) -> ReceiptRepositoryImpl<MockVerifyReceiptDatasource> {
        ReceiptRepositoryImpl::with_datasource(
            MockVerifyReceiptDatasource::new(responses),
            &VerifyReceiptConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_production_success_makes_single_call() {
        let repo = repository(vec![ok(valid_response())]);
        let record = repo.verify_receipt("secret", "receipt").await.unwrap();
        assert_eq!(record.product_id, "com.example.monthly");
        assert!(record.is_trial_period);
        assert_eq!(record.style, ReceiptStyle::Modern);

        let requests = repo.verify_receipt_datasource.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "https://buy.itunes.apple.com/verifyReceipt");
    }

    #[tokio::test]
    async fn test_sandbox_fallback_resends_identical_bytes() {
        let repo = repository(vec![ok(json!({"status": 21007})), ok(valid_response())]);
        let record = repo.verify_receipt("secret", "receipt").await.unwrap();
        assert_eq!(record.original_transaction_id, "1000000000000001");

        let requests = repo.verify_receipt_datasource.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].0, "https://buy.itunes.apple.com/verifyReceipt");
        assert_eq!(requests[1].0, "https://sandbox.itunes.apple.com/verifyReceipt");
        assert_eq!(requests[0].1, requests[1].1);

        let sent: serde_json::Value = serde_json::from_slice(&requests[0].1).unwrap();
        assert_eq!(
            sent,
            json!({
                "receipt-data": "receipt",
                "password": "secret",
                "exclude-old-transactions": "true",
            })
        );
    }

    #[tokio::test]
    async fn test_second_wrong_environment_is_surfaced() {
        let repo = repository(vec![
            ok(json!({"status": 21007})),
            ok(json!({"status": 21007})),
        ]);
        let result = repo.verify_receipt("secret", "receipt").await;
        assert!(matches!(
            result,
            Err(ReceiptVerificationError::WrongEnvironment)
        ));
        assert_eq!(repo.verify_receipt_datasource.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_other_errors_do_not_fall_back() {
        let repo = repository(vec![ok(json!({"status": 21004}))]);
        let result = repo.verify_receipt("secret", "receipt").await;
        assert!(matches!(
            result,
            Err(ReceiptVerificationError::ConfigurationError(_))
        ));
        assert_eq!(repo.verify_receipt_datasource.requests().len(), 1);

        let repo = repository(vec![ok(json!({"status": 21005}))]);
        let result = repo.verify_receipt("secret", "receipt").await;
        assert!(matches!(
            result,
            Err(ReceiptVerificationError::Retryable { status: 21005 })
        ));
        assert_eq!(repo.verify_receipt_datasource.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_secret_makes_no_calls() {
        let repo = repository(vec![]);
        let result = repo.verify_receipt("", "receipt").await;
        assert!(matches!(
            result,
            Err(ReceiptVerificationError::ConfigurationError(_))
        ));
        assert!(repo.verify_receipt_datasource.requests().is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_does_not_fall_back() {
        let repo = repository(vec![Err(ReceiptVerificationError::TransportError {
            url: "https://buy.itunes.apple.com/verifyReceipt".to_owned(),
            message: "timed out".to_owned(),
            http_status: None,
            source: None,
        })]);
        let result = repo.verify_receipt("secret", "receipt").await;
        assert!(matches!(
            result,
            Err(ReceiptVerificationError::TransportError { .. })
        ));
        assert_eq!(repo.verify_receipt_datasource.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_sandbox_transport_error_is_surfaced() {
        let repo = repository(vec![
            ok(json!({"status": 21007})),
            Err(ReceiptVerificationError::TransportError {
                url: "https://sandbox.itunes.apple.com/verifyReceipt".to_owned(),
                message: "callout returned with 503 status code".to_owned(),
                http_status: Some(503),
                source: None,
            }),
        ]);
        let result = repo.verify_receipt("secret", "receipt").await;
        assert!(matches!(
            result,
            Err(ReceiptVerificationError::TransportError {
                http_status: Some(503),
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_custom_endpoints_are_used() {
        let config = VerifyReceiptConfig {
            production_url: "http://localhost:8080/prod".to_owned(),
            sandbox_url: "http://localhost:8080/sandbox".to_owned(),
            ..VerifyReceiptConfig::default()
        };
        let repo = ReceiptRepositoryImpl::with_datasource(
            MockVerifyReceiptDatasource::new(vec![
                ok(json!({"status": 21007})),
                ok(valid_response()),
            ]),
            &config,
        );
        repo.verify_receipt("secret", "receipt").await.unwrap();
        let urls: Vec<String> = repo
            .verify_receipt_datasource
            .requests()
            .into_iter()
            .map(|(url, _)| url)
            .collect();
        assert_eq!(
            urls,
            vec!["http://localhost:8080/prod", "http://localhost:8080/sandbox"]
        );
    }
}
