use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

use crate::errors::ReceiptVerificationError;

const FUNCTION_NAME: &str = "VerifyReceipt";

#[async_trait]
pub(crate) trait VerifyReceiptDatasource: Send + Sync {
    /// verifyReceipt:
    /// https://developer.apple.com/documentation/appstorereceipts/verifyreceipt
    ///
    /// url:
    ///   Either the production or the sandbox verifyReceipt endpoint.
    /// body:
    ///   The already-encoded request body. Sent as-is.
    ///
    /// Returns the raw response body. A non-2xx HTTP status is returned as
    /// `TransportError` with `http_status` set, so such bodies never reach
    /// the response parser.
    async fn send_verify_request(
        &self,
        url: &str,
        body: Bytes,
    ) -> Result<Bytes, ReceiptVerificationError>;
}

pub(crate) struct VerifyReceiptDatasourceImpl {
    client: reqwest::Client,
}

#[async_trait]
impl VerifyReceiptDatasource for VerifyReceiptDatasourceImpl {
    async fn send_verify_request(
        &self,
        url: &str,
        body: Bytes,
    ) -> Result<Bytes, ReceiptVerificationError> {
        debug!(url, body_len = body.len(), "sending verifyReceipt request");
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                warn!(url, error = %e, "verifyReceipt callout failed to send");
                ReceiptVerificationError::transport(
                    url,
                    FUNCTION_NAME,
                    "callout failed to send",
                    e,
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, %status, "verifyReceipt callout returned non-success status");
            return Err(ReceiptVerificationError::TransportError {
                url: url.to_owned(),
                message: format!(
                    "{}; callout returned with {} status code; {}",
                    FUNCTION_NAME,
                    status,
                    response.text().await.unwrap_or_default()
                ),
                http_status: Some(status.as_u16()),
                source: None,
            });
        }

        response.bytes().await.map_err(|e| {
            warn!(url, error = %e, "failed to read verifyReceipt response body");
            ReceiptVerificationError::transport(
                url,
                FUNCTION_NAME,
                "failed to read callout response",
                e,
            )
        })
    }
}

impl VerifyReceiptDatasourceImpl {
    pub(crate) fn new(timeout: Duration) -> Result<Self, ReceiptVerificationError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                ReceiptVerificationError::ConfigurationError(format!(
                    "failed to build HTTP client: {e}"
                ))
            })?;
        Ok(Self { client })
    }
}
