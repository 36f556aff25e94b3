//! Warp10 push client
//!
//! Thin HTTP client over the Warp10 update endpoint: one POST per batch,
//! authenticated with the write token, success signaled only by an HTTP
//! 200. The response body is ignored beyond error reporting. No retries
//! and no partial commits; a failed push abandons the whole batch.

use reqwest::StatusCode;
use tracing::debug;

use crate::app::models::Batch;
use crate::constants::{WARP10_TOKEN_HEADER, WARP10_UPDATE_PATH};
use crate::{Error, Result};

/// Client for pushing batches to a Warp10 backend
#[derive(Debug, Clone)]
pub struct Warp10Client {
    client: reqwest::Client,
    update_url: String,
    token: String,
}

impl Warp10Client {
    /// Create a client for the given base endpoint and write token
    pub fn new(endpoint: &str, token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            update_url: build_update_url(endpoint),
            token: token.into(),
        }
    }

    /// Full URL the client pushes to
    pub fn update_url(&self) -> &str {
        &self.update_url
    }

    /// Push one batch in a single blocking call
    ///
    /// Success iff the backend answers HTTP 200; any other status — and
    /// any transport failure — is fatal for the batch.
    pub async fn push(&self, batch: &Batch) -> Result<()> {
        let body = batch.to_input_format();
        debug!(
            "Pushing {} series ({} datapoints) to {}",
            batch.len(),
            batch.datapoint_count(),
            self.update_url
        );

        let response = self
            .client
            .post(&self.update_url)
            .header(WARP10_TOKEN_HEADER, &self.token)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(body)
            .send()
            .await
            .map_err(|e| Error::delivery("push request failed", Some(e)))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::backend_rejected(status.as_u16(), body));
        }

        Ok(())
    }
}

/// Build the update URL from the configured base endpoint
fn build_update_url(endpoint: &str) -> String {
    format!("{}{}", endpoint.trim_end_matches('/'), WARP10_UPDATE_PATH)
}
