use crate::scoring::{ScoringRequest, ScoringResponse};
use crate::server::ErrorResponse;
use crate::{Error, Result};
use std::time::Duration;
use tracing::debug;

/// Thin wrapper around the scoring endpoint used by the intake side. One
/// atomic submit per call; failures are reported to the caller, never
/// retried.
pub struct IntakeClient {
    client: reqwest::Client,
    endpoint: String,
}

impl IntakeClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub async fn submit(&self, request: &ScoringRequest) -> Result<ScoringResponse> {
        debug!("Submitting scoring request to {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = match response.json::<ErrorResponse>().await {
                Ok(body) => body.error,
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string(),
            };
            return Err(Error::Rejected {
                status: status.as_u16(),
                detail,
            });
        }

        Ok(response.json::<ScoringResponse>().await?)
    }
}
