use crate::domain::model::{ConsultationRequest, SubmissionResponse};
use crate::domain::ports::{ConfigProvider, SubmissionTransport};
use crate::utils::error::{Result, SiteError};
use async_trait::async_trait;
use reqwest::Client;

pub const DEFAULT_FUNCTION_PATH: &str = "/.netlify/functions/submit-consultation";

/// Posts consultation requests as JSON to the submission function.
#[derive(Debug, Clone)]
pub struct HttpSubmissionTransport {
    client: Client,
    endpoint: String,
}

impl HttpSubmissionTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.submission_endpoint())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SubmissionTransport for HttpSubmissionTransport {
    async fn send(&self, request: &ConsultationRequest) -> Result<SubmissionResponse> {
        tracing::debug!("Making API request to: {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(SiteError::SubmissionFailed {
                message: format!("HTTP {}", status),
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<SubmissionResponse>(&body).map_err(|e| {
            tracing::debug!("Unexpected response body ({}): {}", e, body);
            SiteError::SubmissionFailed {
                message: "Unexpected response from submission service".to_string(),
            }
        })
    }
}
