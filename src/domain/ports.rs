use crate::domain::model::{ConsultationRequest, SubmissionResponse};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn submission_endpoint(&self) -> String;
    fn fallback_phone(&self) -> &str;
    fn notification_ttl_ms(&self) -> u64;
    fn output_prefix(&self) -> &str;
}

/// Delivers a consultation request to the submission function.
///
/// Implementations return `Ok` only for a 2xx response with a parseable body;
/// whether the body reports `success` is left to the caller.
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    async fn send(&self, request: &ConsultationRequest) -> Result<SubmissionResponse>;
}
