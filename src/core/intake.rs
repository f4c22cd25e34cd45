use crate::domain::model::{ConsultationRequest, SubmissionResponse};
use crate::domain::ports::Storage;
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::is_plausible_email;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A consultation request as persisted by the intake function.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredConsultation {
    pub id: Uuid,
    pub received_at: DateTime<Utc>,
    #[serde(flatten)]
    pub request: ConsultationRequest,
}

/// Shown to the visitor when the request was valid but could not be filed.
pub const STORAGE_FAILURE_MESSAGE: &str = "Unable to save your request. Please try again later.";

/// What the intake function did with one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeOutcome {
    Accepted { key: String },
    /// The payload itself was at fault; the message is safe to show.
    Rejected(String),
    /// The payload was fine but filing it failed.
    Failed,
}

impl IntakeOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, IntakeOutcome::Accepted { .. })
    }

    pub fn into_response(self) -> SubmissionResponse {
        match self {
            IntakeOutcome::Accepted { .. } => SubmissionResponse::ok(),
            IntakeOutcome::Rejected(message) => SubmissionResponse::failed(message),
            IntakeOutcome::Failed => SubmissionResponse::failed(STORAGE_FAILURE_MESSAGE),
        }
    }
}

/// Server side of the booking form: checks the payload and files it.
pub struct ConsultationIntake<S: Storage> {
    storage: S,
    prefix: String,
}

impl<S: Storage> ConsultationIntake<S> {
    pub fn new(storage: S, prefix: impl Into<String>) -> Self {
        Self {
            storage,
            prefix: prefix.into(),
        }
    }

    /// Never fails outright; every problem is folded into the response body.
    pub async fn handle(&self, request: ConsultationRequest) -> SubmissionResponse {
        self.process(request).await.into_response()
    }

    pub async fn process(&self, request: ConsultationRequest) -> IntakeOutcome {
        self.process_at(Utc::now(), request).await
    }

    pub async fn process_at(
        &self,
        now: DateTime<Utc>,
        request: ConsultationRequest,
    ) -> IntakeOutcome {
        match self.accept(now, request).await {
            Ok(key) => {
                tracing::info!("✅ Consultation request stored at {}", key);
                IntakeOutcome::Accepted { key }
            }
            Err(SiteError::ValidationError { message }) => {
                tracing::warn!("Rejected consultation request: {}", message);
                IntakeOutcome::Rejected(message)
            }
            Err(e) => {
                tracing::error!("❌ Failed to store consultation request: {}", e);
                IntakeOutcome::Failed
            }
        }
    }

    async fn accept(&self, now: DateTime<Utc>, request: ConsultationRequest) -> Result<String> {
        check_request(&request)?;

        let record = StoredConsultation {
            id: Uuid::new_v4(),
            received_at: now,
            request,
        };
        let key = format!(
            "{}/{}/{}.json",
            self.prefix.trim_end_matches('/'),
            now.format("%Y-%m-%d"),
            record.id
        );
        let body = serde_json::to_vec_pretty(&record)?;
        self.storage.write_file(&key, &body).await?;
        Ok(key)
    }
}

/// The function cannot trust the browser's `required` checks.
fn check_request(request: &ConsultationRequest) -> Result<()> {
    let missing = request.missing_required();
    if !missing.is_empty() {
        return Err(SiteError::validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }
    if !is_plausible_email(&request.email) {
        return Err(SiteError::validation("Invalid email address"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
        fail_writes: bool,
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            if self.fail_writes {
                return Err(SiteError::StorageError {
                    message: "disk full".to_string(),
                });
            }
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    fn request() -> ConsultationRequest {
        ConsultationRequest {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            company: "Acme Logistics".to_string(),
            email: "jane@acme.com".to_string(),
            phone: "555-0100".to_string(),
            practice_area: "wage-hour".to_string(),
            case_description: "PAGA notice received".to_string(),
            consultation_type: "phone".to_string(),
            timezone: "America/Los_Angeles".to_string(),
            preferred_date: "2026-03-10".to_string(),
            preferred_time: "10:00".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_accepted_request_is_stored_by_date() {
        let storage = MockStorage::default();
        let intake = ConsultationIntake::new(storage.clone(), "consultations/");
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 17, 30, 0).unwrap();

        let outcome = intake.process_at(now, request()).await;

        assert!(outcome.is_accepted());
        assert_eq!(outcome.into_response(), SubmissionResponse::ok());
        let files = storage.files.lock().await;
        assert_eq!(files.len(), 1);
        let (key, body) = files.iter().next().unwrap();
        assert!(key.starts_with("consultations/2026-03-02/"));
        assert!(key.ends_with(".json"));

        let stored: StoredConsultation = serde_json::from_slice(body).unwrap();
        assert_eq!(stored.received_at, now);
        assert_eq!(stored.request, request());
        let raw: serde_json::Value = serde_json::from_slice(body).unwrap();
        assert_eq!(raw["firstName"], "Jane");
    }

    #[tokio::test]
    async fn test_missing_fields_are_rejected() {
        let storage = MockStorage::default();
        let intake = ConsultationIntake::new(storage.clone(), "consultations");
        let mut incomplete = request();
        incomplete.company.clear();
        incomplete.phone = "  ".to_string();

        let outcome = intake.process(incomplete).await;

        assert_eq!(
            outcome,
            IntakeOutcome::Rejected("Missing required fields: company, phone".to_string())
        );
        let response = outcome.into_response();
        assert!(!response.success);
        assert_eq!(
            response.error.as_deref(),
            Some("Missing required fields: company, phone")
        );
        assert!(storage.files.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_is_generic() {
        let storage = MockStorage {
            fail_writes: true,
            ..Default::default()
        };
        let intake = ConsultationIntake::new(storage, "consultations");

        assert_eq!(intake.process(request()).await, IntakeOutcome::Failed);

        let response = intake.handle(request()).await;
        assert!(!response.success);
        let message = response.error.unwrap();
        assert_eq!(message, STORAGE_FAILURE_MESSAGE);
        assert!(!message.contains("disk full"));
    }
}
