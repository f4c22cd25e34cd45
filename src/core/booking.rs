use crate::core::notify::{NotificationCenter, NotificationKind};
use crate::domain::model::{ConsultationRequest, SubmitStatus};
use crate::domain::ports::{ConfigProvider, SubmissionTransport};
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::is_plausible_email;
use chrono::{Days, Local, Months, NaiveDate};

pub const DEFAULT_TIMEZONE: &str = "America/Los_Angeles";

pub const SUCCESS_MESSAGE: &str = "Thank you! Your consultation request has been received. \
     Our team will contact you within one business day to confirm your appointment.";

/// Bounds for the preferred/alternate date pickers: tomorrow through three
/// months out. Fixed when computed; a form left open past midnight keeps them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateBounds {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

impl DateBounds {
    pub fn from_today(today: NaiveDate) -> Self {
        Self {
            min: today.checked_add_days(Days::new(1)).unwrap_or(today),
            max: today.checked_add_months(Months::new(3)).unwrap_or(today),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.min <= date && date <= self.max
    }

    /// `min`/`max` attribute values for a date input.
    pub fn as_input_attrs(&self) -> (String, String) {
        (
            self.min.format("%Y-%m-%d").to_string(),
            self.max.format("%Y-%m-%d").to_string(),
        )
    }
}

impl ConsultationRequest {
    /// A blank form with the controlled defaults filled in.
    pub fn with_defaults() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            ..Default::default()
        }
    }

    /// Wire names of required fields that are empty or whitespace.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let required = [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("company", &self.company),
            ("email", &self.email),
            ("phone", &self.phone),
            ("practiceArea", &self.practice_area),
            ("caseDescription", &self.case_description),
            ("consultationType", &self.consultation_type),
            ("timezone", &self.timezone),
            ("preferredDate", &self.preferred_date),
            ("preferredTime", &self.preferred_time),
        ];
        required
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect()
    }

    /// The checks a browser runs before letting the form submit.
    pub fn validate(&self, bounds: &DateBounds) -> Result<()> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(SiteError::validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        if !is_plausible_email(&self.email) {
            return Err(SiteError::validation(format!(
                "'{}' is not a valid email address",
                self.email
            )));
        }

        check_date("preferredDate", &self.preferred_date, bounds)?;
        if !self.alternate_date.trim().is_empty() {
            check_date("alternateDate", &self.alternate_date, bounds)?;
        }
        Ok(())
    }

    /// Sets a field by its wire name, e.g. `practiceArea`.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        let slot = match name {
            "firstName" => &mut self.first_name,
            "lastName" => &mut self.last_name,
            "company" => &mut self.company,
            "jobTitle" => &mut self.job_title,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "practiceArea" => &mut self.practice_area,
            "caseDescription" => &mut self.case_description,
            "consultationType" => &mut self.consultation_type,
            "timezone" => &mut self.timezone,
            "preferredDate" => &mut self.preferred_date,
            "preferredTime" => &mut self.preferred_time,
            "alternateDate" => &mut self.alternate_date,
            "alternateTime" => &mut self.alternate_time,
            "referralSource" => &mut self.referral_source,
            "additionalNotes" => &mut self.additional_notes,
            other => {
                return Err(SiteError::validation(format!("unknown form field '{}'", other)));
            }
        };
        *slot = value.into();
        Ok(())
    }
}

fn check_date(field: &str, value: &str, bounds: &DateBounds) -> Result<()> {
    let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        SiteError::validation(format!("{} '{}' is not a YYYY-MM-DD date", field, value))
    })?;
    if !bounds.contains(date) {
        let (min, max) = bounds.as_input_attrs();
        return Err(SiteError::validation(format!(
            "{} must be between {} and {}",
            field, min, max
        )));
    }
    Ok(())
}

pub fn error_message(fallback_phone: &str) -> String {
    format!(
        "We couldn't submit your request. Please call us directly at {} to schedule your consultation.",
        fallback_phone
    )
}

/// Holds `is_submitting` up while a request is in flight. Cleared on drop, so
/// a cancelled `submit` future cannot leave the flag set.
struct SubmittingFlag<'a>(&'a mut bool);

impl<'a> SubmittingFlag<'a> {
    fn raise(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for SubmittingFlag<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

/// Owns the booking form's state and drives a single submission at a time.
pub struct ConsultationFormController<T: SubmissionTransport> {
    transport: T,
    notifications: NotificationCenter,
    fallback_phone: String,
    form: ConsultationRequest,
    is_submitting: bool,
    status: SubmitStatus,
    date_bounds: DateBounds,
}

impl<T: SubmissionTransport> ConsultationFormController<T> {
    pub fn new(
        transport: T,
        notifications: NotificationCenter,
        fallback_phone: impl Into<String>,
        today: NaiveDate,
    ) -> Self {
        Self {
            transport,
            notifications,
            fallback_phone: fallback_phone.into(),
            form: ConsultationRequest::with_defaults(),
            is_submitting: false,
            status: SubmitStatus::Idle,
            date_bounds: DateBounds::from_today(today),
        }
    }

    pub fn from_config<C: ConfigProvider>(transport: T, config: &C) -> Self {
        Self::new(
            transport,
            NotificationCenter::new(config.notification_ttl_ms()),
            config.fallback_phone(),
            Local::now().date_naive(),
        )
    }

    pub fn form(&self) -> &ConsultationRequest {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ConsultationRequest {
        &mut self.form
    }

    pub fn set_form(&mut self, form: ConsultationRequest) {
        self.form = form;
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    pub fn date_bounds(&self) -> DateBounds {
        self.date_bounds
    }

    pub fn refresh_date_bounds(&mut self, today: NaiveDate) {
        self.date_bounds = DateBounds::from_today(today);
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn reset(&mut self) {
        self.form = ConsultationRequest::with_defaults();
    }

    /// Validates, posts the form and reports the outcome through the
    /// notification center.
    ///
    /// `Err` means the form never left: a required field is blank or a date
    /// is out of range. A rejected or failed request is reported and comes
    /// back as `Ok(SubmitStatus::Error)`.
    pub async fn submit(&mut self) -> Result<SubmitStatus> {
        self.form.validate(&self.date_bounds)?;

        self.status = SubmitStatus::Idle;
        tracing::info!(
            "📨 Submitting consultation request for {} {} ({})",
            self.form.first_name,
            self.form.last_name,
            self.form.practice_area
        );

        let outcome = {
            let _submitting = SubmittingFlag::raise(&mut self.is_submitting);
            self.transport.send(&self.form).await
        };

        let failure = match outcome {
            Ok(response) if response.success => None,
            Ok(response) => Some(
                response
                    .error
                    .unwrap_or_else(|| "Submission was not accepted".to_string()),
            ),
            Err(e) => Some(e.to_string()),
        };

        match failure {
            None => {
                tracing::info!("✅ Consultation request accepted");
                self.status = SubmitStatus::Success;
                self.reset();
                self.notifications
                    .publish(NotificationKind::Success, SUCCESS_MESSAGE);
            }
            Some(reason) => {
                tracing::error!("❌ Consultation submission failed: {}", reason);
                self.status = SubmitStatus::Error;
                self.notifications
                    .publish(NotificationKind::Error, error_message(&self.fallback_phone));
            }
        }

        Ok(self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::SubmissionResponse;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    struct MockTransport {
        reply: fn() -> Result<SubmissionResponse>,
        sent: Arc<Mutex<Vec<ConsultationRequest>>>,
    }

    impl MockTransport {
        fn new(reply: fn() -> Result<SubmissionResponse>) -> Self {
            Self {
                reply,
                sent: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl SubmissionTransport for MockTransport {
        async fn send(&self, request: &ConsultationRequest) -> Result<SubmissionResponse> {
            self.sent.lock().unwrap().push(request.clone());
            (self.reply)()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn filled_form() -> ConsultationRequest {
        ConsultationRequest {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            company: "Acme Logistics".to_string(),
            email: "jane@acme.com".to_string(),
            phone: "555-0100".to_string(),
            practice_area: "wage-hour".to_string(),
            case_description: "PAGA notice received".to_string(),
            consultation_type: "video".to_string(),
            preferred_date: "2026-03-10".to_string(),
            preferred_time: "10:00".to_string(),
            ..ConsultationRequest::with_defaults()
        }
    }

    #[test]
    fn test_date_bounds() {
        let bounds = DateBounds::from_today(today());
        assert_eq!(bounds.min, NaiveDate::from_ymd_opt(2026, 3, 3).unwrap());
        assert_eq!(bounds.max, NaiveDate::from_ymd_opt(2026, 6, 2).unwrap());
        assert_eq!(
            bounds.as_input_attrs(),
            ("2026-03-03".to_string(), "2026-06-02".to_string())
        );

        let month_end = DateBounds::from_today(NaiveDate::from_ymd_opt(2026, 11, 30).unwrap());
        assert_eq!(month_end.max, NaiveDate::from_ymd_opt(2027, 2, 28).unwrap());
    }

    #[test]
    fn test_missing_required() {
        let form = ConsultationRequest::with_defaults();
        let missing = form.missing_required();
        assert_eq!(missing.len(), 10);
        assert!(!missing.contains(&"timezone"));
        assert!(!missing.contains(&"jobTitle"));
        assert!(filled_form().missing_required().is_empty());
    }

    #[test]
    fn test_validate_dates() {
        let bounds = DateBounds::from_today(today());
        assert!(filled_form().validate(&bounds).is_ok());

        let mut form = filled_form();
        form.preferred_date = "2026-03-02".to_string();
        assert!(form.validate(&bounds).is_err());

        let mut form = filled_form();
        form.alternate_date = "03/12/2026".to_string();
        assert!(form.validate(&bounds).is_err());

        let mut form = filled_form();
        form.alternate_date = "2026-06-02".to_string();
        assert!(form.validate(&bounds).is_ok());
    }

    #[test]
    fn test_set_field() {
        let mut form = ConsultationRequest::default();
        form.set_field("practiceArea", "paga").unwrap();
        form.set_field("additionalNotes", "none").unwrap();
        assert_eq!(form.practice_area, "paga");
        assert_eq!(form.additional_notes, "none");
        assert!(form.set_field("favoriteColor", "blue").is_err());
    }

    #[tokio::test]
    async fn test_success_resets_form_and_notifies() {
        let transport = MockTransport::new(|| Ok(SubmissionResponse::ok()));
        let sent = transport.sent.clone();
        let mut controller =
            ConsultationFormController::new(transport, NotificationCenter::default(), "(555) 010-0000", today());
        let mut form = filled_form();
        form.timezone = "America/New_York".to_string();
        controller.set_form(form);

        let status = controller.submit().await.unwrap();

        assert_eq!(status, SubmitStatus::Success);
        assert!(!controller.is_submitting());
        assert_eq!(controller.form(), &ConsultationRequest::with_defaults());
        assert_eq!(controller.form().timezone, DEFAULT_TIMEZONE);
        assert_eq!(sent.lock().unwrap().len(), 1);
        assert_eq!(sent.lock().unwrap()[0].timezone, "America/New_York");

        let visible = controller.notifications().visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].kind, NotificationKind::Success);
    }

    #[tokio::test]
    async fn test_rejected_payload_keeps_form_and_shows_phone() {
        let transport = MockTransport::new(|| Ok(SubmissionResponse::failed("x")));
        let mut controller =
            ConsultationFormController::new(transport, NotificationCenter::default(), "(555) 010-0000", today());
        controller.set_form(filled_form());

        let status = controller.submit().await.unwrap();

        assert_eq!(status, SubmitStatus::Error);
        assert!(!controller.is_submitting());
        assert_eq!(controller.form(), &filled_form());
        let visible = controller.notifications().visible();
        assert_eq!(visible[0].kind, NotificationKind::Error);
        assert!(visible[0].message.contains("(555) 010-0000"));
    }

    #[tokio::test]
    async fn test_transport_error_is_reported_not_returned() {
        let transport = MockTransport::new(|| {
            Err(SiteError::SubmissionFailed {
                message: "HTTP 500".to_string(),
            })
        });
        let mut controller =
            ConsultationFormController::new(transport, NotificationCenter::default(), "(555) 010-0000", today());
        controller.set_form(filled_form());

        assert_eq!(controller.submit().await.unwrap(), SubmitStatus::Error);
        assert_eq!(controller.status(), SubmitStatus::Error);
        assert!(!controller.is_submitting());
    }

    #[tokio::test]
    async fn test_invalid_form_is_not_sent() {
        let transport = MockTransport::new(|| Ok(SubmissionResponse::ok()));
        let sent = transport.sent.clone();
        let mut controller =
            ConsultationFormController::new(transport, NotificationCenter::default(), "(555) 010-0000", today());

        let result = controller.submit().await;

        assert!(matches!(result, Err(SiteError::ValidationError { .. })));
        assert!(sent.lock().unwrap().is_empty());
        assert_eq!(controller.status(), SubmitStatus::Idle);
        assert!(controller.notifications().visible().is_empty());
    }

    struct SlowTransport;

    #[async_trait]
    impl SubmissionTransport for SlowTransport {
        async fn send(&self, _request: &ConsultationRequest) -> Result<SubmissionResponse> {
            tokio::time::sleep(std::time::Duration::from_secs(5)).await;
            Ok(SubmissionResponse::ok())
        }
    }

    #[tokio::test]
    async fn test_cancelled_submit_clears_submitting_flag() {
        let mut controller =
            ConsultationFormController::new(SlowTransport, NotificationCenter::default(), "(555) 010-0000", today());
        controller.set_form(filled_form());

        let result =
            tokio::time::timeout(std::time::Duration::from_millis(50), controller.submit()).await;

        assert!(result.is_err());
        assert!(!controller.is_submitting());
        assert_eq!(controller.status(), SubmitStatus::Idle);
        assert_eq!(controller.form(), &filled_form());
        assert!(controller.notifications().visible().is_empty());
    }

    #[test]
    fn test_refresh_date_bounds() {
        let transport = MockTransport::new(|| Ok(SubmissionResponse::ok()));
        let mut controller =
            ConsultationFormController::new(transport, NotificationCenter::default(), "(555) 010-0000", today());
        let stale = controller.date_bounds();

        controller.refresh_date_bounds(NaiveDate::from_ymd_opt(2026, 3, 3).unwrap());

        assert_eq!(controller.date_bounds().min, NaiveDate::from_ymd_opt(2026, 3, 4).unwrap());
        assert_ne!(controller.date_bounds(), stale);
    }
}
