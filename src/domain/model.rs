use crate::utils::error::SiteError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A California region used to partition the city landing pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    LosAngeles,
    OrangeCounty,
    InlandEmpire,
    SanDiego,
    BayArea,
    CentralValley,
    Ventura,
}

impl Region {
    pub const ALL: [Region; 7] = [
        Region::LosAngeles,
        Region::OrangeCounty,
        Region::InlandEmpire,
        Region::SanDiego,
        Region::BayArea,
        Region::CentralValley,
        Region::Ventura,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Region::LosAngeles => "los-angeles",
            Region::OrangeCounty => "orange-county",
            Region::InlandEmpire => "inland-empire",
            Region::SanDiego => "san-diego",
            Region::BayArea => "bay-area",
            Region::CentralValley => "central-valley",
            Region::Ventura => "ventura",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Region {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|region| region.slug() == s)
            .ok_or_else(|| SiteError::UnknownRegion {
                slug: s.to_string(),
            })
    }
}

/// One linkable page: a city landing page or a service page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEntry {
    pub name: String,
    pub route: String,
    pub description: String,
}

impl PageEntry {
    pub fn new(name: &str, route: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            route: route.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedLinks {
    pub nearby: Vec<PageEntry>,
    pub cross_region: Vec<PageEntry>,
    pub services: Vec<PageEntry>,
}

/// Booking form payload, as posted to the submission function.
///
/// Optional fields travel as empty strings when the visitor leaves them blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsultationRequest {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub job_title: String,
    pub email: String,
    pub phone: String,
    pub practice_area: String,
    pub case_description: String,
    pub consultation_type: String,
    pub timezone: String,
    pub preferred_date: String,
    pub preferred_time: String,
    pub alternate_date: String,
    pub alternate_time: String,
    pub referral_source: String,
    pub additional_notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmissionResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitStatus {
    #[default]
    Idle,
    Success,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_slug_parsing() {
        for region in Region::ALL {
            assert_eq!(region.slug().parse::<Region>().unwrap(), region);
        }
        assert!(matches!(
            "california".parse::<Region>(),
            Err(SiteError::UnknownRegion { .. })
        ));
        assert!("southern-california".parse::<Region>().is_err());
    }

    #[test]
    fn test_consultation_request_uses_camel_case_keys() {
        let request = ConsultationRequest {
            first_name: "Jane".to_string(),
            practice_area: "wage-hour".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["firstName"], "Jane");
        assert_eq!(json["practiceArea"], "wage-hour");
        assert_eq!(json["additionalNotes"], "");
        assert_eq!(json.as_object().unwrap().len(), 16);
    }

    #[test]
    fn test_submission_response_error_is_optional() {
        let parsed: SubmissionResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert_eq!(parsed, SubmissionResponse::ok());

        let parsed: SubmissionResponse =
            serde_json::from_str(r#"{"success":false,"error":"x"}"#).unwrap();
        assert_eq!(parsed.error.as_deref(), Some("x"));
    }
}
