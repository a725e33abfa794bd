use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::Searchable;
use crate::judge::{non_empty, parse_date};

// ── Validation constants ────────────────────────────────────────────

/// Valid case status values matching the DB CHECK constraint.
pub const CASE_STATUSES: &[&str] = &["filed", "pending", "hearing", "judgment", "closed"];

/// Valid case type values matching the DB CHECK constraint.
pub const CASE_TYPES: &[&str] = &[
    "civil", "criminal", "constitutional", "tax", "family", "commercial", "other",
];

/// Check whether a status string is a valid case status.
pub fn is_valid_case_status(s: &str) -> bool {
    CASE_STATUSES.contains(&s)
}

/// Check whether a case type string is valid.
pub fn is_valid_case_type(s: &str) -> bool {
    CASE_TYPES.contains(&s)
}

/// Human label for a case status value.
pub fn case_status_label(s: &str) -> &'static str {
    match s {
        "filed" => "Filed",
        "pending" => "Pending",
        "hearing" => "Hearing",
        "judgment" => "Judgment",
        "closed" => "Closed",
        _ => "Unknown",
    }
}

// ── DB row struct ───────────────────────────────────────────────────

/// A court case record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Case {
    pub id: Uuid,
    pub case_number: String,
    pub title: String,
    pub description: String,
    pub case_type: String,
    pub status: String,
    pub filing_date: NaiveDate,
    pub court: String,
    pub petitioner: String,
    pub respondent: String,
    pub petitioner_advocate: Option<String>,
    pub respondent_advocate: Option<String>,
    pub next_hearing_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ── API response types ──────────────────────────────────────────────

/// API response shape for a case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CaseResponse {
    pub id: String,
    pub case_number: String,
    pub title: String,
    pub description: String,
    pub case_type: String,
    pub status: String,
    pub filing_date: String,
    pub court: String,
    pub petitioner: String,
    pub respondent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub petitioner_advocate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respondent_advocate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_hearing_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Case> for CaseResponse {
    fn from(c: Case) -> Self {
        Self {
            id: c.id.to_string(),
            case_number: c.case_number,
            title: c.title,
            description: c.description,
            case_type: c.case_type,
            status: c.status,
            filing_date: c.filing_date.to_string(),
            court: c.court,
            petitioner: c.petitioner,
            respondent: c.respondent,
            petitioner_advocate: c.petitioner_advocate,
            respondent_advocate: c.respondent_advocate,
            next_hearing_date: c.next_hearing_date.map(|d| d.to_string()),
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.to_rfc3339(),
        }
    }
}

impl Searchable for CaseResponse {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.case_number.as_str(), self.title.as_str()]
    }
}

// ── Request types ───────────────────────────────────────────────────

/// Request to create a new case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct CreateCaseRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Case number is required"))
    )]
    pub case_number: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Title is required"))
    )]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub case_type: String,
    #[serde(default)]
    pub status: Option<String>,
    pub filing_date: NaiveDate,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Court is required"))
    )]
    pub court: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Petitioner is required"))
    )]
    pub petitioner: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Respondent is required"))
    )]
    pub respondent: String,
    #[serde(default)]
    pub petitioner_advocate: Option<String>,
    #[serde(default)]
    pub respondent_advocate: Option<String>,
    #[serde(default)]
    pub next_hearing_date: Option<NaiveDate>,
}

/// Request to update a case (all fields optional).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateCaseRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filing_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub court: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub petitioner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respondent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub petitioner_advocate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respondent_advocate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_hearing_date: Option<NaiveDate>,
}

/// Request to update only a case's status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateCaseStatusRequest {
    pub status: String,
}

/// Flat form state for the case editor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseForm {
    pub case_number: String,
    pub title: String,
    pub description: String,
    pub case_type: String,
    pub status: String,
    pub filing_date: String,
    pub court: String,
    pub petitioner: String,
    pub respondent: String,
    pub petitioner_advocate: String,
    pub respondent_advocate: String,
    pub next_hearing_date: String,
}

impl CaseForm {
    pub fn from_response(c: &CaseResponse) -> Self {
        Self {
            case_number: c.case_number.clone(),
            title: c.title.clone(),
            description: c.description.clone(),
            case_type: c.case_type.clone(),
            status: c.status.clone(),
            filing_date: c.filing_date.clone(),
            court: c.court.clone(),
            petitioner: c.petitioner.clone(),
            respondent: c.respondent.clone(),
            petitioner_advocate: c.petitioner_advocate.clone().unwrap_or_default(),
            respondent_advocate: c.respondent_advocate.clone().unwrap_or_default(),
            next_hearing_date: c.next_hearing_date.clone().unwrap_or_default(),
        }
    }

    /// Validate required fields and build a create request.
    pub fn to_create_request(&self) -> Result<CreateCaseRequest, Vec<&'static str>> {
        let mut missing = Vec::new();
        for (name, value) in [
            ("case_number", &self.case_number),
            ("title", &self.title),
            ("case_type", &self.case_type),
            ("court", &self.court),
            ("petitioner", &self.petitioner),
            ("respondent", &self.respondent),
        ] {
            if value.trim().is_empty() {
                missing.push(name);
            }
        }
        let filing_date = parse_date(&self.filing_date);
        if filing_date.is_none() {
            missing.push("filing_date");
        }
        match filing_date {
            Some(filing_date) if missing.is_empty() => Ok(CreateCaseRequest {
                case_number: self.case_number.trim().to_string(),
                title: self.title.trim().to_string(),
                description: self.description.trim().to_string(),
                case_type: self.case_type.trim().to_string(),
                status: non_empty(&self.status),
                filing_date,
                court: self.court.trim().to_string(),
                petitioner: self.petitioner.trim().to_string(),
                respondent: self.respondent.trim().to_string(),
                petitioner_advocate: non_empty(&self.petitioner_advocate),
                respondent_advocate: non_empty(&self.respondent_advocate),
                next_hearing_date: parse_date(&self.next_hearing_date),
            }),
            _ => Err(missing),
        }
    }

    pub fn to_update_request(&self) -> UpdateCaseRequest {
        UpdateCaseRequest {
            case_number: non_empty(&self.case_number),
            title: non_empty(&self.title),
            description: Some(self.description.trim().to_string()),
            case_type: non_empty(&self.case_type),
            status: non_empty(&self.status),
            filing_date: parse_date(&self.filing_date),
            court: non_empty(&self.court),
            petitioner: non_empty(&self.petitioner),
            respondent: non_empty(&self.respondent),
            petitioner_advocate: non_empty(&self.petitioner_advocate),
            respondent_advocate: non_empty(&self.respondent_advocate),
            next_hearing_date: parse_date(&self.next_hearing_date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_vocabulary() {
        for s in CASE_STATUSES {
            assert!(is_valid_case_status(s));
            assert_ne!(case_status_label(s), "Unknown");
        }
        assert!(!is_valid_case_status("arraigned"));
        assert!(!is_valid_case_status("Filed"));
    }

    #[test]
    fn response_from_row_formats_dates() {
        let now = Utc::now();
        let row = Case {
            id: Uuid::nil(),
            case_number: "WP-101/2024".into(),
            title: "Sharma v. State".into(),
            description: String::new(),
            case_type: "constitutional".into(),
            status: "filed".into(),
            filing_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            court: "High Court".into(),
            petitioner: "Sharma".into(),
            respondent: "State".into(),
            petitioner_advocate: None,
            respondent_advocate: Some("A.G.".into()),
            next_hearing_date: None,
            created_at: now,
            updated_at: now,
        };
        let resp = CaseResponse::from(row);
        assert_eq!(resp.filing_date, "2024-03-01");
        assert_eq!(resp.respondent_advocate.as_deref(), Some("A.G."));
        assert_eq!(resp.search_fields(), vec!["WP-101/2024", "Sharma v. State"]);
    }
    #[test]
    fn form_requires_core_fields() {
        let form = CaseForm {
            case_number: "WP-7/2024".into(),
            title: "Rao v. Union".into(),
            filing_date: "not a date".into(),
            ..Default::default()
        };
        let missing = form.to_create_request().unwrap_err();
        assert_eq!(
            missing,
            vec!["case_type", "court", "petitioner", "respondent", "filing_date"]
        );
    }

    #[test]
    fn form_builds_trimmed_request() {
        let form = CaseForm {
            case_number: " WP-7/2024 ".into(),
            title: "Rao v. Union".into(),
            case_type: "civil".into(),
            filing_date: "2024-02-10".into(),
            court: "High Court".into(),
            petitioner: "Rao".into(),
            respondent: "Union".into(),
            respondent_advocate: "  ".into(),
            ..Default::default()
        };
        let req = form.to_create_request().unwrap();
        assert_eq!(req.case_number, "WP-7/2024");
        assert_eq!(req.status, None);
        assert_eq!(req.respondent_advocate, None);
        assert_eq!(req.filing_date, NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());
    }
}
