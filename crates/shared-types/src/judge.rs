use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{join_csv, split_csv, Searchable};

// ── Judge DB struct ─────────────────────────────────────────────────

/// A judge profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Judge {
    pub id: Uuid,
    pub name: String,
    /// e.g. "Chief Justice", "Judge", "Additional Judge".
    pub designation: String,
    pub court: String,
    pub appointment_date: Option<NaiveDate>,
    pub retirement_date: Option<NaiveDate>,
    pub biography: Option<String>,
    pub photo_url: Option<String>,
    pub specialization: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ── Judge API response ──────────────────────────────────────────────

/// API response shape for a judge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct JudgeResponse {
    pub id: String,
    pub name: String,
    pub designation: String,
    pub court: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retirement_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biography: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub specialization: Vec<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Judge> for JudgeResponse {
    fn from(j: Judge) -> Self {
        Self {
            id: j.id.to_string(),
            name: j.name,
            designation: j.designation,
            court: j.court,
            appointment_date: j.appointment_date.map(|d| d.to_string()),
            retirement_date: j.retirement_date.map(|d| d.to_string()),
            biography: j.biography,
            photo_url: j.photo_url,
            specialization: j.specialization,
            is_active: j.is_active,
            created_at: j.created_at.to_rfc3339(),
            updated_at: j.updated_at.to_rfc3339(),
        }
    }
}

impl JudgeResponse {
    /// Specializations in the comma-separated form the edit form uses.
    pub fn specialization_csv(&self) -> String {
        join_csv(&self.specialization)
    }
}

impl Searchable for JudgeResponse {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.court.as_str()]
    }
}

// ── Judge request types ─────────────────────────────────────────────

/// Request to create a new judge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct CreateJudgeRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Name is required"))
    )]
    pub name: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Designation is required"))
    )]
    pub designation: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Court is required"))
    )]
    pub court: String,
    #[serde(default)]
    pub appointment_date: Option<NaiveDate>,
    #[serde(default)]
    pub retirement_date: Option<NaiveDate>,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub specialization: Vec<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Request to update a judge (all fields optional).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateJudgeRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub court: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retirement_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biography: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Flat form state for the judge editor. Specializations are edited as a
/// single comma-separated string and converted on submit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JudgeForm {
    pub name: String,
    pub designation: String,
    pub court: String,
    pub appointment_date: String,
    pub retirement_date: String,
    pub biography: String,
    pub photo_url: String,
    pub specialization: String,
    pub is_active: bool,
}

impl JudgeForm {
    pub fn from_response(j: &JudgeResponse) -> Self {
        Self {
            name: j.name.clone(),
            designation: j.designation.clone(),
            court: j.court.clone(),
            appointment_date: j.appointment_date.clone().unwrap_or_default(),
            retirement_date: j.retirement_date.clone().unwrap_or_default(),
            biography: j.biography.clone().unwrap_or_default(),
            photo_url: j.photo_url.clone().unwrap_or_default(),
            specialization: j.specialization_csv(),
            is_active: j.is_active,
        }
    }

    /// Names of required fields that are blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.designation.trim().is_empty() {
            missing.push("designation");
        }
        if self.court.trim().is_empty() {
            missing.push("court");
        }
        missing
    }

    pub fn to_create_request(&self) -> CreateJudgeRequest {
        CreateJudgeRequest {
            name: self.name.trim().to_string(),
            designation: self.designation.trim().to_string(),
            court: self.court.trim().to_string(),
            appointment_date: parse_date(&self.appointment_date),
            retirement_date: parse_date(&self.retirement_date),
            biography: non_empty(&self.biography),
            photo_url: non_empty(&self.photo_url),
            specialization: split_csv(&self.specialization),
            is_active: self.is_active,
        }
    }

    pub fn to_update_request(&self) -> UpdateJudgeRequest {
        let create = self.to_create_request();
        UpdateJudgeRequest {
            name: Some(create.name),
            designation: Some(create.designation),
            court: Some(create.court),
            appointment_date: create.appointment_date,
            retirement_date: create.retirement_date,
            biography: create.biography,
            photo_url: create.photo_url,
            specialization: Some(create.specialization),
            is_active: Some(create.is_active),
        }
    }
}

/// Parse a `YYYY-MM-DD` form value; blank or malformed input yields `None`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// `None` for blank form input, trimmed text otherwise.
pub fn non_empty(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}
