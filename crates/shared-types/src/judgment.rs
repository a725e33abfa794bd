use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{join_csv, split_csv, Searchable};
use crate::judge::{non_empty, parse_date};

/// A delivered judgment. The title is derived by the server from the linked
/// case and is never accepted from clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Judgment {
    pub id: Uuid,
    pub title: String,
    pub case_id: Option<Uuid>,
    pub judgment_date: NaiveDate,
    pub judge_name: String,
    pub content: String,
    pub summary: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// API response shape for a judgment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct JudgmentResponse {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_id: Option<String>,
    pub judgment_date: String,
    pub judge_name: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Judgment> for JudgmentResponse {
    fn from(j: Judgment) -> Self {
        Self {
            id: j.id.to_string(),
            title: j.title,
            case_id: j.case_id.map(|u| u.to_string()),
            judgment_date: j.judgment_date.to_string(),
            judge_name: j.judge_name,
            content: j.content,
            summary: j.summary,
            tags: j.tags,
            created_at: j.created_at.to_rfc3339(),
            updated_at: j.updated_at.to_rfc3339(),
        }
    }
}

impl Searchable for JudgmentResponse {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.judge_name.as_str()]
    }
}

/// Derive a judgment title from its case, e.g. `"CA-12/2023 — Rao v. Union"`.
pub fn judgment_title(case_number: &str, case_title: &str) -> String {
    format!("{case_number} — {case_title}")
}

/// Request to record a judgment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct CreateJudgmentRequest {
    pub case_id: Uuid,
    pub judgment_date: NaiveDate,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Judge name is required"))
    )]
    pub judge_name: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Content is required"))
    )]
    pub content: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request to update a judgment (all fields optional).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateJudgmentRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub judgment_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub judge_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Flat form state for the judgment editor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JudgmentForm {
    pub case_id: String,
    pub judgment_date: String,
    pub judge_name: String,
    pub content: String,
    pub summary: String,
    pub tags: String,
}

impl JudgmentForm {
    pub fn from_response(j: &JudgmentResponse) -> Self {
        Self {
            case_id: j.case_id.clone().unwrap_or_default(),
            judgment_date: j.judgment_date.clone(),
            judge_name: j.judge_name.clone(),
            content: j.content.clone(),
            summary: j.summary.clone().unwrap_or_default(),
            tags: join_csv(&j.tags),
        }
    }

    /// Validate required fields and build a create request.
    pub fn to_create_request(&self) -> Result<CreateJudgmentRequest, Vec<&'static str>> {
        let mut missing = Vec::new();
        let case_id = Uuid::parse_str(self.case_id.trim()).ok();
        if case_id.is_none() {
            missing.push("case_id");
        }
        let judgment_date = parse_date(&self.judgment_date);
        if judgment_date.is_none() {
            missing.push("judgment_date");
        }
        if self.judge_name.trim().is_empty() {
            missing.push("judge_name");
        }
        if self.content.trim().is_empty() {
            missing.push("content");
        }
        match (case_id, judgment_date) {
            (Some(case_id), Some(judgment_date)) if missing.is_empty() => {
                Ok(CreateJudgmentRequest {
                    case_id,
                    judgment_date,
                    judge_name: self.judge_name.trim().to_string(),
                    content: self.content.clone(),
                    summary: non_empty(&self.summary),
                    tags: split_csv(&self.tags),
                })
            }
            _ => Err(missing),
        }
    }

    pub fn to_update_request(&self) -> UpdateJudgmentRequest {
        UpdateJudgmentRequest {
            case_id: Uuid::parse_str(self.case_id.trim()).ok(),
            judgment_date: parse_date(&self.judgment_date),
            judge_name: non_empty(&self.judge_name),
            content: non_empty(&self.content),
            summary: non_empty(&self.summary),
            tags: Some(split_csv(&self.tags)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_derived_from_case() {
        assert_eq!(
            judgment_title("CA-12/2023", "Rao v. Union of India"),
            "CA-12/2023 — Rao v. Union of India"
        );
    }

    #[test]
    fn form_rejects_missing_fields() {
        let form = JudgmentForm {
            judge_name: "Justice Rao".into(),
            ..Default::default()
        };
        let missing = form.to_create_request().unwrap_err();
        assert_eq!(missing, vec!["case_id", "judgment_date", "content"]);
    }

    #[test]
    fn form_builds_request_with_tags() {
        let id = Uuid::new_v4();
        let form = JudgmentForm {
            case_id: id.to_string(),
            judgment_date: "2024-05-20".into(),
            judge_name: "Justice Rao".into(),
            content: "Appeal allowed.".into(),
            summary: "  ".into(),
            tags: "appeal, tax".into(),
        };
        let req = form.to_create_request().unwrap();
        assert_eq!(req.case_id, id);
        assert_eq!(req.tags, vec!["appeal", "tax"]);
        assert_eq!(req.summary, None);
    }
}
