use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Valid report type values matching the DB CHECK constraint.
pub const REPORT_TYPES: &[&str] = &["case_summary", "article_activity", "judgment_digest"];

/// Check whether a report type string is valid.
pub fn is_valid_report_type(s: &str) -> bool {
    REPORT_TYPES.contains(&s)
}

/// Human label for a report type.
pub fn report_type_label(s: &str) -> &'static str {
    match s {
        "case_summary" => "Case Summary",
        "article_activity" => "Article Activity",
        "judgment_digest" => "Judgment Digest",
        _ => "Unknown",
    }
}

/// A generated report with its computed counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Report {
    pub id: Uuid,
    pub report_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub generated_at: DateTime<Utc>,
    pub generated_by: String,
    pub summary: serde_json::Value,
}

/// Counts computed when a report is generated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ReportSummary {
    /// Status value → number of records in range.
    #[serde(default)]
    pub by_status: BTreeMap<String, i64>,
    #[serde(default)]
    pub total: i64,
}

impl ReportSummary {
    pub fn from_counts(counts: Vec<(String, i64)>) -> Self {
        let total = counts.iter().map(|(_, n)| n).sum();
        Self {
            by_status: counts.into_iter().collect(),
            total,
        }
    }
}

/// API response shape for a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ReportResponse {
    pub id: String,
    pub report_type: String,
    pub start_date: String,
    pub end_date: String,
    pub generated_at: String,
    pub generated_by: String,
    pub summary: ReportSummary,
}

impl From<Report> for ReportResponse {
    fn from(r: Report) -> Self {
        Self {
            id: r.id.to_string(),
            report_type: r.report_type,
            start_date: r.start_date.to_string(),
            end_date: r.end_date.to_string(),
            generated_at: r.generated_at.to_rfc3339(),
            generated_by: r.generated_by,
            summary: serde_json::from_value(r.summary).unwrap_or_default(),
        }
    }
}

/// Request to generate a report over a date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GenerateReportRequest {
    pub report_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub generated_by: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_totals_counts() {
        let s = ReportSummary::from_counts(vec![("filed".into(), 3), ("closed".into(), 2)]);
        assert_eq!(s.total, 5);
        assert_eq!(s.by_status.get("filed"), Some(&3));
    }

    #[test]
    fn response_tolerates_malformed_summary() {
        let r = Report {
            id: Uuid::nil(),
            report_type: "case_summary".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            generated_at: Utc::now(),
            generated_by: "admin".into(),
            summary: serde_json::json!("not an object"),
        };
        let resp = ReportResponse::from(r);
        assert_eq!(resp.summary, ReportSummary::default());
        assert_eq!(resp.end_date, "2024-01-31");
    }
}
