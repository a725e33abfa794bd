use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::case::CaseResponse;

/// One line of a cause list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CauseListEntry {
    pub item_number: i32,
    pub case_id: String,
    pub case_number: String,
    pub title: String,
    pub status: String,
    pub petitioner: String,
    pub respondent: String,
}

/// A court's schedule of cases for a date, shown on a display board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CauseList {
    pub court: String,
    pub date: String,
    pub entries: Vec<CauseListEntry>,
}

impl CauseList {
    /// Number the cases in the order given. Closed cases never appear on a
    /// board.
    pub fn build(court: &str, date: NaiveDate, cases: Vec<CaseResponse>) -> Self {
        let entries = cases
            .into_iter()
            .filter(|c| c.status != "closed")
            .enumerate()
            .map(|(i, c)| CauseListEntry {
                item_number: i as i32 + 1,
                case_id: c.id,
                case_number: c.case_number,
                title: c.title,
                status: c.status,
                petitioner: c.petitioner,
                respondent: c.respondent,
            })
            .collect();
        Self {
            court: court.to_string(),
            date: date.to_string(),
            entries,
        }
    }
}

/// Query parameters for `GET /api/display-boards`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct CauseListParams {
    pub court: String,
    pub date: NaiveDate,
}
