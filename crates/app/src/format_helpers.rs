//! Display formatting for dates and vocabulary values.

use chrono::{DateTime, NaiveDate, Utc};

/// Format an ISO date or RFC 3339 timestamp as "20 Jan 2026".
///
/// Unparseable input is returned unchanged; blank input becomes "—".
pub fn format_date_human(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return "—".to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.format("%-d %b %Y").to_string();
    }
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(d) => d.format("%-d %b %Y").to_string(),
        Err(_) => value.to_string(),
    }
}

/// "case_summary" → "Case Summary".
pub fn format_snake_case_title(s: &str) -> String {
    s.split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().to_string() + chars.as_str(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Today's date as `YYYY-MM-DD`, the default for cause list pickers.
pub fn today_iso() -> String {
    Utc::now().date_naive().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_and_timestamps() {
        assert_eq!(format_date_human("2024-06-03"), "3 Jun 2024");
        assert_eq!(format_date_human("2026-01-20T21:35:00+00:00"), "20 Jan 2026");
        assert_eq!(format_date_human("soon"), "soon");
        assert_eq!(format_date_human(" "), "—");
    }

    #[test]
    fn snake_case_titles() {
        assert_eq!(format_snake_case_title("judgment_digest"), "Judgment Digest");
        assert_eq!(format_snake_case_title("display_boards"), "Display Boards");
        assert_eq!(format_snake_case_title(""), "");
    }

    #[test]
    fn today_is_iso() {
        assert!(NaiveDate::parse_from_str(&today_iso(), "%Y-%m-%d").is_ok());
    }
}
