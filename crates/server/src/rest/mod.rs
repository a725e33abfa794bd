pub mod article;
pub mod case;
pub mod display_board;
pub mod judge;
pub mod judgment;
pub mod permission;
pub mod report;
pub mod search;

use axum::{routing::{get, patch}, Router};
use shared_types::AppError;
use uuid::Uuid;

use crate::db::AppState;

/// Parse a path id, mapping failure to a 400.
pub fn parse_uuid(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::bad_request("Invalid UUID format"))
}

/// Build the combined REST API router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        // Cases
        .route("/api/cases", get(case::list_cases).post(case::create_case))
        .route("/api/cases/{id}", get(case::get_case).put(case::update_case).delete(case::delete_case))
        .route("/api/cases/{id}/status", patch(case::update_case_status))
        // Judges
        .route("/api/judges", get(judge::list_judges).post(judge::create_judge))
        .route("/api/judges/{id}", get(judge::get_judge).put(judge::update_judge).delete(judge::delete_judge))
        // Judgments
        .route("/api/judgments", get(judgment::list_judgments).post(judgment::create_judgment))
        .route("/api/judgments/{id}", get(judgment::get_judgment).put(judgment::update_judgment).delete(judgment::delete_judgment))
        // Articles
        .route("/api/articles", get(article::list_articles).post(article::create_article))
        .route("/api/articles/slug/{slug}", get(article::get_article_by_slug))
        .route("/api/articles/{id}", get(article::get_article).put(article::update_article).delete(article::delete_article))
        .route("/api/articles/{id}/status", patch(article::update_article_status))
        // Reports
        .route("/api/reports", get(report::list_reports).post(report::generate_report))
        .route("/api/reports/{id}", get(report::get_report).delete(report::delete_report))
        // Roles & permissions
        .route("/api/permissions", get(permission::list_roles).post(permission::create_role))
        .route("/api/permissions/me", get(permission::current_profile))
        .route("/api/permissions/{id}", get(permission::get_role).put(permission::update_role).delete(permission::delete_role))
        // Display boards
        .route("/api/display-boards", get(display_board::get_cause_list))
        // Search
        .route("/api/search", get(search::search))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_uuid_rejects_garbage() {
        let err = parse_uuid("not-a-uuid").unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(parse_uuid("6f1c2a3b-0000-4000-8000-1234567890ab").is_ok());
    }
}
