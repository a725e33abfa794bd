use axum::extract::DefaultBodyLimit;
use axum::Router;
use shared_types::{
    // Error types
    AppError, AppErrorKind, MessageResponse, PaginationMeta,
    // Case types
    CaseResponse, CreateCaseRequest, UpdateCaseRequest, UpdateCaseStatusRequest,
    // Judge types
    JudgeResponse, CreateJudgeRequest, UpdateJudgeRequest,
    // Judgment types
    JudgmentResponse, CreateJudgmentRequest, UpdateJudgmentRequest,
    // Article types
    ArticleResponse, CreateArticleRequest, UpdateArticleRequest, UpdateArticleStatusRequest,
    // Report types
    ReportResponse, ReportSummary, GenerateReportRequest,
    // Role types
    RoleResponse, CreateRoleRequest, UpdateRoleRequest, UserProfile,
    // Display board & search types
    CauseList, CauseListEntry, SearchResult,
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::db::{create_pool, run_migrations, AppState};
use crate::health;
use crate::rest;
use crate::search::{build_index, SearchIndex};

/// OpenAPI documentation for the API.
#[derive(OpenApi)]
#[openapi(
    paths(
        // Cases
        rest::case::list_cases,
        rest::case::create_case,
        rest::case::get_case,
        rest::case::update_case,
        rest::case::update_case_status,
        rest::case::delete_case,
        // Judges
        rest::judge::list_judges,
        rest::judge::create_judge,
        rest::judge::get_judge,
        rest::judge::update_judge,
        rest::judge::delete_judge,
        // Judgments
        rest::judgment::list_judgments,
        rest::judgment::create_judgment,
        rest::judgment::get_judgment,
        rest::judgment::update_judgment,
        rest::judgment::delete_judgment,
        // Articles
        rest::article::list_articles,
        rest::article::create_article,
        rest::article::get_article_by_slug,
        rest::article::get_article,
        rest::article::update_article,
        rest::article::update_article_status,
        rest::article::delete_article,
        // Reports
        rest::report::list_reports,
        rest::report::generate_report,
        rest::report::get_report,
        rest::report::delete_report,
        // Permissions
        rest::permission::list_roles,
        rest::permission::current_profile,
        rest::permission::create_role,
        rest::permission::get_role,
        rest::permission::update_role,
        rest::permission::delete_role,
        // Display boards
        rest::display_board::get_cause_list,
        // Search
        rest::search::search,
        // Health
        health::health_check,
    ),
    components(schemas(
        AppError, AppErrorKind, MessageResponse, PaginationMeta,
        CaseResponse, CreateCaseRequest, UpdateCaseRequest, UpdateCaseStatusRequest,
        JudgeResponse, CreateJudgeRequest, UpdateJudgeRequest,
        JudgmentResponse, CreateJudgmentRequest, UpdateJudgmentRequest,
        ArticleResponse, CreateArticleRequest, UpdateArticleRequest, UpdateArticleStatusRequest,
        ReportResponse, ReportSummary, GenerateReportRequest,
        RoleResponse, CreateRoleRequest, UpdateRoleRequest, UserProfile,
        CauseList, CauseListEntry, SearchResult,
        health::HealthResponse,
    )),
    tags(
        (name = "cases", description = "Court case management endpoints"),
        (name = "judges", description = "Judge profile endpoints"),
        (name = "judgments", description = "Judgment publication endpoints"),
        (name = "articles", description = "Legal news article endpoints"),
        (name = "reports", description = "Report generation endpoints"),
        (name = "permissions", description = "Role and permission management"),
        (name = "display-boards", description = "Court cause lists"),
        (name = "search", description = "Full-text search"),
        (name = "health", description = "Health check endpoint")
    ),
    info(
        title = "Legal Portal API",
        description = "Legal news and court information portal API",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

/// Errors that abort server startup.
#[derive(Debug)]
pub enum StartupError {
    Database(sqlx::Error),
    Migration(sqlx::migrate::MigrateError),
    Search(tantivy::TantivyError),
}

impl std::fmt::Display for StartupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StartupError::Database(e) => write!(f, "database pool: {e}"),
            StartupError::Migration(e) => write!(f, "migrations: {e}"),
            StartupError::Search(e) => write!(f, "search index: {e}"),
        }
    }
}

impl std::error::Error for StartupError {}

/// Create the pool, run migrations and build the search index.
///
/// The index is populated from the database only when the `search` flag
/// is on; otherwise it starts empty and fills as records are written.
pub async fn init_state() -> Result<AppState, StartupError> {
    let pool = create_pool().map_err(StartupError::Database)?;
    run_migrations(&pool).await.map_err(StartupError::Migration)?;
    let search = Arc::new(SearchIndex::new().map_err(StartupError::Search)?);

    if crate::config::feature_flags().search {
        match build_index(&pool, &search).await {
            Ok(n) => tracing::info!(documents = n, "search index built"),
            Err(e) => tracing::warn!(error = %e, "search index build failed; starting empty"),
        }
    }

    Ok(AppState::new(pool, search))
}

/// Build an Axum router that serves the API docs at `/docs`
/// and the REST API at `/api/*`.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .merge(rest::api_router())
        .route("/health", axum::routing::get(health::health_check))
        .layer(DefaultBodyLimit::max(crate::config::max_upload_bytes()))
        .with_state(state)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route_group() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/cases",
            "/api/cases/{id}/status",
            "/api/articles/slug/{slug}",
            "/api/display-boards",
            "/api/search",
            "/health",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
