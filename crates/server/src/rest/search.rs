use axum::extract::{Query, State};
use axum::Json;
use std::sync::Arc;

use shared_types::{
    normalize_pagination, ApiEnvelope, ListEnvelope, ListPayload, SearchParams, SearchResult,
};

use crate::search::SearchIndex;

/// GET /api/search?q=...&page=1&limit=10
///
/// Full-text search across cases, judges, judgments and published articles.
/// A blank query returns an empty page.
#[utoipa::path(
    get,
    path = "/api/search",
    params(SearchParams),
    responses((status = 200, description = "One page of search hits", body = ApiEnvelope<ListPayload<SearchResult>>)),
    tag = "search"
)]
pub async fn search(
    State(search): State<Arc<SearchIndex>>,
    Query(params): Query<SearchParams>,
) -> Json<ListEnvelope<SearchResult>> {
    let default_limit = crate::config::portal_settings().page_size;
    let (page, limit) = normalize_pagination(params.page, params.limit.or(Some(default_limit)));
    let q = params.q.unwrap_or_default();

    let (hits, total) = search.search(&q, page, limit);
    tracing::debug!(query = %q, page, total, "search");

    Json(ApiEnvelope::paged(hits, page, limit, total))
}
