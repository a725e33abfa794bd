use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use sqlx::{Pool, Postgres};
use std::sync::Arc;

use shared_types::{
    filter_by_term, is_valid_article_status, slugify, ApiEnvelope, AppError, Article,
    ArticleResponse, CreateArticleRequest, ListEnvelope, ListPayload, UpdateArticleRequest,
    UpdateArticleStatusRequest, ARTICLE_STATUSES,
};

use crate::error_convert::ValidateRequest;
use crate::repo::article::NewArticle;
use crate::rest::parse_uuid;
use crate::roles::ActingRole;
use crate::search::{log_index_error, SearchDoc, SearchIndex};

const RESOURCE: &str = "articles";

/// Upper bound on `-N` suffixes tried when a derived slug is taken.
const MAX_SLUG_SUFFIX: u32 = 50;

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ArticleListParams {
    /// Restrict to one status (e.g. `published` for the public news list).
    pub status: Option<String>,
    /// Exact, case-insensitive tag match.
    pub tag: Option<String>,
    /// Case-insensitive substring over title and slug.
    pub q: Option<String>,
}

fn check_status(status: &str) -> Result<(), AppError> {
    if !is_valid_article_status(status) {
        return Err(AppError::bad_request(format!(
            "Invalid status: {}. Valid values: {}",
            status,
            ARTICLE_STATUSES.join(", ")
        )));
    }
    Ok(())
}

/// Only published articles are searchable.
fn reindex(search: &SearchIndex, article: &Article) {
    let id = article.id.to_string();
    let result = if article.status == "published" {
        search.upsert(&SearchDoc::from(article))
    } else {
        search.remove(&id)
    };
    log_index_error(result, "article", &id);
}

/// Pick a free slug derived from `base`: `base`, `base-2`, `base-3`, ...
async fn unique_slug(pool: &Pool<Postgres>, base: &str) -> Result<String, AppError> {
    if !crate::repo::article::slug_exists(pool, base, None).await? {
        return Ok(base.to_string());
    }
    for n in 2..=MAX_SLUG_SUFFIX {
        let candidate = format!("{base}-{n}");
        if !crate::repo::article::slug_exists(pool, &candidate, None).await? {
            return Ok(candidate);
        }
    }
    Err(AppError::conflict("An article with this slug already exists"))
}

/// GET /api/articles
#[utoipa::path(
    get,
    path = "/api/articles",
    params(ArticleListParams),
    responses(
        (status = 200, description = "List of articles", body = ApiEnvelope<ListPayload<ArticleResponse>>),
        (status = 400, description = "Invalid status filter", body = AppError)
    ),
    tag = "articles"
)]
pub async fn list_articles(
    State(pool): State<Pool<Postgres>>,
    Query(params): Query<ArticleListParams>,
) -> Result<Json<ListEnvelope<ArticleResponse>>, AppError> {
    let status = params.status.as_deref().filter(|s| !s.is_empty());
    if let Some(s) = status {
        check_status(s)?;
    }
    let tag = params.tag.as_deref().map(str::trim).filter(|t| !t.is_empty());

    let articles = crate::repo::article::list(&pool, status, tag).await?;
    let responses: Vec<ArticleResponse> =
        articles.into_iter().map(ArticleResponse::from).collect();
    let filtered = filter_by_term(&responses, params.q.as_deref().unwrap_or(""));
    Ok(Json(ApiEnvelope::list(filtered)))
}

/// POST /api/articles
#[utoipa::path(
    post,
    path = "/api/articles",
    request_body = CreateArticleRequest,
    params(("X-User-Role" = String, Header, description = "Acting role")),
    responses(
        (status = 201, description = "Article created", body = ApiEnvelope<ArticleResponse>),
        (status = 400, description = "Invalid request", body = AppError),
        (status = 403, description = "Role lacks articles:write", body = AppError),
        (status = 409, description = "Slug already taken", body = AppError)
    ),
    tag = "articles"
)]
pub async fn create_article(
    State(pool): State<Pool<Postgres>>,
    State(search): State<Arc<SearchIndex>>,
    role: ActingRole,
    Json(body): Json<CreateArticleRequest>,
) -> Result<(StatusCode, Json<ApiEnvelope<ArticleResponse>>), AppError> {
    role.require_write(&pool, RESOURCE).await?;
    body.validate_request()?;
    let status = body.status.as_deref().unwrap_or("pending");
    check_status(status)?;

    // An explicit slug must be free; a derived one gets a numeric suffix.
    let slug = match body.slug.as_deref().map(slugify).filter(|s| !s.is_empty()) {
        Some(explicit) => explicit,
        None => {
            let base = slugify(&body.title);
            if base.is_empty() {
                return Err(AppError::bad_request(
                    "Cannot derive a slug from the title; provide one explicitly",
                ));
            }
            unique_slug(&pool, &base).await?
        }
    };
    let author = body.author_id.clone().unwrap_or_else(|| role.name_or_system());

    let article = crate::repo::article::create(
        &pool,
        NewArticle {
            title: body.title.trim(),
            slug: &slug,
            content: &body.content,
            tags: &body.tags,
            status,
            thumbnail: body.thumbnail.as_deref(),
            author_id: Some(&author),
        },
    )
    .await?;
    reindex(&search, &article);
    tracing::info!(article_id = %article.id, slug = %article.slug, status = %article.status, "article created");

    Ok((StatusCode::CREATED, Json(ApiEnvelope::new(ArticleResponse::from(article)))))
}

/// GET /api/articles/slug/{slug}
///
/// Unpublished articles are only visible to roles that can read articles.
#[utoipa::path(
    get,
    path = "/api/articles/slug/{slug}",
    params(("slug" = String, Path, description = "Article slug")),
    responses(
        (status = 200, description = "Article found", body = ApiEnvelope<ArticleResponse>),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "articles"
)]
pub async fn get_article_by_slug(
    State(pool): State<Pool<Postgres>>,
    role: ActingRole,
    Path(slug): Path<String>,
) -> Result<Json<ApiEnvelope<ArticleResponse>>, AppError> {
    let not_found = || AppError::not_found(format!("Article '{}' not found", slug));
    let article = crate::repo::article::find_by_slug(&pool, &slug)
        .await?
        .ok_or_else(not_found)?;

    if article.status != "published" && role.require(&pool, RESOURCE, "read").await.is_err() {
        return Err(not_found());
    }
    Ok(Json(ApiEnvelope::new(ArticleResponse::from(article))))
}

/// GET /api/articles/{id}
#[utoipa::path(
    get,
    path = "/api/articles/{id}",
    params(("id" = String, Path, description = "Article UUID")),
    responses(
        (status = 200, description = "Article found", body = ApiEnvelope<ArticleResponse>),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "articles"
)]
pub async fn get_article(
    State(pool): State<Pool<Postgres>>,
    Path(id): Path<String>,
) -> Result<Json<ApiEnvelope<ArticleResponse>>, AppError> {
    let uuid = parse_uuid(&id)?;
    let article = crate::repo::article::find_by_id(&pool, uuid)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Article {} not found", id)))?;
    Ok(Json(ApiEnvelope::new(ArticleResponse::from(article))))
}

/// PUT /api/articles/{id}
#[utoipa::path(
    put,
    path = "/api/articles/{id}",
    request_body = UpdateArticleRequest,
    params(
        ("id" = String, Path, description = "Article UUID"),
        ("X-User-Role" = String, Header, description = "Acting role")
    ),
    responses(
        (status = 200, description = "Article updated", body = ApiEnvelope<ArticleResponse>),
        (status = 403, description = "Role lacks articles:write", body = AppError),
        (status = 404, description = "Not found", body = AppError),
        (status = 409, description = "Slug already taken", body = AppError)
    ),
    tag = "articles"
)]
pub async fn update_article(
    State(pool): State<Pool<Postgres>>,
    State(search): State<Arc<SearchIndex>>,
    role: ActingRole,
    Path(id): Path<String>,
    Json(mut body): Json<UpdateArticleRequest>,
) -> Result<Json<ApiEnvelope<ArticleResponse>>, AppError> {
    role.require_write(&pool, RESOURCE).await?;
    let uuid = parse_uuid(&id)?;

    if let Some(ref t) = body.title {
        if t.trim().is_empty() {
            return Err(AppError::bad_request("title must not be empty"));
        }
    }
    if let Some(ref s) = body.status {
        check_status(s)?;
    }
    body.slug = body.slug.as_deref().map(slugify).filter(|s| !s.is_empty());
    if let Some(ref slug) = body.slug {
        if crate::repo::article::slug_exists(&pool, slug, Some(uuid)).await? {
            return Err(AppError::conflict("An article with this slug already exists"));
        }
    }

    let article = crate::repo::article::update(&pool, uuid, body)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Article {} not found", id)))?;
    reindex(&search, &article);

    Ok(Json(ApiEnvelope::new(ArticleResponse::from(article))))
}

/// PATCH /api/articles/{id}/status
#[utoipa::path(
    patch,
    path = "/api/articles/{id}/status",
    request_body = UpdateArticleStatusRequest,
    params(
        ("id" = String, Path, description = "Article UUID"),
        ("X-User-Role" = String, Header, description = "Acting role")
    ),
    responses(
        (status = 200, description = "Status updated", body = ApiEnvelope<ArticleResponse>),
        (status = 400, description = "Invalid status", body = AppError),
        (status = 403, description = "Role lacks articles:write", body = AppError),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "articles"
)]
pub async fn update_article_status(
    State(pool): State<Pool<Postgres>>,
    State(search): State<Arc<SearchIndex>>,
    role: ActingRole,
    Path(id): Path<String>,
    Json(body): Json<UpdateArticleStatusRequest>,
) -> Result<Json<ApiEnvelope<ArticleResponse>>, AppError> {
    role.require_write(&pool, RESOURCE).await?;
    let uuid = parse_uuid(&id)?;
    check_status(&body.status)?;

    let article = crate::repo::article::update_status(&pool, uuid, &body.status)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Article {} not found", id)))?;
    reindex(&search, &article);
    tracing::info!(article_id = %article.id, status = %article.status, "article status changed");

    Ok(Json(ApiEnvelope::new(ArticleResponse::from(article))))
}

/// DELETE /api/articles/{id}
#[utoipa::path(
    delete,
    path = "/api/articles/{id}",
    params(
        ("id" = String, Path, description = "Article UUID"),
        ("X-User-Role" = String, Header, description = "Acting role")
    ),
    responses(
        (status = 204, description = "Article deleted"),
        (status = 403, description = "Role lacks articles:write", body = AppError),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "articles"
)]
pub async fn delete_article(
    State(pool): State<Pool<Postgres>>,
    State(search): State<Arc<SearchIndex>>,
    role: ActingRole,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    role.require_write(&pool, RESOURCE).await?;
    let uuid = parse_uuid(&id)?;

    if !crate::repo::article::delete(&pool, uuid).await? {
        return Err(AppError::not_found(format!("Article {} not found", id)));
    }
    log_index_error(search.remove(&uuid.to_string()), "article", &id);
    tracing::info!(article_id = %id, "article deleted");

    Ok(StatusCode::NO_CONTENT)
}
