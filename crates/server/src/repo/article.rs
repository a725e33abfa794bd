use chrono::NaiveDate;
use shared_types::{AppError, Article, UpdateArticleRequest};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

/// Column values for a new article after defaults are resolved.
#[derive(Debug)]
pub struct NewArticle<'a> {
    pub title: &'a str,
    pub slug: &'a str,
    pub content: &'a str,
    pub tags: &'a [String],
    pub status: &'a str,
    pub thumbnail: Option<&'a str>,
    pub author_id: Option<&'a str>,
}

/// Insert a new article. `published_at` is stamped when created as
/// `published`.
pub async fn create(pool: &Pool<Postgres>, new: NewArticle<'_>) -> Result<Article, AppError> {
    sqlx::query_as::<_, Article>(
        r#"
        INSERT INTO articles
            (title, slug, content, tags, status, thumbnail, author_id, published_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7,
                CASE WHEN $5 = 'published' THEN NOW() ELSE NULL END)
        RETURNING id, title, slug, content, tags, status, thumbnail, author_id,
                  published_at, created_at, updated_at
        "#,
    )
    .bind(new.title)
    .bind(new.slug)
    .bind(new.content)
    .bind(new.tags)
    .bind(new.status)
    .bind(new.thumbnail)
    .bind(new.author_id)
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Find an article by ID.
pub async fn find_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<Article>, AppError> {
    sqlx::query_as::<_, Article>(
        r#"
        SELECT id, title, slug, content, tags, status, thumbnail, author_id,
               published_at, created_at, updated_at
        FROM articles
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Find an article by its slug.
pub async fn find_by_slug(pool: &Pool<Postgres>, slug: &str) -> Result<Option<Article>, AppError> {
    sqlx::query_as::<_, Article>(
        r#"
        SELECT id, title, slug, content, tags, status, thumbnail, author_id,
               published_at, created_at, updated_at
        FROM articles
        WHERE slug = $1
        "#,
    )
    .bind(slug)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Whether a slug is taken by an article other than `except`.
pub async fn slug_exists(
    pool: &Pool<Postgres>,
    slug: &str,
    except: Option<Uuid>,
) -> Result<bool, AppError> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM articles WHERE slug = $1 AND ($2::UUID IS NULL OR id <> $2))",
    )
    .bind(slug)
    .bind(except)
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// List articles, newest first, optionally filtered by status and by a tag
/// (case-insensitive exact match).
pub async fn list(
    pool: &Pool<Postgres>,
    status: Option<&str>,
    tag: Option<&str>,
) -> Result<Vec<Article>, AppError> {
    sqlx::query_as::<_, Article>(
        r#"
        SELECT id, title, slug, content, tags, status, thumbnail, author_id,
               published_at, created_at, updated_at
        FROM articles
        WHERE ($1::TEXT IS NULL OR status = $1)
          AND ($2::TEXT IS NULL OR EXISTS (
                SELECT 1 FROM UNNEST(tags) t WHERE LOWER(t) = LOWER($2)))
        ORDER BY COALESCE(published_at, created_at) DESC
        "#,
    )
    .bind(status)
    .bind(tag)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Update an article; absent fields keep their current value. The first
/// transition into `published` stamps `published_at`.
pub async fn update(
    pool: &Pool<Postgres>,
    id: Uuid,
    req: UpdateArticleRequest,
) -> Result<Option<Article>, AppError> {
    sqlx::query_as::<_, Article>(
        r#"
        UPDATE articles SET
            title        = COALESCE($2, title),
            slug         = COALESCE($3, slug),
            content      = COALESCE($4, content),
            tags         = COALESCE($5, tags),
            status       = COALESCE($6, status),
            thumbnail    = COALESCE($7, thumbnail),
            published_at = CASE
                WHEN published_at IS NULL AND COALESCE($6, status) = 'published' THEN NOW()
                ELSE published_at
            END,
            updated_at   = NOW()
        WHERE id = $1
        RETURNING id, title, slug, content, tags, status, thumbnail, author_id,
                  published_at, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(req.title.as_deref().map(str::trim))
    .bind(req.slug.as_deref())
    .bind(req.content.as_deref())
    .bind(req.tags.as_deref())
    .bind(req.status.as_deref())
    .bind(req.thumbnail.as_deref())
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Update only an article's status.
pub async fn update_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: &str,
) -> Result<Option<Article>, AppError> {
    update(
        pool,
        id,
        UpdateArticleRequest {
            status: Some(status.to_string()),
            ..Default::default()
        },
    )
    .await
}

/// Delete an article. Returns true if a row was deleted.
pub async fn delete(pool: &Pool<Postgres>, id: Uuid) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM articles WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    Ok(result.rows_affected() > 0)
}

/// Count articles created within a date range, grouped by status.
pub async fn count_by_status(
    pool: &Pool<Postgres>,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<(String, i64)>, AppError> {
    sqlx::query_as::<_, (String, i64)>(
        r#"
        SELECT status, COUNT(*)::BIGINT
        FROM articles
        WHERE created_at::DATE BETWEEN $1 AND $2
        GROUP BY status
        ORDER BY status
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}
