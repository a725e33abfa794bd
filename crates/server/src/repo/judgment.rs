use chrono::NaiveDate;
use shared_types::{AppError, CreateJudgmentRequest, Judgment, UpdateJudgmentRequest};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

/// Insert a judgment with a title already derived from its case.
pub async fn create(
    pool: &Pool<Postgres>,
    title: &str,
    req: CreateJudgmentRequest,
) -> Result<Judgment, AppError> {
    sqlx::query_as::<_, Judgment>(
        r#"
        INSERT INTO judgments
            (title, case_id, judgment_date, judge_name, content, summary, tags)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, title, case_id, judgment_date, judge_name, content, summary, tags,
                  created_at, updated_at
        "#,
    )
    .bind(title)
    .bind(req.case_id)
    .bind(req.judgment_date)
    .bind(req.judge_name.trim())
    .bind(&req.content)
    .bind(req.summary.as_deref())
    .bind(&req.tags)
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Find a judgment by ID.
pub async fn find_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<Judgment>, AppError> {
    sqlx::query_as::<_, Judgment>(
        r#"
        SELECT id, title, case_id, judgment_date, judge_name, content, summary, tags,
               created_at, updated_at
        FROM judgments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// List judgments, most recent judgment date first.
pub async fn list_all(pool: &Pool<Postgres>) -> Result<Vec<Judgment>, AppError> {
    sqlx::query_as::<_, Judgment>(
        r#"
        SELECT id, title, case_id, judgment_date, judge_name, content, summary, tags,
               created_at, updated_at
        FROM judgments
        ORDER BY judgment_date DESC, created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Update a judgment; absent fields keep their current value. `title` is
/// passed when the linked case changes.
pub async fn update(
    pool: &Pool<Postgres>,
    id: Uuid,
    title: Option<&str>,
    req: UpdateJudgmentRequest,
) -> Result<Option<Judgment>, AppError> {
    sqlx::query_as::<_, Judgment>(
        r#"
        UPDATE judgments SET
            title         = COALESCE($2, title),
            case_id       = COALESCE($3, case_id),
            judgment_date = COALESCE($4, judgment_date),
            judge_name    = COALESCE($5, judge_name),
            content       = COALESCE($6, content),
            summary       = COALESCE($7, summary),
            tags          = COALESCE($8, tags),
            updated_at    = NOW()
        WHERE id = $1
        RETURNING id, title, case_id, judgment_date, judge_name, content, summary, tags,
                  created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(req.case_id)
    .bind(req.judgment_date)
    .bind(req.judge_name.as_deref().map(str::trim))
    .bind(req.content.as_deref())
    .bind(req.summary.as_deref())
    .bind(req.tags.as_deref())
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Delete a judgment. Returns true if a row was deleted.
pub async fn delete(pool: &Pool<Postgres>, id: Uuid) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM judgments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    Ok(result.rows_affected() > 0)
}

/// Count judgments delivered within a date range, grouped by judge.
pub async fn count_by_judge(
    pool: &Pool<Postgres>,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<(String, i64)>, AppError> {
    sqlx::query_as::<_, (String, i64)>(
        r#"
        SELECT judge_name, COUNT(*)::BIGINT
        FROM judgments
        WHERE judgment_date BETWEEN $1 AND $2
        GROUP BY judge_name
        ORDER BY judge_name
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}
