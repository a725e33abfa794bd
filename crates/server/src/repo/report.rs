use chrono::NaiveDate;
use shared_types::{AppError, Report};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

/// Store a generated report.
pub async fn create(
    pool: &Pool<Postgres>,
    report_type: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    generated_by: &str,
    summary: serde_json::Value,
) -> Result<Report, AppError> {
    sqlx::query_as::<_, Report>(
        r#"
        INSERT INTO reports (report_type, start_date, end_date, generated_by, summary)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, report_type, start_date, end_date, generated_at, generated_by, summary
        "#,
    )
    .bind(report_type)
    .bind(start_date)
    .bind(end_date)
    .bind(generated_by)
    .bind(summary)
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Find a report by ID.
pub async fn find_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<Report>, AppError> {
    sqlx::query_as::<_, Report>(
        r#"
        SELECT id, report_type, start_date, end_date, generated_at, generated_by, summary
        FROM reports
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// List reports, most recently generated first.
pub async fn list(pool: &Pool<Postgres>) -> Result<Vec<Report>, AppError> {
    sqlx::query_as::<_, Report>(
        r#"
        SELECT id, report_type, start_date, end_date, generated_at, generated_by, summary
        FROM reports
        ORDER BY generated_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Delete a report. Returns true if a row was deleted.
pub async fn delete(pool: &Pool<Postgres>, id: Uuid) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM reports WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    Ok(result.rows_affected() > 0)
}
