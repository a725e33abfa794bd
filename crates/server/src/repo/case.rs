use chrono::NaiveDate;
use shared_types::{AppError, Case, CreateCaseRequest, UpdateCaseRequest};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

/// Insert a new case. Status defaults to `filed`.
pub async fn create(pool: &Pool<Postgres>, req: CreateCaseRequest) -> Result<Case, AppError> {
    let status = req.status.as_deref().unwrap_or("filed");

    sqlx::query_as::<_, Case>(
        r#"
        INSERT INTO cases
            (case_number, title, description, case_type, status, filing_date, court,
             petitioner, respondent, petitioner_advocate, respondent_advocate,
             next_hearing_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING id, case_number, title, description, case_type, status, filing_date,
                  court, petitioner, respondent, petitioner_advocate, respondent_advocate,
                  next_hearing_date, created_at, updated_at
        "#,
    )
    .bind(req.case_number.trim())
    .bind(req.title.trim())
    .bind(&req.description)
    .bind(&req.case_type)
    .bind(status)
    .bind(req.filing_date)
    .bind(req.court.trim())
    .bind(req.petitioner.trim())
    .bind(req.respondent.trim())
    .bind(req.petitioner_advocate.as_deref())
    .bind(req.respondent_advocate.as_deref())
    .bind(req.next_hearing_date)
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Find a case by ID.
pub async fn find_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<Case>, AppError> {
    sqlx::query_as::<_, Case>(
        r#"
        SELECT id, case_number, title, description, case_type, status, filing_date,
               court, petitioner, respondent, petitioner_advocate, respondent_advocate,
               next_hearing_date, created_at, updated_at
        FROM cases
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// List cases, newest first, optionally restricted to one status.
pub async fn list(pool: &Pool<Postgres>, status: Option<&str>) -> Result<Vec<Case>, AppError> {
    sqlx::query_as::<_, Case>(
        r#"
        SELECT id, case_number, title, description, case_type, status, filing_date,
               court, petitioner, respondent, petitioner_advocate, respondent_advocate,
               next_hearing_date, created_at, updated_at
        FROM cases
        WHERE ($1::TEXT IS NULL OR status = $1)
        ORDER BY created_at DESC
        "#,
    )
    .bind(status)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Every case, for index rebuilds.
pub async fn list_all(pool: &Pool<Postgres>) -> Result<Vec<Case>, AppError> {
    list(pool, None).await
}

/// Cases listed before a court on a given date, ordered by case number.
pub async fn list_for_hearing(
    pool: &Pool<Postgres>,
    court: &str,
    date: NaiveDate,
) -> Result<Vec<Case>, AppError> {
    sqlx::query_as::<_, Case>(
        r#"
        SELECT id, case_number, title, description, case_type, status, filing_date,
               court, petitioner, respondent, petitioner_advocate, respondent_advocate,
               next_hearing_date, created_at, updated_at
        FROM cases
        WHERE LOWER(court) = LOWER($1) AND next_hearing_date = $2
        ORDER BY case_number ASC
        "#,
    )
    .bind(court.trim())
    .bind(date)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Update a case; absent fields keep their current value.
pub async fn update(
    pool: &Pool<Postgres>,
    id: Uuid,
    req: UpdateCaseRequest,
) -> Result<Option<Case>, AppError> {
    sqlx::query_as::<_, Case>(
        r#"
        UPDATE cases SET
            case_number         = COALESCE($2, case_number),
            title               = COALESCE($3, title),
            description         = COALESCE($4, description),
            case_type           = COALESCE($5, case_type),
            status              = COALESCE($6, status),
            filing_date         = COALESCE($7, filing_date),
            court               = COALESCE($8, court),
            petitioner          = COALESCE($9, petitioner),
            respondent          = COALESCE($10, respondent),
            petitioner_advocate = COALESCE($11, petitioner_advocate),
            respondent_advocate = COALESCE($12, respondent_advocate),
            next_hearing_date   = COALESCE($13, next_hearing_date),
            updated_at          = NOW()
        WHERE id = $1
        RETURNING id, case_number, title, description, case_type, status, filing_date,
                  court, petitioner, respondent, petitioner_advocate, respondent_advocate,
                  next_hearing_date, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(req.case_number.as_deref().map(str::trim))
    .bind(req.title.as_deref().map(str::trim))
    .bind(req.description.as_deref())
    .bind(req.case_type.as_deref())
    .bind(req.status.as_deref())
    .bind(req.filing_date)
    .bind(req.court.as_deref().map(str::trim))
    .bind(req.petitioner.as_deref())
    .bind(req.respondent.as_deref())
    .bind(req.petitioner_advocate.as_deref())
    .bind(req.respondent_advocate.as_deref())
    .bind(req.next_hearing_date)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Update only a case's status.
pub async fn update_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: &str,
) -> Result<Option<Case>, AppError> {
    sqlx::query_as::<_, Case>(
        r#"
        UPDATE cases SET
            status     = $2,
            updated_at = NOW()
        WHERE id = $1
        RETURNING id, case_number, title, description, case_type, status, filing_date,
                  court, petitioner, respondent, petitioner_advocate, respondent_advocate,
                  next_hearing_date, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(status)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Delete a case. Returns true if a row was deleted.
pub async fn delete(pool: &Pool<Postgres>, id: Uuid) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM cases WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    Ok(result.rows_affected() > 0)
}

/// Count cases filed within a date range, grouped by status.
pub async fn count_by_status(
    pool: &Pool<Postgres>,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<(String, i64)>, AppError> {
    sqlx::query_as::<_, (String, i64)>(
        r#"
        SELECT status, COUNT(*)::BIGINT
        FROM cases
        WHERE filing_date BETWEEN $1 AND $2
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
