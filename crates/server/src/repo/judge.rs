use shared_types::{AppError, CreateJudgeRequest, Judge, UpdateJudgeRequest};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

/// Insert a new judge.
pub async fn create(pool: &Pool<Postgres>, req: CreateJudgeRequest) -> Result<Judge, AppError> {
    sqlx::query_as::<_, Judge>(
        r#"
        INSERT INTO judges
            (name, designation, court, appointment_date, retirement_date,
             biography, photo_url, specialization, is_active)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id, name, designation, court, appointment_date, retirement_date,
                  biography, photo_url, specialization, is_active, created_at, updated_at
        "#,
    )
    .bind(req.name.trim())
    .bind(req.designation.trim())
    .bind(req.court.trim())
    .bind(req.appointment_date)
    .bind(req.retirement_date)
    .bind(req.biography.as_deref())
    .bind(req.photo_url.as_deref())
    .bind(&req.specialization)
    .bind(req.is_active)
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Find a judge by ID.
pub async fn find_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<Judge>, AppError> {
    sqlx::query_as::<_, Judge>(
        r#"
        SELECT id, name, designation, court, appointment_date, retirement_date,
               biography, photo_url, specialization, is_active, created_at, updated_at
        FROM judges
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// List judges by name, optionally only active ones.
pub async fn list(pool: &Pool<Postgres>, active_only: bool) -> Result<Vec<Judge>, AppError> {
    sqlx::query_as::<_, Judge>(
        r#"
        SELECT id, name, designation, court, appointment_date, retirement_date,
               biography, photo_url, specialization, is_active, created_at, updated_at
        FROM judges
        WHERE (NOT $1 OR is_active)
        ORDER BY name ASC
        "#,
    )
    .bind(active_only)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Every judge, for index rebuilds.
pub async fn list_all(pool: &Pool<Postgres>) -> Result<Vec<Judge>, AppError> {
    list(pool, false).await
}

/// Update a judge; absent fields keep their current value.
pub async fn update(
    pool: &Pool<Postgres>,
    id: Uuid,
    req: UpdateJudgeRequest,
) -> Result<Option<Judge>, AppError> {
    sqlx::query_as::<_, Judge>(
        r#"
        UPDATE judges SET
            name             = COALESCE($2, name),
            designation      = COALESCE($3, designation),
            court            = COALESCE($4, court),
            appointment_date = COALESCE($5, appointment_date),
            retirement_date  = COALESCE($6, retirement_date),
            biography        = COALESCE($7, biography),
            photo_url        = COALESCE($8, photo_url),
            specialization   = COALESCE($9, specialization),
            is_active        = COALESCE($10, is_active),
            updated_at       = NOW()
        WHERE id = $1
        RETURNING id, name, designation, court, appointment_date, retirement_date,
                  biography, photo_url, specialization, is_active, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(req.name.as_deref().map(str::trim))
    .bind(req.designation.as_deref())
    .bind(req.court.as_deref())
    .bind(req.appointment_date)
    .bind(req.retirement_date)
    .bind(req.biography.as_deref())
    .bind(req.photo_url.as_deref())
    .bind(req.specialization.as_deref())
    .bind(req.is_active)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Delete a judge. Returns true if a row was deleted.
pub async fn delete(pool: &Pool<Postgres>, id: Uuid) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM judges WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    Ok(result.rows_affected() > 0)
}
