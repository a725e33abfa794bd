use shared_types::{AppError, CreateRoleRequest, Role, UpdateRoleRequest};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

/// Insert a new role.
pub async fn create(pool: &Pool<Postgres>, req: CreateRoleRequest) -> Result<Role, AppError> {
    sqlx::query_as::<_, Role>(
        r#"
        INSERT INTO roles (name, description, permissions)
        VALUES ($1, $2, $3)
        RETURNING id, name, description, permissions, created_at, updated_at
        "#,
    )
    .bind(req.name.trim().to_lowercase())
    .bind(req.description.as_deref())
    .bind(&req.permissions)
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Find a role by ID.
pub async fn find_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<Role>, AppError> {
    sqlx::query_as::<_, Role>(
        r#"
        SELECT id, name, description, permissions, created_at, updated_at
        FROM roles
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Find a role by its (lowercase) name.
pub async fn find_by_name(pool: &Pool<Postgres>, name: &str) -> Result<Option<Role>, AppError> {
    sqlx::query_as::<_, Role>(
        r#"
        SELECT id, name, description, permissions, created_at, updated_at
        FROM roles
        WHERE name = $1
        "#,
    )
    .bind(name)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// List all roles by name.
pub async fn list(pool: &Pool<Postgres>) -> Result<Vec<Role>, AppError> {
    sqlx::query_as::<_, Role>(
        r#"
        SELECT id, name, description, permissions, created_at, updated_at
        FROM roles
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Update a role; absent fields keep their current value.
pub async fn update(
    pool: &Pool<Postgres>,
    id: Uuid,
    req: UpdateRoleRequest,
) -> Result<Option<Role>, AppError> {
    sqlx::query_as::<_, Role>(
        r#"
        UPDATE roles SET
            name        = COALESCE($2, name),
            description = COALESCE($3, description),
            permissions = COALESCE($4, permissions),
            updated_at  = NOW()
        WHERE id = $1
        RETURNING id, name, description, permissions, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(req.name.as_deref().map(|n| n.trim().to_lowercase()))
    .bind(req.description.as_deref())
    .bind(req.permissions.as_deref())
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Delete a role. Returns true if a row was deleted.
pub async fn delete(pool: &Pool<Postgres>, id: Uuid) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM roles WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    Ok(result.rows_affected() > 0)
}
