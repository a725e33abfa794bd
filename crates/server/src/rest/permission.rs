use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::{Pool, Postgres};

use shared_types::{
    is_valid_permission, ApiEnvelope, AppError, CreateRoleRequest, ListEnvelope, ListPayload,
    RoleResponse, UpdateRoleRequest, UserProfile,
};

use crate::rest::parse_uuid;
use crate::roles::ActingRole;

const RESOURCE: &str = "permissions";

fn check_permissions(permissions: &[String]) -> Result<(), AppError> {
    let invalid: Vec<&str> = permissions
        .iter()
        .map(String::as_str)
        .filter(|p| !is_valid_permission(p))
        .collect();
    if !invalid.is_empty() {
        return Err(AppError::bad_request(format!(
            "Invalid permissions: {}. Expected '*' or '<resource>:<read|write>'",
            invalid.join(", ")
        )));
    }
    Ok(())
}

/// GET /api/permissions
#[utoipa::path(
    get,
    path = "/api/permissions",
    responses((status = 200, description = "List of roles", body = ApiEnvelope<ListPayload<RoleResponse>>)),
    tag = "permissions"
)]
pub async fn list_roles(
    State(pool): State<Pool<Postgres>>,
) -> Result<Json<ListEnvelope<RoleResponse>>, AppError> {
    let roles = crate::repo::role::list(&pool).await?;
    let responses: Vec<RoleResponse> = roles.into_iter().map(RoleResponse::from).collect();
    Ok(Json(ApiEnvelope::list(responses)))
}

/// GET /api/permissions/me
///
/// Profile of the acting role, used by the front-end to gate navigation.
/// An anonymous or unknown role resolves to a reader with no permissions.
#[utoipa::path(
    get,
    path = "/api/permissions/me",
    params(("X-User-Role" = String, Header, description = "Acting role")),
    responses((status = 200, description = "Acting profile", body = ApiEnvelope<UserProfile>)),
    tag = "permissions"
)]
pub async fn current_profile(
    State(pool): State<Pool<Postgres>>,
    role: ActingRole,
) -> Result<Json<ApiEnvelope<UserProfile>>, AppError> {
    let found = match role.0.as_deref() {
        Some(name) => crate::repo::role::find_by_name(&pool, name).await?,
        None => None,
    };
    let profile = match found {
        Some(r) => UserProfile {
            id: r.id.to_string(),
            display_name: r.description.clone().unwrap_or_else(|| r.name.clone()),
            role: r.name,
            permissions: r.permissions,
        },
        None => UserProfile {
            role: "reader".to_string(),
            display_name: "Reader".to_string(),
            ..Default::default()
        },
    };
    Ok(Json(ApiEnvelope::new(profile)))
}

/// POST /api/permissions
#[utoipa::path(
    post,
    path = "/api/permissions",
    request_body = CreateRoleRequest,
    params(("X-User-Role" = String, Header, description = "Acting role")),
    responses(
        (status = 201, description = "Role created", body = ApiEnvelope<RoleResponse>),
        (status = 400, description = "Invalid permission string", body = AppError),
        (status = 403, description = "Role lacks permissions:write", body = AppError),
        (status = 409, description = "Role name taken", body = AppError)
    ),
    tag = "permissions"
)]
pub async fn create_role(
    State(pool): State<Pool<Postgres>>,
    role: ActingRole,
    Json(body): Json<CreateRoleRequest>,
) -> Result<(StatusCode, Json<ApiEnvelope<RoleResponse>>), AppError> {
    role.require_write(&pool, RESOURCE).await?;
    if body.name.trim().is_empty() {
        return Err(AppError::bad_request("name must not be empty"));
    }
    check_permissions(&body.permissions)?;

    let created = crate::repo::role::create(&pool, body).await?;
    tracing::info!(role = %created.name, "role created");
    Ok((StatusCode::CREATED, Json(ApiEnvelope::new(RoleResponse::from(created)))))
}

/// GET /api/permissions/{id}
#[utoipa::path(
    get,
    path = "/api/permissions/{id}",
    params(("id" = String, Path, description = "Role UUID")),
    responses(
        (status = 200, description = "Role found", body = ApiEnvelope<RoleResponse>),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "permissions"
)]
pub async fn get_role(
    State(pool): State<Pool<Postgres>>,
    Path(id): Path<String>,
) -> Result<Json<ApiEnvelope<RoleResponse>>, AppError> {
    let uuid = parse_uuid(&id)?;
    let found = crate::repo::role::find_by_id(&pool, uuid)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Role {} not found", id)))?;
    Ok(Json(ApiEnvelope::new(RoleResponse::from(found))))
}

/// PUT /api/permissions/{id}
#[utoipa::path(
    put,
    path = "/api/permissions/{id}",
    request_body = UpdateRoleRequest,
    params(
        ("id" = String, Path, description = "Role UUID"),
        ("X-User-Role" = String, Header, description = "Acting role")
    ),
    responses(
        (status = 200, description = "Role updated", body = ApiEnvelope<RoleResponse>),
        (status = 400, description = "Invalid permission string", body = AppError),
        (status = 403, description = "Role lacks permissions:write", body = AppError),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "permissions"
)]
pub async fn update_role(
    State(pool): State<Pool<Postgres>>,
    role: ActingRole,
    Path(id): Path<String>,
    Json(body): Json<UpdateRoleRequest>,
) -> Result<Json<ApiEnvelope<RoleResponse>>, AppError> {
    role.require_write(&pool, RESOURCE).await?;
    let uuid = parse_uuid(&id)?;
    if let Some(ref n) = body.name {
        if n.trim().is_empty() {
            return Err(AppError::bad_request("name must not be empty"));
        }
    }
    if let Some(ref p) = body.permissions {
        check_permissions(p)?;
    }

    let updated = crate::repo::role::update(&pool, uuid, body)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Role {} not found", id)))?;
    tracing::info!(role = %updated.name, permissions = ?updated.permissions, "role updated");
    Ok(Json(ApiEnvelope::new(RoleResponse::from(updated))))
}

/// DELETE /api/permissions/{id}
#[utoipa::path(
    delete,
    path = "/api/permissions/{id}",
    params(
        ("id" = String, Path, description = "Role UUID"),
        ("X-User-Role" = String, Header, description = "Acting role")
    ),
    responses(
        (status = 204, description = "Role deleted"),
        (status = 403, description = "Role lacks permissions:write", body = AppError),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "permissions"
)]
pub async fn delete_role(
    State(pool): State<Pool<Postgres>>,
    role: ActingRole,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    role.require_write(&pool, RESOURCE).await?;
    let uuid = parse_uuid(&id)?;
    if !crate::repo::role::delete(&pool, uuid).await? {
        return Err(AppError::not_found(format!("Role {} not found", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_permissions() {
        let perms = vec!["cases:write".to_string(), "cases:delete".to_string()];
        let err = check_permissions(&perms).unwrap_err();
        assert!(err.message.contains("cases:delete"));
        assert!(check_permissions(&["*".to_string()]).is_ok());
    }
}
