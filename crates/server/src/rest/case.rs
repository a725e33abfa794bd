use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use sqlx::{Pool, Postgres};
use std::sync::Arc;

use shared_types::{
    filter_by_term, is_valid_case_status, is_valid_case_type, ApiEnvelope, AppError,
    CaseResponse, CreateCaseRequest, ListEnvelope, ListPayload, UpdateCaseRequest,
    UpdateCaseStatusRequest, CASE_STATUSES, CASE_TYPES,
};

use crate::error_convert::ValidateRequest;
use crate::rest::parse_uuid;
use crate::roles::ActingRole;
use crate::search::{log_index_error, SearchDoc, SearchIndex};

const RESOURCE: &str = "cases";

// ── Query params ────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CaseListParams {
    /// Restrict to one status.
    pub status: Option<String>,
    /// Case-insensitive substring over case number and title.
    pub q: Option<String>,
}

fn check_status(status: &str) -> Result<(), AppError> {
    if !is_valid_case_status(status) {
        return Err(AppError::bad_request(format!(
            "Invalid status: {}. Valid values: {}",
            status,
            CASE_STATUSES.join(", ")
        )));
    }
    Ok(())
}

fn check_case_type(case_type: &str) -> Result<(), AppError> {
    if !is_valid_case_type(case_type) {
        return Err(AppError::bad_request(format!(
            "Invalid case_type: {}. Valid values: {}",
            case_type,
            CASE_TYPES.join(", ")
        )));
    }
    Ok(())
}

// ── Case CRUD ───────────────────────────────────────────────────────

/// GET /api/cases
#[utoipa::path(
    get,
    path = "/api/cases",
    params(CaseListParams),
    responses(
        (status = 200, description = "List of cases", body = ApiEnvelope<ListPayload<CaseResponse>>),
        (status = 400, description = "Invalid status filter", body = AppError)
    ),
    tag = "cases"
)]
pub async fn list_cases(
    State(pool): State<Pool<Postgres>>,
    Query(params): Query<CaseListParams>,
) -> Result<Json<ListEnvelope<CaseResponse>>, AppError> {
    let status = params.status.as_deref().filter(|s| !s.is_empty());
    if let Some(s) = status {
        check_status(s)?;
    }

    let cases = crate::repo::case::list(&pool, status).await?;
    let responses: Vec<CaseResponse> = cases.into_iter().map(CaseResponse::from).collect();
    let filtered = filter_by_term(&responses, params.q.as_deref().unwrap_or(""));
    Ok(Json(ApiEnvelope::list(filtered)))
}

/// POST /api/cases
#[utoipa::path(
    post,
    path = "/api/cases",
    request_body = CreateCaseRequest,
    params(("X-User-Role" = String, Header, description = "Acting role")),
    responses(
        (status = 201, description = "Case created", body = ApiEnvelope<CaseResponse>),
        (status = 400, description = "Invalid request", body = AppError),
        (status = 403, description = "Role lacks cases:write", body = AppError),
        (status = 409, description = "Duplicate case number", body = AppError)
    ),
    tag = "cases"
)]
pub async fn create_case(
    State(pool): State<Pool<Postgres>>,
    State(search): State<Arc<SearchIndex>>,
    role: ActingRole,
    Json(body): Json<CreateCaseRequest>,
) -> Result<(StatusCode, Json<ApiEnvelope<CaseResponse>>), AppError> {
    role.require_write(&pool, RESOURCE).await?;
    body.validate_request()?;
    check_case_type(&body.case_type)?;
    if let Some(ref s) = body.status {
        check_status(s)?;
    }

    let case = crate::repo::case::create(&pool, body).await?;
    log_index_error(search.upsert(&SearchDoc::from(&case)), "case", &case.id.to_string());
    tracing::info!(case_id = %case.id, case_number = %case.case_number, "case created");

    Ok((StatusCode::CREATED, Json(ApiEnvelope::new(CaseResponse::from(case)))))
}

/// GET /api/cases/{id}
#[utoipa::path(
    get,
    path = "/api/cases/{id}",
    params(("id" = String, Path, description = "Case UUID")),
    responses(
        (status = 200, description = "Case found", body = ApiEnvelope<CaseResponse>),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "cases"
)]
pub async fn get_case(
    State(pool): State<Pool<Postgres>>,
    Path(id): Path<String>,
) -> Result<Json<ApiEnvelope<CaseResponse>>, AppError> {
    let uuid = parse_uuid(&id)?;
    let case = crate::repo::case::find_by_id(&pool, uuid)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Case {} not found", id)))?;
    Ok(Json(ApiEnvelope::new(CaseResponse::from(case))))
}

/// PUT /api/cases/{id}
#[utoipa::path(
    put,
    path = "/api/cases/{id}",
    request_body = UpdateCaseRequest,
    params(
        ("id" = String, Path, description = "Case UUID"),
        ("X-User-Role" = String, Header, description = "Acting role")
    ),
    responses(
        (status = 200, description = "Case updated", body = ApiEnvelope<CaseResponse>),
        (status = 403, description = "Role lacks cases:write", body = AppError),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "cases"
)]
pub async fn update_case(
    State(pool): State<Pool<Postgres>>,
    State(search): State<Arc<SearchIndex>>,
    role: ActingRole,
    Path(id): Path<String>,
    Json(body): Json<UpdateCaseRequest>,
) -> Result<Json<ApiEnvelope<CaseResponse>>, AppError> {
    role.require_write(&pool, RESOURCE).await?;
    let uuid = parse_uuid(&id)?;

    if let Some(ref n) = body.case_number {
        if n.trim().is_empty() {
            return Err(AppError::bad_request("case_number must not be empty"));
        }
    }
    if let Some(ref t) = body.title {
        if t.trim().is_empty() {
            return Err(AppError::bad_request("title must not be empty"));
        }
    }
    if let Some(ref t) = body.case_type {
        check_case_type(t)?;
    }
    if let Some(ref s) = body.status {
        check_status(s)?;
    }

    let case = crate::repo::case::update(&pool, uuid, body)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Case {} not found", id)))?;
    log_index_error(search.upsert(&SearchDoc::from(&case)), "case", &id);

    Ok(Json(ApiEnvelope::new(CaseResponse::from(case))))
}

/// PATCH /api/cases/{id}/status
#[utoipa::path(
    patch,
    path = "/api/cases/{id}/status",
    request_body = UpdateCaseStatusRequest,
    params(
        ("id" = String, Path, description = "Case UUID"),
        ("X-User-Role" = String, Header, description = "Acting role")
    ),
    responses(
        (status = 200, description = "Status updated", body = ApiEnvelope<CaseResponse>),
        (status = 400, description = "Invalid status", body = AppError),
        (status = 403, description = "Role lacks cases:write", body = AppError),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "cases"
)]
pub async fn update_case_status(
    State(pool): State<Pool<Postgres>>,
    State(search): State<Arc<SearchIndex>>,
    role: ActingRole,
    Path(id): Path<String>,
    Json(body): Json<UpdateCaseStatusRequest>,
) -> Result<Json<ApiEnvelope<CaseResponse>>, AppError> {
    role.require_write(&pool, RESOURCE).await?;
    let uuid = parse_uuid(&id)?;
    check_status(&body.status)?;

    let case = crate::repo::case::update_status(&pool, uuid, &body.status)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Case {} not found", id)))?;
    log_index_error(search.upsert(&SearchDoc::from(&case)), "case", &id);
    tracing::info!(case_id = %case.id, status = %case.status, "case status changed");

    Ok(Json(ApiEnvelope::new(CaseResponse::from(case))))
}

/// DELETE /api/cases/{id}
#[utoipa::path(
    delete,
    path = "/api/cases/{id}",
    params(
        ("id" = String, Path, description = "Case UUID"),
        ("X-User-Role" = String, Header, description = "Acting role")
    ),
    responses(
        (status = 204, description = "Case deleted"),
        (status = 403, description = "Role lacks cases:write", body = AppError),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "cases"
)]
pub async fn delete_case(
    State(pool): State<Pool<Postgres>>,
    State(search): State<Arc<SearchIndex>>,
    role: ActingRole,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    role.require_write(&pool, RESOURCE).await?;
    let uuid = parse_uuid(&id)?;

    if !crate::repo::case::delete(&pool, uuid).await? {
        return Err(AppError::not_found(format!("Case {} not found", id)));
    }
    log_index_error(search.remove(&uuid.to_string()), "case", &id);
    tracing::info!(case_id = %id, "case deleted");

    Ok(StatusCode::NO_CONTENT)
}
