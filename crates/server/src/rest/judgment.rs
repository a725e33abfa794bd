use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use sqlx::{Pool, Postgres};
use std::sync::Arc;
use uuid::Uuid;

use shared_types::{
    filter_by_term, judgment_title, ApiEnvelope, AppError, CreateJudgmentRequest,
    JudgmentResponse, ListEnvelope, ListPayload, UpdateJudgmentRequest,
};

use crate::error_convert::ValidateRequest;
use crate::rest::parse_uuid;
use crate::roles::ActingRole;
use crate::search::{log_index_error, SearchDoc, SearchIndex};

const RESOURCE: &str = "judgments";

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct JudgmentListParams {
    /// Case-insensitive substring over title and judge name.
    pub q: Option<String>,
}

/// Resolve the derived title for a judgment linked to `case_id`.
async fn title_for_case(pool: &Pool<Postgres>, case_id: Uuid) -> Result<String, AppError> {
    let case = crate::repo::case::find_by_id(pool, case_id)
        .await?
        .ok_or_else(|| AppError::bad_request(format!("Case {} does not exist", case_id)))?;
    Ok(judgment_title(&case.case_number, &case.title))
}

/// GET /api/judgments
#[utoipa::path(
    get,
    path = "/api/judgments",
    params(JudgmentListParams),
    responses((status = 200, description = "List of judgments", body = ApiEnvelope<ListPayload<JudgmentResponse>>)),
    tag = "judgments"
)]
pub async fn list_judgments(
    State(pool): State<Pool<Postgres>>,
    Query(params): Query<JudgmentListParams>,
) -> Result<Json<ListEnvelope<JudgmentResponse>>, AppError> {
    let judgments = crate::repo::judgment::list_all(&pool).await?;
    let responses: Vec<JudgmentResponse> =
        judgments.into_iter().map(JudgmentResponse::from).collect();
    let filtered = filter_by_term(&responses, params.q.as_deref().unwrap_or(""));
    Ok(Json(ApiEnvelope::list(filtered)))
}

/// POST /api/judgments
#[utoipa::path(
    post,
    path = "/api/judgments",
    request_body = CreateJudgmentRequest,
    params(("X-User-Role" = String, Header, description = "Acting role")),
    responses(
        (status = 201, description = "Judgment recorded", body = ApiEnvelope<JudgmentResponse>),
        (status = 400, description = "Invalid request or unknown case", body = AppError),
        (status = 403, description = "Role lacks judgments:write", body = AppError)
    ),
    tag = "judgments"
)]
pub async fn create_judgment(
    State(pool): State<Pool<Postgres>>,
    State(search): State<Arc<SearchIndex>>,
    role: ActingRole,
    Json(body): Json<CreateJudgmentRequest>,
) -> Result<(StatusCode, Json<ApiEnvelope<JudgmentResponse>>), AppError> {
    role.require_write(&pool, RESOURCE).await?;
    body.validate_request()?;

    let title = title_for_case(&pool, body.case_id).await?;
    let judgment = crate::repo::judgment::create(&pool, &title, body).await?;
    log_index_error(
        search.upsert(&SearchDoc::from(&judgment)),
        "judgment",
        &judgment.id.to_string(),
    );
    tracing::info!(judgment_id = %judgment.id, title = %judgment.title, "judgment recorded");

    Ok((StatusCode::CREATED, Json(ApiEnvelope::new(JudgmentResponse::from(judgment)))))
}

/// GET /api/judgments/{id}
#[utoipa::path(
    get,
    path = "/api/judgments/{id}",
    params(("id" = String, Path, description = "Judgment UUID")),
    responses(
        (status = 200, description = "Judgment found", body = ApiEnvelope<JudgmentResponse>),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "judgments"
)]
pub async fn get_judgment(
    State(pool): State<Pool<Postgres>>,
    Path(id): Path<String>,
) -> Result<Json<ApiEnvelope<JudgmentResponse>>, AppError> {
    let uuid = parse_uuid(&id)?;
    let judgment = crate::repo::judgment::find_by_id(&pool, uuid)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Judgment {} not found", id)))?;
    Ok(Json(ApiEnvelope::new(JudgmentResponse::from(judgment))))
}

/// PUT /api/judgments/{id}
#[utoipa::path(
    put,
    path = "/api/judgments/{id}",
    request_body = UpdateJudgmentRequest,
    params(
        ("id" = String, Path, description = "Judgment UUID"),
        ("X-User-Role" = String, Header, description = "Acting role")
    ),
    responses(
        (status = 200, description = "Judgment updated", body = ApiEnvelope<JudgmentResponse>),
        (status = 403, description = "Role lacks judgments:write", body = AppError),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "judgments"
)]
pub async fn update_judgment(
    State(pool): State<Pool<Postgres>>,
    State(search): State<Arc<SearchIndex>>,
    role: ActingRole,
    Path(id): Path<String>,
    Json(body): Json<UpdateJudgmentRequest>,
) -> Result<Json<ApiEnvelope<JudgmentResponse>>, AppError> {
    role.require_write(&pool, RESOURCE).await?;
    let uuid = parse_uuid(&id)?;

    if let Some(ref n) = body.judge_name {
        if n.trim().is_empty() {
            return Err(AppError::bad_request("judge_name must not be empty"));
        }
    }

    let title = match body.case_id {
        Some(case_id) => Some(title_for_case(&pool, case_id).await?),
        None => None,
    };

    let judgment = crate::repo::judgment::update(&pool, uuid, title.as_deref(), body)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Judgment {} not found", id)))?;
    log_index_error(search.upsert(&SearchDoc::from(&judgment)), "judgment", &id);

    Ok(Json(ApiEnvelope::new(JudgmentResponse::from(judgment))))
}

/// DELETE /api/judgments/{id}
#[utoipa::path(
    delete,
    path = "/api/judgments/{id}",
    params(
        ("id" = String, Path, description = "Judgment UUID"),
        ("X-User-Role" = String, Header, description = "Acting role")
    ),
    responses(
        (status = 204, description = "Judgment deleted"),
        (status = 403, description = "Role lacks judgments:write", body = AppError),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "judgments"
)]
pub async fn delete_judgment(
    State(pool): State<Pool<Postgres>>,
    State(search): State<Arc<SearchIndex>>,
    role: ActingRole,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    role.require_write(&pool, RESOURCE).await?;
    let uuid = parse_uuid(&id)?;

    if !crate::repo::judgment::delete(&pool, uuid).await? {
        return Err(AppError::not_found(format!("Judgment {} not found", id)));
    }
    log_index_error(search.remove(&uuid.to_string()), "judgment", &id);

    Ok(StatusCode::NO_CONTENT)
}
