use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use sqlx::{Pool, Postgres};
use std::sync::Arc;

use shared_types::{
    filter_by_term, ApiEnvelope, AppError, CreateJudgeRequest, JudgeResponse, ListEnvelope,
    ListPayload, UpdateJudgeRequest,
};

use crate::error_convert::ValidateRequest;
use crate::rest::parse_uuid;
use crate::roles::ActingRole;
use crate::search::{log_index_error, SearchDoc, SearchIndex};

const RESOURCE: &str = "judges";

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct JudgeListParams {
    /// Only judges currently sitting.
    #[serde(default)]
    pub active: Option<bool>,
    /// Case-insensitive substring over name and court.
    pub q: Option<String>,
}

fn check_dates(
    appointed: Option<chrono::NaiveDate>,
    retired: Option<chrono::NaiveDate>,
) -> Result<(), AppError> {
    if let (Some(a), Some(r)) = (appointed, retired) {
        if r < a {
            return Err(AppError::bad_request(
                "retirement_date must not be before appointment_date",
            ));
        }
    }
    Ok(())
}

/// GET /api/judges
#[utoipa::path(
    get,
    path = "/api/judges",
    params(JudgeListParams),
    responses((status = 200, description = "List of judges", body = ApiEnvelope<ListPayload<JudgeResponse>>)),
    tag = "judges"
)]
pub async fn list_judges(
    State(pool): State<Pool<Postgres>>,
    Query(params): Query<JudgeListParams>,
) -> Result<Json<ListEnvelope<JudgeResponse>>, AppError> {
    let judges = crate::repo::judge::list(&pool, params.active.unwrap_or(false)).await?;
    let responses: Vec<JudgeResponse> = judges.into_iter().map(JudgeResponse::from).collect();
    let filtered = filter_by_term(&responses, params.q.as_deref().unwrap_or(""));
    Ok(Json(ApiEnvelope::list(filtered)))
}

/// POST /api/judges
#[utoipa::path(
    post,
    path = "/api/judges",
    request_body = CreateJudgeRequest,
    params(("X-User-Role" = String, Header, description = "Acting role")),
    responses(
        (status = 201, description = "Judge created", body = ApiEnvelope<JudgeResponse>),
        (status = 400, description = "Invalid request", body = AppError),
        (status = 403, description = "Role lacks judges:write", body = AppError)
    ),
    tag = "judges"
)]
pub async fn create_judge(
    State(pool): State<Pool<Postgres>>,
    State(search): State<Arc<SearchIndex>>,
    role: ActingRole,
    Json(body): Json<CreateJudgeRequest>,
) -> Result<(StatusCode, Json<ApiEnvelope<JudgeResponse>>), AppError> {
    role.require_write(&pool, RESOURCE).await?;
    body.validate_request()?;
    check_dates(body.appointment_date, body.retirement_date)?;

    let judge = crate::repo::judge::create(&pool, body).await?;
    log_index_error(search.upsert(&SearchDoc::from(&judge)), "judge", &judge.id.to_string());
    tracing::info!(judge_id = %judge.id, name = %judge.name, "judge created");

    Ok((StatusCode::CREATED, Json(ApiEnvelope::new(JudgeResponse::from(judge)))))
}

/// GET /api/judges/{id}
#[utoipa::path(
    get,
    path = "/api/judges/{id}",
    params(("id" = String, Path, description = "Judge UUID")),
    responses(
        (status = 200, description = "Judge found", body = ApiEnvelope<JudgeResponse>),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "judges"
)]
pub async fn get_judge(
    State(pool): State<Pool<Postgres>>,
    Path(id): Path<String>,
) -> Result<Json<ApiEnvelope<JudgeResponse>>, AppError> {
    let uuid = parse_uuid(&id)?;
    let judge = crate::repo::judge::find_by_id(&pool, uuid)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Judge {} not found", id)))?;
    Ok(Json(ApiEnvelope::new(JudgeResponse::from(judge))))
}

/// PUT /api/judges/{id}
#[utoipa::path(
    put,
    path = "/api/judges/{id}",
    request_body = UpdateJudgeRequest,
    params(
        ("id" = String, Path, description = "Judge UUID"),
        ("X-User-Role" = String, Header, description = "Acting role")
    ),
    responses(
        (status = 200, description = "Judge updated", body = ApiEnvelope<JudgeResponse>),
        (status = 403, description = "Role lacks judges:write", body = AppError),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "judges"
)]
pub async fn update_judge(
    State(pool): State<Pool<Postgres>>,
    State(search): State<Arc<SearchIndex>>,
    role: ActingRole,
    Path(id): Path<String>,
    Json(body): Json<UpdateJudgeRequest>,
) -> Result<Json<ApiEnvelope<JudgeResponse>>, AppError> {
    role.require_write(&pool, RESOURCE).await?;
    let uuid = parse_uuid(&id)?;

    if let Some(ref n) = body.name {
        if n.trim().is_empty() {
            return Err(AppError::bad_request("name must not be empty"));
        }
    }
    check_dates(body.appointment_date, body.retirement_date)?;

    let judge = crate::repo::judge::update(&pool, uuid, body)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Judge {} not found", id)))?;
    log_index_error(search.upsert(&SearchDoc::from(&judge)), "judge", &id);

    Ok(Json(ApiEnvelope::new(JudgeResponse::from(judge))))
}

/// DELETE /api/judges/{id}
#[utoipa::path(
    delete,
    path = "/api/judges/{id}",
    params(
        ("id" = String, Path, description = "Judge UUID"),
        ("X-User-Role" = String, Header, description = "Acting role")
    ),
    responses(
        (status = 204, description = "Judge deleted"),
        (status = 403, description = "Role lacks judges:write", body = AppError),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "judges"
)]
pub async fn delete_judge(
    State(pool): State<Pool<Postgres>>,
    State(search): State<Arc<SearchIndex>>,
    role: ActingRole,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    role.require_write(&pool, RESOURCE).await?;
    let uuid = parse_uuid(&id)?;

    if !crate::repo::judge::delete(&pool, uuid).await? {
        return Err(AppError::not_found(format!("Judge {} not found", id)));
    }
    log_index_error(search.remove(&uuid.to_string()), "judge", &id);
    tracing::info!(judge_id = %id, "judge deleted");

    Ok(StatusCode::NO_CONTENT)
}
