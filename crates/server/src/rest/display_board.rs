use axum::{
    extract::{Query, State},
    Json,
};
use sqlx::{Pool, Postgres};

use shared_types::{ApiEnvelope, AppError, CauseList, CauseListParams};

/// GET /api/display-boards?court=&date=
#[utoipa::path(
    get,
    path = "/api/display-boards",
    params(CauseListParams),
    responses(
        (status = 200, description = "Cause list for the court and date", body = ApiEnvelope<CauseList>),
        (status = 400, description = "Missing court or malformed date", body = AppError)
    ),
    tag = "display-boards"
)]
pub async fn get_cause_list(
    State(pool): State<Pool<Postgres>>,
    Query(params): Query<CauseListParams>,
) -> Result<Json<ApiEnvelope<CauseList>>, AppError> {
    if params.court.trim().is_empty() {
        return Err(AppError::bad_request("court must not be empty"));
    }
    let list = crate::repo::display_board::cause_list(&pool, params.court.trim(), params.date).await?;
    Ok(Json(ApiEnvelope::new(list)))
}
