use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::{Pool, Postgres};

use shared_types::{
    is_valid_report_type, ApiEnvelope, AppError, GenerateReportRequest, ListEnvelope,
    ListPayload, ReportResponse, ReportSummary, REPORT_TYPES,
};

use crate::rest::parse_uuid;
use crate::roles::ActingRole;

const RESOURCE: &str = "reports";

/// Compute the counts for a report over `[start, end]`.
async fn summarize(
    pool: &Pool<Postgres>,
    req: &GenerateReportRequest,
) -> Result<ReportSummary, AppError> {
    let counts = match req.report_type.as_str() {
        "case_summary" => {
            crate::repo::case::count_by_status(pool, req.start_date, req.end_date).await?
        }
        "article_activity" => {
            crate::repo::article::count_by_status(pool, req.start_date, req.end_date).await?
        }
        "judgment_digest" => {
            crate::repo::judgment::count_by_judge(pool, req.start_date, req.end_date).await?
        }
        other => {
            return Err(AppError::bad_request(format!(
                "Invalid report_type: {}. Valid values: {}",
                other,
                REPORT_TYPES.join(", ")
            )))
        }
    };
    Ok(ReportSummary::from_counts(counts))
}

/// GET /api/reports
#[utoipa::path(
    get,
    path = "/api/reports",
    params(("X-User-Role" = String, Header, description = "Acting role")),
    responses(
        (status = 200, description = "List of reports", body = ApiEnvelope<ListPayload<ReportResponse>>),
        (status = 403, description = "Role lacks reports:read", body = AppError)
    ),
    tag = "reports"
)]
pub async fn list_reports(
    State(pool): State<Pool<Postgres>>,
    role: ActingRole,
) -> Result<Json<ListEnvelope<ReportResponse>>, AppError> {
    role.require(&pool, RESOURCE, "read").await?;
    let reports = crate::repo::report::list(&pool).await?;
    let responses: Vec<ReportResponse> = reports.into_iter().map(ReportResponse::from).collect();
    Ok(Json(ApiEnvelope::list(responses)))
}

/// POST /api/reports
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = GenerateReportRequest,
    params(("X-User-Role" = String, Header, description = "Acting role")),
    responses(
        (status = 201, description = "Report generated", body = ApiEnvelope<ReportResponse>),
        (status = 400, description = "Invalid type or date range", body = AppError),
        (status = 403, description = "Role lacks reports:write", body = AppError)
    ),
    tag = "reports"
)]
pub async fn generate_report(
    State(pool): State<Pool<Postgres>>,
    role: ActingRole,
    Json(body): Json<GenerateReportRequest>,
) -> Result<(StatusCode, Json<ApiEnvelope<ReportResponse>>), AppError> {
    role.require_write(&pool, RESOURCE).await?;
    if !is_valid_report_type(&body.report_type) {
        return Err(AppError::bad_request(format!(
            "Invalid report_type: {}. Valid values: {}",
            body.report_type,
            REPORT_TYPES.join(", ")
        )));
    }
    if body.end_date < body.start_date {
        return Err(AppError::bad_request("end_date must not be before start_date"));
    }

    let summary = summarize(&pool, &body).await?;
    let summary_json = serde_json::to_value(&summary)
        .map_err(|e| AppError::internal(format!("Failed to encode report summary: {e}")))?;
    let generated_by = body
        .generated_by
        .clone()
        .filter(|g| !g.trim().is_empty())
        .unwrap_or_else(|| role.name_or_system());

    let report = crate::repo::report::create(
        &pool,
        &body.report_type,
        body.start_date,
        body.end_date,
        &generated_by,
        summary_json,
    )
    .await?;
    tracing::info!(report_id = %report.id, report_type = %report.report_type, total = summary.total, "report generated");

    Ok((StatusCode::CREATED, Json(ApiEnvelope::new(ReportResponse::from(report)))))
}

/// GET /api/reports/{id}
#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    params(
        ("id" = String, Path, description = "Report UUID"),
        ("X-User-Role" = String, Header, description = "Acting role")
    ),
    responses(
        (status = 200, description = "Report found", body = ApiEnvelope<ReportResponse>),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "reports"
)]
pub async fn get_report(
    State(pool): State<Pool<Postgres>>,
    role: ActingRole,
    Path(id): Path<String>,
) -> Result<Json<ApiEnvelope<ReportResponse>>, AppError> {
    role.require(&pool, RESOURCE, "read").await?;
    let uuid = parse_uuid(&id)?;
    let report = crate::repo::report::find_by_id(&pool, uuid)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Report {} not found", id)))?;
    Ok(Json(ApiEnvelope::new(ReportResponse::from(report))))
}

/// DELETE /api/reports/{id}
#[utoipa::path(
    delete,
    path = "/api/reports/{id}",
    params(
        ("id" = String, Path, description = "Report UUID"),
        ("X-User-Role" = String, Header, description = "Acting role")
    ),
    responses(
        (status = 204, description = "Report deleted"),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "reports"
)]
pub async fn delete_report(
    State(pool): State<Pool<Postgres>>,
    role: ActingRole,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    role.require_write(&pool, RESOURCE).await?;
    let uuid = parse_uuid(&id)?;
    if !crate::repo::report::delete(&pool, uuid).await? {
        return Err(AppError::not_found(format!("Report {} not found", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}
