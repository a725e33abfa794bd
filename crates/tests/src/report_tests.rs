use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{
    create_test_case_with, delete_as, get, get_as, patch_json, post_json, test_app,
};

fn range(report_type: &str, start: &str, end: &str) -> serde_json::Value {
    json!({ "report_type": report_type, "start_date": start, "end_date": end })
}

#[tokio::test]
async fn reading_reports_needs_a_role() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let (status, resp) = get(&app, "/api/reports").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(resp["message"], "Missing required header: X-User-Role");

    let (status, _) = get_as(&app, "/api/reports", "reader").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, resp) = get_as(&app, "/api/reports", "clerk").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["data"]["data"], json!([]));
}

#[tokio::test]
async fn case_summary_counts_cases_filed_in_range() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    create_test_case_with(&app, "A-1", "Supreme Court", json!({ "filing_date": "2024-02-01" })).await;
    let heard =
        create_test_case_with(&app, "A-2", "Supreme Court", json!({ "filing_date": "2024-02-10" }))
            .await;
    create_test_case_with(&app, "A-3", "Supreme Court", json!({ "filing_date": "2024-06-01" })).await;

    let uri = format!("/api/cases/{}/status", heard["id"].as_str().unwrap());
    patch_json(&app, &uri, &json!({ "status": "hearing" }), "clerk").await;

    let (status, resp) = post_json(
        &app,
        "/api/reports",
        &range("case_summary", "2024-02-01", "2024-02-29"),
        Some("clerk"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let report = &resp["data"];
    assert_eq!(report["report_type"], "case_summary");
    assert_eq!(report["generated_by"], "clerk");
    assert_eq!(report["summary"]["total"], 2);
    assert_eq!(report["summary"]["by_status"], json!({ "filed": 1, "hearing": 1 }));
}

#[tokio::test]
async fn generated_by_can_be_supplied() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let mut body = range("article_activity", "2024-01-01", "2024-12-31");
    body["generated_by"] = json!("Registrar");
    let (status, resp) = post_json(&app, "/api/reports", &body, Some("admin")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(resp["data"]["generated_by"], "Registrar");
}

#[tokio::test]
async fn invalid_requests_are_rejected() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let (status, _) = post_json(
        &app,
        "/api/reports",
        &range("docket_audit", "2024-01-01", "2024-01-31"),
        Some("clerk"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, resp) = post_json(
        &app,
        "/api/reports",
        &range("case_summary", "2024-03-01", "2024-01-01"),
        Some("clerk"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["message"], "end_date must not be before start_date");

    let (status, _) = post_json(
        &app,
        "/api/reports",
        &range("case_summary", "2024-01-01", "2024-01-31"),
        Some("editor"),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn fetch_and_delete_report() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let (_, resp) = post_json(
        &app,
        "/api/reports",
        &range("judgment_digest", "2024-01-01", "2024-12-31"),
        Some("clerk"),
    )
    .await;
    let uri = format!("/api/reports/{}", resp["data"]["id"].as_str().unwrap());

    let (status, resp) = get_as(&app, &uri, "clerk").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["data"]["summary"]["total"], 0);

    let (status, _) = delete_as(&app, &uri, "clerk").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = get_as(&app, &uri, "clerk").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
