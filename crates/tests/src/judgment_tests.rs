use axum::http::StatusCode;
use serde_json::json;

use crate::common::{create_test_case, delete_as, get, post_json, put_json, test_app};

fn judgment_body(case_id: &str, judge: &str) -> serde_json::Value {
    json!({
        "case_id": case_id,
        "judgment_date": "2024-04-10",
        "judge_name": judge,
        "content": "The petition is allowed.",
        "summary": "Petition allowed",
        "tags": ["constitutional"],
    })
}

#[tokio::test]
async fn title_is_derived_from_linked_case() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let case = create_test_case(&app, "WP-55/2024", "Supreme Court").await;
    let case_id = case["id"].as_str().unwrap();

    let (status, resp) =
        post_json(&app, "/api/judgments", &judgment_body(case_id, "Justice Rao"), Some("editor"))
            .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(resp["data"]["title"], "WP-55/2024 — WP-55/2024 Sharma v. Union of India");
    assert_eq!(resp["data"]["case_id"], case_id);
    assert_eq!(resp["data"]["judgment_date"], "2024-04-10");
}

#[tokio::test]
async fn unknown_case_is_bad_request() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let body = judgment_body("00000000-0000-0000-0000-000000000001", "Justice Rao");
    let (status, resp) = post_json(&app, "/api/judgments", &body, Some("editor")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["kind"], "BadRequest");
}

#[tokio::test]
async fn judgments_need_write_role() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let case = create_test_case(&app, "WP-56/2024", "Supreme Court").await;
    let body = judgment_body(case["id"].as_str().unwrap(), "Justice Rao");

    let (status, _) = post_json(&app, "/api/judgments", &body, Some("clerk")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = post_json(&app, "/api/judgments", &body, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn relinking_case_rederives_title() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let first = create_test_case(&app, "WP-60/2024", "Supreme Court").await;
    let second = create_test_case(&app, "WP-61/2024", "Supreme Court").await;

    let (_, resp) = post_json(
        &app,
        "/api/judgments",
        &judgment_body(first["id"].as_str().unwrap(), "Justice Rao"),
        Some("editor"),
    )
    .await;
    let uri = format!("/api/judgments/{}", resp["data"]["id"].as_str().unwrap());

    let (status, resp) = put_json(
        &app,
        &uri,
        &json!({ "case_id": second["id"], "judge_name": "Justice Menon" }),
        "editor",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(resp["data"]["title"].as_str().unwrap().starts_with("WP-61/2024 — "));
    assert_eq!(resp["data"]["judge_name"], "Justice Menon");
}

#[tokio::test]
async fn deleting_case_keeps_judgment() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let case = create_test_case(&app, "WP-70/2024", "Supreme Court").await;
    let case_uri = format!("/api/cases/{}", case["id"].as_str().unwrap());
    let (_, resp) = post_json(
        &app,
        "/api/judgments",
        &judgment_body(case["id"].as_str().unwrap(), "Justice Rao"),
        Some("editor"),
    )
    .await;
    let judgment_uri = format!("/api/judgments/{}", resp["data"]["id"].as_str().unwrap());

    let (status, _) = delete_as(&app, &case_uri, "clerk").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, resp) = get(&app, &judgment_uri).await;
    assert_eq!(status, StatusCode::OK);
    assert!(resp["data"]["case_id"].is_null());
    assert!(resp["data"]["title"].as_str().unwrap().starts_with("WP-70/2024"));
}

#[tokio::test]
async fn list_filters_by_judge_name() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let case = create_test_case(&app, "WP-80/2024", "Supreme Court").await;
    let case_id = case["id"].as_str().unwrap();
    post_json(&app, "/api/judgments", &judgment_body(case_id, "Justice Rao"), Some("editor")).await;
    post_json(&app, "/api/judgments", &judgment_body(case_id, "Justice Menon"), Some("editor")).await;

    let (_, resp) = get(&app, "/api/judgments").await;
    assert_eq!(resp["data"]["data"].as_array().unwrap().len(), 2);

    let (_, resp) = get(&app, "/api/judgments?q=menon").await;
    let rows = resp["data"]["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["judge_name"], "Justice Menon");

    let uri = format!("/api/judgments/{}", rows[0]["id"].as_str().unwrap());
    let (status, _) = delete_as(&app, &uri, "editor").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
