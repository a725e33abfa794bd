use axum::http::StatusCode;
use serde_json::json;

use crate::common::{create_test_judge, delete_as, get, post_json, put_json, test_app};

#[tokio::test]
async fn create_and_fetch_judge() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let judge = create_test_judge(&app, "Justice A. Rao", "Supreme Court", true).await;
    assert_eq!(judge["name"], "Justice A. Rao");
    assert_eq!(judge["is_active"], true);
    assert_eq!(judge["specialization"], json!(["constitutional"]));

    let (status, resp) = get(&app, &format!("/api/judges/{}", judge["id"].as_str().unwrap())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["data"]["court"], "Supreme Court");
}

#[tokio::test]
async fn blank_name_is_rejected() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let body = json!({ "name": "", "designation": "Judge", "court": "Supreme Court" });
    let (status, _) = post_json(&app, "/api/judges", &body, Some("clerk")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn active_filter_hides_retired_judges() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    create_test_judge(&app, "Justice Sitting", "Supreme Court", true).await;
    create_test_judge(&app, "Justice Retired", "Supreme Court", false).await;

    let (_, resp) = get(&app, "/api/judges").await;
    assert_eq!(resp["data"]["data"].as_array().unwrap().len(), 2);

    let (_, resp) = get(&app, "/api/judges?active=true").await;
    let rows = resp["data"]["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Justice Sitting");
}

#[tokio::test]
async fn update_and_delete_judge() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let judge = create_test_judge(&app, "Justice B. Nair", "Kerala High Court", true).await;
    let uri = format!("/api/judges/{}", judge["id"].as_str().unwrap());

    let (status, resp) = put_json(
        &app,
        &uri,
        &json!({ "is_active": false, "retirement_date": "2024-03-31" }),
        "clerk",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["data"]["is_active"], false);
    assert_eq!(resp["data"]["retirement_date"], "2024-03-31");

    let (status, _) = delete_as(&app, &uri, "editor").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = delete_as(&app, &uri, "clerk").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
