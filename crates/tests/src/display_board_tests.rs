use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{create_test_case_with, get, patch_json, test_app};

const HEARING: &str = "2024-07-15";

#[tokio::test]
async fn cause_list_orders_and_numbers_scheduled_cases() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let scheduled = json!({ "next_hearing_date": HEARING });
    create_test_case_with(&app, "WP-20/2024", "Delhi High Court", scheduled.clone()).await;
    create_test_case_with(&app, "WP-10/2024", "Delhi High Court", scheduled.clone()).await;
    create_test_case_with(&app, "WP-30/2024", "Bombay High Court", scheduled).await;
    create_test_case_with(
        &app,
        "WP-40/2024",
        "Delhi High Court",
        json!({ "next_hearing_date": "2024-07-16" }),
    )
    .await;

    let (status, resp) =
        get(&app, &format!("/api/display-boards?court=Delhi%20High%20Court&date={HEARING}")).await;
    assert_eq!(status, StatusCode::OK);

    let list = &resp["data"];
    assert_eq!(list["date"], HEARING);
    let entries = list["entries"].as_array().unwrap();
    let numbers: Vec<(i64, &str)> = entries
        .iter()
        .map(|e| (e["item_number"].as_i64().unwrap(), e["case_number"].as_str().unwrap()))
        .collect();
    assert_eq!(numbers, vec![(1, "WP-10/2024"), (2, "WP-20/2024")]);
    assert_eq!(entries[0]["petitioner"], "Sharma");
}

#[tokio::test]
async fn court_match_ignores_case_and_closed_cases_drop_out() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let scheduled = json!({ "next_hearing_date": HEARING });
    create_test_case_with(&app, "CRL-1/2024", "Supreme Court", scheduled.clone()).await;
    let closed = create_test_case_with(&app, "CRL-2/2024", "Supreme Court", scheduled).await;

    let uri = format!("/api/cases/{}/status", closed["id"].as_str().unwrap());
    let (status, _) = patch_json(&app, &uri, &json!({ "status": "closed" }), "clerk").await;
    assert_eq!(status, StatusCode::OK);

    let (status, resp) =
        get(&app, &format!("/api/display-boards?court=supreme%20court&date={HEARING}")).await;
    assert_eq!(status, StatusCode::OK);
    let entries = resp["data"]["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["case_number"], "CRL-1/2024");
    assert_eq!(entries[0]["item_number"], 1);
}

#[tokio::test]
async fn empty_day_and_bad_params() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let (status, resp) = get(&app, "/api/display-boards?court=Supreme%20Court&date=2030-01-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["data"]["entries"], json!([]));

    let (status, _) = get(&app, "/api/display-boards?court=%20&date=2024-07-15").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
