use axum::http::StatusCode;
use serde_json::json;

use crate::common::{
    create_test_case, delete_as, get, patch_json, post_json, put_json, test_app,
};

#[tokio::test]
async fn create_case_defaults_to_filed() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let case = create_test_case(&app, "WP-101/2024", "Delhi High Court").await;
    assert_eq!(case["case_number"], "WP-101/2024");
    assert_eq!(case["status"], "filed");
    assert_eq!(case["filing_date"], "2024-01-15");
    assert!(case["id"].as_str().is_some());
}

#[tokio::test]
async fn create_case_requires_write_role() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let body = json!({
        "case_number": "WP-1/2024",
        "title": "Anyone v. State",
        "case_type": "civil",
        "filing_date": "2024-01-01",
        "court": "Supreme Court",
        "petitioner": "Anyone",
        "respondent": "State",
    });

    let (status, _) = post_json(&app, "/api/cases", &body, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = post_json(&app, "/api/cases", &body, Some("reader")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = post_json(&app, "/api/cases", &body, Some("nobody")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = post_json(&app, "/api/cases", &body, Some("editor")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn create_case_rejects_unknown_type() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let body = json!({
        "case_number": "X-1",
        "title": "Bad type",
        "case_type": "maritime-ish",
        "filing_date": "2024-01-01",
        "court": "Supreme Court",
        "petitioner": "A",
        "respondent": "B",
    });
    let (status, resp) = post_json(&app, "/api/cases", &body, Some("clerk")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(resp["message"].as_str().unwrap().contains("case_type"));
}

#[tokio::test]
async fn duplicate_case_number_is_conflict() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    create_test_case(&app, "CA-7/2023", "Supreme Court").await;
    let body = json!({
        "case_number": "CA-7/2023",
        "title": "Again",
        "case_type": "civil",
        "filing_date": "2024-01-01",
        "court": "Supreme Court",
        "petitioner": "A",
        "respondent": "B",
    });
    let (status, _) = post_json(&app, "/api/cases", &body, Some("clerk")).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn list_filters_by_status_and_term() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let a = create_test_case(&app, "WP-1/2024", "Supreme Court").await;
    create_test_case(&app, "CRL-2/2024", "Supreme Court").await;

    let uri = format!("/api/cases/{}/status", a["id"].as_str().unwrap());
    let (status, _) = patch_json(&app, &uri, &json!({ "status": "hearing" }), "clerk").await;
    assert_eq!(status, StatusCode::OK);

    let (status, resp) = get(&app, "/api/cases").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["data"]["data"].as_array().unwrap().len(), 2);

    let (_, resp) = get(&app, "/api/cases?status=hearing").await;
    let rows = resp["data"]["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["case_number"], "WP-1/2024");

    let (_, resp) = get(&app, "/api/cases?q=crl-2").await;
    let rows = resp["data"]["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["case_number"], "CRL-2/2024");

    let (status, _) = get(&app, "/api/cases?status=archived").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn status_update_validates_and_persists() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let case = create_test_case(&app, "WP-9/2024", "Supreme Court").await;
    let id = case["id"].as_str().unwrap();
    let uri = format!("/api/cases/{id}/status");

    let (status, _) = patch_json(&app, &uri, &json!({ "status": "appealed" }), "clerk").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = patch_json(&app, &uri, &json!({ "status": "closed" }), "reader").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, resp) = patch_json(&app, &uri, &json!({ "status": "judgment" }), "admin").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["data"]["status"], "judgment");

    let (_, resp) = get(&app, &format!("/api/cases/{id}")).await;
    assert_eq!(resp["data"]["status"], "judgment");
}

#[tokio::test]
async fn update_case_changes_fields() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let case = create_test_case(&app, "WP-3/2024", "Supreme Court").await;
    let uri = format!("/api/cases/{}", case["id"].as_str().unwrap());

    let (status, resp) = put_json(
        &app,
        &uri,
        &json!({ "title": "Renamed matter", "next_hearing_date": "2024-05-02" }),
        "clerk",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["data"]["title"], "Renamed matter");
    assert_eq!(resp["data"]["next_hearing_date"], "2024-05-02");
    assert_eq!(resp["data"]["case_number"], "WP-3/2024");
}

#[tokio::test]
async fn delete_case_then_404() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let case = create_test_case(&app, "WP-4/2024", "Supreme Court").await;
    let uri = format!("/api/cases/{}", case["id"].as_str().unwrap());

    let (status, _) = delete_as(&app, &uri, "reader").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = delete_as(&app, &uri, "clerk").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = delete_as(&app, &uri, "clerk").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_id_is_bad_request() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let (status, _) = get(&app, "/api/cases/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
