use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{
    create_test_article, create_test_case, create_test_case_with, create_test_judge, delete_as,
    get, patch_json, test_app,
};

#[tokio::test]
async fn blank_query_returns_nothing() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    create_test_case(&app, "WP-1/2024", "Supreme Court").await;

    let (status, resp) = get(&app, "/api/search?q=%20%20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["data"]["data"], json!([]));
    assert_eq!(resp["data"]["meta"]["total"], 0);
}

#[tokio::test]
async fn finds_entities_across_types() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    create_test_case_with(
        &app,
        "WP-2/2024",
        "Supreme Court",
        json!({ "petitioner": "Kesavananda Bharati" }),
    )
    .await;
    create_test_judge(&app, "Justice Chandrachud", "Supreme Court", true).await;
    let article =
        create_test_article(&app, "Kesavananda Revisited", "published", &["history"]).await;

    let (status, resp) = get(&app, "/api/search?q=kesavananda").await;
    assert_eq!(status, StatusCode::OK);
    let hits = resp["data"]["data"].as_array().unwrap();
    assert_eq!(hits.len(), 2);

    let article_hit = hits.iter().find(|h| h["entity_type"] == "article").unwrap();
    assert_eq!(article_hit["slug"], article["slug"]);
    assert!(hits.iter().any(|h| h["entity_type"] == "case"));

    let (_, resp) = get(&app, "/api/search?q=chandrachud").await;
    let hits = resp["data"]["data"].as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["entity_type"], "judge");
}

#[tokio::test]
async fn unpublished_articles_are_not_indexed() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let article = create_test_article(&app, "Secret Draft Memo", "draft", &[]).await;
    let (_, resp) = get(&app, "/api/search?q=memo").await;
    assert_eq!(resp["data"]["meta"]["total"], 0);

    let uri = format!("/api/articles/{}/status", article["id"].as_str().unwrap());
    patch_json(&app, &uri, &json!({ "status": "published" }), "editor").await;
    let (_, resp) = get(&app, "/api/search?q=memo").await;
    assert_eq!(resp["data"]["meta"]["total"], 1);

    patch_json(&app, &uri, &json!({ "status": "rejected" }), "editor").await;
    let (_, resp) = get(&app, "/api/search?q=memo").await;
    assert_eq!(resp["data"]["meta"]["total"], 0);
}

#[tokio::test]
async fn results_are_paginated() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    for n in 1..=3 {
        create_test_case(&app, &format!("WP-{n}/2024"), "Supreme Court").await;
    }

    let (_, resp) = get(&app, "/api/search?q=sharma&page=1&limit=2").await;
    assert_eq!(resp["data"]["data"].as_array().unwrap().len(), 2);
    let meta = &resp["data"]["meta"];
    assert_eq!(meta["total"], 3);
    assert_eq!(meta["total_pages"], 2);
    assert_eq!(meta["has_next"], true);
    assert_eq!(meta["has_prev"], false);

    let (_, resp) = get(&app, "/api/search?q=sharma&page=2&limit=2").await;
    assert_eq!(resp["data"]["data"].as_array().unwrap().len(), 1);
    assert_eq!(resp["data"]["meta"]["has_next"], false);
    assert_eq!(resp["data"]["meta"]["has_prev"], true);
}

#[tokio::test]
async fn page_size_defaults_to_portal_setting() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    for n in 1..=11 {
        create_test_case(&app, &format!("WP-{n}/2026"), "Supreme Court").await;
    }

    let (status, resp) = get(&app, "/api/search?q=sharma&page=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["data"]["data"].as_array().unwrap().len(), 10);
    assert_eq!(resp["data"]["meta"]["limit"], 10);
    assert_eq!(resp["data"]["meta"]["total_pages"], 2);
}

#[tokio::test]
async fn pages_past_the_end_are_empty() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    for n in 1..=3 {
        create_test_case(&app, &format!("WP-{n}/2025"), "Supreme Court").await;
    }

    for page in ["3", "1000000000000", "9223372036854775807"] {
        let (status, resp) = get(&app, &format!("/api/search?q=sharma&page={page}&limit=2")).await;
        assert_eq!(status, StatusCode::OK, "page {page}");
        assert_eq!(resp["data"]["data"], json!([]), "page {page}");
        let meta = &resp["data"]["meta"];
        assert_eq!(meta["total"], 3, "page {page}");
        assert_eq!(meta["total_pages"], 2, "page {page}");
        assert_eq!(meta["has_next"], false, "page {page}");
    }
}

#[tokio::test]
async fn deleted_records_leave_the_index() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let case = create_test_case_with(
        &app,
        "WP-9/2024",
        "Supreme Court",
        json!({ "respondent": "Municipal Corporation" }),
    )
    .await;
    let (_, resp) = get(&app, "/api/search?q=municipal").await;
    assert_eq!(resp["data"]["meta"]["total"], 1);

    let uri = format!("/api/cases/{}", case["id"].as_str().unwrap());
    delete_as(&app, &uri, "clerk").await;

    let (_, resp) = get(&app, "/api/search?q=municipal").await;
    assert_eq!(resp["data"]["meta"]["total"], 0);
}
