use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{
    create_test_article, delete_as, get, get_as, patch_json, post_json, put_json, test_app,
};

#[tokio::test]
async fn slug_is_derived_and_suffixed_on_collision() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let first = create_test_article(&app, "Court Upholds GST Levy", "published", &[]).await;
    assert_eq!(first["slug"], "court-upholds-gst-levy");

    let second = create_test_article(&app, "Court upholds GST levy!", "published", &[]).await;
    assert_eq!(second["slug"], "court-upholds-gst-levy-2");

    let third = create_test_article(&app, "Court upholds GST levy", "draft", &[]).await;
    assert_eq!(third["slug"], "court-upholds-gst-levy-3");
}

#[tokio::test]
async fn explicit_duplicate_slug_is_conflict() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    create_test_article(&app, "Bail Reform", "published", &[]).await;

    let body = json!({ "title": "Another story", "slug": "bail-reform", "content": "..." });
    let (status, resp) = post_json(&app, "/api/articles", &body, Some("editor")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(resp["kind"], "Conflict");
}

#[tokio::test]
async fn default_status_is_pending_and_author_is_role() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let body = json!({ "title": "Pending piece", "content": "Body" });
    let (status, resp) = post_json(&app, "/api/articles", &body, Some("editor")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(resp["data"]["status"], "pending");
    assert_eq!(resp["data"]["author_id"], "editor");
    assert!(resp["data"]["published_at"].is_null());
}

#[tokio::test]
async fn clerk_cannot_write_articles() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let body = json!({ "title": "Not mine", "content": "Body" });
    let (status, _) = post_json(&app, "/api/articles", &body, Some("clerk")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn publishing_stamps_published_at_once() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let article = create_test_article(&app, "Tribunal Vacancies", "pending", &[]).await;
    let id = article["id"].as_str().unwrap();
    assert!(article["published_at"].is_null());

    let uri = format!("/api/articles/{id}/status");
    let (status, resp) = patch_json(&app, &uri, &json!({ "status": "published" }), "editor").await;
    assert_eq!(status, StatusCode::OK);
    let stamped = resp["data"]["published_at"].clone();
    assert!(stamped.is_string());

    patch_json(&app, &uri, &json!({ "status": "draft" }), "editor").await;
    let (_, resp) = patch_json(&app, &uri, &json!({ "status": "published" }), "editor").await;
    assert_eq!(resp["data"]["published_at"], stamped);

    let (status, _) = patch_json(&app, &uri, &json!({ "status": "archived" }), "editor").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unpublished_slug_is_hidden_from_readers() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    create_test_article(&app, "Embargoed Ruling", "draft", &[]).await;

    let (status, _) = get(&app, "/api/articles/slug/embargoed-ruling").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get_as(&app, "/api/articles/slug/embargoed-ruling", "reader").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, resp) = get_as(&app, "/api/articles/slug/embargoed-ruling", "editor").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["data"]["title"], "Embargoed Ruling");

    create_test_article(&app, "Open Ruling", "published", &[]).await;
    let (status, _) = get(&app, "/api/articles/slug/open-ruling").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn list_filters_by_status_and_tag() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    create_test_article(&app, "Tax Appeal Decided", "published", &["Tax", "appeal"]).await;
    create_test_article(&app, "Bail Guidelines", "published", &["criminal"]).await;
    create_test_article(&app, "Draft On Tax", "draft", &["tax"]).await;

    let (_, resp) = get(&app, "/api/articles?status=published").await;
    assert_eq!(resp["data"]["data"].as_array().unwrap().len(), 2);

    let (_, resp) = get(&app, "/api/articles?status=published&tag=tax").await;
    let rows = resp["data"]["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["title"], "Tax Appeal Decided");

    let (_, resp) = get(&app, "/api/articles?tag=TAX").await;
    assert_eq!(resp["data"]["data"].as_array().unwrap().len(), 2);

    let (status, _) = get(&app, "/api/articles?status=archived").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_rejects_taken_slug() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    create_test_article(&app, "First Story", "published", &[]).await;
    let second = create_test_article(&app, "Second Story", "published", &[]).await;
    let uri = format!("/api/articles/{}", second["id"].as_str().unwrap());

    let (status, _) = put_json(&app, &uri, &json!({ "slug": "first-story" }), "editor").await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, resp) = put_json(
        &app,
        &uri,
        &json!({ "slug": "second-story-renamed", "tags": ["updated"] }),
        "editor",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["data"]["slug"], "second-story-renamed");
    assert_eq!(resp["data"]["tags"], json!(["updated"]));
}

#[tokio::test]
async fn delete_article_then_404() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let article = create_test_article(&app, "Short Lived", "published", &[]).await;
    let uri = format!("/api/articles/{}", article["id"].as_str().unwrap());

    let (status, _) = delete_as(&app, &uri, "editor").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
