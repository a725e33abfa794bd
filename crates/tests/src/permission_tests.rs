use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{delete_as, get, get_as, post_json, put_json, test_app};

#[tokio::test]
async fn profile_reflects_acting_role() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let (status, resp) = get_as(&app, "/api/permissions/me", "clerk").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["data"]["role"], "clerk");
    assert_eq!(resp["data"]["display_name"], "Maintains cases and display boards");
    let perms = resp["data"]["permissions"].as_array().unwrap();
    assert!(perms.contains(&json!("cases:write")));
}

#[tokio::test]
async fn anonymous_and_unknown_roles_are_readers() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let (status, resp) = get(&app, "/api/permissions/me").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["data"]["role"], "reader");
    assert_eq!(resp["data"]["display_name"], "Reader");
    assert_eq!(resp["data"]["permissions"], json!([]));

    let (_, resp) = get_as(&app, "/api/permissions/me", "ghost").await;
    assert_eq!(resp["data"]["role"], "reader");
}

#[tokio::test]
async fn role_in_query_string_grants_nothing() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let (_, resp) = get(&app, "/api/permissions/me?role=admin").await;
    assert_eq!(resp["data"]["role"], "reader");

    let body = json!({ "name": "Auditor", "permissions": [] });
    let (status, _) = post_json(&app, "/api/permissions?role=admin", &body, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn roles_are_listed_publicly() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let (status, resp) = get(&app, "/api/permissions").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = resp["data"]["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|r| r["name"].as_str())
        .collect();
    assert_eq!(names, vec!["admin", "clerk", "editor", "reader"]);
}

#[tokio::test]
async fn admin_manages_custom_roles() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let body = json!({
        "name": "Moderator",
        "description": "Reviews articles",
        "permissions": ["articles:write"],
    });
    let (status, resp) = post_json(&app, "/api/permissions", &body, Some("admin")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(resp["data"]["name"], "moderator");
    let uri = format!("/api/permissions/{}", resp["data"]["id"].as_str().unwrap());

    // The new role is usable right away.
    let article = json!({ "title": "Moderated", "content": "Body" });
    let (status, _) = post_json(&app, "/api/articles", &article, Some("moderator")).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, resp) = put_json(
        &app,
        &uri,
        &json!({ "permissions": ["articles:read", "reports:read"] }),
        "admin",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["data"]["permissions"], json!(["articles:read", "reports:read"]));

    let (status, _) = post_json(&app, "/api/articles", &article, Some("moderator")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = delete_as(&app, &uri, "admin").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn role_writes_are_validated_and_guarded() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let body = json!({ "name": "auditor", "permissions": ["reports:read"] });
    let (status, _) = post_json(&app, "/api/permissions", &body, Some("editor")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let bad = json!({ "name": "auditor", "permissions": ["reports:delete", "ledgers:read"] });
    let (status, resp) = post_json(&app, "/api/permissions", &bad, Some("admin")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(resp["message"].as_str().unwrap().contains("reports:delete"));

    let dup = json!({ "name": "clerk", "permissions": [] });
    let (status, _) = post_json(&app, "/api/permissions", &dup, Some("admin")).await;
    assert_eq!(status, StatusCode::CONFLICT);
}
