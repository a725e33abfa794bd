use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::{Pool, Postgres};
use tokio::sync::Mutex;
use tower::ServiceExt;

/// Global mutex ensuring tests run sequentially against the shared database.
/// Each test acquires this lock before truncating, so concurrent tests never
/// see each other's rows.
static TEST_MUTEX: std::sync::LazyLock<Mutex<()>> = std::sync::LazyLock::new(|| Mutex::new(()));

/// Roles created by the migrations; everything else is removed between tests.
const SEEDED_ROLES: &[&str] = &["admin", "editor", "clerk", "reader"];

pub type TestApp = (Router, Pool<Postgres>, tokio::sync::MutexGuard<'static, ()>);

/// Build a test router backed by a real Postgres pool.
///
/// Returns `None` when no database is configured so the suite can run
/// without Postgres. The returned guard must be held for the duration of
/// the test.
pub async fn test_app() -> Option<TestApp> {
    let _ = dotenvy::dotenv();
    let Ok(database_url) =
        std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL"))
    else {
        eprintln!("skipping: TEST_DATABASE_URL or DATABASE_URL not set");
        return None;
    };

    let guard = TEST_MUTEX.lock().await;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    server::db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    sqlx::query("TRUNCATE judgments, articles, cases, judges, reports CASCADE")
        .execute(&pool)
        .await
        .expect("Failed to truncate");

    sqlx::query("DELETE FROM roles WHERE NOT (name = ANY($1))")
        .bind(SEEDED_ROLES)
        .execute(&pool)
        .await
        .expect("Failed to reset roles");

    let search = std::sync::Arc::new(
        server::search::SearchIndex::new().expect("Failed to build search index"),
    );
    let state = server::db::AppState::new(pool.clone(), search);
    let router = server::openapi::api_router(state);

    Some((router, pool, guard))
}

fn request(method: &str, uri: &str, role: Option<&str>, body: Option<&Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(role) = role {
        builder = builder.header("x-user-role", role);
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// GET without a role header.
pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, request("GET", uri, None, None)).await
}

/// GET acting as `role`.
pub async fn get_as(app: &Router, uri: &str, role: &str) -> (StatusCode, Value) {
    send(app, request("GET", uri, Some(role), None)).await
}

/// POST JSON acting as `role`; `None` sends no role header.
pub async fn post_json(
    app: &Router,
    uri: &str,
    body: &Value,
    role: Option<&str>,
) -> (StatusCode, Value) {
    send(app, request("POST", uri, role, Some(body))).await
}

/// PUT JSON acting as `role`.
pub async fn put_json(app: &Router, uri: &str, body: &Value, role: &str) -> (StatusCode, Value) {
    send(app, request("PUT", uri, Some(role), Some(body))).await
}

/// PATCH JSON acting as `role`.
pub async fn patch_json(app: &Router, uri: &str, body: &Value, role: &str) -> (StatusCode, Value) {
    send(app, request("PATCH", uri, Some(role), Some(body))).await
}

/// DELETE acting as `role`.
pub async fn delete_as(app: &Router, uri: &str, role: &str) -> (StatusCode, Value) {
    send(app, request("DELETE", uri, Some(role), None)).await
}

/// Send a request through the router and parse the response.
async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(req)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");

    let body: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&body_bytes).to_string(),
        ))
    };

    (status, body)
}

/// Create a case as the clerk and return the created record.
pub async fn create_test_case(app: &Router, case_number: &str, court: &str) -> Value {
    create_test_case_with(app, case_number, court, Value::Null).await
}

/// Create a case with extra fields merged over the defaults.
pub async fn create_test_case_with(
    app: &Router,
    case_number: &str,
    court: &str,
    extra: Value,
) -> Value {
    let mut body = serde_json::json!({
        "case_number": case_number,
        "title": format!("{case_number} Sharma v. Union of India"),
        "case_type": "constitutional",
        "filing_date": "2024-01-15",
        "court": court,
        "petitioner": "Sharma",
        "respondent": "Union of India",
    });
    if let (Some(base), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
        for (k, v) in extra {
            base.insert(k.clone(), v.clone());
        }
    }

    let (status, resp) = post_json(app, "/api/cases", &body, Some("clerk")).await;
    assert_eq!(status, StatusCode::CREATED, "Failed to create test case: {resp}");
    resp["data"].clone()
}

/// Create a judge as the clerk and return the created record.
pub async fn create_test_judge(app: &Router, name: &str, court: &str, active: bool) -> Value {
    let body = serde_json::json!({
        "name": name,
        "designation": "Judge",
        "court": court,
        "specialization": ["constitutional"],
        "is_active": active,
    });
    let (status, resp) = post_json(app, "/api/judges", &body, Some("clerk")).await;
    assert_eq!(status, StatusCode::CREATED, "Failed to create test judge: {resp}");
    resp["data"].clone()
}

/// Create an article as the editor and return the created record.
pub async fn create_test_article(app: &Router, title: &str, status: &str, tags: &[&str]) -> Value {
    let body = serde_json::json!({
        "title": title,
        "content": format!("{title}. Full story follows."),
        "tags": tags,
        "status": status,
    });
    let (status, resp) = post_json(app, "/api/articles", &body, Some("editor")).await;
    assert_eq!(status, StatusCode::CREATED, "Failed to create test article: {resp}");
    resp["data"].clone()
}
