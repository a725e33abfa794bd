//! Typed HTTP client for the portal REST API.
//!
//! Every call goes through [`ApiClient`], which attaches the acting role
//! header, unwraps the `{ "data": ... }` envelope and turns non-2xx
//! responses into [`ClientError`]. Pages turn errors into toast text with
//! [`handle_api_error`].

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::{
    message_for_status, ApiEnvelope, AppError, ArticleResponse, CaseResponse, CauseList,
    CreateArticleRequest, CreateCaseRequest, CreateJudgeRequest, CreateJudgmentRequest,
    CreateRoleRequest, GenerateReportRequest, JudgeResponse, JudgmentResponse, ListPayload,
    ReportResponse, RoleResponse, SearchResult, UpdateArticleRequest,
    UpdateArticleStatusRequest, UpdateCaseRequest, UpdateCaseStatusRequest, UpdateJudgeRequest,
    UpdateJudgmentRequest, UpdateRoleRequest, UserProfile, NETWORK_ERROR_MESSAGE,
};
use std::fmt;

/// Used when `PORTAL_API_BASE` is not set at build time.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8080";

/// Header naming the role the request acts as.
pub const ROLE_HEADER: &str = "x-user-role";

/// API origin baked in at compile time.
pub fn api_base() -> &'static str {
    option_env!("PORTAL_API_BASE").unwrap_or(DEFAULT_API_BASE)
}

/// Why an API call failed.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientError {
    /// No HTTP response was received.
    Network(String),
    /// The server answered with a non-2xx status.
    Api { status: u16, error: AppError },
    /// A 2xx body did not have the expected shape.
    Decode(String),
}

impl ClientError {
    pub fn from_response(status: u16, body: &str) -> Self {
        ClientError::Api {
            status,
            error: AppError::from_response(status, body),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Network(e) => write!(f, "network error: {e}"),
            ClientError::Api { status, error } => write!(f, "HTTP {status}: {error}"),
            ClientError::Decode(e) => write!(f, "unexpected response body: {e}"),
        }
    }
}

impl std::error::Error for ClientError {}

/// User-facing text for a failed call.
///
/// 4xx responses prefer the server's own `AppError` message; everything
/// else gets the canned message for its status class.
pub fn error_message(err: &ClientError) -> String {
    match err {
        ClientError::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
        ClientError::Api { status, error } if (400..500).contains(status) => {
            if error.message.trim().is_empty() {
                message_for_status(*status).to_string()
            } else {
                error.message.clone()
            }
        }
        ClientError::Api { status, .. } => message_for_status(*status).to_string(),
        ClientError::Decode(_) => message_for_status(500).to_string(),
    }
}

/// Log a failed call and return the toast text for it.
pub fn handle_api_error(action: &str, err: &ClientError) -> String {
    match err {
        ClientError::Api { status, .. } if *status < 500 => {
            tracing::warn!(action, error = %err, "request rejected");
        }
        _ => tracing::error!(action, error = %err, "request failed"),
    }
    error_message(err)
}

/// Parse a response body.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ClientError> {
    serde_json::from_str(body).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Percent-encode a query or path value.
fn enc(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
    role: Option<String>,
}

impl ApiClient {
    pub fn new(base: impl Into<String>, role: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base.into(),
            role: role.filter(|r| !r.trim().is_empty()),
        }
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base.trim_end_matches('/'), path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self.http.request(method, self.url(path));
        match &self.role {
            Some(role) => req.header(ROLE_HEADER, role),
            None => req,
        }
    }

    /// Send and return the raw body of a 2xx response.
    async fn execute(&self, req: RequestBuilder) -> Result<String, ClientError> {
        let resp = req
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        if (200..300).contains(&status) {
            Ok(body)
        } else {
            Err(ClientError::from_response(status, &body))
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        let body = self.execute(req).await?;
        decode::<ApiEnvelope<T>>(&body).map(ApiEnvelope::into_inner)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.fetch(self.request(Method::GET, path)).await
    }

    /// GET a list endpoint and return its items.
    pub async fn list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ClientError> {
        self.get::<ListPayload<T>>(path).await.map(|p| p.data)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.fetch(self.request(Method::POST, path).json(body)).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.fetch(self.request(Method::PUT, path).json(body)).await
    }

    pub async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.fetch(self.request(Method::PATCH, path).json(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        self.execute(self.request(Method::DELETE, path)).await.map(|_| ())
    }

    // ── Cases ───────────────────────────────────────────────────────

    pub async fn list_cases(&self) -> Result<Vec<CaseResponse>, ClientError> {
        self.list("/api/cases").await
    }

    pub async fn get_case(&self, id: &str) -> Result<CaseResponse, ClientError> {
        self.get(&format!("/api/cases/{}", enc(id))).await
    }

    pub async fn create_case(&self, req: &CreateCaseRequest) -> Result<CaseResponse, ClientError> {
        self.post("/api/cases", req).await
    }

    pub async fn update_case(
        &self,
        id: &str,
        req: &UpdateCaseRequest,
    ) -> Result<CaseResponse, ClientError> {
        self.put(&format!("/api/cases/{}", enc(id)), req).await
    }

    pub async fn update_case_status(
        &self,
        id: &str,
        status: &str,
    ) -> Result<CaseResponse, ClientError> {
        let body = UpdateCaseStatusRequest {
            status: status.to_string(),
        };
        self.patch(&format!("/api/cases/{}/status", enc(id)), &body)
            .await
    }

    pub async fn delete_case(&self, id: &str) -> Result<(), ClientError> {
        self.delete(&format!("/api/cases/{}", enc(id))).await
    }

    // ── Judges ──────────────────────────────────────────────────────

    pub async fn list_judges(&self, active_only: bool) -> Result<Vec<JudgeResponse>, ClientError> {
        if active_only {
            self.list("/api/judges?active=true").await
        } else {
            self.list("/api/judges").await
        }
    }

    pub async fn get_judge(&self, id: &str) -> Result<JudgeResponse, ClientError> {
        self.get(&format!("/api/judges/{}", enc(id))).await
    }

    pub async fn create_judge(
        &self,
        req: &CreateJudgeRequest,
    ) -> Result<JudgeResponse, ClientError> {
        self.post("/api/judges", req).await
    }

    pub async fn update_judge(
        &self,
        id: &str,
        req: &UpdateJudgeRequest,
    ) -> Result<JudgeResponse, ClientError> {
        self.put(&format!("/api/judges/{}", enc(id)), req).await
    }

    pub async fn delete_judge(&self, id: &str) -> Result<(), ClientError> {
        self.delete(&format!("/api/judges/{}", enc(id))).await
    }

    // ── Judgments ───────────────────────────────────────────────────

    pub async fn list_judgments(&self) -> Result<Vec<JudgmentResponse>, ClientError> {
        self.list("/api/judgments").await
    }

    pub async fn get_judgment(&self, id: &str) -> Result<JudgmentResponse, ClientError> {
        self.get(&format!("/api/judgments/{}", enc(id))).await
    }

    pub async fn create_judgment(
        &self,
        req: &CreateJudgmentRequest,
    ) -> Result<JudgmentResponse, ClientError> {
        self.post("/api/judgments", req).await
    }

    pub async fn update_judgment(
        &self,
        id: &str,
        req: &UpdateJudgmentRequest,
    ) -> Result<JudgmentResponse, ClientError> {
        self.put(&format!("/api/judgments/{}", enc(id)), req).await
    }

    pub async fn delete_judgment(&self, id: &str) -> Result<(), ClientError> {
        self.delete(&format!("/api/judgments/{}", enc(id))).await
    }

    // ── Articles ────────────────────────────────────────────────────

    pub async fn list_articles(
        &self,
        status: Option<&str>,
    ) -> Result<Vec<ArticleResponse>, ClientError> {
        match status {
            Some(s) => self.list(&format!("/api/articles?status={}", enc(s))).await,
            None => self.list("/api/articles").await,
        }
    }

    pub async fn get_article(&self, id: &str) -> Result<ArticleResponse, ClientError> {
        self.get(&format!("/api/articles/{}", enc(id))).await
    }

    pub async fn get_article_by_slug(&self, slug: &str) -> Result<ArticleResponse, ClientError> {
        self.get(&format!("/api/articles/slug/{}", enc(slug))).await
    }

    pub async fn create_article(
        &self,
        req: &CreateArticleRequest,
    ) -> Result<ArticleResponse, ClientError> {
        self.post("/api/articles", req).await
    }

    pub async fn update_article(
        &self,
        id: &str,
        req: &UpdateArticleRequest,
    ) -> Result<ArticleResponse, ClientError> {
        self.put(&format!("/api/articles/{}", enc(id)), req).await
    }

    pub async fn update_article_status(
        &self,
        id: &str,
        status: &str,
    ) -> Result<ArticleResponse, ClientError> {
        let body = UpdateArticleStatusRequest {
            status: status.to_string(),
        };
        self.patch(&format!("/api/articles/{}/status", enc(id)), &body)
            .await
    }

    pub async fn delete_article(&self, id: &str) -> Result<(), ClientError> {
        self.delete(&format!("/api/articles/{}", enc(id))).await
    }

    // ── Reports ─────────────────────────────────────────────────────

    pub async fn list_reports(&self) -> Result<Vec<ReportResponse>, ClientError> {
        self.list("/api/reports").await
    }

    pub async fn generate_report(
        &self,
        req: &GenerateReportRequest,
    ) -> Result<ReportResponse, ClientError> {
        self.post("/api/reports", req).await
    }

    pub async fn delete_report(&self, id: &str) -> Result<(), ClientError> {
        self.delete(&format!("/api/reports/{}", enc(id))).await
    }

    // ── Roles & permissions ─────────────────────────────────────────

    pub async fn list_roles(&self) -> Result<Vec<RoleResponse>, ClientError> {
        self.list("/api/permissions").await
    }

    /// Profile for the acting role; anonymous callers get the reader profile.
    pub async fn current_profile(&self) -> Result<UserProfile, ClientError> {
        self.get("/api/permissions/me").await
    }

    pub async fn create_role(&self, req: &CreateRoleRequest) -> Result<RoleResponse, ClientError> {
        self.post("/api/permissions", req).await
    }

    pub async fn update_role(
        &self,
        id: &str,
        req: &UpdateRoleRequest,
    ) -> Result<RoleResponse, ClientError> {
        self.put(&format!("/api/permissions/{}", enc(id)), req).await
    }

    pub async fn delete_role(&self, id: &str) -> Result<(), ClientError> {
        self.delete(&format!("/api/permissions/{}", enc(id))).await
    }

    // ── Display boards & search ─────────────────────────────────────

    pub async fn cause_list(&self, court: &str, date: &str) -> Result<CauseList, ClientError> {
        self.get(&format!(
            "/api/display-boards?court={}&date={}",
            enc(court),
            enc(date)
        ))
        .await
    }

    /// Page size comes from the server's `portal.page_size`.
    pub async fn search(
        &self,
        query: &str,
        page: i64,
    ) -> Result<ListPayload<SearchResult>, ClientError> {
        self.get(&search_path(query, page)).await
    }
}

/// `/api/search` URL for a query and 1-based page.
pub fn search_path(query: &str, page: i64) -> String {
    format!("/api/search?q={}&page={}", enc(query.trim()), page.max(1))
}
