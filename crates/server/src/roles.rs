use axum::{extract::FromRequestParts, http::request::Parts};
use shared_types::{grants, AppError, Role};
use sqlx::{Pool, Postgres};

/// Header naming the role the caller is acting as.
pub const ROLE_HEADER: &str = "x-user-role";

/// Extractor that resolves the acting role name from the `X-User-Role`
/// header. A `role` query parameter is never consulted.
///
/// Absence is not a rejection: read-only endpoints stay public and
/// mutating handlers call [`ActingRole::require`].
#[derive(Debug, Clone, Default)]
pub struct ActingRole(pub Option<String>);

impl ActingRole {
    /// Sanitize a role name to lowercase alphanumeric + underscores.
    fn sanitize(raw: &str) -> String {
        raw.trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_')
            .collect()
    }

    fn from_raw(raw: &str) -> Option<String> {
        let sanitized = Self::sanitize(raw);
        (!sanitized.is_empty()).then_some(sanitized)
    }

    /// Look the role up and check it carries `<resource>:write`.
    pub async fn require_write(
        &self,
        pool: &Pool<Postgres>,
        resource: &str,
    ) -> Result<Role, AppError> {
        self.require(pool, resource, "write").await
    }

    /// Look the role up and check it grants `action` on `resource`.
    pub async fn require(
        &self,
        pool: &Pool<Postgres>,
        resource: &str,
        action: &str,
    ) -> Result<Role, AppError> {
        let name = self.0.as_deref().ok_or_else(|| {
            AppError::forbidden("Missing required header: X-User-Role")
        })?;

        let role = crate::repo::role::find_by_name(pool, name)
            .await?
            .ok_or_else(|| AppError::forbidden(format!("Unknown role: {name}")))?;

        if !grants(&role.permissions, resource, action) {
            tracing::warn!(role = %name, resource, action, "permission denied");
            return Err(AppError::forbidden(format!(
                "Role '{name}' lacks {resource}:{action}"
            )));
        }
        Ok(role)
    }

    /// Role name for audit fields, `"system"` when anonymous.
    pub fn name_or_system(&self) -> String {
        self.0.clone().unwrap_or_else(|| "system".to_string())
    }
}

impl<S> FromRequestParts<S> for ActingRole
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let role = parts
            .headers
            .get(ROLE_HEADER)
            .and_then(|val| val.to_str().ok())
            .and_then(Self::from_raw);
        Ok(ActingRole(role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(req: Request<()>) -> ActingRole {
        let (mut parts, _) = req.into_parts();
        ActingRole::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn header_is_sanitized() {
        let req = Request::builder()
            .uri("/api/cases")
            .header(ROLE_HEADER, "  Ad-min ")
            .body(())
            .unwrap();
        assert_eq!(extract(req).await.0.as_deref(), Some("admin"));
    }

    #[tokio::test]
    async fn role_query_param_is_ignored() {
        let req = Request::builder()
            .uri("/api/cases?page=2&role=admin")
            .body(())
            .unwrap();
        assert!(extract(req).await.0.is_none());

        let req = Request::builder()
            .uri("/api/cases?role=admin")
            .header(ROLE_HEADER, "reader")
            .body(())
            .unwrap();
        assert_eq!(extract(req).await.0.as_deref(), Some("reader"));
    }

    #[tokio::test]
    async fn missing_role_is_anonymous() {
        let req = Request::builder().uri("/api/cases").body(()).unwrap();
        let role = extract(req).await;
        assert!(role.0.is_none());
        assert_eq!(role.name_or_system(), "system");
    }
}
