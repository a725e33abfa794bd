use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Resources that role permissions are granted on. Each admin section of
/// the back-office corresponds to one resource.
pub const RESOURCES: &[&str] = &[
    "cases",
    "judges",
    "judgments",
    "articles",
    "reports",
    "display_boards",
    "permissions",
];

/// Permission string that grants everything.
pub const WILDCARD: &str = "*";

/// Check whether a permission string is well formed: `*` or
/// `<resource>:<read|write>` for a known resource.
pub fn is_valid_permission(p: &str) -> bool {
    if p == WILDCARD {
        return true;
    }
    match p.split_once(':') {
        Some((resource, action)) => {
            RESOURCES.contains(&resource) && matches!(action, "read" | "write")
        }
        None => false,
    }
}

/// Whether `permissions` grants `action` on `resource`. `write` implies
/// `read`.
pub fn grants(permissions: &[String], resource: &str, action: &str) -> bool {
    permissions.iter().any(|p| {
        if p == WILDCARD {
            return true;
        }
        match p.split_once(':') {
            Some((r, a)) if r == resource => a == action || (a == "write" && action == "read"),
            _ => false,
        }
    })
}

/// A named role with a list of permission strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub permissions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// API response shape for a role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RoleResponse {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub permissions: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Role> for RoleResponse {
    fn from(r: Role) -> Self {
        Self {
            id: r.id.to_string(),
            name: r.name,
            description: r.description,
            permissions: r.permissions,
            created_at: r.created_at.to_rfc3339(),
            updated_at: r.updated_at.to_rfc3339(),
        }
    }
}

/// Request to create a role.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateRoleRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Request to update a role.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateRoleRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

/// The signed-in user as seen by the front-end store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserProfile {
    pub id: String,
    pub display_name: String,
    pub role: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl UserProfile {
    pub fn can_read(&self, resource: &str) -> bool {
        grants(&self.permissions, resource, "read")
    }

    pub fn can_write(&self, resource: &str) -> bool {
        grants(&self.permissions, resource, "write")
    }

    /// Whether any admin section should appear in the navigation.
    pub fn has_back_office(&self) -> bool {
        RESOURCES.iter().any(|r| self.can_read(r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perms(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn wildcard_grants_everything() {
        let p = perms(&["*"]);
        assert!(grants(&p, "cases", "write"));
        assert!(grants(&p, "permissions", "read"));
    }

    #[test]
    fn write_implies_read_but_not_reverse() {
        let p = perms(&["articles:write", "cases:read"]);
        assert!(grants(&p, "articles", "read"));
        assert!(grants(&p, "cases", "read"));
        assert!(!grants(&p, "cases", "write"));
        assert!(!grants(&p, "judges", "read"));
    }

    #[test]
    fn permission_syntax() {
        assert!(is_valid_permission("*"));
        assert!(is_valid_permission("display_boards:write"));
        assert!(!is_valid_permission("cases"));
        assert!(!is_valid_permission("cases:delete"));
        assert!(!is_valid_permission("users:read"));
    }

    #[test]
    fn reader_has_no_back_office() {
        let reader = UserProfile {
            role: "reader".into(),
            ..Default::default()
        };
        assert!(!reader.has_back_office());

        let clerk = UserProfile {
            role: "clerk".into(),
            permissions: perms(&["cases:write"]),
            ..Default::default()
        };
        assert!(clerk.has_back_office());
        assert!(clerk.can_write("cases"));
        assert!(!clerk.can_read("articles"));
    }
}
