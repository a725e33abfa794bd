use serde::{Deserialize, Serialize};

/// Entity kinds held in the full-text index.
pub const SEARCH_ENTITY_TYPES: &[&str] = &["case", "judge", "judgment", "article"];

/// A single search result returned by the global full-text search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SearchResult {
    pub id: String,
    pub entity_type: String,
    pub title: String,
    pub subtitle: String,
    /// Public slug for articles; other entities link by id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub score: f32,
}

/// Query parameters for `GET /api/search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Read the `page` value carried in a URL. Missing, malformed or
/// non-positive values fall back to page 1.
pub fn page_from_query(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_from_query_defaults_to_one() {
        assert_eq!(page_from_query(None), 1);
        assert_eq!(page_from_query(Some("")), 1);
        assert_eq!(page_from_query(Some("abc")), 1);
        assert_eq!(page_from_query(Some("-3")), 1);
        assert_eq!(page_from_query(Some("7")), 7);
    }

    #[test]
    fn result_omits_missing_slug() {
        let r = SearchResult {
            id: "1".into(),
            entity_type: "judge".into(),
            title: "Justice Rao".into(),
            subtitle: "High Court".into(),
            slug: None,
            score: 1.0,
        };
        let json = serde_json::to_value(&r).unwrap();
        assert!(json.get("slug").is_none());
    }
}
