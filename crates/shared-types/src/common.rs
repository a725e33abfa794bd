use serde::{Deserialize, Serialize};

// ── Response envelopes ──────────────────────────────────────────────

/// Outer response wrapper: every successful API body is `{ "data": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ApiEnvelope<T> {
    pub data: T,
}

impl<T> ApiEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }

    pub fn into_inner(self) -> T {
        self.data
    }
}

/// Inner payload of a list response: `{ "data": [...], "meta": {...}? }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ListPayload<T> {
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<PaginationMeta>,
}

/// Full list response body: `{ "data": { "data": [...], "meta": {...}? } }`.
pub type ListEnvelope<T> = ApiEnvelope<ListPayload<T>>;

impl<T> ApiEnvelope<ListPayload<T>> {
    /// Unpaginated list (the admin pages fetch whole collections).
    pub fn list(items: Vec<T>) -> Self {
        Self::new(ListPayload {
            data: items,
            meta: None,
        })
    }

    /// One page of a larger result set.
    pub fn paged(items: Vec<T>, page: i64, limit: i64, total: i64) -> Self {
        Self::new(ListPayload {
            data: items,
            meta: Some(PaginationMeta::new(page, limit, total)),
        })
    }

    pub fn items(&self) -> &[T] {
        &self.data.data
    }
}

/// Pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let total_pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            1
        };
        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

/// Helper to normalize pagination params with safe defaults.
pub fn normalize_pagination(page: Option<i64>, limit: Option<i64>) -> (i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(10).clamp(1, 100);
    (page, limit)
}

/// Simple `{ "message": ... }` body for acknowledgements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MessageResponse {
    pub message: String,
}

// ── Comma-separated fields ──────────────────────────────────────────

/// Split a form's comma-separated input (`"tax, gst ,,appeal"`) into a
/// trimmed list with empty entries dropped.
pub fn split_csv(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join a list back into the form representation (`"tax, gst, appeal"`).
pub fn join_csv(items: &[String]) -> String {
    items.join(", ")
}

// ── Client-side filtering ───────────────────────────────────────────

/// Entities that the admin tables filter by free-text search.
pub trait Searchable {
    /// The one or two fields a search term is matched against.
    fn search_fields(&self) -> Vec<&str>;
}

/// Case-insensitive substring match of `term` against any search field.
/// A blank term matches everything.
pub fn matches_term<T: Searchable>(item: &T, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Filter a fetched collection by a search term, preserving order.
pub fn filter_by_term<T: Searchable + Clone>(items: &[T], term: &str) -> Vec<T> {
    items
        .iter()
        .filter(|item| matches_term(*item, term))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        number: String,
        title: String,
    }

    impl Searchable for Row {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.number.as_str(), self.title.as_str()]
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { number: "A1".into(), title: "Foo".into() },
            Row { number: "B2".into(), title: "Bar".into() },
        ]
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let filtered = filter_by_term(&rows(), "foo");
        assert_eq!(filtered, vec![rows()[0].clone()]);
    }

    #[test]
    fn filter_matches_second_field() {
        let filtered = filter_by_term(&rows(), "b2");
        assert_eq!(filtered, vec![rows()[1].clone()]);
    }

    #[test]
    fn blank_term_keeps_everything() {
        assert_eq!(filter_by_term(&rows(), "   ").len(), 2);
    }

    #[test]
    fn split_csv_trims_and_drops_empties() {
        assert_eq!(
            split_csv(" constitutional law, tax ,, appeals "),
            vec!["constitutional law", "tax", "appeals"]
        );
        assert!(split_csv("").is_empty());
    }

    #[test]
    fn join_csv_uses_comma_space() {
        let items = vec!["tax".to_string(), "gst".to_string()];
        assert_eq!(join_csv(&items), "tax, gst");
        assert_eq!(split_csv(&join_csv(&items)), items);
    }

    #[test]
    fn pagination_meta_flags() {
        let meta = PaginationMeta::new(2, 10, 25);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next);
        assert!(meta.has_prev);

        let last = PaginationMeta::new(3, 10, 25);
        assert!(!last.has_next);
    }

    #[test]
    fn normalize_pagination_clamps() {
        assert_eq!(normalize_pagination(None, None), (1, 10));
        assert_eq!(normalize_pagination(Some(0), Some(1000)), (1, 100));
    }

    #[test]
    fn list_envelope_wire_shape() {
        let env = ListEnvelope::paged(vec![1, 2], 1, 2, 5);
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["data"]["data"], serde_json::json!([1, 2]));
        assert_eq!(json["data"]["meta"]["total_pages"], 3);

        let bare = ListEnvelope::list(vec!["x"]);
        let json = serde_json::to_value(&bare).unwrap();
        assert!(json["data"].get("meta").is_none());
    }
}
