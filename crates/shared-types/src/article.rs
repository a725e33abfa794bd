use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{join_csv, split_csv, Searchable};
use crate::judge::non_empty;

// ── Status vocabulary ───────────────────────────────────────────────

/// Valid article status values matching the DB CHECK constraint.
pub const ARTICLE_STATUSES: &[&str] = &["pending", "published", "draft", "rejected"];

/// Check whether a status string is a valid article status.
pub fn is_valid_article_status(s: &str) -> bool {
    ARTICLE_STATUSES.contains(&s)
}

/// Human label for an article status value.
pub fn article_status_label(s: &str) -> &'static str {
    match s {
        "pending" => "Pending Review",
        "published" => "Published",
        "draft" => "Draft",
        "rejected" => "Rejected",
        _ => "Unknown",
    }
}

// ── DB row struct ───────────────────────────────────────────────────

/// A news article.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub tags: Vec<String>,
    pub status: String,
    pub thumbnail: Option<String>,
    pub author_id: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// API response shape for an article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ArticleResponse {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Article> for ArticleResponse {
    fn from(a: Article) -> Self {
        Self {
            id: a.id.to_string(),
            title: a.title,
            slug: a.slug,
            content: a.content,
            tags: a.tags,
            status: a.status,
            thumbnail: a.thumbnail,
            author_id: a.author_id,
            published_at: a.published_at.map(|d| d.to_rfc3339()),
            created_at: a.created_at.to_rfc3339(),
            updated_at: a.updated_at.to_rfc3339(),
        }
    }
}

impl ArticleResponse {
    /// Case-insensitive exact match against one of the article's tags.
    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = tag.trim();
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(wanted))
    }

    /// First `max_chars` characters of the content, for list cards.
    pub fn excerpt(&self, max_chars: usize) -> String {
        let mut out: String = self.content.chars().take(max_chars).collect();
        if self.content.chars().count() > max_chars {
            out.push('…');
        }
        out
    }
}

impl Searchable for ArticleResponse {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.slug.as_str()]
    }
}

/// Keep only articles carrying `tag`. A blank tag keeps everything.
pub fn filter_by_tag(articles: &[ArticleResponse], tag: &str) -> Vec<ArticleResponse> {
    if tag.trim().is_empty() {
        return articles.to_vec();
    }
    articles.iter().filter(|a| a.has_tag(tag)).cloned().collect()
}

/// Distinct tags across a set of articles, in first-seen order.
pub fn collect_tags(articles: &[ArticleResponse]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for tag in articles.iter().flat_map(|a| a.tags.iter()) {
        if !seen.iter().any(|s| s.eq_ignore_ascii_case(tag)) {
            seen.push(tag.clone());
        }
    }
    seen
}

/// Build a URL slug from a title: lowercase ASCII alphanumerics separated by
/// single hyphens.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

// ── Request types ───────────────────────────────────────────────────

/// Request to create an article. New articles default to `pending`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct CreateArticleRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 300, message = "Title must be 1-300 characters"))
    )]
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Content must not be empty"))
    )]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub author_id: Option<String>,
}

/// Request to update an article (all fields optional).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateArticleRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// Request to update only an article's status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateArticleStatusRequest {
    pub status: String,
}

/// Flat form state for the article editor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleForm {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub tags: String,
    pub status: String,
    pub thumbnail: String,
}

impl ArticleForm {
    pub fn from_response(a: &ArticleResponse) -> Self {
        Self {
            title: a.title.clone(),
            slug: a.slug.clone(),
            content: a.content.clone(),
            tags: join_csv(&a.tags),
            status: a.status.clone(),
            thumbnail: a.thumbnail.clone().unwrap_or_default(),
        }
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.content.trim().is_empty() {
            missing.push("content");
        }
        missing
    }

    pub fn to_create_request(&self, author_id: Option<String>) -> CreateArticleRequest {
        CreateArticleRequest {
            title: self.title.trim().to_string(),
            slug: non_empty(&self.slug),
            content: self.content.clone(),
            tags: split_csv(&self.tags),
            status: non_empty(&self.status),
            thumbnail: non_empty(&self.thumbnail),
            author_id,
        }
    }

    pub fn to_update_request(&self) -> UpdateArticleRequest {
        UpdateArticleRequest {
            title: non_empty(&self.title),
            slug: non_empty(&self.slug),
            content: non_empty(&self.content),
            tags: Some(split_csv(&self.tags)),
            status: non_empty(&self.status),
            thumbnail: non_empty(&self.thumbnail),
        }
    }
}
