use shared_types::{Article, Case, Judge, Judgment, SearchResult};
use sqlx::{Pool, Postgres};
use std::sync::Mutex;
use tantivy::collector::{Count, TopDocs};
use tantivy::query::QueryParser;
use tantivy::schema::{Field, Schema, Value, STORED, STRING, TEXT};
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument, Term};

/// Heap budget for the single indexing thread.
const WRITER_HEAP_BYTES: usize = 50_000_000;

/// Schema field handles for the Tantivy index.
struct SearchFields {
    id: Field,
    entity_type: Field,
    title: Field,
    subtitle: Field,
    slug: Field,
    body: Field,
}

/// One indexable record, flattened from a portal entity.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchDoc {
    pub id: String,
    pub entity_type: &'static str,
    pub title: String,
    pub subtitle: String,
    pub slug: Option<String>,
    pub body: String,
}

impl From<&Case> for SearchDoc {
    fn from(c: &Case) -> Self {
        Self {
            id: c.id.to_string(),
            entity_type: "case",
            title: format!("{} - {}", c.case_number, c.title),
            subtitle: format!("{} | {}", c.court, c.status),
            slug: None,
            body: format!("{} {} {}", c.description, c.petitioner, c.respondent),
        }
    }
}

impl From<&Judge> for SearchDoc {
    fn from(j: &Judge) -> Self {
        Self {
            id: j.id.to_string(),
            entity_type: "judge",
            title: j.name.clone(),
            subtitle: format!("{}, {}", j.designation, j.court),
            slug: None,
            body: format!(
                "{} {}",
                j.specialization.join(" "),
                j.biography.as_deref().unwrap_or("")
            ),
        }
    }
}

impl From<&Judgment> for SearchDoc {
    fn from(j: &Judgment) -> Self {
        Self {
            id: j.id.to_string(),
            entity_type: "judgment",
            title: j.title.clone(),
            subtitle: format!("{} | {}", j.judge_name, j.judgment_date),
            slug: None,
            body: format!(
                "{} {} {}",
                j.summary.as_deref().unwrap_or(""),
                j.tags.join(" "),
                j.content
            ),
        }
    }
}

impl From<&Article> for SearchDoc {
    fn from(a: &Article) -> Self {
        Self {
            id: a.id.to_string(),
            entity_type: "article",
            title: a.title.clone(),
            subtitle: a.tags.join(", "),
            slug: Some(a.slug.clone()),
            body: a.content.clone(),
        }
    }
}

/// In-memory Tantivy search index over cases, judges, judgments and
/// published articles.
pub struct SearchIndex {
    index: Index,
    reader: IndexReader,
    writer: Mutex<IndexWriter>,
    fields: SearchFields,
}

impl SearchIndex {
    /// Create a new in-RAM search index with the portal schema.
    pub fn new() -> tantivy::Result<Self> {
        let mut schema_builder = Schema::builder();
        let id = schema_builder.add_text_field("id", STRING | STORED);
        let entity_type = schema_builder.add_text_field("entity_type", STRING | STORED);
        let title = schema_builder.add_text_field("title", TEXT | STORED);
        let subtitle = schema_builder.add_text_field("subtitle", TEXT | STORED);
        let slug = schema_builder.add_text_field("slug", STORED);
        let body = schema_builder.add_text_field("body", TEXT);
        let schema = schema_builder.build();

        let index = Index::create_in_ram(schema);
        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;
        let writer = index.writer_with_num_threads(1, WRITER_HEAP_BYTES)?;

        Ok(SearchIndex {
            index,
            reader,
            writer: Mutex::new(writer),
            fields: SearchFields {
                id,
                entity_type,
                title,
                subtitle,
                slug,
                body,
            },
        })
    }

    fn to_document(&self, doc: &SearchDoc) -> TantivyDocument {
        let f = &self.fields;
        let mut out = TantivyDocument::default();
        out.add_text(f.id, &doc.id);
        out.add_text(f.entity_type, doc.entity_type);
        out.add_text(f.title, &doc.title);
        out.add_text(f.subtitle, &doc.subtitle);
        if let Some(slug) = &doc.slug {
            out.add_text(f.slug, slug);
        }
        out.add_text(f.body, &doc.body);
        out
    }

    /// Run `f` against the writer, then commit and refresh the reader.
    fn write<F>(&self, f: F) -> tantivy::Result<()>
    where
        F: FnOnce(&mut IndexWriter) -> tantivy::Result<()>,
    {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| tantivy::TantivyError::Poisoned)?;
        f(&mut writer)?;
        writer.commit()?;
        drop(writer);
        self.reader.reload()
    }

    /// Insert or replace a single record.
    pub fn upsert(&self, doc: &SearchDoc) -> tantivy::Result<()> {
        let document = self.to_document(doc);
        let id_field = self.fields.id;
        self.write(|w| {
            w.delete_term(Term::from_field_text(id_field, &doc.id));
            w.add_document(document)?;
            Ok(())
        })
    }

    /// Remove a record by id. Removing an unknown id is a no-op.
    pub fn remove(&self, id: &str) -> tantivy::Result<()> {
        let id_field = self.fields.id;
        self.write(|w| {
            w.delete_term(Term::from_field_text(id_field, id));
            Ok(())
        })
    }

    /// Replace the whole index with `docs`.
    pub fn replace_all(&self, docs: &[SearchDoc]) -> tantivy::Result<()> {
        let documents: Vec<TantivyDocument> = docs.iter().map(|d| self.to_document(d)).collect();
        self.write(|w| {
            w.delete_all_documents()?;
            for d in documents {
                w.add_document(d)?;
            }
            Ok(())
        })
    }

    /// Number of searchable documents.
    pub fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    /// Full-text search. Returns one page of hits and the total hit count.
    /// A blank or unparseable query yields no results.
    pub fn search(&self, query_str: &str, page: i64, limit: i64) -> (Vec<SearchResult>, i64) {
        let query_str = query_str.trim();
        if query_str.is_empty() {
            return (Vec::new(), 0);
        }

        let searcher = self.reader.searcher();
        let f = &self.fields;
        let query_parser = QueryParser::for_index(&self.index, vec![f.title, f.subtitle, f.body]);
        let (query, _errors) = query_parser.parse_query_lenient(query_str);

        let total = match searcher.search(&query, &Count) {
            Ok(n) => n,
            Err(e) => {
                tracing::warn!(error = %e, query = query_str, "search failed");
                return (Vec::new(), 0);
            }
        };
        let Some((offset, limit)) = page_window(page, limit, total) else {
            return (Vec::new(), total as i64);
        };
        let collector = TopDocs::with_limit(limit).and_offset(offset);
        let top_docs = match searcher.search(&query, &collector) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, query = query_str, "search failed");
                return (Vec::new(), total as i64);
            }
        };

        let text = |doc: &TantivyDocument, field: Field| {
            doc.get_first(field)
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };

        let results = top_docs
            .into_iter()
            .filter_map(|(score, address)| {
                let doc: TantivyDocument = searcher.doc(address).ok()?;
                let slug = text(&doc, f.slug);
                Some(SearchResult {
                    id: text(&doc, f.id),
                    entity_type: text(&doc, f.entity_type),
                    title: text(&doc, f.title),
                    subtitle: text(&doc, f.subtitle),
                    slug: (!slug.is_empty()).then_some(slug),
                    score,
                })
            })
            .collect();

        (results, total as i64)
    }
}

/// Offset and collector size for one page of `total` hits, or `None` when
/// the page starts past the last hit. Both values stay within `total`.
fn page_window(page: i64, limit: i64, total: usize) -> Option<(usize, usize)> {
    let limit = usize::try_from(limit.max(1)).unwrap_or(usize::MAX);
    let skipped = usize::try_from(page.max(1) - 1).unwrap_or(usize::MAX);
    let offset = skipped.saturating_mul(limit);
    if offset >= total {
        return None;
    }
    Some((offset, limit.min(total - offset)))
}

/// Build the full-text search index from all portal entities in the
/// database. Called once at server startup after migrations complete.
pub async fn build_index(
    pool: &Pool<Postgres>,
    search: &SearchIndex,
) -> Result<usize, shared_types::AppError> {
    let mut docs: Vec<SearchDoc> = Vec::new();

    let cases = crate::repo::case::list_all(pool).await?;
    docs.extend(cases.iter().map(SearchDoc::from));

    let judges = crate::repo::judge::list_all(pool).await?;
    docs.extend(judges.iter().map(SearchDoc::from));

    let judgments = crate::repo::judgment::list_all(pool).await?;
    docs.extend(judgments.iter().map(SearchDoc::from));

    let articles = crate::repo::article::list(pool, Some("published"), None).await?;
    docs.extend(articles.iter().map(SearchDoc::from));

    search
        .replace_all(&docs)
        .map_err(|e| shared_types::AppError::internal(format!("search index: {e}")))?;
    Ok(docs.len())
}

/// Log-and-continue wrapper for index maintenance after a mutation. The
/// database is the source of truth; a failed index write never fails the
/// request.
pub fn log_index_error(result: tantivy::Result<()>, entity: &str, id: &str) {
    if let Err(e) = result {
        tracing::warn!(error = %e, entity, id, "search index update failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, entity_type: &'static str, title: &str, body: &str) -> SearchDoc {
        SearchDoc {
            id: id.into(),
            entity_type,
            title: title.into(),
            subtitle: String::new(),
            slug: None,
            body: body.into(),
        }
    }

    #[test]
    fn finds_by_title_and_body() {
        let index = SearchIndex::new().unwrap();
        index.upsert(&doc("1", "case", "WP 12 - Sharma v State", "land acquisition")).unwrap();
        index.upsert(&doc("2", "judge", "Justice Rao", "taxation")).unwrap();

        let (hits, total) = index.search("sharma", 1, 10);
        assert_eq!(total, 1);
        assert_eq!(hits[0].id, "1");
        assert_eq!(hits[0].entity_type, "case");

        let (hits, _) = index.search("taxation", 1, 10);
        assert_eq!(hits[0].title, "Justice Rao");
    }

    #[test]
    fn upsert_replaces_existing_document() {
        let index = SearchIndex::new().unwrap();
        index.upsert(&doc("1", "article", "Old headline", "")).unwrap();
        index.upsert(&doc("1", "article", "New headline", "")).unwrap();

        assert_eq!(index.num_docs(), 1);
        assert_eq!(index.search("old", 1, 10).1, 0);
        assert_eq!(index.search("new", 1, 10).1, 1);
    }

    #[test]
    fn remove_drops_document() {
        let index = SearchIndex::new().unwrap();
        index.upsert(&doc("1", "judgment", "Tax appeal", "")).unwrap();
        index.remove("1").unwrap();
        assert_eq!(index.search("tax", 1, 10).1, 0);
        index.remove("missing").unwrap();
    }

    #[test]
    fn pages_through_hits_with_total() {
        let index = SearchIndex::new().unwrap();
        let docs: Vec<SearchDoc> = (0..12)
            .map(|i| doc(&i.to_string(), "case", &format!("Appeal {i}"), "appeal"))
            .collect();
        index.replace_all(&docs).unwrap();

        let (first, total) = index.search("appeal", 1, 5);
        assert_eq!(total, 12);
        assert_eq!(first.len(), 5);

        let (last, _) = index.search("appeal", 3, 5);
        assert_eq!(last.len(), 2);
    }

    #[test]
    fn pages_past_the_end_are_empty_but_keep_the_total() {
        let index = SearchIndex::new().unwrap();
        let docs: Vec<SearchDoc> = (0..3)
            .map(|i| doc(&i.to_string(), "case", &format!("Appeal {i}"), "appeal"))
            .collect();
        index.replace_all(&docs).unwrap();

        assert_eq!(index.search("appeal", 2, 10), (Vec::new(), 3));
        assert_eq!(index.search("appeal", 1_000_000_000_000, 10), (Vec::new(), 3));

        let (page, limit) = shared_types::normalize_pagination(Some(i64::MAX), Some(10));
        assert_eq!(index.search("appeal", page, limit), (Vec::new(), 3));
        assert_eq!(index.search("appeal", i64::MAX, i64::MAX), (Vec::new(), 3));
    }

    #[test]
    fn page_window_stays_within_the_hit_count() {
        assert_eq!(page_window(1, 10, 3), Some((0, 3)));
        assert_eq!(page_window(2, 5, 12), Some((5, 5)));
        assert_eq!(page_window(3, 5, 12), Some((10, 2)));
        assert_eq!(page_window(0, 0, 1), Some((0, 1)));
        assert_eq!(page_window(4, 5, 12), None);
        assert_eq!(page_window(1, 10, 0), None);
        assert_eq!(page_window(i64::MAX, i64::MAX, 12), None);
    }

    #[test]
    fn blank_and_odd_queries_are_safe() {
        let index = SearchIndex::new().unwrap();
        index.upsert(&doc("1", "case", "Appeal", "")).unwrap();
        assert_eq!(index.search("   ", 1, 10), (Vec::new(), 0));
        // Unbalanced syntax is parsed leniently instead of erroring.
        let (_, total) = index.search("appeal AND (", 1, 10);
        assert!(total <= 1);
    }

    #[test]
    fn article_doc_carries_slug() {
        let index = SearchIndex::new().unwrap();
        let mut d = doc("a1", "article", "Bail reform", "bail");
        d.slug = Some("bail-reform".into());
        index.upsert(&d).unwrap();
        let (hits, _) = index.search("bail", 1, 10);
        assert_eq!(hits[0].slug.as_deref(), Some("bail-reform"));
    }
}
