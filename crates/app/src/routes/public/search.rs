use dioxus::prelude::*;
use shared_types::{page_from_query, SearchResult};
use shared_ui::{
    clamp_page, total_pages, use_toast, Badge, BadgeVariant, Button, ButtonVariant, Card, CardContent,
    CardHeader, CardMeta, CardTitle, Input, PageHeader, PageTitle, Pagination, SearchBar,
    SkeletonList,
};

use crate::format_helpers::format_snake_case_title;
use crate::routes::{load, Route};
use crate::store::use_store;

/// Full-text search across cases, judges, judgments and articles. Query and
/// page live in the URL so results are linkable and back/forward works.
#[component]
pub fn Search(lang: String, q: String, page: String) -> Element {
    let store = use_store();
    let toast = use_toast();
    let current = page_from_query(Some(&page));
    let mut input = use_signal(|| q.clone());

    // Keep the box in sync when navigation changes the query.
    use_effect(use_reactive!(|q| input.set(q)));

    let results = use_resource(use_reactive!(|(q, current)| async move {
        if q.trim().is_empty() {
            return None;
        }
        let client = store.client();
        load(store, toast, "search", client.search(&q, current)).await
    }));

    let submit_lang = lang.clone();
    let page_lang = lang.clone();
    let page_q = q.clone();

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { "Search" }
            }
            SearchBar {
                onsubmit: move |_| {
                    navigator().push(Route::Search {
                        lang: submit_lang.clone(),
                        q: input.read().trim().to_string(),
                        page: "1".to_string(),
                    });
                },
                Input {
                    value: input.read().clone(),
                    placeholder: "Search cases, judges, judgments and news...",
                    on_input: move |evt: FormEvent| input.set(evt.value()),
                }
                Button { variant: ButtonVariant::Primary, button_type: "submit", "Search" }
            }

            match search_view(&q, results.pending(), Option::as_ref(&results.read())) {
                SearchView::Prompt => rsx! {
                    p { class: "muted", "Enter a term to search the portal." }
                },
                SearchView::Loading => rsx! { SkeletonList { rows: 5 } },
                SearchView::Unavailable => rsx! {
                    Card { CardContent { p { "Search is unavailable right now." } } }
                },
                SearchView::Results(payload) => {
                    let (total, per_page) = payload
                        .meta
                        .as_ref()
                        .map(|m| (m.total, m.limit))
                        .unwrap_or((payload.data.len() as i64, payload.data.len().max(1) as i64));
                    let pages = total_pages(total, per_page);
                    let current = clamp_page(current, pages);
                    rsx! {
                        p { class: "muted", "{total} result(s) for “{q}”" }
                        if payload.data.is_empty() {
                            Card { CardContent { p { "Nothing matched your search." } } }
                        }
                        div { class: "search-results",
                            for r in payload.data.iter() {
                                SearchResultCard { key: "{r.entity_type}-{r.id}", lang: lang.clone(), result: r.clone() }
                            }
                        }
                        Pagination {
                            current,
                            total_pages: pages,
                            on_page: move |p: i64| {
                                navigator().push(Route::Search {
                                    lang: page_lang.clone(),
                                    q: page_q.clone(),
                                    page: p.to_string(),
                                });
                            },
                        }
                    }
                }
            }
        }
    }
}

/// What the results area shows.
#[derive(Debug, PartialEq)]
pub enum SearchView<'a, T> {
    Prompt,
    Loading,
    Unavailable,
    Results(&'a T),
}

/// Pick the results view. A request in flight always shows placeholders,
/// even while the previous page's results are still held.
pub fn search_view<'a, T>(
    q: &str,
    pending: bool,
    value: Option<&'a Option<T>>,
) -> SearchView<'a, T> {
    if q.trim().is_empty() {
        return SearchView::Prompt;
    }
    match value {
        _ if pending => SearchView::Loading,
        None => SearchView::Loading,
        Some(None) => SearchView::Unavailable,
        Some(Some(payload)) => SearchView::Results(payload),
    }
}

/// Public page a result links to. Cases have no public page.
pub fn result_route(lang: &str, result: &SearchResult) -> Option<Route> {
    let lang = lang.to_string();
    match result.entity_type.as_str() {
        "article" => Some(Route::ArticleDetail {
            lang,
            slug: result.slug.clone().unwrap_or_else(|| result.id.clone()),
        }),
        "judge" => Some(Route::JudgeProfile {
            lang,
            id: result.id.clone(),
        }),
        "judgment" => Some(Route::JudgmentDetail {
            lang,
            id: result.id.clone(),
        }),
        _ => None,
    }
}

#[component]
fn SearchResultCard(lang: String, result: SearchResult) -> Element {
    let kind = format_snake_case_title(&result.entity_type);
    let route = result_route(&lang, &result);

    rsx! {
        Card { class: "search-result",
            CardHeader {
                CardTitle {
                    if let Some(to) = route {
                        Link { to: to, "{result.title}" }
                    } else {
                        span { "{result.title}" }
                    }
                }
                CardMeta {
                    Badge { variant: BadgeVariant::Secondary, "{kind}" }
                    " {result.subtitle}"
                }
            }
        }
    }
}
