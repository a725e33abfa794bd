use dioxus::prelude::*;
use shared_types::{collect_tags, filter_by_tag, ArticleResponse};
use shared_ui::{
    use_toast, Badge, BadgeVariant, Card, CardContent, CardFooter, CardHeader, CardMeta,
    CardTitle, FormSelect, PageHeader, PageTitle, SkeletonList,
};

use crate::format_helpers::format_date_human;
use crate::routes::{load, Route};
use crate::store::use_store;

const EXCERPT_CHARS: usize = 180;

/// Landing page: published articles, newest first, filterable by tag.
#[component]
pub fn News(lang: String) -> Element {
    let store = use_store();
    let toast = use_toast();
    let mut tag = use_signal(String::new);

    let articles = use_resource(move || async move {
        let client = store.client();
        load(store, toast, "load news", client.list_articles(Some("published"))).await
    });

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { "Latest legal news" }
            }

            match &*articles.read() {
                None => rsx! { SkeletonList { rows: 4 } },
                Some(None) => rsx! {
                    Card {
                        CardContent { p { "News could not be loaded. Try again shortly." } }
                    }
                },
                Some(Some(list)) => {
                    let tags = collect_tags(list);
                    let selected = tag.read().clone();
                    let shown = filter_by_tag(list, &selected);
                    rsx! {
                        if !tags.is_empty() {
                            div { class: "filter-row",
                                FormSelect {
                                    label: "Topic",
                                    value: selected.clone(),
                                    onchange: move |evt: Event<FormData>| tag.set(evt.value()),
                                    option { value: "", "All topics" }
                                    for t in tags {
                                        option { key: "{t}", value: "{t}", selected: t == selected, "{t}" }
                                    }
                                }
                            }
                        }
                        if shown.is_empty() {
                            Card {
                                CardContent { p { "No articles published yet." } }
                            }
                        } else {
                            div { class: "card-grid",
                                for a in shown {
                                    ArticleCard { key: "{a.id}", lang: lang.clone(), article: a.clone() }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ArticleCard(lang: String, article: ArticleResponse) -> Element {
    let date = format_date_human(article.published_at.as_deref().unwrap_or(&article.created_at));
    let excerpt = article.excerpt(EXCERPT_CHARS);

    rsx! {
        Card { class: "article-card",
            if let Some(src) = article.thumbnail.as_ref() {
                img { class: "article-thumb", src: "{src}", alt: "" }
            }
            CardHeader {
                CardTitle {
                    Link {
                        to: Route::ArticleDetail { lang: lang.clone(), slug: article.slug.clone() },
                        "{article.title}"
                    }
                }
                CardMeta { "{date}" }
            }
            CardContent { p { "{excerpt}" } }
            if !article.tags.is_empty() {
                CardFooter {
                    for t in article.tags.iter() {
                        Badge { key: "{t}", variant: BadgeVariant::Outline, "{t}" }
                    }
                }
            }
        }
    }
}
