use dioxus::prelude::*;
use shared_ui::{
    use_toast, Badge, BadgeVariant, Card, CardContent, PageHeader, PageTitle, SkeletonList,
};

use crate::format_helpers::format_date_human;
use crate::routes::{load, Route};
use crate::store::use_store;

#[component]
pub fn ArticleDetail(lang: String, slug: String) -> Element {
    let store = use_store();
    let toast = use_toast();

    let article = use_resource(use_reactive!(|slug| async move {
        let client = store.client();
        load(store, toast, "load article", client.get_article_by_slug(&slug)).await
    }));

    rsx! {
        div { class: "container article-page",
            Link { class: "back-link", to: Route::News { lang: lang.clone() }, "← All news" }

            match &*article.read() {
                None => rsx! { SkeletonList { rows: 6 } },
                Some(None) => rsx! {
                    Card {
                        CardContent { p { "This article is not available." } }
                    }
                },
                Some(Some(a)) => {
                    let date = format_date_human(a.published_at.as_deref().unwrap_or(&a.created_at));
                    rsx! {
                        PageHeader {
                            PageTitle { "{a.title}" }
                        }
                        p { class: "article-date", "{date}" }
                        if let Some(src) = a.thumbnail.as_ref() {
                            img { class: "article-hero", src: "{src}", alt: "" }
                        }
                        div { class: "article-tags",
                            for t in a.tags.iter() {
                                Badge { key: "{t}", variant: BadgeVariant::Outline, "{t}" }
                            }
                        }
                        div { class: "article-body",
                            for (i, para) in a.content.split("\n\n").enumerate() {
                                p { key: "{i}", "{para}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
