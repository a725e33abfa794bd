use dioxus::prelude::*;
use shared_types::filter_by_term;
use shared_ui::{
    use_toast, Badge, BadgeVariant, Card, CardContent, CardHeader, CardTitle, DataTable,
    DataTableBody, DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow,
    Input, PageHeader, PageTitle, SearchBar, SkeletonList,
};

use crate::format_helpers::format_date_human;
use crate::routes::{load, Route};
use crate::store::use_store;

/// Judgment archive with a free-text filter over title and judge.
#[component]
pub fn Judgments(lang: String) -> Element {
    let store = use_store();
    let toast = use_toast();
    let mut term = use_signal(String::new);

    let judgments = use_resource(move || async move {
        let client = store.client();
        load(store, toast, "load judgments", client.list_judgments()).await
    });

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { "Judgments" }
            }
            SearchBar {
                Input {
                    value: term.read().clone(),
                    placeholder: "Filter by title or judge...",
                    on_input: move |evt: FormEvent| term.set(evt.value()),
                }
            }

            match &*judgments.read() {
                None => rsx! { SkeletonList {} },
                Some(None) => rsx! {
                    Card { CardContent { p { "Judgments could not be loaded." } } }
                },
                Some(Some(list)) => {
                    let shown = filter_by_term(list, &term.read());
                    rsx! {
                        DataTable {
                            DataTableHeader {
                                DataTableColumn { "Date" }
                                DataTableColumn { "Title" }
                                DataTableColumn { "Judge" }
                            }
                            DataTableBody {
                                if shown.is_empty() {
                                    DataTableEmpty { colspan: 3, "No judgments match." }
                                }
                                for j in shown {
                                    DataTableRow {
                                        key: "{j.id}",
                                        onclick: {
                                            let to = Route::JudgmentDetail { lang: lang.clone(), id: j.id.clone() };
                                            move |_| { navigator().push(to.clone()); }
                                        },
                                        DataTableCell { "{format_date_human(&j.judgment_date)}" }
                                        DataTableCell { "{j.title}" }
                                        DataTableCell { "{j.judge_name}" }
                                    }
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
pub fn JudgmentDetail(lang: String, id: String) -> Element {
    let store = use_store();
    let toast = use_toast();

    let judgment = use_resource(use_reactive!(|id| async move {
        let client = store.client();
        load(store, toast, "load judgment", client.get_judgment(&id)).await
    }));

    rsx! {
        div { class: "container",
            Link { class: "back-link", to: Route::Judgments { lang: lang.clone() }, "← All judgments" }

            match &*judgment.read() {
                None => rsx! { SkeletonList { rows: 6 } },
                Some(None) => rsx! {
                    Card { CardContent { p { "This judgment could not be found." } } }
                },
                Some(Some(j)) => rsx! {
                    PageHeader {
                        PageTitle { "{j.title}" }
                    }
                    p { class: "article-date",
                        "{format_date_human(&j.judgment_date)} · {j.judge_name}"
                    }
                    div { class: "article-tags",
                        for t in j.tags.iter() {
                            Badge { key: "{t}", variant: BadgeVariant::Outline, "{t}" }
                        }
                    }
                    if let Some(summary) = j.summary.as_ref() {
                        Card {
                            CardHeader { CardTitle { "Summary" } }
                            CardContent { p { "{summary}" } }
                        }
                    }
                    div { class: "article-body",
                        for (i, para) in j.content.split("\n\n").enumerate() {
                            p { key: "{i}", "{para}" }
                        }
                    }
                },
            }
        }
    }
}
