use dioxus::prelude::*;
use shared_types::{filter_by_term, JudgeResponse};
use shared_ui::{
    use_toast, Badge, BadgeVariant, Card, CardContent, CardFooter, CardHeader, CardMeta,
    CardTitle, Input, PageHeader, PageTitle, SearchBar, SkeletonList,
};

use crate::format_helpers::format_date_human;
use crate::routes::{load, Route};
use crate::store::use_store;

/// Directory of sitting judges.
#[component]
pub fn Judges(lang: String) -> Element {
    let store = use_store();
    let toast = use_toast();
    let mut term = use_signal(String::new);

    let judges = use_resource(move || async move {
        let client = store.client();
        load(store, toast, "load judges", client.list_judges(true)).await
    });

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { "Judges" }
            }
            SearchBar {
                Input {
                    value: term.read().clone(),
                    placeholder: "Filter by name or court...",
                    on_input: move |evt: FormEvent| term.set(evt.value()),
                }
            }

            match &*judges.read() {
                None => rsx! { SkeletonList { rows: 4 } },
                Some(None) => rsx! {
                    Card { CardContent { p { "Judges could not be loaded." } } }
                },
                Some(Some(list)) => {
                    let shown = filter_by_term(list, &term.read());
                    rsx! {
                        if shown.is_empty() {
                            Card { CardContent { p { "No judges match." } } }
                        } else {
                            div { class: "card-grid",
                                for j in shown {
                                    JudgeCard { key: "{j.id}", lang: lang.clone(), judge: j.clone() }
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
fn JudgeCard(lang: String, judge: JudgeResponse) -> Element {
    rsx! {
        Card { class: "judge-card",
            CardHeader {
                CardTitle {
                    Link {
                        to: Route::JudgeProfile { lang: lang.clone(), id: judge.id.clone() },
                        "{judge.name}"
                    }
                }
                CardMeta { "{judge.designation}, {judge.court}" }
            }
            if !judge.specialization.is_empty() {
                CardFooter {
                    for s in judge.specialization.iter() {
                        Badge { key: "{s}", variant: BadgeVariant::Secondary, "{s}" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn JudgeProfile(lang: String, id: String) -> Element {
    let store = use_store();
    let toast = use_toast();

    let judge = use_resource(use_reactive!(|id| async move {
        let client = store.client();
        load(store, toast, "load judge", client.get_judge(&id)).await
    }));

    rsx! {
        div { class: "container",
            Link { class: "back-link", to: Route::Judges { lang: lang.clone() }, "← All judges" }

            match &*judge.read() {
                None => rsx! { SkeletonList { rows: 5 } },
                Some(None) => rsx! {
                    Card { CardContent { p { "This judge could not be found." } } }
                },
                Some(Some(j)) => {
                    let appointed = j.appointment_date.as_deref().map(format_date_human);
                    let retired = j.retirement_date.as_deref().map(format_date_human);
                    rsx! {
                        PageHeader {
                            PageTitle { "{j.name}" }
                            if j.is_active {
                                Badge { variant: BadgeVariant::Success, "Active" }
                            } else {
                                Badge { variant: BadgeVariant::Outline, "Retired" }
                            }
                        }
                        div { class: "profile",
                            if let Some(src) = j.photo_url.as_ref() {
                                img { class: "profile-photo", src: "{src}", alt: "{j.name}" }
                            }
                            dl { class: "profile-facts",
                                dt { "Designation" }
                                dd { "{j.designation}" }
                                dt { "Court" }
                                dd { "{j.court}" }
                                if let Some(d) = appointed {
                                    dt { "Appointed" }
                                    dd { "{d}" }
                                }
                                if let Some(d) = retired {
                                    dt { "Retired" }
                                    dd { "{d}" }
                                }
                                if !j.specialization.is_empty() {
                                    dt { "Specialization" }
                                    dd { "{j.specialization_csv()}" }
                                }
                            }
                        }
                        if let Some(bio) = j.biography.as_ref() {
                            Card {
                                CardHeader { CardTitle { "Biography" } }
                                CardContent { p { "{bio}" } }
                            }
                        }
                    }
                }
            }
        }
    }
}
