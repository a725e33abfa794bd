use dioxus::prelude::*;
use shared_types::CauseList;
use shared_ui::{
    use_toast, Button, ButtonVariant, Card, CardContent, FormSelect, Input, PageActions,
    PageHeader, PageTitle, SearchBar, SkeletonList, ValueOptions,
};

use super::AdminGuard;
use crate::format_helpers::today_iso;
use crate::routes::public::{court_options, CauseListTable};
use crate::routes::{load, Route};
use crate::store::use_store;

const RESOURCE: &str = "display_boards";

/// Preview the cause list a court's public display board will show.
#[component]
pub fn AdminDisplayBoards(lang: String) -> Element {
    let store = use_store();
    let toast = use_toast();
    let mut court = use_signal(String::new);
    let mut date = use_signal(today_iso);
    let mut board = use_signal(|| None::<CauseList>);
    let mut fetching = use_signal(|| false);

    let courts = use_resource(move || async move {
        let client = store.client();
        load(store, toast, "load courts", client.list_cases())
            .await
            .map(|cases| court_options(&cases))
            .unwrap_or_default()
    });

    let generate = move |_| {
        let court_name = court.read().trim().to_string();
        let day = date.read().clone();
        if court_name.is_empty() {
            return;
        }
        fetching.set(true);
        spawn(async move {
            let client = store.client();
            if let Some(list) =
                load(store, toast, "load cause list", client.cause_list(&court_name, &day)).await
            {
                tracing::info!(court = %list.court, entries = list.entries.len(), "cause list built");
                board.set(Some(list));
            }
            fetching.set(false);
        });
    };

    let court_values = courts.read().clone().unwrap_or_default();
    let public_link = Route::DisplayBoard {
        lang: lang.clone(),
        court: court.read().clone(),
        date: date.read().clone(),
    };

    rsx! {
        AdminGuard { resource: RESOURCE.to_string(),
            div { class: "container",
                PageHeader {
                    PageTitle { "Display Boards" }
                    PageActions {
                        if !court.read().is_empty() {
                            Link { class: "button", to: public_link, "Open public board" }
                        }
                    }
                }
                SearchBar {
                    onsubmit: generate,
                    FormSelect {
                        label: "Court",
                        value: court.read().clone(),
                        onchange: move |e: Event<FormData>| court.set(e.value()),
                        option { value: "", "Select a court" }
                        ValueOptions { values: court_values, selected: court.read().clone() }
                    }
                    Input {
                        label: "Date", input_type: "date",
                        value: date.read().clone(),
                        on_input: move |e: FormEvent| date.set(e.value()),
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        button_type: "submit",
                        loading: fetching(),
                        "Build cause list"
                    }
                }

                if fetching() && board.read().is_none() {
                    SkeletonList { rows: 6 }
                } else if let Some(list) = board.read().clone() {
                    CauseListTable { list }
                } else {
                    Card {
                        CardContent { p { "Choose a court and date to preview its cause list." } }
                    }
                }
            }
        }
    }
}
