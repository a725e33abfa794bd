use dioxus::prelude::*;
use shared_types::{CaseResponse, CauseList};
use shared_ui::{
    use_toast, Button, ButtonVariant, Card, CardContent, DataTable, DataTableBody, DataTableCell,
    DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow, FormSelect, Input, PageHeader,
    PageTitle, SearchBar, SkeletonList, StatusBadge, ValueOptions,
};

use crate::format_helpers::{format_date_human, today_iso};
use crate::routes::{load, Route};
use crate::store::use_store;

/// Distinct courts named on cases, sorted.
pub fn court_options(cases: &[CaseResponse]) -> Vec<String> {
    let mut courts: Vec<String> = cases
        .iter()
        .map(|c| c.court.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();
    courts.sort();
    courts.dedup();
    courts
}

/// Cause list for a court and date. Both live in the URL; the date
/// defaults to today.
#[component]
pub fn DisplayBoard(lang: String, court: String, date: String) -> Element {
    let store = use_store();
    let toast = use_toast();
    let date = if date.trim().is_empty() { today_iso() } else { date };

    let mut court_input = use_signal(|| court.clone());
    let mut date_input = use_signal(|| date.clone());

    let courts = use_resource(move || async move {
        let client = store.client();
        load(store, toast, "load courts", client.list_cases())
            .await
            .map(|cases| court_options(&cases))
            .unwrap_or_default()
    });

    let board = use_resource(use_reactive!(|(court, date)| async move {
        if court.trim().is_empty() {
            return None;
        }
        let client = store.client();
        load(store, toast, "load cause list", client.cause_list(&court, &date)).await
    }));

    let court_values = courts.read().clone().unwrap_or_default();

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { "Display Board" }
            }
            SearchBar {
                onsubmit: move |_| {
                    navigator().replace(Route::DisplayBoard {
                        lang: lang.clone(),
                        court: court_input.read().clone(),
                        date: date_input.read().clone(),
                    });
                },
                FormSelect {
                    label: "Court",
                    value: court_input.read().clone(),
                    onchange: move |evt: Event<FormData>| court_input.set(evt.value()),
                    option { value: "", "Select a court" }
                    ValueOptions { values: court_values, selected: court_input.read().clone() }
                }
                Input {
                    label: "Date",
                    input_type: "date",
                    value: date_input.read().clone(),
                    on_input: move |evt: FormEvent| date_input.set(evt.value()),
                }
                Button { variant: ButtonVariant::Primary, button_type: "submit", "Show" }
            }

            if court.trim().is_empty() {
                p { class: "muted", "Pick a court to see its cause list." }
            } else {
                match &*board.read() {
                    None => rsx! { SkeletonList { rows: 6 } },
                    Some(None) => rsx! {
                        Card { CardContent { p { "The cause list could not be loaded." } } }
                    },
                    Some(Some(list)) => rsx! { CauseListTable { list: list.clone() } },
                }
            }
        }
    }
}

/// Numbered cause list table, shared by the public board and the back office.
#[component]
pub fn CauseListTable(list: CauseList) -> Element {
    let date = format_date_human(&list.date);

    rsx! {
        h2 { class: "board-heading", "{list.court} · {date}" }
        DataTable {
            DataTableHeader {
                DataTableColumn { "#" }
                DataTableColumn { "Case No." }
                DataTableColumn { "Title" }
                DataTableColumn { "Parties" }
                DataTableColumn { "Status" }
            }
            DataTableBody {
                if list.entries.is_empty() {
                    DataTableEmpty { colspan: 5, "No matters listed for this date." }
                }
                for e in list.entries.iter() {
                    DataTableRow { key: "{e.case_id}",
                        DataTableCell { "{e.item_number}" }
                        DataTableCell { "{e.case_number}" }
                        DataTableCell { "{e.title}" }
                        DataTableCell { "{e.petitioner} v. {e.respondent}" }
                        DataTableCell { StatusBadge { status: e.status.clone() } }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(court: &str) -> CaseResponse {
        CaseResponse {
            court: court.into(),
            ..Default::default()
        }
    }

    #[test]
    fn courts_are_distinct_and_sorted() {
        let cases = vec![
            case("Delhi High Court"),
            case("Supreme Court"),
            case(" Delhi High Court "),
            case(""),
        ];
        assert_eq!(
            court_options(&cases),
            vec!["Delhi High Court".to_string(), "Supreme Court".to_string()]
        );
    }
}
