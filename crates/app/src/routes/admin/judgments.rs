use dioxus::prelude::*;
use shared_types::{filter_by_term, CaseResponse, JudgmentForm, JudgmentResponse};
use shared_ui::{
    use_toast, Button, ButtonVariant, Card, CardContent, ConfirmDialog, DataTable, DataTableBody,
    DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow, FormSelect,
    Input, PageActions, PageHeader, PageTitle, SearchBar, SkeletonList, Textarea, ToastOptions,
    Toasts,
};

use super::{field_error, AdminGuard};
use crate::format_helpers::format_date_human;
use crate::routes::{load, toast_error, Route};
use crate::store::{use_store, PortalStore};
use crate::workflow::DeleteFlow;

const RESOURCE: &str = "judgments";

async fn fetch_judgments(store: PortalStore, toast: Toasts) -> Option<Vec<JudgmentResponse>> {
    let client = store.client();
    load(store, toast, "load judgments", client.list_judgments()).await
}

#[component]
pub fn AdminJudgments(lang: String) -> Element {
    let store = use_store();
    let toast = use_toast();
    let mut judgments = use_signal(|| None::<Vec<JudgmentResponse>>);
    let mut deletion = use_signal(DeleteFlow::default);
    let mut term = use_signal(String::new);
    let can_write = store.profile.read().can_write(RESOURCE);

    use_hook(move || {
        spawn(async move {
            judgments.set(Some(fetch_judgments(store, toast).await.unwrap_or_default()));
        });
    });

    let confirm_delete = move |_| {
        let Some(id) = deletion.write().resolve(true) else {
            return;
        };
        spawn(async move {
            let client = store.client();
            match store.track(client.delete_judgment(&id)).await {
                Ok(()) => {
                    toast.success("Judgment deleted".to_string(), ToastOptions::new());
                    if let Some(rows) = fetch_judgments(store, toast).await {
                        judgments.set(Some(rows));
                    }
                }
                Err(e) => toast_error(toast, "delete judgment", &e),
            }
        });
    };

    let rows = judgments
        .read()
        .as_ref()
        .map(|list| filter_by_term(list, &term.read()));

    rsx! {
        AdminGuard { resource: RESOURCE.to_string(),
            div { class: "container",
                PageHeader {
                    PageTitle { "Judgments" }
                    PageActions {
                        if can_write {
                            Link { class: "button", to: Route::AdminJudgmentNew { lang: lang.clone() }, "New judgment" }
                        }
                    }
                }
                SearchBar {
                    Input {
                        value: term.read().clone(),
                        placeholder: "Filter by title or judge...",
                        on_input: move |evt: FormEvent| term.set(evt.value()),
                    }
                }

                match rows {
                    None => rsx! { SkeletonList { rows: 5 } },
                    Some(rows) => rsx! {
                        DataTable {
                            DataTableHeader {
                                DataTableColumn { "Date" }
                                DataTableColumn { "Title" }
                                DataTableColumn { "Judge" }
                                DataTableColumn { "" }
                            }
                            DataTableBody {
                                if rows.is_empty() {
                                    DataTableEmpty { colspan: 4, "No judgments match." }
                                }
                                for j in rows {
                                    DataTableRow { key: "{j.id}",
                                        DataTableCell { "{format_date_human(&j.judgment_date)}" }
                                        DataTableCell {
                                            Link { to: Route::AdminJudgmentEdit { lang: lang.clone(), id: j.id.clone() }, "{j.title}" }
                                        }
                                        DataTableCell { "{j.judge_name}" }
                                        DataTableCell {
                                            if can_write {
                                                Button {
                                                    variant: ButtonVariant::Destructive,
                                                    onclick: {
                                                        let id = j.id.clone();
                                                        move |_| deletion.write().request(&id)
                                                    },
                                                    "Delete"
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    },
                }

                ConfirmDialog {
                    open: deletion.read().is_open(),
                    title: "Delete judgment",
                    description: "This permanently removes the judgment text.",
                    confirm_label: "Delete",
                    on_confirm: confirm_delete,
                    on_cancel: move |_| { deletion.write().resolve(false); },
                }
            }
        }
    }
}

#[component]
pub fn AdminJudgmentNew(lang: String) -> Element {
    rsx! { JudgmentEditor { lang, id: None } }
}

#[component]
pub fn AdminJudgmentEdit(lang: String, id: String) -> Element {
    rsx! { JudgmentEditor { lang, id: Some(id) } }
}

/// The title is not edited here; the server derives it from the linked case.
#[component]
fn JudgmentEditor(lang: String, id: Option<String>) -> Element {
    let store = use_store();
    let toast = use_toast();
    let mut form = use_signal(JudgmentForm::default);
    let mut missing = use_signal(Vec::<&'static str>::new);
    let mut saving = use_signal(|| false);
    let can_write = store.profile.read().can_write(RESOURCE);
    let editing = id.is_some();

    let cases = use_resource(move || async move {
        let client = store.client();
        load(store, toast, "load cases", client.list_cases())
            .await
            .unwrap_or_default()
    });

    let load_id = id.clone();
    use_hook(move || {
        if let Some(id) = load_id {
            spawn(async move {
                let client = store.client();
                if let Some(j) = load(store, toast, "load judgment", client.get_judgment(&id)).await {
                    form.set(JudgmentForm::from_response(&j));
                }
            });
        }
    });

    let back = Route::AdminJudgments { lang: lang.clone() };
    let after_save = back.clone();

    let mut submit = move |_: ()| {
        let current = form.read().clone();
        if let Err(m) = current.to_create_request() {
            missing.set(m);
            return;
        }
        missing.set(Vec::new());
        let id = id.clone();
        let after_save = after_save.clone();
        saving.set(true);
        spawn(async move {
            let client = store.client();
            let result = match (&id, current.to_create_request()) {
                (Some(id), _) => {
                    store.track(client.update_judgment(id, &current.to_update_request())).await
                }
                (None, Ok(req)) => store.track(client.create_judgment(&req)).await,
                (None, Err(_)) => return,
            };
            saving.set(false);
            match result {
                Ok(j) => {
                    toast.success(format!("Saved {}", j.title), ToastOptions::new());
                    navigator().push(after_save);
                }
                Err(e) => toast_error(toast, "save judgment", &e),
            }
        });
    };

    let err = move |field: &str| field_error(&missing.read(), field);
    let case_list: Vec<CaseResponse> = cases.read().clone().unwrap_or_default();
    let selected_case = form.read().case_id.clone();

    rsx! {
        AdminGuard { resource: RESOURCE.to_string(),
            div { class: "container",
                PageHeader {
                    PageTitle { if editing { "Edit judgment" } else { "New judgment" } }
                    PageActions {
                        Link { class: "button", to: back, "Back to judgments" }
                    }
                }
                Card {
                    CardContent {
                        form { class: "editor-form",
                            onsubmit: move |evt: FormEvent| {
                                evt.prevent_default();
                                submit(());
                            },
                            FormSelect {
                                label: "Case",
                                value: selected_case.clone(),
                                onchange: move |e: Event<FormData>| form.write().case_id = e.value(),
                                option { value: "", "Select the decided case" }
                                for c in case_list {
                                    option {
                                        key: "{c.id}",
                                        value: "{c.id}",
                                        selected: c.id == selected_case,
                                        "{c.case_number} · {c.title}"
                                    }
                                }
                            }
                            if let Some(msg) = err("case_id") {
                                p { class: "field-error", "{msg}" }
                            }
                            div { class: "form-grid",
                                Input {
                                    label: "Judgment date", input_type: "date", required: true,
                                    value: form.read().judgment_date.clone(),
                                    error: err("judgment_date"),
                                    on_input: move |e: FormEvent| form.write().judgment_date = e.value(),
                                }
                                Input {
                                    label: "Judge", required: true,
                                    value: form.read().judge_name.clone(),
                                    error: err("judge_name"),
                                    on_input: move |e: FormEvent| form.write().judge_name = e.value(),
                                }
                            }
                            Textarea {
                                label: "Summary", rows: 3,
                                value: form.read().summary.clone(),
                                on_input: move |e: FormEvent| form.write().summary = e.value(),
                            }
                            Textarea {
                                label: "Full text", rows: 14,
                                value: form.read().content.clone(),
                                error: err("content"),
                                on_input: move |e: FormEvent| form.write().content = e.value(),
                            }
                            Input {
                                label: "Tags",
                                placeholder: "bail, article 21",
                                value: form.read().tags.clone(),
                                on_input: move |e: FormEvent| form.write().tags = e.value(),
                            }
                            Button {
                                variant: ButtonVariant::Primary,
                                button_type: "submit",
                                disabled: !can_write,
                                loading: saving(),
                                "Save judgment"
                            }
                        }
                    }
                }
            }
        }
    }
}
