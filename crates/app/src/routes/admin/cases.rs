use dioxus::prelude::*;
use shared_types::{
    case_status_label, filter_by_term, CaseForm, CaseResponse, CASE_STATUSES, CASE_TYPES,
};
use shared_ui::{
    use_toast, Button, ButtonVariant, Card, CardContent, ConfirmDialog, DataTable, DataTableBody,
    DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow, FormSelect,
    Input, PageActions, PageHeader, PageTitle, SearchBar, SkeletonList, Textarea, ToastOptions,
    Toasts, ValueOptions,
};

use super::{field_error, AdminGuard};
use crate::format_helpers::format_date_human;
use crate::routes::{load, toast_error, Route};
use crate::store::{use_store, PortalStore};
use crate::workflow::{DeleteFlow, StatusWorkflow};

const RESOURCE: &str = "cases";

async fn fetch_cases(store: PortalStore, toast: Toasts) -> Option<Vec<CaseResponse>> {
    let client = store.client();
    load(store, toast, "load cases", client.list_cases()).await
}

/// Case register with inline status changes and deletes.
#[component]
pub fn AdminCases(lang: String) -> Element {
    let store = use_store();
    let toast = use_toast();
    let mut workflow = use_signal(StatusWorkflow::<CaseResponse>::default);
    let mut deletion = use_signal(DeleteFlow::default);
    let mut loaded = use_signal(|| false);
    let mut term = use_signal(String::new);
    let mut status_filter = use_signal(String::new);
    let can_write = store.profile.read().can_write(RESOURCE);

    use_hook(move || {
        spawn(async move {
            if let Some(rows) = fetch_cases(store, toast).await {
                workflow.write().replace_rows(rows);
            }
            loaded.set(true);
        });
    });

    let confirm_status = move |_| {
        let Some(change) = workflow.write().confirm() else {
            return;
        };
        spawn(async move {
            let client = store.client();
            let result = store
                .track(client.update_case_status(&change.id, &change.new_status))
                .await;
            let succeeded = match result {
                Ok(case) => {
                    tracing::info!(case = %case.case_number, status = %case.status, "case status updated");
                    toast.success(
                        format!("{} is now {}", case.case_number, case_status_label(&case.status)),
                        ToastOptions::new(),
                    );
                    true
                }
                Err(e) => {
                    toast_error(toast, "update case status", &e);
                    false
                }
            };
            let refreshed = fetch_cases(store, toast).await;
            workflow.write().finish(succeeded, refreshed);
        });
    };

    let confirm_delete = move |_| {
        let Some(id) = deletion.write().resolve(true) else {
            return;
        };
        spawn(async move {
            let client = store.client();
            match store.track(client.delete_case(&id)).await {
                Ok(()) => {
                    toast.success("Case deleted".to_string(), ToastOptions::new());
                    if let Some(rows) = fetch_cases(store, toast).await {
                        workflow.write().replace_rows(rows);
                    }
                }
                Err(e) => toast_error(toast, "delete case", &e),
            }
        });
    };

    let wf = workflow.read();
    let filter = status_filter.read().clone();
    let rows: Vec<CaseResponse> = filter_by_term(wf.rows(), &term.read())
        .into_iter()
        .filter(|c| filter.is_empty() || c.status == filter)
        .collect();
    let busy = wf.is_busy();
    let pending = wf.pending().cloned();
    let pending_label = pending.as_ref().map(|p| {
        let number = wf
            .rows()
            .iter()
            .find(|c| c.id == p.id)
            .map(|c| c.case_number.clone())
            .unwrap_or_default();
        format!("Change {number} to \"{}\"?", case_status_label(&p.new_status))
    });
    drop(wf);

    rsx! {
        AdminGuard { resource: RESOURCE.to_string(),
            div { class: "container",
                PageHeader {
                    PageTitle { "Cases" }
                    PageActions {
                        if can_write {
                            Link { class: "button", to: Route::AdminCaseNew { lang: lang.clone() }, "New case" }
                        }
                    }
                }
                SearchBar {
                    Input {
                        value: term.read().clone(),
                        placeholder: "Filter by case number or title...",
                        on_input: move |evt: FormEvent| term.set(evt.value()),
                    }
                    FormSelect {
                        value: filter.clone(),
                        onchange: move |evt: Event<FormData>| status_filter.set(evt.value()),
                        option { value: "", "All statuses" }
                        ValueOptions { values: CASE_STATUSES.iter().map(|s| s.to_string()).collect::<Vec<_>>(), selected: filter.clone() }
                    }
                }

                if !loaded() {
                    SkeletonList { rows: 5 }
                } else {
                    DataTable {
                        DataTableHeader {
                            DataTableColumn { "Case No." }
                            DataTableColumn { "Title" }
                            DataTableColumn { "Court" }
                            DataTableColumn { "Filed" }
                            DataTableColumn { "Status" }
                            DataTableColumn { "" }
                        }
                        DataTableBody {
                            if rows.is_empty() {
                                DataTableEmpty { colspan: 6, "No cases match." }
                            }
                            for c in rows {
                                DataTableRow { key: "{c.id}",
                                    DataTableCell {
                                        Link { to: Route::AdminCaseEdit { lang: lang.clone(), id: c.id.clone() }, "{c.case_number}" }
                                    }
                                    DataTableCell { "{c.title}" }
                                    DataTableCell { "{c.court}" }
                                    DataTableCell { "{format_date_human(&c.filing_date)}" }
                                    DataTableCell {
                                        FormSelect {
                                            value: workflow.read().displayed_status(&c.id).unwrap_or_default(),
                                            disabled: !can_write || busy,
                                            onchange: {
                                                let id = c.id.clone();
                                                move |evt: Event<FormData>| {
                                                    workflow.write().request_change(&id, &evt.value());
                                                }
                                            },
                                            ValueOptions {
                                                values: CASE_STATUSES.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
                                                selected: workflow.read().displayed_status(&c.id).unwrap_or_default(),
                                            }
                                        }
                                    }
                                    DataTableCell {
                                        if can_write {
                                            Button {
                                                variant: ButtonVariant::Destructive,
                                                onclick: {
                                                    let id = c.id.clone();
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
                }

                ConfirmDialog {
                    open: pending.is_some(),
                    title: "Change case status",
                    description: pending_label.unwrap_or_default(),
                    confirm_label: "Change status",
                    on_confirm: confirm_status,
                    on_cancel: move |_| workflow.write().cancel(),
                }
                ConfirmDialog {
                    open: deletion.read().is_open(),
                    title: "Delete case",
                    description: "This permanently removes the case. Judgments keep their text but lose the link.",
                    confirm_label: "Delete",
                    on_confirm: confirm_delete,
                    on_cancel: move |_| { deletion.write().resolve(false); },
                }
            }
        }
    }
}

#[component]
pub fn AdminCaseNew(lang: String) -> Element {
    rsx! { CaseEditor { lang, id: None } }
}

#[component]
pub fn AdminCaseEdit(lang: String, id: String) -> Element {
    rsx! { CaseEditor { lang, id: Some(id) } }
}

/// Create or edit form; `id` selects edit mode.
#[component]
fn CaseEditor(lang: String, id: Option<String>) -> Element {
    let store = use_store();
    let toast = use_toast();
    let mut form = use_signal(|| CaseForm {
        status: "filed".to_string(),
        ..Default::default()
    });
    let mut missing = use_signal(Vec::<&'static str>::new);
    let mut saving = use_signal(|| false);
    let can_write = store.profile.read().can_write(RESOURCE);
    let editing = id.is_some();

    let load_id = id.clone();
    use_hook(move || {
        if let Some(id) = load_id {
            spawn(async move {
                let client = store.client();
                if let Some(case) = load(store, toast, "load case", client.get_case(&id)).await {
                    form.set(CaseForm::from_response(&case));
                }
            });
        }
    });

    let back = Route::AdminCases { lang: lang.clone() };
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
                (Some(id), _) => store.track(client.update_case(id, &current.to_update_request())).await,
                (None, Ok(req)) => store.track(client.create_case(&req)).await,
                (None, Err(_)) => return,
            };
            saving.set(false);
            match result {
                Ok(case) => {
                    toast.success(format!("Saved {}", case.case_number), ToastOptions::new());
                    navigator().push(after_save);
                }
                Err(e) => toast_error(toast, "save case", &e),
            }
        });
    };

    let err = move |field: &str| field_error(&missing.read(), field);

    rsx! {
        AdminGuard { resource: RESOURCE.to_string(),
            div { class: "container",
                PageHeader {
                    PageTitle { if editing { "Edit case" } else { "New case" } }
                    PageActions {
                        Link { class: "button", to: back, "Back to cases" }
                    }
                }
                Card {
                    CardContent {
                        form { class: "editor-form",
                            onsubmit: move |evt: FormEvent| {
                                evt.prevent_default();
                                submit(());
                            },
                            div { class: "form-grid",
                                Input {
                                    label: "Case number", required: true,
                                    value: form.read().case_number.clone(),
                                    error: err("case_number"),
                                    on_input: move |e: FormEvent| form.write().case_number = e.value(),
                                }
                                Input {
                                    label: "Filing date", input_type: "date", required: true,
                                    value: form.read().filing_date.clone(),
                                    error: err("filing_date"),
                                    on_input: move |e: FormEvent| form.write().filing_date = e.value(),
                                }
                            }
                            Input {
                                label: "Title", required: true,
                                value: form.read().title.clone(),
                                error: err("title"),
                                on_input: move |e: FormEvent| form.write().title = e.value(),
                            }
                            Textarea {
                                label: "Description",
                                value: form.read().description.clone(),
                                on_input: move |e: FormEvent| form.write().description = e.value(),
                            }
                            div { class: "form-grid",
                                FormSelect {
                                    label: "Case type",
                                    value: form.read().case_type.clone(),
                                    onchange: move |e: Event<FormData>| form.write().case_type = e.value(),
                                    option { value: "", "Select type" }
                                    ValueOptions {
                                        values: CASE_TYPES.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
                                        selected: form.read().case_type.clone(),
                                    }
                                }
                                FormSelect {
                                    label: "Status",
                                    value: form.read().status.clone(),
                                    onchange: move |e: Event<FormData>| form.write().status = e.value(),
                                    ValueOptions {
                                        values: CASE_STATUSES.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
                                        selected: form.read().status.clone(),
                                    }
                                }
                            }
                            if let Some(msg) = err("case_type") {
                                p { class: "field-error", "{msg}" }
                            }
                            Input {
                                label: "Court", required: true,
                                value: form.read().court.clone(),
                                error: err("court"),
                                on_input: move |e: FormEvent| form.write().court = e.value(),
                            }
                            div { class: "form-grid",
                                Input {
                                    label: "Petitioner", required: true,
                                    value: form.read().petitioner.clone(),
                                    error: err("petitioner"),
                                    on_input: move |e: FormEvent| form.write().petitioner = e.value(),
                                }
                                Input {
                                    label: "Respondent", required: true,
                                    value: form.read().respondent.clone(),
                                    error: err("respondent"),
                                    on_input: move |e: FormEvent| form.write().respondent = e.value(),
                                }
                                Input {
                                    label: "Petitioner advocate",
                                    value: form.read().petitioner_advocate.clone(),
                                    on_input: move |e: FormEvent| form.write().petitioner_advocate = e.value(),
                                }
                                Input {
                                    label: "Respondent advocate",
                                    value: form.read().respondent_advocate.clone(),
                                    on_input: move |e: FormEvent| form.write().respondent_advocate = e.value(),
                                }
                            }
                            Input {
                                label: "Next hearing", input_type: "date",
                                value: form.read().next_hearing_date.clone(),
                                on_input: move |e: FormEvent| form.write().next_hearing_date = e.value(),
                            }
                            Button {
                                variant: ButtonVariant::Primary,
                                button_type: "submit",
                                disabled: !can_write,
                                loading: saving(),
                                "Save case"
                            }
                        }
                    }
                }
            }
        }
    }
}
