use dioxus::prelude::*;
use shared_types::{filter_by_term, JudgeForm, JudgeResponse};
use shared_ui::{
    use_toast, Badge, BadgeVariant, Button, ButtonVariant, Card, CardContent, ConfirmDialog,
    DataTable, DataTableBody, DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader,
    DataTableRow, Input, PageActions, PageHeader, PageTitle, SearchBar, SkeletonList, Textarea,
    ToastOptions, Toasts,
};

use super::{field_error, AdminGuard};
use crate::routes::{load, toast_error, Route};
use crate::store::{use_store, PortalStore};
use crate::workflow::DeleteFlow;

const RESOURCE: &str = "judges";

async fn fetch_judges(store: PortalStore, toast: Toasts) -> Option<Vec<JudgeResponse>> {
    let client = store.client();
    load(store, toast, "load judges", client.list_judges(false)).await
}

#[component]
pub fn AdminJudges(lang: String) -> Element {
    let store = use_store();
    let toast = use_toast();
    let mut judges = use_signal(|| None::<Vec<JudgeResponse>>);
    let mut deletion = use_signal(DeleteFlow::default);
    let mut term = use_signal(String::new);
    let can_write = store.profile.read().can_write(RESOURCE);

    use_hook(move || {
        spawn(async move {
            judges.set(Some(fetch_judges(store, toast).await.unwrap_or_default()));
        });
    });

    let confirm_delete = move |_| {
        let Some(id) = deletion.write().resolve(true) else {
            return;
        };
        spawn(async move {
            let client = store.client();
            match store.track(client.delete_judge(&id)).await {
                Ok(()) => {
                    toast.success("Judge removed".to_string(), ToastOptions::new());
                    if let Some(rows) = fetch_judges(store, toast).await {
                        judges.set(Some(rows));
                    }
                }
                Err(e) => toast_error(toast, "delete judge", &e),
            }
        });
    };

    let rows = judges
        .read()
        .as_ref()
        .map(|list| filter_by_term(list, &term.read()));

    rsx! {
        AdminGuard { resource: RESOURCE.to_string(),
            div { class: "container",
                PageHeader {
                    PageTitle { "Judges" }
                    PageActions {
                        if can_write {
                            Link { class: "button", to: Route::AdminJudgeNew { lang: lang.clone() }, "New judge" }
                        }
                    }
                }
                SearchBar {
                    Input {
                        value: term.read().clone(),
                        placeholder: "Filter by name or court...",
                        on_input: move |evt: FormEvent| term.set(evt.value()),
                    }
                }

                match rows {
                    None => rsx! { SkeletonList { rows: 5 } },
                    Some(rows) => rsx! {
                        DataTable {
                            DataTableHeader {
                                DataTableColumn { "Name" }
                                DataTableColumn { "Designation" }
                                DataTableColumn { "Court" }
                                DataTableColumn { "Status" }
                                DataTableColumn { "" }
                            }
                            DataTableBody {
                                if rows.is_empty() {
                                    DataTableEmpty { colspan: 5, "No judges match." }
                                }
                                for j in rows {
                                    DataTableRow { key: "{j.id}",
                                        DataTableCell {
                                            Link { to: Route::AdminJudgeEdit { lang: lang.clone(), id: j.id.clone() }, "{j.name}" }
                                        }
                                        DataTableCell { "{j.designation}" }
                                        DataTableCell { "{j.court}" }
                                        DataTableCell {
                                            if j.is_active {
                                                Badge { variant: BadgeVariant::Success, "Active" }
                                            } else {
                                                Badge { variant: BadgeVariant::Outline, "Inactive" }
                                            }
                                        }
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
                    title: "Delete judge",
                    description: "This permanently removes the judge profile.",
                    confirm_label: "Delete",
                    on_confirm: confirm_delete,
                    on_cancel: move |_| { deletion.write().resolve(false); },
                }
            }
        }
    }
}

#[component]
pub fn AdminJudgeNew(lang: String) -> Element {
    rsx! { JudgeEditor { lang, id: None } }
}

#[component]
pub fn AdminJudgeEdit(lang: String, id: String) -> Element {
    rsx! { JudgeEditor { lang, id: Some(id) } }
}

#[component]
fn JudgeEditor(lang: String, id: Option<String>) -> Element {
    let store = use_store();
    let toast = use_toast();
    let mut form = use_signal(|| JudgeForm {
        is_active: true,
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
                if let Some(j) = load(store, toast, "load judge", client.get_judge(&id)).await {
                    form.set(JudgeForm::from_response(&j));
                }
            });
        }
    });

    let back = Route::AdminJudges { lang: lang.clone() };
    let after_save = back.clone();

    let mut submit = move |_: ()| {
        let current = form.read().clone();
        let m = current.missing_fields();
        if !m.is_empty() {
            missing.set(m);
            return;
        }
        missing.set(Vec::new());
        let id = id.clone();
        let after_save = after_save.clone();
        saving.set(true);
        spawn(async move {
            let client = store.client();
            let result = match &id {
                Some(id) => store.track(client.update_judge(id, &current.to_update_request())).await,
                None => store.track(client.create_judge(&current.to_create_request())).await,
            };
            saving.set(false);
            match result {
                Ok(j) => {
                    toast.success(format!("Saved {}", j.name), ToastOptions::new());
                    navigator().push(after_save);
                }
                Err(e) => toast_error(toast, "save judge", &e),
            }
        });
    };

    let err = move |field: &str| field_error(&missing.read(), field);

    rsx! {
        AdminGuard { resource: RESOURCE.to_string(),
            div { class: "container",
                PageHeader {
                    PageTitle { if editing { "Edit judge" } else { "New judge" } }
                    PageActions {
                        Link { class: "button", to: back, "Back to judges" }
                    }
                }
                Card {
                    CardContent {
                        form { class: "editor-form",
                            onsubmit: move |evt: FormEvent| {
                                evt.prevent_default();
                                submit(());
                            },
                            Input {
                                label: "Name", required: true,
                                value: form.read().name.clone(),
                                error: err("name"),
                                on_input: move |e: FormEvent| form.write().name = e.value(),
                            }
                            div { class: "form-grid",
                                Input {
                                    label: "Designation", required: true,
                                    placeholder: "Chief Justice",
                                    value: form.read().designation.clone(),
                                    error: err("designation"),
                                    on_input: move |e: FormEvent| form.write().designation = e.value(),
                                }
                                Input {
                                    label: "Court", required: true,
                                    value: form.read().court.clone(),
                                    error: err("court"),
                                    on_input: move |e: FormEvent| form.write().court = e.value(),
                                }
                                Input {
                                    label: "Appointed", input_type: "date",
                                    value: form.read().appointment_date.clone(),
                                    on_input: move |e: FormEvent| form.write().appointment_date = e.value(),
                                }
                                Input {
                                    label: "Retired", input_type: "date",
                                    value: form.read().retirement_date.clone(),
                                    on_input: move |e: FormEvent| form.write().retirement_date = e.value(),
                                }
                            }
                            Input {
                                label: "Specialization",
                                placeholder: "constitutional, tax",
                                value: form.read().specialization.clone(),
                                on_input: move |e: FormEvent| form.write().specialization = e.value(),
                            }
                            Input {
                                label: "Photo URL", input_type: "url",
                                value: form.read().photo_url.clone(),
                                on_input: move |e: FormEvent| form.write().photo_url = e.value(),
                            }
                            Textarea {
                                label: "Biography", rows: 6,
                                value: form.read().biography.clone(),
                                on_input: move |e: FormEvent| form.write().biography = e.value(),
                            }
                            label { class: "checkbox-field",
                                input {
                                    r#type: "checkbox",
                                    checked: form.read().is_active,
                                    onchange: move |e: FormEvent| form.write().is_active = e.checked(),
                                }
                                "Currently sitting"
                            }
                            Button {
                                variant: ButtonVariant::Primary,
                                button_type: "submit",
                                disabled: !can_write,
                                loading: saving(),
                                "Save judge"
                            }
                        }
                    }
                }
            }
        }
    }
}
