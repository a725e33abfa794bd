use dioxus::prelude::*;
use shared_types::{
    article_status_label, filter_by_term, slugify, ArticleForm, ArticleResponse, ARTICLE_STATUSES,
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

const RESOURCE: &str = "articles";

fn statuses() -> Vec<String> {
    ARTICLE_STATUSES.iter().map(|s| s.to_string()).collect()
}

async fn fetch_articles(store: PortalStore, toast: Toasts) -> Option<Vec<ArticleResponse>> {
    let client = store.client();
    load(store, toast, "load articles", client.list_articles(None)).await
}

/// Editorial queue: every article regardless of status, with inline
/// publish/reject.
#[component]
pub fn AdminArticles(lang: String) -> Element {
    let store = use_store();
    let toast = use_toast();
    let mut workflow = use_signal(StatusWorkflow::<ArticleResponse>::default);
    let mut deletion = use_signal(DeleteFlow::default);
    let mut loaded = use_signal(|| false);
    let mut term = use_signal(String::new);
    let mut status_filter = use_signal(String::new);
    let can_write = store.profile.read().can_write(RESOURCE);

    use_hook(move || {
        spawn(async move {
            if let Some(rows) = fetch_articles(store, toast).await {
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
                .track(client.update_article_status(&change.id, &change.new_status))
                .await;
            let succeeded = match result {
                Ok(article) => {
                    tracing::info!(slug = %article.slug, status = %article.status, "article status updated");
                    toast.success(
                        format!("\"{}\" is now {}", article.title, article_status_label(&article.status)),
                        ToastOptions::new(),
                    );
                    true
                }
                Err(e) => {
                    toast_error(toast, "update article status", &e);
                    false
                }
            };
            let refreshed = fetch_articles(store, toast).await;
            workflow.write().finish(succeeded, refreshed);
        });
    };

    let confirm_delete = move |_| {
        let Some(id) = deletion.write().resolve(true) else {
            return;
        };
        spawn(async move {
            let client = store.client();
            match store.track(client.delete_article(&id)).await {
                Ok(()) => {
                    toast.success("Article deleted".to_string(), ToastOptions::new());
                    if let Some(rows) = fetch_articles(store, toast).await {
                        workflow.write().replace_rows(rows);
                    }
                }
                Err(e) => toast_error(toast, "delete article", &e),
            }
        });
    };

    let wf = workflow.read();
    let filter = status_filter.read().clone();
    let rows: Vec<ArticleResponse> = filter_by_term(wf.rows(), &term.read())
        .into_iter()
        .filter(|a| filter.is_empty() || a.status == filter)
        .collect();
    let busy = wf.is_busy();
    let pending = wf.pending().cloned();
    let pending_label = pending.as_ref().map(|p| {
        let title = wf
            .rows()
            .iter()
            .find(|a| a.id == p.id)
            .map(|a| a.title.clone())
            .unwrap_or_default();
        format!("Mark \"{title}\" as {}?", article_status_label(&p.new_status))
    });
    drop(wf);

    rsx! {
        AdminGuard { resource: RESOURCE.to_string(),
            div { class: "container",
                PageHeader {
                    PageTitle { "Articles" }
                    PageActions {
                        if can_write {
                            Link { class: "button", to: Route::AdminArticleNew { lang: lang.clone() }, "New article" }
                        }
                    }
                }
                SearchBar {
                    Input {
                        value: term.read().clone(),
                        placeholder: "Filter by title or slug...",
                        on_input: move |evt: FormEvent| term.set(evt.value()),
                    }
                    FormSelect {
                        value: filter.clone(),
                        onchange: move |evt: Event<FormData>| status_filter.set(evt.value()),
                        option { value: "", "All statuses" }
                        ValueOptions { values: statuses(), selected: filter.clone() }
                    }
                }

                if !loaded() {
                    SkeletonList { rows: 5 }
                } else {
                    DataTable {
                        DataTableHeader {
                            DataTableColumn { "Title" }
                            DataTableColumn { "Slug" }
                            DataTableColumn { "Updated" }
                            DataTableColumn { "Status" }
                            DataTableColumn { "" }
                        }
                        DataTableBody {
                            if rows.is_empty() {
                                DataTableEmpty { colspan: 5, "No articles match." }
                            }
                            for a in rows {
                                DataTableRow { key: "{a.id}",
                                    DataTableCell {
                                        Link { to: Route::AdminArticleEdit { lang: lang.clone(), id: a.id.clone() }, "{a.title}" }
                                    }
                                    DataTableCell { code { "{a.slug}" } }
                                    DataTableCell { "{format_date_human(&a.updated_at)}" }
                                    DataTableCell {
                                        FormSelect {
                                            value: workflow.read().displayed_status(&a.id).unwrap_or_default(),
                                            disabled: !can_write || busy,
                                            onchange: {
                                                let id = a.id.clone();
                                                move |evt: Event<FormData>| {
                                                    workflow.write().request_change(&id, &evt.value());
                                                }
                                            },
                                            ValueOptions {
                                                values: statuses(),
                                                selected: workflow.read().displayed_status(&a.id).unwrap_or_default(),
                                            }
                                        }
                                    }
                                    DataTableCell {
                                        if can_write {
                                            Button {
                                                variant: ButtonVariant::Destructive,
                                                onclick: {
                                                    let id = a.id.clone();
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
                    title: "Change article status",
                    description: pending_label.unwrap_or_default(),
                    confirm_label: "Change status",
                    on_confirm: confirm_status,
                    on_cancel: move |_| workflow.write().cancel(),
                }
                ConfirmDialog {
                    open: deletion.read().is_open(),
                    title: "Delete article",
                    description: "This permanently removes the article and its public page.",
                    confirm_label: "Delete",
                    on_confirm: confirm_delete,
                    on_cancel: move |_| { deletion.write().resolve(false); },
                }
            }
        }
    }
}

#[component]
pub fn AdminArticleNew(lang: String) -> Element {
    rsx! { ArticleEditor { lang, id: None } }
}

#[component]
pub fn AdminArticleEdit(lang: String, id: String) -> Element {
    rsx! { ArticleEditor { lang, id: Some(id) } }
}

#[component]
fn ArticleEditor(lang: String, id: Option<String>) -> Element {
    let store = use_store();
    let toast = use_toast();
    let mut form = use_signal(|| ArticleForm {
        status: "draft".to_string(),
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
                if let Some(a) = load(store, toast, "load article", client.get_article(&id)).await {
                    form.set(ArticleForm::from_response(&a));
                }
            });
        }
    });

    let back = Route::AdminArticles { lang: lang.clone() };
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
        let author = store.profile.peek().id.clone();
        saving.set(true);
        spawn(async move {
            let client = store.client();
            let result = match &id {
                Some(id) => store.track(client.update_article(id, &current.to_update_request())).await,
                None => {
                    let author = (!author.is_empty()).then_some(author);
                    store.track(client.create_article(&current.to_create_request(author))).await
                }
            };
            saving.set(false);
            match result {
                Ok(a) => {
                    toast.success(format!("Saved \"{}\"", a.title), ToastOptions::new());
                    navigator().push(after_save);
                }
                Err(e) => toast_error(toast, "save article", &e),
            }
        });
    };

    let err = move |field: &str| field_error(&missing.read(), field);
    let slug_hint = {
        let f = form.read();
        if f.slug.trim().is_empty() {
            format!("Leave blank to use \"{}\"", slugify(&f.title))
        } else {
            String::new()
        }
    };

    rsx! {
        AdminGuard { resource: RESOURCE.to_string(),
            div { class: "container",
                PageHeader {
                    PageTitle { if editing { "Edit article" } else { "New article" } }
                    PageActions {
                        Link { class: "button", to: back, "Back to articles" }
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
                                label: "Title", required: true,
                                value: form.read().title.clone(),
                                error: err("title"),
                                on_input: move |e: FormEvent| form.write().title = e.value(),
                            }
                            Input {
                                label: "Slug",
                                value: form.read().slug.clone(),
                                placeholder: slug_hint,
                                on_input: move |e: FormEvent| form.write().slug = e.value(),
                            }
                            Textarea {
                                label: "Content", rows: 12,
                                value: form.read().content.clone(),
                                error: err("content"),
                                on_input: move |e: FormEvent| form.write().content = e.value(),
                            }
                            div { class: "form-grid",
                                Input {
                                    label: "Tags",
                                    placeholder: "tax, supreme court",
                                    value: form.read().tags.clone(),
                                    on_input: move |e: FormEvent| form.write().tags = e.value(),
                                }
                                FormSelect {
                                    label: "Status",
                                    value: form.read().status.clone(),
                                    onchange: move |e: Event<FormData>| form.write().status = e.value(),
                                    ValueOptions { values: statuses(), selected: form.read().status.clone() }
                                }
                            }
                            Input {
                                label: "Thumbnail URL",
                                input_type: "url",
                                value: form.read().thumbnail.clone(),
                                on_input: move |e: FormEvent| form.write().thumbnail = e.value(),
                            }
                            Button {
                                variant: ButtonVariant::Primary,
                                button_type: "submit",
                                disabled: !can_write,
                                loading: saving(),
                                "Save article"
                            }
                        }
                    }
                }
            }
        }
    }
}
