use dioxus::prelude::*;
use shared_types::{
    is_valid_permission, CreateRoleRequest, RoleResponse, UpdateRoleRequest, RESOURCES, WILDCARD,
};
use shared_ui::{
    use_toast, Badge, BadgeVariant, Button, ButtonVariant, Card, CardContent, CardHeader,
    CardTitle, ConfirmDialog, DataTable, DataTableBody, DataTableCell, DataTableColumn,
    DataTableEmpty, DataTableHeader, DataTableRow, Input, PageActions, PageHeader, PageTitle,
    SkeletonList, ToastOptions, Toasts,
};

use super::AdminGuard;
use crate::format_helpers::format_snake_case_title;
use crate::routes::{load, toast_error};
use crate::store::{use_store, PortalStore};
use crate::workflow::DeleteFlow;

const RESOURCE: &str = "permissions";
const ACTIONS: &[&str] = &["read", "write"];

/// Role being created (`id == None`) or edited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleDraft {
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub permissions: Vec<String>,
}

impl RoleDraft {
    pub fn from_role(role: &RoleResponse) -> Self {
        Self {
            id: Some(role.id.clone()),
            name: role.name.clone(),
            description: role.description.clone().unwrap_or_default(),
            permissions: role.permissions.clone(),
        }
    }

    pub fn has(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }

    /// Grant or revoke one permission string, keeping the list sorted and
    /// free of duplicates.
    pub fn toggle(&mut self, permission: &str, on: bool) {
        self.permissions.retain(|p| p != permission);
        if on && is_valid_permission(permission) {
            self.permissions.push(permission.to_string());
        }
        self.permissions.sort();
    }

    fn description(&self) -> Option<String> {
        let d = self.description.trim();
        (!d.is_empty()).then(|| d.to_string())
    }

    pub fn to_create_request(&self) -> CreateRoleRequest {
        CreateRoleRequest {
            name: self.name.trim().to_string(),
            description: self.description(),
            permissions: self.permissions.clone(),
        }
    }

    pub fn to_update_request(&self) -> UpdateRoleRequest {
        UpdateRoleRequest {
            name: Some(self.name.trim().to_string()),
            description: self.description(),
            permissions: Some(self.permissions.clone()),
        }
    }
}

async fn fetch_roles(store: PortalStore, toast: Toasts) -> Option<Vec<RoleResponse>> {
    let client = store.client();
    load(store, toast, "load roles", client.list_roles()).await
}

/// Roles and their permission grids.
#[component]
pub fn AdminPermissions(lang: String) -> Element {
    let _ = lang;
    let store = use_store();
    let toast = use_toast();
    let mut roles = use_signal(|| None::<Vec<RoleResponse>>);
    let mut draft = use_signal(|| None::<RoleDraft>);
    let mut deletion = use_signal(DeleteFlow::default);
    let mut saving = use_signal(|| false);
    let can_write = store.profile.read().can_write(RESOURCE);

    use_hook(move || {
        spawn(async move {
            roles.set(Some(fetch_roles(store, toast).await.unwrap_or_default()));
        });
    });

    let save = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(current) = draft.read().clone() else {
            return;
        };
        if current.name.trim().is_empty() {
            toast.error("A role needs a name.".to_string(), ToastOptions::new());
            return;
        }
        saving.set(true);
        spawn(async move {
            let client = store.client();
            let result = match &current.id {
                Some(id) => store.track(client.update_role(id, &current.to_update_request())).await,
                None => store.track(client.create_role(&current.to_create_request())).await,
            };
            saving.set(false);
            match result {
                Ok(role) => {
                    tracing::info!(role = %role.name, "role saved");
                    toast.success(format!("Saved role {}", role.name), ToastOptions::new());
                    draft.set(None);
                    if let Some(rows) = fetch_roles(store, toast).await {
                        roles.set(Some(rows));
                    }
                    // The acting role may have changed.
                    store.refresh_profile().await;
                }
                Err(e) => toast_error(toast, "save role", &e),
            }
        });
    };

    let confirm_delete = move |_| {
        let Some(id) = deletion.write().resolve(true) else {
            return;
        };
        spawn(async move {
            let client = store.client();
            match store.track(client.delete_role(&id)).await {
                Ok(()) => {
                    toast.success("Role deleted".to_string(), ToastOptions::new());
                    if let Some(rows) = fetch_roles(store, toast).await {
                        roles.set(Some(rows));
                    }
                }
                Err(e) => toast_error(toast, "delete role", &e),
            }
        });
    };

    let rows = roles.read().clone();
    let editing = draft.read().clone();

    rsx! {
        AdminGuard { resource: RESOURCE.to_string(),
            div { class: "container",
                PageHeader {
                    PageTitle { "Permissions" }
                    PageActions {
                        if can_write {
                            Button {
                                onclick: move |_| draft.set(Some(RoleDraft::default())),
                                "New role"
                            }
                        }
                    }
                }

                match rows {
                    None => rsx! { SkeletonList { rows: 4 } },
                    Some(rows) => rsx! {
                        DataTable {
                            DataTableHeader {
                                DataTableColumn { "Role" }
                                DataTableColumn { "Description" }
                                DataTableColumn { "Permissions" }
                                DataTableColumn { "" }
                            }
                            DataTableBody {
                                if rows.is_empty() {
                                    DataTableEmpty { colspan: 4, "No roles defined." }
                                }
                                for r in rows {
                                    DataTableRow { key: "{r.id}",
                                        DataTableCell { strong { "{r.name}" } }
                                        DataTableCell { "{r.description.clone().unwrap_or_default()}" }
                                        DataTableCell {
                                            if r.permissions.is_empty() {
                                                span { class: "muted", "none" }
                                            }
                                            for p in r.permissions.iter() {
                                                Badge { key: "{p}", variant: BadgeVariant::Outline, "{p}" }
                                            }
                                        }
                                        DataTableCell {
                                            if can_write {
                                                Button {
                                                    variant: ButtonVariant::Secondary,
                                                    onclick: {
                                                        let d = RoleDraft::from_role(&r);
                                                        move |_| draft.set(Some(d.clone()))
                                                    },
                                                    "Edit"
                                                }
                                                Button {
                                                    variant: ButtonVariant::Destructive,
                                                    onclick: {
                                                        let id = r.id.clone();
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

                if let Some(d) = editing {
                    Card { class: "role-editor",
                        CardHeader {
                            CardTitle { if d.id.is_some() { "Edit role" } else { "New role" } }
                        }
                        CardContent {
                            form { class: "editor-form", onsubmit: save,
                                div { class: "form-grid",
                                    Input {
                                        label: "Name", required: true,
                                        value: d.name.clone(),
                                        on_input: move |e: FormEvent| {
                                            if let Some(d) = draft.write().as_mut() {
                                                d.name = e.value();
                                            }
                                        },
                                    }
                                    Input {
                                        label: "Description",
                                        value: d.description.clone(),
                                        on_input: move |e: FormEvent| {
                                            if let Some(d) = draft.write().as_mut() {
                                                d.description = e.value();
                                            }
                                        },
                                    }
                                }
                                label { class: "checkbox-field",
                                    input {
                                        r#type: "checkbox",
                                        checked: d.has(WILDCARD),
                                        onchange: move |e: FormEvent| {
                                            if let Some(d) = draft.write().as_mut() {
                                                d.toggle(WILDCARD, e.checked());
                                            }
                                        },
                                    }
                                    "Full access (*)"
                                }
                                table { class: "permission-grid",
                                    thead {
                                        tr {
                                            th { "Section" }
                                            for action in ACTIONS.iter() {
                                                th { key: "{action}", "{action}" }
                                            }
                                        }
                                    }
                                    tbody {
                                        for resource in RESOURCES.iter() {
                                            tr { key: "{resource}",
                                                td { "{format_snake_case_title(resource)}" }
                                                for action in ACTIONS.iter() {
                                                    td { key: "{action}",
                                                        input {
                                                            r#type: "checkbox",
                                                            checked: d.has(&format!("{resource}:{action}")),
                                                            onchange: move |e: FormEvent| {
                                                                if let Some(d) = draft.write().as_mut() {
                                                                    d.toggle(&format!("{resource}:{action}"), e.checked());
                                                                }
                                                            },
                                                        }
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                                div { class: "form-actions",
                                    Button {
                                        variant: ButtonVariant::Primary,
                                        button_type: "submit",
                                        loading: saving(),
                                        "Save role"
                                    }
                                    Button {
                                        variant: ButtonVariant::Ghost,
                                        onclick: move |_| draft.set(None),
                                        "Cancel"
                                    }
                                }
                            }
                        }
                    }
                }

                ConfirmDialog {
                    open: deletion.read().is_open(),
                    title: "Delete role",
                    description: "Anyone acting as this role loses its permissions.",
                    confirm_label: "Delete",
                    on_confirm: confirm_delete,
                    on_cancel: move |_| { deletion.write().resolve(false); },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn toggle_keeps_list_sorted_and_unique() {
        let mut d = RoleDraft::default();
        d.toggle("judges:write", true);
        d.toggle("cases:read", true);
        d.toggle("cases:read", true);
        assert_eq!(d.permissions, vec!["cases:read".to_string(), "judges:write".to_string()]);

        d.toggle("judges:write", false);
        assert_eq!(d.permissions, vec!["cases:read".to_string()]);
    }

    #[test]
    fn toggle_ignores_malformed_permissions() {
        let mut d = RoleDraft::default();
        d.toggle("billing:write", true);
        d.toggle("cases:delete", true);
        assert!(d.permissions.is_empty());
        d.toggle(WILDCARD, true);
        assert!(d.has("*"));
    }

    #[test]
    fn requests_trim_and_drop_blank_description() {
        let d = RoleDraft {
            id: Some("r1".into()),
            name: " clerk ".into(),
            description: "  ".into(),
            permissions: vec!["cases:write".into()],
        };
        let create = d.to_create_request();
        assert_eq!(create.name, "clerk");
        assert_eq!(create.description, None);
        let update = d.to_update_request();
        assert_eq!(update.permissions, Some(vec!["cases:write".to_string()]));
    }
}
