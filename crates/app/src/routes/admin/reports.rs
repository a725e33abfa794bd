use dioxus::prelude::*;
use shared_types::{
    parse_date, report_type_label, GenerateReportRequest, ReportResponse, REPORT_TYPES,
};
use shared_ui::{
    use_toast, Badge, BadgeVariant, Button, ButtonVariant, Card, CardContent, CardHeader,
    CardTitle, ConfirmDialog, DataTable, DataTableBody, DataTableCell, DataTableColumn,
    DataTableEmpty, DataTableHeader, DataTableRow, FormSelect, Input, PageHeader, PageTitle,
    SkeletonList, ToastOptions, Toasts,
};

use super::AdminGuard;
use crate::format_helpers::{format_date_human, today_iso};
use crate::routes::{load, toast_error};
use crate::store::{use_store, PortalStore};
use crate::workflow::DeleteFlow;

const RESOURCE: &str = "reports";

async fn fetch_reports(store: PortalStore, toast: Toasts) -> Option<Vec<ReportResponse>> {
    let client = store.client();
    load(store, toast, "load reports", client.list_reports()).await
}

/// Build a generate request from the form, or say what is wrong with it.
pub fn build_report_request(
    report_type: &str,
    start: &str,
    end: &str,
    generated_by: &str,
) -> Result<GenerateReportRequest, String> {
    if !REPORT_TYPES.contains(&report_type) {
        return Err("Choose a report type.".to_string());
    }
    let (Some(start_date), Some(end_date)) = (parse_date(start), parse_date(end)) else {
        return Err("Enter both a start and an end date.".to_string());
    };
    if end_date < start_date {
        return Err("The end date must not be before the start date.".to_string());
    }
    let generated_by = generated_by.trim();
    Ok(GenerateReportRequest {
        report_type: report_type.to_string(),
        start_date,
        end_date,
        generated_by: (!generated_by.is_empty()).then(|| generated_by.to_string()),
    })
}

/// "filed 3 · hearing 1"
pub fn summary_line(report: &ReportResponse) -> String {
    report
        .summary
        .by_status
        .iter()
        .map(|(k, v)| format!("{k} {v}"))
        .collect::<Vec<_>>()
        .join(" · ")
}

#[component]
pub fn AdminReports(lang: String) -> Element {
    let _ = lang;
    let store = use_store();
    let toast = use_toast();
    let mut reports = use_signal(|| None::<Vec<ReportResponse>>);
    let mut deletion = use_signal(DeleteFlow::default);
    let mut report_type = use_signal(|| REPORT_TYPES[0].to_string());
    let mut start = use_signal(String::new);
    let mut end = use_signal(today_iso);
    let mut form_error = use_signal(|| None::<String>);
    let mut generating = use_signal(|| false);
    let can_write = store.profile.read().can_write(RESOURCE);

    use_hook(move || {
        spawn(async move {
            reports.set(Some(fetch_reports(store, toast).await.unwrap_or_default()));
        });
    });

    let generate = move |evt: FormEvent| {
        evt.prevent_default();
        let by = store.profile.peek().display_name.clone();
        let req = match build_report_request(&report_type.read(), &start.read(), &end.read(), &by) {
            Ok(req) => req,
            Err(msg) => {
                form_error.set(Some(msg));
                return;
            }
        };
        form_error.set(None);
        generating.set(true);
        spawn(async move {
            let client = store.client();
            match store.track(client.generate_report(&req)).await {
                Ok(r) => {
                    tracing::info!(report = %r.id, kind = %r.report_type, "report generated");
                    toast.success(
                        format!("{} generated", report_type_label(&r.report_type)),
                        ToastOptions::new(),
                    );
                    if let Some(rows) = fetch_reports(store, toast).await {
                        reports.set(Some(rows));
                    }
                }
                Err(e) => toast_error(toast, "generate report", &e),
            }
            generating.set(false);
        });
    };

    let confirm_delete = move |_| {
        let Some(id) = deletion.write().resolve(true) else {
            return;
        };
        spawn(async move {
            let client = store.client();
            match store.track(client.delete_report(&id)).await {
                Ok(()) => {
                    toast.success("Report deleted".to_string(), ToastOptions::new());
                    if let Some(rows) = fetch_reports(store, toast).await {
                        reports.set(Some(rows));
                    }
                }
                Err(e) => toast_error(toast, "delete report", &e),
            }
        });
    };

    let rows = reports.read().clone();

    rsx! {
        AdminGuard { resource: RESOURCE.to_string(),
            div { class: "container",
                PageHeader {
                    PageTitle { "Reports" }
                }

                if can_write {
                    Card {
                        CardHeader { CardTitle { "Generate a report" } }
                        CardContent {
                            form { class: "editor-form", onsubmit: generate,
                                div { class: "form-grid",
                                    FormSelect {
                                        label: "Type",
                                        value: report_type.read().clone(),
                                        onchange: move |e: Event<FormData>| report_type.set(e.value()),
                                        for t in REPORT_TYPES.iter() {
                                            option { key: "{t}", value: "{t}", selected: *t == report_type.read().as_str(), "{report_type_label(t)}" }
                                        }
                                    }
                                    Input {
                                        label: "From", input_type: "date",
                                        value: start.read().clone(),
                                        on_input: move |e: FormEvent| start.set(e.value()),
                                    }
                                    Input {
                                        label: "To", input_type: "date",
                                        value: end.read().clone(),
                                        on_input: move |e: FormEvent| end.set(e.value()),
                                    }
                                }
                                if let Some(msg) = form_error.read().as_ref() {
                                    p { class: "field-error", "{msg}" }
                                }
                                Button {
                                    variant: ButtonVariant::Primary,
                                    button_type: "submit",
                                    loading: generating(),
                                    "Generate"
                                }
                            }
                        }
                    }
                }

                match rows {
                    None => rsx! { SkeletonList { rows: 4 } },
                    Some(rows) => rsx! {
                        DataTable {
                            DataTableHeader {
                                DataTableColumn { "Type" }
                                DataTableColumn { "Period" }
                                DataTableColumn { "Generated" }
                                DataTableColumn { "Total" }
                                DataTableColumn { "Breakdown" }
                                DataTableColumn { "" }
                            }
                            DataTableBody {
                                if rows.is_empty() {
                                    DataTableEmpty { colspan: 6, "No reports generated yet." }
                                }
                                for r in rows {
                                    DataTableRow { key: "{r.id}",
                                        DataTableCell {
                                            Badge { variant: BadgeVariant::Secondary, "{report_type_label(&r.report_type)}" }
                                        }
                                        DataTableCell { "{format_date_human(&r.start_date)} – {format_date_human(&r.end_date)}" }
                                        DataTableCell { "{format_date_human(&r.generated_at)} by {r.generated_by}" }
                                        DataTableCell { "{r.summary.total}" }
                                        DataTableCell { "{summary_line(&r)}" }
                                        DataTableCell {
                                            if can_write {
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

                ConfirmDialog {
                    open: deletion.read().is_open(),
                    title: "Delete report",
                    description: "The stored summary will be discarded.",
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
    use chrono::NaiveDate;

    #[test]
    fn request_requires_valid_range() {
        assert!(build_report_request("nonsense", "2024-01-01", "2024-02-01", "").is_err());
        assert!(build_report_request("case_summary", "", "2024-02-01", "").is_err());
        assert!(build_report_request("case_summary", "2024-03-01", "2024-02-01", "").is_err());

        let req = build_report_request("case_summary", "2024-01-01", "2024-01-31", " Admin ")
            .unwrap();
        assert_eq!(req.start_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(req.generated_by.as_deref(), Some("Admin"));
        assert_eq!(
            build_report_request("judgment_digest", "2024-01-01", "2024-01-01", "")
                .unwrap()
                .generated_by,
            None
        );
    }
}
