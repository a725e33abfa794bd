mod articles;
mod cases;
mod display_boards;
mod judges;
mod judgments;
mod permissions;
mod reports;

pub use articles::{AdminArticleEdit, AdminArticleNew, AdminArticles};
pub use cases::{AdminCaseEdit, AdminCaseNew, AdminCases};
pub use display_boards::AdminDisplayBoards;
pub use judges::{AdminJudgeEdit, AdminJudgeNew, AdminJudges};
pub use judgments::{AdminJudgmentEdit, AdminJudgmentNew, AdminJudgments};
pub use permissions::AdminPermissions;
pub use reports::AdminReports;

use dioxus::prelude::*;
use shared_ui::{Card, CardContent, CardHeader, CardMeta, CardTitle, PageHeader, PageTitle};

use crate::format_helpers::format_snake_case_title;
use crate::routes::{admin_route, ADMIN_SECTIONS};
use crate::store::use_store;

/// Renders `children` only when the acting role may read `resource`.
#[component]
pub fn AdminGuard(resource: String, children: Element) -> Element {
    let store = use_store();
    let allowed = store.profile.read().can_read(&resource);

    if allowed {
        rsx! { {children} }
    } else {
        let section = format_snake_case_title(&resource);
        rsx! {
            Card {
                CardHeader { CardTitle { "Access denied" } }
                CardContent {
                    p { "Your role cannot view {section}. Pick another role from the header." }
                }
            }
        }
    }
}

/// Inline "required" message for a form field the last submit left blank.
pub fn field_error(missing: &[&'static str], field: &str) -> Option<String> {
    missing
        .contains(&field)
        .then(|| "This field is required.".to_string())
}

/// Back-office landing page: one card per section the role can see.
#[component]
pub fn AdminHome(lang: String) -> Element {
    let store = use_store();
    let profile = store.profile.read().clone();

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { "Back Office" }
            }
            if !profile.has_back_office() {
                Card {
                    CardContent {
                        p { "Your role ({profile.role}) has no back-office access." }
                    }
                }
            }
            div { class: "card-grid",
                for (resource, label) in ADMIN_SECTIONS.iter().copied().filter(|(r, _)| profile.can_read(r)) {
                    if let Some(to) = admin_route(resource, lang.clone()) {
                        Card { key: "{resource}", class: "admin-card",
                            CardHeader {
                                CardTitle { Link { to: to, "{label}" } }
                                CardMeta {
                                    if profile.can_write(resource) { "Read and write" } else { "Read only" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
