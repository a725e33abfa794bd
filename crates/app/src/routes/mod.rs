pub mod admin;
pub mod not_found;
pub mod public;

use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{
    LdBookOpen, LdBriefcase, LdFileText, LdLayoutDashboard, LdScale, LdSearch, LdShield,
    LdUsers,
};
use dioxus_free_icons::Icon;
use shared_types::{Locale, RoleResponse, LOCALES};
use shared_ui::{use_toast, FormSelect, ToastOptions, Toasts};

use crate::api::{handle_api_error, ClientError};
use crate::store::{use_store, PortalStore};

use admin::{
    AdminArticleEdit, AdminArticleNew, AdminArticles, AdminCaseEdit, AdminCaseNew, AdminCases,
    AdminDisplayBoards, AdminHome, AdminJudgeEdit, AdminJudgeNew, AdminJudges,
    AdminJudgmentEdit, AdminJudgmentNew, AdminJudgments, AdminPermissions, AdminReports,
};
use not_found::NotFound;
use public::{
    ArticleDetail, DisplayBoard, JudgeProfile, Judges, JudgmentDetail, Judgments, News, Search,
};

/// Application routes. Everything except the fallback is prefixed with a
/// locale segment.
#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[redirect("/", || Route::News { lang: Locale::default().to_string() })]
    #[layout(PortalLayout)]
    // ── Public site ──
    #[route("/:lang")]
    News { lang: String },
    #[route("/:lang/news/:slug")]
    ArticleDetail { lang: String, slug: String },
    #[route("/:lang/judges")]
    Judges { lang: String },
    #[route("/:lang/judges/:id")]
    JudgeProfile { lang: String, id: String },
    #[route("/:lang/judgments")]
    Judgments { lang: String },
    #[route("/:lang/judgments/:id")]
    JudgmentDetail { lang: String, id: String },
    #[route("/:lang/search?:q&:page")]
    Search { lang: String, q: String, page: String },
    #[route("/:lang/display-board?:court&:date")]
    DisplayBoard { lang: String, court: String, date: String },
    // ── Back office ──
    #[route("/:lang/admin")]
    AdminHome { lang: String },
    #[route("/:lang/admin/cases")]
    AdminCases { lang: String },
    #[route("/:lang/admin/cases/new")]
    AdminCaseNew { lang: String },
    #[route("/:lang/admin/cases/:id")]
    AdminCaseEdit { lang: String, id: String },
    #[route("/:lang/admin/judges")]
    AdminJudges { lang: String },
    #[route("/:lang/admin/judges/new")]
    AdminJudgeNew { lang: String },
    #[route("/:lang/admin/judges/:id")]
    AdminJudgeEdit { lang: String, id: String },
    #[route("/:lang/admin/judgments")]
    AdminJudgments { lang: String },
    #[route("/:lang/admin/judgments/new")]
    AdminJudgmentNew { lang: String },
    #[route("/:lang/admin/judgments/:id")]
    AdminJudgmentEdit { lang: String, id: String },
    #[route("/:lang/admin/articles")]
    AdminArticles { lang: String },
    #[route("/:lang/admin/articles/new")]
    AdminArticleNew { lang: String },
    #[route("/:lang/admin/articles/:id")]
    AdminArticleEdit { lang: String, id: String },
    #[route("/:lang/admin/reports")]
    AdminReports { lang: String },
    #[route("/:lang/admin/display-boards")]
    AdminDisplayBoards { lang: String },
    #[route("/:lang/admin/permissions")]
    AdminPermissions { lang: String },
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

impl Route {
    /// Locale segment of the route, if it has one.
    pub fn lang(&self) -> Option<&str> {
        match self {
            Route::News { lang }
            | Route::ArticleDetail { lang, .. }
            | Route::Judges { lang }
            | Route::JudgeProfile { lang, .. }
            | Route::Judgments { lang }
            | Route::JudgmentDetail { lang, .. }
            | Route::Search { lang, .. }
            | Route::DisplayBoard { lang, .. }
            | Route::AdminHome { lang }
            | Route::AdminCases { lang }
            | Route::AdminCaseNew { lang }
            | Route::AdminCaseEdit { lang, .. }
            | Route::AdminJudges { lang }
            | Route::AdminJudgeNew { lang }
            | Route::AdminJudgeEdit { lang, .. }
            | Route::AdminJudgments { lang }
            | Route::AdminJudgmentNew { lang }
            | Route::AdminJudgmentEdit { lang, .. }
            | Route::AdminArticles { lang }
            | Route::AdminArticleNew { lang }
            | Route::AdminArticleEdit { lang, .. }
            | Route::AdminReports { lang }
            | Route::AdminDisplayBoards { lang }
            | Route::AdminPermissions { lang } => Some(lang),
            Route::NotFound { .. } => None,
        }
    }

    /// Back-office resource the route belongs to.
    pub fn resource(&self) -> Option<&'static str> {
        match self {
            Route::AdminCases { .. } | Route::AdminCaseNew { .. } | Route::AdminCaseEdit { .. } => {
                Some("cases")
            }
            Route::AdminJudges { .. }
            | Route::AdminJudgeNew { .. }
            | Route::AdminJudgeEdit { .. } => Some("judges"),
            Route::AdminJudgments { .. }
            | Route::AdminJudgmentNew { .. }
            | Route::AdminJudgmentEdit { .. } => Some("judgments"),
            Route::AdminArticles { .. }
            | Route::AdminArticleNew { .. }
            | Route::AdminArticleEdit { .. } => Some("articles"),
            Route::AdminReports { .. } => Some("reports"),
            Route::AdminDisplayBoards { .. } => Some("display_boards"),
            Route::AdminPermissions { .. } => Some("permissions"),
            _ => None,
        }
    }
}

/// Back-office sections in menu order: resource and label.
pub const ADMIN_SECTIONS: &[(&str, &str)] = &[
    ("cases", "Cases"),
    ("judges", "Judges"),
    ("judgments", "Judgments"),
    ("articles", "Articles"),
    ("reports", "Reports"),
    ("display_boards", "Display Boards"),
    ("permissions", "Permissions"),
];

/// Admin list route for a resource.
pub fn admin_route(resource: &str, lang: String) -> Option<Route> {
    Some(match resource {
        "cases" => Route::AdminCases { lang },
        "judges" => Route::AdminJudges { lang },
        "judgments" => Route::AdminJudgments { lang },
        "articles" => Route::AdminArticles { lang },
        "reports" => Route::AdminReports { lang },
        "display_boards" => Route::AdminDisplayBoards { lang },
        "permissions" => Route::AdminPermissions { lang },
        _ => return None,
    })
}

/// Log a failed call and surface it as a toast.
pub fn toast_error(toast: Toasts, action: &str, err: &ClientError) {
    toast.error(handle_api_error(action, err), ToastOptions::new());
}

/// Run a tracked call; failures become toasts and `None`.
pub async fn load<T>(
    store: PortalStore,
    toast: Toasts,
    action: &str,
    fut: impl std::future::Future<Output = Result<T, ClientError>>,
) -> Option<T> {
    match store.track(fut).await {
        Ok(v) => Some(v),
        Err(e) => {
            toast_error(toast, action, &e);
            None
        }
    }
}

/// Header, role-gated navigation and loading bar around every page.
#[component]
fn PortalLayout() -> Element {
    let route: Route = use_route();
    let store = use_store();
    let segment = route.lang().unwrap_or_default().to_string();
    let locale = Locale::from_segment(&segment);
    let lang = locale.to_string();

    // Unknown locale segments fall back to English.
    if !segment.is_empty() && segment != locale.as_str() {
        navigator().replace(Route::News { lang: lang.clone() });
    }

    let profile = store.profile.read().clone();
    let loading = store.loading.read().is_loading();
    let in_admin = route.resource().is_some() || matches!(route, Route::AdminHome { .. });

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./layout.css") }

        div { class: "portal", lang: "{lang}",
            if loading {
                div { class: "loading-bar", role: "progressbar", "aria-busy": "true" }
            }
            header { class: "portal-header",
                Link { class: "portal-brand", to: Route::News { lang: lang.clone() },
                    Icon::<LdScale> { icon: LdScale, width: 22, height: 22 }
                    span { "Legal Portal" }
                }
                nav { class: "portal-nav",
                    Link { to: Route::News { lang: lang.clone() },
                        Icon::<LdBookOpen> { icon: LdBookOpen, width: 16, height: 16 }
                        "News"
                    }
                    Link { to: Route::Judges { lang: lang.clone() },
                        Icon::<LdUsers> { icon: LdUsers, width: 16, height: 16 }
                        "Judges"
                    }
                    Link { to: Route::Judgments { lang: lang.clone() },
                        Icon::<LdFileText> { icon: LdFileText, width: 16, height: 16 }
                        "Judgments"
                    }
                    Link {
                        to: Route::DisplayBoard { lang: lang.clone(), court: String::new(), date: String::new() },
                        Icon::<LdBriefcase> { icon: LdBriefcase, width: 16, height: 16 }
                        "Display Board"
                    }
                    Link {
                        to: Route::Search { lang: lang.clone(), q: String::new(), page: String::new() },
                        Icon::<LdSearch> { icon: LdSearch, width: 16, height: 16 }
                        "Search"
                    }
                    if profile.has_back_office() {
                        Link { to: Route::AdminHome { lang: lang.clone() },
                            Icon::<LdLayoutDashboard> { icon: LdLayoutDashboard, width: 16, height: 16 }
                            "Back Office"
                        }
                    }
                }
                div { class: "portal-tools",
                    for l in LOCALES.iter() {
                        Link {
                            key: "{l}",
                            class: if *l == locale { "locale-link active" } else { "locale-link" },
                            to: Route::News { lang: l.to_string() },
                            {l.display_name()}
                        }
                    }
                    RolePicker {}
                }
            }

            if in_admin && profile.has_back_office() {
                nav { class: "admin-nav",
                    Icon::<LdShield> { icon: LdShield, width: 16, height: 16 }
                    for (resource, label) in ADMIN_SECTIONS.iter().copied().filter(|(r, _)| profile.can_read(r)) {
                        if let Some(to) = admin_route(resource, lang.clone()) {
                            Link {
                                key: "{resource}",
                                class: if route.resource() == Some(resource) { "admin-nav-link active" } else { "admin-nav-link" },
                                to: to,
                                "{label}"
                            }
                        }
                    }
                }
            }

            main { class: "portal-main",
                Outlet::<Route> {}
            }
        }
    }
}

/// Select for the role the session acts as. Roles come from the public
/// role list.
#[component]
fn RolePicker() -> Element {
    let store = use_store();
    let toast = use_toast();

    let roles = use_resource(move || async move {
        let client = store.client();
        load(store, toast, "load roles", client.list_roles())
            .await
            .unwrap_or_default()
    });

    let names: Vec<String> = match &*roles.read() {
        Some(list) if !list.is_empty() => list.iter().map(|r: &RoleResponse| r.name.clone()).collect(),
        _ => vec![store.role.read().clone()],
    };

    rsx! {
        FormSelect {
            value: store.role.read().clone(),
            onchange: move |evt: Event<FormData>| {
                tracing::info!(role = %evt.value(), "switching role");
                store.switch_role(evt.value());
            },
            for name in names {
                option { key: "{name}", value: "{name}", "Viewing as {name}" }
            }
        }
    }
}
