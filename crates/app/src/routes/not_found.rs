use dioxus::prelude::*;
use shared_types::Locale;

use crate::routes::Route;

/// 404 page for paths outside the route table.
#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    let path = format!("/{}", route.join("/"));
    let lang = route
        .first()
        .map(|s| Locale::from_segment(s))
        .unwrap_or_default()
        .to_string();

    rsx! {
        div { class: "not-found-page",
            div { class: "not-found-code", "404" }
            h1 { "Page Not Found" }
            p {
                "The page "
                code { "{path}" }
                " could not be found."
            }
            Link { to: Route::News { lang }, class: "not-found-link", "Back to the news" }
        }
    }
}
