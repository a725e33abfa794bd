use dioxus::prelude::*;

pub mod api;
pub mod format_helpers;
mod routes;
pub mod store;
pub mod workflow;

use routes::Route;
use store::PortalStore;

const PORTAL_CSS: Asset = asset!("/assets/portal.css");

fn main() {
    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        server::config::load_config();
        let flags = server::config::feature_flags();

        if flags.telemetry {
            server::telemetry::init_telemetry();
        }
        server::health::record_start_time();

        let state = server::openapi::init_state().await?;

        let mut router = dioxus::server::router(App).merge(server::openapi::api_router(state));

        if flags.telemetry {
            router = router.layer(server::telemetry::OtelTraceLayer);
        }

        let router = router
            .layer(tower_http::request_id::PropagateRequestIdLayer::x_request_id())
            .layer(tower_http::request_id::SetRequestIdLayer::x_request_id(
                tower_http::request_id::MakeRequestUuid,
            ));
        Ok(router)
    });

    #[cfg(not(feature = "server"))]
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let store = use_context_provider(PortalStore::new);

    // Resolve the default role's profile once on startup.
    use_hook(move || {
        spawn(async move {
            store.refresh_profile().await;
        });
    });

    rsx! {
        document::Link { rel: "stylesheet", href: PORTAL_CSS }
        shared_ui::ToastProvider {
            SuspenseBoundary {
                fallback: |_| rsx! {
                    div { class: "page-loading",
                        p { "Loading..." }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
