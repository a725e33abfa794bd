use dioxus::prelude::*;

/// Flex row holding a filter input and its buttons or selects.
#[component]
pub fn SearchBar(
    #[props(default)] onsubmit: Option<EventHandler<FormEvent>>,
    children: Element,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        form {
            class: "search-bar",
            role: "search",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                if let Some(handler) = &onsubmit {
                    handler.call(evt);
                }
            },
            {children}
        }
    }
}
