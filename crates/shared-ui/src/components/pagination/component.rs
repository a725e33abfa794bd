use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaChevronLeft, FaChevronRight};
use dioxus_free_icons::Icon;

use crate::components::button::{Button, ButtonVariant};

/// Default number of numbered page buttons shown at once.
pub const PAGE_WINDOW: i64 = 5;

/// Page numbers to render as buttons.
///
/// Returns every page when `total_pages <= max_buttons`. Otherwise returns
/// `max_buttons` consecutive pages centered on `current`, shifted so the
/// window never starts below 1 and never runs past `total_pages`.
pub fn page_window(current: i64, total_pages: i64, max_buttons: i64) -> Vec<i64> {
    if total_pages <= 0 || max_buttons <= 0 {
        return Vec::new();
    }
    if total_pages <= max_buttons {
        return (1..=total_pages).collect();
    }

    let current = current.clamp(1, total_pages);
    let mut start = (current - max_buttons / 2).max(1);
    let end = (start + max_buttons - 1).min(total_pages);
    start = (end - max_buttons + 1).max(1);
    (start..=end).collect()
}

/// Number of pages needed for `total` items at `per_page` items per page.
pub fn total_pages(total: i64, per_page: i64) -> i64 {
    if per_page <= 0 || total <= 0 {
        return 0;
    }
    (total + per_page - 1) / per_page
}

/// `current` pulled into `1..=total_pages`. With no pages it is 1.
pub fn clamp_page(current: i64, total_pages: i64) -> i64 {
    current.clamp(1, total_pages.max(1))
}

/// Numbered pagination with Previous/Next and a sliding window of page
/// buttons. Pages are 1-based; `on_page` receives the page to load.
#[component]
pub fn Pagination(
    current: i64,
    total_pages: i64,
    on_page: EventHandler<i64>,
    #[props(default = PAGE_WINDOW)] max_buttons: i64,
) -> Element {
    if total_pages <= 1 {
        return rsx! {};
    }

    let current = clamp_page(current, total_pages);
    let pages = page_window(current, total_pages, max_buttons);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        nav { class: "pagination", "aria-label": "Pagination",
            Button {
                variant: ButtonVariant::Outline,
                disabled: current <= 1,
                onclick: move |_| on_page.call(current - 1),
                Icon::<FaChevronLeft> { icon: FaChevronLeft, width: 12, height: 12 }
                span { "Previous" }
            }
            for page in pages {
                Button {
                    key: "{page}",
                    variant: if page == current { ButtonVariant::Primary } else { ButtonVariant::Ghost },
                    onclick: move |_| on_page.call(page),
                    "{page}"
                }
            }
            Button {
                variant: ButtonVariant::Outline,
                disabled: current >= total_pages,
                onclick: move |_| on_page.call(current + 1),
                span { "Next" }
                Icon::<FaChevronRight> { icon: FaChevronRight, width: 12, height: 12 }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn window_centers_on_current_page() {
        assert_eq!(page_window(7, 12, 5), vec![5, 6, 7, 8, 9]);
    }

    #[test]
    fn window_clamps_at_the_edges() {
        assert_eq!(page_window(1, 12, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(2, 12, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(12, 12, 5), vec![8, 9, 10, 11, 12]);
        assert_eq!(page_window(11, 12, 5), vec![8, 9, 10, 11, 12]);
    }

    #[test]
    fn few_pages_show_everything() {
        assert_eq!(page_window(2, 3, 5), vec![1, 2, 3]);
        assert_eq!(page_window(1, 5, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(1, 1, 5), vec![1]);
    }

    #[test]
    fn out_of_range_current_is_clamped() {
        assert_eq!(page_window(40, 12, 5), vec![8, 9, 10, 11, 12]);
        assert_eq!(page_window(-3, 12, 5), vec![1, 2, 3, 4, 5]);
        assert!(page_window(1, 0, 5).is_empty());
    }

    #[test]
    fn current_page_is_pulled_into_range() {
        assert_eq!(clamp_page(40, 12), 12);
        assert_eq!(clamp_page(0, 12), 1);
        assert_eq!(clamp_page(7, 12), 7);
        assert_eq!(clamp_page(3, 0), 1);
    }

    #[test]
    fn even_window_width() {
        assert_eq!(page_window(6, 10, 4), vec![4, 5, 6, 7]);
        assert_eq!(page_window(10, 10, 4), vec![7, 8, 9, 10]);
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(5, 0), 0);
    }
}
