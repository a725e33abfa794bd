use dioxus::prelude::*;

/// Visual variant for badges.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BadgeVariant {
    #[default]
    Primary,
    Secondary,
    Success,
    Warning,
    Destructive,
    Outline,
}

impl BadgeVariant {
    fn class(&self) -> &'static str {
        match self {
            BadgeVariant::Primary => "primary",
            BadgeVariant::Secondary => "secondary",
            BadgeVariant::Success => "success",
            BadgeVariant::Warning => "warning",
            BadgeVariant::Destructive => "destructive",
            BadgeVariant::Outline => "outline",
        }
    }

    /// Variant for a case or article status value.
    pub fn for_status(status: &str) -> Self {
        match status {
            "published" | "judgment" | "active" => BadgeVariant::Success,
            "draft" | "filed" => BadgeVariant::Secondary,
            "pending" | "hearing" => BadgeVariant::Warning,
            "closed" | "inactive" => BadgeVariant::Outline,
            "rejected" => BadgeVariant::Destructive,
            _ => BadgeVariant::Primary,
        }
    }
}

/// Inline label for statuses, tags and entity types.
#[component]
pub fn Badge(
    #[props(default)] variant: BadgeVariant,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let base = vec![
        Attribute::new("class", "badge", None, false),
        Attribute::new("data-style", variant.class(), None, false),
    ];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        span {
            ..merged,
            {children}
        }
    }
}

/// Badge showing a status value, colored by [`BadgeVariant::for_status`].
#[component]
pub fn StatusBadge(status: String) -> Element {
    let label = status.replace('_', " ");
    rsx! {
        Badge { variant: BadgeVariant::for_status(&status), "{label}" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_colors() {
        assert_eq!(BadgeVariant::for_status("published"), BadgeVariant::Success);
        assert_eq!(BadgeVariant::for_status("draft"), BadgeVariant::Secondary);
        assert_eq!(BadgeVariant::for_status("hearing"), BadgeVariant::Warning);
        assert_eq!(BadgeVariant::for_status("closed"), BadgeVariant::Outline);
        assert_eq!(BadgeVariant::for_status("rejected"), BadgeVariant::Destructive);
        assert_eq!(BadgeVariant::for_status("something_else"), BadgeVariant::Primary);
    }
}
