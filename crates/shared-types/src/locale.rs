use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Locales the public site is routed under (`/en/...`, `/hi/...`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Hi,
}

pub const LOCALES: &[Locale] = &[Locale::En, Locale::Hi];

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Hi => "hi",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Hi => "हिन्दी",
        }
    }

    /// Parse a route segment, falling back to English for anything unknown.
    pub fn from_segment(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl FromStr for Locale {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "hi" => Ok(Locale::Hi),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_segment_falls_back_to_english() {
        assert_eq!(Locale::from_segment("fr"), Locale::En);
        assert_eq!(Locale::from_segment("HI"), Locale::Hi);
        assert_eq!(Locale::Hi.to_string(), "hi");
    }
}
