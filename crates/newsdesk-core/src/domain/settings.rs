use serde::{Deserialize, Serialize};

use super::language::Language;

/// Singleton site configuration row, addressed by a fixed well-known id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub site_name: String,
    pub default_language: Language,
    pub theme: Theme,
}

impl SiteSettings {
    /// Fixed id of the one persisted row.
    pub const SINGLETON_ID: &'static str = "singleton";
}

impl Default for SiteSettings {
    /// Hard-coded defaults used while no row has been written yet.
    fn default() -> Self {
        Self {
            site_name: "News Portal".into(),
            default_language: Language::Zh,
            theme: Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_str(value: &str) -> Option<Theme> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}
