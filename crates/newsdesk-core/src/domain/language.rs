use serde::{Deserialize, Serialize};

/// Content language. The portal serves Chinese and English; any other code
/// arriving at the routing layer is treated as absent and resolves to the
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Zh,
    En,
}

impl Language {
    pub const DEFAULT: Language = Language::Zh;

    /// The fixed language used for dashboard reporting titles.
    pub const REPORTING: Language = Language::Zh;

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Zh => "zh",
            Language::En => "en",
        }
    }

    pub fn from_str(code: &str) -> Option<Language> {
        match code {
            "zh" => Some(Language::Zh),
            "en" => Some(Language::En),
            _ => None,
        }
    }

    /// Resolve an optional query-string value, falling back to the default
    /// for missing or unknown codes.
    pub fn parse_or_default(code: Option<&str>) -> Language {
        code.and_then(Language::from_str).unwrap_or(Language::DEFAULT)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_parse() {
        assert_eq!(Language::from_str("zh"), Some(Language::Zh));
        assert_eq!(Language::from_str("en"), Some(Language::En));
    }

    #[test]
    fn unknown_codes_fall_back_to_default() {
        assert_eq!(Language::parse_or_default(Some("fr")), Language::Zh);
        assert_eq!(Language::parse_or_default(Some("")), Language::Zh);
        assert_eq!(Language::parse_or_default(None), Language::Zh);
    }
}
