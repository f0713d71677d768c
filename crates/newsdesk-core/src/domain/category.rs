use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::language::Language;
use crate::error::DomainError;

/// One localized category name submitted by a client.
#[derive(Debug, Clone)]
pub struct CategoryLocaleDraft {
    pub language: Language,
    pub name: String,
}

impl CategoryLocaleDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::Validation(
                "each locale requires a name".into(),
            ));
        }
        Ok(())
    }
}

pub(crate) fn validate_category_locales(
    locales: &[CategoryLocaleDraft],
) -> Result<(), DomainError> {
    if locales.is_empty() {
        return Err(DomainError::Validation(
            "at least one locale is required".into(),
        ));
    }
    for locale in locales {
        locale.validate()?;
    }
    Ok(())
}

/// A stored localized category name.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryLocaleRow {
    pub id: Uuid,
    pub language: Language,
    pub name: String,
}

/// List entry with the requested-language name and an optional live
/// published-article count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_count: Option<u64>,
    pub created_at: DateTime<Utc>,
}

/// Full category with its locale rows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetail {
    pub id: Uuid,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub locales: Vec<CategoryLocaleRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_article_count: Option<u64>,
}

/// A validated category ready for insertion; slug already normalized.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub slug: String,
    pub locales: Vec<CategoryLocaleDraft>,
}

impl NewCategory {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.slug.is_empty() {
            return Err(DomainError::Validation("slug is required".into()));
        }
        validate_category_locales(&self.locales)
    }
}

/// Partial category update; `locales` is full-replace.
#[derive(Debug, Clone, Default)]
pub struct CategoryChanges {
    pub slug: Option<String>,
    pub locales: Option<Vec<CategoryLocaleDraft>>,
}

impl CategoryChanges {
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(locales) = &self.locales {
            validate_category_locales(locales)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_is_rejected() {
        let draft = CategoryLocaleDraft {
            language: Language::En,
            name: "  ".into(),
        };
        assert!(draft.validate().is_err());
    }

    #[test]
    fn new_category_requires_slug_and_locales() {
        let missing_slug = NewCategory {
            slug: String::new(),
            locales: vec![CategoryLocaleDraft {
                language: Language::Zh,
                name: "科技".into(),
            }],
        };
        assert!(missing_slug.validate().is_err());

        let missing_locales = NewCategory {
            slug: "tech".into(),
            locales: vec![],
        };
        assert!(missing_locales.validate().is_err());
    }
}
