use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::language::Language;
use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArticleStatus {
    Draft,
    Published,
    Archived,
}

impl ArticleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleStatus::Draft => "DRAFT",
            ArticleStatus::Published => "PUBLISHED",
            ArticleStatus::Archived => "ARCHIVED",
        }
    }

    pub fn from_str(value: &str) -> Option<ArticleStatus> {
        match value {
            "DRAFT" => Some(ArticleStatus::Draft),
            "PUBLISHED" => Some(ArticleStatus::Published),
            "ARCHIVED" => Some(ArticleStatus::Archived),
            _ => None,
        }
    }
}

/// Resolve the `published_at` value an article must carry after a status
/// change.
///
/// First transition into PUBLISHED stamps `now` unless an explicit timestamp
/// is supplied; while PUBLISHED an explicit timestamp overrides the stored
/// one; any status other than PUBLISHED clears it.
pub fn resolve_published_at(
    status: ArticleStatus,
    current: Option<DateTime<Utc>>,
    explicit: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    match status {
        ArticleStatus::Published => match (current, explicit) {
            (None, explicit) => Some(explicit.unwrap_or(now)),
            (Some(_), Some(explicit)) => Some(explicit),
            (Some(current), None) => Some(current),
        },
        _ => None,
    }
}

/// One language-specific content row submitted by a client.
#[derive(Debug, Clone)]
pub struct LocaleDraft {
    pub language: Language,
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub meta_description: Option<String>,
}

impl LocaleDraft {
    /// Every locale needs a language plus non-empty title and content.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Err(DomainError::Validation(
                "each locale requires a title and content".into(),
            ));
        }
        Ok(())
    }
}

/// Validate the locale set of a create/replace request: at least one entry,
/// each individually valid.
pub(crate) fn validate_locale_set(locales: &[LocaleDraft]) -> Result<(), DomainError> {
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

/// A stored language-specific content row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleLocale {
    pub id: Uuid,
    pub language: Language,
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub meta_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Locale projection carried by list entries (no body text).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleSummary {
    pub language: Language,
    pub title: String,
    pub excerpt: Option<String>,
    pub meta_description: Option<String>,
}

/// Author reference attached to query results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRef {
    pub id: Uuid,
    pub name: Option<String>,
}

/// Category reference with its name resolved in the requested language.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRef {
    pub id: Uuid,
    pub slug: String,
    pub name: Option<String>,
}

/// List entry: article plus requested-language locale, category names and
/// author display name.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSummary {
    pub id: Uuid,
    pub slug: String,
    pub status: ArticleStatus,
    pub featured: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub locale: LocaleSummary,
    pub categories: Vec<CategoryRef>,
    pub author: AuthorRef,
}

/// One page of a filtered article listing.
#[derive(Debug, Clone)]
pub struct ArticlePage {
    pub articles: Vec<ArticleSummary>,
    pub total_count: u64,
}

/// Full article with its locale rows, used by single fetch and mutations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDetail {
    pub id: Uuid,
    pub slug: String,
    pub status: ArticleStatus,
    pub featured: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub locales: Vec<ArticleLocale>,
    pub categories: Vec<CategoryRef>,
    pub author: AuthorRef,
}

/// A validated article ready for insertion. The slug is expected to be
/// normalized already.
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub slug: String,
    pub status: ArticleStatus,
    pub featured: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub author_id: Uuid,
    pub locales: Vec<LocaleDraft>,
    pub category_ids: Vec<Uuid>,
}

impl NewArticle {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.slug.is_empty() {
            return Err(DomainError::Validation("slug is required".into()));
        }
        validate_locale_set(&self.locales)
    }
}

/// Partial update for an article. `locales` and `category_ids` carry
/// full-replace semantics: supplying them swaps the whole sub-collection.
#[derive(Debug, Clone, Default)]
pub struct ArticleChanges {
    pub slug: Option<String>,
    pub status: Option<ArticleStatus>,
    pub featured: Option<bool>,
    /// Resolved publish timestamp; always written (see `resolve_published_at`).
    pub published_at: Option<DateTime<Utc>>,
    pub locales: Option<Vec<LocaleDraft>>,
    pub category_ids: Option<Vec<Uuid>>,
}

impl ArticleChanges {
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(locales) = &self.locales {
            validate_locale_set(locales)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn first_publish_stamps_now() {
        let now = at(1_000);
        assert_eq!(
            resolve_published_at(ArticleStatus::Published, None, None, now),
            Some(now)
        );
    }

    #[test]
    fn first_publish_honors_explicit_timestamp() {
        let now = at(1_000);
        let explicit = at(500);
        assert_eq!(
            resolve_published_at(ArticleStatus::Published, None, Some(explicit), now),
            Some(explicit)
        );
    }

    #[test]
    fn republish_keeps_existing_timestamp() {
        let now = at(2_000);
        let current = at(100);
        assert_eq!(
            resolve_published_at(ArticleStatus::Published, Some(current), None, now),
            Some(current)
        );
    }

    #[test]
    fn republish_with_explicit_timestamp_overrides() {
        let now = at(2_000);
        assert_eq!(
            resolve_published_at(ArticleStatus::Published, Some(at(100)), Some(at(300)), now),
            Some(at(300))
        );
    }

    #[test]
    fn leaving_published_clears_timestamp() {
        let now = at(2_000);
        for status in [ArticleStatus::Draft, ArticleStatus::Archived] {
            assert_eq!(resolve_published_at(status, Some(at(100)), None, now), None);
            assert_eq!(
                resolve_published_at(status, Some(at(100)), Some(at(300)), now),
                None
            );
        }
    }

    #[test]
    fn locale_set_must_not_be_empty() {
        assert!(validate_locale_set(&[]).is_err());
    }

    #[test]
    fn locale_requires_title_and_content() {
        let locale = LocaleDraft {
            language: Language::Zh,
            title: "t".into(),
            content: " ".into(),
            excerpt: None,
            meta_description: None,
        };
        assert!(locale.validate().is_err());
    }
}
