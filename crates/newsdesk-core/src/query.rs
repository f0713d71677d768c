//! Query descriptors for the content listing endpoints.

use crate::domain::{ArticleStatus, Language, UserRole};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

/// Filter/sort/pagination parameters for the article listing.
#[derive(Debug, Clone)]
pub struct ArticleQuery {
    pub language: Language,
    pub page: u64,
    pub limit: u64,
    pub category_slug: Option<String>,
    pub status: Option<ArticleStatus>,
    pub search: Option<String>,
    pub featured_only: bool,
    pub sort: ArticleSort,
}

impl ArticleQuery {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            category_slug: None,
            status: None,
            search: None,
            featured_only: false,
            sort: ArticleSort::default(),
        }
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.limit
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    PublishedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArticleSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for ArticleSort {
    fn default() -> Self {
        Self {
            field: SortField::CreatedAt,
            direction: SortDirection::Desc,
        }
    }
}

impl ArticleSort {
    /// Parse `sortBy`/`sortOrder` query values. Each side defaults
    /// independently (createdAt, desc), so `sortBy=publishedAt` alone sorts
    /// by publish time descending. Only {createdAt, publishedAt} x
    /// {asc, desc} are recognized; any other combination falls back to
    /// createdAt desc.
    pub fn parse(sort_by: Option<&str>, sort_order: Option<&str>) -> Self {
        let field = match sort_by.unwrap_or("createdAt") {
            "createdAt" => Some(SortField::CreatedAt),
            "publishedAt" => Some(SortField::PublishedAt),
            _ => None,
        };
        let direction = match sort_order.unwrap_or("desc") {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        };
        match (field, direction) {
            (Some(field), Some(direction)) => Self { field, direction },
            _ => Self::default(),
        }
    }
}

/// Coerce a raw page/limit query value: non-numeric or non-positive input
/// falls back to the given default.
pub fn coerce_page_value(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|s| s.parse::<u64>().ok())
        .filter(|n| *n >= 1)
        .unwrap_or(default)
}

/// Total page count for a listing.
pub fn total_pages(total_count: u64, limit: u64) -> u64 {
    if limit == 0 {
        return 0;
    }
    total_count.div_ceil(limit)
}

/// Filter/pagination parameters for the admin user listing.
#[derive(Debug, Clone)]
pub struct UserQuery {
    pub page: u64,
    pub limit: u64,
    pub role: Option<UserRole>,
    pub search: Option<String>,
}

impl UserQuery {
    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_parses_recognized_combinations() {
        let sort = ArticleSort::parse(Some("publishedAt"), Some("asc"));
        assert_eq!(sort.field, SortField::PublishedAt);
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[test]
    fn sort_sides_default_independently() {
        let by_alone = ArticleSort::parse(Some("publishedAt"), None);
        assert_eq!(by_alone.field, SortField::PublishedAt);
        assert_eq!(by_alone.direction, SortDirection::Desc);

        let order_alone = ArticleSort::parse(None, Some("asc"));
        assert_eq!(order_alone.field, SortField::CreatedAt);
        assert_eq!(order_alone.direction, SortDirection::Asc);

        assert_eq!(ArticleSort::parse(None, None), ArticleSort::default());
    }

    #[test]
    fn sort_falls_back_on_unknown_input() {
        for (by, order) in [
            (Some("title"), Some("asc")),
            (Some("publishedAt"), Some("sideways")),
            (Some("updatedAt"), None),
            (None, Some("random")),
        ] {
            assert_eq!(ArticleSort::parse(by, order), ArticleSort::default());
        }
    }

    #[test]
    fn page_values_coerce_to_defaults() {
        assert_eq!(coerce_page_value(Some("3"), 1), 3);
        assert_eq!(coerce_page_value(Some("abc"), 1), 1);
        assert_eq!(coerce_page_value(Some("0"), 1), 1);
        assert_eq!(coerce_page_value(Some("-2"), 10), 10);
        assert_eq!(coerce_page_value(None, 10), 10);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn page_windows_tile_the_listing() {
        // Walking every page covers the whole result set exactly once.
        let total = 23;
        let limit = 5;
        let pages = total_pages(total, limit);
        assert_eq!(pages, 5);

        let mut covered = 0;
        for page in 1..=pages {
            let mut query = ArticleQuery::new(Language::Zh);
            query.page = page;
            query.limit = limit;
            assert_eq!(query.offset(), covered);
            covered += limit.min(total - covered);
        }
        assert_eq!(covered, total);
    }

    #[test]
    fn offset_is_zero_based() {
        let mut query = ArticleQuery::new(Language::En);
        assert_eq!(query.offset(), 0);
        query.page = 3;
        query.limit = 20;
        assert_eq!(query.offset(), 40);
    }
}
