use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::article::ArticleStatus;
use super::user::UserRole;

/// Authorization scope for dashboard queries: administrators see sitewide
/// numbers, everyone else only their own articles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardScope {
    Sitewide,
    Author(Uuid),
}

impl DashboardScope {
    pub fn for_user(role: UserRole, user_id: Uuid) -> Self {
        match role {
            UserRole::Admin => DashboardScope::Sitewide,
            _ => DashboardScope::Author(user_id),
        }
    }

    /// The author id the scope restricts to, if any.
    pub fn author_id(&self) -> Option<Uuid> {
        match self {
            DashboardScope::Sitewide => None,
            DashboardScope::Author(id) => Some(*id),
        }
    }
}

/// Aggregate dashboard payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub overview: Overview,
    pub recent_activity: Vec<RecentArticle>,
    pub articles_by_month: Vec<MonthCount>,
    pub categories_with_count: Vec<CategoryArticleCount>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_articles: u64,
    pub published_articles: u64,
    pub draft_articles: u64,
    pub total_categories: u64,
}

/// Recently-updated article with its title resolved in the reporting
/// language (falls back to the slug).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentArticle {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub status: ArticleStatus,
    pub updated_at: DateTime<Utc>,
    pub author_name: Option<String>,
}

/// Number of articles created in one calendar month, `month` as `YYYY-MM`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthCount {
    pub month: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryArticleCount {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub article_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_scope_is_sitewide() {
        let id = Uuid::new_v4();
        assert_eq!(
            DashboardScope::for_user(UserRole::Admin, id),
            DashboardScope::Sitewide
        );
        assert_eq!(DashboardScope::Sitewide.author_id(), None);
    }

    #[test]
    fn non_admin_scope_is_author_bound() {
        let id = Uuid::new_v4();
        for role in [UserRole::Editor, UserRole::Contributor] {
            let scope = DashboardScope::for_user(role, id);
            assert_eq!(scope, DashboardScope::Author(id));
            assert_eq!(scope.author_id(), Some(id));
        }
    }
}
