use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    ArticleChanges, ArticleDetail, ArticlePage, CategoryChanges, CategoryDetail, CategorySummary,
    DashboardScope, DashboardStats, Language, NewArticle, NewCategory, NewUser, SiteSettings,
    User, UserPage,
};
use crate::error::RepoError;
use crate::query::{ArticleQuery, UserQuery};

/// Article persistence with filtered listing and full-replace mutations.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Filtered, sorted, paginated listing. Articles without a locale row in
    /// the requested language are excluded from both the page and the total.
    async fn list(&self, query: &ArticleQuery) -> Result<ArticlePage, RepoError>;

    /// Fetch one article carrying only the matching-language locale rows
    /// (possibly none).
    async fn get(&self, id: Uuid, language: Language) -> Result<Option<ArticleDetail>, RepoError>;

    /// Fetch one article with all of its locale rows.
    async fn get_full(&self, id: Uuid) -> Result<Option<ArticleDetail>, RepoError>;

    /// Id of the article owning the given (normalized) slug, if any.
    async fn slug_owner(&self, slug: &str) -> Result<Option<Uuid>, RepoError>;

    async fn create(&self, article: NewArticle) -> Result<ArticleDetail, RepoError>;

    /// Apply a partial update. Supplying `locales` or `category_ids` replaces
    /// the entire sub-collection.
    async fn update(&self, id: Uuid, changes: ArticleChanges) -> Result<ArticleDetail, RepoError>;

    /// Returns false when the id does not exist. Locale rows cascade and
    /// category associations are dropped.
    async fn delete(&self, id: Uuid) -> Result<bool, RepoError>;
}

/// Category persistence.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Categories with a name in the requested language, ordered by creation
    /// time, optionally annotated with their published-article count.
    async fn list(
        &self,
        language: Language,
        include_article_count: bool,
    ) -> Result<Vec<CategorySummary>, RepoError>;

    async fn get(&self, id: Uuid, language: Language)
    -> Result<Option<CategoryDetail>, RepoError>;

    async fn get_full(&self, id: Uuid) -> Result<Option<CategoryDetail>, RepoError>;

    async fn slug_owner(&self, slug: &str) -> Result<Option<Uuid>, RepoError>;

    async fn create(&self, category: NewCategory) -> Result<CategoryDetail, RepoError>;

    async fn update(&self, id: Uuid, changes: CategoryChanges)
    -> Result<CategoryDetail, RepoError>;

    /// Number of articles (any status) associated with the category; guards
    /// deletion.
    async fn article_count(&self, id: Uuid) -> Result<u64, RepoError>;

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError>;
}

/// User persistence for the auth gate and the admin user listing.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    async fn list(&self, query: &UserQuery) -> Result<UserPage, RepoError>;

    async fn create(&self, user: NewUser) -> Result<User, RepoError>;
}

/// Singleton site settings.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// The stored row, or None when nothing has been written yet.
    async fn load(&self) -> Result<Option<SiteSettings>, RepoError>;

    /// Upsert by the fixed singleton id.
    async fn save(&self, settings: &SiteSettings) -> Result<(), RepoError>;
}

/// Role-scoped dashboard aggregates.
#[async_trait]
pub trait DashboardStore: Send + Sync {
    async fn stats(&self, scope: &DashboardScope) -> Result<DashboardStats, RepoError>;
}
