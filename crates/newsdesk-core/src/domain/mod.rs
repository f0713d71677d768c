//! Domain entities and read models - the core business objects.

mod article;
mod category;
mod dashboard;
mod language;
mod settings;
mod slug;
mod user;

pub use article::{
    ArticleChanges, ArticleDetail, ArticleLocale, ArticlePage, ArticleStatus, ArticleSummary,
    AuthorRef, CategoryRef, LocaleDraft, LocaleSummary, NewArticle, resolve_published_at,
};
pub use category::{
    CategoryChanges, CategoryDetail, CategoryLocaleDraft, CategoryLocaleRow, CategorySummary,
    NewCategory,
};
pub use dashboard::{
    CategoryArticleCount, DashboardScope, DashboardStats, MonthCount, Overview, RecentArticle,
};
pub use language::Language;
pub use settings::{SiteSettings, Theme};
pub use slug::slugify;
pub use user::{NewUser, User, UserPage, UserRole, UserSummary};
