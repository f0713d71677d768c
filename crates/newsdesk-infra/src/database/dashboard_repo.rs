//! Role-scoped dashboard aggregates.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{Months, Utc};
use sea_orm::{
    ColumnTrait, Condition, DbConn, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use newsdesk_core::domain::{
    ArticleStatus, CategoryArticleCount, DashboardScope, DashboardStats, Language, MonthCount,
    Overview, RecentArticle,
};
use newsdesk_core::error::RepoError;
use newsdesk_core::ports::DashboardStore;

use super::category_repo::published_counts_by_category;
use super::entity::{article, article_locale, category, category_locale, user};
use super::query_err;

const RECENT_ACTIVITY_LIMIT: u64 = 10;
const TRAILING_MONTHS: u32 = 12;

pub struct PostgresDashboardStore {
    db: DbConn,
}

impl PostgresDashboardStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    async fn count_articles(
        &self,
        scope: &DashboardScope,
        status: Option<ArticleStatus>,
    ) -> Result<u64, RepoError> {
        let mut query = article::Entity::find().filter(scope_condition(scope));
        if let Some(status) = status {
            query = query.filter(article::Column::Status.eq(status.as_str()));
        }
        query.count(&self.db).await.map_err(query_err)
    }

    async fn recent_activity(
        &self,
        scope: &DashboardScope,
    ) -> Result<Vec<RecentArticle>, RepoError> {
        let rows = article::Entity::find()
            .filter(scope_condition(scope))
            .order_by_desc(article::Column::UpdatedAt)
            .limit(RECENT_ACTIVITY_LIMIT)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let titles: HashMap<Uuid, String> = article_locale::Entity::find()
            .filter(article_locale::Column::ArticleId.is_in(ids))
            .filter(article_locale::Column::Language.eq(Language::REPORTING.as_str()))
            .all(&self.db)
            .await
            .map_err(query_err)?
            .into_iter()
            .map(|row| (row.article_id, row.title))
            .collect();

        let author_ids: Vec<Uuid> = rows.iter().map(|row| row.author_id).collect();
        let author_names: HashMap<Uuid, Option<String>> = user::Entity::find()
            .filter(user::Column::Id.is_in(author_ids))
            .all(&self.db)
            .await
            .map_err(query_err)?
            .into_iter()
            .map(|row| (row.id, row.name))
            .collect();

        Ok(rows
            .into_iter()
            .map(|row| {
                // Reporting-language title, slug as a last resort.
                let title = titles.get(&row.id).cloned().unwrap_or_else(|| row.slug.clone());
                let author_name = author_names.get(&row.author_id).cloned().flatten();
                RecentArticle {
                    id: row.id,
                    slug: row.slug,
                    title,
                    status: ArticleStatus::from_str(&row.status).unwrap_or(ArticleStatus::Draft),
                    updated_at: row.updated_at.into(),
                    author_name,
                }
            })
            .collect())
    }

    /// Per-month creation counts over the trailing twelve months, bucketed
    /// in memory to stay backend-neutral.
    async fn articles_by_month(
        &self,
        scope: &DashboardScope,
    ) -> Result<Vec<MonthCount>, RepoError> {
        let now = Utc::now();
        let since = now
            .checked_sub_months(Months::new(TRAILING_MONTHS))
            .unwrap_or(now);

        let created: Vec<sea_orm::prelude::DateTimeWithTimeZone> = article::Entity::find()
            .filter(scope_condition(scope))
            .filter(article::Column::CreatedAt.gte(since))
            .select_only()
            .column(article::Column::CreatedAt)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(query_err)?;

        let mut buckets: BTreeMap<String, u64> = BTreeMap::new();
        for timestamp in created {
            *buckets.entry(timestamp.format("%Y-%m").to_string()).or_insert(0) += 1;
        }
        Ok(buckets
            .into_iter()
            .map(|(month, count)| MonthCount { month, count })
            .collect())
    }

    async fn categories_with_count(&self) -> Result<Vec<CategoryArticleCount>, RepoError> {
        let categories = category::Entity::find()
            .order_by_asc(category::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        let ids: Vec<Uuid> = categories.iter().map(|cat| cat.id).collect();
        let names: HashMap<Uuid, String> = category_locale::Entity::find()
            .filter(category_locale::Column::CategoryId.is_in(ids))
            .filter(category_locale::Column::Language.eq(Language::REPORTING.as_str()))
            .all(&self.db)
            .await
            .map_err(query_err)?
            .into_iter()
            .map(|row| (row.category_id, row.name))
            .collect();

        let counts = published_counts_by_category(&self.db).await?;

        Ok(categories
            .into_iter()
            .filter_map(|cat| {
                let name = names.get(&cat.id).cloned()?;
                Some(CategoryArticleCount {
                    id: cat.id,
                    slug: cat.slug,
                    name,
                    article_count: counts.get(&cat.id).copied().unwrap_or(0),
                })
            })
            .collect())
    }
}

fn scope_condition(scope: &DashboardScope) -> Condition {
    let mut cond = Condition::all();
    if let Some(author_id) = scope.author_id() {
        cond = cond.add(article::Column::AuthorId.eq(author_id));
    }
    cond
}

#[async_trait]
impl DashboardStore for PostgresDashboardStore {
    async fn stats(&self, scope: &DashboardScope) -> Result<DashboardStats, RepoError> {
        let total_articles = self.count_articles(scope, None).await?;
        let published_articles = self
            .count_articles(scope, Some(ArticleStatus::Published))
            .await?;
        let draft_articles = self.count_articles(scope, Some(ArticleStatus::Draft)).await?;
        let total_categories = category::Entity::find()
            .count(&self.db)
            .await
            .map_err(query_err)?;

        let recent_activity = self.recent_activity(scope).await?;
        let articles_by_month = self.articles_by_month(scope).await?;
        let categories_with_count = self.categories_with_count().await?;

        Ok(DashboardStats {
            overview: Overview {
                total_articles,
                published_articles,
                draft_articles,
                total_categories,
            },
            recent_activity,
            articles_by_month,
            categories_with_count,
        })
    }
}
