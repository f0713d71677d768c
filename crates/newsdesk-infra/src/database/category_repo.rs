//! Postgres category store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, IntoActiveModel, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use uuid::Uuid;

use newsdesk_core::domain::{
    ArticleStatus, CategoryChanges, CategoryDetail, CategorySummary, Language, NewCategory,
};
use newsdesk_core::error::RepoError;
use newsdesk_core::ports::CategoryStore;

use super::entity::{article, article_category, category, category_locale};
use super::{query_err, write_err};

pub struct PostgresCategoryStore {
    db: DbConn,
}

impl PostgresCategoryStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    async fn load_detail(
        &self,
        model: category::Model,
        locale_filter: Option<Language>,
        with_count: bool,
    ) -> Result<CategoryDetail, RepoError> {
        let mut locale_query = category_locale::Entity::find()
            .filter(category_locale::Column::CategoryId.eq(model.id));
        if let Some(language) = locale_filter {
            locale_query =
                locale_query.filter(category_locale::Column::Language.eq(language.as_str()));
        }
        let locales = locale_query.all(&self.db).await.map_err(query_err)?;

        let published_article_count = if with_count {
            Some(
                published_counts_by_category(&self.db)
                    .await?
                    .get(&model.id)
                    .copied()
                    .unwrap_or(0),
            )
        } else {
            None
        };

        Ok(CategoryDetail {
            id: model.id,
            slug: model.slug,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
            locales: locales.into_iter().map(Into::into).collect(),
            published_article_count,
        })
    }
}

/// PUBLISHED-article count per category, computed with one grouped query.
pub(crate) async fn published_counts_by_category(
    db: &DbConn,
) -> Result<HashMap<Uuid, u64>, RepoError> {
    let rows: Vec<(Uuid, i64)> = article_category::Entity::find()
        .select_only()
        .column(article_category::Column::CategoryId)
        .column_as(
            Expr::col((
                article_category::Entity,
                article_category::Column::ArticleId,
            ))
            .count(),
            "count",
        )
        .join(JoinType::InnerJoin, article_category::Relation::Article.def())
        .filter(article::Column::Status.eq(ArticleStatus::Published.as_str()))
        .group_by(article_category::Column::CategoryId)
        .into_tuple()
        .all(db)
        .await
        .map_err(query_err)?;

    Ok(rows
        .into_iter()
        .map(|(id, count)| (id, count.max(0) as u64))
        .collect())
}

#[async_trait]
impl CategoryStore for PostgresCategoryStore {
    async fn list(
        &self,
        language: Language,
        include_article_count: bool,
    ) -> Result<Vec<CategorySummary>, RepoError> {
        let categories = category::Entity::find()
            .order_by_asc(category::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        let ids: Vec<Uuid> = categories.iter().map(|cat| cat.id).collect();
        let names: HashMap<Uuid, String> = category_locale::Entity::find()
            .filter(category_locale::Column::CategoryId.is_in(ids))
            .filter(category_locale::Column::Language.eq(language.as_str()))
            .all(&self.db)
            .await
            .map_err(query_err)?
            .into_iter()
            .map(|row| (row.category_id, row.name))
            .collect();

        let counts = if include_article_count {
            Some(published_counts_by_category(&self.db).await?)
        } else {
            None
        };

        // Categories without a name in the requested language are dropped,
        // matching the article listing's locale policy.
        Ok(categories
            .into_iter()
            .filter_map(|cat| {
                let name = names.get(&cat.id).cloned()?;
                let article_count = counts
                    .as_ref()
                    .map(|counts| counts.get(&cat.id).copied().unwrap_or(0));
                Some(CategorySummary {
                    id: cat.id,
                    slug: cat.slug,
                    name,
                    article_count,
                    created_at: cat.created_at.into(),
                })
            })
            .collect())
    }

    async fn get(
        &self,
        id: Uuid,
        language: Language,
    ) -> Result<Option<CategoryDetail>, RepoError> {
        let Some(model) = category::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?
        else {
            return Ok(None);
        };
        self.load_detail(model, Some(language), true).await.map(Some)
    }

    async fn get_full(&self, id: Uuid) -> Result<Option<CategoryDetail>, RepoError> {
        let Some(model) = category::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?
        else {
            return Ok(None);
        };
        self.load_detail(model, None, true).await.map(Some)
    }

    async fn slug_owner(&self, slug: &str) -> Result<Option<Uuid>, RepoError> {
        let owner = category::Entity::find()
            .filter(category::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(query_err)?;
        Ok(owner.map(|model| model.id))
    }

    async fn create(&self, new: NewCategory) -> Result<CategoryDetail, RepoError> {
        let txn = self.db.begin().await.map_err(query_err)?;
        let now = Utc::now();
        let id = Uuid::new_v4();

        let model = category::ActiveModel {
            id: Set(id),
            slug: Set(new.slug),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&txn)
        .await
        .map_err(write_err)?;

        let rows: Vec<category_locale::ActiveModel> = new
            .locales
            .into_iter()
            .map(|locale| category_locale::ActiveModel {
                id: Set(Uuid::new_v4()),
                category_id: Set(id),
                language: Set(locale.language.as_str().to_string()),
                name: Set(locale.name),
                created_at: Set(now.into()),
                updated_at: Set(now.into()),
            })
            .collect();
        if !rows.is_empty() {
            category_locale::Entity::insert_many(rows)
                .exec(&txn)
                .await
                .map_err(write_err)?;
        }

        txn.commit().await.map_err(query_err)?;
        self.load_detail(model, None, false).await
    }

    async fn update(
        &self,
        id: Uuid,
        changes: CategoryChanges,
    ) -> Result<CategoryDetail, RepoError> {
        let txn = self.db.begin().await.map_err(query_err)?;
        let now = Utc::now();

        let existing = category::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(query_err)?
            .ok_or(RepoError::NotFound)?;

        let mut active = existing.into_active_model();
        if let Some(slug) = changes.slug {
            active.slug = Set(slug);
        }
        active.updated_at = Set(now.into());
        let model = active.update(&txn).await.map_err(write_err)?;

        // Full-replace of the localized names.
        if let Some(locales) = changes.locales {
            category_locale::Entity::delete_many()
                .filter(category_locale::Column::CategoryId.eq(id))
                .exec(&txn)
                .await
                .map_err(query_err)?;

            let rows: Vec<category_locale::ActiveModel> = locales
                .into_iter()
                .map(|locale| category_locale::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    category_id: Set(id),
                    language: Set(locale.language.as_str().to_string()),
                    name: Set(locale.name),
                    created_at: Set(now.into()),
                    updated_at: Set(now.into()),
                })
                .collect();
            if !rows.is_empty() {
                category_locale::Entity::insert_many(rows)
                    .exec(&txn)
                    .await
                    .map_err(write_err)?;
            }
        }

        txn.commit().await.map_err(query_err)?;
        self.load_detail(model, None, false).await
    }

    async fn article_count(&self, id: Uuid) -> Result<u64, RepoError> {
        article_category::Entity::find()
            .filter(article_category::Column::CategoryId.eq(id))
            .count(&self.db)
            .await
            .map_err(query_err)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        let result = category::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_err)?;
        Ok(result.rows_affected > 0)
    }
}
