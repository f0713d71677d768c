//! Postgres article store: filtered listing plus full-replace mutations.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Cond, Expr, Func, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbConn, EntityTrait, IntoActiveModel, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use newsdesk_core::domain::{
    ArticleChanges, ArticleDetail, ArticlePage, ArticleSummary, AuthorRef, CategoryRef, Language,
    NewArticle,
};
use newsdesk_core::error::RepoError;
use newsdesk_core::ports::ArticleStore;
use newsdesk_core::query::{ArticleQuery, SortDirection, SortField};

use super::entity::{article, article_category, article_locale, category, category_locale, user};
use super::{query_err, write_err};

pub struct PostgresArticleStore {
    db: DbConn,
}

impl PostgresArticleStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// Recovers the connection so tests can inspect the mock transaction log.
    #[cfg(test)]
    pub(crate) fn into_db(self) -> DbConn {
        self.db
    }

    /// Category references (requested-language names) for a set of articles.
    async fn category_refs(
        &self,
        article_ids: &[Uuid],
        language: Language,
    ) -> Result<HashMap<Uuid, Vec<CategoryRef>>, RepoError> {
        if article_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let links = article_category::Entity::find()
            .filter(article_category::Column::ArticleId.is_in(article_ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(query_err)?;

        let category_ids: Vec<Uuid> = links
            .iter()
            .map(|link| link.category_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let categories = category::Entity::find()
            .filter(category::Column::Id.is_in(category_ids.clone()))
            .all(&self.db)
            .await
            .map_err(query_err)?;

        let names: HashMap<Uuid, String> = category_locale::Entity::find()
            .filter(category_locale::Column::CategoryId.is_in(category_ids))
            .filter(category_locale::Column::Language.eq(language.as_str()))
            .all(&self.db)
            .await
            .map_err(query_err)?
            .into_iter()
            .map(|row| (row.category_id, row.name))
            .collect();

        let refs: HashMap<Uuid, CategoryRef> = categories
            .into_iter()
            .map(|cat| {
                let name = names.get(&cat.id).cloned();
                (
                    cat.id,
                    CategoryRef {
                        id: cat.id,
                        slug: cat.slug,
                        name,
                    },
                )
            })
            .collect();

        let mut by_article: HashMap<Uuid, Vec<CategoryRef>> = HashMap::new();
        for link in links {
            if let Some(cat_ref) = refs.get(&link.category_id) {
                by_article
                    .entry(link.article_id)
                    .or_default()
                    .push(cat_ref.clone());
            }
        }
        Ok(by_article)
    }

    async fn author_refs(
        &self,
        author_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, AuthorRef>, RepoError> {
        if author_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let authors = user::Entity::find()
            .filter(user::Column::Id.is_in(author_ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(query_err)?;
        Ok(authors
            .into_iter()
            .map(|author| {
                (
                    author.id,
                    AuthorRef {
                        id: author.id,
                        name: author.name,
                    },
                )
            })
            .collect())
    }

    /// Assemble an ArticleDetail from a stored model. `locale_filter`
    /// restricts the attached locale rows; category names resolve in the
    /// same language (default language when unfiltered).
    async fn load_detail(
        &self,
        model: article::Model,
        locale_filter: Option<Language>,
    ) -> Result<ArticleDetail, RepoError> {
        let mut locale_query =
            article_locale::Entity::find().filter(article_locale::Column::ArticleId.eq(model.id));
        if let Some(language) = locale_filter {
            locale_query =
                locale_query.filter(article_locale::Column::Language.eq(language.as_str()));
        }
        let locales = locale_query.all(&self.db).await.map_err(query_err)?;

        let name_language = locale_filter.unwrap_or(Language::DEFAULT);
        let mut categories = self.category_refs(&[model.id], name_language).await?;
        let author = self
            .author_refs(&[model.author_id])
            .await?
            .remove(&model.author_id)
            .unwrap_or(AuthorRef {
                id: model.author_id,
                name: None,
            });

        Ok(ArticleDetail {
            id: model.id,
            slug: model.slug.clone(),
            status: model.status(),
            featured: model.featured,
            published_at: model.published_at.map(Into::into),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
            locales: locales.into_iter().map(Into::into).collect(),
            categories: categories.remove(&model.id).unwrap_or_default(),
            author,
        })
    }
}

/// Filter conditions for the listing. The requested-language presence check
/// is part of the condition so that the page and the total count agree.
fn list_conditions(query: &ArticleQuery) -> Condition {
    let mut cond = Condition::all().add(
        article::Column::Id.in_subquery(
            Query::select()
                .column(article_locale::Column::ArticleId)
                .from(article_locale::Entity)
                .and_where(article_locale::Column::Language.eq(query.language.as_str()))
                .to_owned(),
        ),
    );

    if let Some(status) = query.status {
        cond = cond.add(article::Column::Status.eq(status.as_str()));
    }
    if query.featured_only {
        cond = cond.add(article::Column::Featured.eq(true));
    }
    if let Some(slug) = &query.category_slug {
        cond = cond.add(
            article::Column::Id.in_subquery(
                Query::select()
                    .column(article_category::Column::ArticleId)
                    .from(article_category::Entity)
                    .inner_join(
                        category::Entity,
                        Expr::col((category::Entity, category::Column::Id)).equals((
                            article_category::Entity,
                            article_category::Column::CategoryId,
                        )),
                    )
                    .and_where(
                        Expr::col((category::Entity, category::Column::Slug)).eq(slug.as_str()),
                    )
                    .to_owned(),
            ),
        );
    }
    if let Some(search) = &query.search {
        let pattern = like_pattern(search);
        cond = cond.add(
            article::Column::Id.in_subquery(
                Query::select()
                    .column(article_locale::Column::ArticleId)
                    .from(article_locale::Entity)
                    .and_where(article_locale::Column::Language.eq(query.language.as_str()))
                    .cond_where(
                        Cond::any()
                            .add(
                                Expr::expr(Func::lower(Expr::col(article_locale::Column::Title)))
                                    .like(pattern.as_str()),
                            )
                            .add(
                                Expr::expr(Func::lower(Expr::col(
                                    article_locale::Column::Content,
                                )))
                                .like(pattern.as_str()),
                            )
                            .add(
                                Expr::expr(Func::lower(Expr::col(
                                    article_locale::Column::Excerpt,
                                )))
                                .like(pattern.as_str()),
                            ),
                    )
                    .to_owned(),
            ),
        );
    }
    cond
}

/// Case-insensitive substring pattern with LIKE metacharacters escaped.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn list_order(query: &ArticleQuery) -> (article::Column, Order) {
    let column = match query.sort.field {
        SortField::CreatedAt => article::Column::CreatedAt,
        SortField::PublishedAt => article::Column::PublishedAt,
    };
    let order = match query.sort.direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    };
    (column, order)
}

#[async_trait]
impl ArticleStore for PostgresArticleStore {
    async fn list(&self, query: &ArticleQuery) -> Result<ArticlePage, RepoError> {
        let cond = list_conditions(query);
        let (column, order) = list_order(query);

        let total_count = article::Entity::find()
            .filter(cond.clone())
            .count(&self.db)
            .await
            .map_err(query_err)?;

        let rows = article::Entity::find()
            .filter(cond)
            .order_by(column, order)
            .offset(query.offset())
            .limit(query.limit)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let author_ids: Vec<Uuid> = rows
            .iter()
            .map(|row| row.author_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let mut locales: HashMap<Uuid, article_locale::Model> = article_locale::Entity::find()
            .filter(article_locale::Column::ArticleId.is_in(ids.clone()))
            .filter(article_locale::Column::Language.eq(query.language.as_str()))
            .all(&self.db)
            .await
            .map_err(query_err)?
            .into_iter()
            .map(|row| (row.article_id, row))
            .collect();

        let mut categories = self.category_refs(&ids, query.language).await?;
        let authors = self.author_refs(&author_ids).await?;

        let articles = rows
            .into_iter()
            .filter_map(|row| {
                // The list condition guarantees a locale for each row.
                let locale = locales.remove(&row.id)?;
                let author = authors.get(&row.author_id).cloned().unwrap_or(AuthorRef {
                    id: row.author_id,
                    name: None,
                });
                Some(ArticleSummary {
                    id: row.id,
                    slug: row.slug.clone(),
                    status: row.status(),
                    featured: row.featured,
                    published_at: row.published_at.map(Into::into),
                    created_at: row.created_at.into(),
                    updated_at: row.updated_at.into(),
                    locale: locale.into(),
                    categories: categories.remove(&row.id).unwrap_or_default(),
                    author,
                })
            })
            .collect();

        Ok(ArticlePage {
            articles,
            total_count,
        })
    }

    async fn get(&self, id: Uuid, language: Language) -> Result<Option<ArticleDetail>, RepoError> {
        let Some(model) = article::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?
        else {
            return Ok(None);
        };
        self.load_detail(model, Some(language)).await.map(Some)
    }

    async fn get_full(&self, id: Uuid) -> Result<Option<ArticleDetail>, RepoError> {
        let Some(model) = article::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?
        else {
            return Ok(None);
        };
        self.load_detail(model, None).await.map(Some)
    }

    async fn slug_owner(&self, slug: &str) -> Result<Option<Uuid>, RepoError> {
        let owner = article::Entity::find()
            .filter(article::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(query_err)?;
        Ok(owner.map(|model| model.id))
    }

    async fn create(&self, new: NewArticle) -> Result<ArticleDetail, RepoError> {
        let txn = self.db.begin().await.map_err(query_err)?;
        let now = Utc::now();
        let id = Uuid::new_v4();

        let model = article::ActiveModel {
            id: Set(id),
            slug: Set(new.slug),
            status: Set(new.status.as_str().to_string()),
            featured: Set(new.featured),
            published_at: Set(new.published_at.map(Into::into)),
            author_id: Set(new.author_id),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&txn)
        .await
        .map_err(write_err)?;

        let locale_rows: Vec<article_locale::ActiveModel> = new
            .locales
            .into_iter()
            .map(|locale| article_locale::ActiveModel {
                id: Set(Uuid::new_v4()),
                article_id: Set(id),
                language: Set(locale.language.as_str().to_string()),
                title: Set(locale.title),
                content: Set(locale.content),
                excerpt: Set(locale.excerpt),
                meta_description: Set(locale.meta_description),
                created_at: Set(now.into()),
                updated_at: Set(now.into()),
            })
            .collect();
        if !locale_rows.is_empty() {
            article_locale::Entity::insert_many(locale_rows)
                .exec(&txn)
                .await
                .map_err(write_err)?;
        }

        let links: Vec<article_category::ActiveModel> = new
            .category_ids
            .into_iter()
            .map(|category_id| article_category::ActiveModel {
                article_id: Set(id),
                category_id: Set(category_id),
            })
            .collect();
        if !links.is_empty() {
            article_category::Entity::insert_many(links)
                .exec(&txn)
                .await
                .map_err(write_err)?;
        }

        txn.commit().await.map_err(query_err)?;
        self.load_detail(model, None).await
    }

    async fn update(&self, id: Uuid, changes: ArticleChanges) -> Result<ArticleDetail, RepoError> {
        let txn = self.db.begin().await.map_err(query_err)?;
        let now = Utc::now();

        let existing = article::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(query_err)?
            .ok_or(RepoError::NotFound)?;

        let mut active = existing.into_active_model();
        if let Some(slug) = changes.slug {
            active.slug = Set(slug);
        }
        if let Some(status) = changes.status {
            active.status = Set(status.as_str().to_string());
        }
        if let Some(featured) = changes.featured {
            active.featured = Set(featured);
        }
        active.published_at = Set(changes.published_at.map(Into::into));
        active.updated_at = Set(now.into());
        let model = active.update(&txn).await.map_err(write_err)?;

        // Full-replace semantics: the whole locale set is swapped, so locale
        // row ids are not stable across updates.
        if let Some(locales) = changes.locales {
            article_locale::Entity::delete_many()
                .filter(article_locale::Column::ArticleId.eq(id))
                .exec(&txn)
                .await
                .map_err(query_err)?;

            let rows: Vec<article_locale::ActiveModel> = locales
                .into_iter()
                .map(|locale| article_locale::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    article_id: Set(id),
                    language: Set(locale.language.as_str().to_string()),
                    title: Set(locale.title),
                    content: Set(locale.content),
                    excerpt: Set(locale.excerpt),
                    meta_description: Set(locale.meta_description),
                    created_at: Set(now.into()),
                    updated_at: Set(now.into()),
                })
                .collect();
            if !rows.is_empty() {
                article_locale::Entity::insert_many(rows)
                    .exec(&txn)
                    .await
                    .map_err(write_err)?;
            }
        }

        // Same clear-then-reconnect pattern for category associations.
        if let Some(category_ids) = changes.category_ids {
            article_category::Entity::delete_many()
                .filter(article_category::Column::ArticleId.eq(id))
                .exec(&txn)
                .await
                .map_err(query_err)?;

            let links: Vec<article_category::ActiveModel> = category_ids
                .into_iter()
                .map(|category_id| article_category::ActiveModel {
                    article_id: Set(id),
                    category_id: Set(category_id),
                })
                .collect();
            if !links.is_empty() {
                article_category::Entity::insert_many(links)
                    .exec(&txn)
                    .await
                    .map_err(write_err)?;
            }
        }

        txn.commit().await.map_err(query_err)?;
        self.load_detail(model, None).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        let result = article::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_err)?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn like_pattern_lowercases_and_escapes() {
        assert_eq!(like_pattern("Rust"), "%rust%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
    }
}
