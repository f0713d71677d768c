//! Postgres user store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Cond, Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbConn, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use newsdesk_core::domain::{ArticleStatus, NewUser, User, UserPage, UserSummary};
use newsdesk_core::error::RepoError;
use newsdesk_core::ports::UserStore;
use newsdesk_core::query::UserQuery;

use super::entity::{article, user};
use super::{query_err, write_err};

pub struct PostgresUserStore {
    db: DbConn,
}

impl PostgresUserStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn list_conditions(query: &UserQuery) -> Condition {
    let mut cond = Condition::all();
    if let Some(role) = query.role {
        cond = cond.add(user::Column::Role.eq(role.as_str()));
    }
    if let Some(search) = &query.search {
        let pattern = format!("%{}%", search.to_lowercase());
        cond = cond.add(
            Cond::any()
                .add(Expr::expr(Func::lower(Expr::col(user::Column::Name))).like(pattern.as_str()))
                .add(
                    Expr::expr(Func::lower(Expr::col(user::Column::Email)))
                        .like(pattern.as_str()),
                ),
        );
    }
    cond
}

/// Mask an email for logging to avoid PII in logs.
fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) => {
            let (local, domain) = email.split_at(at_pos);
            if local.len() > 1 {
                format!("{}***{}", &local[..1], domain)
            } else {
                format!("***{domain}")
            }
        }
        None => "***".to_string(),
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let result = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;
        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn list(&self, query: &UserQuery) -> Result<UserPage, RepoError> {
        let cond = list_conditions(query);

        let total_count = user::Entity::find()
            .filter(cond.clone())
            .count(&self.db)
            .await
            .map_err(query_err)?;

        let rows = user::Entity::find()
            .filter(cond)
            .order_by_desc(user::Column::CreatedAt)
            .offset(query.offset())
            .limit(query.limit)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let published_counts: HashMap<Uuid, u64> = if ids.is_empty() {
            HashMap::new()
        } else {
            let counts: Vec<(Uuid, i64)> = article::Entity::find()
                .select_only()
                .column(article::Column::AuthorId)
                .column_as(
                    Expr::col((article::Entity, article::Column::Id)).count(),
                    "count",
                )
                .filter(article::Column::AuthorId.is_in(ids))
                .filter(article::Column::Status.eq(ArticleStatus::Published.as_str()))
                .group_by(article::Column::AuthorId)
                .into_tuple()
                .all(&self.db)
                .await
                .map_err(query_err)?;
            counts
                .into_iter()
                .map(|(id, count)| (id, count.max(0) as u64))
                .collect()
        };

        let users = rows
            .into_iter()
            .map(|row| {
                let published_article_count = published_counts.get(&row.id).copied().unwrap_or(0);
                let domain: User = row.into();
                UserSummary {
                    id: domain.id,
                    email: domain.email,
                    name: domain.name,
                    role: domain.role,
                    created_at: domain.created_at,
                    updated_at: domain.updated_at,
                    published_article_count,
                }
            })
            .collect();

        Ok(UserPage { users, total_count })
    }

    async fn create(&self, new: NewUser) -> Result<User, RepoError> {
        let now = Utc::now();
        let model = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(new.email),
            name: Set(new.name),
            role: Set(new.role.as_str().to_string()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&self.db)
        .await
        .map_err(write_err)?;
        Ok(model.into())
    }
}

#[cfg(test)]
mod tests {
    use super::mask_email;

    #[test]
    fn masks_local_part() {
        assert_eq!(mask_email("admin@news.com"), "a***@news.com");
        assert_eq!(mask_email("a@news.com"), "***@news.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }
}
