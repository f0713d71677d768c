//! Database connection management and Postgres store implementations.

mod article_repo;
mod category_repo;
mod connection;
mod dashboard_repo;
pub mod entity;
mod settings_repo;
mod user_repo;

pub use article_repo::PostgresArticleStore;
pub use category_repo::PostgresCategoryStore;
pub use connection::{DatabaseConfig, connect};
pub use dashboard_repo::PostgresDashboardStore;
pub use settings_repo::PostgresSettingsStore;
pub use user_repo::PostgresUserStore;

use newsdesk_core::error::RepoError;
use sea_orm::DbErr;

/// Map a query-path database error, keeping connection failures apart from
/// query failures.
pub(crate) fn query_err(e: DbErr) -> RepoError {
    match e {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(e.to_string()),
        _ => RepoError::Query(e.to_string()),
    }
}

/// Map a write-path database error, surfacing unique-constraint violations
/// separately. The unique index remains the backstop for the optimistic
/// pre-checks done by handlers.
pub(crate) fn write_err(e: DbErr) -> RepoError {
    if let DbErr::Conn(_) | DbErr::ConnectionAcquire(_) = e {
        return RepoError::Connection(e.to_string());
    }
    let text = e.to_string();
    if text.contains("duplicate") || text.contains("unique") {
        RepoError::Constraint("entity already exists".to_string())
    } else {
        RepoError::Query(text)
    }
}

#[cfg(test)]
mod tests;
