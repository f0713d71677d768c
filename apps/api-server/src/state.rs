//! Application state - shared across all handlers.

use std::sync::Arc;

use newsdesk_core::ports::{ArticleStore, CategoryStore, DashboardStore, SettingsStore, UserStore};
use newsdesk_infra::{
    DbErr, PostgresArticleStore, PostgresCategoryStore, PostgresDashboardStore,
    PostgresSettingsStore, PostgresUserStore, connect,
};

use crate::config::{AdminCredentials, AppConfig};

/// Shared application state. The database handle is opened once at startup
/// and injected into every store.
#[derive(Clone)]
pub struct AppState {
    pub articles: Arc<dyn ArticleStore>,
    pub categories: Arc<dyn CategoryStore>,
    pub users: Arc<dyn UserStore>,
    pub settings: Arc<dyn SettingsStore>,
    pub dashboard: Arc<dyn DashboardStore>,
    pub admin: AdminCredentials,
    pub list_fallback: bool,
}

impl AppState {
    /// Build the application state with Postgres-backed stores.
    pub async fn new(config: &AppConfig) -> Result<Self, DbErr> {
        let db = connect(&config.database).await?;

        tracing::info!("Application state initialized");

        Ok(Self {
            articles: Arc::new(PostgresArticleStore::new(db.clone())),
            categories: Arc::new(PostgresCategoryStore::new(db.clone())),
            users: Arc::new(PostgresUserStore::new(db.clone())),
            settings: Arc::new(PostgresSettingsStore::new(db.clone())),
            dashboard: Arc::new(PostgresDashboardStore::new(db)),
            admin: config.admin.clone(),
            list_fallback: config.list_fallback,
        })
    }
}
