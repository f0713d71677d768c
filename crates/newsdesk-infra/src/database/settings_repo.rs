//! Postgres store for the singleton site-settings row.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DbConn, EntityTrait, Set};

use newsdesk_core::domain::SiteSettings;
use newsdesk_core::error::RepoError;
use newsdesk_core::ports::SettingsStore;

use super::entity::site_setting;
use super::{query_err, write_err};

pub struct PostgresSettingsStore {
    db: DbConn,
}

impl PostgresSettingsStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SettingsStore for PostgresSettingsStore {
    async fn load(&self) -> Result<Option<SiteSettings>, RepoError> {
        let row = site_setting::Entity::find_by_id(SiteSettings::SINGLETON_ID)
            .one(&self.db)
            .await
            .map_err(query_err)?;
        Ok(row.map(Into::into))
    }

    async fn save(&self, settings: &SiteSettings) -> Result<(), RepoError> {
        let now = Utc::now();
        let row = site_setting::ActiveModel {
            id: Set(SiteSettings::SINGLETON_ID.to_string()),
            site_name: Set(settings.site_name.clone()),
            default_language: Set(settings.default_language.as_str().to_string()),
            theme: Set(settings.theme.as_str().to_string()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        // The row is created lazily on the first write; later writes update
        // it in place.
        site_setting::Entity::insert(row)
            .on_conflict(
                OnConflict::column(site_setting::Column::Id)
                    .update_columns([
                        site_setting::Column::SiteName,
                        site_setting::Column::DefaultLanguage,
                        site_setting::Column::Theme,
                        site_setting::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(write_err)?;
        Ok(())
    }
}
