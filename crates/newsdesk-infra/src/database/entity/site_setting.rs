//! Singleton site-settings row, keyed by a fixed id.

use sea_orm::entity::prelude::*;

use newsdesk_core::domain::{Language, SiteSettings, Theme};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "site_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub site_name: String,
    pub default_language: String,
    pub theme: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SiteSettings {
    fn from(model: Model) -> Self {
        Self {
            site_name: model.site_name,
            default_language: Language::from_str(&model.default_language)
                .unwrap_or(Language::DEFAULT),
            theme: Theme::from_str(&model.theme).unwrap_or(Theme::Light),
        }
    }
}
