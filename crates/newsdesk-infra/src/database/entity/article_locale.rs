//! Per-language article content rows.

use sea_orm::entity::prelude::*;

use newsdesk_core::domain::{ArticleLocale, Language, LocaleSummary};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "article_locales")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub article_id: Uuid,
    pub language: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub excerpt: Option<String>,
    pub meta_description: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::article::Entity",
        from = "Column::ArticleId",
        to = "super::article::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Article,
}

impl Related<super::article::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Article.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn language(&self) -> Language {
        Language::from_str(&self.language).unwrap_or(Language::DEFAULT)
    }
}

impl From<Model> for ArticleLocale {
    fn from(model: Model) -> Self {
        let language = model.language();
        Self {
            id: model.id,
            language,
            title: model.title,
            content: model.content,
            excerpt: model.excerpt,
            meta_description: model.meta_description,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<Model> for LocaleSummary {
    fn from(model: Model) -> Self {
        let language = model.language();
        Self {
            language,
            title: model.title,
            excerpt: model.excerpt,
            meta_description: model.meta_description,
        }
    }
}
