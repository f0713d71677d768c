//! Article entity for SeaORM.

use sea_orm::entity::prelude::*;

use newsdesk_core::domain::ArticleStatus;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "articles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub slug: String,
    pub status: String,
    pub featured: bool,
    pub published_at: Option<DateTimeWithTimeZone>,
    pub author_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Author,
    #[sea_orm(has_many = "super::article_locale::Entity")]
    Locale,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::article_locale::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Locale.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        super::article_category::Relation::Category.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::article_category::Relation::Article.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn status(&self) -> ArticleStatus {
        ArticleStatus::from_str(&self.status).unwrap_or(ArticleStatus::Draft)
    }
}
