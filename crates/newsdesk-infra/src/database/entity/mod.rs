//! SeaORM entities mirroring the relational schema.

pub mod article;
pub mod article_category;
pub mod article_locale;
pub mod category;
pub mod category_locale;
pub mod site_setting;
pub mod user;
