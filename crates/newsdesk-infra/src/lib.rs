//! # Newsdesk Infrastructure
//!
//! Concrete implementations of the ports defined in `newsdesk-core`:
//! SeaORM/Postgres repositories, the JWT token service and database
//! connection lifecycle.

pub mod auth;
pub mod database;

pub use auth::JwtTokenService;
pub use sea_orm::DbErr;
pub use database::{
    DatabaseConfig, PostgresArticleStore, PostgresCategoryStore, PostgresDashboardStore,
    PostgresSettingsStore, PostgresUserStore, connect,
};
