//! Application configuration loaded from environment variables.

use std::env;

use newsdesk_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub admin: AdminCredentials,
    /// When set, a database error in the public article-list path degrades
    /// to a built-in sample dataset instead of a 500. Off by default.
    pub list_fallback: bool,
}

/// The single administrator credential pair the login endpoint accepts.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = DatabaseConfig {
            url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/newsdesk".to_string()),
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        };

        let admin = AdminCredentials {
            email: env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@news.com".to_string())
                .to_lowercase(),
            password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string()),
            name: env::var("ADMIN_NAME").unwrap_or_else(|_| "系统管理员".to_string()),
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            admin,
            list_fallback: env_flag("ARTICLE_LIST_FALLBACK"),
        }
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
