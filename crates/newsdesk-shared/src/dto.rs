//! Data Transfer Objects - request/response types for the API.
//!
//! Request bodies keep every field optional; handlers decide what is
//! required so that validation failures surface as envelope errors rather
//! than deserialization errors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to login with the administrator credential pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response containing the session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// One language-specific content block in an article payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleLocaleInput {
    pub language: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub meta_description: Option<String>,
}

/// Body of POST /api/articles and PUT /api/articles/{id}.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePayload {
    pub slug: Option<String>,
    pub status: Option<String>,
    pub featured: Option<bool>,
    pub locales: Option<Vec<ArticleLocaleInput>>,
    pub category_ids: Option<Vec<Uuid>>,
    pub published_at: Option<DateTime<Utc>>,
}

/// One localized name in a category payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryLocaleInput {
    pub language: Option<String>,
    pub name: Option<String>,
}

/// Body of POST /api/categories and PUT /api/categories/{id}.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryPayload {
    pub slug: Option<String>,
    pub locales: Option<Vec<CategoryLocaleInput>>,
}

/// Body of POST /api/users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
}

/// Body of PUT /api/settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPayload {
    pub site_name: Option<String>,
    pub default_language: Option<String>,
    pub theme: Option<String>,
}

/// Raw query string of GET /api/articles. Values stay strings so malformed
/// numbers coerce to defaults instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleListParams {
    pub language: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
    pub featured: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Raw query string of GET /api/categories.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryListParams {
    pub language: Option<String>,
    pub include_article_count: Option<String>,
}

/// Raw query string of GET /api/users.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub role: Option<String>,
    pub search: Option<String>,
}

/// Query string shared by single-resource fetches.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LanguageParam {
    pub language: Option<String>,
}

/// Pagination block attached to list responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total_count: u64,
    pub total_pages: u64,
}

/// `data` payload of the article listing.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleListData<T> {
    pub articles: Vec<T>,
    pub pagination: Pagination,
}

/// `data` payload of the user listing.
#[derive(Debug, Clone, Serialize)]
pub struct UserListData<T> {
    pub users: Vec<T>,
    pub pagination: Pagination,
}
