//! Article handlers - public reads plus session-gated mutations.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use uuid::Uuid;

use newsdesk_core::domain::{
    ArticleChanges, ArticleStatus, ArticleSummary, AuthorRef, CategoryRef, Language, LocaleDraft,
    LocaleSummary, NewArticle, resolve_published_at, slugify,
};
use newsdesk_core::query::{ArticleQuery, ArticleSort, DEFAULT_LIMIT, DEFAULT_PAGE, coerce_page_value, total_pages};
use newsdesk_shared::dto::{
    ArticleListData, ArticleListParams, ArticleLocaleInput, ArticlePayload, LanguageParam,
    Pagination,
};
use newsdesk_shared::ApiResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/articles
pub async fn list(
    state: web::Data<AppState>,
    params: web::Query<ArticleListParams>,
) -> AppResult<HttpResponse> {
    let params = params.into_inner();
    let query = build_query(&params);

    let page = match state.articles.list(&query).await {
        Ok(page) => page,
        Err(e) if state.list_fallback => {
            tracing::warn!("Article listing degraded to sample data: {}", e);
            let articles = sample_articles(query.language);
            let total = articles.len() as u64;
            let data = ArticleListData {
                articles,
                pagination: Pagination {
                    page: DEFAULT_PAGE,
                    limit: DEFAULT_LIMIT,
                    total_count: total,
                    total_pages: total_pages(total, DEFAULT_LIMIT),
                },
            };
            return Ok(HttpResponse::Ok().json(ApiResponse::ok(data)));
        }
        Err(e) => return Err(e.into()),
    };

    let data = ArticleListData {
        articles: page.articles,
        pagination: Pagination {
            page: query.page,
            limit: query.limit,
            total_count: page.total_count,
            total_pages: total_pages(page.total_count, query.limit),
        },
    };

    Ok(HttpResponse::Ok().json(ApiResponse::ok(data)))
}

/// GET /api/articles/{id}
pub async fn get(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    params: web::Query<LanguageParam>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let language = Language::parse_or_default(params.language.as_deref());

    let detail = match state.articles.get(id, language).await? {
        Some(detail) if !detail.locales.is_empty() => detail,
        Some(_) => {
            // No content in the requested language; fall back to the first
            // stored locale.
            let mut full = state
                .articles
                .get_full(id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Article {id} not found")))?;
            if full.locales.is_empty() {
                return Err(AppError::NotFound(format!("Article {id} has no content")));
            }
            full.locales.truncate(1);
            full
        }
        None => return Err(AppError::NotFound(format!("Article {id} not found"))),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::ok(detail)))
}

/// POST /api/articles
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<ArticlePayload>,
) -> AppResult<HttpResponse> {
    let payload = body.into_inner();

    let slug = slugify(payload.slug.as_deref().unwrap_or(""));
    let locales = parse_locales(payload.locales.unwrap_or_default())?;
    let status = parse_status(payload.status.as_deref())?.unwrap_or(ArticleStatus::Draft);
    let published_at = resolve_published_at(status, None, payload.published_at, Utc::now());

    let article = NewArticle {
        slug,
        status,
        featured: payload.featured.unwrap_or(false),
        published_at,
        author_id: identity.user_id,
        locales,
        category_ids: payload.category_ids.unwrap_or_default(),
    };
    article.validate()?;

    // Pre-check; the unique index remains the backstop for races.
    if state.articles.slug_owner(&article.slug).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "An article with slug '{}' already exists",
            article.slug
        )));
    }

    let detail = state.articles.create(article).await?;
    tracing::info!(article_id = %detail.id, "Article created");

    Ok(HttpResponse::Created().json(ApiResponse::ok(detail)))
}

/// PUT /api/articles/{id}
pub async fn update(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<ArticlePayload>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let payload = body.into_inner();

    let existing = state
        .articles
        .get_full(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Article {id} not found")))?;

    let slug = match payload.slug {
        Some(raw) => {
            let slug = slugify(&raw);
            if slug.is_empty() {
                return Err(AppError::BadRequest("slug must not be empty".to_string()));
            }
            if slug != existing.slug {
                // Uniqueness against every other article; self is exempt.
                if let Some(owner) = state.articles.slug_owner(&slug).await? {
                    if owner != id {
                        return Err(AppError::Conflict(format!(
                            "An article with slug '{slug}' already exists"
                        )));
                    }
                }
            }
            Some(slug)
        }
        None => None,
    };

    // The publish transition is evaluated against the status the article will
    // have after the update, not only an explicitly supplied one.
    let status = parse_status(payload.status.as_deref())?;
    let effective_status = status.unwrap_or(existing.status);
    let published_at = resolve_published_at(
        effective_status,
        existing.published_at,
        payload.published_at,
        Utc::now(),
    );

    let changes = ArticleChanges {
        slug,
        status,
        featured: payload.featured,
        published_at,
        locales: payload.locales.map(parse_locales).transpose()?,
        category_ids: payload.category_ids,
    };
    changes.validate()?;

    let detail = state.articles.update(id, changes).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(detail)))
}

/// DELETE /api/articles/{id}
pub async fn delete(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    if !state.articles.delete(id).await? {
        return Err(AppError::NotFound(format!("Article {id} not found")));
    }
    tracing::info!(article_id = %id, "Article deleted");

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::message("Article deleted")))
}

/// Build the listing query from raw string parameters. Malformed values
/// coerce to defaults instead of failing the request.
fn build_query(params: &ArticleListParams) -> ArticleQuery {
    let mut query = ArticleQuery::new(Language::parse_or_default(params.language.as_deref()));
    query.page = coerce_page_value(params.page.as_deref(), DEFAULT_PAGE);
    query.limit = coerce_page_value(params.limit.as_deref(), DEFAULT_LIMIT);
    query.category_slug = params.category.clone().filter(|s| !s.is_empty());
    query.status = params.status.as_deref().and_then(ArticleStatus::from_str);
    query.search = params
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    query.featured_only = params.featured.as_deref() == Some("true");
    query.sort = ArticleSort::parse(params.sort_by.as_deref(), params.sort_order.as_deref());
    query
}

/// Convert request locale blocks into validated-shape drafts. The language
/// code must parse; empty titles and contents are caught by domain
/// validation afterwards.
fn parse_locales(inputs: Vec<ArticleLocaleInput>) -> Result<Vec<LocaleDraft>, AppError> {
    inputs
        .into_iter()
        .map(|input| {
            let language = input
                .language
                .as_deref()
                .and_then(Language::from_str)
                .ok_or_else(|| {
                    AppError::BadRequest("each locale requires a language (zh or en)".to_string())
                })?;
            Ok(LocaleDraft {
                language,
                title: input.title.unwrap_or_default(),
                content: input.content.unwrap_or_default(),
                excerpt: input.excerpt,
                meta_description: input.meta_description,
            })
        })
        .collect()
}

fn parse_status(raw: Option<&str>) -> Result<Option<ArticleStatus>, AppError> {
    match raw {
        None => Ok(None),
        Some(value) => ArticleStatus::from_str(value).map(Some).ok_or_else(|| {
            AppError::BadRequest(format!("unknown status '{value}'"))
        }),
    }
}

/// Built-in dataset served when the degraded listing mode is enabled and the
/// database is unreachable.
fn sample_articles(language: Language) -> Vec<ArticleSummary> {
    let now = Utc::now();
    let author = AuthorRef {
        id: Uuid::new_v4(),
        name: Some("新闻编辑部".to_string()),
    };
    let entries: [(&str, &str, &str, &str); 2] = [
        (
            "welcome-to-the-news-portal",
            "欢迎访问新闻门户",
            "Welcome to the News Portal",
            "news",
        ),
        (
            "site-maintenance-notice",
            "站点维护公告",
            "Site Maintenance Notice",
            "announcements",
        ),
    ];

    entries
        .iter()
        .map(|(slug, zh_title, en_title, category)| {
            let title = match language {
                Language::Zh => zh_title,
                Language::En => en_title,
            };
            ArticleSummary {
                id: Uuid::new_v4(),
                slug: (*slug).to_string(),
                status: ArticleStatus::Published,
                featured: false,
                published_at: Some(now),
                created_at: now,
                updated_at: now,
                locale: LocaleSummary {
                    language,
                    title: (*title).to_string(),
                    excerpt: None,
                    meta_description: None,
                },
                categories: vec![CategoryRef {
                    id: Uuid::new_v4(),
                    slug: (*category).to_string(),
                    name: None,
                }],
                author: author.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use newsdesk_core::domain::{
        ArticleDetail, ArticlePage, CategoryChanges, CategoryDetail, CategorySummary,
        DashboardScope, DashboardStats, NewCategory, NewUser, SiteSettings, User, UserPage,
        UserRole,
    };
    use newsdesk_core::error::RepoError;
    use newsdesk_core::ports::{
        ArticleStore, CategoryStore, DashboardStore, SettingsStore, UserStore,
    };
    use newsdesk_core::query::{SortDirection, SortField, UserQuery};

    use crate::config::AdminCredentials;

    use super::*;

    /// Canned article store for exercising the handler paths: one stored
    /// article plus a fixed owner for every slug lookup.
    struct CannedArticles {
        stored: Option<ArticleDetail>,
        slug_taken_by: Option<Uuid>,
    }

    #[async_trait]
    impl ArticleStore for CannedArticles {
        async fn list(&self, _query: &ArticleQuery) -> Result<ArticlePage, RepoError> {
            unimplemented!()
        }

        async fn get(
            &self,
            _id: Uuid,
            _language: Language,
        ) -> Result<Option<ArticleDetail>, RepoError> {
            unimplemented!()
        }

        async fn get_full(&self, _id: Uuid) -> Result<Option<ArticleDetail>, RepoError> {
            Ok(self.stored.clone())
        }

        async fn slug_owner(&self, _slug: &str) -> Result<Option<Uuid>, RepoError> {
            Ok(self.slug_taken_by)
        }

        async fn create(&self, _article: NewArticle) -> Result<ArticleDetail, RepoError> {
            self.stored.clone().ok_or(RepoError::NotFound)
        }

        async fn update(
            &self,
            _id: Uuid,
            _changes: ArticleChanges,
        ) -> Result<ArticleDetail, RepoError> {
            self.stored.clone().ok_or(RepoError::NotFound)
        }

        async fn delete(&self, _id: Uuid) -> Result<bool, RepoError> {
            unimplemented!()
        }
    }

    /// Placeholder for the store ports the article handlers never touch.
    struct Unused;

    #[async_trait]
    impl CategoryStore for Unused {
        async fn list(
            &self,
            _language: Language,
            _include_article_count: bool,
        ) -> Result<Vec<CategorySummary>, RepoError> {
            unimplemented!()
        }
        async fn get(
            &self,
            _id: Uuid,
            _language: Language,
        ) -> Result<Option<CategoryDetail>, RepoError> {
            unimplemented!()
        }
        async fn get_full(&self, _id: Uuid) -> Result<Option<CategoryDetail>, RepoError> {
            unimplemented!()
        }
        async fn slug_owner(&self, _slug: &str) -> Result<Option<Uuid>, RepoError> {
            unimplemented!()
        }
        async fn create(&self, _category: NewCategory) -> Result<CategoryDetail, RepoError> {
            unimplemented!()
        }
        async fn update(
            &self,
            _id: Uuid,
            _changes: CategoryChanges,
        ) -> Result<CategoryDetail, RepoError> {
            unimplemented!()
        }
        async fn article_count(&self, _id: Uuid) -> Result<u64, RepoError> {
            unimplemented!()
        }
        async fn delete(&self, _id: Uuid) -> Result<bool, RepoError> {
            unimplemented!()
        }
    }

    #[async_trait]
    impl UserStore for Unused {
        async fn find_by_id(&self, _id: Uuid) -> Result<Option<User>, RepoError> {
            unimplemented!()
        }
        async fn find_by_email(&self, _email: &str) -> Result<Option<User>, RepoError> {
            unimplemented!()
        }
        async fn list(&self, _query: &UserQuery) -> Result<UserPage, RepoError> {
            unimplemented!()
        }
        async fn create(&self, _user: NewUser) -> Result<User, RepoError> {
            unimplemented!()
        }
    }

    #[async_trait]
    impl SettingsStore for Unused {
        async fn load(&self) -> Result<Option<SiteSettings>, RepoError> {
            unimplemented!()
        }
        async fn save(&self, _settings: &SiteSettings) -> Result<(), RepoError> {
            unimplemented!()
        }
    }

    #[async_trait]
    impl DashboardStore for Unused {
        async fn stats(&self, _scope: &DashboardScope) -> Result<DashboardStats, RepoError> {
            unimplemented!()
        }
    }

    fn state_with(articles: CannedArticles) -> web::Data<AppState> {
        web::Data::new(AppState {
            articles: Arc::new(articles),
            categories: Arc::new(Unused),
            users: Arc::new(Unused),
            settings: Arc::new(Unused),
            dashboard: Arc::new(Unused),
            admin: AdminCredentials {
                email: "admin@news.com".to_string(),
                password: "admin123".to_string(),
                name: "系统管理员".to_string(),
            },
            list_fallback: false,
        })
    }

    fn admin_identity() -> Identity {
        Identity {
            user_id: Uuid::new_v4(),
            email: "admin@news.com".to_string(),
            role: UserRole::Admin,
        }
    }

    fn stored_article(id: Uuid, slug: &str) -> ArticleDetail {
        let now = Utc::now();
        ArticleDetail {
            id,
            slug: slug.to_string(),
            status: ArticleStatus::Draft,
            featured: false,
            published_at: None,
            created_at: now,
            updated_at: now,
            locales: vec![],
            categories: vec![],
            author: AuthorRef {
                id: Uuid::new_v4(),
                name: None,
            },
        }
    }

    fn payload_with_slug(slug: &str) -> ArticlePayload {
        ArticlePayload {
            slug: Some(slug.to_string()),
            locales: Some(vec![ArticleLocaleInput {
                language: Some("zh".to_string()),
                title: Some("标题".to_string()),
                content: Some("正文".to_string()),
                excerpt: None,
                meta_description: None,
            }]),
            ..Default::default()
        }
    }

    #[actix_web::test]
    async fn create_refuses_a_taken_slug() {
        let taken_by = Uuid::new_v4();
        let state = state_with(CannedArticles {
            stored: Some(stored_article(taken_by, "hello-world")),
            slug_taken_by: Some(taken_by),
        });

        let err = create(state, admin_identity(), web::Json(payload_with_slug("Hello World")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[actix_web::test]
    async fn update_refuses_a_slug_owned_elsewhere() {
        let id = Uuid::new_v4();
        let other = Uuid::new_v4();
        let state = state_with(CannedArticles {
            stored: Some(stored_article(id, "first-post")),
            slug_taken_by: Some(other),
        });

        let err = update(
            state,
            admin_identity(),
            web::Path::from(id),
            web::Json(payload_with_slug("Second Post")),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[actix_web::test]
    async fn update_checks_the_slug_against_the_current_row() {
        // Resubmitting the slug the article already carries must not trip the
        // uniqueness check, whatever the lookup would say.
        let id = Uuid::new_v4();
        let state = state_with(CannedArticles {
            stored: Some(stored_article(id, "first-post")),
            slug_taken_by: Some(Uuid::new_v4()),
        });

        let response = update(
            state,
            admin_identity(),
            web::Path::from(id),
            web::Json(payload_with_slug("First Post")),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), actix_web::http::StatusCode::OK);
    }

    #[test]
    fn build_query_coerces_malformed_values() {
        let params = ArticleListParams {
            language: Some("fr".to_string()),
            page: Some("abc".to_string()),
            limit: Some("0".to_string()),
            status: Some("BOGUS".to_string()),
            featured: Some("yes".to_string()),
            ..Default::default()
        };
        let query = build_query(&params);
        assert_eq!(query.language, Language::Zh);
        assert_eq!(query.page, DEFAULT_PAGE);
        assert_eq!(query.limit, DEFAULT_LIMIT);
        assert_eq!(query.status, None);
        assert!(!query.featured_only);
    }

    #[test]
    fn build_query_passes_recognized_filters() {
        let params = ArticleListParams {
            language: Some("en".to_string()),
            category: Some("tech".to_string()),
            status: Some("PUBLISHED".to_string()),
            search: Some("  rust  ".to_string()),
            featured: Some("true".to_string()),
            sort_by: Some("publishedAt".to_string()),
            sort_order: Some("asc".to_string()),
            ..Default::default()
        };
        let query = build_query(&params);
        assert_eq!(query.language, Language::En);
        assert_eq!(query.category_slug.as_deref(), Some("tech"));
        assert_eq!(query.status, Some(ArticleStatus::Published));
        assert_eq!(query.search.as_deref(), Some("rust"));
        assert!(query.featured_only);
        assert_eq!(query.sort.field, SortField::PublishedAt);
        assert_eq!(query.sort.direction, SortDirection::Asc);
    }

    #[test]
    fn locale_inputs_need_a_known_language() {
        let result = parse_locales(vec![ArticleLocaleInput {
            language: Some("de".to_string()),
            title: Some("Titel".to_string()),
            content: Some("Inhalt".to_string()),
            excerpt: None,
            meta_description: None,
        }]);
        assert!(result.is_err());
    }

    #[test]
    fn sample_dataset_resolves_titles_per_language() {
        let zh = sample_articles(Language::Zh);
        let en = sample_articles(Language::En);
        assert_eq!(zh.len(), en.len());
        assert_eq!(zh[0].locale.title, "欢迎访问新闻门户");
        assert_eq!(en[0].locale.title, "Welcome to the News Portal");
        assert!(zh.iter().all(|a| a.status == ArticleStatus::Published));
    }
}
