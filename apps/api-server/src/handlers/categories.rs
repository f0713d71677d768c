//! Category handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use newsdesk_core::domain::{CategoryChanges, CategoryLocaleDraft, Language, NewCategory, slugify};
use newsdesk_core::error::DomainError;
use newsdesk_shared::dto::{CategoryListParams, CategoryLocaleInput, CategoryPayload, LanguageParam};
use newsdesk_shared::ApiResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/categories
pub async fn list(
    state: web::Data<AppState>,
    params: web::Query<CategoryListParams>,
) -> AppResult<HttpResponse> {
    let params = params.into_inner();
    let language = Language::parse_or_default(params.language.as_deref());
    let include_count = params.include_article_count.as_deref() == Some("true");

    let categories = state.categories.list(language, include_count).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(categories)))
}

/// GET /api/categories/{id}
pub async fn get(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    params: web::Query<LanguageParam>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let language = Language::parse_or_default(params.language.as_deref());

    let detail = match state.categories.get(id, language).await? {
        Some(detail) if !detail.locales.is_empty() => detail,
        Some(_) => {
            let mut full = state
                .categories
                .get_full(id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Category {id} not found")))?;
            full.locales.truncate(1);
            full
        }
        None => return Err(AppError::NotFound(format!("Category {id} not found"))),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::ok(detail)))
}

/// POST /api/categories
pub async fn create(
    state: web::Data<AppState>,
    _identity: Identity,
    body: web::Json<CategoryPayload>,
) -> AppResult<HttpResponse> {
    let payload = body.into_inner();

    let category = NewCategory {
        slug: slugify(payload.slug.as_deref().unwrap_or("")),
        locales: parse_locales(payload.locales.unwrap_or_default())?,
    };
    category.validate()?;

    if state.categories.slug_owner(&category.slug).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "A category with slug '{}' already exists",
            category.slug
        )));
    }

    let detail = state.categories.create(category).await?;
    tracing::info!(category_id = %detail.id, "Category created");

    Ok(HttpResponse::Created().json(ApiResponse::ok(detail)))
}

/// PUT /api/categories/{id}
pub async fn update(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CategoryPayload>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let payload = body.into_inner();

    let existing = state
        .categories
        .get_full(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category {id} not found")))?;

    let slug = match payload.slug {
        Some(raw) => {
            let slug = slugify(&raw);
            if slug.is_empty() {
                return Err(AppError::BadRequest("slug must not be empty".to_string()));
            }
            if slug != existing.slug {
                if let Some(owner) = state.categories.slug_owner(&slug).await? {
                    if owner != id {
                        return Err(AppError::Conflict(format!(
                            "A category with slug '{slug}' already exists"
                        )));
                    }
                }
            }
            Some(slug)
        }
        None => None,
    };

    let changes = CategoryChanges {
        slug,
        locales: payload.locales.map(parse_locales).transpose()?,
    };
    changes.validate()?;

    let detail = state.categories.update(id, changes).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(detail)))
}

/// DELETE /api/categories/{id}
pub async fn delete(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    // Refuse while any article, of any status, still references the category.
    let in_use = state.categories.article_count(id).await?;
    if in_use > 0 {
        return Err(DomainError::CategoryInUse { count: in_use }.into());
    }

    if !state.categories.delete(id).await? {
        return Err(AppError::NotFound(format!("Category {id} not found")));
    }
    tracing::info!(category_id = %id, "Category deleted");

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::message("Category deleted")))
}

fn parse_locales(inputs: Vec<CategoryLocaleInput>) -> Result<Vec<CategoryLocaleDraft>, AppError> {
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
            Ok(CategoryLocaleDraft {
                language,
                name: input.name.unwrap_or_default(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_inputs_need_a_known_language() {
        let result = parse_locales(vec![CategoryLocaleInput {
            language: None,
            name: Some("科技".to_string()),
        }]);
        assert!(result.is_err());
    }

    #[test]
    fn locale_inputs_parse_known_languages() {
        let drafts = parse_locales(vec![
            CategoryLocaleInput {
                language: Some("zh".to_string()),
                name: Some("科技".to_string()),
            },
            CategoryLocaleInput {
                language: Some("en".to_string()),
                name: Some("Tech".to_string()),
            },
        ])
        .unwrap();
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].language, Language::Zh);
        assert_eq!(drafts[1].name, "Tech");
    }
}
