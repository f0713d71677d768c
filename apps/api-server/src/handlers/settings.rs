//! Site settings handlers. ADMIN only.

use actix_web::{HttpResponse, web};

use newsdesk_core::domain::{Language, SiteSettings, Theme};
use newsdesk_shared::dto::SettingsPayload;
use newsdesk_shared::ApiResponse;

use crate::middleware::auth::{Identity, require_admin};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/settings
pub async fn get(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    require_admin(&state, &identity).await?;

    // Defaults apply until the first write creates the row.
    let settings = state.settings.load().await?.unwrap_or_default();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(settings)))
}

/// PUT /api/settings
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<SettingsPayload>,
) -> AppResult<HttpResponse> {
    require_admin(&state, &identity).await?;

    let payload = body.into_inner();

    let site_name = payload
        .site_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("siteName is required".to_string()))?
        .to_string();

    let default_language = payload
        .default_language
        .as_deref()
        .and_then(Language::from_str)
        .ok_or_else(|| {
            AppError::BadRequest("defaultLanguage must be 'zh' or 'en'".to_string())
        })?;

    let theme = payload
        .theme
        .as_deref()
        .and_then(Theme::from_str)
        .ok_or_else(|| AppError::BadRequest("theme must be 'light' or 'dark'".to_string()))?;

    let settings = SiteSettings {
        site_name,
        default_language,
        theme,
    };
    state.settings.save(&settings).await?;
    tracing::info!("Site settings saved");

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(settings, "Settings saved")))
}
