//! Dashboard statistics handler.

use actix_web::{HttpResponse, web};

use newsdesk_core::domain::DashboardScope;
use newsdesk_shared::ApiResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/dashboard/stats
///
/// Administrators get sitewide numbers; everyone else sees only their own
/// articles. The role comes from the stored user row, not the token.
pub async fn stats(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_email(&identity.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let scope = DashboardScope::for_user(user.role, user.id);
    let stats = state.dashboard.stats(&scope).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(stats)))
}
