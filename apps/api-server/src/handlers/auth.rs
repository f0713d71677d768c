//! Authentication handlers.
//!
//! The back office deliberately runs on a single configured administrator
//! credential pair; no other login is ever accepted. The matching User row is
//! provisioned lazily on first successful login.

use actix_web::{HttpResponse, web};
use serde::Serialize;
use std::sync::Arc;

use newsdesk_core::domain::{NewUser, UserRole};
use newsdesk_core::ports::TokenService;
use newsdesk_shared::dto::{AuthResponse, LoginRequest};
use newsdesk_shared::ApiResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let email = req.email.trim().to_lowercase();
    let password = req.password.trim();

    if email != state.admin.email || password != state.admin.password {
        tracing::debug!("Rejected login attempt");
        return Err(AppError::Unauthorized);
    }

    // Provision the administrator row on first login
    let user = match state.users.find_by_email(&email).await? {
        Some(user) => user,
        None => {
            tracing::info!("Provisioning administrator account");
            state
                .users
                .create(NewUser {
                    email: email.clone(),
                    name: Some(state.admin.name.clone()),
                    role: UserRole::Admin,
                })
                .await?
        }
    };

    let token = token_service
        .generate_token(user.id, &user.email, user.role)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: token_service.expiration_seconds(),
    })))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MeResponse {
    id: String,
    email: String,
    role: UserRole,
}

/// GET /api/auth/me - Protected route
pub async fn me(identity: Identity) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::ok(MeResponse {
        id: identity.user_id.to_string(),
        email: identity.email,
        role: identity.role,
    })))
}
