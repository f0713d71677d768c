//! User administration handlers. ADMIN only.

use actix_web::{HttpResponse, web};

use newsdesk_core::domain::{NewUser, UserRole};
use newsdesk_core::query::{DEFAULT_LIMIT, DEFAULT_PAGE, UserQuery, coerce_page_value, total_pages};
use newsdesk_shared::dto::{CreateUserRequest, Pagination, UserListData, UserListParams};
use newsdesk_shared::ApiResponse;

use crate::middleware::auth::{Identity, require_admin};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/users
pub async fn list(
    state: web::Data<AppState>,
    identity: Identity,
    params: web::Query<UserListParams>,
) -> AppResult<HttpResponse> {
    require_admin(&state, &identity).await?;

    let params = params.into_inner();
    let query = UserQuery {
        page: coerce_page_value(params.page.as_deref(), DEFAULT_PAGE),
        limit: coerce_page_value(params.limit.as_deref(), DEFAULT_LIMIT),
        role: params.role.as_deref().and_then(UserRole::from_str),
        search: params
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    };

    let page = state.users.list(&query).await?;
    let data = UserListData {
        users: page.users,
        pagination: Pagination {
            page: query.page,
            limit: query.limit,
            total_count: page.total_count,
            total_pages: total_pages(page.total_count, query.limit),
        },
    };

    Ok(HttpResponse::Ok().json(ApiResponse::ok(data)))
}

/// POST /api/users
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateUserRequest>,
) -> AppResult<HttpResponse> {
    require_admin(&state, &identity).await?;

    let req = body.into_inner();
    let email = req
        .email
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
        .ok_or_else(|| AppError::BadRequest("email is required".to_string()))?;

    let role = match req.role.as_deref() {
        None => UserRole::Editor,
        Some(raw) => UserRole::from_str(raw)
            .ok_or_else(|| AppError::BadRequest(format!("unknown role '{raw}'")))?,
    };

    if state.users.find_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "A user with email '{email}' already exists"
        )));
    }

    let user = state
        .users
        .create(NewUser {
            email,
            name: req.name.filter(|n| !n.trim().is_empty()),
            role,
        })
        .await?;
    tracing::info!(user_id = %user.id, "User created");

    Ok(HttpResponse::Created().json(ApiResponse::ok(user)))
}
