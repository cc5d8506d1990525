//! User profiles.

use actix_web::{HttpResponse, web};

use zerone_core::DomainError;
use zerone_core::domain::User;
use zerone_shared::CommonResponse;
use zerone_shared::dto::UpdateProfileRequest;

use crate::mapper::user_response;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// A live account; deleted accounts read as missing.
async fn load_user(state: &AppState, id: i64) -> AppResult<User> {
    let user = state
        .users
        .find_by_id(id)
        .await?
        .filter(|user| !user.is_deleted)
        .ok_or_else(|| DomainError::not_found("User", id))?;
    Ok(user)
}

/// GET /api/v1/users/me
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = load_user(&state, identity.user_id).await?;
    Ok(HttpResponse::Ok().json(CommonResponse::now(user_response(user))))
}

/// PUT /api/v1/users/me
pub async fn update_me(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<UpdateProfileRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let mut user = load_user(&state, identity.user_id).await?;

    user.rename(req.first_name, req.last_name)?;
    let user = state.users.save(user).await?;
    tracing::info!(user_id = user.id, "Profile updated");

    Ok(HttpResponse::Ok().json(CommonResponse::now(user_response(user))))
}

/// DELETE /api/v1/users/me
pub async fn delete_me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let mut user = load_user(&state, identity.user_id).await?;

    user.mark_deleted();
    let user = state.users.save(user).await?;
    tracing::info!(user_id = user.id, "Account deleted");

    Ok(HttpResponse::Ok().json(CommonResponse::now(user_response(user))))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let user = load_user(&state, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(CommonResponse::now(user_response(user))))
}
