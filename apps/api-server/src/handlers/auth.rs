//! Registration and login.

use std::sync::Arc;

use actix_web::{HttpResponse, web};

use zerone_core::domain::NewUser;
use zerone_core::ports::{PasswordService, TokenService};
use zerone_shared::dto::{AuthResponse, LoginRequest, RegisterUserRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 8;

fn token_response(
    tokens: &Arc<dyn TokenService>,
    user_id: i64,
    email: &str,
) -> AppResult<AuthResponse> {
    let access_token = tokens.generate_token(user_id, email)?;

    Ok(AuthResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: tokens.expiration_seconds().max(0) as u64,
    })
}

/// POST /api/v1/auth/register
pub async fn register(
    state: web::Data<AppState>,
    tokens: web::Data<Arc<dyn TokenService>>,
    passwords: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let email = req.email.trim().to_lowercase();

    if !email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if state.users.find_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = passwords.hash(&req.password)?;
    let new_user = NewUser::new(email, password_hash, req.first_name, req.last_name)?;
    let user = state.users.insert(new_user).await?;
    tracing::info!(user_id = user.id, "User registered");

    Ok(HttpResponse::Created().json(token_response(&tokens, user.id, &user.email)?))
}

/// POST /api/v1/auth/login
pub async fn login(
    state: web::Data<AppState>,
    tokens: web::Data<Arc<dyn TokenService>>,
    passwords: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let email = req.email.trim().to_lowercase();

    let user = state
        .users
        .find_by_email(&email)
        .await?
        .filter(|user| !user.is_deleted)
        .ok_or(AppError::Unauthorized)?;

    if !passwords.verify(&req.password, &user.password_hash)? {
        tracing::debug!(user_id = user.id, "Login rejected");
        return Err(AppError::Unauthorized);
    }

    Ok(HttpResponse::Ok().json(token_response(&tokens, user.id, &user.email)?))
}
