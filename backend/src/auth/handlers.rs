//! Handler functions for the account endpoints.
//!
//! These functions parse request bodies, call into the account service over
//! the shared pool, and translate the outcome into an HTTP response.

use crate::api::common::{ApiError, service_error_to_http};
use crate::auth::models::*;
use crate::auth::password::PasswordHasher;
use crate::repositories::account_repository::AccountRepository;
use crate::services::account_service::{AccountService, current_account};
use crate::utils::jwt::{Claims, JwtUtils};
use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::Json as ResponseJson,
};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Handle account registration request
#[axum::debug_handler]
pub async fn register(
    Extension(pool): Extension<SqlitePool>,
    Extension(jwt_utils): Extension<Arc<JwtUtils>>,
    Extension(hasher): Extension<Arc<PasswordHasher>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, ResponseJson<AccountResponse>), ApiError> {
    let service = AccountService::new(AccountRepository::new(&pool), &hasher, &jwt_utils);

    match service.register(&payload.username, &payload.password).await {
        Ok(account) => Ok((StatusCode::CREATED, ResponseJson(account.into()))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(pool): Extension<SqlitePool>,
    Extension(jwt_utils): Extension<Arc<JwtUtils>>,
    Extension(hasher): Extension<Arc<PasswordHasher>>,
    Json(payload): Json<LoginRequest>,
) -> Result<ResponseJson<LoginResponse>, ApiError> {
    let service = AccountService::new(AccountRepository::new(&pool), &hasher, &jwt_utils);

    match service.login(&payload.username, &payload.password).await {
        Ok(issued) => Ok(ResponseJson(issued.into())),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Get the account behind the bearer token
#[axum::debug_handler]
pub async fn me(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
) -> Result<ResponseJson<AccountResponse>, ApiError> {
    match current_account(&AccountRepository::new(&pool), &claims).await {
        Ok(account) => Ok(ResponseJson(account.into())),
        Err(error) => Err(service_error_to_http(error)),
    }
}
