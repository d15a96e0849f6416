//! Middleware for protecting authenticated routes.
//!
//! Validates the bearer token on the request and exposes its claims to
//! downstream handlers through request extensions.

use crate::api::common::{ApiError, ErrorResponse, service_error_to_http};
use crate::errors::ServiceError;
use crate::utils::jwt::JwtUtils;
use axum::{
    extract::Request,
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::{Json, Response},
};
use std::sync::Arc;

/// JWT authentication middleware
pub async fn jwt_auth(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let Some(jwt_utils) = request.extensions().get::<Arc<JwtUtils>>().cloned() else {
        tracing::error!("JwtUtils extension missing from router");
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("Internal server error")),
        ));
    };

    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .ok_or_else(|| service_error_to_http(ServiceError::InvalidToken))?;

    let claims = jwt_utils
        .validate_token(token)
        .map_err(service_error_to_http)?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
