//! Defines the HTTP routes for registration, login and the current account.
//!
//! These routes are merged into the main Axum router.

use crate::auth::handlers::*;
use crate::auth::middleware::jwt_auth;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/users", post(register))
        .route("/login", post(login))
        .route("/me", get(me).layer(middleware::from_fn(jwt_auth)))
}
