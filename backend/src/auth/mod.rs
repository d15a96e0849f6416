//! Authentication module for account registration, login and session tokens.
//!
//! This module provides the HTTP surface for the account service along with
//! the credential format rules it enforces.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod routes;
pub mod validation;
