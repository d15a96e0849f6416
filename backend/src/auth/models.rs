//! Request and response payloads for the account endpoints.

use crate::database::models::Account;
use crate::utils::jwt::IssuedToken;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Registration request payload
#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Login request payload
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Public view of an account; never carries the password hash.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            created_at: account.created_at,
        }
    }
}

/// Login response containing the session token
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl From<IssuedToken> for LoginResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            token: issued.token,
            expires_at: issued.expires_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password() {
        let request: LoginRequest =
            serde_json::from_str(r#"{"username":"player01","password":"hunter22"}"#).unwrap();
        let rendered = format!("{:?}", request);
        assert!(rendered.contains("player01"));
        assert!(!rendered.contains("hunter22"));
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let request: RegisterRequest = serde_json::from_str(r#"{"username":"player01"}"#).unwrap();
        assert_eq!(request.password, "");
    }

    #[test]
    fn test_account_response_omits_hash() {
        let account = Account {
            id: "0198-id".to_string(),
            username: "player01".to_string(),
            password_hash: "$2b$04$secret".to_string(),
            created_at: Utc::now(),
        };
        let body = serde_json::to_string(&AccountResponse::from(account)).unwrap();
        assert!(!body.contains("password"));
        assert!(!body.contains("$2b$"));
    }
}
