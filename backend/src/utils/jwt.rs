//! JWT token utilities for session tokens.
//!
//! Tokens are HS256-signed and stateless: a token is valid while its
//! signature checks out and its `exp` lies in the future.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::errors::{ServiceError, ServiceResult};

/// Largest lifetime a chrono `Duration` can represent, in seconds.
const MAX_EXPIRES_IN_SECONDS: u64 = i64::MAX as u64 / 1000;

/// Claims carried by a session token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Username
    pub sub: String,
    /// Token issued at timestamp
    pub iat: i64,
    /// Token expiration timestamp
    pub exp: i64,
}

impl Claims {
    pub fn username(&self) -> &str {
        &self.sub
    }

    /// Expired once `now` reaches `exp`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// A freshly signed token together with its expiry.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// JWT token utility for creating and validating tokens
pub struct JwtUtils {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in: Duration,
}

impl JwtUtils {
    pub fn new(secret: &str, expires_in_seconds: u64) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        // Expiry is checked against an explicit clock in `validate_token_at`.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        JwtUtils {
            encoding_key,
            decoding_key,
            validation,
            expires_in: Duration::seconds(expires_in_seconds.min(MAX_EXPIRES_IN_SECONDS) as i64),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.jwt_secret, config.jwt_expires_in_seconds)
    }

    /// Signs a token for `username`, valid from now.
    pub fn generate_token(&self, username: &str) -> ServiceResult<IssuedToken> {
        self.generate_token_at(username, Utc::now())
    }

    /// Signs a token for `username` as if issued at `issued_at`.
    pub fn generate_token_at(
        &self,
        username: &str,
        issued_at: DateTime<Utc>,
    ) -> ServiceResult<IssuedToken> {
        let expires_at = issued_at
            .checked_add_signed(self.expires_in)
            .ok_or_else(|| ServiceError::signing("token expiry out of range"))?;

        let claims = Claims {
            sub: username.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::signing(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Validate and decode a token against the current time.
    pub fn validate_token(&self, token: &str) -> ServiceResult<Claims> {
        self.validate_token_at(token, Utc::now())
    }

    /// Validate and decode a token against `now`.
    pub fn validate_token_at(&self, token: &str, now: DateTime<Utc>) -> ServiceResult<Claims> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| {
                tracing::debug!("Token rejected: {}", e);
                ServiceError::InvalidToken
            })?;

        if claims.is_expired_at(now) {
            return Err(ServiceError::InvalidToken);
        }

        Ok(claims)
    }
}
