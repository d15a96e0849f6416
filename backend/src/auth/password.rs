//! bcrypt password hashing under a configurable policy.
//!
//! Hashing and verification never truncate: bcrypt only reads the first
//! [`MAX_PASSWORD_BYTES`] bytes, so longer passwords are refused outright.

use crate::config::Config;
use crate::errors::{ServiceError, ServiceResult};
use bcrypt::{BcryptError, non_truncating_hash, non_truncating_verify};
use tracing::warn;

/// Longest password bcrypt can hash without dropping input, in bytes.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Hashed once at startup; verified against when a login names no account.
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

/// How passwords are checked and hashed at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    /// Reject passwords shorter than `MIN_PASSWORD_LENGTH` before hashing.
    pub enforce_min_length: bool,
    /// bcrypt cost factor.
    pub hash_cost: u32,
}

impl PasswordPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            enforce_min_length: config.password_enforce_min_length,
            hash_cost: config.password_hash_cost,
        }
    }
}

/// Hashes and verifies passwords at the policy's cost.
pub struct PasswordHasher {
    policy: PasswordPolicy,
    decoy_hash: String,
}

impl PasswordHasher {
    /// Builds the hasher and its decoy hash. Blocks for one bcrypt round.
    pub fn new(policy: PasswordPolicy) -> ServiceResult<Self> {
        let decoy_hash = non_truncating_hash(DECOY_PASSWORD, policy.hash_cost)
            .map_err(|e| ServiceError::hashing(e.to_string()))?;

        Ok(Self { policy, decoy_hash })
    }

    pub fn policy(&self) -> PasswordPolicy {
        self.policy
    }

    /// Hashes a password on the blocking pool.
    ///
    /// # Errors
    /// - `PasswordTooLong` when the password exceeds [`MAX_PASSWORD_BYTES`]
    /// - `Hashing` for any other bcrypt or runtime failure
    pub async fn hash(&self, password: &str) -> ServiceResult<String> {
        let password = password.to_owned();
        let cost = self.policy.hash_cost;
        let outcome = tokio::task::spawn_blocking(move || non_truncating_hash(password, cost))
            .await
            .map_err(|e| ServiceError::hashing(e.to_string()))?;

        match outcome {
            Ok(hashed) => Ok(hashed),
            Err(BcryptError::Truncation(_)) => Err(ServiceError::PasswordTooLong {
                max_bytes: MAX_PASSWORD_BYTES,
            }),
            Err(e) => Err(ServiceError::hashing(e.to_string())),
        }
    }

    /// Verifies a password against a stored hash on the blocking pool.
    ///
    /// Over-long passwords and stored hashes bcrypt cannot parse count as a
    /// mismatch.
    pub async fn verify(&self, password: &str, password_hash: &str) -> ServiceResult<bool> {
        let password = password.to_owned();
        let password_hash = password_hash.to_owned();
        let outcome =
            tokio::task::spawn_blocking(move || non_truncating_verify(password, &password_hash))
                .await
                .map_err(|e| ServiceError::hashing(e.to_string()))?;

        match outcome {
            Ok(matches) => Ok(matches),
            Err(BcryptError::Truncation(_)) => Ok(false),
            Err(e) => {
                warn!(error = %e, "Stored password hash could not be verified");
                Ok(false)
            }
        }
    }

    /// Spends the same bcrypt work as `verify` and always reports a mismatch.
    pub async fn verify_decoy(&self, password: &str) -> ServiceResult<bool> {
        self.verify(password, &self.decoy_hash).await.map(|_| false)
    }
}
