//! Account business logic service.
//!
//! Registration validates and hashes credentials before handing them to the
//! store; login verifies them and issues a session token.

use crate::auth::password::PasswordHasher;
use crate::auth::validation::{MIN_PASSWORD_LENGTH, validate_password_strength, validate_username};
use crate::database::models::{Account, NewAccount};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::account_repository::AccountStore;
use crate::utils::jwt::{Claims, IssuedToken, JwtUtils};
use tracing::{info, warn};

/// Service layer for account operations.
pub struct AccountService<'a, S> {
    store: S,
    hasher: &'a PasswordHasher,
    jwt_utils: &'a JwtUtils,
}

impl<'a, S: AccountStore> AccountService<'a, S> {
    /// Creates a new AccountService instance.
    ///
    /// # Arguments
    /// * `store` - Account persistence backend
    /// * `hasher` - Password hasher carrying the registration policy
    /// * `jwt_utils` - Token signer used at login
    pub fn new(store: S, hasher: &'a PasswordHasher, jwt_utils: &'a JwtUtils) -> Self {
        Self {
            store,
            hasher,
            jwt_utils,
        }
    }

    /// Registers a new account.
    ///
    /// # Errors
    /// Returns `ServiceError` for:
    /// - `InvalidFormat` when the username breaks the format rules
    /// - `DuplicateUsername` when the username is taken, including when a
    ///   concurrent registration wins the insert
    /// - `WeakPassword` when the length policy is enforced and not met
    /// - `PasswordTooLong` when bcrypt would have to truncate the password
    /// - `Hashing` / `Persistence` for infrastructure failures
    pub async fn register(&self, username: &str, password: &str) -> ServiceResult<Account> {
        if !validate_username(username) {
            return Err(ServiceError::InvalidFormat);
        }

        if self.store.find_by_username(username).await?.is_some() {
            return Err(ServiceError::DuplicateUsername);
        }

        if self.hasher.policy().enforce_min_length && !validate_password_strength(password) {
            return Err(ServiceError::WeakPassword {
                min_length: MIN_PASSWORD_LENGTH,
            });
        }

        let password_hash = self.hasher.hash(password).await?;

        let account = self
            .store
            .create(NewAccount::new(username, password_hash))
            .await?;

        info!(username = %account.username, id = %account.id, "Registered account");
        Ok(account)
    }

    /// Verifies credentials and issues a session token.
    ///
    /// Unknown usernames and wrong passwords both yield
    /// `ServiceError::InvalidCredentials` after the same bcrypt work.
    pub async fn login(&self, username: &str, password: &str) -> ServiceResult<IssuedToken> {
        let Some(account) = self.store.find_by_username(username).await? else {
            self.hasher.verify_decoy(password).await?;
            warn!(username = ?username, "Login rejected");
            return Err(ServiceError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &account.password_hash).await? {
            warn!(username = ?username, "Login rejected");
            return Err(ServiceError::InvalidCredentials);
        }

        let issued = self.jwt_utils.generate_token(&account.username)?;
        info!(username = %account.username, "Issued session token");
        Ok(issued)
    }
}

/// Resolves the account behind validated token claims.
pub async fn current_account<S: AccountStore>(
    store: &S,
    claims: &Claims,
) -> ServiceResult<Account> {
    store
        .find_by_username(claims.username())
        .await?
        .ok_or(ServiceError::InvalidToken)
}
