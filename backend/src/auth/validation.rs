//! Credential format rules applied before an account is created.
//!
//! Both checks are pure: they borrow their input, hold no state, and can be
//! called from any handler or service without setup.

use validator::{Validate, ValidationError};

/// Shortest password accepted when the minimum-length policy is enforced.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Non-alphanumeric characters allowed in usernames.
const USERNAME_SYMBOLS: &str = "!@#$%^&*()_+-=";

#[derive(Validate)]
struct UsernameRule<'a> {
    #[validate(length(min = 6, max = 12), custom(function = "allowed_characters"))]
    username: &'a str,
}

#[derive(Validate)]
struct PasswordRule<'a> {
    #[validate(length(min = 8))]
    password: &'a str,
}

fn allowed_characters(username: &str) -> Result<(), ValidationError> {
    if username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || USERNAME_SYMBOLS.contains(c))
    {
        Ok(())
    } else {
        Err(ValidationError::new("username_charset"))
    }
}

/// Returns `true` if `username` is 6 to 12 characters drawn from ASCII letters,
/// digits and `! @ # $ % ^ & * ( ) _ + - =`.
pub fn validate_username(username: &str) -> bool {
    UsernameRule { username }.validate().is_ok()
}

/// Returns `true` if `password` has at least [`MIN_PASSWORD_LENGTH`] characters.
pub fn validate_password_strength(password: &str) -> bool {
    PasswordRule { password }.validate().is_ok()
}
