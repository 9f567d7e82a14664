//!
//! # Authentication
//!
//! Registration, login, and token resolution, plus their request/response
//! payloads. The flows are free async functions taking the database pool
//! (and, where tokens are involved, the process-wide [`TokenKeys`]) as
//! explicit parameters; there are no service singletons and no hidden state.

pub mod extractors;
pub mod password;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

use crate::error::AppError;
use crate::models::User;

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenKeys};

lazy_static! {
    // Regex for username validation: alphanumeric, underscores, hyphens
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username for the new account.
    /// Must be between 3 and 50 characters, alphanumeric, and can include
    /// underscores or hyphens.
    #[validate(
        length(min = 3, max = 50),
        regex(
            path = "USERNAME_REGEX",
            message = "Username must be alphanumeric, underscores, or hyphens"
        )
    )]
    pub username: String,
    /// Email address for the new account.
    /// Must be a valid email format.
    #[validate(email)]
    pub email: String,
    /// Password for the new account.
    /// Must be at least 6 characters long.
    #[validate(length(min = 6))]
    pub password: String,
}

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(length(min = 6))]
    pub password: String,
}

/// Response structure after a successful login: the bearer token the client
/// presents on subsequent requests.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Looks up a user row by username.
pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, email, password_hash, is_active, created_at, updated_at \
         FROM users WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

/// Registers a new user: uniqueness checks, password hash, insert.
///
/// The check-then-insert sequence is not atomic against a concurrent
/// registration; the UNIQUE constraints on username and email backstop it,
/// and a lost race surfaces as the same `DuplicateUsername`/`DuplicateEmail`
/// through the sqlx error mapping.
pub async fn register(pool: &PgPool, payload: &RegisterRequest) -> Result<User, AppError> {
    let existing = sqlx::query_scalar::<_, i32>("SELECT id FROM users WHERE username = $1")
        .bind(&payload.username)
        .fetch_optional(pool)
        .await?;
    if existing.is_some() {
        return Err(AppError::DuplicateUsername);
    }

    let existing = sqlx::query_scalar::<_, i32>("SELECT id FROM users WHERE email = $1")
        .bind(&payload.email)
        .fetch_optional(pool)
        .await?;
    if existing.is_some() {
        return Err(AppError::DuplicateEmail);
    }

    let password_hash = hash_password(&payload.password)?;

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (username, email, password_hash, is_active) \
         VALUES ($1, $2, $3, TRUE) \
         RETURNING id, username, email, password_hash, is_active, created_at, updated_at",
    )
    .bind(&payload.username)
    .bind(&payload.email)
    .bind(&password_hash)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Authenticates a user and issues a bearer token bound to the username.
///
/// "No such user" and "wrong password" deliberately produce the identical
/// `InvalidCredentials` error so the response does not leak which check
/// failed. The active-flag check only runs after the password verified.
pub async fn login(
    pool: &PgPool,
    keys: &TokenKeys,
    payload: &LoginRequest,
) -> Result<TokenResponse, AppError> {
    let user = find_by_username(pool, &payload.username)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(&payload.password, &user.password_hash) {
        return Err(AppError::InvalidCredentials);
    }

    if !user.is_active {
        return Err(AppError::AccountDisabled);
    }

    let access_token = keys.issue(&user.username)?;
    Ok(TokenResponse::bearer(access_token))
}

/// Resolves a bearer token back to its user row.
///
/// A valid token whose subject has since been deleted fails with
/// `UserNotFound`; deletion does not invalidate outstanding tokens.
pub async fn resolve(pool: &PgPool, keys: &TokenKeys, token: &str) -> Result<User, AppError> {
    let claims = keys.verify(token)?;
    find_by_username(pool, &claims.sub)
        .await?
        .ok_or(AppError::UserNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let valid_register = RegisterRequest {
            username: "test_user-123".to_string(),
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid_register.validate().is_ok());

        let invalid_username_register = RegisterRequest {
            username: "test user!".to_string(), // Contains space and exclamation
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(invalid_username_register.validate().is_err());

        let short_username_register = RegisterRequest {
            username: "tu".to_string(),
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(short_username_register.validate().is_err());

        let invalid_email_register = RegisterRequest {
            username: "testuser".to_string(),
            email: "testexample.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(invalid_email_register.validate().is_err());
    }

    #[test]
    fn test_login_request_validation() {
        let valid_login = LoginRequest {
            username: "testuser".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid_login.validate().is_ok());

        let short_password_login = LoginRequest {
            username: "testuser".to_string(),
            password: "123".to_string(),
        };
        assert!(short_password_login.validate().is_err());
    }

    #[test]
    fn test_token_response_shape() {
        let response = TokenResponse::bearer("abc".to_string());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["access_token"], "abc");
        assert_eq!(json["token_type"], "bearer");
    }
}
