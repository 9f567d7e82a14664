//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the
//! application. It centralizes error management, providing a consistent way
//! to represent every failure the API can surface, from registration
//! conflicts to invalid tokens to database trouble.
//!
//! `AppError` implements `actix_web::error::ResponseError` to seamlessly
//! convert application errors into appropriate HTTP responses with JSON
//! bodies. It also provides `From` trait implementations for common error
//! types like `sqlx::Error`, `validator::ValidationErrors`,
//! `jsonwebtoken::errors::Error`, and `bcrypt::BcryptError`, allowing for
//! easy conversion using the `?` operator.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Registration attempted with a username that is already taken (HTTP 400).
    DuplicateUsername,
    /// Registration attempted with an email that is already registered (HTTP 400).
    DuplicateEmail,
    /// Login failed (HTTP 401). Deliberately covers both "no such user" and
    /// "wrong password" so the response does not reveal which check failed.
    InvalidCredentials,
    /// Login attempted against a deactivated account (HTTP 400).
    AccountDisabled,
    /// Bearer token missing, malformed, expired, or bearing a bad signature
    /// (HTTP 401). All token failures collapse into this one kind.
    InvalidToken,
    /// Token verified but its subject no longer exists (HTTP 401).
    UserNotFound,
    /// A requested entity id was absent on get/update/delete (HTTP 404).
    NotFound(String),
    /// Input validation failed (HTTP 422 Unprocessable Entity).
    /// Wraps errors from the `validator` crate.
    ValidationError(String),
    /// An error originating from database operations (HTTP 500).
    /// Wraps errors from the `sqlx` crate.
    DatabaseError(String),
    /// An unexpected server-side error (HTTP 500).
    InternalServerError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::DuplicateUsername => write!(f, "Username already registered"),
            AppError::DuplicateEmail => write!(f, "Email already registered"),
            AppError::InvalidCredentials => write!(f, "Incorrect username or password"),
            AppError::AccountDisabled => write!(f, "User account is disabled"),
            AppError::InvalidToken => write!(f, "Could not validate credentials"),
            AppError::UserNotFound => write!(f, "User not found"),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// This implementation allows Actix Web to automatically translate `AppError`
/// results from handlers into the correct HTTP status codes and JSON error
/// responses.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::DuplicateUsername | AppError::DuplicateEmail | AppError::AccountDisabled => {
                StatusCode::BAD_REQUEST
            }
            AppError::InvalidCredentials | AppError::InvalidToken | AppError::UserNotFound => {
                StatusCode::UNAUTHORIZED
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Store failures are logged server-side and presented as a generic
        // internal error so internals never leak to the client.
        if let AppError::DatabaseError(msg) = self {
            log::error!("database error: {}", msg);
            return HttpResponse::InternalServerError().json(json!({
                "error": "Internal server error"
            }));
        }
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.to_string()
        }))
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `sqlx::Error::RowNotFound` maps to `AppError::NotFound`. Unique-constraint
/// violations on the users table map back to the registration conflict errors
/// so a registration that loses the check-then-insert race still reports the
/// duplicate instead of a 500. Everything else becomes `DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match &error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            sqlx::Error::Database(db_err) => {
                if db_err.code().as_deref() == Some("23505") {
                    match db_err.constraint() {
                        Some("users_username_key") => return AppError::DuplicateUsername,
                        Some("users_email_key") => return AppError::DuplicateEmail,
                        _ => {}
                    }
                }
                AppError::DatabaseError(error.to_string())
            }
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
///
/// The detailed validation messages are preserved.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Converts `jsonwebtoken::errors::Error` into `AppError::InvalidToken`.
///
/// Signature mismatch, undecodable payload, and expiry all collapse into the
/// single token-failure kind; verification is all-or-nothing.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(_error: jsonwebtoken::errors::Error) -> AppError {
        AppError::InvalidToken
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::InternalServerError`.
///
/// This handles errors during password hashing.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}
