//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Request Errors**: missing or malformed input fields
/// - **Business Rule Errors**: amounts that would break the balance rules
/// - **Resource Errors**: account number that matches no account
/// - **Internal Errors**: store failures, hashing failures, exhausted retries
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (connection error, query error, ...).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Request body or parameters are invalid.
    ///
    /// The String says what was invalid and is returned to the client.
    #[error("Invalid request")]
    InvalidRequest(String),

    /// Mutation amount must be positive.
    #[error("Amount must be greater than zero")]
    InvalidAmount,

    /// Withdrawal is larger than the current balance.
    #[error("Insufficient funds")]
    InsufficientFunds,

    /// No account carries the requested account number.
    #[error("Account not found")]
    AccountNotFound,

    /// A freshly drawn account number is already in use.
    ///
    /// Retried by account creation; only surfaces once retries run out.
    #[error("Account number already taken")]
    AccountNumberTaken,

    /// Password hashing failed.
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

impl AppError {
    /// HTTP status and machine-readable code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            AppError::InvalidAmount => (StatusCode::BAD_REQUEST, "invalid_amount"),
            AppError::InsufficientFunds => (StatusCode::BAD_REQUEST, "insufficient_funds"),
            AppError::AccountNotFound => (StatusCode::NOT_FOUND, "account_not_found"),
            AppError::AccountNumberTaken | AppError::PasswordHash(_) | AppError::Database(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        }
    }
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// Internal errors are logged and answered with a generic message so store
/// details never reach the client.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match self {
            AppError::InvalidRequest(ref msg) => msg.clone(),
            AppError::InvalidAmount | AppError::InsufficientFunds | AppError::AccountNotFound => {
                self.to_string()
            }
            AppError::AccountNumberTaken | AppError::PasswordHash(_) | AppError::Database(_) => {
                tracing::error!(error = %self, "request failed with internal error");
                "An internal error occurred".to_string()
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
