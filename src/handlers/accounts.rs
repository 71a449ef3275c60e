//! Account management HTTP handlers.
//!
//! This module implements the account-related API endpoints:
//! - POST /create-account - Create new account
//! - GET /get-account - List all accounts
//! - GET /get-saldo/{no_rekening} - Get one account and its balance

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    error::AppError,
    handlers::AppState,
    models::account::{
        AccountListResponse, AccountResponse, BalanceResponse, CreateAccountRequest,
        CreateAccountResponse,
    },
};

/// Create a new account.
///
/// # Endpoint
///
/// `POST /create-account`
///
/// # Request Body
///
/// ```json
/// {
///   "nama": "Budi Santoso",
///   "email": "budi@example.com",
///   "password_hash": "plain-text-password",
///   "nik": 3171234567890001,
///   "no_hp": "081234567890",
///   "saldo": 0
/// }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: `{"message": "...", "no-rekening": "0042137795"}`
/// - **Error (400)**: Missing field, negative balance or malformed JSON
/// - **Error (500)**: Database error
pub async fn create_account(
    State(state): State<AppState>,
    payload: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateAccountResponse>), AppError> {
    let Json(request) = payload.map_err(|e| AppError::InvalidRequest(e.body_text()))?;

    let account = state.accounts.create_account(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateAccountResponse {
            message: "Account created successfully",
            account_number: account.account_number,
        }),
    ))
}

/// List all accounts.
///
/// # Endpoint
///
/// `GET /get-account`
///
/// Accounts are returned in creation order, without password hashes.
pub async fn list_accounts(
    State(state): State<AppState>,
) -> Result<Json<AccountListResponse>, AppError> {
    let accounts = state.accounts.list_accounts().await?;

    Ok(Json(AccountListResponse {
        message: "Success get all account",
        account: accounts.into_iter().map(Into::into).collect(),
    }))
}

/// Get one account, including its balance.
///
/// # Endpoint
///
/// `GET /get-saldo/{no_rekening}`
///
/// # Response
///
/// - **Success (200 OK)**: `{"message": "...", "account": {...}}`
/// - **Error (404)**: No account with that number
/// - **Error (500)**: Database error
pub async fn get_balance(
    State(state): State<AppState>,
    Path(account_number): Path<String>,
) -> Result<Json<BalanceResponse>, AppError> {
    let account = state.accounts.get_balance(&account_number).await?;

    Ok(Json(BalanceResponse {
        message: "Success get saldo",
        account: AccountResponse::from(account),
    }))
}
