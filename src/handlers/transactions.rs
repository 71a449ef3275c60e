//! Balance mutation HTTP handlers.
//!
//! This module implements the transaction-related API endpoints:
//! - POST /tabung - Deposit into an account
//! - POST /tarik - Withdraw from an account
//! - GET /get-transaksi/{no_rekening} - Ledger rows of an account

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};

use crate::{
    error::AppError,
    handlers::AppState,
    models::transaction::{
        BalanceMutationRequest, BalanceMutationResponse, TransactionHistoryResponse,
    },
};

/// Deposit into an account.
///
/// # Request Body
///
/// ```json
/// {
///   "no_rekening": "0042137795",
///   "saldo": 500
/// }
/// ```
///
/// # Response (200)
///
/// ```json
/// {
///   "message": "Success top up saldo",
///   "saldo": 500.0
/// }
/// ```
///
/// - **Error (400)**: Amount is zero or negative
/// - **Error (404)**: Unknown account number
pub async fn deposit(
    State(state): State<AppState>,
    payload: Result<Json<BalanceMutationRequest>, JsonRejection>,
) -> Result<Json<BalanceMutationResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::InvalidRequest(e.body_text()))?;

    let receipt = state
        .balances
        .deposit(&request.account_number, request.amount)
        .await?;

    Ok(Json(BalanceMutationResponse {
        message: "Success top up saldo",
        balance: receipt.balance,
    }))
}

/// Withdraw from an account.
///
/// # Validation
///
/// - Amount must be positive
/// - Amount must not exceed the current balance (400 `insufficient_funds`)
pub async fn withdraw(
    State(state): State<AppState>,
    payload: Result<Json<BalanceMutationRequest>, JsonRejection>,
) -> Result<Json<BalanceMutationResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::InvalidRequest(e.body_text()))?;

    let receipt = state
        .balances
        .withdraw(&request.account_number, request.amount)
        .await?;

    Ok(Json(BalanceMutationResponse {
        message: "Success tarik saldo",
        balance: receipt.balance,
    }))
}

/// Ledger rows of one account, oldest first.
pub async fn list_transactions(
    State(state): State<AppState>,
    Path(account_number): Path<String>,
) -> Result<Json<TransactionHistoryResponse>, AppError> {
    let (account, transactions) = state.balances.history(&account_number).await?;

    Ok(Json(TransactionHistoryResponse {
        message: "Success get transaction",
        account_number: account.account_number,
        transactions: transactions.into_iter().map(Into::into).collect(),
    }))
}
