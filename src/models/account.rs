//! Account data models and API request/response types.
//!
//! This module defines:
//! - `Account`: Database entity representing a customer account
//! - `NewAccount`: Validated, hashed values ready to be inserted
//! - `CreateAccountRequest`: Request body for creating accounts
//! - `AccountResponse`: Account as returned to clients (no password hash)

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Role assigned to every account created through the API.
pub const DEFAULT_ROLE: &str = "USER";

/// Represents a row of the `account` table.
///
/// `balance` is a `NUMERIC(20, 2)` column guarded by `CHECK (balance >= 0)`.
/// Only `balance` and `updated_at` ever change after creation. The password
/// hash is write-only and is not part of this struct.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    /// Internal identifier assigned by the store
    pub id: i64,

    pub full_name: String,

    pub email: String,

    /// National identity number (NIK), stored verbatim
    pub national_id: i64,

    pub phone: String,

    pub role: String,

    pub balance: Decimal,

    /// Public 10-digit, zero-padded identifier (unique)
    pub account_number: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Values for a new `account` row.
///
/// Built by the account service after validation, hashing and account-number
/// generation. Timestamps are set by the store.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub full_name: String,
    pub email: String,
    /// argon2id PHC string
    pub password_hash: String,
    pub national_id: i64,
    pub phone: String,
    pub role: String,
    pub balance: Decimal,
    pub account_number: String,
}

/// Request body for creating a new account.
///
/// # JSON Example
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
/// `password_hash` carries the plain password; it is hashed before storage.
/// `roles` and `no_rekening` are accepted but ignored: the role is always
/// `USER` and the account number is generated.
///
/// Every field defaults so that missing fields are reported by validation
/// as `invalid_request` rather than by the JSON extractor.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateAccountRequest {
    #[serde(rename = "nama", alias = "name")]
    pub full_name: String,

    pub email: String,

    #[serde(rename = "password_hash", alias = "password")]
    pub password: String,

    #[serde(rename = "nik")]
    pub national_id: i64,

    #[serde(rename = "no_hp")]
    pub phone: String,

    #[serde(rename = "saldo")]
    pub initial_balance: Decimal,

    #[serde(rename = "roles")]
    pub role: Option<String>,

    #[serde(rename = "no_rekening")]
    pub account_number: Option<String>,
}

/// Account as returned to API clients.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": 1,
///   "nama": "Budi Santoso",
///   "email": "budi@example.com",
///   "roles": "USER",
///   "nik": 3171234567890001,
///   "no_hp": "081234567890",
///   "saldo": 500.0,
///   "no_rekening": "0042137795",
///   "created_at": "2025-12-20T10:00:00Z",
///   "updated_at": "2025-12-20T10:00:00Z"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: i64,

    #[serde(rename = "nama")]
    pub full_name: String,

    pub email: String,

    #[serde(rename = "roles")]
    pub role: String,

    #[serde(rename = "nik")]
    pub national_id: i64,

    #[serde(rename = "no_hp")]
    pub phone: String,

    #[serde(rename = "saldo", with = "rust_decimal::serde::float")]
    pub balance: Decimal,

    #[serde(rename = "no_rekening")]
    pub account_number: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Convert database Account to API AccountResponse.
impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            full_name: account.full_name,
            email: account.email,
            role: account.role,
            national_id: account.national_id,
            phone: account.phone,
            balance: account.balance,
            account_number: account.account_number,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// Body of `POST /create-account` (201).
#[derive(Debug, Serialize)]
pub struct CreateAccountResponse {
    pub message: &'static str,

    #[serde(rename = "no-rekening")]
    pub account_number: String,
}

/// Body of `GET /get-account`.
#[derive(Debug, Serialize)]
pub struct AccountListResponse {
    pub message: &'static str,
    pub account: Vec<AccountResponse>,
}

/// Body of `GET /get-saldo/{no_rekening}`.
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub message: &'static str,
    pub account: AccountResponse,
}
