//! Account service - account creation and balance queries.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::{
    error::AppError,
    models::{
        account::{Account, CreateAccountRequest, DEFAULT_ROLE, NewAccount},
        transaction::fits_money_column,
    },
    services::{codes, password},
    store::AccountStore,
};

/// Attempts at drawing an unused account number before giving up.
const ACCOUNT_NUMBER_ATTEMPTS: u32 = 5;

#[derive(Clone)]
pub struct AccountService {
    accounts: Arc<dyn AccountStore>,
}

impl AccountService {
    pub fn new(accounts: Arc<dyn AccountStore>) -> Self {
        Self { accounts }
    }

    /// Create a new customer account.
    ///
    /// # Process
    ///
    /// 1. Validate required fields
    /// 2. Hash the password (argon2id, fixed work factor)
    /// 3. Draw a 10-digit account number and insert, drawing again on conflict
    ///
    /// The role is always `USER`, whatever the request says.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest`: a required field is missing or the balance is
    ///   negative or out of range
    /// - `AccountNumberTaken`: every drawn number collided
    /// - `PasswordHash` / `Database`: internal failures
    #[tracing::instrument(skip_all, fields(email = %request.email))]
    pub async fn create_account(&self, request: CreateAccountRequest) -> Result<Account, AppError> {
        validate_create_request(&request)?;

        if let Some(role) = request.role.as_deref().filter(|role| *role != DEFAULT_ROLE) {
            tracing::debug!(requested_role = role, "ignoring requested role");
        }
        if let Some(number) = request.account_number.as_deref() {
            tracing::debug!(requested_number = number, "ignoring client-supplied account number");
        }

        let plain = request.password;
        let password_hash = tokio::task::spawn_blocking(move || password::hash_password(&plain))
            .await
            .map_err(|e| AppError::PasswordHash(e.to_string()))??;

        let template = NewAccount {
            full_name: request.full_name.trim().to_string(),
            email: request.email.trim().to_string(),
            password_hash,
            national_id: request.national_id,
            phone: request.phone.trim().to_string(),
            role: DEFAULT_ROLE.to_string(),
            balance: request.initial_balance,
            account_number: String::new(),
        };

        for attempt in 1..=ACCOUNT_NUMBER_ATTEMPTS {
            let candidate = NewAccount {
                account_number: codes::generate_account_number(),
                ..template.clone()
            };

            match self.accounts.insert(candidate).await {
                Ok(account) => {
                    tracing::info!(
                        account_id = account.id,
                        account_number = %account.account_number,
                        "account created"
                    );
                    return Ok(account);
                }
                Err(AppError::AccountNumberTaken) => {
                    tracing::warn!(attempt, "account number collision, drawing again");
                }
                Err(err) => return Err(err),
            }
        }

        Err(AppError::AccountNumberTaken)
    }

    /// All accounts, ordered by internal id.
    pub async fn list_accounts(&self) -> Result<Vec<Account>, AppError> {
        self.accounts.list().await
    }

    /// Look up one account (and so its balance) by account number.
    pub async fn get_balance(&self, account_number: &str) -> Result<Account, AppError> {
        let account_number = codes::normalize_account_number(account_number)?;

        self.accounts
            .find_by_account_number(account_number)
            .await?
            .ok_or(AppError::AccountNotFound)
    }

    /// Round trip to the store.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.accounts.ping().await
    }
}

fn validate_create_request(request: &CreateAccountRequest) -> Result<(), AppError> {
    let required = [
        ("nama", request.full_name.as_str()),
        ("email", request.email.as_str()),
        ("password_hash", request.password.as_str()),
        ("no_hp", request.phone.as_str()),
    ];

    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(AppError::InvalidRequest(format!("{field} is required")));
        }
    }

    if request.national_id <= 0 {
        return Err(AppError::InvalidRequest(
            "nik must be a positive number".to_string(),
        ));
    }

    if request.initial_balance < Decimal::ZERO || !fits_money_column(request.initial_balance) {
        return Err(AppError::InvalidRequest(
            "saldo must be a non-negative amount below 10^18 with at most two decimals"
                .to_string(),
        ));
    }

    Ok(())
}
