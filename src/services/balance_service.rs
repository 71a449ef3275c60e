//! Balance mutation service - deposits, withdrawals and ledger history.
//!
//! # Process
//!
//! Every deposit or withdrawal is handed to the ledger as one unit of work:
//!
//! 1. Lock the account row
//! 2. Validate the amount against the locked balance
//! 3. Write the new balance
//! 4. Append the ledger row
//!
//! The ledger commits all of it or none of it.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::{
    error::AppError,
    models::{
        account::Account,
        transaction::{BalanceMutation, MutationKind, MutationReceipt, Transaction},
    },
    services::codes,
    store::{AccountStore, TransactionLedger},
};

#[derive(Clone)]
pub struct BalanceMutationService {
    accounts: Arc<dyn AccountStore>,
    ledger: Arc<dyn TransactionLedger>,
}

impl BalanceMutationService {
    pub fn new(accounts: Arc<dyn AccountStore>, ledger: Arc<dyn TransactionLedger>) -> Self {
        Self { accounts, ledger }
    }

    /// Add `amount` to the account's balance.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest`: empty account number
    /// - `AccountNotFound`: no such account
    /// - `InvalidAmount`: amount is zero, negative, finer than cents or out of
    ///   the balance column's range
    /// - `Database`: store failure, nothing written
    pub async fn deposit(
        &self,
        account_number: &str,
        amount: Decimal,
    ) -> Result<MutationReceipt, AppError> {
        self.mutate(MutationKind::Deposit, account_number, amount)
            .await
    }

    /// Take `amount` from the account's balance.
    ///
    /// # Errors
    ///
    /// As [`deposit`](Self::deposit), plus `InsufficientFunds` when `amount`
    /// exceeds the current balance.
    pub async fn withdraw(
        &self,
        account_number: &str,
        amount: Decimal,
    ) -> Result<MutationReceipt, AppError> {
        self.mutate(MutationKind::Withdrawal, account_number, amount)
            .await
    }

    /// The account and its ledger rows, oldest first.
    pub async fn history(
        &self,
        account_number: &str,
    ) -> Result<(Account, Vec<Transaction>), AppError> {
        let account_number = codes::normalize_account_number(account_number)?;

        let account = self
            .accounts
            .find_by_account_number(account_number)
            .await?
            .ok_or(AppError::AccountNotFound)?;

        let transactions = self.ledger.list_for_account(account.id).await?;

        Ok((account, transactions))
    }

    #[tracing::instrument(skip(self))]
    async fn mutate(
        &self,
        kind: MutationKind,
        account_number: &str,
        amount: Decimal,
    ) -> Result<MutationReceipt, AppError> {
        let account_number = codes::normalize_account_number(account_number)?;

        let mutation = BalanceMutation {
            kind,
            account_number: account_number.to_string(),
            amount,
            transaction_code: codes::generate_transaction_code(),
        };

        let receipt = self.ledger.apply(mutation).await?;

        tracing::info!(
            account_id = receipt.transaction.account_id,
            transaction_code = %receipt.transaction.transaction_code,
            balance = %receipt.balance,
            "balance mutation committed"
        );

        Ok(receipt)
    }
}
