//! Storage seams for accounts and the transaction ledger.
//!
//! Services only see these traits. `PgStore` implements both against
//! PostgreSQL; `MemoryStore` implements both in process for tests.

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{
        account::{Account, NewAccount},
        transaction::{BalanceMutation, MutationReceipt, Transaction},
    },
};

#[cfg(test)]
pub mod memory;
pub mod postgres;

#[cfg(test)]
pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Access to account records.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a new account and return the stored row.
    ///
    /// # Errors
    ///
    /// - `AccountNumberTaken`: `account_number` collides with an existing account
    /// - `Database`: the write failed
    async fn insert(&self, account: NewAccount) -> Result<Account, AppError>;

    /// All accounts, ordered by internal id.
    async fn list(&self) -> Result<Vec<Account>, AppError>;

    /// Look up an account by its public account number.
    async fn find_by_account_number(&self, account_number: &str)
    -> Result<Option<Account>, AppError>;

    /// Cheap round trip used by the health check.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Append-only log of balance-affecting operations.
#[async_trait]
pub trait TransactionLedger: Send + Sync {
    /// Apply a deposit or withdrawal as one atomic unit of work.
    ///
    /// Locks the account row, validates the amount with
    /// [`MutationKind::apply`](crate::models::transaction::MutationKind::apply),
    /// writes the new balance and appends the ledger row. Either both writes
    /// become visible or neither does.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound`: no account has `mutation.account_number`
    /// - `InvalidAmount` / `InsufficientFunds`: the balance rule rejected it
    /// - `Database`: any store failure (everything rolled back)
    async fn apply(&self, mutation: BalanceMutation) -> Result<MutationReceipt, AppError>;

    /// Ledger rows for one account, oldest first.
    async fn list_for_account(&self, account_id: i64) -> Result<Vec<Transaction>, AppError>;
}
