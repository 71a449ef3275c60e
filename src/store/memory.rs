//! In-memory account store and ledger for tests.
//!
//! One `tokio::sync::Mutex` guards accounts and ledger together and is held
//! for the whole of a balance mutation, which gives the same serialization a
//! row lock gives in PostgreSQL.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        account::{Account, NewAccount},
        transaction::{BalanceMutation, MutationReceipt, STATUS_SUCCESS, Transaction},
    },
    store::{AccountStore, TransactionLedger},
};

#[derive(Default)]
struct State {
    accounts: Vec<Account>,
    transactions: Vec<Transaction>,
    password_hashes: HashMap<i64, String>,
    next_account_id: i64,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored password hash of an account.
    pub async fn password_hash(&self, account_id: i64) -> Option<String> {
        self.state.lock().await.password_hashes.get(&account_id).cloned()
    }

    /// Every ledger row, in append order.
    pub async fn all_transactions(&self) -> Vec<Transaction> {
        self.state.lock().await.transactions.clone()
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn insert(&self, account: NewAccount) -> Result<Account, AppError> {
        let mut state = self.state.lock().await;

        if state
            .accounts
            .iter()
            .any(|existing| existing.account_number == account.account_number)
        {
            return Err(AppError::AccountNumberTaken);
        }

        state.next_account_id += 1;
        let id = state.next_account_id;
        state.password_hashes.insert(id, account.password_hash);

        let now = Utc::now();
        let stored = Account {
            id,
            full_name: account.full_name,
            email: account.email,
            national_id: account.national_id,
            phone: account.phone,
            role: account.role,
            balance: account.balance,
            account_number: account.account_number,
            created_at: now,
            updated_at: now,
        };
        state.accounts.push(stored.clone());

        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<Account>, AppError> {
        Ok(self.state.lock().await.accounts.clone())
    }

    async fn find_by_account_number(
        &self,
        account_number: &str,
    ) -> Result<Option<Account>, AppError> {
        let state = self.state.lock().await;

        Ok(state
            .accounts
            .iter()
            .find(|account| account.account_number == account_number)
            .cloned())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[async_trait]
impl TransactionLedger for MemoryStore {
    async fn apply(&self, mutation: BalanceMutation) -> Result<MutationReceipt, AppError> {
        let mut state = self.state.lock().await;

        let index = state
            .accounts
            .iter()
            .position(|account| account.account_number == mutation.account_number)
            .ok_or(AppError::AccountNotFound)?;

        let balance = mutation
            .kind
            .apply(state.accounts[index].balance, mutation.amount)?;

        let now = Utc::now();
        let account = &mut state.accounts[index];
        account.balance = balance;
        account.updated_at = now;
        let account_id = account.id;

        let transaction = Transaction {
            id: Uuid::new_v4(),
            account_id,
            transaction_code: mutation.transaction_code,
            total_amount: mutation.amount,
            status: STATUS_SUCCESS.to_string(),
            account_number_to: mutation.account_number,
            remark: mutation.kind.remark().to_string(),
            created_at: now,
            updated_at: now,
        };
        state.transactions.push(transaction.clone());

        Ok(MutationReceipt {
            balance,
            transaction,
        })
    }

    async fn list_for_account(&self, account_id: i64) -> Result<Vec<Transaction>, AppError> {
        let state = self.state.lock().await;

        Ok(state
            .transactions
            .iter()
            .filter(|transaction| transaction.account_id == account_id)
            .cloned()
            .collect())
    }
}
