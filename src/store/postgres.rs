//! PostgreSQL implementation of the account store and ledger.
//!
//! # Atomicity Guarantees
//!
//! A balance mutation runs inside one PostgreSQL transaction and locks the
//! account row with `FOR UPDATE`, so concurrent mutations on the same account
//! are serialized and the balance write never lands without its ledger row.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        account::{Account, NewAccount},
        transaction::{BalanceMutation, MutationReceipt, STATUS_SUCCESS, Transaction},
    },
    store::{AccountStore, TransactionLedger},
};

// Never selects password_hash
const ACCOUNT_COLUMNS: &str = "id, full_name, email, national_id, phone, role, balance, \
                               account_number, created_at, updated_at";

/// Account store and ledger backed by a shared connection pool.
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgStore {
    async fn insert(&self, account: NewAccount) -> Result<Account, AppError> {
        let query = format!(
            r#"
            INSERT INTO account (
                full_name,
                email,
                password_hash,
                national_id,
                phone,
                role,
                balance,
                account_number,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW(), NOW())
            RETURNING {ACCOUNT_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Account>(&query)
            .bind(account.full_name)
            .bind(account.email)
            .bind(account.password_hash)
            .bind(account.national_id)
            .bind(account.phone)
            .bind(account.role)
            .bind(account.balance)
            .bind(account.account_number)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| match err {
                // account_number is the only unique column besides the key
                sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                    AppError::AccountNumberTaken
                }
                other => AppError::Database(other),
            })
    }

    async fn list(&self) -> Result<Vec<Account>, AppError> {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM account ORDER BY id");

        let accounts = sqlx::query_as::<_, Account>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(accounts)
    }

    async fn find_by_account_number(
        &self,
        account_number: &str,
    ) -> Result<Option<Account>, AppError> {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM account WHERE account_number = $1");

        let account = sqlx::query_as::<_, Account>(&query)
            .bind(account_number)
            .fetch_optional(&self.pool)
            .await?;

        Ok(account)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl TransactionLedger for PgStore {
    async fn apply(&self, mutation: BalanceMutation) -> Result<MutationReceipt, AppError> {
        let mut tx = self.pool.begin().await?;

        // Lock the account row until commit
        let (account_id, current): (i64, Decimal) = sqlx::query_as(
            "SELECT id, balance FROM account WHERE account_number = $1 FOR UPDATE",
        )
        .bind(&mutation.account_number)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::AccountNotFound)?;

        let balance = match mutation.kind.apply(current, mutation.amount) {
            Ok(balance) => balance,
            Err(err) => {
                tx.rollback().await?;
                return Err(err);
            }
        };

        sqlx::query(
            r#"
            UPDATE account
            SET balance = $1,
                updated_at = NOW()
            WHERE id = $2
            "#,
        )
        .bind(balance)
        .bind(account_id)
        .execute(&mut *tx)
        .await?;

        // clock_timestamp(): rows sort in the order the row lock was granted
        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO "transaction" (
                account_id,
                transaction_code,
                total_amount,
                status,
                account_number_to,
                remark,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, clock_timestamp(), clock_timestamp())
            RETURNING *
            "#,
        )
        .bind(account_id)
        .bind(&mutation.transaction_code)
        .bind(mutation.amount)
        .bind(STATUS_SUCCESS)
        .bind(&mutation.account_number)
        .bind(mutation.kind.remark())
        .fetch_one(&mut *tx)
        .await?;

        // Dropping `tx` on any earlier `?` rolls both writes back
        tx.commit().await?;

        Ok(MutationReceipt {
            balance,
            transaction,
        })
    }

    async fn list_for_account(&self, account_id: i64) -> Result<Vec<Transaction>, AppError> {
        let transactions = sqlx::query_as::<_, Transaction>(
            r#"SELECT * FROM "transaction" WHERE account_id = $1 ORDER BY created_at, id"#,
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }
}
