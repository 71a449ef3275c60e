//! Transaction (ledger) data models and API request/response types.
//!
//! This module defines:
//! - `Transaction`: Database entity representing one ledger row
//! - `MutationKind`: deposit or withdrawal, with its balance rule
//! - `BalanceMutation` / `MutationReceipt`: input and output of the atomic
//!   balance-mutation unit
//! - Request and response bodies for `/tabung`, `/tarik` and `/get-transaksi`

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// The only status ever written to the ledger.
pub const STATUS_SUCCESS: &str = "success";

/// Fractional digits of every monetary column (`NUMERIC(20, 2)`).
pub const MONEY_SCALE: u32 = 2;

/// Integer digits of every monetary column (`NUMERIC(20, 2)` leaves 18).
const MONEY_INTEGER_DIGITS: i64 = 1_000_000_000_000_000_000;

/// Whether `amount` fits the monetary columns without rounding.
fn fits_money_scale(amount: Decimal) -> bool {
    amount.normalize().scale() <= MONEY_SCALE
}

/// Whether `amount` fits the monetary columns without rounding or overflow.
pub fn fits_money_column(amount: Decimal) -> bool {
    fits_money_scale(amount) && amount.abs() < Decimal::from(MONEY_INTEGER_DIGITS)
}

/// Represents a row of the `transaction` table.
///
/// Rows are append-only: never updated, never deleted.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Transaction {
    pub id: Uuid,

    /// Internal id of the account the operation touched
    pub account_id: i64,

    /// `TRX-XXXXX-DDMMYY`, not guaranteed unique
    pub transaction_code: String,

    /// Positive magnitude; direction is carried by `remark`
    pub total_amount: Decimal,

    pub status: String,

    pub account_number_to: String,

    /// `TABUNG` for deposits, `TARIK` for withdrawals
    pub remark: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Direction of a balance mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Deposit,
    Withdrawal,
}

impl MutationKind {
    /// Ledger remark for this kind of operation.
    pub fn remark(self) -> &'static str {
        match self {
            MutationKind::Deposit => "TABUNG",
            MutationKind::Withdrawal => "TARIK",
        }
    }

    /// Validate `amount` against `current` and return the new balance.
    ///
    /// Called by the stores while the account row is locked, so `current` is
    /// the balance the new value will replace.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount`: amount is zero, negative, finer than cents, or
    ///   would take the balance past what the column holds
    /// - `InsufficientFunds`: withdrawal larger than `current`
    pub fn apply(self, current: Decimal, amount: Decimal) -> Result<Decimal, AppError> {
        if amount <= Decimal::ZERO || !fits_money_column(amount) {
            return Err(AppError::InvalidAmount);
        }

        match self {
            MutationKind::Deposit => current
                .checked_add(amount)
                .filter(|balance| fits_money_column(*balance))
                .ok_or(AppError::InvalidAmount),
            MutationKind::Withdrawal => {
                if amount > current {
                    return Err(AppError::InsufficientFunds);
                }
                Ok(current - amount)
            }
        }
    }
}

/// One deposit or withdrawal, ready to be applied by the ledger.
#[derive(Debug, Clone)]
pub struct BalanceMutation {
    pub kind: MutationKind,
    pub account_number: String,
    pub amount: Decimal,
    pub transaction_code: String,
}

/// Outcome of a committed balance mutation.
#[derive(Debug, Clone)]
pub struct MutationReceipt {
    /// Balance after the mutation
    pub balance: Decimal,

    /// The ledger row appended in the same unit of work
    pub transaction: Transaction,
}

/// Request body for `POST /tabung` and `POST /tarik`.
///
/// # JSON Example
///
/// ```json
/// {
///   "no_rekening": "0042137795",
///   "saldo": 500
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct BalanceMutationRequest {
    /// Target account number
    #[serde(rename = "no_rekening", default)]
    pub account_number: String,

    /// Amount to deposit or withdraw
    #[serde(rename = "saldo", default)]
    pub amount: Decimal,
}

/// Body of a successful deposit or withdrawal.
#[derive(Debug, Serialize)]
pub struct BalanceMutationResponse {
    pub message: &'static str,

    /// New balance
    #[serde(rename = "saldo", with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

/// Ledger row as returned to API clients.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub id: Uuid,
    pub transaction_code: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub status: String,
    pub account_number_to: String,
    pub remark: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Drops the internal `account_id`; clients address accounts by number.
impl From<Transaction> for TransactionResponse {
    fn from(transaction: Transaction) -> Self {
        Self {
            id: transaction.id,
            transaction_code: transaction.transaction_code,
            total_amount: transaction.total_amount,
            status: transaction.status,
            account_number_to: transaction.account_number_to,
            remark: transaction.remark,
            created_at: transaction.created_at,
            updated_at: transaction.updated_at,
        }
    }
}

/// Body of `GET /get-transaksi/{no_rekening}`.
#[derive(Debug, Serialize)]
pub struct TransactionHistoryResponse {
    pub message: &'static str,

    #[serde(rename = "no_rekening")]
    pub account_number: String,

    pub transactions: Vec<TransactionResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(MutationKind::Deposit, dec!(0), dec!(500), dec!(500))]
    #[case(MutationKind::Deposit, dec!(10.25), dec!(0.75), dec!(11.00))]
    #[case(MutationKind::Withdrawal, dec!(500), dec!(200), dec!(300))]
    #[case(MutationKind::Withdrawal, dec!(300), dec!(300), dec!(0))]
    fn apply_computes_new_balance(
        #[case] kind: MutationKind,
        #[case] current: Decimal,
        #[case] amount: Decimal,
        #[case] expected: Decimal,
    ) {
        assert_eq!(kind.apply(current, amount).unwrap(), expected);
    }

    #[rstest]
    #[case(MutationKind::Deposit, dec!(0))]
    #[case(MutationKind::Deposit, dec!(-5))]
    #[case(MutationKind::Withdrawal, dec!(0))]
    #[case(MutationKind::Withdrawal, dec!(-5))]
    #[case(MutationKind::Deposit, dec!(0.001))]
    #[case(MutationKind::Deposit, Decimal::MAX)]
    #[case(MutationKind::Deposit, dec!(1000000000000000000))]
    #[case(MutationKind::Withdrawal, dec!(1000000000000000000))]
    fn apply_rejects_invalid_amounts(#[case] kind: MutationKind, #[case] amount: Decimal) {
        assert!(matches!(
            kind.apply(dec!(100), amount),
            Err(AppError::InvalidAmount)
        ));
    }

    #[rstest]
    #[case(Decimal::MAX - dec!(1), dec!(5))]
    #[case(dec!(999999999999999999.99), dec!(0.01))]
    fn deposit_past_column_range_is_invalid(#[case] current: Decimal, #[case] amount: Decimal) {
        assert!(matches!(
            MutationKind::Deposit.apply(current, amount),
            Err(AppError::InvalidAmount)
        ));
    }

    #[test]
    fn deposit_up_to_column_range_is_accepted() {
        assert_eq!(
            MutationKind::Deposit
                .apply(dec!(999999999999999999.98), dec!(0.01))
                .unwrap(),
            dec!(999999999999999999.99)
        );
    }

    #[test]
    fn largest_decimal_in_body_is_rejected_not_panicking() {
        let request: BalanceMutationRequest = serde_json::from_str(
            r#"{"no_rekening":"0000000001","saldo":"79228162514264337593543950335"}"#,
        )
        .unwrap();

        assert_eq!(request.amount, Decimal::MAX);
        assert!(matches!(
            MutationKind::Deposit.apply(Decimal::ONE, request.amount),
            Err(AppError::InvalidAmount)
        ));
    }

    #[test]
    fn withdrawal_beyond_balance_is_insufficient() {
        assert!(matches!(
            MutationKind::Withdrawal.apply(dec!(300), dec!(1000)),
            Err(AppError::InsufficientFunds)
        ));
    }

    #[test]
    fn remarks_distinguish_direction() {
        assert_eq!(MutationKind::Deposit.remark(), "TABUNG");
        assert_eq!(MutationKind::Withdrawal.remark(), "TARIK");
    }

    #[test]
    fn mutation_request_reads_wire_names() {
        let request: BalanceMutationRequest =
            serde_json::from_str(r#"{"no_rekening":"0000000042","saldo":500}"#).unwrap();

        assert_eq!(request.account_number, "0000000042");
        assert_eq!(request.amount, dec!(500));
    }
}
