//! Generation of public identifiers: account numbers and transaction codes.

use chrono::{NaiveDate, Utc};
use rand::Rng;

use crate::error::AppError;

/// Account numbers are drawn uniformly from `[0, 10^10)`.
const ACCOUNT_NUMBER_SPACE: u64 = 10_000_000_000;

const TRANSACTION_CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const TRANSACTION_CODE_RANDOM_LEN: usize = 5;

/// Draw a new 10-digit account number.
///
/// Zero-padded so every number has exactly ten digits. Uniqueness is not
/// checked here; the store's unique constraint rejects collisions and
/// account creation draws again.
pub fn generate_account_number() -> String {
    let number = rand::rng().random_range(0..ACCOUNT_NUMBER_SPACE);
    format!("{number:010}")
}

/// The account number as stored: surrounding whitespace removed.
///
/// # Errors
///
/// `InvalidRequest` when nothing is left.
pub fn normalize_account_number(raw: &str) -> Result<&str, AppError> {
    let number = raw.trim();
    if number.is_empty() {
        return Err(AppError::InvalidRequest(
            "no_rekening is required".to_string(),
        ));
    }
    Ok(number)
}

/// Build a transaction code for today: `TRX-XXXXX-DDMMYY`.
pub fn generate_transaction_code() -> String {
    transaction_code_for(Utc::now().date_naive())
}

/// Build a transaction code for the given date.
///
/// The five random characters are uppercase letters and digits.
pub fn transaction_code_for(date: NaiveDate) -> String {
    let mut rng = rand::rng();
    let random: String = (0..TRANSACTION_CODE_RANDOM_LEN)
        .map(|_| {
            let idx = rng.random_range(0..TRANSACTION_CODE_CHARSET.len());
            TRANSACTION_CODE_CHARSET[idx] as char
        })
        .collect();

    format!("TRX-{}-{}", random, date.format("%d%m%y"))
}
