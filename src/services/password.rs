//! One-way password hashing.
//!
//! Passwords are hashed with argon2id, a random per-password salt and a fixed
//! work factor. The result is a PHC string (`$argon2id$v=19$m=...`) that
//! carries its own parameters and salt.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};

use crate::error::AppError;

/// Memory cost in KiB.
const MEMORY_COST_KIB: u32 = 19_456;
/// Iterations.
const TIME_COST: u32 = 2;
/// Lanes.
const PARALLELISM: u32 = 1;

fn hasher() -> Result<Argon2<'static>, AppError> {
    let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, None)
        .map_err(|e| AppError::PasswordHash(e.to_string()))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a plain-text password.
///
/// CPU bound; call from a blocking context.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::PasswordHash(e.to_string()))?;

    Ok(hash.to_string())
}
