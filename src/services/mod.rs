//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers. They
//! reach storage only through the traits in [`crate::store`].

pub mod account_service;
pub mod balance_service;
pub mod codes;
pub mod password;

pub use account_service::AccountService;
pub use balance_service::BalanceMutationService;
