//! `ferrobank-core` — domain types and the shared error model.
//!
//! Pure domain layer: no IO, no HTTP, no persistence concerns.

pub mod account;
pub mod error;

pub use account::{Account, AccountId, AccountNumber, NewAccount};
pub use error::{LedgerError, LedgerResult, StoreError};
