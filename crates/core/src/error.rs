//! Domain error model.

use thiserror::Error;

use crate::account::AccountId;

/// Result type used across the domain layer.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Failure reported by a ledger store implementation.
///
/// `NotFound` and `Overdraw` carry the id of the row they refused to touch so
/// callers can map them precisely (a transfer needs to know which leg failed).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No row exists for the given account id.
    #[error("account {0} not found")]
    NotFound(AccountId),

    /// The adjustment would have driven the balance negative; nothing was applied.
    #[error("adjustment would overdraw account {0}")]
    Overdraw(AccountId),

    /// Underlying driver/transaction failure.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Ledger operation failure.
///
/// Every failed precondition aborts the operation; nothing is logged-and-
/// continued past a failed invariant check.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("account {0} not found")]
    NotFound(AccountId),

    #[error("sender account {0} not found")]
    SenderNotFound(AccountId),

    #[error("receiver account {0} not found")]
    ReceiverNotFound(AccountId),

    /// Deposits, withdrawals and transfers all require a strictly positive amount.
    #[error("amount must be positive, got {0}")]
    InvalidAmount(i64),

    #[error("insufficient funds in account {0}")]
    InsufficientFunds(AccountId),

    /// Transfers between an account and itself are rejected outright.
    #[error("transfer source and destination are the same account")]
    SelfTransfer,

    /// Caller is not bound to the account it is trying to access.
    #[error("access denied")]
    Unauthorized,

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_convert_into_ledger_errors() {
        let err: LedgerError = StoreError::Backend("connection reset".to_string()).into();
        assert!(matches!(err, LedgerError::Store(StoreError::Backend(_))));
    }

    #[test]
    fn messages_name_the_offending_account() {
        let err = LedgerError::InsufficientFunds(AccountId::from(42));
        assert_eq!(err.to_string(), "insufficient funds in account 42");

        let err = LedgerError::SenderNotFound(AccountId::from(7));
        assert_eq!(err.to_string(), "sender account 7 not found");
    }
}
