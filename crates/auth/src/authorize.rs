//! Owner-binding authorization check.
//!
//! A verified token is necessary but not sufficient: the token must be bound
//! to the very account it is presented against. This check runs after the
//! account has been loaded from the store, so a token for a *different*
//! existing account is denied exactly like one for a missing account.

use thiserror::Error;

use ferrobank_core::Account;

use crate::claims::TokenClaims;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthzError {
    /// The token is not bound to the target account. Carries no detail about
    /// which side mismatched.
    #[error("access denied")]
    Denied,
}

/// Require `claims` to be bound to `account`.
pub fn authorize_account_access(
    claims: &TokenClaims,
    account: &Account,
) -> Result<(), AuthzError> {
    if claims.account_number != account.number {
        return Err(AuthzError::Denied);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use ferrobank_core::{AccountId, AccountNumber};

    fn account_with_number(number: i64) -> Account {
        Account {
            id: AccountId::from(1),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            number: AccountNumber::from(number),
            balance: 0,
            created_at: Utc::now(),
        }
    }

    fn claims_for_number(number: i64) -> TokenClaims {
        TokenClaims::new(AccountNumber::from(number), Utc::now() + Duration::minutes(10))
    }

    #[test]
    fn matching_number_is_authorized() {
        let account = account_with_number(11_111_111);
        let claims = claims_for_number(11_111_111);
        assert_eq!(authorize_account_access(&claims, &account), Ok(()));
    }

    #[test]
    fn mismatched_number_is_denied() {
        let account = account_with_number(11_111_111);
        let claims = claims_for_number(22_222_222);
        assert_eq!(
            authorize_account_access(&claims, &account),
            Err(AuthzError::Denied)
        );
    }
}
