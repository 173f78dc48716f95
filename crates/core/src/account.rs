//! Account records and their identifiers.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Store-assigned account identifier.
///
/// Unique and stable for the lifetime of the account. Never embedded in
/// access tokens; callers authenticate against [`AccountNumber`] instead.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(i64);

impl AccountId {
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for AccountId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl core::fmt::Display for AccountId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Caller-facing account number, distinct from the row id.
///
/// Random, immutable, and the binding subject of access tokens.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountNumber(i64);

impl AccountNumber {
    /// Draw a fresh random account number (eight digits).
    ///
    /// Prefer passing numbers explicitly in tests for determinism.
    pub fn random() -> Self {
        Self(rand::thread_rng().gen_range(10_000_000..100_000_000))
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for AccountNumber {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl core::fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A bank account as persisted by the store.
///
/// `balance` is held in minor currency units and is only ever mutated through
/// the ledger engine. All other fields are immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,
    pub first_name: String,
    pub last_name: String,
    pub number: AccountNumber,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
}

/// A not-yet-persisted account.
///
/// Carries everything except the id, which only the store may assign. The
/// record the store hands back is authoritative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub number: AccountNumber,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
}

impl NewAccount {
    /// New zero-balance account with a freshly drawn number.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            number: AccountNumber::random(),
            balance: 0,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_account_starts_at_zero_balance() {
        let account = NewAccount::new("Ada", "Lovelace");
        assert_eq!(account.balance, 0);
        assert_eq!(account.first_name, "Ada");
        assert_eq!(account.last_name, "Lovelace");
    }

    #[test]
    fn account_number_is_eight_digits() {
        for _ in 0..64 {
            let n = AccountNumber::random().as_i64();
            assert!((10_000_000..100_000_000).contains(&n), "got {n}");
        }
    }

    #[test]
    fn account_serializes_with_camel_case_fields() {
        let account = Account {
            id: AccountId::from(7),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            number: AccountNumber::from(12_345_678),
            balance: 250,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["lastName"], "Lovelace");
        assert_eq!(json["number"], 12_345_678);
        assert_eq!(json["balance"], 250);
        assert!(json.get("createdAt").is_some());
    }
}
