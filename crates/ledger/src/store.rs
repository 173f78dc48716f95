//! Ledger store port.

use std::sync::Arc;

use async_trait::async_trait;

use ferrobank_core::{Account, AccountId, NewAccount, StoreError};

/// Contract the ledger engine requires from a durable account store.
///
/// The two balance primitives are where the concurrency burden sits. The
/// engine validates against a balance it has read, but that read can go stale
/// the moment another request lands on the same row, so the store must make
/// each primitive indivisible on its own:
///
/// - [`adjust_balance`](AccountStore::adjust_balance) serializes concurrent
///   callers on the same id (row lock or equivalent) and refuses to drive a
///   balance negative.
/// - [`transfer_balances`](AccountStore::transfer_balances) applies debit and
///   credit as one transactional unit; a failure on either leg leaves both
///   rows untouched.
///
/// Mutations on *different* accounts may proceed fully in parallel.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Persist a new account and return it as stored.
    ///
    /// The returned id is the one the store assigned; callers must not trust
    /// any identifier they generated themselves.
    async fn create(&self, account: NewAccount) -> Result<Account, StoreError>;

    async fn get(&self, id: AccountId) -> Result<Account, StoreError>;

    /// All accounts, in store-defined (not guaranteed stable) order.
    async fn get_all(&self) -> Result<Vec<Account>, StoreError>;

    /// Hard delete. Subsequent lookups of `id` fail with `NotFound`.
    async fn delete(&self, id: AccountId) -> Result<(), StoreError>;

    /// Atomically apply `balance += delta`.
    ///
    /// Fails `Overdraw` (applying nothing) if the result would be negative.
    async fn adjust_balance(&self, id: AccountId, delta: i64) -> Result<(), StoreError>;

    /// Atomically move `amount` from `from` to `to`: both adjustments land or
    /// neither does. Implementations must take row locks in ascending id
    /// order so crossing transfers cannot deadlock.
    async fn transfer_balances(
        &self,
        from: AccountId,
        to: AccountId,
        amount: i64,
    ) -> Result<(), StoreError>;
}

#[async_trait]
impl<T: AccountStore + ?Sized> AccountStore for Arc<T> {
    async fn create(&self, account: NewAccount) -> Result<Account, StoreError> {
        (**self).create(account).await
    }

    async fn get(&self, id: AccountId) -> Result<Account, StoreError> {
        (**self).get(id).await
    }

    async fn get_all(&self) -> Result<Vec<Account>, StoreError> {
        (**self).get_all().await
    }

    async fn delete(&self, id: AccountId) -> Result<(), StoreError> {
        (**self).delete(id).await
    }

    async fn adjust_balance(&self, id: AccountId, delta: i64) -> Result<(), StoreError> {
        (**self).adjust_balance(id, delta).await
    }

    async fn transfer_balances(
        &self,
        from: AccountId,
        to: AccountId,
        amount: i64,
    ) -> Result<(), StoreError> {
        (**self).transfer_balances(from, to, amount).await
    }
}
