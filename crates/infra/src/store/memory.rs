//! In-memory account store (dev/test).

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use ferrobank_core::{Account, AccountId, NewAccount, StoreError};
use ferrobank_ledger::AccountStore;

/// Mutex-serialized account map with BIGSERIAL-like id assignment.
///
/// Every primitive runs under one lock, which makes `adjust_balance` and
/// `transfer_balances` indivisible exactly as the port requires. Deadlock
/// ordering is moot with a single lock.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    accounts: BTreeMap<AccountId, Account>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn create(&self, account: NewAccount) -> Result<Account, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let account = Account {
            id: AccountId::from(inner.next_id),
            first_name: account.first_name,
            last_name: account.last_name,
            number: account.number,
            balance: account.balance,
            created_at: account.created_at,
        };
        inner.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn get(&self, id: AccountId) -> Result<Account, StoreError> {
        self.inner
            .lock()
            .unwrap()
            .accounts
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn get_all(&self) -> Result<Vec<Account>, StoreError> {
        Ok(self.inner.lock().unwrap().accounts.values().cloned().collect())
    }

    async fn delete(&self, id: AccountId) -> Result<(), StoreError> {
        self.inner
            .lock()
            .unwrap()
            .accounts
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    async fn adjust_balance(&self, id: AccountId, delta: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let account = inner.accounts.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        if account.balance + delta < 0 {
            return Err(StoreError::Overdraw(id));
        }
        account.balance += delta;
        Ok(())
    }

    async fn transfer_balances(
        &self,
        from: AccountId,
        to: AccountId,
        amount: i64,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.accounts.contains_key(&to) {
            return Err(StoreError::NotFound(to));
        }
        let sender = inner.accounts.get_mut(&from).ok_or(StoreError::NotFound(from))?;
        if sender.balance < amount {
            return Err(StoreError::Overdraw(from));
        }
        sender.balance -= amount;
        inner
            .accounts
            .get_mut(&to)
            .expect("receiver checked above")
            .balance += amount;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ferrobank_core::AccountNumber;

    fn new_account(number: i64) -> NewAccount {
        NewAccount {
            first_name: "Mem".to_string(),
            last_name: "Holder".to_string(),
            number: AccountNumber::from(number),
            balance: 0,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids_and_returns_the_stored_row() {
        let store = MemoryAccountStore::new();

        let first = store.create(new_account(10_000_001)).await.unwrap();
        let second = store.create(new_account(10_000_002)).await.unwrap();
        assert_ne!(first.id, second.id);

        // The id handed back is the id the row is fetchable under.
        assert_eq!(store.get(first.id).await.unwrap(), first);
        assert_eq!(store.get(second.id).await.unwrap(), second);
    }

    #[tokio::test]
    async fn adjust_balance_refuses_to_overdraw() {
        let store = MemoryAccountStore::new();
        let account = store.create(new_account(10_000_001)).await.unwrap();

        store.adjust_balance(account.id, 50).await.unwrap();
        let err = store.adjust_balance(account.id, -60).await.unwrap_err();
        assert_eq!(err, StoreError::Overdraw(account.id));
        assert_eq!(store.get(account.id).await.unwrap().balance, 50);
    }

    #[tokio::test]
    async fn transfer_applies_both_legs_or_neither() {
        let store = MemoryAccountStore::new();
        let a = store.create(new_account(10_000_001)).await.unwrap();
        let b = store.create(new_account(10_000_002)).await.unwrap();
        store.adjust_balance(a.id, 100).await.unwrap();

        store.transfer_balances(a.id, b.id, 70).await.unwrap();
        assert_eq!(store.get(a.id).await.unwrap().balance, 30);
        assert_eq!(store.get(b.id).await.unwrap().balance, 70);

        // Insufficient funds: neither balance moves.
        let err = store.transfer_balances(a.id, b.id, 31).await.unwrap_err();
        assert_eq!(err, StoreError::Overdraw(a.id));
        assert_eq!(store.get(a.id).await.unwrap().balance, 30);
        assert_eq!(store.get(b.id).await.unwrap().balance, 70);

        // Missing receiver: the debit must not land either.
        let missing = AccountId::from(999);
        let err = store.transfer_balances(a.id, missing, 10).await.unwrap_err();
        assert_eq!(err, StoreError::NotFound(missing));
        assert_eq!(store.get(a.id).await.unwrap().balance, 30);
    }

    #[tokio::test]
    async fn deleted_rows_are_gone_for_good() {
        let store = MemoryAccountStore::new();
        let account = store.create(new_account(10_000_001)).await.unwrap();

        store.delete(account.id).await.unwrap();
        assert_eq!(
            store.get(account.id).await.unwrap_err(),
            StoreError::NotFound(account.id)
        );
        assert_eq!(
            store.delete(account.id).await.unwrap_err(),
            StoreError::NotFound(account.id)
        );
    }
}
