//! Ledger engine: monetary invariants around raw store mutation.

use ferrobank_core::{Account, AccountId, LedgerError, LedgerResult, NewAccount, StoreError};

use crate::store::AccountStore;

/// Applies deposits, withdrawals and transfers against an [`AccountStore`],
/// enforcing the balance invariants the store alone cannot express.
///
/// The engine pre-checks every precondition against freshly read state, and
/// relies on the store's atomic primitives to keep those checks valid at
/// application time: a concurrent mutation that invalidates a pre-check
/// surfaces as a store-level `Overdraw` and is reported exactly like a failed
/// pre-check. No partial effect is ever observable.
pub struct LedgerEngine<S> {
    store: S,
}

impl<S: AccountStore> LedgerEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Open a zero-balance account and return the store's authoritative record.
    pub async fn open_account(&self, first_name: &str, last_name: &str) -> LedgerResult<Account> {
        let account = self.store.create(NewAccount::new(first_name, last_name)).await?;
        tracing::info!(id = %account.id, number = %account.number, "account opened");
        Ok(account)
    }

    pub async fn account(&self, id: AccountId) -> LedgerResult<Account> {
        self.store.get(id).await.map_err(|e| match e {
            StoreError::NotFound(id) => LedgerError::NotFound(id),
            other => other.into(),
        })
    }

    pub async fn accounts(&self) -> LedgerResult<Vec<Account>> {
        Ok(self.store.get_all().await?)
    }

    /// Hard-delete an account. Every later operation on the id fails NotFound.
    pub async fn close_account(&self, id: AccountId) -> LedgerResult<()> {
        self.store.delete(id).await.map_err(|e| match e {
            StoreError::NotFound(id) => LedgerError::NotFound(id),
            other => LedgerError::from(other),
        })?;
        tracing::info!(%id, "account closed");
        Ok(())
    }

    /// Credit `amount` to the account. No upper bound.
    pub async fn deposit(&self, id: AccountId, amount: i64) -> LedgerResult<()> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount(amount));
        }
        match self.store.adjust_balance(id, amount).await {
            Ok(()) => {
                tracing::debug!(%id, amount, "deposit applied");
                Ok(())
            }
            Err(StoreError::NotFound(id)) => Err(LedgerError::NotFound(id)),
            Err(other) => Err(other.into()),
        }
    }

    /// Debit `amount` from the account, refusing to overdraw it.
    pub async fn withdraw(&self, id: AccountId, amount: i64) -> LedgerResult<()> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount(amount));
        }
        let account = self.account(id).await?;
        if amount > account.balance {
            return Err(LedgerError::InsufficientFunds(id));
        }
        match self.store.adjust_balance(id, -amount).await {
            Ok(()) => {
                tracing::debug!(%id, amount, "withdrawal applied");
                Ok(())
            }
            // Lost a race since the read above; same outcome as the pre-check.
            Err(StoreError::Overdraw(id)) => Err(LedgerError::InsufficientFunds(id)),
            Err(StoreError::NotFound(id)) => Err(LedgerError::NotFound(id)),
            Err(other) => Err(other.into()),
        }
    }

    /// Move `amount` between two distinct accounts as one atomic unit.
    ///
    /// Either both the debit and the credit land, or neither does; the sum of
    /// the two balances is conserved across the call.
    pub async fn transfer(&self, from: AccountId, to: AccountId, amount: i64) -> LedgerResult<()> {
        let sender = self.store.get(from).await.map_err(|e| match e {
            StoreError::NotFound(id) => LedgerError::SenderNotFound(id),
            other => LedgerError::from(other),
        })?;
        self.store.get(to).await.map_err(|e| match e {
            StoreError::NotFound(id) => LedgerError::ReceiverNotFound(id),
            other => LedgerError::from(other),
        })?;

        if amount <= 0 {
            return Err(LedgerError::InvalidAmount(amount));
        }
        if from == to {
            return Err(LedgerError::SelfTransfer);
        }
        if amount > sender.balance {
            return Err(LedgerError::InsufficientFunds(from));
        }

        match self.store.transfer_balances(from, to, amount).await {
            Ok(()) => {
                tracing::info!(%from, %to, amount, "transfer applied");
                Ok(())
            }
            Err(StoreError::Overdraw(id)) => Err(LedgerError::InsufficientFunds(id)),
            Err(StoreError::NotFound(id)) if id == from => Err(LedgerError::SenderNotFound(id)),
            Err(StoreError::NotFound(id)) => Err(LedgerError::ReceiverNotFound(id)),
            Err(other) => Err(other.into()),
        }
    }
}
