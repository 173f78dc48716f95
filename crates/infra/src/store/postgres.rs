//! Postgres-backed account store.
//!
//! Atomicity strategy:
//!
//! - `adjust_balance` is a single conditional UPDATE (`balance + delta >= 0`
//!   in the predicate), so the check and the write cannot be separated by a
//!   concurrent writer. The `CHECK (balance >= 0)` column constraint backs
//!   the same invariant at the schema level.
//! - `transfer_balances` runs in one transaction that locks both rows with
//!   `FOR UPDATE` in ascending id order before touching either balance.
//!   Crossing transfers therefore queue instead of deadlocking, and a failure
//!   on either leg rolls the whole transaction back. A caller disconnect
//!   mid-call either commits both legs or none.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPool;
use sqlx::{FromRow, Row};
use tracing::instrument;

use ferrobank_core::{Account, AccountId, AccountNumber, NewAccount, StoreError};
use ferrobank_ledger::AccountStore;

const CREATE_ACCOUNT_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS account (
    id BIGSERIAL PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    number BIGINT NOT NULL UNIQUE,
    balance BIGINT NOT NULL DEFAULT 0 CHECK (balance >= 0),
    created_at TIMESTAMPTZ NOT NULL
)
"#;

const SELECT_COLUMNS: &str = "id, first_name, last_name, number, balance, created_at";

#[derive(Debug, Clone)]
pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let pool = PgPool::connect(url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self { pool })
    }

    /// Idempotent table bootstrap; run once at startup before serving.
    #[instrument(skip(self), err)]
    pub async fn init(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_ACCOUNT_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("init", e))?;
        Ok(())
    }
}

#[async_trait]
impl AccountStore for PostgresAccountStore {
    #[instrument(skip(self, account), fields(number = %account.number), err)]
    async fn create(&self, account: NewAccount) -> Result<Account, StoreError> {
        // RETURNING hands back the row as persisted; the id in it is the
        // store-assigned one, not anything the caller made up.
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO account (first_name, last_name, number, balance, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, first_name, last_name, number, balance, created_at
            "#,
        )
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(account.number.as_i64())
        .bind(account.balance)
        .bind(account.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create", e))?;

        Ok(row.into())
    }

    #[instrument(skip(self), err)]
    async fn get(&self, id: AccountId) -> Result<Account, StoreError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM account WHERE id = $1"
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("get", e))?;

        row.map(Into::into).ok_or(StoreError::NotFound(id))
    }

    #[instrument(skip(self), err)]
    async fn get_all(&self) -> Result<Vec<Account>, StoreError> {
        let rows = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM account ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_all", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: AccountId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM account WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn adjust_balance(&self, id: AccountId, delta: i64) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE account SET balance = balance + $2 WHERE id = $1 AND balance + $2 >= 0",
        )
        .bind(id.as_i64())
        .bind(delta)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("adjust_balance", e))?;

        if result.rows_affected() == 1 {
            return Ok(());
        }

        // Nothing was updated: the row is missing or the delta would overdraw.
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM account WHERE id = $1)")
            .bind(id.as_i64())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("adjust_balance", e))?;

        if exists {
            Err(StoreError::Overdraw(id))
        } else {
            Err(StoreError::NotFound(id))
        }
    }

    #[instrument(skip(self), err)]
    async fn transfer_balances(
        &self,
        from: AccountId,
        to: AccountId,
        amount: i64,
    ) -> Result<(), StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("transfer.begin", e))?;

        // Lock both rows in ascending id order. Returning early drops the
        // transaction, which rolls back anything done so far.
        let (first, second) = if from <= to { (from, to) } else { (to, from) };
        let mut sender_balance: i64 = 0;
        for id in [first, second] {
            let row = sqlx::query("SELECT balance FROM account WHERE id = $1 FOR UPDATE")
                .bind(id.as_i64())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| map_sqlx_error("transfer.lock", e))?;

            let Some(row) = row else {
                return Err(StoreError::NotFound(id));
            };
            if id == from {
                sender_balance = row
                    .try_get("balance")
                    .map_err(|e| map_sqlx_error("transfer.lock", e))?;
            }
        }

        if sender_balance < amount {
            return Err(StoreError::Overdraw(from));
        }

        sqlx::query("UPDATE account SET balance = balance - $2 WHERE id = $1")
            .bind(from.as_i64())
            .bind(amount)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("transfer.debit", e))?;
        sqlx::query("UPDATE account SET balance = balance + $2 WHERE id = $1")
            .bind(to.as_i64())
            .bind(amount)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("transfer.credit", e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("transfer.commit", e))?;
        Ok(())
    }
}

#[derive(Debug, FromRow)]
struct AccountRow {
    id: i64,
    first_name: String,
    last_name: String,
    number: i64,
    balance: i64,
    created_at: DateTime<Utc>,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Account {
            id: AccountId::from(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            number: AccountNumber::from(row.number),
            balance: row.balance,
            created_at: row.created_at,
        }
    }
}

fn map_sqlx_error(op: &'static str, err: sqlx::Error) -> StoreError {
    StoreError::Backend(format!("{op}: {err}"))
}
