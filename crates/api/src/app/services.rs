//! Runtime service wiring: store selection, ledger engine, token authority.

use std::sync::Arc;

use chrono::Duration;

use ferrobank_auth::TokenAuthority;
use ferrobank_infra::{MemoryAccountStore, PostgresAccountStore};
use ferrobank_ledger::{AccountStore, LedgerEngine};

/// Store handle shared by every request; no account state is cached in
/// process, so every balance check reads the latest durable state.
pub type DynAccountStore = Arc<dyn AccountStore>;

pub struct AppServices {
    engine: LedgerEngine<DynAccountStore>,
    tokens: Arc<TokenAuthority>,
}

impl AppServices {
    pub fn engine(&self) -> &LedgerEngine<DynAccountStore> {
        &self.engine
    }

    pub fn tokens(&self) -> Arc<TokenAuthority> {
        self.tokens.clone()
    }
}

/// Select the account store from the environment and wire the services.
///
/// `DATABASE_URL` set → Postgres, with idempotent table bootstrap before
/// serving; otherwise the in-memory store (dev/test).
pub async fn build_services(secret: &[u8], token_ttl: Duration) -> AppServices {
    let store: DynAccountStore = match std::env::var("DATABASE_URL") {
        Ok(url) => {
            let store = PostgresAccountStore::connect(&url)
                .await
                .expect("failed to connect to postgres");
            store
                .init()
                .await
                .expect("failed to bootstrap account table");
            tracing::info!("using postgres account store");
            Arc::new(store)
        }
        Err(_) => {
            tracing::info!("DATABASE_URL not set; using in-memory account store");
            Arc::new(MemoryAccountStore::new())
        }
    };

    AppServices {
        engine: LedgerEngine::new(store),
        tokens: Arc::new(TokenAuthority::new(secret, token_ttl)),
    }
}
