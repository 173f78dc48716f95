use axum::{
    Router,
    routing::{get, post},
};

pub mod accounts;
pub mod common;
pub mod ledger;
pub mod system;

/// Routes served without a token.
pub fn public_router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route(
            "/accounts",
            post(accounts::create_account).get(accounts::list_accounts),
        )
}

/// Routes gated behind the bearer-token guard.
pub fn protected_router() -> Router {
    Router::new()
        .route(
            "/accounts/:id",
            get(accounts::get_account).delete(accounts::delete_account),
        )
        .route("/deposit", post(ledger::deposit))
        .route("/withdraw", post(ledger::withdraw))
        .route("/transfer", post(ledger::transfer))
}
