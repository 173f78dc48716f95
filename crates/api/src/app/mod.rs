//! HTTP API application wiring (axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: store selection + ledger engine + token authority
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request payloads and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use chrono::Duration;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// The token secret and ttl are injected here rather than read from the
/// environment so tests can pin both.
pub async fn build_app(jwt_secret: String, token_ttl: Duration) -> Router {
    let services = Arc::new(services::build_services(jwt_secret.as_bytes(), token_ttl).await);
    let auth_state = middleware::AuthState {
        tokens: services.tokens(),
    };

    let protected = routes::protected_router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    routes::public_router()
        .merge(protected)
        .layer(Extension(services))
}
