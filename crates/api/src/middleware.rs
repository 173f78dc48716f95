use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use ferrobank_auth::TokenAuthority;

use crate::app::errors;
use crate::context::CallerContext;

#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<TokenAuthority>,
}

/// Bearer-token gate for protected routes.
///
/// Verifies signature, algorithm and expiry, then stashes the claims as a
/// [`CallerContext`] extension for the handlers. Every failure mode — missing
/// header, malformed token, bad signature, wrong algorithm, expiry — produces
/// the same opaque denial.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let Some(token) = extract_bearer(req.headers()) else {
        return errors::access_denied();
    };

    let claims = match state.tokens.verify(token, Utc::now()) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!("token rejected: {e}");
            return errors::access_denied();
        }
    };

    req.extensions_mut().insert(CallerContext::new(claims));
    next.run(req).await
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let token = header.to_str().ok()?.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token)
}
