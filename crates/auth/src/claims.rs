//! Token claims model (transport-agnostic).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use ferrobank_core::AccountNumber;

/// Claims carried by an access token.
///
/// The payload binds the token to one account *number* (never the row id) and
/// an expiration instant. Both fields are required and strongly typed; a
/// payload that does not match this shape is rejected at decode time, before
/// any comparison happens.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TokenClaims {
    /// Account number the token grants access to.
    pub account_number: AccountNumber,

    /// Expiration instant, unix seconds.
    pub expires_at: i64,
}

impl TokenClaims {
    pub fn new(account_number: AccountNumber, expires_at: DateTime<Utc>) -> Self {
        Self {
            account_number,
            expires_at: expires_at.timestamp(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    /// Parse, payload-shape, algorithm, or signature failure. The guard fails
    /// closed on all of them.
    #[error("token rejected: {0}")]
    Invalid(String),

    #[error("token could not be issued: {0}")]
    Issue(String),
}

/// Deterministically validate token claims against the given instant.
///
/// Signature verification and decoding happen in [`crate::TokenAuthority`];
/// this checks only the time window, with `now` injected so tests control the
/// clock.
pub fn validate_claims(claims: &TokenClaims, now: DateTime<Utc>) -> Result<(), TokenError> {
    if now.timestamp() >= claims.expires_at {
        return Err(TokenError::Expired);
    }
    Ok(())
}
