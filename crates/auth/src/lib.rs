//! `ferrobank-auth` — access token issuance, verification, and the
//! owner-binding check.
//!
//! This crate is intentionally decoupled from HTTP and storage: it turns a
//! secret plus an account number into a signed token, and a presented token
//! plus a loaded account into an allow/deny decision. Where the account comes
//! from is the caller's business.

pub mod authorize;
pub mod claims;
pub mod token;

pub use authorize::{AuthzError, authorize_account_access};
pub use claims::{TokenClaims, TokenError, validate_claims};
pub use token::TokenAuthority;
