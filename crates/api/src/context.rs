use ferrobank_auth::TokenClaims;

/// Authenticated caller context for a request.
///
/// Present as a request extension on every protected route; carries the
/// verified token claims. Which account those claims actually grant access
/// to is decided per handler via the owner-binding check.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CallerContext {
    claims: TokenClaims,
}

impl CallerContext {
    pub fn new(claims: TokenClaims) -> Self {
        Self { claims }
    }

    pub fn claims(&self) -> &TokenClaims {
        &self.claims
    }
}
