//! HS256 token issuance and verification.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use ferrobank_core::AccountNumber;

use crate::claims::{TokenClaims, TokenError, validate_claims};

/// Issues and verifies account-bound access tokens.
///
/// Both directions use the same symmetric secret, injected once at
/// construction so issuance and verification can never disagree on the key
/// and tests can substitute a fixed one.
///
/// Tokens are not revocable before expiry; there is no blacklist.
#[derive(Clone)]
pub struct TokenAuthority {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenAuthority {
    /// Build an authority over the process-wide secret.
    ///
    /// `ttl` is the lifetime granted to issued tokens.
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        // Pin the algorithm family: any token whose header claims something
        // other than HS256 (including "none") fails verification outright.
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry lives in our own `expiresAt` claim and is checked
        // deterministically in `validate_claims`, not by the decoder.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Issue a signed token bound to `account_number`, expiring `ttl` from `now`.
    pub fn issue(
        &self,
        account_number: AccountNumber,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = TokenClaims::new(account_number, now + self.ttl);
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Issue(e.to_string()))
    }

    /// Verify signature, algorithm, payload shape, and expiry of a presented
    /// token. Fails closed on every kind of defect.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
        let decoded = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding, &self.validation)
            .map_err(|e| TokenError::Invalid(e.to_string()))?;
        validate_claims(&decoded.claims, now)?;
        Ok(decoded.claims)
    }
}
