//! HS256 access token codec.
//!
//! Wraps `jsonwebtoken` so the rest of the system only ever deals with
//! [`AuthClaims`] and the two failure modes callers can act on.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use geoportal_core::UserId;

use crate::claims::AuthClaims;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token is invalid")]
    Invalid,
}

/// Issues and verifies signed access tokens.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenCodec {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Issue a token for the given identity, expiring `ttl` after `now`.
    pub fn issue(
        &self,
        user_id: UserId,
        role: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = AuthClaims::new(user_id, role, now, self.ttl);
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|_| TokenError::Invalid)
    }

    /// Verify signature and expiry, returning the embedded claims.
    pub fn verify(&self, token: &str) -> Result<AuthClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = jsonwebtoken::decode::<AuthClaims>(token, &self.decoding, &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new(b"test-secret", Duration::hours(24))
    }

    #[test]
    fn issued_token_round_trips_identity() {
        let codec = codec();
        let token = codec
            .issue(UserId::from_i32(3), Some("surveyor".into()), Utc::now())
            .unwrap();

        let claims = codec.verify(&token).unwrap();
        assert_eq!(claims.sub.as_i32(), 3);
        assert_eq!(claims.role.as_deref(), Some("surveyor"));
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        let past = Utc::now() - Duration::hours(48);
        let token = codec().issue(UserId::from_i32(1), None, past).unwrap();

        assert_eq!(codec().verify(&token).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn wrong_secret_is_rejected_as_invalid() {
        let token = codec().issue(UserId::from_i32(1), None, Utc::now()).unwrap();

        let other = TokenCodec::new(b"another-secret", Duration::hours(24));
        assert_eq!(other.verify(&token).unwrap_err(), TokenError::Invalid);
    }

    #[test]
    fn garbage_is_rejected_as_invalid() {
        assert_eq!(codec().verify("not.a.jwt").unwrap_err(), TokenError::Invalid);
    }
}
