use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use geoportal_core::UserId;

/// JWT claims carried by an access token.
///
/// The role name rides along for display only; authorization always goes
/// through the permission resolver, never through `role` directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthClaims {
    /// Subject: the authenticated user.
    pub sub: UserId,

    /// Name of the user's role at issuance time, if any.
    pub role: Option<String>,

    /// Issued-at (seconds since epoch).
    pub iat: i64,

    /// Expiration (seconds since epoch).
    pub exp: i64,
}

impl AuthClaims {
    pub fn new(sub: UserId, role: Option<String>, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub,
            role,
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_follows_ttl() {
        let now = Utc::now();
        let claims = AuthClaims::new(UserId::from_i32(7), Some("admin".into()), now, Duration::hours(24));
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
        assert_eq!(claims.sub.as_i32(), 7);
    }
}
