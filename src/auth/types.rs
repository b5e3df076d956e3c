//! Token cache types

use chrono::{DateTime, Utc};

/// Leeway applied before the actual expiry so a token is never used at the
/// very edge of its lifetime.
const EXPIRY_LEEWAY_SECONDS: i64 = 30;

/// Cached access token with expiration
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The access token
    pub token: String,
    /// When the token expires; `None` means it never does
    pub expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    /// Create a new cached token
    pub fn new(token: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { token, expires_at }
    }

    /// Create a token that expires in N seconds from now
    pub fn expires_in(token: String, seconds: i64) -> Self {
        let expires_at = Utc::now() + chrono::Duration::seconds(seconds);
        Self {
            token,
            expires_at: Some(expires_at),
        }
    }

    /// Check whether the token should be considered expired
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(at) => Utc::now() + chrono::Duration::seconds(EXPIRY_LEEWAY_SECONDS) >= at,
            None => false,
        }
    }
}

#[cfg(test)]
mod cached_token_tests {
    use super::*;

    #[test]
    fn test_never_expires() {
        let token = CachedToken::new("t".to_string(), None);
        assert!(!token.is_expired());
    }

    #[test]
    fn test_expired_within_leeway() {
        let token = CachedToken::expires_in("t".to_string(), 5);
        assert!(token.is_expired());
    }

    #[test]
    fn test_fresh_token() {
        let token = CachedToken::expires_in("t".to_string(), 3600);
        assert!(!token.is_expired());
    }
}
