use std::sync::{Arc, RwLock};

use crate::error::{BookingError, Result};

/// Supplies the bearer token of the signed-in user. Token storage itself
/// lives outside this crate.
pub trait TokenProvider: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

/// A token held in memory; `set` and `clear` follow login and logout.
#[derive(Debug, Clone, Default)]
pub struct SessionToken {
    token: Arc<RwLock<Option<String>>>,
}

impl SessionToken {
    pub fn new(token: Option<String>) -> Self {
        SessionToken { token: Arc::new(RwLock::new(token)) }
    }

    pub fn set(&self, token: &str) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token.to_string());
        }
    }

    pub fn clear(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }
}

impl TokenProvider for SessionToken {
    fn bearer_token(&self) -> Option<String> {
        self.token
            .read()
            .ok()
            .and_then(|g| g.as_ref().cloned())
            .filter(|t| !t.trim().is_empty())
    }
}

/// Fails before any request is made when no token is available.
pub fn require_token(provider: &dyn TokenProvider) -> Result<String> {
    provider.bearer_token().ok_or(BookingError::AuthenticationMissing)
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_from_header(header: Option<&str>) -> Option<String> {
    let value = header?.trim();
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    if token.is_empty() { None } else { Some(token.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_token_fails_fast() {
        let token = SessionToken::new(None);
        assert!(matches!(require_token(&token), Err(BookingError::AuthenticationMissing)));
        token.set("demo-token");
        assert_eq!(require_token(&token).unwrap(), "demo-token");
        token.clear();
        assert!(token.bearer_token().is_none());
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let token = SessionToken::new(Some("  ".into()));
        assert!(token.bearer_token().is_none());
    }

    #[test]
    fn parses_bearer_header() {
        assert_eq!(bearer_from_header(Some("Bearer abc123")), Some("abc123".into()));
        assert_eq!(bearer_from_header(Some("bearer abc123")), Some("abc123".into()));
        assert_eq!(bearer_from_header(Some("Basic abc123")), None);
        assert_eq!(bearer_from_header(Some("Bearer ")), None);
        assert_eq!(bearer_from_header(None), None);
    }
}
