use crate::utils::Redact;
use crate::{Error, Result};
use std::fmt::{Debug, Formatter};

/// Token is the user-specific identifier/secret pair that authorizes
/// access to a protected resource on the user's behalf.
///
/// It is produced by the (out of scope) credential exchange flow and
/// consumed read-only during signing. A token whose identifier is empty
/// cannot sign anything; see [`Token::is_valid`].
#[derive(Clone, Default)]
pub struct Token {
    /// Token identifier, sent as `oauth_token`.
    pub identifier: String,
    /// Token secret, part of the signing key. Never sent on the wire.
    pub secret: String,
}

impl Token {
    /// Create a new token from an identifier and secret pair.
    pub fn new(identifier: &str, secret: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            secret: secret.to_string(),
        }
    }

    /// Check if the token can be used for signing.
    ///
    /// An empty identifier means "no token"; signing with it must fail
    /// with [`crate::ErrorKind::EmptyToken`].
    pub fn is_valid(&self) -> bool {
        !self.identifier.is_empty()
    }
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("identifier", &self.identifier)
            .field("secret", &Redact::from(&self.secret))
            .finish()
    }
}

/// TokenSource supplies the token to sign the next request with.
///
/// Dynamic implementations may refresh a token over the network or block
/// on an internal lock; the transport only observes the call succeeding
/// or failing.
#[async_trait::async_trait]
pub trait TokenSource: Debug + Send + Sync + 'static {
    /// Return the current token.
    ///
    /// Fails with [`crate::ErrorKind::TokenUnavailable`] if no token can
    /// be produced.
    async fn token(&self) -> Result<Token>;
}

/// StaticTokenSource always returns the same configured token.
#[derive(Debug, Clone)]
pub struct StaticTokenSource {
    token: Option<Token>,
}

impl StaticTokenSource {
    /// Create a source that always returns `token`.
    pub fn new(token: Token) -> Self {
        Self { token: Some(token) }
    }

    /// Create a source that has no token and always fails.
    ///
    /// Useful for callers that want the unauthenticated state to be an
    /// explicit value rather than a missing source.
    pub fn empty() -> Self {
        Self { token: None }
    }
}

#[async_trait::async_trait]
impl TokenSource for StaticTokenSource {
    async fn token(&self) -> Result<Token> {
        self.token
            .clone()
            .ok_or_else(|| Error::token_unavailable("static token source has no token"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[tokio::test]
    async fn test_static_token_source() -> anyhow::Result<()> {
        let source = StaticTokenSource::new(Token::new("access_token", "access_secret"));
        let token = source.token().await?;
        assert_eq!(token.identifier, "access_token");
        assert_eq!(token.secret, "access_secret");
        assert!(token.is_valid());
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_static_token_source() {
        let source = StaticTokenSource::empty();
        let err = source.token().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TokenUnavailable);
        assert!(err.is_token_error());
    }

    #[test]
    fn test_token_without_identifier_is_invalid() {
        assert!(!Token::default().is_valid());
        assert!(!Token::new("", "secret").is_valid());
        assert!(Token::new("id", "").is_valid());
    }

    #[test]
    fn test_token_debug_redacts_secret() {
        let token = Token::new("access_token", "super_secret_value");
        let out = format!("{token:?}");
        assert!(out.contains("access_token"));
        assert!(!out.contains("super_secret_value"));
    }
}
