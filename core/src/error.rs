use std::fmt;
use thiserror::Error;

/// The error type for oauth1 operations
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport has no token source configured
    MissingTokenSource,

    /// Transport has no signer configured
    MissingSigner,

    /// The token source failed to produce a token
    TokenUnavailable,

    /// A token was produced but its identifier is empty
    EmptyToken,

    /// The configured signature method is not supported
    UnsupportedSignatureMethod,

    /// Request cannot be signed (missing authority, bad header value, etc.)
    RequestInvalid,

    /// Unexpected errors (network, I/O, base sender errors, etc.)
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Check if this error came from obtaining or validating a token.
    ///
    /// `TokenUnavailable` and `EmptyToken` are handled identically by the
    /// transport; the distinct kinds exist so implementers can tell the
    /// root cause apart.
    pub fn is_token_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::TokenUnavailable | ErrorKind::EmptyToken
        )
    }
}

// Convenience constructors
impl Error {
    /// Create a missing token source error
    pub fn missing_token_source(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingTokenSource, message)
    }

    /// Create a missing signer error
    pub fn missing_signer(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingSigner, message)
    }

    /// Create a token unavailable error
    pub fn token_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenUnavailable, message)
    }

    /// Create an empty token error
    pub fn empty_token(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EmptyToken, message)
    }

    /// Create an unsupported signature method error
    pub fn unsupported_signature_method(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnsupportedSignatureMethod, message)
    }

    /// Create a request invalid error
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::MissingTokenSource => write!(f, "missing token source"),
            ErrorKind::MissingSigner => write!(f, "missing signer"),
            ErrorKind::TokenUnavailable => write!(f, "token unavailable"),
            ErrorKind::EmptyToken => write!(f, "empty token"),
            ErrorKind::UnsupportedSignatureMethod => {
                write!(f, "unsupported signature method")
            }
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::ToStrError> for Error {
    fn from(err: http::header::ToStrError) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}
