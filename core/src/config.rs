use crate::clock::{Clock, SystemClock};
use crate::nonce::{NonceGenerator, RandNonce};
use crate::utils::Redact;
use crate::{Error, Result};
use std::fmt;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// SignatureMethod selects the algorithm used to compute `oauth_signature`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignatureMethod {
    /// HMAC-SHA1, the protocol baseline. This is the default.
    #[default]
    HmacSha1,
    /// HMAC-SHA256, accepted by servers that allow stronger digests.
    HmacSha256,
    /// PLAINTEXT, the signing key itself without any digest. Only
    /// meaningful over a confidential channel.
    Plaintext,
}

impl SignatureMethod {
    /// Protocol name of this method, sent as `oauth_signature_method`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureMethod::HmacSha1 => "HMAC-SHA1",
            SignatureMethod::HmacSha256 => "HMAC-SHA256",
            SignatureMethod::Plaintext => "PLAINTEXT",
        }
    }

    /// Parse a protocol method name.
    ///
    /// Fails with [`crate::ErrorKind::UnsupportedSignatureMethod`] for any
    /// name this crate cannot sign with, RSA-SHA1 included.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "HMAC-SHA1" => Ok(SignatureMethod::HmacSha1),
            "HMAC-SHA256" => Ok(SignatureMethod::HmacSha256),
            "PLAINTEXT" => Ok(SignatureMethod::Plaintext),
            _ => Err(Error::unsupported_signature_method(format!(
                "signature method {name} is not supported"
            ))),
        }
    }
}

impl fmt::Display for SignatureMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Config holds the consumer credentials and the override points of the
/// signing algorithm.
///
/// Constructed once and shared read-only across concurrent signing
/// operations; the `with_*` methods consume `self`, so a config cannot
/// change after it is handed to a signer.
#[derive(Clone)]
pub struct Config {
    consumer_key: String,
    consumer_secret: String,
    signature_method: SignatureMethod,
    nonce_generator: Arc<dyn NonceGenerator>,
    clock: Arc<dyn Clock>,
}

impl Config {
    /// Create a config from the application's consumer credentials,
    /// defaulting to HMAC-SHA1 with random nonces and the wall clock.
    pub fn new(consumer_key: &str, consumer_secret: &str) -> Self {
        Self {
            consumer_key: consumer_key.to_string(),
            consumer_secret: consumer_secret.to_string(),
            signature_method: SignatureMethod::default(),
            nonce_generator: Arc::new(RandNonce),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the signature method.
    pub fn with_signature_method(mut self, method: SignatureMethod) -> Self {
        self.signature_method = method;
        self
    }

    /// Replace the nonce generator implementation.
    pub fn with_nonce_generator(mut self, nonce: impl NonceGenerator) -> Self {
        self.nonce_generator = Arc::new(nonce);
        self
    }

    /// Replace the clock implementation.
    pub fn with_clock(mut self, clock: impl Clock) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Consumer key identifying the calling application.
    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    /// The configured signature method.
    pub fn signature_method(&self) -> SignatureMethod {
        self.signature_method
    }

    pub(crate) fn consumer_secret(&self) -> &str {
        &self.consumer_secret
    }

    pub(crate) fn nonce(&self) -> String {
        self.nonce_generator.nonce()
    }

    pub(crate) fn timestamp(&self) -> i64 {
        self.clock.now_unix()
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &Redact::from(&self.consumer_secret))
            .field("signature_method", &self.signature_method)
            .field("nonce_generator", &self.nonce_generator)
            .field("clock", &self.clock)
            .finish()
    }
}
