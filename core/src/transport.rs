use crate::sign::SignRequest;
use crate::token::TokenSource;
use crate::{Error, Result};
use bytes::Bytes;
use std::fmt::Debug;
use std::sync::Arc;

/// HttpSend is the base sender capability the transport delegates to
/// after signing.
///
/// This trait is designed for the transport; please don't use it as a
/// general HTTP client abstraction.
#[async_trait::async_trait]
pub trait HttpSend: Debug + Send + Sync + 'static {
    /// Send the http request and return the response.
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>>;
}

/// Transport decorates a base sender so every outgoing request carries a
/// signed OAuth1 Authorization header.
///
/// The base sender is an explicit constructor argument; there is no
/// hidden global default. The token source and signer are attached with
/// the `with_*` methods, and a transport missing either fails every
/// `send` with the matching configuration error.
///
/// A transport is cheap to clone and safe to share across concurrent
/// `send` calls.
#[derive(Clone, Debug)]
pub struct Transport {
    base: Arc<dyn HttpSend>,
    source: Option<Arc<dyn TokenSource>>,
    signer: Option<Arc<dyn SignRequest>>,
}

impl Transport {
    /// Create a transport delegating to `base`.
    pub fn new(base: impl HttpSend) -> Self {
        Self {
            base: Arc::new(base),
            source: None,
            signer: None,
        }
    }

    /// Attach the token source supplying signing tokens.
    pub fn with_token_source(mut self, source: impl TokenSource) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    /// Attach the signer that computes Authorization headers.
    pub fn with_signer(mut self, signer: impl SignRequest) -> Self {
        self.signer = Some(Arc::new(signer));
        self
    }

    fn components(&self) -> Result<(&Arc<dyn TokenSource>, &Arc<dyn SignRequest>)> {
        let source = self
            .source
            .as_ref()
            .ok_or_else(|| Error::missing_token_source("transport has no token source"))?;
        let signer = self
            .signer
            .as_ref()
            .ok_or_else(|| Error::missing_signer("transport has no signer"))?;

        Ok((source, signer))
    }

    /// Sign a private clone of `req` and forward it to the base sender,
    /// returning its response and error unchanged.
    ///
    /// The caller's request is never mutated. Configuration errors and
    /// token errors surface before the base sender is touched; the token
    /// source is invoked once purely as a pre-flight check and once more
    /// for the actual signing, so sources with per-call side effects pay
    /// that cost twice.
    pub async fn send(&self, req: &http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let (source, signer) = self.components()?;

        // Pre-flight: surface token problems even before any request
        // resources are committed.
        source.token().await?;

        let token = source.token().await?;
        let mut signed = clone_request(req);
        signer.sign_request(&mut signed, &token)?;

        self.base.http_send(signed).await
    }
}

/// A clone of the request: fresh copies of method, uri, version and body,
/// plus an independent header map, so setting a header on the clone never
/// shows through to the original. Extensions are not clonable and play no
/// part in signing, so they stay behind.
fn clone_request(req: &http::Request<Bytes>) -> http::Request<Bytes> {
    let mut clone = http::Request::new(req.body().clone());
    *clone.method_mut() = req.method().clone();
    *clone.uri_mut() = req.uri().clone();
    *clone.version_mut() = req.version();
    *clone.headers_mut() = req.headers().clone();

    clone
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::AUTHORIZATION;

    #[test]
    fn test_clone_request_is_independent() {
        let req = http::Request::get("http://example.com/hello?q=world")
            .header("x-custom", "value")
            .body(Bytes::from_static(b"body"))
            .unwrap();

        let mut clone = clone_request(&req);
        clone
            .headers_mut()
            .insert(AUTHORIZATION, "OAuth signed".parse().unwrap());

        assert_eq!(clone.uri(), req.uri());
        assert_eq!(clone.body(), req.body());
        assert_eq!(clone.headers().get("x-custom"), req.headers().get("x-custom"));
        assert!(req.headers().get(AUTHORIZATION).is_none());
    }
}
