//! Reqwest-based sender implementation for oauth1.
//!
//! This crate provides [`ReqwestHttpSend`], the base sender a
//! [`Transport`][oauth1_core::Transport] delegates signed requests to,
//! implemented on top of a `reqwest::Client`.
//!
//! ## Example
//!
//! ```no_run
//! use oauth1_core::{Config, RequestSigner, StaticTokenSource, Token, Transport};
//! use oauth1_http_send_reqwest::ReqwestHttpSend;
//!
//! let transport = Transport::new(ReqwestHttpSend::default())
//!     .with_token_source(StaticTokenSource::new(Token::new(
//!         "access_token",
//!         "access_secret",
//!     )))
//!     .with_signer(RequestSigner::new(Config::new(
//!         "consumer_key",
//!         "consumer_secret",
//!     )));
//! ```
//!
//! Pass a preconfigured client to [`ReqwestHttpSend::new`] to reuse
//! connection pools, proxies, or TLS settings. Retry and timeout policy
//! belong to that client; this crate forwards requests as-is.

#![warn(missing_docs)]

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use oauth1_core::{Error, HttpSend, Result};
use reqwest::{Client, Request};

/// ReqwestHttpSend sends signed requests with a `reqwest::Client`.
#[derive(Debug, Default)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with an existing `reqwest::Client`.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req).map_err(|err| {
            Error::request_invalid("failed to convert http request").with_source(err)
        })?;
        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|err| Error::unexpected("failed to send http request").with_source(err))?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|err| Error::unexpected("failed to read response body").with_source(err))?;

        Ok(http::Response::from_parts(parts, bs))
    }
}
