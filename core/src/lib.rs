//! Core components for signing HTTP requests with OAuth 1.0a.
//!
//! This crate computes the OAuth parameter set, builds the canonical
//! signature base string, generates the HMAC signature, and assembles the
//! Authorization header, wrapped by a transport decorator that performs
//! this work transparently for every outgoing request.
//!
//! ## Overview
//!
//! The crate is built around a few small capabilities:
//!
//! - [`TokenSource`]: supplies the token to sign the next request with
//! - [`SignRequest`]: computes and attaches the Authorization header
//! - [`HttpSend`]: the base sender the signed request is forwarded to
//! - [`Transport`]: ties the three together for every `send` call
//!
//! [`Clock`] and [`NonceGenerator`] are override points that make
//! signatures deterministic under test; production code keeps their
//! defaults.
//!
//! The three-legged OAuth handshake, token persistence, and HTTP client
//! policy (retries, timeouts) are out of scope: callers hand in a
//! [`Token`] and a base sender, this crate only signs.
//!
//! ## Example
//!
//! ```no_run
//! use oauth1_core::{
//!     Config, RequestSigner, Result, StaticTokenSource, Token, Transport,
//! };
//! # use oauth1_core::HttpSend;
//! # use bytes::Bytes;
//! # #[derive(Debug)]
//! # struct MySender;
//! # #[async_trait::async_trait]
//! # impl HttpSend for MySender {
//! #     async fn http_send(
//! #         &self,
//! #         req: http::Request<Bytes>,
//! #     ) -> Result<http::Response<Bytes>> {
//! #         todo!()
//! #     }
//! # }
//!
//! # async fn example() -> Result<()> {
//! let config = Config::new("consumer_key", "consumer_secret");
//! let token = Token::new("access_token", "access_secret");
//!
//! let transport = Transport::new(MySender)
//!     .with_token_source(StaticTokenSource::new(token))
//!     .with_signer(RequestSigner::new(config));
//!
//! let req = http::Request::get("https://api.example.com/resource")
//!     .body(Bytes::new())
//!     .unwrap();
//!
//! // The request goes out with an `Authorization: OAuth ...` header;
//! // `req` itself is left untouched.
//! let resp = transport.send(&req).await?;
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};

mod token;
pub use token::{StaticTokenSource, Token, TokenSource};

mod clock;
pub use clock::{Clock, FixedClock, SystemClock};

mod nonce;
pub use nonce::{FixedNonce, NonceGenerator, RandNonce};

mod config;
pub use config::{Config, SignatureMethod};

mod sign;
pub use sign::{RequestSigner, SignRequest};

mod transport;
pub use transport::{HttpSend, Transport};
