use crate::config::{Config, SignatureMethod};
use crate::hash::{base64_hmac_sha1, base64_hmac_sha256};
use crate::token::Token;
use crate::{Error, Result};
use bytes::Bytes;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::HeaderValue;
use log::debug;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt::Write;

const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
const OAUTH_NONCE: &str = "oauth_nonce";
const OAUTH_SIGNATURE: &str = "oauth_signature";
const OAUTH_SIGNATURE_METHOD: &str = "oauth_signature_method";
const OAUTH_TIMESTAMP: &str = "oauth_timestamp";
const OAUTH_TOKEN: &str = "oauth_token";
const OAUTH_VERSION: &str = "oauth_version";

const OAUTH_VERSION_1: &str = "1.0";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Everything outside RFC 3986's unreserved set gets percent-encoded,
/// `/` and `:` inside values included.
const ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, ENCODE_SET).to_string()
}

/// SignRequest computes and attaches the OAuth1 Authorization header.
///
/// The computation is pure and CPU bound, hence the synchronous
/// signature; only the request's Authorization header is mutated.
pub trait SignRequest: std::fmt::Debug + Send + Sync + 'static {
    /// Sign `req` with `token`, overwriting any prior Authorization
    /// header.
    fn sign_request(&self, req: &mut http::Request<Bytes>, token: &Token) -> Result<()>;
}

/// RequestSigner implements the OAuth 1.0a signing algorithm of RFC 5849:
/// canonical parameter normalization, signature base string construction,
/// HMAC computation, and Authorization header assembly.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    config: Config,
}

impl RequestSigner {
    /// Create a signer from a config.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// The six protocol parameters every signed request carries, before
    /// the signature itself is appended.
    fn oauth_params(&self, token: &Token) -> Vec<(String, String)> {
        vec![
            (OAUTH_CONSUMER_KEY.to_string(), self.config.consumer_key().to_string()),
            (OAUTH_NONCE.to_string(), self.config.nonce()),
            (
                OAUTH_SIGNATURE_METHOD.to_string(),
                self.config.signature_method().as_str().to_string(),
            ),
            (OAUTH_TIMESTAMP.to_string(), self.config.timestamp().to_string()),
            (OAUTH_TOKEN.to_string(), token.identifier.clone()),
            (OAUTH_VERSION.to_string(), OAUTH_VERSION_1.to_string()),
        ]
    }

    fn signature(&self, key: &str, base: &str) -> String {
        match self.config.signature_method() {
            SignatureMethod::HmacSha1 => base64_hmac_sha1(key.as_bytes(), base.as_bytes()),
            SignatureMethod::HmacSha256 => base64_hmac_sha256(key.as_bytes(), base.as_bytes()),
            SignatureMethod::Plaintext => key.to_string(),
        }
    }
}

impl SignRequest for RequestSigner {
    fn sign_request(&self, req: &mut http::Request<Bytes>, token: &Token) -> Result<()> {
        if !token.is_valid() {
            return Err(Error::empty_token("token identifier is empty"));
        }

        let mut oauth_params = self.oauth_params(token);

        // The base string covers the oauth parameters plus every request
        // parameter the protocol can see: URL query pairs and, for
        // form-encoded bodies, the body pairs.
        let mut signable = oauth_params.clone();
        signable.extend(query_params(req.uri()));
        signable.extend(form_body_params(req));

        let base = signature_base(req.method(), &base_uri(req.uri())?, &signable);
        let key = signing_key(self.config.consumer_secret(), &token.secret);
        debug!("oauth1 signature base string: {base}");

        oauth_params.push((OAUTH_SIGNATURE.to_string(), self.signature(&key, &base)));

        let mut value: HeaderValue = authorization_header(oauth_params)?.parse()?;
        value.set_sensitive(true);
        req.headers_mut().insert(AUTHORIZATION, value);

        Ok(())
    }
}

/// The request URL with query and fragment stripped, first segment of the
/// signature base string.
fn base_uri(uri: &http::Uri) -> Result<String> {
    let authority = uri
        .authority()
        .ok_or_else(|| Error::request_invalid("request without authority cannot be signed"))?;

    Ok(format!(
        "{}://{}{}",
        uri.scheme_str().unwrap_or("http"),
        authority,
        uri.path()
    ))
}

fn query_params(uri: &http::Uri) -> Vec<(String, String)> {
    uri.query()
        .map(|q| {
            form_urlencoded::parse(q.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect()
        })
        .unwrap_or_default()
}

/// Body parameters participate in the signature only for form-encoded
/// bodies; any other content type is opaque to the protocol.
fn form_body_params(req: &http::Request<Bytes>) -> Vec<(String, String)> {
    let is_form = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| {
            v.split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .eq_ignore_ascii_case(FORM_CONTENT_TYPE)
        })
        .unwrap_or(false);

    if !is_form || req.body().is_empty() {
        return Vec::new();
    }

    form_urlencoded::parse(req.body())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Percent-encode each pair, sort byte-lexicographically by encoded key
/// then encoded value, and join as `k=v` with `&`. Signer and verifier
/// must agree on this ordering or nothing else matters.
fn normalized_params(params: &[(String, String)]) -> String {
    let mut pairs: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    pairs.sort();

    let mut s = String::with_capacity(64);
    for (idx, (k, v)) in pairs.into_iter().enumerate() {
        if idx != 0 {
            s.push('&');
        }
        s.push_str(&k);
        s.push('=');
        s.push_str(&v);
    }

    s
}

fn signature_base(method: &http::Method, base_uri: &str, params: &[(String, String)]) -> String {
    format!(
        "{}&{}&{}",
        method.as_str().to_uppercase(),
        percent_encode(base_uri),
        percent_encode(&normalized_params(params))
    )
}

/// The HMAC key: encoded consumer secret and encoded token secret joined
/// by `&`. The second segment stays present even when the token carries
/// no secret.
fn signing_key(consumer_secret: &str, token_secret: &str) -> String {
    format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    )
}

/// `OAuth` followed by the seven oauth parameters as `k="enc(v)"`, comma
/// separated and sorted by key. Request query and body parameters never
/// appear here.
fn authorization_header(mut oauth_params: Vec<(String, String)>) -> Result<String> {
    oauth_params.sort();

    let mut s = String::from("OAuth ");
    for (idx, (k, v)) in oauth_params.into_iter().enumerate() {
        if idx != 0 {
            s.push_str(", ");
        }
        write!(s, "{}=\"{}\"", k, percent_encode(&v))?;
    }

    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::nonce::FixedNonce;
    use crate::ErrorKind;
    use pretty_assertions::assert_eq;

    fn fixed_config(method: SignatureMethod) -> Config {
        Config::new("consumer_key", "consumer_secret")
            .with_signature_method(method)
            .with_nonce_generator(FixedNonce::new("some_nonce"))
            .with_clock(FixedClock(123456789))
    }

    fn get_request(uri: &str) -> http::Request<Bytes> {
        http::Request::get(uri).body(Bytes::new()).unwrap()
    }

    #[test]
    fn test_percent_encode() {
        let cases = vec![
            ("abcABC123", "abcABC123"),
            ("-._~", "-._~"),
            ("%", "%25"),
            ("+", "%2B"),
            ("&=*", "%26%3D%2A"),
            ("Ladies + Gentlemen", "Ladies%20%2B%20Gentlemen"),
            ("http://example.com/a", "http%3A%2F%2Fexample.com%2Fa"),
            ("\u{2603}", "%E2%98%83"),
        ];

        for (input, expected) in cases {
            assert_eq!(percent_encode(input), expected, "Failed on input: {input}");
        }
    }

    #[test]
    fn test_signing_key_keeps_empty_token_secret_segment() {
        assert_eq!(signing_key("consumer_secret", ""), "consumer_secret&");
        assert_eq!(signing_key("s&1", "s/2"), "s%261&s%2F2");
    }

    #[test]
    fn test_base_uri_strips_query() -> Result<()> {
        let req = get_request("http://example.com/hello?q=world");
        assert_eq!(base_uri(req.uri())?, "http://example.com/hello");
        Ok(())
    }

    #[test]
    fn test_base_uri_requires_authority() {
        let req = get_request("/hello");
        let err = base_uri(req.uri()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }

    #[test]
    fn test_sign_get_request() -> Result<()> {
        let signer = RequestSigner::new(fixed_config(SignatureMethod::HmacSha1));
        let token = Token::new("access_token", "access_secret");

        let mut req = get_request("http://example.com/hello?q=world");
        signer.sign_request(&mut req, &token)?;

        let auth = req.headers().get(AUTHORIZATION).unwrap();
        assert!(auth.is_sensitive());
        assert_eq!(
            auth.to_str()?,
            "OAuth oauth_consumer_key=\"consumer_key\", \
             oauth_nonce=\"some_nonce\", \
             oauth_signature=\"kieF1fKyuZdNpb%2BKndaGqw080GY%3D\", \
             oauth_signature_method=\"HMAC-SHA1\", \
             oauth_timestamp=\"123456789\", \
             oauth_token=\"access_token\", \
             oauth_version=\"1.0\""
        );
        Ok(())
    }

    #[test]
    fn test_sign_is_deterministic() -> Result<()> {
        let signer = RequestSigner::new(fixed_config(SignatureMethod::HmacSha1));
        let token = Token::new("access_token", "access_secret");

        let mut first = get_request("http://example.com/hello?q=world");
        let mut second = get_request("http://example.com/hello?q=world");
        signer.sign_request(&mut first, &token)?;
        signer.sign_request(&mut second, &token)?;

        assert_eq!(
            first.headers().get(AUTHORIZATION),
            second.headers().get(AUTHORIZATION)
        );
        Ok(())
    }

    #[test]
    fn test_sign_post_with_query_and_form_body() -> Result<()> {
        let config = Config::new("xvz1evFS4wEEPTGEFPHBog", "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw")
            .with_nonce_generator(FixedNonce::new("kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg"))
            .with_clock(FixedClock(1318622958));
        let signer = RequestSigner::new(config);
        let token = Token::new(
            "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb",
            "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE",
        );

        let mut req = http::Request::post(
            "https://api.twitter.com/1.1/statuses/update.json?include_entities=true",
        )
        .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
        .body(Bytes::from_static(
            b"status=Hello%20Ladies%20%2B%20Gentlemen%2C%20a%20signed%20OAuth%20request%21",
        ))
        .unwrap();
        signer.sign_request(&mut req, &token)?;

        let auth = req.headers().get(AUTHORIZATION).unwrap().to_str()?;
        assert!(auth.contains("oauth_signature=\"hCtSmYh%2BiHYCEqBWrE7C7hYmtUk%3D\""));
        // Query and body parameters participate in the signature but must
        // stay out of the header.
        assert!(!auth.contains("include_entities"));
        assert!(!auth.contains("status"));
        Ok(())
    }

    #[test]
    fn test_sign_skips_non_form_body() -> Result<()> {
        let signer = RequestSigner::new(fixed_config(SignatureMethod::HmacSha1));
        let token = Token::new("access_token", "access_secret");

        // Same URL as the GET vector; a JSON body must not change the
        // signature.
        let mut req = http::Request::get("http://example.com/hello?q=world")
            .header(CONTENT_TYPE, "application/json")
            .body(Bytes::from_static(b"{\"q\":\"world\"}"))
            .unwrap();
        signer.sign_request(&mut req, &token)?;

        let auth = req.headers().get(AUTHORIZATION).unwrap().to_str()?;
        assert!(auth.contains("oauth_signature=\"kieF1fKyuZdNpb%2BKndaGqw080GY%3D\""));
        Ok(())
    }

    #[test]
    fn test_sign_hmac_sha256() -> Result<()> {
        let signer = RequestSigner::new(fixed_config(SignatureMethod::HmacSha256));
        let token = Token::new("access_token", "access_secret");

        let mut req = get_request("http://example.com/hello?q=world");
        signer.sign_request(&mut req, &token)?;

        let auth = req.headers().get(AUTHORIZATION).unwrap().to_str()?;
        assert!(auth.contains("oauth_signature_method=\"HMAC-SHA256\""));
        // The base string carries HMAC-SHA256 as the method name, so this
        // differs from the HMAC-SHA1 vector in more than the digest.
        assert!(
            auth.contains("oauth_signature=\"eTMY7QOVEfIUyhcqWMHxweXfR19LDRhg9KnZQ%2BQLeO8%3D\"")
        );
        Ok(())
    }

    #[test]
    fn test_sign_plaintext() -> Result<()> {
        let signer = RequestSigner::new(fixed_config(SignatureMethod::Plaintext));
        let token = Token::new("access_token", "access_secret");

        let mut req = get_request("http://example.com/hello");
        signer.sign_request(&mut req, &token)?;

        let auth = req.headers().get(AUTHORIZATION).unwrap().to_str()?;
        // The signing key itself, percent-encoded once more for the header.
        assert!(auth.contains("oauth_signature=\"consumer_secret%26access_secret\""));
        Ok(())
    }

    #[test]
    fn test_sign_rejects_empty_token() {
        let signer = RequestSigner::new(fixed_config(SignatureMethod::HmacSha1));
        let mut req = get_request("http://example.com/hello");

        let err = signer
            .sign_request(&mut req, &Token::new("", "secret"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyToken);
        assert!(req.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_sign_overwrites_prior_authorization() -> Result<()> {
        let signer = RequestSigner::new(fixed_config(SignatureMethod::HmacSha1));
        let token = Token::new("access_token", "access_secret");

        let mut req = http::Request::get("http://example.com/hello?q=world")
            .header(AUTHORIZATION, "Bearer stale")
            .body(Bytes::new())
            .unwrap();
        signer.sign_request(&mut req, &token)?;

        let values: Vec<_> = req.headers().get_all(AUTHORIZATION).iter().collect();
        assert_eq!(values.len(), 1);
        assert!(values[0].to_str()?.starts_with("OAuth "));
        Ok(())
    }
}
