use std::fmt::Debug;

/// Clock supplies the `oauth_timestamp` for a signing operation.
///
/// Exists solely so timestamp-dependent signatures can be made
/// deterministic under test by substituting a [`FixedClock`].
pub trait Clock: Debug + Send + Sync + 'static {
    /// Current time in seconds since the Unix epoch.
    fn now_unix(&self) -> i64;
}

/// SystemClock reads the wall clock. This is the default.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// FixedClock always reports the same instant.
///
/// # Note
///
/// Real requests must carry the current time or the server will reject
/// them for clock skew. Only use this for testing.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(
    /// The instant to report, in seconds since the Unix epoch.
    pub i64,
);

impl Clock for FixedClock {
    fn now_unix(&self) -> i64 {
        self.0
    }
}
