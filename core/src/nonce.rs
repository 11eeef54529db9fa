use rand::distributions::Alphanumeric;
use rand::Rng;
use std::fmt::Debug;

/// Length of generated nonces. 32 alphanumeric characters carry ~190 bits
/// of entropy, enough that a collision over the lifetime of a credential
/// pair is practically impossible.
const NONCE_LENGTH: usize = 32;

/// NonceGenerator produces the one-time `oauth_nonce` value for a signing
/// operation.
///
/// Implementations must be safe to call from concurrent signing
/// operations without extra synchronization by the caller. There is no
/// failure mode: an exhausted randomness source is a fatal configuration
/// error, not a recoverable one.
pub trait NonceGenerator: Debug + Send + Sync + 'static {
    /// Return a fresh unpredictable nonce.
    fn nonce(&self) -> String;
}

/// RandNonce draws alphanumeric nonces from the thread-local CSPRNG.
/// This is the default.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandNonce;

impl NonceGenerator for RandNonce {
    fn nonce(&self) -> String {
        // thread_rng is per-thread, so concurrent callers never contend.
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(NONCE_LENGTH)
            .map(char::from)
            .collect()
    }
}

/// FixedNonce always returns the same value.
///
/// # Note
///
/// A repeated nonce lets a captured request be replayed. Only use this
/// for testing.
#[derive(Debug, Clone)]
pub struct FixedNonce(
    /// The value every call returns.
    pub String,
);

impl FixedNonce {
    /// Create a fixed nonce from a string.
    pub fn new(nonce: &str) -> Self {
        Self(nonce.to_string())
    }
}

impl NonceGenerator for FixedNonce {
    fn nonce(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_nonce_shape() {
        let nonce = RandNonce.nonce();
        assert_eq!(nonce.len(), NONCE_LENGTH);
        assert!(nonce.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_nonces_are_unique() {
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(RandNonce.nonce()));
        }
    }

    #[test]
    fn test_nonces_are_unique_across_threads() {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                std::thread::spawn(|| (0..100).map(|_| RandNonce.nonce()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for nonce in handle.join().unwrap() {
                assert!(seen.insert(nonce));
            }
        }
    }

    #[test]
    fn test_fixed_nonce() {
        let nonce = FixedNonce::new("some_nonce");
        assert_eq!(nonce.nonce(), "some_nonce");
        assert_eq!(nonce.nonce(), "some_nonce");
    }
}
