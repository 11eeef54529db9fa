//! Utility functions and types.

use std::fmt::Debug;

/// Debug-formats a secret with everything but the outermost characters
/// replaced by asterisks.
///
/// Values shorter than 8 characters are redacted entirely; longer values
/// keep their first and last two characters so different secrets remain
/// distinguishable in logs without being usable.
pub struct Redact<'a>(&'a str);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl<'a> Debug for Redact<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            f.write_str("EMPTY")
        } else if self.0.len() < 8 {
            f.write_str("***")
        } else {
            f.write_str(&self.0[..2])?;
            f.write_str("***")?;
            f.write_str(&self.0[self.0.len() - 2..])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact() {
        let cases = vec![
            ("", "EMPTY"),
            ("short", "***"),
            ("kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw", "kA***Bw"),
            ("12345678", "12***78"),
        ];

        for (input, expected) in cases {
            assert_eq!(
                format!("{:?}", Redact(input)),
                expected,
                "Failed on input: {}",
                input
            );
        }
    }
}
