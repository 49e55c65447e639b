//! Password credential types.

use serde::{Deserialize, Serialize};

/// A salted password hash in PHC string format
/// (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`).
///
/// Only the digest is ever stored for a registered shopper. `Debug` output
/// is redacted so digests do not end up in logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap an already-computed PHC string.
    #[must_use]
    pub const fn new(phc: String) -> Self {
        Self(phc)
    }

    /// Get the PHC string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordDigest([REDACTED])")
    }
}

impl AsRef<str> for PasswordDigest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let digest = PasswordDigest::new("$argon2id$v=19$m=19456,t=2,p=1$abc$def".to_owned());
        let debug = format!("{digest:?}");
        assert!(!debug.contains("argon2id"));
        assert!(debug.contains("REDACTED"));
    }
}
