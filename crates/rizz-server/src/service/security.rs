//! Caller secret verification.

use std::fmt;
use std::sync::Arc;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::service::{Error, Result};

type HmacSha256 = Hmac<Sha256>;

/// Domain separation key for caller secret digests.
const DIGEST_KEY: &[u8] = b"rizz-caller-auth";

/// The shared secret callers authenticate with.
///
/// Only an HMAC-SHA256 digest of the secret is kept. Presented tokens are
/// digested the same way and compared in constant time, so neither the
/// content nor the length of the secret leaks through response timing.
#[derive(Clone)]
pub struct CallerSecret {
    digest: Arc<[u8]>,
}

impl CallerSecret {
    /// Creates a caller secret. Blank secrets are rejected.
    pub fn new(secret: &str) -> Result<Self> {
        if secret.trim().is_empty() {
            return Err(Error::config("API secret cannot be empty"));
        }

        let digest = digest(secret)?.finalize().into_bytes();
        Ok(Self {
            digest: Arc::from(digest.as_slice()),
        })
    }

    /// Returns whether `token` equals the configured secret.
    #[must_use]
    pub fn verify(&self, token: &str) -> bool {
        match digest(token) {
            Ok(mac) => mac.verify_slice(&self.digest).is_ok(),
            Err(_) => false,
        }
    }
}

impl fmt::Debug for CallerSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallerSecret").finish_non_exhaustive()
    }
}

fn digest(value: &str) -> Result<HmacSha256> {
    let Ok(mut mac) = HmacSha256::new_from_slice(DIGEST_KEY) else {
        return Err(Error::internal("failed to initialize caller secret digest"));
    };

    mac.update(value.as_bytes());
    Ok(mac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_matching_token() {
        let secret = CallerSecret::new("s3cret").unwrap();
        assert!(secret.verify("s3cret"));
    }

    #[test]
    fn rejects_other_tokens() {
        let secret = CallerSecret::new("s3cret").unwrap();
        assert!(!secret.verify("s3cret "));
        assert!(!secret.verify("S3CRET"));
        assert!(!secret.verify(""));
        assert!(!secret.verify("s3cret-but-longer"));
    }

    #[test]
    fn rejects_blank_secret() {
        assert!(CallerSecret::new("").is_err());
        assert!(CallerSecret::new(" \t").is_err());
    }

    #[test]
    fn debug_hides_digest() {
        let secret = CallerSecret::new("s3cret").unwrap();
        assert_eq!(format!("{secret:?}"), "CallerSecret { .. }");
    }
}
