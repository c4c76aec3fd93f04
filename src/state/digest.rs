//! HMAC-SHA-384 over the Data Page text.
//!
//! The digest is the only thing standing between an externally editable page
//! and the next run trusting it, so the key is always passed in explicitly.

use hmac::{Hmac, Mac};
use sha2::Sha384;

type HmacSha384 = Hmac<Sha384>;

/// Length of the hex digest suffix (384 bits).
pub const DIGEST_HEX_LEN: usize = 96;

/// Secret key for signing and verifying Data Pages.
#[derive(Clone)]
pub struct DataKey {
    mac: HmacSha384,
}

impl DataKey {
    /// Returns `None` only if the MAC rejects the key length, which HMAC never does.
    pub fn new(secret: &str) -> Option<Self> {
        HmacSha384::new_from_slice(secret.as_bytes())
            .ok()
            .map(|mac| Self { mac })
    }

    /// Lowercase hex digest of `content`.
    pub fn sign(&self, content: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(content.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Constant-time check of a lowercase hex digest.
    pub fn verify(&self, content: &str, digest: &str) -> bool {
        if digest.len() != DIGEST_HEX_LEN
            || !digest.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
        {
            return false;
        }
        let Ok(expected) = hex::decode(digest) else {
            return false;
        };

        let mut mac = self.mac.clone();
        mac.update(content.as_bytes());
        mac.verify_slice(&expected).is_ok()
    }
}

impl std::fmt::Debug for DataKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DataKey(..)")
    }
}
