//! HMAC-SHA256 key handling and constant-time comparison.
//!
//! Token verification compares attacker-supplied signatures, so everything
//! here must run in time independent of the secret material.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// A validated HMAC-SHA256 signing key.
///
/// The key schedule is computed once at construction; each signing operation
/// clones the prepared state instead of re-deriving it from raw bytes.
#[derive(Clone)]
pub struct HmacKey {
    mac: HmacSha256,
    key_len: usize,
}

impl HmacKey {
    /// Minimum accepted key length in bytes (256 bits).
    pub const MIN_KEY_LENGTH: usize = 32;

    /// Build a key from secret bytes, rejecting keys under
    /// [`MIN_KEY_LENGTH`](Self::MIN_KEY_LENGTH).
    pub fn new(key: impl AsRef<[u8]>) -> Result<Self, HmacKeyError> {
        let key = key.as_ref();
        if key.len() < Self::MIN_KEY_LENGTH {
            return Err(HmacKeyError::KeyTooShort {
                actual: key.len(),
                minimum: Self::MIN_KEY_LENGTH,
            });
        }
        // new_from_slice accepts any length, so this cannot fail.
        let mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
        Ok(Self {
            mac,
            key_len: key.len(),
        })
    }

    /// Sign `data` and return the 32-byte MAC.
    pub fn sign(&self, data: &[u8]) -> [u8; 32] {
        let mut mac = self.mac.clone();
        mac.update(data);
        mac.finalize().into_bytes().into()
    }

    /// Check `signature` against `data` in constant time.
    pub fn verify(&self, data: &[u8], signature: &[u8]) -> bool {
        constant_time_eq(&self.sign(data), signature)
    }
}

impl std::fmt::Debug for HmacKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacKey")
            .field("key_len", &self.key_len)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum HmacKeyError {
    #[error("HMAC key too short: got {actual} bytes, need at least {minimum}")]
    KeyTooShort { actual: usize, minimum: usize },
}

/// Constant-time byte comparison.
///
/// Length is not secret, so mismatched lengths return early. For equal
/// lengths every byte pair is visited and the differences are OR-folded,
/// so the running time does not depend on where the first mismatch sits.
#[inline]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
