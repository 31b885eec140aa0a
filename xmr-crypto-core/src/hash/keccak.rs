//! Streaming Keccak-256 (Monero `cn_fast_hash`)

use sha3::{Digest, Keccak256};

/// Incremental Keccak-256 hasher
///
/// `Clone` produces an independent copy carrying the same absorbed state,
/// so a shared prefix can be hashed once and finished several ways.
#[derive(Clone, Default)]
pub struct KeccakHasher {
    inner: Keccak256,
}

impl KeccakHasher {
    /// Fresh hasher with nothing absorbed
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb `data`
    pub fn update(&mut self, data: impl AsRef<[u8]>) {
        Digest::update(&mut self.inner, data.as_ref());
    }

    /// Builder-style [`KeccakHasher::update`]
    #[must_use]
    pub fn chain(mut self, data: impl AsRef<[u8]>) -> Self {
        self.update(data);
        self
    }

    /// Digest of everything absorbed so far; the hasher stays usable
    #[must_use]
    pub fn digest(&self) -> [u8; 32] {
        self.clone().finalize()
    }

    /// Consume the hasher and return the digest
    #[must_use]
    pub fn finalize(self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.inner.finalize());
        out
    }
}

impl core::fmt::Debug for KeccakHasher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("KeccakHasher")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_digest() {
        assert_eq!(
            hex::encode(KeccakHasher::new().finalize()),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_streaming_matches_one_shot() {
        let mut h = KeccakHasher::new();
        h.update(b"hello ");
        h.update(b"world");
        assert_eq!(h.finalize(), Keccak256::digest(b"hello world").as_slice());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = KeccakHasher::new().chain(b"prefix");
        let copy = original.clone();

        original.update(b"-suffix");
        assert_eq!(copy.digest(), KeccakHasher::new().chain(b"prefix").finalize());
        assert_ne!(copy.finalize(), original.digest());
    }

    #[test]
    fn test_digest_does_not_consume() {
        let mut h = KeccakHasher::new().chain(b"abc");
        let first = h.digest();
        assert_eq!(first, h.digest());
        h.update(b"d");
        assert_eq!(h.finalize(), KeccakHasher::new().chain(b"abcd").finalize());
    }
}
