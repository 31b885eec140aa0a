//! CryptoNote Schnorr signatures over a 32-byte message hash
//!
//! ```text
//! k random,  c = Hs(h ‖ P ‖ k·G),  r = k - c·x
//! verify:    c == Hs(h ‖ P ‖ c·P + r·G)
//! ```

use rand_core::{CryptoRng, RngCore};

use crate::ec::{Point, Public, Scalar};
use crate::hash::KeccakHasher;
use crate::types::errors::{CryptoError, CryptoResult};

/// Encoded signature length (`c ‖ r`)
pub const SIGNATURE_LENGTH: usize = 64;

/// A `(c, r)` Schnorr signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Challenge
    pub c: Scalar,
    /// Response
    pub r: Scalar,
}

impl Signature {
    /// `c ‖ r`
    #[must_use]
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut out = [0u8; SIGNATURE_LENGTH];
        out[..32].copy_from_slice(&self.c.pack());
        out[32..].copy_from_slice(&self.r.pack());
        out
    }

    /// Parse `c ‖ r`
    ///
    /// # Errors
    /// `InvalidLength` for a wrong-size input, `InvalidEncoding` when either
    /// half is not a canonical scalar.
    pub fn from_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(CryptoError::InvalidLength {
                field: "signature".into(),
                expected: SIGNATURE_LENGTH,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            c: Scalar::unpack(&bytes[..32])?,
            r: Scalar::unpack(&bytes[32..])?,
        })
    }
}

fn challenge(prefix_hash: &[u8; 32], public: &Point, commitment: &Point) -> Scalar {
    let mut hasher = KeccakHasher::new();
    hasher.update(prefix_hash);
    hasher.update(public.pack());
    hasher.update(commitment.pack());
    Scalar::from_bytes_mod_order(hasher.finalize())
}

/// Sign `prefix_hash` with `secret`
///
/// # Errors
/// `InvalidSecretKey` if `public` is not `secret·G`.
pub fn generate_signature<R: RngCore + CryptoRng>(
    prefix_hash: &[u8; 32],
    public: &Point,
    secret: &Scalar,
    rng: &mut R,
) -> CryptoResult<Signature> {
    if Point::scalarmult_base(secret) != *public {
        return Err(CryptoError::InvalidSecretKey(
            "secret key does not match public key".into(),
        ));
    }

    let k = Scalar::random(rng);
    let c = challenge(prefix_hash, public, &Point::scalarmult_base(&k));
    let r = k.mulsub(&c, secret);
    Ok(Signature { c, r })
}

/// Verify a signature. Variable-time; all inputs are public.
///
/// A zero challenge is rejected outright, as Monero does.
#[must_use]
pub fn check_signature(prefix_hash: &[u8; 32], public: &Point, sig: &Signature) -> bool {
    if sig.c.is_zero() || !sig.c.check() || !sig.r.check() {
        return false;
    }
    let commitment = Point::double_scalarmult_vartime(
        Public::new(&sig.c),
        Public::new(public),
        Public::new(&sig.r),
    );
    challenge(prefix_hash, public, &commitment) == sig.c
}
