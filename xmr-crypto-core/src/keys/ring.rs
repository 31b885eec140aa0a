//! CryptoNote ring signatures (pre-RingCT `generate_ring_signature`)
//!
//! Used today for key image export proofs.
//!
//! ## Scheme
//!
//! For ring `P_0..P_n`, key image `I` and message `m`:
//! ```text
//! L_i = c_i·P_i + r_i·G
//! R_i = r_i·Hp(P_i) + c_i·I
//! Σ c_i = Hs(m ‖ L_0 ‖ R_0 ‖ ... ‖ L_n ‖ R_n)
//! ```
//! The signer closes the ring at its own index with `L = k·G`, `R = k·Hp(P)`.

use alloc::vec::Vec;

use rand_core::{CryptoRng, RngCore};

use super::image::generate_key_image;
use crate::ec::{Point, Public, Scalar};
use crate::hash::{hash_to_point, KeccakHasher};
use crate::types::errors::{CryptoError, CryptoResult};

/// One `(c, r)` pair of a ring signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingSignatureElement {
    /// Challenge share
    pub c: Scalar,
    /// Response
    pub r: Scalar,
}

/// A ring signature: one element per ring member
pub type RingSignature = Vec<RingSignatureElement>;

/// Sign `prefix_hash` with the key at `secret_index` of `pubs`
///
/// # Arguments
/// * `prefix_hash` - Message (usually a 32-byte transaction prefix hash)
/// * `image` - Key image of the signing key
/// * `pubs` - The ring
/// * `secret` - Private key of `pubs[secret_index]`
/// * `secret_index` - Position of the real key
/// * `rng` - Secure randomness for the decoy responses and nonce
///
/// # Errors
/// - `InvalidLength` if `secret_index` is outside the ring
/// - `InvalidSecretKey` if `secret` does not match `pubs[secret_index]`
/// - `InvalidPublicKey` if `image` is not the key image of `secret`
pub fn generate_ring_signature<R: RngCore + CryptoRng>(
    prefix_hash: &[u8],
    image: &Point,
    pubs: &[Point],
    secret: &Scalar,
    secret_index: usize,
    rng: &mut R,
) -> CryptoResult<RingSignature> {
    let real = pubs.get(secret_index).ok_or_else(|| CryptoError::InvalidLength {
        field: "ring".into(),
        expected: secret_index + 1,
        actual: pubs.len(),
    })?;
    if Point::scalarmult_base(secret) != *real {
        return Err(CryptoError::InvalidSecretKey(
            "secret does not match ring member".into(),
        ));
    }
    if generate_key_image(real, secret)? != *image {
        return Err(CryptoError::InvalidPublicKey(
            "key image does not match secret".into(),
        ));
    }

    let mut hasher = KeccakHasher::new();
    hasher.update(prefix_hash);

    let mut sig: RingSignature = Vec::with_capacity(pubs.len());
    let mut sum = Scalar::ZERO;
    let mut k = Scalar::ZERO;

    for (i, member) in pubs.iter().enumerate() {
        let hp = hash_to_point(&member.pack())?;
        if i == secret_index {
            k = Scalar::random(rng);
            hasher.update(Point::scalarmult_base(&k).pack());
            hasher.update(hp.scalarmult(&k).pack());
            sig.push(RingSignatureElement {
                c: Scalar::ZERO,
                r: Scalar::ZERO,
            });
        } else {
            let c = Scalar::random(rng);
            let r = Scalar::random(rng);
            let l = Point::double_scalarmult_vartime(Public::new(&c), Public::new(member), Public::new(&r));
            let rr = Point::double_scalarmult_vartime2(
                Public::new(&r),
                Public::new(&hp),
                Public::new(&c),
                Public::new(image),
            );
            hasher.update(l.pack());
            hasher.update(rr.pack());
            sum = &sum + &c;
            sig.push(RingSignatureElement { c, r });
        }
    }

    let h = Scalar::from_bytes_mod_order(hasher.finalize());
    let c = &h - &sum;
    let r = k.mulsub(&c, secret);
    sig[secret_index] = RingSignatureElement { c, r };
    Ok(sig)
}

/// Verify a ring signature. Variable-time; every input is public.
///
/// Rejects signatures whose length differs from the ring, key images
/// outside the prime-order subgroup and ring members that fail to hash.
#[must_use]
pub fn check_ring_signature(
    prefix_hash: &[u8],
    image: &Point,
    pubs: &[Point],
    sig: &[RingSignatureElement],
) -> bool {
    if sig.len() != pubs.len() || pubs.is_empty() {
        return false;
    }
    if image.check_subgroup().is_err() {
        tracing::debug!("ring signature key image outside prime-order subgroup");
        return false;
    }

    let mut hasher = KeccakHasher::new();
    hasher.update(prefix_hash);
    let mut sum = Scalar::ZERO;

    for (member, element) in pubs.iter().zip(sig) {
        let Ok(hp) = hash_to_point(&member.pack()) else {
            return false;
        };
        let l = Point::double_scalarmult_vartime(
            Public::new(&element.c),
            Public::new(member),
            Public::new(&element.r),
        );
        let rr = Point::double_scalarmult_vartime2(
            Public::new(&element.r),
            Public::new(&hp),
            Public::new(&element.c),
            Public::new(image),
        );
        hasher.update(l.pack());
        hasher.update(rr.pack());
        sum = &sum + &element.c;
    }

    let h = Scalar::from_bytes_mod_order(hasher.finalize());
    let ok = h == sum;
    tracing::trace!(ring_size = pubs.len(), ok, "ring signature checked");
    ok
}
