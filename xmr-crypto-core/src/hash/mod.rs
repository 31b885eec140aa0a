//! Hash-to-domain functions
//!
//! Everything here is built on Keccak-256 with the original Keccak padding
//! (Monero's `cn_fast_hash`), not the standardized SHA3-256.
//!
//! ## Functions
//!
//! - [`fast_hash`]: 32-byte digest of arbitrary input
//! - [`hash_to_scalar`]: digest reduced mod ℓ (`Hs`)
//! - [`hash_to_point`]: digest mapped onto the curve and cofactor-cleared (`Hp`)
//! - [`derivation_to_scalar`]: `Hs(derivation ‖ varint(index))`

pub mod keccak;
pub mod varint;

use curve25519_dalek::edwards::CompressedEdwardsY;
use sha3::{Digest, Keccak256};
use subtle::ConditionallySelectable;

pub use keccak::KeccakHasher;
pub use varint::{decode_varint, encode_varint, write_varint, MAX_VARINT_LENGTH};

use crate::ec::field::FieldElement;
use crate::ec::{Point, Scalar};
use crate::types::errors::{CryptoError, CryptoResult};

/// Montgomery curve coefficient A of Curve25519
const MONTGOMERY_A: u64 = 486_662;

/// Keccak-256 of `data`
#[must_use]
pub fn fast_hash(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Keccak256::digest(data));
    out
}

/// `Hs(data)`: Keccak-256 reduced modulo ℓ
#[must_use]
pub fn hash_to_scalar(data: &[u8]) -> Scalar {
    Scalar::from_bytes_mod_order(fast_hash(data))
}

/// `Hp(data)`: hash onto the prime-order subgroup
///
/// Applies Monero's `ge_fromfe_frombytes_vartime` map to `fast_hash(data)`
/// and multiplies the result by the cofactor. Deterministic, and the
/// output is always a valid group element. Runs in variable time; the
/// input is expected to be public (typically a packed public key).
///
/// # Errors
/// `InternalError` if the mapped point fails to decompress, which the
/// construction rules out for every input.
pub fn hash_to_point(data: &[u8]) -> CryptoResult<Point> {
    let u = FieldElement::from_bytes(&fast_hash(data));
    let a = FieldElement::from_u64(MONTGOMERY_A);

    let u2 = u.square();
    let v = u2.add(&u2);
    let w = v.add(&FieldElement::ONE);
    let x = w.square().sub(&a.square().mul(&v));

    // (w / x)^((p + 3) / 8) = w·x^3·(w·x^7)^((p - 5) / 8)
    let x3 = x.square().mul(&x);
    let wx3 = w.mul(&x3);
    let wx7 = wx3.mul(&x3).mul(&x);
    let root = wx3.mul(&wx7.pow_p58());

    let x2 = root.square().mul(&x);
    let negative = !w.sub(&x2).is_zero() & !w.add(&x2).is_zero();

    let z = a
        .neg()
        .mul(&FieldElement::conditional_select(&v, &FieldElement::ONE, negative));
    let y = z.sub(&w).mul(&z.add(&w).invert());

    let mut bytes = y.to_bytes();
    bytes[31] |= negative.unwrap_u8() << 7;

    CompressedEdwardsY(bytes)
        .decompress()
        .map(|p| Point(p.mul_by_cofactor()))
        .ok_or_else(|| CryptoError::InternalError("hash_to_point left the curve".into()))
}

/// `Hs(pack(derivation) ‖ varint(output_index))`
///
/// The per-output scalar shared by sender and receiver.
#[must_use]
pub fn derivation_to_scalar(derivation: &Point, output_index: u32) -> Scalar {
    let mut hasher = KeccakHasher::new();
    hasher.update(derivation.pack());
    hasher.update(encode_varint(u64::from(output_index)));
    Scalar::from_bytes_mod_order(hasher.finalize())
}
