//! Output key derivation
//!
//! This module provides the CryptoNote one-time key machinery:
//! - Shared-secret derivation between a transaction key and a view key
//! - Per-output private/public key derivation
//! - The `add_keys` linear combinations used throughout RingCT
//!
//! ## Formulas
//!
//! ```text
//! D      = 8 · (b · A)
//! x_out  = base + Hs(D ‖ varint(idx))
//! P_out  = base_pub + Hs(D ‖ varint(idx)) · G
//! ```

use crate::ec::{Point, Public, Scalar};
use crate::hash::derivation_to_scalar;

// =============================================================================
// Shared Derivation
// =============================================================================

/// Compute the cofactor-cleared Diffie-Hellman point `8·(b·A)`
///
/// # Arguments
/// * `public` - The other party's public key `A` (tx public key or view public key)
/// * `secret` - Our private scalar `b` (view secret or tx secret)
///
/// # Security
/// `secret` is multiplied in constant time.
#[must_use]
pub fn generate_key_derivation(public: &Point, secret: &Scalar) -> Point {
    public.scalarmult(secret).mul8()
}

/// Derive a one-time private key: `base + Hs(derivation ‖ idx)`
///
/// # Arguments
/// * `derivation` - Output of [`generate_key_derivation`]
/// * `output_index` - Index of the output in its transaction
/// * `base` - The recipient's private spend key (or subaddress spend key)
#[must_use]
pub fn derive_private_key(derivation: &Point, output_index: u32, base: &Scalar) -> Scalar {
    base + &derivation_to_scalar(derivation, output_index)
}

/// Derive a one-time public key: `base + Hs(derivation ‖ idx)·G`
///
/// Commutes with [`derive_private_key`]: if `base == b·G` then the result
/// equals `derive_private_key(derivation, idx, b)·G`.
#[must_use]
pub fn derive_public_key(derivation: &Point, output_index: u32, base: &Point) -> Point {
    let scalar = derivation_to_scalar(derivation, output_index);
    base + &Point::scalarmult_base(&scalar)
}

/// Recover the spend public key an output was sent to: `out_key - Hs(derivation ‖ idx)·G`
///
/// Used by wallets to look the result up in their subaddress table.
#[must_use]
pub fn derive_subaddress_public_key(out_key: &Point, derivation: &Point, output_index: u32) -> Point {
    let scalar = derivation_to_scalar(derivation, output_index);
    out_key - &Point::scalarmult_base(&scalar)
}

// =============================================================================
// Linear Combinations
// =============================================================================

/// `a·G + b·B`, constant-time in both scalars
#[must_use]
#[allow(non_snake_case)]
pub fn add_keys2(a: &Scalar, b: &Scalar, B: &Point) -> Point {
    &Point::scalarmult_base(a) + &B.scalarmult(b)
}

/// `a·G + b·B` for public inputs. Variable-time.
#[must_use]
#[allow(non_snake_case)]
pub fn add_keys2_vartime(a: Public<'_, Scalar>, b: Public<'_, Scalar>, B: Public<'_, Point>) -> Point {
    Point::double_scalarmult_vartime(b, B, a)
}

/// `a·A + b·B`, constant-time in both scalars
#[must_use]
#[allow(non_snake_case)]
pub fn add_keys3(a: &Scalar, A: &Point, b: &Scalar, B: &Point) -> Point {
    &A.scalarmult(a) + &B.scalarmult(b)
}

/// `a·A + b·B` for public inputs. Variable-time.
#[must_use]
#[allow(non_snake_case)]
pub fn add_keys3_vartime(
    a: Public<'_, Scalar>,
    A: Public<'_, Point>,
    b: Public<'_, Scalar>,
    B: Public<'_, Point>,
) -> Point {
    Point::double_scalarmult_vartime2(a, A, b, B)
}
