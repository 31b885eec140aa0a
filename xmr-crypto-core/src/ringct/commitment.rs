//! Pedersen commitments to amounts
//!
//! ```text
//! C = mask·G + amount·H
//! ```
//! `H` is Monero's fixed amount generator ([`Point::h`]). The mask hides the
//! amount and has to be kept by whoever later opens or balances `C`.

use crate::ec::{Point, Scalar};
use crate::types::errors::CryptoResult;

/// Commit to `amount` under `mask`: `mask·G + amount·H`
///
/// `amount` is a raw 64-bit integer rather than a scalar, since every
/// RingCT amount fits in 64 bits.
///
/// # Errors
/// Propagates the failure of [`Point::h`].
pub fn gen_c(mask: &Scalar, amount: u64) -> CryptoResult<Point> {
    let blinding = Point::scalarmult_base(mask);
    Ok(&blinding + &Point::scalarmult_h(amount)?)
}

/// Commitment with mask 1, as used for fees and coinbase amounts
///
/// # Errors
/// Propagates the failure of [`Point::h`].
pub fn zero_commit(amount: u64) -> CryptoResult<Point> {
    gen_c(&Scalar::ONE, amount)
}
