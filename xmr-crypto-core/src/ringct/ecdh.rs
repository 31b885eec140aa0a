//! Encrypted amount and mask for the output recipient
//!
//! The recipient derives the same `amount_key` from the transaction key and
//! can then recover both values:
//!
//! ```text
//! mask'   = mask   + Hs(amount_key)
//! amount' = amount + Hs(Hs(amount_key))
//! ```

use zeroize::Zeroize;

use crate::ec::Scalar;
use crate::hash::hash_to_scalar;
use crate::types::errors::CryptoResult;

/// Encoded `(mask, amount)` pair as stored in a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcdhInfo {
    /// Masked blinding factor
    pub mask: [u8; 32],
    /// Masked amount
    pub amount: [u8; 32],
}

fn shared_offsets(amount_key: &Scalar) -> (Scalar, Scalar) {
    let mut key = amount_key.pack();
    let single = hash_to_scalar(&key);
    key.zeroize();
    let double = hash_to_scalar(&single.pack());
    (single, double)
}

/// Hide `mask` and `amount` under `amount_key`
#[must_use]
pub fn ecdh_encode(mask: &Scalar, amount: u64, amount_key: &Scalar) -> EcdhInfo {
    let (single, double) = shared_offsets(amount_key);
    EcdhInfo {
        mask: (mask + &single).pack(),
        amount: (&Scalar::from_u64(amount) + &double).pack(),
    }
}

/// Recover `(mask, amount)` from an [`EcdhInfo`]
///
/// # Errors
/// - `InvalidEncoding` if either field is not a canonical scalar
/// - `Overflow` if `amount_key` is wrong and the amount leaves 64 bits
pub fn ecdh_decode(info: &EcdhInfo, amount_key: &Scalar) -> CryptoResult<(Scalar, u64)> {
    let (single, double) = shared_offsets(amount_key);
    let mask = &Scalar::unpack(&info.mask)? - &single;
    let amount = (&Scalar::unpack(&info.amount)? - &double).to_u64()?;
    Ok((mask, amount))
}
