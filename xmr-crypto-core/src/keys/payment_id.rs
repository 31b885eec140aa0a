//! Encrypted short payment ids
//!
//! An 8-byte payment id travels in the transaction extra XORed with a key
//! only the sender and the recipient can compute:
//!
//! ```text
//! D   = 8·(r·V) = 8·(v·R)
//! key = fast_hash(pack(D) ‖ 0x8b)[..8]
//! ```
//!
//! XOR is its own inverse, so decryption is the same operation run with the
//! recipient's `(R, v)` instead of the sender's `(V, r)`.

use zeroize::Zeroize;

use super::derive::generate_key_derivation;
use crate::ec::{Point, Scalar};
use crate::hash::fast_hash;
use crate::types::PAYMENT_ID_LENGTH;

/// Byte appended to the derivation before hashing
pub const ENCRYPTED_PAYMENT_ID_TAIL: u8 = 0x8b;

/// Encrypt `payment_id` for the owner of `public`
///
/// # Arguments
/// * `payment_id` - The plaintext id
/// * `public` - Recipient's view public key `V`
/// * `secret` - Transaction private key `r`
#[must_use]
pub fn encrypt_payment_id(
    payment_id: &[u8; PAYMENT_ID_LENGTH],
    public: &Point,
    secret: &Scalar,
) -> [u8; PAYMENT_ID_LENGTH] {
    let derivation = generate_key_derivation(public, secret);

    let mut data = [0u8; 33];
    data[..32].copy_from_slice(&derivation.pack());
    data[32] = ENCRYPTED_PAYMENT_ID_TAIL;
    let mut key = fast_hash(&data);

    let mut out = *payment_id;
    for (b, k) in out.iter_mut().zip(&key) {
        *b ^= k;
    }

    data.zeroize();
    key.zeroize();
    out
}

/// Decrypt a payment id with the recipient's keys
///
/// # Arguments
/// * `encrypted` - The id as found in the transaction extra
/// * `tx_public` - Transaction public key `R`
/// * `view_secret` - Recipient's view private key `v`
#[must_use]
pub fn decrypt_payment_id(
    encrypted: &[u8; PAYMENT_ID_LENGTH],
    tx_public: &Point,
    view_secret: &Scalar,
) -> [u8; PAYMENT_ID_LENGTH] {
    encrypt_payment_id(encrypted, tx_public, view_secret)
}
