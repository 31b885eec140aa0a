//! Key image generation for Monero ring signatures.
//!
//! Key images are used to prevent double-spending in Monero. Each output can only
//! be spent once, and the key image links spends without revealing which
//! output was spent.
//!
//! ## Key Image
//!
//! For a one-time output with private key `x` and public key `P`:
//! ```text
//! KI = x * Hp(P)
//! ```
//!
//! ## Key Image with Output Derivation
//!
//! For an output received at subaddress `(major, minor)`:
//! ```text
//! x = Hs(8*a*R || idx) + b + m     (m = 0 for the primary address)
//! ```
//! The helpers in this module recover `x`, check it against the output key,
//! and produce the key image together with a one-member ring signature
//! proving ownership (the key image export format).

use alloc::vec::Vec;

use rand_core::{CryptoRng, RngCore};

use super::derive::{derive_private_key, derive_subaddress_public_key, generate_key_derivation};
use super::ring::{generate_ring_signature, RingSignature};
use super::subaddress::{get_subaddress_secret_key, MoneroKeys, SubaddressTable};
use crate::ec::{Point, Scalar};
use crate::hash::hash_to_point;
use crate::types::errors::{CryptoError, CryptoResult};

/// Compute the key image `x * Hp(P)`
///
/// # Arguments
/// * `public` - The one-time output public key `P`
/// * `secret` - Its private key `x`
///
/// # Errors
/// Propagates a [`hash_to_point`] failure.
pub fn generate_key_image(public: &Point, secret: &Scalar) -> CryptoResult<Point> {
    Ok(hash_to_point(&public.pack())?.scalarmult(secret))
}

/// Find which of our subaddresses an output pays to
///
/// Tries the main derivation first, then the per-output additional
/// derivation when the transaction carries additional public keys.
///
/// # Returns
/// `Some(((major, minor), derivation))` for the matching derivation, or
/// `None` when the output is not ours.
///
/// # Errors
/// `InvalidLength` if additional derivations are present but fewer than
/// `output_index + 1`.
pub fn is_out_to_acc_precomp(
    subaddresses: &SubaddressTable,
    out_key: &Point,
    derivation: &Point,
    additional_derivations: &[Point],
    output_index: u32,
) -> CryptoResult<Option<((u32, u32), Point)>> {
    let spend_key = derive_subaddress_public_key(out_key, derivation, output_index);
    if let Some(index) = subaddresses.get(&spend_key.pack()) {
        return Ok(Some((*index, derivation.clone())));
    }

    if additional_derivations.is_empty() {
        return Ok(None);
    }

    let additional = additional_derivations
        .get(output_index as usize)
        .ok_or_else(|| CryptoError::InvalidLength {
            field: "additional_derivations".into(),
            expected: output_index as usize + 1,
            actual: additional_derivations.len(),
        })?;

    let spend_key = derive_subaddress_public_key(out_key, additional, output_index);
    Ok(subaddresses
        .get(&spend_key.pack())
        .map(|index| (*index, additional.clone())))
}

/// Recover the one-time private key of an output and its key image
///
/// # Arguments
/// * `keys` - Wallet keys
/// * `out_key` - The output's public key
/// * `recv_derivation` - Derivation the output was found under
/// * `real_output_index` - Index of the output in its transaction
/// * `received_index` - Subaddress `(major, minor)` the output was sent to
///
/// # Errors
/// `InvalidSecretKey` if the recovered private key does not match `out_key`.
pub fn generate_key_image_helper_precomp(
    keys: &MoneroKeys,
    out_key: &Point,
    recv_derivation: &Point,
    real_output_index: u32,
    received_index: (u32, u32),
) -> CryptoResult<(Scalar, Point)> {
    let mut secret = derive_private_key(recv_derivation, real_output_index, &keys.spend_secret);

    if received_index != (0, 0) {
        let m = get_subaddress_secret_key(received_index.0, received_index.1, &keys.view_secret);
        secret = &secret + &m;
    }

    if Point::scalarmult_base(&secret) != *out_key {
        return Err(CryptoError::InvalidSecretKey(
            "derived output key does not match the output".into(),
        ));
    }

    let key_image = generate_key_image(out_key, &secret)?;
    Ok((secret, key_image))
}

/// Scan an output and, if it is ours, return `(x, key_image, derivation)`
///
/// # Errors
/// - `InvalidPublicKey` if the output does not belong to this wallet
/// - any error of [`is_out_to_acc_precomp`] or [`generate_key_image_helper_precomp`]
pub fn generate_key_image_helper(
    keys: &MoneroKeys,
    subaddresses: &SubaddressTable,
    out_key: &Point,
    tx_public_key: &Point,
    additional_tx_public_keys: &[Point],
    real_output_index: u32,
) -> CryptoResult<(Scalar, Point, Point)> {
    let recv_derivation = generate_key_derivation(tx_public_key, &keys.view_secret);
    let additional: Vec<Point> = additional_tx_public_keys
        .iter()
        .map(|key| generate_key_derivation(key, &keys.view_secret))
        .collect();

    let (received_index, derivation) = is_out_to_acc_precomp(
        subaddresses,
        out_key,
        &recv_derivation,
        &additional,
        real_output_index,
    )?
    .ok_or_else(|| {
        tracing::debug!(output_index = real_output_index, "output does not belong to wallet");
        CryptoError::InvalidPublicKey("output does not belong to this wallet".into())
    })?;

    let (secret, key_image) = generate_key_image_helper_precomp(
        keys,
        out_key,
        &derivation,
        real_output_index,
        received_index,
    )?;
    Ok((secret, key_image, recv_derivation))
}

/// Export the key image of an owned output with its ownership proof
///
/// The proof is a ring signature over the one-member ring `[out_key]`
/// whose message is the packed key image.
///
/// # Errors
/// Any error of [`generate_key_image_helper`] or [`generate_ring_signature`].
pub fn export_key_image<R: RngCore + CryptoRng>(
    keys: &MoneroKeys,
    subaddresses: &SubaddressTable,
    out_key: &Point,
    tx_public_key: &Point,
    additional_tx_public_keys: &[Point],
    output_index: u32,
    rng: &mut R,
) -> CryptoResult<(Point, RingSignature)> {
    let (secret, key_image, _) = generate_key_image_helper(
        keys,
        subaddresses,
        out_key,
        tx_public_key,
        additional_tx_public_keys,
        output_index,
    )?;

    let signature = generate_ring_signature(
        &key_image.pack(),
        &key_image,
        core::slice::from_ref(out_key),
        &secret,
        0,
        rng,
    )?;
    Ok((key_image, signature))
}
