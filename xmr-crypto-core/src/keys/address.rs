//! Monero address encoding and decoding
//!
//! An address is the tagged base58 envelope ([`crate::base58::encode_check`])
//! around the public spend key, the public view key and, for integrated
//! addresses, an 8-byte payment id. The tag selects network and type.
//!
//! # Example
//!
//! ```rust
//! use xmr_crypto_core::keys::{decode_address, encode_address, generate_monero_keys};
//! use xmr_crypto_core::{DecodedAddress, MoneroNetwork};
//!
//! let keys = generate_monero_keys(&[7u8; 32]);
//! let addr = DecodedAddress::new_standard(
//!     MoneroNetwork::Stagenet,
//!     keys.spend_public.pack(),
//!     keys.view_public.pack(),
//! );
//! let encoded = encode_address(&addr)?;
//! assert!(encoded.starts_with('5'));
//! assert_eq!(decode_address(&encoded)?, addr);
//! # Ok::<(), xmr_crypto_core::CryptoError>(())
//! ```

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::base58::{decode_check, encode_check};
use crate::ec::Point;
use crate::types::address::{
    AddressType, DecodedAddress, MoneroNetwork, PAYMENT_ID_LENGTH, PUBLIC_KEY_LENGTH,
};
use crate::types::errors::{CryptoError, CryptoResult};

// =============================================================================
// Constants
// =============================================================================

/// Standard/subaddress length in base58 (95 characters)
pub const STANDARD_ADDRESS_LENGTH: usize = 95;

/// Integrated address length in base58 (106 characters)
pub const INTEGRATED_ADDRESS_LENGTH: usize = 106;

// =============================================================================
// Encoding
// =============================================================================

/// Encode an address
///
/// # Errors
/// `InvalidAddressLength` if the payment id presence does not match the
/// address type (integrated addresses need one, the others must not have one).
pub fn encode_address(address: &DecodedAddress) -> CryptoResult<String> {
    let integrated = address.address_type == AddressType::Integrated;
    if integrated != address.payment_id.is_some() {
        return Err(CryptoError::InvalidAddressLength {
            expected: address.address_type.payload_length(),
            actual: PUBLIC_KEY_LENGTH * 2
                + address.payment_id.map_or(0, |_| PAYMENT_ID_LENGTH),
        });
    }

    let mut payload = Vec::with_capacity(address.address_type.payload_length());
    payload.extend_from_slice(&address.spend_key);
    payload.extend_from_slice(&address.view_key);
    if let Some(payment_id) = &address.payment_id {
        payload.extend_from_slice(payment_id);
    }

    encode_check(address.tag(), &payload)
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode and validate an address
///
/// Verifies the checksum, maps the tag to a network and type, checks the
/// payload length for that type and that both keys are valid curve points.
///
/// # Errors
/// - `DecodeError` for malformed base58 or a bad checksum
/// - `InvalidAddressPrefix` for an unknown tag
/// - `InvalidAddressLength` for a payload of the wrong size
/// - `InvalidPublicKey` if a key does not decode to a curve point
pub fn decode_address(address: &str) -> CryptoResult<DecodedAddress> {
    let (payload, tag) = decode_check(address)?;

    let (network, address_type) =
        MoneroNetwork::from_tag(tag).ok_or(CryptoError::InvalidAddressPrefix(tag))?;

    if payload.len() != address_type.payload_length() {
        return Err(CryptoError::InvalidAddressLength {
            expected: address_type.payload_length(),
            actual: payload.len(),
        });
    }

    let mut spend_key = [0u8; 32];
    let mut view_key = [0u8; 32];
    spend_key.copy_from_slice(&payload[..32]);
    view_key.copy_from_slice(&payload[32..64]);

    for (name, key) in [("spend", &spend_key), ("view", &view_key)] {
        Point::unpack_vartime(key).map_err(|_| {
            tracing::debug!(key = name, "address key is not a curve point");
            CryptoError::InvalidPublicKey(alloc::format!("{name} key is not a valid point"))
        })?;
    }

    let payment_id = if address_type == AddressType::Integrated {
        let mut pid = [0u8; PAYMENT_ID_LENGTH];
        pid.copy_from_slice(&payload[64..]);
        Some(pid)
    } else {
        None
    };

    Ok(DecodedAddress {
        network,
        address_type,
        spend_key,
        view_key,
        payment_id,
    })
}

/// Decode an address that must belong to `expected_network`
///
/// # Errors
/// Everything [`decode_address`] reports, plus `NetworkMismatch`.
pub fn decode_address_for_network(
    address: &str,
    expected_network: MoneroNetwork,
) -> CryptoResult<DecodedAddress> {
    let decoded = decode_address(address)?;
    if decoded.network != expected_network {
        return Err(CryptoError::NetworkMismatch {
            expected: expected_network.to_string(),
            actual: decoded.network.to_string(),
        });
    }
    Ok(decoded)
}
