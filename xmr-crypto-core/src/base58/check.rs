//! Checksummed, tagged base58 (the Monero address envelope)
//!
//! ```text
//! encode_check(tag, data) = base58(varint(tag) ‖ data ‖ fast_hash(varint(tag) ‖ data)[..4])
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use subtle::ConstantTimeEq;

use super::block::{decode, encode};
use crate::hash::{decode_varint, fast_hash, write_varint};
use crate::types::address::CHECKSUM_LENGTH;
use crate::types::errors::{CryptoError, CryptoResult};

/// Largest payload accepted by [`encode_check`] and returned by [`decode_check`]
pub const MAX_PAYLOAD_LENGTH: usize = 128;

/// Encode `data` under `tag` with a 4-byte Keccak checksum
///
/// # Errors
/// `EncodeError` if `data` is longer than [`MAX_PAYLOAD_LENGTH`].
pub fn encode_check(tag: u64, data: &[u8]) -> CryptoResult<String> {
    if data.len() > MAX_PAYLOAD_LENGTH {
        return Err(CryptoError::EncodeError(alloc::format!(
            "payload of {} bytes exceeds {MAX_PAYLOAD_LENGTH}",
            data.len()
        )));
    }

    let mut buf = Vec::with_capacity(data.len() + 14);
    write_varint(tag, &mut buf);
    buf.extend_from_slice(data);
    let checksum = fast_hash(&buf);
    buf.extend_from_slice(&checksum[..CHECKSUM_LENGTH]);

    Ok(encode(&buf))
}

/// Decode and verify a tagged base58 string
///
/// # Returns
/// `(payload, tag)`
///
/// # Errors
/// `DecodeError` on malformed base58, a checksum mismatch, a missing or
/// malformed tag, or a payload longer than [`MAX_PAYLOAD_LENGTH`].
pub fn decode_check(encoded: impl AsRef<[u8]>) -> CryptoResult<(Vec<u8>, u64)> {
    let raw = decode(encoded)?;
    if raw.len() <= CHECKSUM_LENGTH {
        return Err(CryptoError::DecodeError("input too short for checksum".into()));
    }

    let (body, checksum) = raw.split_at(raw.len() - CHECKSUM_LENGTH);
    let expected = fast_hash(body);
    if !bool::from(expected[..CHECKSUM_LENGTH].ct_eq(checksum)) {
        tracing::debug!("base58 checksum mismatch");
        return Err(CryptoError::DecodeError("checksum mismatch".into()));
    }

    let (tag, tag_len) = decode_varint(body)?;
    let payload = &body[tag_len..];
    if payload.len() > MAX_PAYLOAD_LENGTH {
        return Err(CryptoError::DecodeError(alloc::format!(
            "payload of {} bytes exceeds {MAX_PAYLOAD_LENGTH}",
            payload.len()
        )));
    }

    Ok((payload.to_vec(), tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_tags_and_lengths() {
        for tag in [0u64, 1, 18, 0x1234_5678_9abc_def0, u64::MAX] {
            for len in [0usize, 1, 8, 33, 64, 128] {
                let data: Vec<u8> = (0..len).map(|i| (i * 7 + 3) as u8).collect();
                let enc = encode_check(tag, &data).unwrap();
                assert_eq!(decode_check(&enc).unwrap(), (data, tag));
            }
        }
    }

    #[test]
    fn test_payload_bound() {
        assert!(matches!(
            encode_check(18, &[0u8; 129]),
            Err(CryptoError::EncodeError(_))
        ));
    }

    #[test]
    fn test_checksum_mismatch() {
        let mut raw = Vec::new();
        write_varint(18, &mut raw);
        raw.extend_from_slice(&[9u8; 64]);
        raw.extend_from_slice(&[0u8; 4]);
        assert!(matches!(
            decode_check(encode(&raw)),
            Err(CryptoError::DecodeError(_))
        ));
    }

    #[test]
    fn test_too_short() {
        assert!(decode_check(encode(&[1, 2, 3, 4])).is_err());
        assert!(decode_check("").is_err());
    }
}
