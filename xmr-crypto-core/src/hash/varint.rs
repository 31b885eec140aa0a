//! Monero variable-length integers
//!
//! Seven data bits per byte, least significant group first; the high bit
//! (0x80) marks that another byte follows.

use alloc::vec::Vec;

use crate::types::errors::{CryptoError, CryptoResult};

/// Longest encoding of a `u64`
pub const MAX_VARINT_LENGTH: usize = 10;

/// Encode a u64 as a Monero-compatible varint
///
/// ```rust
/// use xmr_crypto_core::hash::encode_varint;
///
/// assert_eq!(encode_varint(0), vec![0]);
/// assert_eq!(encode_varint(127), vec![127]);
/// assert_eq!(encode_varint(128), vec![0x80, 0x01]);
/// ```
#[must_use]
pub fn encode_varint(n: u64) -> Vec<u8> {
    let mut result = Vec::with_capacity(MAX_VARINT_LENGTH);
    write_varint(n, &mut result);
    result
}

/// Append the varint encoding of `n` to `out`
pub fn write_varint(mut n: u64, out: &mut Vec<u8>) {
    loop {
        #[allow(clippy::cast_possible_truncation)]
        let byte = (n & 0x7f) as u8;
        n >>= 7;
        if n == 0 {
            out.push(byte);
            break;
        }
        out.push(byte | 0x80);
    }
}

/// Decode a varint from the front of `bytes`
///
/// # Returns
/// The value and the number of bytes consumed.
///
/// # Errors
/// `DecodeError` if the input is truncated, overflows 64 bits, or is not
/// minimally encoded (a trailing zero group).
pub fn decode_varint(bytes: &[u8]) -> CryptoResult<(u64, usize)> {
    let mut value: u64 = 0;

    for (i, &byte) in bytes.iter().enumerate().take(MAX_VARINT_LENGTH) {
        let shift = 7 * i as u32;
        let group = u64::from(byte & 0x7f);

        if shift == 63 && group > 1 {
            return Err(CryptoError::DecodeError("varint overflows u64".into()));
        }
        if i > 0 && byte == 0 {
            return Err(CryptoError::DecodeError("varint is not minimally encoded".into()));
        }

        value |= group << shift;
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }

    Err(CryptoError::DecodeError(if bytes.len() < MAX_VARINT_LENGTH {
        "truncated varint".into()
    } else {
        "varint longer than 10 bytes".into()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_encodings() {
        assert_eq!(encode_varint(0), [0x00]);
        assert_eq!(encode_varint(18), [0x12]);
        assert_eq!(encode_varint(300), [0xac, 0x02]);
        assert_eq!(encode_varint(16_384), [0x80, 0x80, 0x01]);
        assert_eq!(encode_varint(u64::MAX).len(), MAX_VARINT_LENGTH);
    }

    #[test]
    fn test_decode_reports_consumed_length() {
        let mut buf = encode_varint(300);
        buf.extend_from_slice(&[0xde, 0xad]);
        assert_eq!(decode_varint(&buf).unwrap(), (300, 2));
    }

    #[test]
    fn test_decode_extremes() {
        for v in [0, 1, 127, 128, u64::from(u32::MAX), u64::MAX - 1, u64::MAX] {
            let enc = encode_varint(v);
            assert_eq!(decode_varint(&enc).unwrap(), (v, enc.len()));
        }
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(decode_varint(&[]).is_err());
        assert!(decode_varint(&[0x80]).is_err());
        // non-minimal encoding of zero
        assert!(decode_varint(&[0x80, 0x00]).is_err());
        // 2^64
        let mut over = [0xffu8; 10];
        over[9] = 0x02;
        assert!(decode_varint(&over).is_err());
        assert!(decode_varint(&[0xffu8; 11]).is_err());
    }
}
