//! Monero's block base58 codec
//!
//! Unlike Bitcoin's base58, the input is cut into 8-byte blocks which are
//! encoded independently: a full block always becomes 11 characters and a
//! shorter final block uses the size given by [`ENCODED_BLOCK_SIZES`].
//! Each block is read as a big-endian integer and written most significant
//! digit first, left-padded with `'1'`.

use alloc::string::String;
use alloc::vec::Vec;

use crate::types::errors::{CryptoError, CryptoResult};

/// Monero's base58 alphabet
pub const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Bytes per full block
pub const FULL_BLOCK_SIZE: usize = 8;

/// Characters per encoded full block
pub const FULL_ENCODED_BLOCK_SIZE: usize = 11;

/// Encoded length of a block of `n` bytes, for `n` in `0..=8`
pub const ENCODED_BLOCK_SIZES: [usize; FULL_BLOCK_SIZE + 1] = [0, 2, 3, 5, 6, 7, 9, 10, 11];

const INVALID: u8 = 0xFF;

/// Reverse lookup from ASCII byte to digit value
const DIGITS: [u8; 256] = {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Decoded length of an encoded block of `n` characters, if `n` is a valid size
fn decoded_block_size(encoded: usize) -> Option<usize> {
    ENCODED_BLOCK_SIZES.iter().position(|&size| size == encoded)
}

fn encode_block(block: &[u8], out: &mut Vec<u8>) {
    let mut num: u64 = 0;
    for &byte in block {
        num = (num << 8) | u64::from(byte);
    }

    let size = ENCODED_BLOCK_SIZES[block.len()];
    let start = out.len();
    out.resize(start + size, ALPHABET[0]);
    for slot in out[start..].iter_mut().rev() {
        if num == 0 {
            break;
        }
        #[allow(clippy::cast_possible_truncation)]
        let digit = (num % 58) as usize;
        *slot = ALPHABET[digit];
        num /= 58;
    }
}

fn decode_block(block: &[u8], size: usize, out: &mut Vec<u8>) -> CryptoResult<()> {
    let mut num: u128 = 0;
    for &c in block {
        let digit = DIGITS[usize::from(c)];
        if digit == INVALID {
            return Err(CryptoError::DecodeError(
                "invalid base58 character".into(),
            ));
        }
        num = num * 58 + u128::from(digit);
        if num > u128::from(u64::MAX) {
            return Err(CryptoError::DecodeError("base58 block overflow".into()));
        }
    }

    if size < FULL_BLOCK_SIZE && num >= 1u128 << (8 * size) {
        return Err(CryptoError::DecodeError("base58 block overflow".into()));
    }

    #[allow(clippy::cast_possible_truncation)]
    let bytes = (num as u64).to_be_bytes();
    out.extend_from_slice(&bytes[FULL_BLOCK_SIZE - size..]);
    Ok(())
}

/// Encode bytes with the block codec
#[must_use]
pub fn encode(data: &[u8]) -> String {
    let full_blocks = data.len() / FULL_BLOCK_SIZE;
    let mut out = Vec::with_capacity(
        full_blocks * FULL_ENCODED_BLOCK_SIZE + ENCODED_BLOCK_SIZES[data.len() % FULL_BLOCK_SIZE],
    );
    for block in data.chunks(FULL_BLOCK_SIZE) {
        encode_block(block, &mut out);
    }
    // every byte comes from ALPHABET
    out.into_iter().map(char::from).collect()
}

/// Decode a block-base58 string
///
/// # Errors
/// `DecodeError` on a character outside the alphabet, a final block of
/// impossible length, or a block whose value does not fit its byte size.
pub fn decode(encoded: impl AsRef<[u8]>) -> CryptoResult<Vec<u8>> {
    let encoded = encoded.as_ref();
    let last_encoded = encoded.len() % FULL_ENCODED_BLOCK_SIZE;
    let last_size = decoded_block_size(last_encoded).ok_or_else(|| {
        CryptoError::DecodeError("invalid base58 length".into())
    })?;

    let full_blocks = encoded.len() / FULL_ENCODED_BLOCK_SIZE;
    let mut out = Vec::with_capacity(full_blocks * FULL_BLOCK_SIZE + last_size);
    for block in encoded.chunks(FULL_ENCODED_BLOCK_SIZE) {
        let size = if block.len() == FULL_ENCODED_BLOCK_SIZE {
            FULL_BLOCK_SIZE
        } else {
            last_size
        };
        decode_block(block, size, &mut out)?;
    }
    Ok(out)
}
