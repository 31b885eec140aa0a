//! Monero base58
//!
//! - [`block`]: the raw 8-byte-block codec
//! - [`check`]: tagged encoding with a Keccak checksum, used for addresses
//!
//! All tables are compile-time constants.

pub mod block;
pub mod check;

pub use block::{decode, encode, ALPHABET, ENCODED_BLOCK_SIZES};
pub use check::{decode_check, encode_check, MAX_PAYLOAD_LENGTH};
