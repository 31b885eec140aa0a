//! Core type definitions for xmr-crypto-core
//!
//! This module contains:
//! - Error types for cryptographic operations
//! - Address types and network definitions

pub mod address;
pub mod errors;

// Re-export error types
pub use errors::{CryptoError, CryptoResult};

// Re-export address types
pub use address::{
    AddressType, DecodedAddress, MoneroNetwork, CHECKSUM_LENGTH, PAYMENT_ID_LENGTH,
    PUBLIC_KEY_LENGTH,
};
