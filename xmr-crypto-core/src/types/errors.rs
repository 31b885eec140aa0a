//! Error types for cryptographic operations
//!
//! This module defines all error types used throughout xmr-crypto-core.
//! Errors are grouped by the layer that raises them. Every failure is
//! reported at the point the bad input is seen; nothing is coerced into a
//! default scalar or point.

use alloc::string::String;
use core::fmt;

/// Result type alias for cryptographic operations
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Comprehensive error type for all cryptographic operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    // =========================================================================
    // Input Shape Errors
    // =========================================================================
    /// Input buffer has the wrong size for its role
    InvalidLength {
        /// Name of the field
        field: String,
        /// Expected length (minimum, when a range is accepted)
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// Caller-supplied output or scratch buffer is too small
    BufferTooSmall {
        /// Name of the buffer
        field: String,
        /// Required size in bytes
        required: usize,
        /// Actual size in bytes
        actual: usize,
    },

    // =========================================================================
    // Scalar Errors
    // =========================================================================
    /// Well-formed bytes that are not a canonical residue mod ℓ
    InvalidEncoding(String),

    /// Value does not fit the requested integer width
    Overflow {
        /// Bit width of the target integer
        bits: u32,
    },

    // =========================================================================
    // Point Errors
    // =========================================================================
    /// Bytes do not decode to a canonical curve point
    PointDecodeError(String),

    /// Explicit validity check of a point failed
    PointNotOnCurve,

    // =========================================================================
    // Key Errors
    // =========================================================================
    /// Invalid public key value
    InvalidPublicKey(String),

    /// Invalid private/secret key value
    InvalidSecretKey(String),

    // =========================================================================
    // Range Proof Errors
    // =========================================================================
    /// Output buffer cannot hold a range proof, or a proof blob has the wrong size
    InvalidProofSize {
        /// Required size in bytes
        required: usize,
        /// Actual size in bytes
        actual: usize,
    },

    // =========================================================================
    // Base58 / Address Errors
    // =========================================================================
    /// Base58 encoding failed
    EncodeError(String),

    /// Base58 decoding failed (bad alphabet, block length, overflow or checksum)
    DecodeError(String),

    /// Address tag does not belong to any known network/type
    InvalidAddressPrefix(u64),

    /// Address network mismatch
    NetworkMismatch {
        /// Expected network
        expected: String,
        /// Actual network detected
        actual: String,
    },

    /// Decoded address payload has the wrong length for its type
    InvalidAddressLength {
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },

    // =========================================================================
    // General Errors
    // =========================================================================
    /// Internal error (should not happen in normal operation)
    InternalError(String),
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Input shape
            CryptoError::InvalidLength {
                field,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Invalid {field} length: expected {expected}, got {actual}"
                )
            }
            CryptoError::BufferTooSmall {
                field,
                required,
                actual,
            } => {
                write!(
                    f,
                    "Buffer {field} too small: need {required} bytes, got {actual}"
                )
            }

            // Scalars
            CryptoError::InvalidEncoding(msg) => {
                write!(f, "Invalid scalar encoding: {msg}")
            }
            CryptoError::Overflow { bits } => {
                write!(f, "Scalar does not fit into {bits} bits")
            }

            // Points
            CryptoError::PointDecodeError(msg) => {
                write!(f, "Point decoding error: {msg}")
            }
            CryptoError::PointNotOnCurve => {
                write!(f, "Point is not a valid Ed25519 group element")
            }

            // Keys
            CryptoError::InvalidPublicKey(msg) => {
                write!(f, "Invalid public key: {msg}")
            }
            CryptoError::InvalidSecretKey(msg) => {
                write!(f, "Invalid secret key: {msg}")
            }

            // Range proofs
            CryptoError::InvalidProofSize { required, actual } => {
                write!(
                    f,
                    "Invalid range proof size: need {required} bytes, got {actual}"
                )
            }

            // Base58 / addresses
            CryptoError::EncodeError(msg) => {
                write!(f, "Base58 encoding error: {msg}")
            }
            CryptoError::DecodeError(msg) => {
                write!(f, "Base58 decoding error: {msg}")
            }
            CryptoError::InvalidAddressPrefix(tag) => {
                write!(f, "Invalid address prefix: {tag}")
            }
            CryptoError::NetworkMismatch { expected, actual } => {
                write!(f, "Network mismatch: expected {expected}, got {actual}")
            }
            CryptoError::InvalidAddressLength { expected, actual } => {
                write!(
                    f,
                    "Invalid address length: expected {expected}, got {actual}"
                )
            }

            // General
            CryptoError::InternalError(msg) => {
                write!(f, "Internal error: {msg}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CryptoError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_error_display() {
        let err = CryptoError::InvalidLength {
            field: "scalar".into(),
            expected: 32,
            actual: 7,
        };
        let msg = err.to_string();
        assert!(msg.contains("scalar"));
        assert!(msg.contains("32"));
        assert!(msg.contains('7'));
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(CryptoError::PointNotOnCurve, CryptoError::PointNotOnCurve);
        assert_ne!(
            CryptoError::Overflow { bits: 64 },
            CryptoError::Overflow { bits: 32 }
        );
    }

    #[test]
    fn test_proof_size_error() {
        let err = CryptoError::InvalidProofSize {
            required: 6176,
            actual: 100,
        };
        let msg = err.to_string();
        assert!(msg.contains("6176"));
        assert!(msg.contains("100"));
    }
}
