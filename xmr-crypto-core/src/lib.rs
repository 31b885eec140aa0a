//! # xmr-crypto-core
//!
//! Monero-compatible Ed25519 cryptography for wallets and signing devices.
//!
//! This crate provides:
//!
//! - **Scalar and point engine**: arithmetic mod ℓ and on the Ed25519 group,
//!   with explicit constant-time and variable-time entry points
//! - **Hash-to-domain**: Keccak-256 (`cn_fast_hash`), `Hs`, `Hp` and
//!   `derivation_to_scalar`
//! - **Key derivation**: one-time output keys, subaddresses, key images,
//!   ring and Schnorr signatures
//! - **RingCT**: Pedersen commitments, ECDH amount encoding, the
//!   6176-byte Borromean range proof and MLSAG input signatures
//! - **Base58**: Monero's block codec, the tagged checksum envelope and
//!   address encoding
//!
//! ## Architecture
//!
//! 1. **`no_std` Compatible**: only `alloc` is required
//! 2. **Constant-Time Operations**: secrets never reach `*_vartime` code,
//!    which only accepts [`Public`] inputs
//! 3. **Zeroize on Drop**: [`Scalar`] and [`Point`] wipe themselves
//! 4. **Explicit Errors**: every fallible operation returns [`CryptoResult`]
//!
//! ## Modules
//!
//! - [`types`]: error, network and address types
//! - [`ec`]: [`Scalar`] and [`Point`]
//! - [`hash`]: Keccak and the hash-to-domain functions
//! - [`keys`]: derivation, subaddresses, key images, signatures, addresses,
//!   payment ids
//! - [`ringct`]: commitments, ECDH info, range proofs and MLSAG
//! - [`base58`]: Monero base58
//!
//! ## Example
//!
//! ```rust
//! use rand_chacha::ChaCha20Rng;
//! use rand_core::SeedableRng;
//! use xmr_crypto_core::prelude::*;
//!
//! let mut rng = ChaCha20Rng::from_seed([1u8; 32]);
//! let out = gen_range_proof(1_000_000, &RangeProofConfig::default(), &mut rng)?;
//! assert_eq!(out.commitment, gen_c(&out.mask, 1_000_000)?);
//! assert!(verify_range_proof(&out.commitment, &out.proof));
//! # Ok::<(), CryptoError>(())
//! ```
//!
//! ## Security Considerations
//!
//! - Never log or serialize secret scalars; `Debug` on [`Scalar`] is redacted
//! - Supply a cryptographically secure RNG; proofs and signatures leak the
//!   secret if nonces repeat
//! - Explicit range proof randomness is for reproducible fixtures only

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::many_single_char_names)]

extern crate alloc;

pub mod base58;
pub mod ec;
pub mod hash;
pub mod keys;
pub mod ringct;
pub mod types;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ec::{Point, Public, Scalar};
    pub use crate::hash::{fast_hash, hash_to_point, hash_to_scalar};
    pub use crate::ringct::{gen_c, gen_range_proof, verify_range_proof, RangeProofConfig};
    pub use crate::types::errors::*;
    pub use crate::types::*;
}

/// Re-export commonly used types at crate root
pub use types::errors::{CryptoError, CryptoResult};

// Re-export address types
pub use types::address::{AddressType, DecodedAddress, MoneroNetwork};

// Re-export the engine types
pub use ec::{Point, Public, Scalar};
