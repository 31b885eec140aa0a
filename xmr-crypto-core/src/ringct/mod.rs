//! RingCT amount primitives
//!
//! - [`commitment`]: Pedersen commitments `mask·G + amount·H`
//! - [`ecdh`]: amount and mask hidden under a shared key
//! - [`range_proof`]: 64-bit Borromean range proofs (6176 bytes)
//! - [`mlsag`]: MLSAG input signatures

pub mod commitment;
pub mod ecdh;
pub mod mlsag;
pub mod range_proof;

pub use commitment::{gen_c, zero_commit};
pub use ecdh::{ecdh_decode, ecdh_encode, EcdhInfo};
pub use mlsag::{
    gen_mlsag, prove_rct_mg_simple, verify_mlsag, verify_rct_mg_simple, CtKey, MlsagSignature,
};
pub use range_proof::{
    explicit_buffers_from_seed, gen_range_proof, gen_range_proof_explicit, gen_range_proof_into,
    verify_range_proof, ExplicitRandomness, RangeProof, RangeProofConfig, RangeProofOutput, ATOMS,
    EXPLICIT_BUFFER_SIZE, RANGE_PROOF_SIZE,
};
