//! Key operations module
//!
//! This module provides:
//! - Output key derivation and the `add_keys` combinations
//! - Wallet key generation and subaddress derivation
//! - Key images, ring signatures and Schnorr signatures
//! - Address encoding and decoding
//! - Payment id encryption for the transaction extra

pub mod address;
pub mod derive;
pub mod image;
pub mod payment_id;
pub mod ring;
pub mod signature;
pub mod subaddress;

// Re-export derivation functions
pub use derive::{
    add_keys2, add_keys2_vartime, add_keys3, add_keys3_vartime, derive_private_key,
    derive_public_key, derive_subaddress_public_key, generate_key_derivation,
};

// Re-export wallet and subaddress functions
pub use subaddress::{
    compute_subaddresses, generate_monero_keys, get_subaddress_private_spend_key,
    get_subaddress_public_keys, get_subaddress_secret_key, get_subaddress_spend_public_key,
    MoneroKeys, SubaddressTable, SUBADDRESS_DOMAIN,
};

// Re-export key image and signature functions
pub use image::{
    export_key_image, generate_key_image, generate_key_image_helper,
    generate_key_image_helper_precomp, is_out_to_acc_precomp,
};
pub use ring::{check_ring_signature, generate_ring_signature, RingSignature, RingSignatureElement};
pub use signature::{check_signature, generate_signature, Signature, SIGNATURE_LENGTH};

pub use payment_id::{decrypt_payment_id, encrypt_payment_id, ENCRYPTED_PAYMENT_ID_TAIL};

// Re-export address functions
pub use address::{
    decode_address, decode_address_for_network, encode_address, INTEGRATED_ADDRESS_LENGTH,
    STANDARD_ADDRESS_LENGTH,
};
