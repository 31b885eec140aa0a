//! Integration tests: base58 envelope and addresses.
//!
//! Cross-checks the codec against `base58-monero` and walks every
//! network and address type through encode, decode and corruption.
//!
//! Run: `cargo test --test address_codec`

use xmr_crypto_core::base58::{decode, decode_check, encode, encode_check, ALPHABET};
use xmr_crypto_core::keys::{
    decode_address, decode_address_for_network, encode_address, generate_monero_keys,
    get_subaddress_public_keys, INTEGRATED_ADDRESS_LENGTH, STANDARD_ADDRESS_LENGTH,
};
use xmr_crypto_core::{AddressType, CryptoError, DecodedAddress, MoneroNetwork};

// =====================================================================
// Helpers
// =====================================================================

fn sample_addresses() -> Vec<DecodedAddress> {
    let keys = generate_monero_keys(&[0x5Au8; 32]);
    let (d, c) = get_subaddress_public_keys(&keys.view_secret, &keys.spend_public, 1, 4);
    let spend = keys.spend_public.pack();
    let view = keys.view_public.pack();

    MoneroNetwork::ALL
        .iter()
        .flat_map(|&network| {
            [
                DecodedAddress::new_standard(network, spend, view),
                DecodedAddress::new_subaddress(network, d.pack(), c.pack()),
                DecodedAddress::new_integrated(network, spend, view, *b"\x01\x02\x03\x04\x05\x06\x07\x08"),
            ]
        })
        .collect()
}

/// Replace the character at `index` with the next one in the alphabet
fn flip_char(s: &str, index: usize) -> String {
    let mut bytes = s.as_bytes().to_vec();
    let pos = ALPHABET.iter().position(|&c| c == bytes[index]).unwrap();
    bytes[index] = ALPHABET[(pos + 1) % ALPHABET.len()];
    String::from_utf8(bytes).unwrap()
}

// =====================================================================
// Base58
// =====================================================================

#[test]
fn block_codec_matches_base58_monero() {
    for len in 0..=40usize {
        let data: Vec<u8> = (0..len).map(|i| (i * 37 + len) as u8).collect();
        let ours = encode(&data);
        let theirs = base58_monero::encode(&data).unwrap();
        assert_eq!(ours, theirs, "length {len}");
        assert_eq!(decode(&ours).unwrap(), data);
    }
}

#[test]
fn check_codec_matches_base58_monero_for_single_byte_tags() {
    for tag in [0u64, 18, 19, 42, 53, 127] {
        let payload: Vec<u8> = (0..64u8).collect();
        let ours = encode_check(tag, &payload).unwrap();

        let mut raw = vec![u8::try_from(tag).unwrap()];
        raw.extend_from_slice(&payload);
        assert_eq!(ours, base58_monero::encode_check(&raw).unwrap());

        let decoded = base58_monero::decode_check(&ours).unwrap();
        assert_eq!(decoded, raw);
    }
}

#[test]
fn multi_byte_tags_roundtrip() {
    for tag in [128u64, 300, 0x3F_FFFF, u64::MAX] {
        let enc = encode_check(tag, b"payload").unwrap();
        assert_eq!(decode_check(&enc).unwrap(), (b"payload".to_vec(), tag));
    }
}

#[test]
fn payload_bound() {
    assert!(encode_check(18, &[7u8; 128]).is_ok());
    assert!(matches!(
        encode_check(18, &[7u8; 129]),
        Err(CryptoError::EncodeError(_))
    ));
}

#[test]
fn malformed_input_rejected() {
    // '0', 'O', 'I' and 'l' are not in the alphabet
    for bad in ["0", "11O1", "I1", "1l"] {
        assert!(matches!(decode(bad), Err(CryptoError::DecodeError(_))), "{bad}");
    }
    // a 1-character final block cannot occur
    assert!(decode("1").is_err());
    // too short to hold a checksum
    let short = encode(&[1, 2, 3, 4]);
    assert!(decode_check(&short).is_err());
}

// =====================================================================
// Addresses
// =====================================================================

#[test]
fn every_network_and_type_roundtrips() {
    for addr in sample_addresses() {
        let enc = encode_address(&addr).unwrap();
        let expected_len = if addr.address_type == AddressType::Integrated {
            INTEGRATED_ADDRESS_LENGTH
        } else {
            STANDARD_ADDRESS_LENGTH
        };
        assert_eq!(enc.len(), expected_len);
        assert_eq!(decode_address(&enc).unwrap(), addr);
        assert_eq!(decode_address_for_network(&enc, addr.network).unwrap(), addr);
    }
}

#[test]
fn mainnet_addresses_start_with_known_prefixes() {
    for addr in sample_addresses() {
        if addr.network != MoneroNetwork::Mainnet {
            continue;
        }
        let enc = encode_address(&addr).unwrap();
        let first = enc.chars().next().unwrap();
        match addr.address_type {
            AddressType::Standard => assert_eq!(first, '4'),
            AddressType::Subaddress => assert_eq!(first, '8'),
            AddressType::Integrated => assert_eq!(first, '4'),
        }
    }
}

#[test]
fn single_character_corruption_detected() {
    let addr = &sample_addresses()[0];
    let enc = encode_address(addr).unwrap();
    for index in [0, 1, 10, 47, 80, enc.len() - 1] {
        let corrupted = flip_char(&enc, index);
        assert!(
            decode_address(&corrupted).is_err(),
            "corruption at {index} went unnoticed"
        );
    }
}

#[test]
fn wrong_network_reported() {
    let addr = &sample_addresses()[0];
    let enc = encode_address(addr).unwrap();
    assert!(matches!(
        decode_address_for_network(&enc, MoneroNetwork::Testnet),
        Err(CryptoError::NetworkMismatch { .. })
    ));
}
