//! Wallet keys and subaddresses
//!
//! ## Key Generation
//!
//! ```text
//! spend = seed mod ℓ
//! view  = Hs(spend)
//! ```
//!
//! ## Subaddresses
//!
//! For account `major` and index `minor`:
//! ```text
//! m = Hs("SubAddr\0" ‖ a ‖ major_le32 ‖ minor_le32)
//! D = B + m·G       (subaddress spend public key)
//! C = a·D           (subaddress view public key)
//! ```
//! Index `(0, 0)` is the primary address and uses `(B, a·G)` unchanged.

use alloc::collections::BTreeMap;

use zeroize::Zeroize;

use crate::ec::{Point, Scalar};
use crate::hash::{fast_hash, KeccakHasher};

/// Domain separator prefixed to every subaddress secret derivation
pub const SUBADDRESS_DOMAIN: &[u8; 8] = b"SubAddr\0";

/// Lookup table from subaddress spend public key to `(major, minor)`
pub type SubaddressTable = BTreeMap<[u8; 32], (u32, u32)>;

// =============================================================================
// Wallet Keys
// =============================================================================

/// A full set of Monero wallet keys
#[derive(Debug, Clone)]
pub struct MoneroKeys {
    /// Private spend key `b`
    pub spend_secret: Scalar,
    /// Public spend key `B = b·G`
    pub spend_public: Point,
    /// Private view key `a`
    pub view_secret: Scalar,
    /// Public view key `A = a·G`
    pub view_public: Point,
}

/// Derive wallet keys from a 32-byte seed the way `account_base::generate` does
///
/// The spend key is the seed reduced mod ℓ; the view key is the hash of the
/// packed spend key, reduced mod ℓ.
#[must_use]
pub fn generate_monero_keys(seed: &[u8; 32]) -> MoneroKeys {
    let spend_secret = Scalar::from_bytes_mod_order(*seed);
    let mut packed = spend_secret.pack();
    let view_secret = Scalar::from_bytes_mod_order(fast_hash(&packed));
    packed.zeroize();

    MoneroKeys {
        spend_public: Point::scalarmult_base(&spend_secret),
        view_public: Point::scalarmult_base(&view_secret),
        spend_secret,
        view_secret,
    }
}

// =============================================================================
// Subaddress Derivation
// =============================================================================

/// `Hs("SubAddr\0" ‖ a ‖ major ‖ minor)`, indices as 4-byte little-endian
///
/// # Arguments
/// * `major` - Account index
/// * `minor` - Address index within the account
/// * `view_secret` - The wallet's private view key `a`
///
/// # Returns
/// The subaddress secret `m`. The subaddress private spend key is `b + m`,
/// see [`get_subaddress_private_spend_key`].
#[must_use]
pub fn get_subaddress_secret_key(major: u32, minor: u32, view_secret: &Scalar) -> Scalar {
    let mut packed = view_secret.pack();
    let mut hasher = KeccakHasher::new();
    hasher.update(SUBADDRESS_DOMAIN);
    hasher.update(packed);
    hasher.update(major.to_le_bytes());
    hasher.update(minor.to_le_bytes());
    packed.zeroize();
    Scalar::from_bytes_mod_order(hasher.finalize())
}

/// Private spend key of a subaddress: `b + m`, or `b` for `(0, 0)`
#[must_use]
pub fn get_subaddress_private_spend_key(
    spend_secret: &Scalar,
    view_secret: &Scalar,
    major: u32,
    minor: u32,
) -> Scalar {
    if major == 0 && minor == 0 {
        return spend_secret.clone();
    }
    spend_secret + &get_subaddress_secret_key(major, minor, view_secret)
}

/// Spend public key of a subaddress: `D = B + m·G`, or `B` for `(0, 0)`
#[must_use]
pub fn get_subaddress_spend_public_key(
    view_secret: &Scalar,
    spend_public: &Point,
    major: u32,
    minor: u32,
) -> Point {
    if major == 0 && minor == 0 {
        return spend_public.clone();
    }
    let m = get_subaddress_secret_key(major, minor, view_secret);
    spend_public + &Point::scalarmult_base(&m)
}

/// Both public keys of a subaddress: `(D, C = a·D)`
///
/// For `(0, 0)` this returns the primary address keys `(B, a·G)`.
#[must_use]
pub fn get_subaddress_public_keys(
    view_secret: &Scalar,
    spend_public: &Point,
    major: u32,
    minor: u32,
) -> (Point, Point) {
    if major == 0 && minor == 0 {
        return (spend_public.clone(), Point::scalarmult_base(view_secret));
    }
    let d = get_subaddress_spend_public_key(view_secret, spend_public, major, minor);
    let c = d.scalarmult(view_secret);
    (d, c)
}

/// Add the spend public keys of `account`'s `minors` to `table`
///
/// Wallets scan outputs by recovering the spend key an output pays to (see
/// [`crate::keys::derive_subaddress_public_key`]) and looking it up here.
pub fn compute_subaddresses(
    view_secret: &Scalar,
    spend_public: &Point,
    account: u32,
    minors: impl IntoIterator<Item = u32>,
    table: &mut SubaddressTable,
) {
    for minor in minors {
        let key = get_subaddress_spend_public_key(view_secret, spend_public, account, minor);
        table.insert(key.pack(), (account, minor));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> MoneroKeys {
        generate_monero_keys(&[0x42u8; 32])
    }

    #[test]
    fn test_generate_monero_keys() {
        let k = keys();
        assert_eq!(k.spend_secret, Scalar::from_bytes_mod_order([0x42u8; 32]));
        assert_eq!(
            k.view_secret,
            Scalar::from_bytes_mod_order(fast_hash(&k.spend_secret.pack()))
        );
        assert_eq!(k.spend_public, Point::scalarmult_base(&k.spend_secret));
        assert_eq!(k.view_public, Point::scalarmult_base(&k.view_secret));
    }

    #[test]
    fn test_subaddress_secret_byte_layout() {
        let k = keys();
        let mut buf = alloc::vec::Vec::new();
        buf.extend_from_slice(b"SubAddr\0");
        buf.extend_from_slice(&k.view_secret.pack());
        buf.extend_from_slice(&1u32.to_le_bytes());
        buf.extend_from_slice(&7u32.to_le_bytes());
        assert_eq!(
            get_subaddress_secret_key(1, 7, &k.view_secret),
            crate::hash::hash_to_scalar(&buf)
        );
    }

    #[test]
    fn test_primary_index_is_identity_mapping() {
        let k = keys();
        let (d, c) = get_subaddress_public_keys(&k.view_secret, &k.spend_public, 0, 0);
        assert_eq!(d, k.spend_public);
        assert_eq!(c, k.view_public);
        assert_eq!(
            get_subaddress_private_spend_key(&k.spend_secret, &k.view_secret, 0, 0),
            k.spend_secret
        );
    }

    #[test]
    fn test_subaddress_keys_are_consistent() {
        let k = keys();
        for (major, minor) in [(0u32, 1u32), (1, 0), (3, 17)] {
            let (d, c) = get_subaddress_public_keys(&k.view_secret, &k.spend_public, major, minor);
            let spend = get_subaddress_private_spend_key(&k.spend_secret, &k.view_secret, major, minor);
            assert_eq!(d, Point::scalarmult_base(&spend));
            assert_eq!(c, d.scalarmult(&k.view_secret));
            assert_ne!(d, k.spend_public);
        }
    }

    #[test]
    fn test_compute_subaddresses_table() {
        let k = keys();
        let mut table = SubaddressTable::new();
        compute_subaddresses(&k.view_secret, &k.spend_public, 0, 0..4, &mut table);
        compute_subaddresses(&k.view_secret, &k.spend_public, 1, [0, 1], &mut table);

        assert_eq!(table.len(), 6);
        assert_eq!(table.get(&k.spend_public.pack()), Some(&(0, 0)));
        let d = get_subaddress_spend_public_key(&k.view_secret, &k.spend_public, 1, 1);
        assert_eq!(table.get(&d.pack()), Some(&(1, 1)));
    }
}
