//! MLSAG ring signatures for RingCT inputs
//!
//! A multilayered linkable ring signature over a key matrix `pk[cols][rows]`.
//! The first `ds_rows` rows are linkable: each carries a key image
//! `I_j = x_j·Hp(pk[π][j])`. The remaining rows only prove knowledge of a
//! discrete log.
//!
//! ## Scheme
//!
//! ```text
//! linkable row:   L = ss·G + c·P    R = ss·Hp(P) + c·I    absorb P ‖ L ‖ R
//! plain row:      L = ss·G + c·P                          absorb P ‖ L
//! c_{i+1} = Hs(m ‖ column i)
//! ```
//!
//! The signer closes the ring at column `π` with `ss_j = alpha_j - c_π·x_j`.
//!
//! ## Simple RingCT
//!
//! [`prove_rct_mg_simple`] signs one input against its ring of `(P, C)`
//! pairs. The second row is `C - C'` for the pseudo output `C'`, so the
//! signature also proves the input and pseudo output commit to the same
//! amount.

use alloc::vec::Vec;

use rand_core::{CryptoRng, RngCore};

use crate::ec::{Point, Public, Scalar};
use crate::hash::{hash_to_point, KeccakHasher};
use crate::keys::generate_key_image;
use crate::types::errors::{CryptoError, CryptoResult};

/// An MLSAG signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MlsagSignature {
    /// Responses, `ss[column][row]`
    pub ss: Vec<Vec<Scalar>>,
    /// Challenge of column 0
    pub cc: Scalar,
    /// Key images of the linkable rows
    pub ii: Vec<Point>,
}

/// A public `(P, C)` ring member: output key and amount commitment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CtKey {
    /// One-time output key
    pub dest: Point,
    /// Amount commitment
    pub mask: Point,
}

fn shape(pk: &[Vec<Point>], ds_rows: usize) -> CryptoResult<usize> {
    if pk.len() < 2 {
        return Err(CryptoError::InvalidLength {
            field: "mlsag columns".into(),
            expected: 2,
            actual: pk.len(),
        });
    }
    let rows = pk[0].len();
    if rows == 0 {
        return Err(CryptoError::InvalidLength {
            field: "mlsag rows".into(),
            expected: 1,
            actual: 0,
        });
    }
    if let Some(column) = pk.iter().find(|column| column.len() != rows) {
        return Err(CryptoError::InvalidLength {
            field: "mlsag rows".into(),
            expected: rows,
            actual: column.len(),
        });
    }
    if ds_rows > rows {
        return Err(CryptoError::InvalidLength {
            field: "mlsag linkable rows".into(),
            expected: rows,
            actual: ds_rows,
        });
    }
    Ok(rows)
}

/// Absorb one column of the ring and return the next challenge
fn column_challenge(
    message: &[u8; 32],
    column: &[Point],
    ss: &[Scalar],
    c: &Scalar,
    images: &[Point],
) -> CryptoResult<Scalar> {
    let mut hasher = KeccakHasher::new();
    hasher.update(message);

    for (j, (p, s)) in column.iter().zip(ss).enumerate() {
        let l = Point::double_scalarmult_vartime(Public::new(c), Public::new(p), Public::new(s));
        hasher.update(p.pack());
        hasher.update(l.pack());
        if let Some(image) = images.get(j) {
            let hp = hash_to_point(&p.pack())?;
            let r = Point::double_scalarmult_vartime2(
                Public::new(s),
                Public::new(&hp),
                Public::new(c),
                Public::new(image),
            );
            hasher.update(r.pack());
        }
    }

    Ok(Scalar::from_bytes_mod_order(hasher.finalize()))
}

/// Sign `message` with column `index` of the key matrix `pk`
///
/// # Arguments
/// * `message` - 32-byte message (the RingCT pre-MLSAG hash)
/// * `pk` - Key matrix, `pk[column][row]`; at least two columns
/// * `xx` - Secret keys of column `index`, one per row
/// * `index` - The real column
/// * `ds_rows` - Number of leading rows that get key images
/// * `rng` - Secure randomness for the nonces and decoy responses
///
/// # Errors
/// - `InvalidLength` for a matrix with fewer than two columns, no rows,
///   ragged columns, `ds_rows` above the row count, a secret vector of the
///   wrong size or `index` outside the ring
/// - `InvalidSecretKey` if some `xx[j]·G` differs from `pk[index][j]`
pub fn gen_mlsag<R: RngCore + CryptoRng>(
    message: &[u8; 32],
    pk: &[Vec<Point>],
    xx: &[Scalar],
    index: usize,
    ds_rows: usize,
    rng: &mut R,
) -> CryptoResult<MlsagSignature> {
    let rows = shape(pk, ds_rows)?;
    let cols = pk.len();
    if index >= cols {
        return Err(CryptoError::InvalidLength {
            field: "mlsag index".into(),
            expected: cols,
            actual: index,
        });
    }
    if xx.len() != rows {
        return Err(CryptoError::InvalidLength {
            field: "mlsag secrets".into(),
            expected: rows,
            actual: xx.len(),
        });
    }
    let real = &pk[index];
    if real.iter().zip(xx).any(|(p, x)| Point::scalarmult_base(x) != *p) {
        return Err(CryptoError::InvalidSecretKey(
            "secret does not match key matrix column".into(),
        ));
    }

    let mut ii = Vec::with_capacity(ds_rows);
    let mut alpha = Vec::with_capacity(rows);
    let mut hasher = KeccakHasher::new();
    hasher.update(message);

    for (j, (p, x)) in real.iter().zip(xx).enumerate() {
        let a = Scalar::random(rng);
        hasher.update(p.pack());
        hasher.update(Point::scalarmult_base(&a).pack());
        if j < ds_rows {
            let hp = hash_to_point(&p.pack())?;
            hasher.update(hp.scalarmult(&a).pack());
            ii.push(generate_key_image(p, x)?);
        }
        alpha.push(a);
    }

    let mut ss: Vec<Vec<Scalar>> = alloc::vec![Vec::new(); cols];
    let mut c = Scalar::from_bytes_mod_order(hasher.finalize());
    let mut cc = Scalar::ZERO;

    let mut i = (index + 1) % cols;
    if i == 0 {
        cc = c.clone();
    }
    while i != index {
        ss[i] = (0..rows).map(|_| Scalar::random(rng)).collect();
        c = column_challenge(message, &pk[i], &ss[i], &c, &ii)?;
        i = (i + 1) % cols;
        if i == 0 {
            cc = c.clone();
        }
    }

    ss[index] = alpha.iter().zip(xx).map(|(a, x)| a.mulsub(&c, x)).collect();

    tracing::debug!(cols, rows, ds_rows, "mlsag generated");
    Ok(MlsagSignature { ss, cc, ii })
}

/// Verify an MLSAG signature over `pk`. Variable-time; all inputs are public.
///
/// Fails on a malformed matrix, a signature whose shape differs from `pk`,
/// a key-image count other than `ds_rows` and key images outside the
/// prime-order subgroup.
#[must_use]
pub fn verify_mlsag(
    message: &[u8; 32],
    pk: &[Vec<Point>],
    sig: &MlsagSignature,
    ds_rows: usize,
) -> bool {
    let result = verify_inner(message, pk, sig, ds_rows);
    tracing::debug!(valid = result.is_ok(), "mlsag verified");
    result.is_ok()
}

fn verify_inner(
    message: &[u8; 32],
    pk: &[Vec<Point>],
    sig: &MlsagSignature,
    ds_rows: usize,
) -> CryptoResult<()> {
    let rows = shape(pk, ds_rows)?;
    if sig.ss.len() != pk.len() || sig.ss.iter().any(|column| column.len() != rows) {
        return Err(CryptoError::InvalidEncoding("mlsag response shape".into()));
    }
    if sig.ii.len() != ds_rows {
        return Err(CryptoError::InvalidEncoding("mlsag key image count".into()));
    }
    for image in &sig.ii {
        image.check_subgroup()?;
    }

    let mut c = sig.cc.clone();
    for (column, ss) in pk.iter().zip(&sig.ss) {
        c = column_challenge(message, column, ss, &c, &sig.ii)?;
    }

    if c == sig.cc {
        Ok(())
    } else {
        Err(CryptoError::InvalidEncoding("mlsag challenge mismatch".into()))
    }
}

/// Key matrix for a simple RingCT input: rows `[P_i, C_i - C']`
fn simple_matrix(pubs: &[CtKey], pseudo_out: &Point) -> Vec<Vec<Point>> {
    pubs.iter()
        .map(|member| alloc::vec![member.dest.clone(), &member.mask - pseudo_out])
        .collect()
}

/// Sign one RingCT input against its ring of `(P, C)` pairs
///
/// # Arguments
/// * `message` - The pre-MLSAG hash
/// * `pubs` - The ring
/// * `dest_secret` - One-time private key of `pubs[index].dest`
/// * `mask_secret` - Commitment mask of `pubs[index].mask`
/// * `pseudo_mask` - Mask of the pseudo output commitment
/// * `pseudo_out` - The pseudo output commitment `C'`
/// * `index` - The real ring member
/// * `rng` - Secure randomness
///
/// # Errors
/// Everything [`gen_mlsag`] reports. A pseudo output that commits to a
/// different amount than `pubs[index].mask` gives `InvalidSecretKey`.
#[allow(clippy::too_many_arguments)]
pub fn prove_rct_mg_simple<R: RngCore + CryptoRng>(
    message: &[u8; 32],
    pubs: &[CtKey],
    dest_secret: &Scalar,
    mask_secret: &Scalar,
    pseudo_mask: &Scalar,
    pseudo_out: &Point,
    index: usize,
    rng: &mut R,
) -> CryptoResult<MlsagSignature> {
    let pk = simple_matrix(pubs, pseudo_out);
    let xx = [dest_secret.clone(), mask_secret - pseudo_mask];
    gen_mlsag(message, &pk, &xx, index, 1, rng)
}

/// Verify a simple RingCT input signature
#[must_use]
pub fn verify_rct_mg_simple(
    message: &[u8; 32],
    pubs: &[CtKey],
    pseudo_out: &Point,
    sig: &MlsagSignature,
) -> bool {
    verify_mlsag(message, &simple_matrix(pubs, pseudo_out), sig, 1)
}
