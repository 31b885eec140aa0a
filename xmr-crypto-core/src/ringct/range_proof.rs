//! Borromean range proofs for 64-bit amounts
//!
//! The amount is split into bits `b_i`. Each bit gets its own commitment
//!
//! ```text
//! C_i = a_i·G + b_i·2^i·H
//! ```
//!
//! and a two-member Borromean ring over `{C_i, C_i - 2^i·H}` proves the
//! signer knows the discrete log of one of them, i.e. that `C_i` commits to
//! 0 or `2^i`. The per-bit commitments sum to `C = (Σ a_i)·G + amount·H`.
//!
//! ## Encoding
//!
//! 6176 bytes, in this order (Monero's `rangeSig`):
//! ```text
//! s0[64] (32 bytes each) ‖ s1[64] ‖ ee (32) ‖ Ci[64]
//! ```
//!
//! ## Matched triple
//!
//! Generation returns the commitment, the mask and the proof together.
//! They only make sense as a unit: a proof verifies against its own
//! commitment, and only the returned mask opens it. Nothing stops a caller
//! from mixing values from different calls; doing so produces commitments
//! that do not balance and proofs that do not verify.

use alloc::vec::Vec;
use core::fmt;

use rand_chacha::ChaCha20Rng;
use rand_core::{CryptoRng, RngCore, SeedableRng};
use zeroize::Zeroize;

use crate::ec::{Point, Public, Scalar};
use crate::hash::{fast_hash, hash_to_scalar, KeccakHasher};
use crate::types::errors::{CryptoError, CryptoResult};

// =============================================================================
// Constants
// =============================================================================

/// Number of amount bits covered by a proof
pub const ATOMS: usize = 64;

/// Size of an encoded range proof
pub const RANGE_PROOF_SIZE: usize = ATOMS * 32 * 3 + 32;

/// Minimum size of each explicit randomness buffer (64 scalars)
pub const EXPLICIT_BUFFER_SIZE: usize = ATOMS * 32;

/// Domain separator for the seed of the simulated ring responses
const SIMULATED_RESPONSE_DOMAIN: &[u8] = b"borromean-range-proof-responses";

// =============================================================================
// Proof Structure
// =============================================================================

/// A Borromean range proof (Monero `rangeSig`)
#[derive(Clone, PartialEq, Eq)]
pub struct RangeProof {
    /// First-ring responses
    pub s0: [[u8; 32]; ATOMS],
    /// Second-ring responses
    pub s1: [[u8; 32]; ATOMS],
    /// Shared Borromean challenge
    pub ee: [u8; 32],
    /// Per-bit commitments
    pub ci: [[u8; 32]; ATOMS],
}

impl RangeProof {
    fn empty() -> Self {
        Self {
            s0: [[0u8; 32]; ATOMS],
            s1: [[0u8; 32]; ATOMS],
            ee: [0u8; 32],
            ci: [[0u8; 32]; ATOMS],
        }
    }

    /// Serialize into a fresh 6176-byte vector
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(RANGE_PROOF_SIZE);
        for s in &self.s0 {
            out.extend_from_slice(s);
        }
        for s in &self.s1 {
            out.extend_from_slice(s);
        }
        out.extend_from_slice(&self.ee);
        for c in &self.ci {
            out.extend_from_slice(c);
        }
        out
    }

    /// Serialize into the first 6176 bytes of `out`
    ///
    /// # Errors
    /// `InvalidProofSize` if `out` is too small; `out` is left untouched.
    pub fn write_to(&self, out: &mut [u8]) -> CryptoResult<()> {
        if out.len() < RANGE_PROOF_SIZE {
            return Err(CryptoError::InvalidProofSize {
                required: RANGE_PROOF_SIZE,
                actual: out.len(),
            });
        }
        let chunks = out[..RANGE_PROOF_SIZE].chunks_exact_mut(32);
        let fields = self
            .s0
            .iter()
            .chain(self.s1.iter())
            .chain(core::iter::once(&self.ee))
            .chain(self.ci.iter());
        for (dst, src) in chunks.zip(fields) {
            dst.copy_from_slice(src);
        }
        Ok(())
    }

    /// Parse an encoded proof
    ///
    /// Only the size is checked here; scalar and point validity is checked
    /// by [`verify_range_proof`].
    ///
    /// # Errors
    /// `InvalidProofSize` unless `bytes` is exactly 6176 bytes long.
    pub fn from_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        if bytes.len() != RANGE_PROOF_SIZE {
            return Err(CryptoError::InvalidProofSize {
                required: RANGE_PROOF_SIZE,
                actual: bytes.len(),
            });
        }

        let mut proof = Self::empty();
        let chunks = bytes.chunks_exact(32);
        let fields = proof
            .s0
            .iter_mut()
            .chain(proof.s1.iter_mut())
            .chain(core::iter::once(&mut proof.ee))
            .chain(proof.ci.iter_mut());
        for (dst, src) in fields.zip(chunks) {
            dst.copy_from_slice(src);
        }
        Ok(proof)
    }
}

impl fmt::Debug for RangeProof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeProof")
            .field("ee", &hex::encode(self.ee))
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// Caller-supplied randomness for reproducible proofs
///
/// `blinding` holds the 64 per-bit blinding factors `a_i` and `nonces` the
/// 64 ring nonces `alpha_i`, 32 little-endian bytes each, reduced mod ℓ.
/// The simulated ring responses are expanded deterministically from both
/// buffers, so identical buffers give byte-identical proofs.
///
/// For audits and test vectors only. Reusing buffers across real outputs
/// leaks the amounts.
#[derive(Clone, Copy)]
pub struct ExplicitRandomness<'a> {
    /// Per-bit blinding factors, at least [`EXPLICIT_BUFFER_SIZE`] bytes
    pub blinding: &'a [u8],
    /// Per-bit ring nonces, at least [`EXPLICIT_BUFFER_SIZE`] bytes
    pub nonces: &'a [u8],
}

impl fmt::Debug for ExplicitRandomness<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExplicitRandomness")
            .field("blinding_len", &self.blinding.len())
            .field("nonces_len", &self.nonces.len())
            .finish()
    }
}

/// Options for [`gen_range_proof`]
#[derive(Debug, Clone, Default)]
pub struct RangeProofConfig<'a> {
    /// Force the total mask to this value (the last output of a
    /// transaction, whose mask must balance the inputs)
    pub known_mask: Option<Scalar>,
    /// Use caller-supplied randomness instead of the RNG
    pub explicit_randomness: Option<ExplicitRandomness<'a>>,
}

/// Commitment, mask and proof from one generation call
#[derive(Debug, Clone)]
pub struct RangeProofOutput {
    /// `C = mask·G + amount·H`
    pub commitment: Point,
    /// Sum of the per-bit blinding factors
    pub mask: Scalar,
    /// The proof for `commitment`
    pub proof: RangeProof,
}

// =============================================================================
// Generation
// =============================================================================

fn scalars_from_buffer(field: &str, buffer: &[u8]) -> CryptoResult<Vec<Scalar>> {
    if buffer.len() < EXPLICIT_BUFFER_SIZE {
        return Err(CryptoError::BufferTooSmall {
            field: field.into(),
            required: EXPLICIT_BUFFER_SIZE,
            actual: buffer.len(),
        });
    }
    Ok(buffer[..EXPLICIT_BUFFER_SIZE]
        .chunks_exact(32)
        .map(|chunk| {
            let mut bytes = [0u8; 32];
            bytes.copy_from_slice(chunk);
            let s = Scalar::from_bytes_mod_order(bytes);
            bytes.zeroize();
            s
        })
        .collect())
}

fn response_rng(explicit: &ExplicitRandomness<'_>) -> ChaCha20Rng {
    let mut hasher = KeccakHasher::new();
    hasher.update(SIMULATED_RESPONSE_DOMAIN);
    hasher.update(&explicit.blinding[..EXPLICIT_BUFFER_SIZE]);
    hasher.update(&explicit.nonces[..EXPLICIT_BUFFER_SIZE]);
    let mut seed = hasher.finalize();
    let rng = ChaCha20Rng::from_seed(seed);
    seed.zeroize();
    rng
}

/// `Hs(pack(P))`
fn hash_point(p: &Point) -> Scalar {
    hash_to_scalar(&p.pack())
}

/// Two-pass Borromean construction
///
/// `ai` and `alpha` hold 64 scalars each; `ai[63]` is overwritten when a
/// known mask is requested. `responses` supplies the simulated responses.
fn prove<R: RngCore + CryptoRng>(
    amount: u64,
    known_mask: Option<&Scalar>,
    mut ai: Vec<Scalar>,
    alpha: Vec<Scalar>,
    responses: &mut R,
) -> CryptoResult<RangeProofOutput> {
    let h = Point::h()?;
    let bit = |i: usize| (amount >> i) & 1 == 1;

    let mut proof = RangeProof::empty();
    let mut mask = Scalar::ZERO;
    let mut commitment = Point::identity();
    let mut c_h = h.clone();
    let mut kck = KeccakHasher::new();

    // First pass: per-bit commitments, s1 for zero bits, challenge ee
    for i in 0..ATOMS {
        if let (Some(known), true) = (known_mask, i == ATOMS - 1) {
            ai[i] = known - &mask;
        }
        mask = &mask + &ai[i];

        let mut l = Point::scalarmult_base(&alpha[i]);
        let mut c_i = Point::scalarmult_base(&ai[i]);
        if bit(i) {
            c_i = &c_i + &c_h;
        }
        commitment = &commitment + &c_i;
        proof.ci[i] = c_i.pack();

        if !bit(i) {
            let si = Scalar::random(responses);
            let c = hash_point(&l);
            let p2 = &c_i - &c_h;
            l = Point::double_scalarmult_vartime(
                Public::new(&c),
                Public::new(&p2),
                Public::new(&si),
            );
            proof.s1[i] = si.pack();
        }

        kck.update(l.pack());
        c_h = c_h.double();
    }

    let ee = Scalar::from_bytes_mod_order(kck.finalize());
    proof.ee = ee.pack();

    // Second pass: s0 everywhere, s1 for one bits
    for i in 0..ATOMS {
        if bit(i) {
            let si = Scalar::random(responses);
            let c_i = Point::unpack_vartime(&proof.ci[i])?;
            let l = Point::double_scalarmult_vartime(
                Public::new(&ee),
                Public::new(&c_i),
                Public::new(&si),
            );
            let c = hash_point(&l);
            proof.s0[i] = si.pack();
            proof.s1[i] = alpha[i].mulsub(&ai[i], &c).pack();
        } else {
            proof.s0[i] = alpha[i].mulsub(&ai[i], &ee).pack();
        }
    }

    Ok(RangeProofOutput {
        commitment,
        mask,
        proof,
    })
}

/// Generate a commitment to `amount`, its mask and a range proof
///
/// # Arguments
/// * `amount` - Amount to commit to
/// * `config` - Optional known mask and explicit randomness
/// * `rng` - Secure randomness; unused when `config.explicit_randomness` is set,
///   see [`gen_range_proof_explicit`] for that case
///
/// # Returns
/// The matched `(commitment, mask, proof)` triple. See the module docs.
///
/// # Errors
/// - `BufferTooSmall` if an explicit randomness buffer holds fewer than 64 scalars
/// - `InternalError` if the H generator cannot be loaded
pub fn gen_range_proof<R: RngCore + CryptoRng>(
    amount: u64,
    config: &RangeProofConfig<'_>,
    rng: &mut R,
) -> CryptoResult<RangeProofOutput> {
    let known_mask = config.known_mask.as_ref();
    if let Some(explicit) = &config.explicit_randomness {
        return gen_range_proof_explicit(amount, known_mask, explicit);
    }

    let mut ai = Vec::with_capacity(ATOMS);
    let mut alpha = Vec::with_capacity(ATOMS);
    for _ in 0..ATOMS {
        ai.push(Scalar::random(rng));
        alpha.push(Scalar::random(rng));
    }
    let output = prove(amount, known_mask, ai, alpha, rng)?;

    tracing::debug!(known_mask = known_mask.is_some(), explicit = false, "range proof generated");
    Ok(output)
}

/// Generate a range proof entirely from caller-supplied randomness
///
/// Identical inputs give byte-identical output; no RNG is involved.
///
/// # Errors
/// - `BufferTooSmall` if either buffer holds fewer than 64 scalars
/// - `InternalError` if the H generator cannot be loaded
pub fn gen_range_proof_explicit(
    amount: u64,
    known_mask: Option<&Scalar>,
    explicit: &ExplicitRandomness<'_>,
) -> CryptoResult<RangeProofOutput> {
    let ai = scalars_from_buffer("blinding", explicit.blinding)?;
    let alpha = scalars_from_buffer("nonces", explicit.nonces)?;
    let mut responses = response_rng(explicit);
    let output = prove(amount, known_mask, ai, alpha, &mut responses)?;

    tracing::debug!(known_mask = known_mask.is_some(), explicit = true, "range proof generated");
    Ok(output)
}

/// [`gen_range_proof`] writing the proof encoding into `out`
///
/// # Returns
/// `(commitment, mask)`; the proof occupies `out[..6176]`.
///
/// # Errors
/// `InvalidProofSize` if `out` is shorter than 6176 bytes (checked before
/// any work), plus everything [`gen_range_proof`] reports.
pub fn gen_range_proof_into<R: RngCore + CryptoRng>(
    out: &mut [u8],
    amount: u64,
    config: &RangeProofConfig<'_>,
    rng: &mut R,
) -> CryptoResult<(Point, Scalar)> {
    if out.len() < RANGE_PROOF_SIZE {
        return Err(CryptoError::InvalidProofSize {
            required: RANGE_PROOF_SIZE,
            actual: out.len(),
        });
    }
    let output = gen_range_proof(amount, config, rng)?;
    output.proof.write_to(out)?;
    Ok((output.commitment, output.mask))
}

// =============================================================================
// Verification
// =============================================================================

/// Verify `proof` against `commitment`. Variable-time; all inputs are public.
///
/// Checks that the per-bit commitments sum to `commitment` and that the
/// Borromean signature over `{C_i, C_i - 2^i·H}` holds. Non-canonical
/// scalars and undecodable points make the proof invalid.
#[must_use]
pub fn verify_range_proof(commitment: &Point, proof: &RangeProof) -> bool {
    let result = verify_inner(commitment, proof);
    tracing::debug!(valid = result.is_ok(), "range proof verified");
    result.is_ok()
}

fn verify_inner(commitment: &Point, proof: &RangeProof) -> CryptoResult<()> {
    let ee = Scalar::unpack(&proof.ee)?;
    let mut c_h = Point::h()?;
    let mut sum = Point::identity();
    let mut kck = KeccakHasher::new();

    for i in 0..ATOMS {
        let c_i = Point::unpack_vartime(&proof.ci[i])?;
        let s0 = Scalar::unpack(&proof.s0[i])?;
        let s1 = Scalar::unpack(&proof.s1[i])?;

        let ll = Point::double_scalarmult_vartime(Public::new(&ee), Public::new(&c_i), Public::new(&s0));
        let c = hash_point(&ll);
        let p2 = &c_i - &c_h;
        let lv = Point::double_scalarmult_vartime(Public::new(&c), Public::new(&p2), Public::new(&s1));
        kck.update(lv.pack());

        sum = &sum + &c_i;
        c_h = c_h.double();
    }

    if Scalar::from_bytes_mod_order(kck.finalize()) != ee {
        return Err(CryptoError::InvalidEncoding("borromean challenge mismatch".into()));
    }
    if sum != *commitment {
        return Err(CryptoError::InvalidEncoding("bit commitments do not sum to C".into()));
    }
    Ok(())
}

/// Seed-derived convenience for fixtures: two buffers filled from `seed`
///
/// Returns `(blinding, nonces)` suitable for [`ExplicitRandomness`].
#[must_use]
pub fn explicit_buffers_from_seed(seed: &[u8]) -> (Vec<u8>, Vec<u8>) {
    let mut rng = ChaCha20Rng::from_seed(fast_hash(seed));
    let mut blinding = alloc::vec![0u8; EXPLICIT_BUFFER_SIZE];
    let mut nonces = alloc::vec![0u8; EXPLICIT_BUFFER_SIZE];
    rng.fill_bytes(&mut blinding);
    rng.fill_bytes(&mut nonces);
    (blinding, nonces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ringct::commitment::gen_c;

    fn rng() -> ChaCha20Rng {
        ChaCha20Rng::from_seed([51u8; 32])
    }

    #[test]
    fn test_proof_size() {
        assert_eq!(RANGE_PROOF_SIZE, 6176);
    }

    #[test]
    fn test_generate_and_verify() {
        let mut rng = rng();
        for amount in [0u64, 1, 123_456_789, u64::MAX] {
            let out = gen_range_proof(amount, &RangeProofConfig::default(), &mut rng).unwrap();
            assert_eq!(out.proof.to_bytes().len(), RANGE_PROOF_SIZE);
            assert_eq!(out.commitment, gen_c(&out.mask, amount).unwrap());
            assert!(verify_range_proof(&out.commitment, &out.proof));
        }
    }

    #[test]
    fn test_known_mask_is_honoured() {
        let mut rng = rng();
        let known = Scalar::random(&mut rng);
        let config = RangeProofConfig {
            known_mask: Some(known.clone()),
            explicit_randomness: None,
        };
        let out = gen_range_proof(1_000, &config, &mut rng).unwrap();
        assert_eq!(out.mask, known);
        assert_eq!(out.commitment, gen_c(&known, 1_000).unwrap());
        assert!(verify_range_proof(&out.commitment, &out.proof));
    }

    #[test]
    fn test_verify_rejects_wrong_commitment_and_tampering() {
        let mut rng = rng();
        let out = gen_range_proof(77, &RangeProofConfig::default(), &mut rng).unwrap();
        let other = gen_c(&out.mask, 78).unwrap();
        assert!(!verify_range_proof(&other, &out.proof));

        let mut tampered = out.proof.clone();
        tampered.s0[5][0] ^= 1;
        assert!(!verify_range_proof(&out.commitment, &tampered));

        let mut tampered = out.proof.clone();
        tampered.ee[0] ^= 1;
        assert!(!verify_range_proof(&out.commitment, &tampered));
    }

    #[test]
    fn test_explicit_randomness_is_deterministic() {
        let (blinding, nonces) = explicit_buffers_from_seed(b"fixture");
        let config = RangeProofConfig {
            known_mask: None,
            explicit_randomness: Some(ExplicitRandomness {
                blinding: &blinding,
                nonces: &nonces,
            }),
        };

        let a = gen_range_proof(123_456_789, &config, &mut rng()).unwrap();
        let b = gen_range_proof(123_456_789, &config, &mut ChaCha20Rng::from_seed([0u8; 32])).unwrap();
        assert_eq!(a.proof, b.proof);
        assert_eq!(a.commitment, b.commitment);
        assert_eq!(a.mask, b.mask);
        assert!(verify_range_proof(&a.commitment, &a.proof));

        // the mask is the sum of the supplied blinding factors
        let expected_mask = blinding
            .chunks_exact(32)
            .map(|c| Scalar::from_bytes_reduced(c).unwrap())
            .fold(Scalar::ZERO, |acc, s| &acc + &s);
        assert_eq!(a.mask, expected_mask);
    }

    #[test]
    fn test_explicit_entry_point_needs_no_rng() {
        let (blinding, nonces) = explicit_buffers_from_seed(b"no rng");
        let explicit = ExplicitRandomness {
            blinding: &blinding,
            nonces: &nonces,
        };
        let known = Scalar::from_u64(99);

        let a = gen_range_proof_explicit(4_321, Some(&known), &explicit).unwrap();
        let b = gen_range_proof_explicit(4_321, Some(&known), &explicit).unwrap();
        assert_eq!(a.proof, b.proof);
        assert_eq!(a.mask, known);
        assert!(verify_range_proof(&a.commitment, &a.proof));

        // the config path routes to the same construction
        let config = RangeProofConfig {
            known_mask: Some(known),
            explicit_randomness: Some(explicit),
        };
        let c = gen_range_proof(4_321, &config, &mut rng()).unwrap();
        assert_eq!(c.proof, a.proof);
        assert_eq!(c.commitment, a.commitment);

        let short = [0u8; 32];
        assert!(matches!(
            gen_range_proof_explicit(1, None, &ExplicitRandomness { blinding: &short, nonces: &nonces }),
            Err(CryptoError::BufferTooSmall { required: 2048, actual: 32, .. })
        ));
    }

    #[test]
    fn test_explicit_buffers_too_small() {
        let small = [0u8; EXPLICIT_BUFFER_SIZE - 1];
        let ok = [0u8; EXPLICIT_BUFFER_SIZE];
        let config = RangeProofConfig {
            known_mask: None,
            explicit_randomness: Some(ExplicitRandomness {
                blinding: &ok,
                nonces: &small,
            }),
        };
        assert!(matches!(
            gen_range_proof(5, &config, &mut rng()),
            Err(CryptoError::BufferTooSmall { required: 2048, actual: 2047, .. })
        ));
    }

    #[test]
    fn test_into_checks_output_size_first() {
        let mut small = [0u8; RANGE_PROOF_SIZE - 1];
        assert!(matches!(
            gen_range_proof_into(&mut small, 5, &RangeProofConfig::default(), &mut rng()),
            Err(CryptoError::InvalidProofSize { required: 6176, actual: 6175 })
        ));

        let mut buf = alloc::vec![0u8; RANGE_PROOF_SIZE + 10];
        let (c, mask) =
            gen_range_proof_into(&mut buf, 5, &RangeProofConfig::default(), &mut rng()).unwrap();
        assert_eq!(c, gen_c(&mask, 5).unwrap());
        let proof = RangeProof::from_bytes(&buf[..RANGE_PROOF_SIZE]).unwrap();
        assert!(verify_range_proof(&c, &proof));
        assert_eq!(proof.to_bytes(), &buf[..RANGE_PROOF_SIZE]);
    }

    #[test]
    fn test_from_bytes_size() {
        assert!(matches!(
            RangeProof::from_bytes(&[0u8; 100]),
            Err(CryptoError::InvalidProofSize { required: 6176, actual: 100 })
        ));
    }
}
