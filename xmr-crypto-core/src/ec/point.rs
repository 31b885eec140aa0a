//! Ed25519 group elements
//!
//! [`Point`] wraps `curve25519_dalek::EdwardsPoint`, which keeps points in
//! extended twisted-Edwards coordinates; affine form only appears when a
//! point is packed or compared.
//!
//! ## Constant-time vs. variable-time
//!
//! - [`Point::scalarmult_base`] and [`Point::scalarmult`] are constant-time
//!   and are the only multiplications that may see secret scalars.
//! - [`Point::double_scalarmult_vartime`], [`Point::double_scalarmult_vartime2`]
//!   and [`Point::unpack_vartime`] run in time that depends on their inputs.
//!   Their arguments are taken as [`Public`] so secret data cannot reach
//!   them without an explicit declaration at the call site.

use core::fmt;
use core::ops::{Add, Neg, Sub};

use curve25519_dalek::constants::{ED25519_BASEPOINT_POINT, ED25519_BASEPOINT_TABLE};
use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use curve25519_dalek::traits::{Identity, IsIdentity, VartimeMultiscalarMul};
use subtle::{Choice, ConditionallyNegatable, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::public::Public;
use super::scalar::Scalar;
use crate::types::errors::{CryptoError, CryptoResult};

/// Compressed point encoding length
pub const POINT_LENGTH: usize = 32;

/// Monero's amount generator H, compressed
///
/// H = 8·decompress(fast_hash(G)), where G is the packed basepoint.
pub const H_BYTES: [u8; 32] = [
    0x8b, 0x65, 0x59, 0x70, 0x15, 0x37, 0x99, 0xaf, 0x2a, 0xea, 0xdc, 0x9f, 0xf1, 0xad, 0xd0, 0xea,
    0x6c, 0x72, 0x51, 0xd5, 0x41, 0x54, 0xcf, 0xa9, 0x2c, 0x17, 0x3a, 0x0d, 0xd3, 0x9c, 0x1f, 0x94,
];

/// An Ed25519 curve point
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Point(pub(crate) EdwardsPoint);

impl Point {
    // =========================================================================
    // Constants
    // =========================================================================

    /// The neutral element
    #[must_use]
    pub fn identity() -> Self {
        Self(EdwardsPoint::identity())
    }

    /// The Ed25519 basepoint G
    #[must_use]
    pub fn basepoint() -> Self {
        Self(ED25519_BASEPOINT_POINT)
    }

    /// Monero's commitment generator H
    ///
    /// # Errors
    /// `InternalError` if the embedded constant fails to decompress.
    pub fn h() -> CryptoResult<Self> {
        CompressedEdwardsY(H_BYTES)
            .decompress()
            .map(Self)
            .ok_or_else(|| CryptoError::InternalError("H generator failed to decompress".into()))
    }

    // =========================================================================
    // Encoding
    // =========================================================================

    /// Canonical 32-byte compressed encoding
    #[must_use]
    pub fn pack(&self) -> [u8; 32] {
        self.0.compress().to_bytes()
    }

    /// Write the compressed encoding into the first 32 bytes of `out`
    ///
    /// # Errors
    /// `BufferTooSmall` if `out` is shorter than 32 bytes.
    pub fn pack_into(&self, out: &mut [u8]) -> CryptoResult<()> {
        if out.len() < POINT_LENGTH {
            return Err(CryptoError::BufferTooSmall {
                field: "point output".into(),
                required: POINT_LENGTH,
                actual: out.len(),
            });
        }
        out[..POINT_LENGTH].copy_from_slice(self.0.compress().as_bytes());
        Ok(())
    }

    /// Decode and validate a compressed point. Variable-time.
    ///
    /// Rejects encodings that are not on the curve and non-canonical
    /// encodings (y ≥ p, or x = 0 with the sign bit set).
    ///
    /// # Errors
    /// - `InvalidLength` if `bytes` is not 32 bytes long
    /// - `PointDecodeError` on an invalid or non-canonical encoding
    pub fn unpack_vartime(bytes: &[u8]) -> CryptoResult<Self> {
        let arr: [u8; 32] = bytes.try_into().map_err(|_| CryptoError::InvalidLength {
            field: "point".into(),
            expected: POINT_LENGTH,
            actual: bytes.len(),
        })?;

        let point = CompressedEdwardsY(arr).decompress().ok_or_else(|| {
            tracing::trace!("point decompression failed");
            CryptoError::PointDecodeError("not a valid curve point".into())
        })?;

        if point.compress().to_bytes() != arr {
            tracing::trace!("non-canonical point encoding");
            return Err(CryptoError::PointDecodeError(
                "non-canonical point encoding".into(),
            ));
        }

        Ok(Self(point))
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Check that the point is a valid curve element
    ///
    /// A `Point` can only be built from on-curve values ([`Point::unpack_vartime`]
    /// already rejects everything else), so this always succeeds. It is kept
    /// as an explicit assertion; for prime-order membership use
    /// [`Point::check_subgroup`].
    ///
    /// # Errors
    /// `PointNotOnCurve` if the encoding does not decode back to this point.
    pub fn check(&self) -> CryptoResult<()> {
        match CompressedEdwardsY(self.pack()).decompress() {
            Some(p) if p == self.0 => Ok(()),
            _ => Err(CryptoError::PointNotOnCurve),
        }
    }

    /// Whether the point lies in the prime-order subgroup
    #[must_use]
    pub fn is_torsion_free(&self) -> bool {
        self.0.is_torsion_free()
    }

    /// Check that the point is a valid element of the prime-order subgroup
    ///
    /// # Errors
    /// `PointNotOnCurve` if it is off-curve or has a small-order component.
    pub fn check_subgroup(&self) -> CryptoResult<()> {
        self.check()?;
        if self.is_torsion_free() {
            Ok(())
        } else {
            Err(CryptoError::PointNotOnCurve)
        }
    }

    /// Whether this is the neutral element
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.0.is_identity()
    }

    /// Canonical representative of this point
    ///
    /// Every `Point` already holds a valid curve element, so this always
    /// succeeds and returns an equal point.
    ///
    /// # Errors
    /// `PointNotOnCurve` if the point does not survive an encode/decode cycle.
    pub fn normalize(&self) -> CryptoResult<Point> {
        CompressedEdwardsY(self.pack())
            .decompress()
            .map(Self)
            .ok_or(CryptoError::PointNotOnCurve)
    }

    // =========================================================================
    // Group law
    // =========================================================================

    /// `self + other`, or `self - other` when `negate` is set
    #[must_use]
    pub fn add_signed(&self, other: &Point, negate: bool) -> Point {
        let mut out = Point::identity();
        self.add_signed_into(other, negate, &mut out);
        out
    }

    /// `out = self ± other`
    pub fn add_signed_into(&self, other: &Point, negate: bool, out: &mut Point) {
        let mut rhs = other.0;
        rhs.conditional_negate(Choice::from(u8::from(negate)));
        out.0 = self.0 + rhs;
    }

    /// `2·self`
    #[must_use]
    pub fn double(&self) -> Point {
        Point(self.0 + self.0)
    }

    /// `out = 2·self`
    pub fn double_into(&self, out: &mut Point) {
        out.0 = self.0 + self.0;
    }

    /// `8·self`, clearing any small-order component
    #[must_use]
    pub fn mul8(&self) -> Point {
        Point(self.0.mul_by_cofactor())
    }

    /// `out = 8·self`
    pub fn mul8_into(&self, out: &mut Point) {
        out.0 = self.0.mul_by_cofactor();
    }

    // =========================================================================
    // Constant-time scalar multiplication
    // =========================================================================

    /// `s·G`, constant-time
    #[must_use]
    pub fn scalarmult_base(s: &Scalar) -> Point {
        Point(ED25519_BASEPOINT_TABLE * &s.0)
    }

    /// `out = s·G`, constant-time
    pub fn scalarmult_base_into(s: &Scalar, out: &mut Point) {
        out.0 = ED25519_BASEPOINT_TABLE * &s.0;
    }

    /// `s·self`, constant-time
    #[must_use]
    pub fn scalarmult(&self, s: &Scalar) -> Point {
        Point(self.0 * s.0)
    }

    /// `out = s·self`, constant-time
    pub fn scalarmult_into(&self, s: &Scalar, out: &mut Point) {
        out.0 = self.0 * s.0;
    }

    /// `amount·H`
    ///
    /// # Errors
    /// Propagates the failure of [`Point::h`].
    pub fn scalarmult_h(amount: u64) -> CryptoResult<Point> {
        Ok(Self::h()?.scalarmult(&Scalar::from_u64(amount)))
    }

    // =========================================================================
    // Variable-time multiplication (public inputs only)
    // =========================================================================

    /// `a·A + b·G`. Variable-time; never pass secret-derived values.
    #[must_use]
    #[allow(non_snake_case)]
    pub fn double_scalarmult_vartime(
        a: Public<'_, Scalar>,
        A: Public<'_, Point>,
        b: Public<'_, Scalar>,
    ) -> Point {
        Point(EdwardsPoint::vartime_double_scalar_mul_basepoint(
            &a.get().0, &A.get().0, &b.get().0,
        ))
    }

    /// `out = a·A + b·G`. Variable-time.
    #[allow(non_snake_case)]
    pub fn double_scalarmult_vartime_into(
        a: Public<'_, Scalar>,
        A: Public<'_, Point>,
        b: Public<'_, Scalar>,
        out: &mut Point,
    ) {
        out.0 = EdwardsPoint::vartime_double_scalar_mul_basepoint(&a.get().0, &A.get().0, &b.get().0);
    }

    /// `a·A + b·B` for two independent pairs. Variable-time.
    #[must_use]
    #[allow(non_snake_case)]
    pub fn double_scalarmult_vartime2(
        a: Public<'_, Scalar>,
        A: Public<'_, Point>,
        b: Public<'_, Scalar>,
        B: Public<'_, Point>,
    ) -> Point {
        Point(EdwardsPoint::vartime_multiscalar_mul(
            [&a.get().0, &b.get().0],
            [&A.get().0, &B.get().0],
        ))
    }

    /// `out = a·A + b·B`. Variable-time.
    #[allow(non_snake_case)]
    pub fn double_scalarmult_vartime2_into(
        a: Public<'_, Scalar>,
        A: Public<'_, Point>,
        b: Public<'_, Scalar>,
        B: Public<'_, Point>,
        out: &mut Point,
    ) {
        out.0 = EdwardsPoint::vartime_multiscalar_mul([&a.get().0, &b.get().0], [&A.get().0, &B.get().0]);
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::identity()
    }
}

impl ConstantTimeEq for Point {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.compress().as_bytes().ct_eq(other.0.compress().as_bytes())
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Point {}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({})", hex::encode(self.pack()))
    }
}

impl<'b> Add<&'b Point> for &Point {
    type Output = Point;

    fn add(self, rhs: &'b Point) -> Point {
        Point(self.0 + rhs.0)
    }
}

impl<'b> Sub<&'b Point> for &Point {
    type Output = Point;

    fn sub(self, rhs: &'b Point) -> Point {
        Point(self.0 - rhs.0)
    }
}

impl Neg for &Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point(-self.0)
    }
}
