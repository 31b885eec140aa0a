//! Arithmetic in GF(2^255 - 19)
//!
//! curve25519-dalek keeps its field type private, but Monero's
//! `ge_fromfe_frombytes_vartime` map works directly on field elements.
//! This is a small radix-2^51 implementation carrying only what that map
//! needs. It is not exported from the crate.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

const MASK51: u64 = (1u64 << 51) - 1;

/// 4·p, limb-wise, so subtraction never underflows for reduced inputs
const FOUR_P: [u64; 5] = [
    0x001F_FFFF_FFFF_FFB4,
    0x001F_FFFF_FFFF_FFFC,
    0x001F_FFFF_FFFF_FFFC,
    0x001F_FFFF_FFFF_FFFC,
    0x001F_FFFF_FFFF_FFFC,
];

/// p - 2, little-endian
const P_MINUS_TWO: [u8; 32] = {
    let mut e = [0xFFu8; 32];
    e[0] = 0xEB;
    e[31] = 0x7F;
    e
};

/// (p - 5) / 8 = 2^252 - 3, little-endian
const P_MINUS_FIVE_OVER_EIGHT: [u8; 32] = {
    let mut e = [0xFFu8; 32];
    e[0] = 0xFD;
    e[31] = 0x0F;
    e
};

/// An element of GF(2^255 - 19) in five 51-bit limbs.
///
/// Limbs are kept below 2^52 after every operation.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FieldElement([u64; 5]);

impl FieldElement {
    pub(crate) const ZERO: Self = Self([0; 5]);
    pub(crate) const ONE: Self = Self([1, 0, 0, 0, 0]);

    pub(crate) const fn from_u64(v: u64) -> Self {
        Self([v & MASK51, v >> 51, 0, 0, 0])
    }

    /// Load 32 little-endian bytes as an integer mod p.
    ///
    /// All 256 bits count: bit 255 contributes 2^255 ≡ 19.
    pub(crate) fn from_bytes(bytes: &[u8; 32]) -> Self {
        let load = |i: usize| {
            let mut w = [0u8; 8];
            w.copy_from_slice(&bytes[i * 8..i * 8 + 8]);
            u64::from_le_bytes(w)
        };
        let (w0, w1, w2, w3) = (load(0), load(1), load(2), load(3));

        let limbs = [
            (w0 & MASK51) + 19 * (w3 >> 63),
            ((w0 >> 51) | (w1 << 13)) & MASK51,
            ((w1 >> 38) | (w2 << 26)) & MASK51,
            ((w2 >> 25) | (w3 << 39)) & MASK51,
            (w3 >> 12) & MASK51,
        ];
        Self::weak_reduce(limbs)
    }

    /// Canonical little-endian encoding (value fully reduced below p)
    pub(crate) fn to_bytes(self) -> [u8; 32] {
        let mut l = Self::weak_reduce(self.0).0;

        // q = 1 iff value >= p
        let mut q = (l[0] + 19) >> 51;
        q = (l[1] + q) >> 51;
        q = (l[2] + q) >> 51;
        q = (l[3] + q) >> 51;
        q = (l[4] + q) >> 51;

        l[0] += 19 * q;
        l[1] += l[0] >> 51;
        l[0] &= MASK51;
        l[2] += l[1] >> 51;
        l[1] &= MASK51;
        l[3] += l[2] >> 51;
        l[2] &= MASK51;
        l[4] += l[3] >> 51;
        l[3] &= MASK51;
        l[4] &= MASK51;

        let words = [
            l[0] | (l[1] << 51),
            (l[1] >> 13) | (l[2] << 38),
            (l[2] >> 26) | (l[3] << 25),
            (l[3] >> 39) | (l[4] << 12),
        ];
        let mut out = [0u8; 32];
        for (chunk, word) in out.chunks_exact_mut(8).zip(words) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        out
    }

    fn weak_reduce(mut l: [u64; 5]) -> Self {
        let c0 = l[0] >> 51;
        let c1 = l[1] >> 51;
        let c2 = l[2] >> 51;
        let c3 = l[3] >> 51;
        let c4 = l[4] >> 51;
        l[0] &= MASK51;
        l[1] &= MASK51;
        l[2] &= MASK51;
        l[3] &= MASK51;
        l[4] &= MASK51;
        l[0] += c4 * 19;
        l[1] += c0;
        l[2] += c1;
        l[3] += c2;
        l[4] += c3;
        Self(l)
    }

    pub(crate) fn add(&self, rhs: &Self) -> Self {
        let mut l = self.0;
        for (a, b) in l.iter_mut().zip(rhs.0) {
            *a += b;
        }
        Self::weak_reduce(l)
    }

    pub(crate) fn sub(&self, rhs: &Self) -> Self {
        let mut l = self.0;
        for i in 0..5 {
            l[i] = (l[i] + FOUR_P[i]) - rhs.0[i];
        }
        Self::weak_reduce(l)
    }

    pub(crate) fn neg(&self) -> Self {
        Self::ZERO.sub(self)
    }

    pub(crate) fn mul(&self, rhs: &Self) -> Self {
        let a = self.0;
        let b = rhs.0;
        let m = |x: u64, y: u64| u128::from(x) * u128::from(y);

        let mut c = [
            m(a[0], b[0]) + 19 * (m(a[1], b[4]) + m(a[2], b[3]) + m(a[3], b[2]) + m(a[4], b[1])),
            m(a[0], b[1]) + m(a[1], b[0]) + 19 * (m(a[2], b[4]) + m(a[3], b[3]) + m(a[4], b[2])),
            m(a[0], b[2]) + m(a[1], b[1]) + m(a[2], b[0]) + 19 * (m(a[3], b[4]) + m(a[4], b[3])),
            m(a[0], b[3]) + m(a[1], b[2]) + m(a[2], b[1]) + m(a[3], b[0]) + 19 * m(a[4], b[4]),
            m(a[0], b[4]) + m(a[1], b[3]) + m(a[2], b[2]) + m(a[3], b[1]) + m(a[4], b[0]),
        ];

        let mask = u128::from(MASK51);
        for i in 0..4 {
            c[i + 1] += c[i] >> 51;
            c[i] &= mask;
        }
        let carry = c[4] >> 51;
        c[4] &= mask;
        c[0] += carry * 19;
        c[1] += c[0] >> 51;
        c[0] &= mask;

        // every limb now fits in 52 bits
        #[allow(clippy::cast_possible_truncation)]
        Self([
            c[0] as u64,
            c[1] as u64,
            c[2] as u64,
            c[3] as u64,
            c[4] as u64,
        ])
    }

    pub(crate) fn square(&self) -> Self {
        self.mul(self)
    }

    /// Left-to-right square and multiply over a little-endian exponent
    fn pow(&self, exp: &[u8; 32]) -> Self {
        let mut r = Self::ONE;
        for byte in exp.iter().rev() {
            for bit in (0..8).rev() {
                r = r.square();
                let mul = r.mul(self);
                r.conditional_assign(&mul, Choice::from((byte >> bit) & 1));
            }
        }
        r
    }

    /// Multiplicative inverse (0 maps to 0)
    pub(crate) fn invert(&self) -> Self {
        self.pow(&P_MINUS_TWO)
    }

    /// self^((p - 5) / 8)
    pub(crate) fn pow_p58(&self) -> Self {
        self.pow(&P_MINUS_FIVE_OVER_EIGHT)
    }

    pub(crate) fn is_zero(&self) -> Choice {
        self.to_bytes().ct_eq(&[0u8; 32])
    }
}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut l = [0u64; 5];
        for (i, limb) in l.iter_mut().enumerate() {
            *limb = u64::conditional_select(&a.0[i], &b.0[i], choice);
        }
        Self(l)
    }
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.to_bytes().ct_eq(&other.to_bytes())
    }
}
