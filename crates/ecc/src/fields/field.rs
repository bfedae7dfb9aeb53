use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::field_params::FieldParams;

// ---------------------------------------------------------------------------
// Limb helpers
// ---------------------------------------------------------------------------

/// 64x64 -> 128-bit wide multiply, returns (lo, hi).
#[inline(always)]
const fn mul_wide(a: u64, b: u64) -> (u64, u64) {
    let res = a as u128 * b as u128;
    (res as u64, (res >> 64) as u64)
}

/// Multiply-accumulate: a + b*c + carry_in -> (result, carry_out).
#[inline(always)]
const fn mac(a: u64, b: u64, c: u64, carry_in: u64) -> (u64, u64) {
    let res = a as u128 + (b as u128 * c as u128) + carry_in as u128;
    (res as u64, (res >> 64) as u64)
}

/// Multiply-accumulate without carry_in: a + b*c -> (result, carry_out).
#[inline(always)]
const fn mac_mini(a: u64, b: u64, c: u64) -> (u64, u64) {
    let res = a as u128 + (b as u128 * c as u128);
    (res as u64, (res >> 64) as u64)
}

/// Multiply-accumulate keeping only the high word of a + b*c.
#[inline(always)]
const fn mac_discard_lo(a: u64, b: u64, c: u64) -> u64 {
    let res = a as u128 + (b as u128 * c as u128);
    (res >> 64) as u64
}

/// Add with carry: a + b + carry_in -> (result, carry_out).
#[inline(always)]
const fn addc(a: u64, b: u64, carry_in: u64) -> (u64, u64) {
    let res = a as u128 + b as u128 + carry_in as u128;
    (res as u64, (res >> 64) as u64)
}

/// Subtract with borrow: a - b - (borrow_in >> 63) -> (result, borrow_out).
/// The borrow flag lives in the MSB of the second word, so a chain of `sbb`
/// calls threads it without extra masking.
#[inline(always)]
const fn sbb(a: u64, b: u64, borrow_in: u64) -> (u64, u64) {
    let res = (a as u128).wrapping_sub(b as u128 + (borrow_in >> 63) as u128);
    (res as u64, (res >> 64) as u64)
}

// ---------------------------------------------------------------------------
// Field<P>
// ---------------------------------------------------------------------------

/// A prime-field element in Montgomery form, generic over parameters `P`.
///
/// Stores 4 x u64 limbs (little-endian). Values are kept in the coarse range
/// [0, 2p) between operations; full reduction to [0, p) happens on
/// [`reduce`](Self::reduce), [`from_montgomery_form`](Self::from_montgomery_form)
/// and comparisons.
#[repr(C, align(32))]
pub struct Field<P: FieldParams> {
    pub data: [u64; 4],
    _phantom: PhantomData<P>,
}

// Manual Clone/Copy since PhantomData<P> does not require P: Copy.
impl<P: FieldParams> Clone for Field<P> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: FieldParams> Copy for Field<P> {}

impl<P: FieldParams> fmt::Debug for Field<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.reduce();
        write!(
            f,
            "Field(0x{:016x}{:016x}{:016x}{:016x})",
            r.data[3], r.data[2], r.data[1], r.data[0]
        )
    }
}

/// Prints the canonical (non-Montgomery) integer value as hex. This is the
/// form constraint diagnostics carry.
impl<P: FieldParams> fmt::Display for Field<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.from_montgomery_form();
        write!(
            f,
            "0x{:016x}{:016x}{:016x}{:016x}",
            r.data[3], r.data[2], r.data[1], r.data[0]
        )
    }
}

// Constants derived from the params.
impl<P: FieldParams> Field<P> {
    const MODULUS: [u64; 4] = P::MODULUS;

    /// 2^256 - p (two's complement of the modulus), for branchless reduction.
    const NOT_MODULUS: [u64; 4] = Self::twos_complement(P::MODULUS);

    /// 2p. Valid because the coarse representation requires p < 2^255.
    const TWICE_MODULUS: [u64; 4] = {
        let m = P::MODULUS;
        let (r0, c) = (m[0] << 1, m[0] >> 63);
        let (r1, c) = ((m[1] << 1) | c, m[1] >> 63);
        let (r2, c) = ((m[2] << 1) | c, m[2] >> 63);
        let r3 = (m[3] << 1) | c;
        [r0, r1, r2, r3]
    };

    /// 2^256 - 2p, for branchless coarse reduction.
    const TWICE_NOT_MODULUS: [u64; 4] = Self::twos_complement(Self::TWICE_MODULUS);

    /// p - 2, the Fermat inversion exponent.
    const MODULUS_MINUS_TWO: [u64; 4] = {
        let m = P::MODULUS;
        [m[0].wrapping_sub(2), m[1], m[2], m[3]]
    };

    const fn twos_complement(v: [u64; 4]) -> [u64; 4] {
        let r0 = (!v[0]).wrapping_add(1);
        let c0 = (r0 < 1) as u64;
        let r1 = (!v[1]).wrapping_add(c0);
        let c1 = (r1 < c0) as u64;
        let r2 = (!v[2]).wrapping_add(c1);
        let c2 = (r2 < c1) as u64;
        let r3 = (!v[3]).wrapping_add(c2);
        [r0, r1, r2, r3]
    }
}

// ---------------------------------------------------------------------------
// Constructors
// ---------------------------------------------------------------------------

impl<P: FieldParams> Field<P> {
    /// Zero (additive identity). 0 * R = 0, so no conversion needed.
    #[inline]
    pub const fn zero() -> Self {
        Self::from_raw([0, 0, 0, 0])
    }

    /// One (multiplicative identity) in Montgomery form.
    #[inline]
    pub fn one() -> Self {
        Self::from(1u64)
    }

    /// Construct from a u64, converting into Montgomery form.
    #[inline]
    pub fn from(val: u64) -> Self {
        Self {
            data: [val, 0, 0, 0],
            _phantom: PhantomData,
        }
        .to_montgomery_form()
    }

    /// Construct from raw limbs that are already in Montgomery form.
    #[inline]
    pub const fn from_raw(data: [u64; 4]) -> Self {
        Self {
            data,
            _phantom: PhantomData,
        }
    }

    /// Construct from canonical (non-Montgomery) limbs.
    #[inline]
    pub fn from_limbs(data: [u64; 4]) -> Self {
        Self {
            data,
            _phantom: PhantomData,
        }
        .to_montgomery_form()
    }
}

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

impl<P: FieldParams> Field<P> {
    /// Full reduction from [0, 2p) to [0, p).
    #[inline]
    pub fn reduce(&self) -> Self {
        if P::MODULUS_IS_BIG {
            if !self.ge_modulus() {
                return *self;
            }
            let (r0, b) = sbb(self.data[0], Self::MODULUS[0], 0);
            let (r1, b) = sbb(self.data[1], Self::MODULUS[1], b);
            let (r2, b) = sbb(self.data[2], Self::MODULUS[2], b);
            let (r3, _) = sbb(self.data[3], Self::MODULUS[3], b);
            Self::from_raw([r0, r1, r2, r3])
        } else {
            // Branchless: add 2^256 - p and keep the sum iff it carried out.
            let t0 = self.data[0].wrapping_add(Self::NOT_MODULUS[0]);
            let c = (t0 < self.data[0]) as u64;
            let (t1, c) = addc(self.data[1], Self::NOT_MODULUS[1], c);
            let (t2, c) = addc(self.data[2], Self::NOT_MODULUS[2], c);
            let (t3, c) = addc(self.data[3], Self::NOT_MODULUS[3], c);
            let mask = 0u64.wrapping_sub(c);
            Self::from_raw([
                (self.data[0] & !mask) | (t0 & mask),
                (self.data[1] & !mask) | (t1 & mask),
                (self.data[2] & !mask) | (t2 & mask),
                (self.data[3] & !mask) | (t3 & mask),
            ])
        }
    }

    #[inline]
    fn ge_modulus(&self) -> bool {
        for i in (1..4).rev() {
            if self.data[i] > Self::MODULUS[i] {
                return true;
            }
            if self.data[i] < Self::MODULUS[i] {
                return false;
            }
        }
        self.data[0] >= Self::MODULUS[0]
    }

    /// Modular addition; the result stays coarse.
    #[inline]
    pub fn add(&self, other: &Self) -> Self {
        let r0 = self.data[0].wrapping_add(other.data[0]);
        let c = (r0 < self.data[0]) as u64;
        let (r1, c) = addc(self.data[1], other.data[1], c);
        let (r2, c) = addc(self.data[2], other.data[2], c);

        if P::MODULUS_IS_BIG {
            let (r3, c) = addc(self.data[3], other.data[3], c);
            if c == 0 {
                return Self::from_raw([r0, r1, r2, r3]);
            }
            // Overflowed 2^256: subtract p once, and once more if still >= p.
            let (s0, b) = sbb(r0, Self::MODULUS[0], 0);
            let (s1, b) = sbb(r1, Self::MODULUS[1], b);
            let (s2, b) = sbb(r2, Self::MODULUS[2], b);
            let (s3, b) = sbb(r3, Self::MODULUS[3], b);
            if b != 0 {
                return Self::from_raw([s0, s1, s2, s3]);
            }
            let (s0, b2) = sbb(s0, Self::MODULUS[0], 0);
            let (s1, b2) = sbb(s1, Self::MODULUS[1], b2);
            let (s2, b2) = sbb(s2, Self::MODULUS[2], b2);
            let (s3, _) = sbb(s3, Self::MODULUS[3], b2);
            Self::from_raw([s0, s1, s2, s3])
        } else {
            let r3 = self.data[3].wrapping_add(other.data[3]).wrapping_add(c);
            // Branchless coarse reduction: add 2^256 - 2p, keep on carry.
            let t0 = r0.wrapping_add(Self::TWICE_NOT_MODULUS[0]);
            let c2 = (t0 < Self::TWICE_NOT_MODULUS[0]) as u64;
            let (t1, c2) = addc(r1, Self::TWICE_NOT_MODULUS[1], c2);
            let (t2, c2) = addc(r2, Self::TWICE_NOT_MODULUS[2], c2);
            let (t3, c2) = addc(r3, Self::TWICE_NOT_MODULUS[3], c2);
            let mask = 0u64.wrapping_sub(c2);
            Self::from_raw([
                (r0 & !mask) | (t0 & mask),
                (r1 & !mask) | (t1 & mask),
                (r2 & !mask) | (t2 & mask),
                (r3 & !mask) | (t3 & mask),
            ])
        }
    }

    /// Modular subtraction with full correction back into [0, 2p).
    #[inline]
    pub fn subtract(&self, other: &Self) -> Self {
        let (r0, b) = sbb(self.data[0], other.data[0], 0);
        let (r1, b) = sbb(self.data[1], other.data[1], b);
        let (r2, b) = sbb(self.data[2], other.data[2], b);
        let (mut r3, b) = sbb(self.data[3], other.data[3], b);
        let borrow = b;

        // On underflow add p back, and once more if the first add did not
        // carry out of the top limb.
        let mut r0 = r0.wrapping_add(Self::MODULUS[0] & borrow);
        let mut carry = (r0 < (Self::MODULUS[0] & borrow)) as u64;
        let (mut r1, c) = addc(r1, Self::MODULUS[1] & borrow, carry);
        carry = c;
        let (mut r2, c) = addc(r2, Self::MODULUS[2] & borrow, carry);
        carry = c;
        let wide = r3 as u128 + (Self::MODULUS[3] & borrow) as u128 + carry as u128;
        r3 = wide as u64;
        let carried_out = (wide >> 64) as u64;

        if carried_out == 0 && borrow != 0 {
            let prev = r0;
            r0 = r0.wrapping_add(Self::MODULUS[0] & borrow);
            carry = (r0 < prev) as u64;
            let (v1, c) = addc(r1, Self::MODULUS[1] & borrow, carry);
            r1 = v1;
            carry = c;
            let (v2, c) = addc(r2, Self::MODULUS[2] & borrow, carry);
            r2 = v2;
            carry = c;
            r3 = r3.wrapping_add((Self::MODULUS[3] & borrow).wrapping_add(carry));
        }

        Self::from_raw([r0, r1, r2, r3])
    }

    /// Coarse subtraction: on underflow adds 2p, staying in [0, 2p).
    #[inline]
    pub fn subtract_coarse(&self, other: &Self) -> Self {
        if P::MODULUS_IS_BIG {
            return self.subtract(other);
        }
        let (r0, b) = sbb(self.data[0], other.data[0], 0);
        let (r1, b) = sbb(self.data[1], other.data[1], b);
        let (r2, b) = sbb(self.data[2], other.data[2], b);
        let (r3, b) = sbb(self.data[3], other.data[3], b);
        let borrow = b;

        let out0 = r0.wrapping_add(Self::TWICE_MODULUS[0] & borrow);
        let carry = (out0 < (Self::TWICE_MODULUS[0] & borrow)) as u64;
        let (out1, carry) = addc(r1, Self::TWICE_MODULUS[1] & borrow, carry);
        let (out2, carry) = addc(r2, Self::TWICE_MODULUS[2] & borrow, carry);
        let out3 = r3
            .wrapping_add(Self::TWICE_MODULUS[3] & borrow)
            .wrapping_add(carry);

        Self::from_raw([out0, out1, out2, out3])
    }

    /// One round of the interleaved multiply-reduce: folds `limb * other`
    /// into the running result (t0..t3) and performs one Montgomery
    /// reduction step.
    #[inline(always)]
    fn mul_round(limb: u64, other: &Self, t: [u64; 4]) -> [u64; 4] {
        let m = Self::MODULUS;
        let (s0, a1) = mac_mini(t[0], limb, other.data[0]);
        let k = s0.wrapping_mul(P::R_INV);
        let c = mac_discard_lo(s0, k, m[0]);
        let (s1, a2) = mac(t[1], limb, other.data[1], a1);
        let (t0, c) = mac(s1, k, m[1], c);
        let (s2, a3) = mac(t[2], limb, other.data[2], a2);
        let (t1, c) = mac(s2, k, m[2], c);
        let (s3, a4) = mac(t[3], limb, other.data[3], a3);
        let (t2, c) = mac(s3, k, m[3], c);
        let t3 = c.wrapping_add(a4);
        [t0, t1, t2, t3]
    }

    /// Montgomery multiplication for a small modulus (< 2^254): four
    /// interleaved multiply-reduce rounds, result coarse.
    #[inline]
    fn montgomery_mul_small(&self, other: &Self) -> Self {
        let m = Self::MODULUS;

        // Round 0 starts from zero, so the accumulate helpers skip a term.
        let (t0, c) = mul_wide(self.data[0], other.data[0]);
        let k = t0.wrapping_mul(P::R_INV);
        let a1 = mac_discard_lo(t0, k, m[0]);
        let (s1, a2) = mac_mini(a1, self.data[0], other.data[1]);
        let (t0, c) = mac(s1, k, m[1], c);
        let (s2, a3) = mac_mini(a2, self.data[0], other.data[2]);
        let (t1, c) = mac(s2, k, m[2], c);
        let (s3, a4) = mac_mini(a3, self.data[0], other.data[3]);
        let (t2, c) = mac(s3, k, m[3], c);
        let t3 = c.wrapping_add(a4);

        let t = Self::mul_round(self.data[1], other, [t0, t1, t2, t3]);
        let t = Self::mul_round(self.data[2], other, t);
        let t = Self::mul_round(self.data[3], other, t);
        Self::from_raw(t)
    }

    /// Montgomery multiplication for a big modulus (>= 2^254): textbook CIOS
    /// with a fifth carry word and a fully reduced result.
    #[inline]
    fn montgomery_mul_big(&self, other: &Self) -> Self {
        let m = Self::MODULUS;
        let r_inv = P::R_INV;

        let mut t = [0u64; 5];
        let mut t5;
        for &limb in &self.data {
            let (v, mut c) = mac_mini(t[0], limb, other.data[0]);
            t[0] = v;
            let (v, co) = mac(t[1], limb, other.data[1], c);
            t[1] = v;
            c = co;
            let (v, co) = mac(t[2], limb, other.data[2], c);
            t[2] = v;
            c = co;
            let (v, co) = mac(t[3], limb, other.data[3], c);
            t[3] = v;
            c = co;
            let (v, ts) = addc(t[4], c, 0);
            t[4] = v;
            t5 = ts;

            let k = t[0].wrapping_mul(r_inv);
            let mut c = mac_discard_lo(t[0], k, m[0]);
            let (v, co) = mac(t[1], k, m[1], c);
            t[0] = v;
            c = co;
            let (v, co) = mac(t[2], k, m[2], c);
            t[1] = v;
            c = co;
            let (v, co) = mac(t[3], k, m[3], c);
            t[2] = v;
            c = co;
            let (v, co2) = addc(c, t[4], 0);
            t[3] = v;
            t[4] = t5 + co2;
        }

        // Conditional final subtraction.
        let (r0, b) = sbb(t[0], m[0], 0);
        let (r1, b) = sbb(t[1], m[1], b);
        let (r2, b) = sbb(t[2], m[2], b);
        let (r3, b) = sbb(t[3], m[3], b);
        let borrow = b ^ 0u64.wrapping_sub(t[4]);

        let out0 = r0.wrapping_add(m[0] & borrow);
        let carry = (out0 < (m[0] & borrow)) as u64;
        let (out1, carry) = addc(r1, m[1] & borrow, carry);
        let (out2, carry) = addc(r2, m[2] & borrow, carry);
        let out3 = r3.wrapping_add((m[3] & borrow).wrapping_add(carry));
        Self::from_raw([out0, out1, out2, out3])
    }

    /// Montgomery multiplication, dispatching on the modulus size.
    #[inline]
    pub fn montgomery_mul(&self, other: &Self) -> Self {
        if P::MODULUS_IS_BIG {
            self.montgomery_mul_big(other)
        } else {
            self.montgomery_mul_small(other)
        }
    }

    /// Montgomery squaring.
    #[inline]
    pub fn sqr(&self) -> Self {
        self.montgomery_mul(self)
    }

    /// Convert into Montgomery form: self * R^2 * R^{-1} = self * R mod p.
    #[inline]
    pub fn to_montgomery_form(&self) -> Self {
        let r_squared = Self::from_raw(P::R_SQUARED);
        // Bring arbitrary limb content below 2p before multiplying.
        let tmp = self.reduce().reduce().reduce();
        tmp.montgomery_mul(&r_squared).reduce()
    }

    /// Convert out of Montgomery form: self * 1 * R^{-1} = a mod p.
    #[inline]
    pub fn from_montgomery_form(&self) -> Self {
        let one_raw = Self::from_raw([1, 0, 0, 0]);
        self.montgomery_mul(&one_raw).reduce()
    }

    /// -self mod p.
    #[inline]
    pub fn negate(&self) -> Self {
        if P::MODULUS_IS_BIG {
            Self::from_raw(Self::MODULUS).subtract(self)
        } else {
            Self::from_raw(Self::TWICE_MODULUS)
                .subtract_coarse(self)
                .reduce()
        }
    }

    /// True for either coarse representation of zero (0 or p).
    #[inline]
    pub fn is_zero(&self) -> bool {
        ((self.data[0] | self.data[1] | self.data[2] | self.data[3]) == 0)
            || (self.data == P::MODULUS)
    }

    /// Equality after full reduction.
    #[inline]
    pub fn eq_field(&self, other: &Self) -> bool {
        self.reduce().data == other.reduce().data
    }

    /// Exponentiation by square-and-multiply over little-endian limbs.
    pub fn pow(&self, exp: &[u64; 4]) -> Self {
        if exp.iter().all(|&l| l == 0) {
            return Self::one();
        }
        if self.is_zero() {
            return Self::zero();
        }
        let mut msb = 0u32;
        for i in (0..4).rev() {
            if exp[i] != 0 {
                msb = (i as u32) * 64 + (63 - exp[i].leading_zeros());
                break;
            }
        }

        let mut accumulator = *self;
        for i in (0..msb).rev() {
            accumulator = accumulator.sqr();
            if (exp[(i / 64) as usize] >> (i % 64)) & 1 == 1 {
                accumulator = accumulator.montgomery_mul(self);
            }
        }
        accumulator
    }

    /// Modular inverse via Fermat: self^(p-2).
    pub fn invert(&self) -> Self {
        debug_assert!(!self.is_zero(), "cannot invert zero");
        self.pow(&Self::MODULUS_MINUS_TWO)
    }

    /// Root of unity of order 2^log2_size, derived from the maximal 2-adic
    /// generator by repeated squaring.
    pub fn get_root_of_unity(log2_size: u32) -> Self {
        debug_assert!(log2_size <= P::TWO_ADICITY);
        let mut root = Self::from_raw(P::PRIMITIVE_ROOT);
        for _ in log2_size..P::TWO_ADICITY {
            root = root.sqr();
        }
        root
    }
}

// ---------------------------------------------------------------------------
// Canonical-form access
// ---------------------------------------------------------------------------

impl<P: FieldParams> Field<P> {
    /// Little-endian limbs of the canonical (non-Montgomery) integer value.
    #[inline]
    pub fn to_regular(&self) -> [u64; 4] {
        self.from_montgomery_form().data
    }

    /// Bit `idx` of the canonical integer value.
    pub fn get_bit(&self, idx: usize) -> bool {
        if idx >= 256 {
            return false;
        }
        let regular = self.to_regular();
        (regular[idx / 64] >> (idx % 64)) & 1 == 1
    }

    /// 32 big-endian bytes of the canonical integer value.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let r = self.from_montgomery_form();
        let mut bytes = [0u8; 32];
        for i in 0..4 {
            bytes[8 * i..8 * (i + 1)].copy_from_slice(&r.data[3 - i].to_be_bytes());
        }
        bytes
    }

    /// Parse 32 big-endian bytes, reducing mod p, into Montgomery form.
    pub fn from_be_bytes(bytes: &[u8; 32]) -> Self {
        let mut limbs = [0u64; 4];
        for i in 0..4 {
            let mut word = [0u8; 8];
            word.copy_from_slice(&bytes[8 * i..8 * (i + 1)]);
            limbs[3 - i] = u64::from_be_bytes(word);
        }
        Self::from_limbs(limbs)
    }
}

// ---------------------------------------------------------------------------
// Random sampling
// ---------------------------------------------------------------------------

impl<P: FieldParams> Field<P> {
    /// Uniformly random element: 512 random bits reduced mod p, so the bias
    /// is negligible.
    pub fn random_element() -> Self {
        use rand::Rng;
        let mut rng = rand::rng();
        let lo: [u64; 4] = std::array::from_fn(|_| rng.random::<u64>());
        let hi: [u64; 4] = std::array::from_fn(|_| rng.random::<u64>());
        Self::from_u512(lo, hi)
    }

    /// Reduce a 512-bit value (hi || lo) modulo p.
    pub fn from_u512(lo: [u64; 4], hi: [u64; 4]) -> Self {
        use crypto_bigint::{NonZero, U256, U512};

        let val = U512::from((U256::from_words(lo), U256::from_words(hi)));
        let modulus = U512::from((U256::from_words(P::MODULUS), U256::ZERO));
        let nz_mod = NonZero::new(modulus).expect("modulus is nonzero");
        let (_, remainder) = val.div_rem(&nz_mod);

        let words: [u64; 8] = remainder.to_words();
        Self::from_limbs([words[0], words[1], words[2], words[3]])
    }
}

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

impl<P: FieldParams> Add for Field<P> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Field::add(&self, &rhs)
    }
}

impl<P: FieldParams> AddAssign for Field<P> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = Field::add(self, &rhs);
    }
}

impl<P: FieldParams> Sub for Field<P> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Field::subtract_coarse(&self, &rhs)
    }
}

impl<P: FieldParams> SubAssign for Field<P> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = Field::subtract_coarse(self, &rhs);
    }
}

impl<P: FieldParams> Mul for Field<P> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Field::montgomery_mul(&self, &rhs)
    }
}

impl<P: FieldParams> MulAssign for Field<P> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = Field::montgomery_mul(self, &rhs);
    }
}

impl<P: FieldParams> Neg for Field<P> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Field::negate(&self)
    }
}

impl<P: FieldParams> PartialEq for Field<P> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.eq_field(other)
    }
}

impl<P: FieldParams> Eq for Field<P> {}

impl<P: FieldParams> Default for Field<P> {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
