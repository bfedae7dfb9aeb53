/// Compile-time description of a prime field stored in Montgomery form.
///
/// All constants are 4 x u64 limbs in little-endian order. An element is
/// stored as `a * R mod p` where `R = 2^256`.
pub trait FieldParams: 'static + Send + Sync + Sized {
    /// The prime modulus p.
    const MODULUS: [u64; 4];

    /// R^2 mod p, used to convert into Montgomery form.
    const R_SQUARED: [u64; 4];

    /// -(p^{-1}) mod 2^64, the Montgomery reduction factor.
    const R_INV: u64;

    /// Generator of the maximal 2-adic subgroup, in Montgomery form.
    /// Zero when the field has no FFT-friendly subgroup.
    const PRIMITIVE_ROOT: [u64; 4];

    /// v such that 2^v divides p - 1 exactly; `PRIMITIVE_ROOT` has order 2^v.
    const TWO_ADICITY: u32;

    /// Whether the modulus >= 2^254. Selects the wide add/sub/mul paths; the
    /// coarse [0, 2p) representation needs p < 2^254.
    const MODULUS_IS_BIG: bool;
}
