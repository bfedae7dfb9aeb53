use crate::fields::field::Field;
use crate::fields::field_params::FieldParams;

// ---------------------------------------------------------------------------
// BN254 scalar field (Fr)
// ---------------------------------------------------------------------------

/// Parameters of the BN254 scalar field
/// r = 21888242871839275222246405745257275088548364400416034343698204186575808495617.
pub struct Bn254FrParams;

impl FieldParams for Bn254FrParams {
    const MODULUS: [u64; 4] = [
        0x43E1F593F0000001,
        0x2833E84879B97091,
        0xB85045B68181585D,
        0x30644E72E131A029,
    ];
    const R_SQUARED: [u64; 4] = [
        0x1BB8E645AE216DA7,
        0x53FE3AB1E35C59E3,
        0x8C49833D53BB8085,
        0x0216D0B17F4E44A5,
    ];
    const R_INV: u64 = 0xc2e1f593efffffff;
    /// Generator of the order-2^28 subgroup, in Montgomery form.
    const PRIMITIVE_ROOT: [u64; 4] = [
        0x636e735580d13d9c,
        0xa22bf3742445ffd6,
        0x56452ac01eb203d8,
        0x1860ef942963f9e7,
    ];
    const TWO_ADICITY: u32 = 28;
    const MODULUS_IS_BIG: bool = false; // 0x3064... < 0x4000...
}

pub type Fr = Field<Bn254FrParams>;
