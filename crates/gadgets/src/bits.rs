//! Binary decomposition of a circuit variable.

use plexus_ecc::fields::field::Field;
use plexus_ecc::fields::field_params::FieldParams;

use crate::api::{Api, Hint, HintError, Variable};
use crate::error::Error;

/// Hint: decompose the single input into the little-endian bits of its
/// canonical value, one output per bit.
fn decompose_hint<P: FieldParams>(
    inputs: &[Field<P>],
    outputs: &mut [Field<P>],
) -> Result<(), HintError> {
    let limbs = inputs[0].to_regular();
    for (j, out) in outputs.iter_mut().enumerate() {
        *out = Field::from((limbs[j / 64] >> (j % 64)) & 1);
    }
    Ok(())
}

/// Decompose `v` into `nb_bits` little-endian boolean variables and
/// constrain their weighted sum to equal `v`. Unsatisfiable when the value
/// of `v` does not fit in `nb_bits` bits.
pub fn to_binary<P: FieldParams, A: Api<P>>(
    api: &mut A,
    v: Variable,
    nb_bits: usize,
) -> Result<Vec<Variable>, Error> {
    let bits = api.new_hint(decompose_hint::<P> as Hint<P>, nb_bits, &[v])?;

    let mut acc = api.constant(Field::zero());
    let mut weight = Field::<P>::one();
    let two = Field::from(2u64);
    for &bit in &bits {
        api.assert_is_boolean(bit);
        let coeff = api.constant(weight);
        let weighted = api.mul(bit, coeff);
        acc = api.add(acc, weighted);
        weight *= two;
    }
    api.assert_is_equal(acc, v);

    Ok(bits)
}
