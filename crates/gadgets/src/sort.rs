//! Sorting through a routing network.
//!
//! The sorted order is computed out-of-circuit; only the switch settings of
//! an AS-Waksman network enter the witness. Whatever boolean values the
//! switches take, the network output is some permutation of the input, so
//! the construction reveals nothing beyond the permutation property, and
//! downstream order assertions carry the soundness.

use plexus_ecc::fields::field::Field;
use plexus_ecc::fields::field_params::FieldParams;
use tracing::debug;

use plexus_router::{
    apply_network, build_switches, schedule_widths, sorted_with_permutation, switch_count,
    SwitchState,
};

use crate::api::{Api, Hint, HintError, Variable};
use crate::error::Error;

/// Big-endian limb key for ordering field elements by canonical value.
fn canonical_key<P: FieldParams>(v: &Field<P>) -> [u64; 4] {
    let mut limbs = v.to_regular();
    limbs.reverse();
    limbs
}

/// Hint: sort the inputs, build the switch schedule realizing the sorting
/// permutation, and emit the switch states flattened layer by layer
/// (1 = swap).
fn routing_hint<P: FieldParams>(
    inputs: &[Field<P>],
    outputs: &mut [Field<P>],
) -> Result<(), HintError> {
    let keys: Vec<[u64; 4]> = inputs.iter().map(canonical_key).collect();
    let permutation = sorted_with_permutation(&keys);
    let layers =
        build_switches(&permutation).map_err(|e| HintError::Message(e.to_string()))?;

    let mut slot = 0;
    for layer in &layers {
        for &state in layer {
            outputs[slot] = match state {
                SwitchState::Swap => Field::one(),
                SwitchState::Straight => Field::zero(),
            };
            slot += 1;
        }
    }
    if slot != outputs.len() {
        return Err(HintError::OutputCount {
            expected: outputs.len(),
            got: slot,
        });
    }
    Ok(())
}

/// Return variables carrying the inputs in ascending order of canonical
/// value, constrained to be a permutation of `inputs`.
pub fn sort<P: FieldParams, A: Api<P>>(
    api: &mut A,
    inputs: &[Variable],
) -> Result<Vec<Variable>, Error> {
    let n = inputs.len();
    if n <= 1 {
        return Ok(inputs.to_vec());
    }
    debug!(n, "building in-circuit sorting network");

    let states = api.new_hint(routing_hint::<P> as Hint<P>, switch_count(n), inputs)?;

    // Fold the flat state list back into the schedule shape, which is a
    // function of n alone.
    let widths = schedule_widths(n);
    let mut layers = Vec::with_capacity(widths.len());
    let mut offset = 0;
    for width in widths {
        layers.push(states[offset..offset + width].to_vec());
        offset += width;
    }
    debug_assert_eq!(offset, states.len());

    let outputs = apply_network(&layers, inputs, &mut |state, &top, &bottom| {
        conditional_swap(api, state, top, bottom)
    });
    Ok(outputs)
}

/// One 2x2 switch: `(top', bottom')` equals `(top, bottom)` when the state
/// is 0 and `(bottom, top)` when it is 1. The state is constrained boolean.
fn conditional_swap<P: FieldParams, A: Api<P>>(
    api: &mut A,
    state: Variable,
    top: Variable,
    bottom: Variable,
) -> (Variable, Variable) {
    api.assert_is_boolean(state);
    let down_diff = api.sub(bottom, top);
    let down_term = api.mul(state, down_diff);
    let new_top = api.add(top, down_term);
    let up_diff = api.sub(top, bottom);
    let up_term = api.mul(state, up_diff);
    let new_bottom = api.add(bottom, up_term);
    (new_top, new_bottom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::Recorder;
    use plexus_ecc::curves::bn254::{Bn254FrParams, Fr};

    fn sort_values(values: &[u64]) -> (Recorder<Bn254FrParams>, Vec<Variable>) {
        let mut api = Recorder::new();
        let inputs: Vec<Variable> = values
            .iter()
            .map(|&v| api.constant(Fr::from(v)))
            .collect();
        let sorted = sort(&mut api, &inputs).unwrap();
        (api, sorted)
    }

    #[test]
    fn test_sort_small() {
        let (api, sorted) = sort_values(&[3, 4, 1, 2, 0]);
        assert!(!api.failed(), "{}", api.err());
        let got: Vec<Fr> = sorted.iter().map(|&v| api.value(v)).collect();
        let want: Vec<Fr> = [0u64, 1, 2, 3, 4].iter().map(|&v| Fr::from(v)).collect();
        assert_eq!(got, want);
    }

    #[test]
    fn test_sort_with_duplicates() {
        let (api, sorted) = sort_values(&[5, 5, 2, 9, 2, 2]);
        assert!(!api.failed());
        let got: Vec<Fr> = sorted.iter().map(|&v| api.value(v)).collect();
        let want: Vec<Fr> = [2u64, 2, 2, 5, 5, 9].iter().map(|&v| Fr::from(v)).collect();
        assert_eq!(got, want);
    }

    #[test]
    fn test_sort_single_and_empty() {
        let (_, sorted) = sort_values(&[7]);
        assert_eq!(sorted.len(), 1);
        let (_, sorted) = sort_values(&[]);
        assert!(sorted.is_empty());
    }

    #[test]
    fn test_sort_random() {
        use rand::Rng;
        let mut rng = rand::rng();
        for n in [2usize, 9, 33, 100] {
            let values: Vec<u64> = (0..n).map(|_| rng.random_range(0..1000)).collect();
            let (api, sorted) = sort_values(&values);
            assert!(!api.failed());
            let mut expected = values.clone();
            expected.sort_unstable();
            let got: Vec<Fr> = sorted.iter().map(|&v| api.value(v)).collect();
            let want: Vec<Fr> = expected.iter().map(|&v| Fr::from(v)).collect();
            assert_eq!(got, want, "n = {n}");
        }
    }
}
