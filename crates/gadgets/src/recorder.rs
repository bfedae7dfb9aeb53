//! Test frontend: evaluates every operation eagerly over witness values and
//! records assertion failures instead of panicking, so tests can observe
//! whether the emitted constraints are satisfiable.

use std::collections::HashMap;

use plexus_ecc::fields::field::Field;
use plexus_ecc::fields::field_params::FieldParams;

use crate::api::{Api, Hint, HintError, Variable};

pub(crate) struct Recorder<P: FieldParams> {
    variables: Vec<Field<P>>,
    /// Constant values already materialized, keyed by Montgomery limbs.
    constant_cache: HashMap<[u64; 4], Variable>,
    nb_constraints: usize,
    failed: bool,
    err: String,
}

impl<P: FieldParams> Recorder<P> {
    pub fn new() -> Self {
        Self {
            variables: Vec::new(),
            constant_cache: HashMap::new(),
            nb_constraints: 0,
            failed: false,
            err: String::new(),
        }
    }

    pub fn value(&self, v: Variable) -> Field<P> {
        self.variables[v.index() as usize]
    }

    pub fn failed(&self) -> bool {
        self.failed
    }

    pub fn err(&self) -> &str {
        &self.err
    }

    pub fn nb_constraints(&self) -> usize {
        self.nb_constraints
    }

    fn add_variable(&mut self, value: Field<P>) -> Variable {
        self.variables.push(value);
        Variable::new(self.variables.len() as u32 - 1)
    }

    fn failure(&mut self, msg: String) {
        if !self.failed {
            self.failed = true;
            self.err = msg;
        }
    }
}

impl<P: FieldParams> Api<P> for Recorder<P> {
    fn constant(&mut self, value: Field<P>) -> Variable {
        let key = value.reduce().data;
        if let Some(&v) = self.constant_cache.get(&key) {
            return v;
        }
        let v = self.add_variable(value);
        self.constant_cache.insert(key, v);
        v
    }

    fn add(&mut self, a: Variable, b: Variable) -> Variable {
        self.nb_constraints += 1;
        let value = self.value(a) + self.value(b);
        self.add_variable(value)
    }

    fn sub(&mut self, a: Variable, b: Variable) -> Variable {
        self.nb_constraints += 1;
        let value = self.value(a) - self.value(b);
        self.add_variable(value)
    }

    fn mul(&mut self, a: Variable, b: Variable) -> Variable {
        self.nb_constraints += 1;
        let value = self.value(a) * self.value(b);
        self.add_variable(value)
    }

    fn new_hint(
        &mut self,
        hint: Hint<P>,
        n_outputs: usize,
        inputs: &[Variable],
    ) -> Result<Vec<Variable>, HintError> {
        let input_values: Vec<Field<P>> = inputs.iter().map(|&v| self.value(v)).collect();
        let mut output_values = vec![Field::zero(); n_outputs];
        hint(&input_values, &mut output_values)?;
        Ok(output_values
            .into_iter()
            .map(|value| self.add_variable(value))
            .collect())
    }

    fn assert_is_equal(&mut self, a: Variable, b: Variable) {
        self.nb_constraints += 1;
        if self.value(a) != self.value(b) {
            self.failure(format!(
                "assert_is_equal failed: {} != {}",
                self.variables[a.index() as usize],
                self.variables[b.index() as usize]
            ));
        }
    }

    fn assert_is_boolean(&mut self, a: Variable) {
        self.nb_constraints += 1;
        let value = self.value(a);
        if !(value * (value - Field::one())).is_zero() {
            self.failure(format!("assert_is_boolean failed: {value}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plexus_ecc::curves::bn254::{Bn254FrParams, Fr};

    #[test]
    fn test_constant_cache_dedupes() {
        let mut api = Recorder::<Bn254FrParams>::new();
        let a = api.constant(Fr::from(7u64));
        let b = api.constant(Fr::from(7u64));
        assert_eq!(a, b);
    }

    #[test]
    fn test_arithmetic() {
        let mut api = Recorder::<Bn254FrParams>::new();
        let a = api.constant(Fr::from(6u64));
        let b = api.constant(Fr::from(4u64));
        let sum = api.add(a, b);
        let diff = api.sub(a, b);
        let prod = api.mul(a, b);
        assert_eq!(api.value(sum), Fr::from(10u64));
        assert_eq!(api.value(diff), Fr::from(2u64));
        assert_eq!(api.value(prod), Fr::from(24u64));
    }

    #[test]
    fn test_failed_assertion_is_sticky() {
        let mut api = Recorder::<Bn254FrParams>::new();
        let a = api.constant(Fr::from(1u64));
        let b = api.constant(Fr::from(2u64));
        api.assert_is_equal(a, b);
        let first = api.err().to_string();
        api.assert_is_boolean(b);
        assert!(api.failed());
        assert_eq!(api.err(), first);
    }

    #[test]
    fn test_boolean_assertion() {
        let mut api = Recorder::<Bn254FrParams>::new();
        let zero = api.constant(Fr::zero());
        let one = api.constant(Fr::one());
        api.assert_is_boolean(zero);
        api.assert_is_boolean(one);
        assert!(!api.failed());
        let two = api.constant(Fr::from(2u64));
        api.assert_is_boolean(two);
        assert!(api.failed());
    }
}
