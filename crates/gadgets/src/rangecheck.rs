//! Batched range checks via sorting.
//!
//! Checking k values against `[0, 2^n)` reduces to one sort: concatenate
//! the dummy ramp `0..2^n` with the collected values, sort, then assert the
//! sequence starts at zero, ends within n bits, and never steps by more
//! than one. The ramp guarantees every residue below the bound appears, so
//! the step condition pins all collected values inside the range.

use std::sync::Mutex;

use plexus_ecc::fields::field::Field;
use plexus_ecc::fields::field_params::FieldParams;
use tracing::{debug, warn};

use crate::api::{Api, Variable};
use crate::bits::to_binary;
use crate::error::Error;
use crate::sort::sort;

#[derive(Debug, Default)]
struct State {
    collected: Vec<Variable>,
    committed: bool,
}

/// Collects variables to range-check and commits them as one sorted batch.
/// Collection is thread-safe; `commit` is terminal.
#[derive(Debug)]
pub struct Checker {
    state: Mutex<State>,
    nb_bits: usize,
}

impl Checker {
    /// A checker for the range `[0, 2^nb_bits)`. The dummy ramp is
    /// materialized at commit time, so widths beyond 32 bits are rejected.
    pub fn new(nb_bits: usize) -> Result<Self, Error> {
        if nb_bits > 32 {
            return Err(Error::BitWidthTooLarge(nb_bits));
        }
        Ok(Self {
            state: Mutex::new(State::default()),
            nb_bits,
        })
    }

    /// Add variables to the batch. After commit this is a no-op: the
    /// committed circuit is terminal.
    pub fn check(&self, vars: &[Variable]) {
        let mut state = self.state.lock().unwrap();
        if state.committed {
            warn!(
                dropped = vars.len(),
                "range checker already committed; ignoring late variables"
            );
            return;
        }
        state.collected.extend_from_slice(vars);
    }

    /// Emit the range-check constraints for everything collected so far.
    /// Holds the collection lock for the whole commit; a second commit
    /// fails with [`Error::AlreadyCommitted`].
    pub fn commit<P: FieldParams, A: Api<P>>(&self, api: &mut A) -> Result<(), Error> {
        let mut state = self.state.lock().unwrap();
        if state.committed {
            return Err(Error::AlreadyCommitted);
        }
        let bound = 1usize << self.nb_bits;
        debug!(collected = state.collected.len(), bound, "committing range checks");

        // Dummy ramp covering every residue in range, so sorted neighbors
        // never differ by more than one.
        let mut to_sort = Vec::with_capacity(bound + state.collected.len());
        for i in 0..bound {
            to_sort.push(api.constant(Field::from(i as u64)));
        }
        to_sort.extend_from_slice(&state.collected);

        let sorted = sort(api, &to_sort)?;

        // Starts at zero.
        let zero = api.constant(Field::zero());
        api.assert_is_equal(sorted[0], zero);
        // Ends within nb_bits bits.
        to_binary(api, sorted[sorted.len() - 1], self.nb_bits)?;
        // Every step is 0 or 1.
        for i in 1..sorted.len() {
            let step = api.sub(sorted[i], sorted[i - 1]);
            api.assert_is_boolean(step);
        }

        state.committed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::Recorder;
    use plexus_ecc::curves::bn254::{Bn254FrParams, Fr};

    #[test]
    fn test_nb_bits_cap() {
        assert!(matches!(
            Checker::new(33).unwrap_err(),
            Error::BitWidthTooLarge(33)
        ));
        Checker::new(32).unwrap();
    }

    #[test]
    fn test_in_range_values_satisfy() {
        use rand::Rng;
        let mut rng = rand::rng();
        let nb_bits = 12;
        let mut api = Recorder::<Bn254FrParams>::new();
        let checker = Checker::new(nb_bits).unwrap();

        let vars: Vec<Variable> = (0..1000)
            .map(|_| api.constant(Fr::from(rng.random_range(0..1u64 << nb_bits))))
            .collect();
        checker.check(&vars);
        checker.commit(&mut api).unwrap();
        assert!(!api.failed(), "{}", api.err());
    }

    #[test]
    fn test_out_of_range_value_unsatisfiable() {
        let nb_bits = 12;
        let mut api = Recorder::<Bn254FrParams>::new();
        let checker = Checker::new(nb_bits).unwrap();

        let mut vars: Vec<Variable> = (0..50)
            .map(|i| api.constant(Fr::from(i as u64 % (1 << nb_bits))))
            .collect();
        vars.push(api.constant(Fr::from(1u64 << nb_bits)));
        checker.check(&vars);
        checker.commit(&mut api).unwrap();
        assert!(api.failed());
    }

    #[test]
    fn test_boundary_value_accepted() {
        let nb_bits = 4;
        let mut api = Recorder::<Bn254FrParams>::new();
        let checker = Checker::new(nb_bits).unwrap();
        let v = api.constant(Fr::from(15u64));
        checker.check(&[v]);
        checker.commit(&mut api).unwrap();
        assert!(!api.failed(), "{}", api.err());
    }

    #[test]
    fn test_double_commit_rejected() {
        let mut api = Recorder::<Bn254FrParams>::new();
        let checker = Checker::new(3).unwrap();
        let v = api.constant(Fr::from(5u64));
        checker.check(&[v]);
        checker.commit(&mut api).unwrap();
        assert!(matches!(
            checker.commit(&mut api).unwrap_err(),
            Error::AlreadyCommitted
        ));
    }

    /// Post-commit check calls do not alter the committed circuit.
    #[test]
    fn test_check_after_commit_is_noop() {
        let mut api = Recorder::<Bn254FrParams>::new();
        let checker = Checker::new(3).unwrap();
        let v = api.constant(Fr::from(5u64));
        checker.check(&[v]);
        checker.commit(&mut api).unwrap();

        let constraints_after_commit = api.nb_constraints();
        let late = api.constant(Fr::from(99u64));
        checker.check(&[late]);
        assert_eq!(api.nb_constraints(), constraints_after_commit);
        assert_eq!(checker.state.lock().unwrap().collected.len(), 1);
    }

    /// An empty batch still pins the ramp itself.
    #[test]
    fn test_commit_without_checks() {
        let mut api = Recorder::<Bn254FrParams>::new();
        let checker = Checker::new(2).unwrap();
        checker.commit(&mut api).unwrap();
        assert!(!api.failed(), "{}", api.err());
    }
}
