//! Witness solving: instantiate inputs, derive one wire per computational
//! constraint, verify every constraint.

use plexus_ecc::fields::field::Field;
use plexus_ecc::fields::field_params::FieldParams;
use tracing::{debug, instrument};

use crate::assignment::{Assignments, Visibility, ONE_WIRE};
use crate::error::Error;
use crate::r1cs::{LinearExpression, SolverKind, R1C, R1CS};

impl<P: FieldParams> R1CS<P> {
    /// Solve the system: populate `wire_values` and the per-constraint
    /// `(a, b, c)` vectors, verifying `a[i] * b[i] = c[i]` as it goes.
    ///
    /// The caller allocates all four buffers: `a`, `b`, `c` of length
    /// `nb_constraints` and `wire_values` of length `nb_wires`. Entries are
    /// produced in Montgomery form. On failure no partial result is
    /// meaningful.
    #[instrument(skip_all, fields(constraints = self.nb_constraints, wires = self.nb_wires))]
    pub fn solve(
        &self,
        assignments: &Assignments<P>,
        a: &mut [Field<P>],
        b: &mut [Field<P>],
        c: &mut [Field<P>],
        wire_values: &mut [Field<P>],
    ) -> Result<(), Error> {
        debug_assert_eq!(a.len(), self.nb_constraints);
        debug_assert_eq!(b.len(), self.nb_constraints);
        debug_assert_eq!(c.len(), self.nb_constraints);
        debug_assert_eq!(wire_values.len(), self.nb_wires);
        debug_assert_eq!(self.private_wires.len(), self.nb_private_wires);
        debug_assert_eq!(self.public_wires.len(), self.nb_public_wires);

        let mut wire_instantiated = vec![false; self.nb_wires];

        if self.nb_private_wires != 0 {
            let offset = self.nb_wires - self.nb_public_wires - self.nb_private_wires;
            instantiate_inputs(
                assignments,
                offset,
                Visibility::Secret,
                &self.private_wires,
                wire_values,
                &mut wire_instantiated,
            )?;
        }
        {
            let offset = self.nb_wires - self.nb_public_wires;
            instantiate_inputs(
                assignments,
                offset,
                Visibility::Public,
                &self.public_wires,
                wire_values,
                &mut wire_instantiated,
            )?;
        }

        for (i, r1c) in self.constraints.iter().enumerate() {
            if i < self.nb_co_constraints {
                // The ordering guarantees exactly one uncomputed wire here.
                r1c.solve_wire(&mut wire_instantiated, wire_values);
            }

            let (ai, bi, ci) = r1c.instantiate(wire_values);
            a[i] = ai;
            b[i] = bi;
            c[i] = ci;

            if !(ai * bi).eq_field(&ci) {
                return Err(Error::UnsatisfiedConstraint {
                    index: i,
                    a: ai.to_string(),
                    b: bi.to_string(),
                    c: ci.to_string(),
                });
            }
        }

        debug!("all constraints satisfied");
        Ok(())
    }
}

/// Copy the declared inputs of one visibility block into the wire array,
/// starting at `offset`. The constant-1 wire is recognized by name.
fn instantiate_inputs<P: FieldParams>(
    assignments: &Assignments<P>,
    offset: usize,
    visibility: Visibility,
    names: &[String],
    wire_values: &mut [Field<P>],
    wire_instantiated: &mut [bool],
) -> Result<(), Error> {
    for (i, name) in names.iter().enumerate() {
        if name == ONE_WIRE {
            wire_values[offset + i] = Field::one();
        } else {
            let assignment = assignments
                .get(name)
                .ok_or_else(|| Error::InputNotSet(name.clone()))?;
            let mismatch = match visibility {
                Visibility::Secret => assignment.is_public,
                Visibility::Public => !assignment.is_public,
            };
            if mismatch {
                return Err(Error::InputVisibility(name.clone()));
            }
            wire_values[offset + i] = assignment.value;
        }
        wire_instantiated[offset + i] = true;
    }
    Ok(())
}

impl<P: FieldParams> R1C<P> {
    /// Derive this constraint's unknown wire(s) and mark them instantiated.
    pub(crate) fn solve_wire(
        &self,
        wire_instantiated: &mut [bool],
        wire_values: &mut [Field<P>],
    ) {
        match self.solver {
            SolverKind::SingleOutput => self.solve_single_output(wire_instantiated, wire_values),
            SolverKind::BinaryDec => self.solve_binary_dec(wire_instantiated, wire_values),
        }
    }

    /// Isolate the single uninstantiated wire across L, R, O.
    ///
    /// With the instantiated partial sums A, B, C and the unknown's
    /// coefficient k, the unknown x resolves as:
    /// - in L: x = (C/B - A) * k, or 0 when B = 0
    /// - in R: x = (C/A - B) * k, or 0 when A = 0
    /// - in O: x = (A*B - C) * k
    ///
    /// The coefficient multiplies after the subtraction; the frontend
    /// stores coefficients of computed wires pre-inverted. The a*b = c
    /// check that follows in `solve` catches any miswiring.
    fn solve_single_output(
        &self,
        wire_instantiated: &mut [bool],
        wire_values: &mut [Field<P>],
    ) {
        // Per-side location of the unresolved wire, if any.
        let mut unknown: [Option<u64>; 3] = [None, None, None];
        let mut coeff = Field::zero();

        let accumulate = |terms: &LinearExpression<P>,
                              slot: &mut Option<u64>,
                              coeff: &mut Field<P>,
                              wire_values: &[Field<P>],
                              wire_instantiated: &[bool]| {
            let mut acc = Field::zero();
            for t in terms {
                if wire_instantiated[t.wire_id as usize] {
                    acc += t.coeff * wire_values[t.wire_id as usize];
                } else {
                    *coeff = t.coeff;
                    *slot = Some(t.wire_id);
                }
            }
            acc
        };

        let a = accumulate(&self.l, &mut unknown[0], &mut coeff, &*wire_values, &*wire_instantiated);
        let b = accumulate(&self.r, &mut unknown[1], &mut coeff, &*wire_values, &*wire_instantiated);
        let c = accumulate(&self.o, &mut unknown[2], &mut coeff, &*wire_values, &*wire_instantiated);

        if let Some(id) = unknown[0] {
            let id = id as usize;
            wire_values[id] = if b.is_zero() {
                Field::zero()
            } else {
                (c * b.invert() - a) * coeff
            };
            wire_instantiated[id] = true;
        } else if let Some(id) = unknown[1] {
            let id = id as usize;
            wire_values[id] = if a.is_zero() {
                Field::zero()
            } else {
                (c * a.invert() - b) * coeff
            };
            wire_instantiated[id] = true;
        } else if let Some(id) = unknown[2] {
            let id = id as usize;
            wire_values[id] = (a * b - c) * coeff;
            wire_instantiated[id] = true;
        }
    }

    /// Bind the L wires to the little-endian bits of the (already known)
    /// wire named by O's single term. Decomposition reads the canonical,
    /// non-Montgomery limbs.
    fn solve_binary_dec(
        &self,
        wire_instantiated: &mut [bool],
        wire_values: &mut [Field<P>],
    ) {
        debug_assert!(self.l.len() <= 256);
        let n = wire_values[self.o[0].wire_id as usize].to_regular();
        for (j, t) in self.l.iter().enumerate() {
            let id = t.wire_id as usize;
            if !wire_instantiated[id] {
                let bit = (n[j / 64] >> (j % 64)) & 1;
                wire_values[id] = Field::from(bit);
                wire_instantiated[id] = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::r1cs::Term;
    use plexus_ecc::curves::bn254::{Bn254FrParams, Fr};

    type TestR1CS = R1CS<Bn254FrParams>;

    /// Wires: [x (internal), w (private), one, y (public)].
    /// CO constraint pins x via 3*x = y; the assertion x*x = y then holds
    /// for the +3 branch the computational constraint selected.
    fn tiny_r1cs() -> TestR1CS {
        let co = R1C {
            l: vec![Term::new(2, Fr::from(3u64))],
            r: vec![Term::new(0, Fr::one())],
            o: vec![Term::new(3, Fr::one())],
            solver: SolverKind::SingleOutput,
        };
        let assertion = R1C {
            l: vec![Term::new(0, Fr::one())],
            r: vec![Term::new(0, Fr::one())],
            o: vec![Term::new(3, Fr::one())],
            solver: SolverKind::SingleOutput,
        };
        R1CS {
            nb_wires: 4,
            nb_public_wires: 2,
            nb_private_wires: 1,
            private_wires: vec!["w".to_string()],
            public_wires: vec![ONE_WIRE.to_string(), "y".to_string()],
            wire_tags: BTreeMap::new(),
            nb_constraints: 2,
            nb_co_constraints: 1,
            constraints: vec![co, assertion],
        }
    }

    fn solve(
        r1cs: &TestR1CS,
        assignments: &Assignments<Bn254FrParams>,
    ) -> (Result<(), Error>, Vec<Fr>) {
        let mut a = vec![Fr::zero(); r1cs.nb_constraints];
        let mut b = vec![Fr::zero(); r1cs.nb_constraints];
        let mut c = vec![Fr::zero(); r1cs.nb_constraints];
        let mut wires = vec![Fr::zero(); r1cs.nb_wires];
        let res = r1cs.solve(assignments, &mut a, &mut b, &mut c, &mut wires);
        (res, wires)
    }

    #[test]
    fn test_tiny_r1cs_deterministic_branch() {
        let r1cs = tiny_r1cs();
        let mut assignments = Assignments::new();
        assignments.assign(Visibility::Public, "y", Fr::from(9u64));
        assignments.assign(Visibility::Secret, "w", Fr::from(5u64));

        assert_eq!(r1cs.nb_internal_wires(), 1);
        let (res, wires) = solve(&r1cs, &assignments);
        res.unwrap();
        // x = 3, not -3: the computational constraint picks the branch.
        assert_eq!(wires[0], Fr::from(3u64));
        assert_eq!(wires[2], Fr::one());
        assert_eq!(wires[3], Fr::from(9u64));
    }

    #[test]
    fn test_missing_input() {
        let r1cs = tiny_r1cs();
        let mut assignments = Assignments::new();
        assignments.assign(Visibility::Public, "y", Fr::from(9u64));

        let (res, _) = solve(&r1cs, &assignments);
        assert_eq!(res.unwrap_err(), Error::InputNotSet("w".to_string()));
    }

    #[test]
    fn test_visibility_mismatch() {
        let r1cs = tiny_r1cs();
        let mut assignments = Assignments::new();
        assignments.assign(Visibility::Public, "y", Fr::from(9u64));
        // Declared secret, assigned public.
        assignments.assign(Visibility::Public, "w", Fr::from(5u64));

        let (res, _) = solve(&r1cs, &assignments);
        assert_eq!(res.unwrap_err(), Error::InputVisibility("w".to_string()));
    }

    #[test]
    fn test_unsatisfied_assertion_reports_values() {
        // Single assertion constraint: w * w = y with w = 2, y = 9.
        let assertion = R1C {
            l: vec![Term::new(0, Fr::one())],
            r: vec![Term::new(0, Fr::one())],
            o: vec![Term::new(2, Fr::one())],
            solver: SolverKind::SingleOutput,
        };
        let r1cs: TestR1CS = R1CS {
            nb_wires: 3,
            nb_public_wires: 2,
            nb_private_wires: 1,
            private_wires: vec!["w".to_string()],
            public_wires: vec![ONE_WIRE.to_string(), "y".to_string()],
            wire_tags: BTreeMap::new(),
            nb_constraints: 1,
            nb_co_constraints: 0,
            constraints: vec![assertion],
        };
        let mut assignments = Assignments::new();
        assignments.assign(Visibility::Secret, "w", Fr::from(2u64));
        assignments.assign(Visibility::Public, "y", Fr::from(9u64));

        let (res, _) = solve(&r1cs, &assignments);
        match res.unwrap_err() {
            Error::UnsatisfiedConstraint { index, a, b, c } => {
                assert_eq!(index, 0);
                assert_eq!(a, Fr::from(2u64).to_string());
                assert_eq!(b, Fr::from(2u64).to_string());
                assert_eq!(c, Fr::from(9u64).to_string());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    /// Each computational constraint instantiates exactly one new wire.
    #[test]
    fn test_one_wire_per_computational_constraint() {
        // x0 = y (via R branch), x1 = x0 * x0 (via O branch).
        let c0 = R1C {
            l: vec![Term::new(2, Fr::one())],
            r: vec![Term::new(0, Fr::one())],
            o: vec![Term::new(3, Fr::one())],
            solver: SolverKind::SingleOutput,
        };
        let c1 = R1C {
            l: vec![Term::new(0, Fr::one())],
            r: vec![Term::new(0, Fr::one())],
            o: vec![Term::new(1, Fr::one())],
            solver: SolverKind::SingleOutput,
        };
        let r1cs: TestR1CS = R1CS {
            nb_wires: 4,
            nb_public_wires: 2,
            nb_private_wires: 0,
            private_wires: vec![],
            public_wires: vec![ONE_WIRE.to_string(), "y".to_string()],
            wire_tags: BTreeMap::new(),
            nb_constraints: 2,
            nb_co_constraints: 2,
            constraints: vec![c0, c1],
        };
        let mut assignments = Assignments::new();
        assignments.assign(Visibility::Public, "y", Fr::from(7u64));

        let (res, wires) = solve(&r1cs, &assignments);
        res.unwrap();
        assert_eq!(wires[0], Fr::from(7u64));
        assert_eq!(wires[1], Fr::from(49u64));
    }

    /// The L-branch zero guard: B = 0 forces the unknown to zero.
    #[test]
    fn test_single_output_zero_right_side() {
        // x * (0 * one) = 0 with x unknown in L.
        let co = R1C {
            l: vec![Term::new(0, Fr::one())],
            r: vec![Term::new(1, Fr::zero())],
            o: vec![],
            solver: SolverKind::SingleOutput,
        };
        let r1cs: TestR1CS = R1CS {
            nb_wires: 2,
            nb_public_wires: 1,
            nb_private_wires: 0,
            private_wires: vec![],
            public_wires: vec![ONE_WIRE.to_string()],
            wire_tags: BTreeMap::new(),
            nb_constraints: 1,
            nb_co_constraints: 1,
            constraints: vec![co],
        };
        let assignments = Assignments::new();
        let (res, wires) = solve(&r1cs, &assignments);
        res.unwrap();
        assert_eq!(wires[0], Fr::zero());
    }

    /// Binary decomposition binds the L wires to little-endian bits.
    #[test]
    fn test_binary_decomposition() {
        let value = 0b1101u64;
        let nb_bits = 5;
        // Wires: bits b0..b4 at 0..5, n at 5 (private), one at 6.
        let bindec = R1C {
            l: (0..nb_bits).map(|j| Term::new(j as u64, Fr::one())).collect(),
            r: vec![],
            o: vec![Term::new(nb_bits as u64, Fr::one())],
            solver: SolverKind::BinaryDec,
        };
        // Assertion: sum(b_j * 2^j) * one = n.
        let recompose = R1C {
            l: (0..nb_bits)
                .map(|j| Term::new(j as u64, Fr::from(1u64 << j)))
                .collect(),
            r: vec![Term::new(6, Fr::one())],
            o: vec![Term::new(5, Fr::one())],
            solver: SolverKind::SingleOutput,
        };
        let r1cs: TestR1CS = R1CS {
            nb_wires: 7,
            nb_public_wires: 1,
            nb_private_wires: 1,
            private_wires: vec!["n".to_string()],
            public_wires: vec![ONE_WIRE.to_string()],
            wire_tags: BTreeMap::new(),
            nb_constraints: 2,
            nb_co_constraints: 1,
            constraints: vec![bindec, recompose],
        };
        let mut assignments = Assignments::new();
        assignments.assign(Visibility::Secret, "n", Fr::from(value));

        let (res, wires) = solve(&r1cs, &assignments);
        res.unwrap();
        for j in 0..nb_bits {
            let expected = (value >> j) & 1;
            assert_eq!(wires[j], Fr::from(expected), "bit {j}");
        }
    }

    /// The coefficient multiplies after the subtraction: a CO constraint
    /// whose unknown carries coefficient k yields (C/B - A) * k, which
    /// satisfies the constraint only for pre-inverted k.
    #[test]
    fn test_coefficient_applied_after_subtraction() {
        // (2 * x) * one = y with y = 10: isolation yields x = 10 * 2 = 20
        // rather than 5, so the follow-up check 2 * 20 != 10 trips.
        let k = Fr::from(2u64);
        let co = R1C {
            l: vec![Term::new(0, k)],
            r: vec![Term::new(1, Fr::one())],
            o: vec![Term::new(2, Fr::one())],
            solver: SolverKind::SingleOutput,
        };
        let r1cs: TestR1CS = R1CS {
            nb_wires: 3,
            nb_public_wires: 2,
            nb_private_wires: 0,
            private_wires: vec![],
            public_wires: vec![ONE_WIRE.to_string(), "y".to_string()],
            wire_tags: BTreeMap::new(),
            nb_constraints: 1,
            nb_co_constraints: 1,
            constraints: vec![co],
        };
        let mut assignments = Assignments::new();
        assignments.assign(Visibility::Public, "y", Fr::from(10u64));

        let (res, wires) = solve(&r1cs, &assignments);
        // x = (10 / 1 - 0) * 2 = 20, then the check 2 * 20 * 1 != 10 trips.
        assert_eq!(wires[0], Fr::from(20u64));
        assert!(matches!(res, Err(Error::UnsatisfiedConstraint { .. })));
    }
}
