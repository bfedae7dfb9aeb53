//! Rank-1 constraint systems: terms, linear expressions, constraints, and
//! the wire-layout bookkeeping around them.

use std::collections::BTreeMap;

use plexus_ecc::fields::field::Field;
use plexus_ecc::fields::field_params::FieldParams;

use crate::error::Error;

/// How a computational constraint derives its unknown wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverKind {
    /// Exactly one wire across L, R, O is unknown; isolate it.
    SingleOutput,
    /// O names a known wire; bind the L wires to its little-endian bits.
    BinaryDec,
}

/// One summand of a linear expression: `coeff * wire[wire_id]`.
pub struct Term<P: FieldParams> {
    pub wire_id: u64,
    pub coeff: Field<P>,
}

impl<P: FieldParams> std::fmt::Debug for Term<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Term")
            .field("wire_id", &self.wire_id)
            .field("coeff", &self.coeff)
            .finish()
    }
}

impl<P: FieldParams> Clone for Term<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: FieldParams> Copy for Term<P> {}

impl<P: FieldParams> PartialEq for Term<P> {
    fn eq(&self, other: &Self) -> bool {
        self.wire_id == other.wire_id && self.coeff == other.coeff
    }
}

impl<P: FieldParams> Eq for Term<P> {}

impl<P: FieldParams> Term<P> {
    pub fn new(wire_id: u64, coeff: Field<P>) -> Self {
        Self { wire_id, coeff }
    }
}

/// An ordered sum of terms.
pub type LinearExpression<P> = Vec<Term<P>>;

/// One constraint `eval(L) * eval(R) = eval(O)`.
pub struct R1C<P: FieldParams> {
    pub l: LinearExpression<P>,
    pub r: LinearExpression<P>,
    pub o: LinearExpression<P>,
    pub solver: SolverKind,
}

impl<P: FieldParams> std::fmt::Debug for R1C<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("R1C")
            .field("l", &self.l)
            .field("r", &self.r)
            .field("o", &self.o)
            .field("solver", &self.solver)
            .finish()
    }
}

impl<P: FieldParams> Clone for R1C<P> {
    fn clone(&self) -> Self {
        Self {
            l: self.l.clone(),
            r: self.r.clone(),
            o: self.o.clone(),
            solver: self.solver,
        }
    }
}

impl<P: FieldParams> PartialEq for R1C<P> {
    fn eq(&self, other: &Self) -> bool {
        self.l == other.l && self.r == other.r && self.o == other.o && self.solver == other.solver
    }
}

impl<P: FieldParams> Eq for R1C<P> {}

impl<P: FieldParams> R1C<P> {
    /// Evaluate the three linear expressions over fully populated wire
    /// values. An out-of-range wire id is a programming fault.
    pub fn instantiate(
        &self,
        wire_values: &[Field<P>],
    ) -> (Field<P>, Field<P>, Field<P>) {
        let eval = |terms: &LinearExpression<P>| {
            let mut acc = Field::zero();
            for t in terms {
                debug_assert!(
                    (t.wire_id as usize) < wire_values.len(),
                    "wire id {} out of range ({} wires)",
                    t.wire_id,
                    wire_values.len()
                );
                acc += t.coeff * wire_values[t.wire_id as usize];
            }
            acc
        };
        (eval(&self.l), eval(&self.r), eval(&self.o))
    }
}

/// A compiled rank-1 constraint system.
///
/// Wire indices are partitioned deterministically:
/// `[0, nb_internal)` computed wires, then the private inputs in
/// `private_wires` order, then the public inputs in `public_wires` order.
/// The first `nb_co_constraints` entries of `constraints` are
/// computational: walked in order, each contains exactly one wire not yet
/// instantiated. The remainder are assertions over determined wires.
pub struct R1CS<P: FieldParams> {
    pub nb_wires: usize,
    pub nb_public_wires: usize,
    pub nb_private_wires: usize,
    pub private_wires: Vec<String>,
    pub public_wires: Vec<String>,
    /// Optional per-wire tags, surfaced by [`R1CS::inspect`].
    pub wire_tags: BTreeMap<u64, Vec<String>>,
    pub nb_constraints: usize,
    pub nb_co_constraints: usize,
    pub constraints: Vec<R1C<P>>,
}

impl<P: FieldParams> std::fmt::Debug for R1CS<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("R1CS")
            .field("nb_wires", &self.nb_wires)
            .field("nb_public_wires", &self.nb_public_wires)
            .field("nb_private_wires", &self.nb_private_wires)
            .field("private_wires", &self.private_wires)
            .field("public_wires", &self.public_wires)
            .field("wire_tags", &self.wire_tags)
            .field("nb_constraints", &self.nb_constraints)
            .field("nb_co_constraints", &self.nb_co_constraints)
            .field("constraints", &self.constraints)
            .finish()
    }
}

impl<P: FieldParams> Clone for R1CS<P> {
    fn clone(&self) -> Self {
        Self {
            nb_wires: self.nb_wires,
            nb_public_wires: self.nb_public_wires,
            nb_private_wires: self.nb_private_wires,
            private_wires: self.private_wires.clone(),
            public_wires: self.public_wires.clone(),
            wire_tags: self.wire_tags.clone(),
            nb_constraints: self.nb_constraints,
            nb_co_constraints: self.nb_co_constraints,
            constraints: self.constraints.clone(),
        }
    }
}

impl<P: FieldParams> PartialEq for R1CS<P> {
    fn eq(&self, other: &Self) -> bool {
        self.nb_wires == other.nb_wires
            && self.nb_public_wires == other.nb_public_wires
            && self.nb_private_wires == other.nb_private_wires
            && self.private_wires == other.private_wires
            && self.public_wires == other.public_wires
            && self.wire_tags == other.wire_tags
            && self.nb_constraints == other.nb_constraints
            && self.nb_co_constraints == other.nb_co_constraints
            && self.constraints == other.constraints
    }
}

impl<P: FieldParams> Eq for R1CS<P> {}

impl<P: FieldParams> R1CS<P> {
    /// Number of internal (computed) wires.
    pub fn nb_internal_wires(&self) -> usize {
        self.nb_wires - self.nb_public_wires - self.nb_private_wires
    }

    /// Resolve wire tags against solved wire values.
    pub fn inspect(
        &self,
        wire_values: &[Field<P>],
    ) -> Result<BTreeMap<String, Field<P>>, Error> {
        let mut resolved = BTreeMap::new();
        for (&wire_id, tags) in &self.wire_tags {
            for tag in tags {
                if resolved.contains_key(tag) {
                    return Err(Error::DuplicateTag(tag.clone()));
                }
                resolved.insert(tag.clone(), wire_values[wire_id as usize]);
            }
        }
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plexus_ecc::curves::bn254::Fr;

    type TestR1C = R1C<plexus_ecc::curves::bn254::Bn254FrParams>;

    #[test]
    fn test_instantiate_sums_terms() {
        // L = 2*w0 + 3*w1, R = w2, O = 10*w0
        let r1c = TestR1C {
            l: vec![
                Term::new(0, Fr::from(2u64)),
                Term::new(1, Fr::from(3u64)),
            ],
            r: vec![Term::new(2, Fr::one())],
            o: vec![Term::new(0, Fr::from(10u64))],
            solver: SolverKind::SingleOutput,
        };
        let wires = [Fr::from(5u64), Fr::from(7u64), Fr::from(11u64)];
        let (a, b, c) = r1c.instantiate(&wires);
        assert_eq!(a, Fr::from(31u64));
        assert_eq!(b, Fr::from(11u64));
        assert_eq!(c, Fr::from(50u64));
    }

    #[test]
    fn test_inspect_duplicate_tag() {
        let mut wire_tags = BTreeMap::new();
        wire_tags.insert(0u64, vec!["out".to_string()]);
        wire_tags.insert(1u64, vec!["out".to_string()]);
        let r1cs: R1CS<plexus_ecc::curves::bn254::Bn254FrParams> = R1CS {
            nb_wires: 2,
            nb_public_wires: 0,
            nb_private_wires: 0,
            private_wires: vec![],
            public_wires: vec![],
            wire_tags,
            nb_constraints: 0,
            nb_co_constraints: 0,
            constraints: vec![],
        };
        let wires = [Fr::one(), Fr::from(2u64)];
        assert_eq!(
            r1cs.inspect(&wires).unwrap_err(),
            Error::DuplicateTag("out".to_string())
        );
    }

    #[test]
    fn test_inspect_resolves_tags() {
        let mut wire_tags = BTreeMap::new();
        wire_tags.insert(1u64, vec!["x".to_string(), "alias".to_string()]);
        let r1cs: R1CS<plexus_ecc::curves::bn254::Bn254FrParams> = R1CS {
            nb_wires: 2,
            nb_public_wires: 0,
            nb_private_wires: 0,
            private_wires: vec![],
            public_wires: vec![],
            wire_tags,
            nb_constraints: 0,
            nb_co_constraints: 0,
            constraints: vec![],
        };
        let wires = [Fr::one(), Fr::from(9u64)];
        let resolved = r1cs.inspect(&wires).unwrap();
        assert_eq!(resolved["x"], Fr::from(9u64));
        assert_eq!(resolved["alias"], Fr::from(9u64));
    }
}
