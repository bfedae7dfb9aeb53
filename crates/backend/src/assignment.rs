//! Input assignments: named public/secret values fed to the solver.

use std::collections::HashMap;

use plexus_ecc::fields::field::Field;
use plexus_ecc::fields::field_params::FieldParams;

/// Reserved input name for the constant-1 wire. By convention it occupies
/// the first slot of the public wire block.
pub const ONE_WIRE: &str = "ONE_WIRE";

/// Declared visibility of an input wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Secret,
}

/// One assigned input value.
#[derive(Debug)]
pub struct Assignment<P: FieldParams> {
    pub value: Field<P>,
    pub is_public: bool,
}

impl<P: FieldParams> Clone for Assignment<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: FieldParams> Copy for Assignment<P> {}

impl<P: FieldParams> PartialEq for Assignment<P> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.is_public == other.is_public
    }
}

impl<P: FieldParams> Eq for Assignment<P> {}

/// Name -> assignment map consumed once by a solve invocation.
#[derive(Debug, Clone, Default)]
pub struct Assignments<P: FieldParams>(HashMap<String, Assignment<P>>);

impl<P: FieldParams> Assignments<P> {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Assign a value to an input identified by name.
    ///
    /// # Panics
    /// Panics if `name` is already assigned; assigning the same input twice
    /// is a frontend bug.
    pub fn assign(&mut self, visibility: Visibility, name: &str, value: Field<P>) {
        if self.0.contains_key(name) {
            panic!("{name} already assigned");
        }
        self.0.insert(
            name.to_string(),
            Assignment {
                value,
                is_public: visibility == Visibility::Public,
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&Assignment<P>> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The public-only subset, e.g. for handing to a verifier.
    pub fn discard_secrets(&self) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(_, a)| a.is_public)
                .map(|(k, v)| (k.clone(), *v))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plexus_ecc::curves::bn254::Fr;

    #[test]
    fn test_assign_and_get() {
        let mut assignments = Assignments::new();
        assignments.assign(Visibility::Public, "x", Fr::from(3u64));
        assignments.assign(Visibility::Secret, "w", Fr::from(4u64));

        let x = assignments.get("x").unwrap();
        assert!(x.is_public);
        assert_eq!(x.value, Fr::from(3u64));
        assert!(!assignments.get("w").unwrap().is_public);
        assert!(assignments.get("missing").is_none());
    }

    #[test]
    #[should_panic(expected = "already assigned")]
    fn test_double_assign_panics() {
        let mut assignments = Assignments::new();
        assignments.assign(Visibility::Public, "x", Fr::from(1u64));
        assignments.assign(Visibility::Secret, "x", Fr::from(2u64));
    }

    #[test]
    fn test_discard_secrets() {
        let mut assignments = Assignments::new();
        assignments.assign(Visibility::Public, "x", Fr::from(1u64));
        assignments.assign(Visibility::Secret, "w", Fr::from(2u64));

        let public_only = assignments.discard_secrets();
        assert_eq!(public_only.len(), 1);
        assert!(public_only.get("x").is_some());
        assert!(public_only.get("w").is_none());
    }
}
