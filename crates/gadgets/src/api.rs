//! The frontend seam: the operations a circuit builder must expose for the
//! gadgets in this crate to drive it.

use thiserror::Error;

use plexus_ecc::fields::field::Field;
use plexus_ecc::fields::field_params::FieldParams;

/// Opaque handle to a circuit variable, minted by an [`Api`] implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variable(u32);

impl Variable {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HintError {
    #[error("hint produced {got} outputs, expected {expected}")]
    OutputCount { expected: usize, got: usize },
    #[error("{0}")]
    Message(String),
}

/// An out-of-circuit computation: reads the input values, fills the output
/// slots. The frontend turns the outputs into witness variables; gadgets
/// must justify them with constraints.
pub type Hint<P> = fn(&[Field<P>], &mut [Field<P>]) -> Result<(), HintError>;

/// Constraint-building operations offered by the frontend.
pub trait Api<P: FieldParams> {
    /// A variable fixed to `value`.
    fn constant(&mut self, value: Field<P>) -> Variable;

    fn add(&mut self, a: Variable, b: Variable) -> Variable;

    fn sub(&mut self, a: Variable, b: Variable) -> Variable;

    fn mul(&mut self, a: Variable, b: Variable) -> Variable;

    /// Register `hint` to produce `n_outputs` witness values from the
    /// values of `inputs`.
    fn new_hint(
        &mut self,
        hint: Hint<P>,
        n_outputs: usize,
        inputs: &[Variable],
    ) -> Result<Vec<Variable>, HintError>;

    /// Constrain `a = b`.
    fn assert_is_equal(&mut self, a: Variable, b: Variable);

    /// Constrain `a * (a - 1) = 0`.
    fn assert_is_boolean(&mut self, a: Variable);
}
