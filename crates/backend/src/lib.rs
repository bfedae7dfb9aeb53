//! Constraint-system backend: R1CS representation, witness solving, binary
//! persistence, and the FFT evaluation domain shared by the proving side.
//!
//! The central entry point is [`r1cs::R1CS::solve`], which instantiates the
//! declared inputs from an [`assignment::Assignments`] map, walks the
//! ordered constraints resolving one wire per computational constraint, and
//! verifies `a * b = c` for every constraint.

pub mod assignment;
pub mod domain;
pub mod error;
pub mod fft;
pub mod r1cs;
pub mod serialize;
mod solver;

pub use assignment::{Assignment, Assignments, Visibility, ONE_WIRE};
pub use error::Error;
pub use r1cs::{LinearExpression, SolverKind, Term, R1C, R1CS};
