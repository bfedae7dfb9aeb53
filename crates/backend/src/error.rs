use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("input {0:?} is not set")]
    InputNotSet(String),

    #[error("input {0:?} visibility does not match its declaration")]
    InputVisibility(String),

    #[error("unsatisfied constraint #{index}: {a} * {b} != {c}")]
    UnsatisfiedConstraint {
        index: usize,
        a: String,
        b: String,
        c: String,
    },

    #[error("duplicate wire tag {0:?}")]
    DuplicateTag(String),

    #[error("domain of size {size} exceeds the field's 2-adic subgroup")]
    DomainSizeTooLarge { size: usize },
}
