use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("not a permutation: source and destination sets must both cover [0, {len})")]
    InvalidPermutation { len: usize },
}
