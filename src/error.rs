//! Errors that abort a clearing pass.
//!
//! Malformed orders are not errors: the market drops them at `post`. The only
//! failures are broken preconditions handed to the market by its caller.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClearError {
    #[error("permutation has {actual} indices, expected {expected}")]
    PermutationLength { expected: usize, actual: usize },

    #[error("permutation index {index} out of range for {len} orders")]
    PermutationIndexOutOfRange { index: usize, len: usize },

    #[error("permutation repeats index {index}")]
    PermutationDuplicate { index: usize },
}
