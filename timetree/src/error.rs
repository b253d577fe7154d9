//! Error types.

use thiserror::Error;

use crate::tree::RecordId;

/// Maximum nesting followed while computing subtree end times.
pub const MAX_DEPTH: usize = 100;

/// Malformed input found while building the tree.
///
/// Records are validated once per build, so every variant names the
/// offending index in the input array.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TreeError {
    /// Parent references form a loop, or nest deeper than [`MAX_DEPTH`].
    #[error("cycle detected in parent references at record {index} (depth > {MAX_DEPTH})")]
    CycleDetected { index: usize },

    #[error("record {index} has parent {parent}, but only {len} records exist")]
    ParentOutOfRange {
        index: usize,
        parent: usize,
        len: usize,
    },

    #[error("record {index} is its own parent")]
    SelfParent { index: usize },

    #[error("record {index} has a non-finite {field}")]
    NonFiniteTime { index: usize, field: &'static str },

    #[error("record {index} ends ({end}) before it starts ({start})")]
    EndBeforeStart { index: usize, start: f64, end: f64 },

    #[error("records {first} and {second} share id {id}")]
    DuplicateId {
        id: RecordId,
        first: usize,
        second: usize,
    },
}

/// A transform attribute that is not a `translate(x, y)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed transform '{0}'")]
pub struct TransformError(pub String);
