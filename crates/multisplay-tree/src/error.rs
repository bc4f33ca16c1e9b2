use thiserror::Error;

/// Errors reported by [`MultisplayMap`](crate::MultisplayMap).
///
/// Missing keys are not errors; lookups report them as `None`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MultisplayError {
    /// The operation is reserved but has no implementation yet.
    #[error("NOT_IMPLEMENTED: {0}")]
    NotImplemented(&'static str),
    /// A structural invariant of the forest does not hold.
    #[error("INVALID_TREE: {0}")]
    InvalidTree(String),
}
