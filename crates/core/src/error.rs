//! Error taxonomy surfaced through the view state.

use std::fmt;

/// Which operation a [`ErrorKind::MutationFailed`] was attempting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOp {
    Create,
    Update,
    Delete,
}

impl fmt::Display for MutationOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationOp::Create => write!(f, "create"),
            MutationOp::Update => write!(f, "update"),
            MutationOp::Delete => write!(f, "delete"),
        }
    }
}

/// Everything that can go wrong between the dashboard and the collection
/// resource, as shown to presentation.
///
/// Fetch failures (`Network`, `Decode`) are kept distinct from mutation
/// failures so the edit surface can stay open for correction while a
/// background poll error is rendered elsewhere. None of these are fatal;
/// the worst outcome is a visibly stale or error-annotated view.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    /// Transport-level failure: the resource was unreachable or answered
    /// with a non-success status.
    #[error("network error: {0}")]
    Network(String),

    /// The resource answered, but the payload did not match the expected
    /// shape.
    #[error("malformed response: {0}")]
    Decode(String),

    /// A client-side required-field check failed before submission. No
    /// network call was made.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The server rejected (or transport failed during) a
    /// create/update/delete.
    #[error("{op} failed: {detail}")]
    MutationFailed { op: MutationOp, detail: String },
}
