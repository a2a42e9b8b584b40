//! Analysis errors.

use sable_traverse::TraverseError;
use thiserror::Error;

/// Failure of one [`analyze`](crate::analyze) call.
///
/// Unresolved reads and implicit-global writes are ordinary output values,
/// never errors; errors are reserved for contract violations and internal
/// defects. The computation is pure, so a failed call can simply be
/// re-invoked with corrected input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzeError {
    /// The traversal engine met a node type it cannot discover children
    /// for under the configured edge table.
    #[error(transparent)]
    Traverse(#[from] TraverseError),

    /// An internal invariant of the builder was violated. This indicates a
    /// defect in the analyzer itself, not in the input.
    #[error("internal invariant violated: {0}")]
    Internal(&'static str),
}
