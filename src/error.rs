//! Unified engine error type.
//!
//! Fatal conditions only: malformed input, contract violations, and
//! storage failures. Infeasibility (an occurrence that cannot be
//! placed) and unfilled substitutions are data — conflict flags on
//! individual assignments — never errors.

use thiserror::Error;

use crate::conflict::ConflictError;
use crate::validation::ValidationError;

/// Result alias used by all fallible engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed or contradictory input, detected before allocation.
    /// Carries every violated invariant, not just the first.
    #[error("input validation failed: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    /// A reservation was committed against an occupied cell. Indicates
    /// a caller bug, not bad data.
    #[error(transparent)]
    Conflict(#[from] ConflictError),

    /// Substitution was requested before any timetable was generated.
    #[error("no timetable has been generated yet")]
    NoTimetable,

    /// Failure at the storage boundary.
    #[error("repository error: {0}")]
    Repository(String),
}

fn join_messages(errors: &[ValidationError]) -> String {
    let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
    messages.join("; ")
}
