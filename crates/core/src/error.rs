//! Errors raised when a caller breaks the comparison contract

use crate::config::DiffMode;

/// Caller contract violations.
///
/// Normalizing, aligning and the identity check never fail; these errors only
/// surface when a mode string or a change list handed in from outside the
/// engine is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiffError {
    /// A mode string was neither `line` nor `word`
    #[error("invalid diff mode `{0}`: expected `line` or `word`")]
    InvalidMode(String),

    /// A change segment claims to be both added and removed
    #[error("change segment {index} is marked both added and removed")]
    ConflictingFlags { index: usize },

    /// A change list mixes segments produced at different granularities
    #[error("change segment {index} was produced in {found} mode, expected {expected} mode")]
    ModeMismatch {
        index: usize,
        expected: DiffMode,
        found: DiffMode,
    },
}
