//! Diff algorithms implementation
//!
//! Provides the algorithm seam for computing the difference between token
//! sequences.
pub mod myers;

pub use myers::MyersAlgorithm;

use crate::tokenizers::Token;

/// One step of an edit script, referring to token positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditOp {
    /// The token is kept: `original[original] == modified[modified]`
    Equal { original: usize, modified: usize },
    /// The token exists only in the original sequence
    Delete { original: usize },
    /// The token exists only in the modified sequence
    Insert { modified: usize },
}

impl EditOp {
    pub fn is_equal(&self) -> bool {
        matches!(self, EditOp::Equal { .. })
    }
}

/// Trait for diff algorithms
pub trait DiffAlgorithm: Send + Sync {
    /// Compute a minimal edit script turning `original` into `modified`
    ///
    /// Tokens are compared by text. Every original index appears exactly once
    /// as `Equal` or `Delete`, every modified index exactly once as `Equal` or
    /// `Insert`, both in ascending order.
    fn compute(&self, original: &[Token<'_>], modified: &[Token<'_>]) -> Vec<EditOp>;

    /// Get the name of this algorithm
    fn name(&self) -> &str;
}

/// Number of inserted plus deleted tokens in an edit script
pub fn edit_distance(ops: &[EditOp]) -> usize {
    ops.iter().filter(|op| !op.is_equal()).count()
}
