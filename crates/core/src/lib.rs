//! # Compare Core
//!
//! Text comparison for documents extracted from PDF or DOCX files. Both texts
//! are normalized to absorb extraction noise (line endings, whitespace runs,
//! blank lines), aligned line by line or word by word, and reported as an
//! ordered list of unchanged, added and removed segments with unit counts.
//!
//! ## Core Concepts
//!
//! - **Normalizers**: Canonicalize whitespace and line endings
//! - **Pipelines**: Chain normalizers into inspectable layers
//! - **Tokenizers**: Split normalized text into units and separators
//! - **DiffEngine**: Align units and coalesce the edit script into segments
//!
//! ## Example
//!
//! ```rust
//! use compare_core::{compare_texts, diff_stats, DiffMode};
//!
//! let changes = compare_texts("the quick brown fox", "the slow brown fox", DiffMode::Word);
//! let stats = diff_stats(&changes).unwrap();
//!
//! assert_eq!(stats.additions, 1);
//! assert_eq!(stats.deletions, 1);
//! assert_eq!(stats.unchanged, 3);
//! ```

pub mod algorithm;
pub mod config;
pub mod diff;
pub mod engine;
pub mod error;
pub mod normalizers;
pub mod pipeline;
pub mod tokenizers;

// Re-export main types
pub use config::{DiffConfig, DiffMode};
pub use diff::{ChangeSegment, DiffResult, DiffStatistics, SegmentKind};
pub use engine::DiffEngine;
pub use error::DiffError;
pub use pipeline::{LayerSet, TextPipeline};

/// Canonicalize extraction noise in `text`
///
/// Line endings become `\n`, runs of spaces and tabs become one space, lines
/// are trimmed, three or more newlines collapse to two and the result is
/// trimmed. Applying it twice changes nothing.
///
/// ```rust
/// assert_eq!(compare_core::normalize("foo\r\nbar  "), "foo\nbar");
/// ```
pub fn normalize(text: &str) -> String {
    TextPipeline::document().apply(text)
}

/// Align two texts and return the ordered change list
///
/// Concatenating the values of segments that are not `removed` gives
/// `normalize(new)`; those that are not `added` give `normalize(old)`.
pub fn compare_texts(old: &str, new: &str, mode: DiffMode) -> Vec<ChangeSegment> {
    DiffEngine::new(DiffConfig::new().with_mode(mode))
        .diff(old, new)
        .segments
}

/// Count added, deleted and unchanged units in a change list
///
/// The mode of the first segment is expected throughout; an empty list
/// yields all zeros.
///
/// # Errors
///
/// * `DiffError::ConflictingFlags` if a segment is both added and removed
/// * `DiffError::ModeMismatch` if segments were produced in different modes
pub fn diff_stats(changes: &[ChangeSegment]) -> Result<DiffStatistics, DiffError> {
    match changes.first() {
        Some(first) => DiffStatistics::from_segments(changes, first.mode),
        None => Ok(DiffStatistics::default()),
    }
}

/// Whether both texts are equal once normalized
pub fn are_identical(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

/// Main entry point for computing diffs between two strings
///
/// # Arguments
///
/// * `original` - The original text
/// * `modified` - The modified text
/// * `config` - Optional configuration (uses default if None)
///
/// # Returns
///
/// A complete `DiffResult` holding the normalized texts, segments and counts
///
/// # Example
///
/// ```rust
/// use compare_core::compute_diff;
///
/// let result = compute_diff("Hello World", "Hello Rust", None);
/// println!("{}", result.summary());
/// ```
pub fn compute_diff(original: &str, modified: &str, config: Option<DiffConfig>) -> DiffResult {
    let config = config.unwrap_or_default();
    let engine = DiffEngine::new(config);
    engine.diff(original, modified)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(normalize("foo\r\nbar"), "foo\nbar");
    }

    #[test]
    fn test_normalize_whitespace_runs() {
        assert_eq!(normalize("foo   bar"), "foo bar");
    }

    #[test]
    fn test_appended_line() {
        let changes = compare_texts("line1", "line1\nline2", DiffMode::Line);

        assert_eq!(
            changes,
            vec![
                ChangeSegment::unchanged("line1", DiffMode::Line),
                ChangeSegment::added("\nline2", DiffMode::Line),
            ]
        );

        let stats = diff_stats(&changes).unwrap();
        assert_eq!(stats.additions, 1);
        assert_eq!(stats.deletions, 0);
        assert_eq!(stats.unchanged, 1);
        assert_eq!(stats.total_changes(), 1);
    }

    #[test]
    fn test_replaced_word() {
        let changes = compare_texts("the quick brown fox", "the slow brown fox", DiffMode::Word);

        assert_eq!(
            changes,
            vec![
                ChangeSegment::unchanged("the ", DiffMode::Word),
                ChangeSegment::removed("quick", DiffMode::Word),
                ChangeSegment::added("slow", DiffMode::Word),
                ChangeSegment::unchanged(" brown fox", DiffMode::Word),
            ]
        );
    }

    #[test]
    fn test_are_identical_ignores_spacing() {
        assert!(are_identical("hello  world", "hello world"));
        assert!(!are_identical("hello world", "hello there"));
    }

    #[test]
    fn test_identical_lines_stats() {
        let changes = compare_texts("a\nb\nc", "a\nb\nc", DiffMode::Line);
        let stats = diff_stats(&changes).unwrap();

        assert_eq!(
            stats,
            DiffStatistics {
                additions: 0,
                deletions: 0,
                unchanged: 3
            }
        );
        assert_eq!(stats.total_changes(), 0);
    }

    #[test]
    fn test_diff_stats_empty() {
        assert_eq!(diff_stats(&[]).unwrap(), DiffStatistics::default());
    }

    #[test]
    fn test_compute_diff_with_config() {
        let config = DiffConfig::words().with_ignore_case(true);
        let result = compute_diff("Hello World", "HELLO WORLD", Some(config));

        assert!(result.is_identical());
        assert_eq!(result.statistics.unchanged, 2);
    }
}
