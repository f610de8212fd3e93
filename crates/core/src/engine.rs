//! Main diff engine that orchestrates the entire diff process

use tracing::debug;

use crate::algorithm::{edit_distance, DiffAlgorithm, EditOp, MyersAlgorithm};
use crate::config::{DiffConfig, DiffMode};
use crate::diff::{ChangeSegment, DiffResult, DiffStatistics, SegmentKind, Tally};
use crate::pipeline::{LayerSet, TextPipeline};
use crate::tokenizers::{Token, Tokenizer};

/// The main diff engine
pub struct DiffEngine {
    mode: DiffMode,
    pipeline: TextPipeline,
    tokenizer: Box<dyn Tokenizer>,
    algorithm: Box<dyn DiffAlgorithm>,
}

impl DiffEngine {
    /// Create a new diff engine with the given configuration
    pub fn new(config: DiffConfig) -> Self {
        Self {
            mode: config.mode,
            pipeline: config.build_pipeline(),
            tokenizer: config.mode.tokenizer(),
            algorithm: Box::new(MyersAlgorithm::new()),
        }
    }

    /// Create a diff engine with the default configuration
    pub fn default_config() -> Self {
        Self::new(DiffConfig::default())
    }

    pub fn mode(&self) -> DiffMode {
        self.mode
    }

    /// Normalize text with this engine's pipeline
    pub fn normalize(&self, text: &str) -> String {
        self.pipeline.apply(text)
    }

    /// Normalize text, keeping every intermediate layer
    pub fn normalize_layers(&self, text: &str) -> LayerSet {
        self.pipeline.process(text)
    }

    /// Whether both texts are equal once normalized
    pub fn are_identical(&self, a: &str, b: &str) -> bool {
        self.normalize(a) == self.normalize(b)
    }

    /// Compute the diff between two strings
    ///
    /// 1. Normalize both texts through the pipeline
    /// 2. Return a single unchanged segment if they are now equal
    /// 3. Tokenize into lines or words
    /// 4. Run the diff algorithm
    /// 5. Coalesce the edit script into segments and count units
    pub fn diff(&self, original: &str, modified: &str) -> DiffResult {
        let original = self.normalize(original);
        let modified = self.normalize(modified);

        if original == modified {
            debug!(mode = %self.mode, len = original.len(), "texts identical after normalization");

            let mut builder = SegmentBuilder::new(self.mode);
            builder.push(SegmentKind::Unchanged, &original);
            let (segments, statistics) = builder.finish();

            return DiffResult {
                mode: self.mode,
                original,
                modified,
                segments,
                statistics,
            };
        }

        let (segments, statistics) = self.align(&original, &modified);

        debug!(
            mode = %self.mode,
            algorithm = self.algorithm.name(),
            segments = segments.len(),
            additions = statistics.additions,
            deletions = statistics.deletions,
            "computed diff"
        );

        DiffResult {
            mode: self.mode,
            original,
            modified,
            segments,
            statistics,
        }
    }
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::default_config()
    }
}

// ============================================================================
// Alignment
// ============================================================================

impl DiffEngine {
    /// Align two normalized texts and coalesce the result into segments.
    ///
    /// Only units (lines or words) go through the diff algorithm. Separators
    /// are settled afterwards, gap by gap, between consecutive retained
    /// units, so a shared newline or space never splits a block of changes.
    fn align(&self, original: &str, modified: &str) -> (Vec<ChangeSegment>, DiffStatistics) {
        let original_tokens = self.tokenizer.tokenize(original);
        let modified_tokens = self.tokenizer.tokenize(modified);
        let original_units: Vec<Token<'_>> = original_tokens.iter().copied().filter(Token::is_unit).collect();
        let modified_units: Vec<Token<'_>> = modified_tokens.iter().copied().filter(Token::is_unit).collect();

        let ops = self.algorithm.compute(&original_units, &modified_units);
        debug!(
            original_units = original_units.len(),
            modified_units = modified_units.len(),
            edit_distance = edit_distance(&ops),
            "aligned units"
        );

        let mut builder = SegmentBuilder::new(self.mode);
        let (mut next_original, mut next_modified) = (0, 0);

        for op in &ops {
            if let EditOp::Equal { original: i, modified: j } = *op {
                let anchor_original = original_units[i].index;
                let anchor_modified = modified_units[j].index;

                builder.push_gap(
                    &original_tokens[next_original..anchor_original],
                    &modified_tokens[next_modified..anchor_modified],
                );
                builder.push(SegmentKind::Unchanged, original_tokens[anchor_original].text);

                next_original = anchor_original + 1;
                next_modified = anchor_modified + 1;
            }
        }

        builder.push_gap(&original_tokens[next_original..], &modified_tokens[next_modified..]);
        builder.finish()
    }
}

struct SegmentBuilder {
    mode: DiffMode,
    unchanged: String,
    removed: String,
    added: String,
    segments: Vec<ChangeSegment>,
    tally: Tally,
}

impl SegmentBuilder {
    fn new(mode: DiffMode) -> Self {
        Self {
            mode,
            unchanged: String::new(),
            removed: String::new(),
            added: String::new(),
            segments: Vec::new(),
            tally: Tally::default(),
        }
    }

    fn push(&mut self, kind: SegmentKind, text: &str) {
        match kind {
            SegmentKind::Unchanged => {
                self.flush_changes();
                self.unchanged.push_str(text);
            }
            SegmentKind::Removed => {
                self.flush_unchanged();
                self.removed.push_str(text);
            }
            SegmentKind::Added => {
                self.flush_unchanged();
                self.added.push_str(text);
            }
        }
    }

    /// Push the tokens lying between two retained units. A separator that
    /// opens or closes the gap identically on both sides stays unchanged.
    fn push_gap(&mut self, mut original: &[Token<'_>], mut modified: &[Token<'_>]) {
        if let (Some(a), Some(b)) = (original.first(), modified.first()) {
            if !a.is_unit() && a.text == b.text {
                self.push(SegmentKind::Unchanged, a.text);
                original = &original[1..];
                modified = &modified[1..];
            }
        }

        let mut closing = None;
        if let (Some(a), Some(b)) = (original.last(), modified.last()) {
            if !a.is_unit() && a.text == b.text {
                closing = Some(a.text);
                original = &original[..original.len() - 1];
                modified = &modified[..modified.len() - 1];
            }
        }

        for token in original {
            self.push(SegmentKind::Removed, token.text);
        }
        for token in modified {
            self.push(SegmentKind::Added, token.text);
        }
        if let Some(text) = closing {
            self.push(SegmentKind::Unchanged, text);
        }
    }

    fn flush_unchanged(&mut self) {
        let value = std::mem::take(&mut self.unchanged);
        self.emit(SegmentKind::Unchanged, value);
    }

    fn flush_changes(&mut self) {
        let removed = std::mem::take(&mut self.removed);
        self.emit(SegmentKind::Removed, removed);
        let added = std::mem::take(&mut self.added);
        self.emit(SegmentKind::Added, added);
    }

    fn emit(&mut self, kind: SegmentKind, value: String) {
        if value.is_empty() {
            return;
        }
        self.tally.record(kind, self.mode.count_units(&value));
        self.segments.push(ChangeSegment::new(kind, value, self.mode));
    }

    fn finish(mut self) -> (Vec<ChangeSegment>, DiffStatistics) {
        self.flush_unchanged();
        self.flush_changes();
        (self.segments, self.tally.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(result: &DiffResult) -> Vec<(SegmentKind, &str)> {
        result
            .segments
            .iter()
            .map(|s| (s.kind().unwrap(), s.value.as_str()))
            .collect()
    }

    #[test]
    fn test_basic_diff() {
        let engine = DiffEngine::new(DiffConfig::words());
        let result = engine.diff("hello world", "hello rust");

        assert!(!result.is_identical());
        assert_eq!(
            values(&result),
            vec![
                (SegmentKind::Unchanged, "hello "),
                (SegmentKind::Removed, "world"),
                (SegmentKind::Added, "rust"),
            ]
        );
        assert_eq!(result.statistics.additions, 1);
        assert_eq!(result.statistics.deletions, 1);
        assert_eq!(result.statistics.unchanged, 1);
    }

    #[test]
    fn test_identical_text() {
        let engine = DiffEngine::default();
        let result = engine.diff("a\nb\nc", "a\r\nb\r\nc  ");

        assert!(result.is_identical());
        assert_eq!(values(&result), vec![(SegmentKind::Unchanged, "a\nb\nc")]);
        assert_eq!(result.statistics.unchanged, 3);
        assert_eq!(result.statistics.total_changes(), 0);
    }

    #[test]
    fn test_both_empty() {
        let result = DiffEngine::default().diff("", "  \n\n ");

        assert!(result.segments.is_empty());
        assert_eq!(result.statistics, DiffStatistics::default());
    }

    #[test]
    fn test_appended_line() {
        let result = DiffEngine::new(DiffConfig::lines()).diff("line1", "line1\nline2");

        assert_eq!(
            values(&result),
            vec![
                (SegmentKind::Unchanged, "line1"),
                (SegmentKind::Added, "\nline2"),
            ]
        );
        assert_eq!(result.statistics.additions, 1);
        assert_eq!(result.statistics.unchanged, 1);
    }

    #[test]
    fn test_removals_precede_additions() {
        let result = DiffEngine::new(DiffConfig::lines()).diff("a\nb\nc\nd", "a\nx\ny\nd");

        assert_eq!(
            values(&result),
            vec![
                (SegmentKind::Unchanged, "a\n"),
                (SegmentKind::Removed, "b\nc"),
                (SegmentKind::Added, "x\ny"),
                (SegmentKind::Unchanged, "\nd"),
            ]
        );
        assert_eq!(result.statistics.deletions, 2);
        assert_eq!(result.statistics.additions, 2);
    }

    #[test]
    fn test_no_adjacent_segments_share_kind() {
        let result = DiffEngine::new(DiffConfig::words())
            .diff("a b c d e f g", "a x c y e z g q");

        for pair in result.segments.windows(2) {
            assert_ne!(pair[0].kind(), pair[1].kind());
        }
    }

    #[test]
    fn test_reconstruction() {
        let engine = DiffEngine::new(DiffConfig::words());
        let result = engine.diff("The Tenant shall pay  rent monthly.", "The Tenant  may pay rent\r\nquarterly.");

        assert_eq!(result.original_text(), result.original);
        assert_eq!(result.modified_text(), result.modified);
    }

    #[test]
    fn test_ignore_case() {
        let engine = DiffEngine::new(DiffConfig::words().with_ignore_case(true));

        assert!(engine.are_identical("HELLO WORLD", "hello world"));
        assert!(engine.diff("HELLO WORLD", "hello world").is_identical());
        assert!(!DiffEngine::new(DiffConfig::words()).are_identical("HELLO", "hello"));
    }

    #[test]
    fn test_unicode_folding() {
        let engine = DiffEngine::new(DiffConfig::words().with_unicode_folding(true));

        assert!(engine.are_identical("the de\u{FB01}ned term", "the defined\u{00A0}\u{00A0}term"));
        assert!(!DiffEngine::default().are_identical("de\u{FB01}ned", "defined"));
    }

    #[test]
    fn test_normalize_layers() {
        let layers = DiffEngine::default().normalize_layers("a  b");

        assert_eq!(layers.original(), "a  b");
        assert_eq!(layers.final_layer(), "a b");
    }

    #[test]
    fn test_engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DiffEngine>();
    }
}
