//! Diff result types and structures

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::config::DiffMode;
use crate::error::DiffError;

/// What happened to a segment's content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Present in both texts
    Unchanged,
    /// Present only in the modified text
    Added,
    /// Present only in the original text
    Removed,
}

/// A contiguous run of unchanged, added or removed content
///
/// The kind is carried as two flags so that consumers rendering the
/// `{ value, added, removed }` shape keep working; both false means unchanged.
///
/// Serialized segments also carry a `mode` key, which lets a change list sent
/// back for counting be checked for mixed granularities. Consumers may omit
/// it; a segment without `mode` deserializes as a line segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSegment {
    /// The content, including the separators between its units
    pub value: String,

    /// Present only in the modified text
    pub added: bool,

    /// Present only in the original text
    pub removed: bool,

    /// Granularity that produced this segment
    #[serde(default)]
    pub mode: DiffMode,
}

impl ChangeSegment {
    pub fn new(kind: SegmentKind, value: impl Into<String>, mode: DiffMode) -> Self {
        Self {
            value: value.into(),
            added: kind == SegmentKind::Added,
            removed: kind == SegmentKind::Removed,
            mode,
        }
    }

    pub fn unchanged(value: impl Into<String>, mode: DiffMode) -> Self {
        Self::new(SegmentKind::Unchanged, value, mode)
    }

    pub fn added(value: impl Into<String>, mode: DiffMode) -> Self {
        Self::new(SegmentKind::Added, value, mode)
    }

    pub fn removed(value: impl Into<String>, mode: DiffMode) -> Self {
        Self::new(SegmentKind::Removed, value, mode)
    }

    /// The segment's kind, or `None` when both flags are set
    pub fn kind(&self) -> Option<SegmentKind> {
        match (self.added, self.removed) {
            (false, false) => Some(SegmentKind::Unchanged),
            (true, false) => Some(SegmentKind::Added),
            (false, true) => Some(SegmentKind::Removed),
            (true, true) => None,
        }
    }

    pub fn is_change(&self) -> bool {
        self.added || self.removed
    }

    /// Number of lines or words in this segment
    pub fn unit_count(&self) -> usize {
        self.mode.count_units(&self.value)
    }

    /// Get a human-readable description of this segment
    pub fn description(&self) -> String {
        match self.kind() {
            Some(SegmentKind::Added) => format!("Added: {:?}", self.value),
            Some(SegmentKind::Removed) => format!("Removed: {:?}", self.value),
            Some(SegmentKind::Unchanged) => format!("Unchanged: {:?}", self.value),
            None => format!("Invalid: {:?}", self.value),
        }
    }
}

/// Unit counts derived from a change list
///
/// `total_changes` is always computed from `additions` and `deletions`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStatistics {
    /// Units present only in the modified text
    pub additions: usize,

    /// Units present only in the original text
    pub deletions: usize,

    /// Units present in both texts
    pub unchanged: usize,
}

impl DiffStatistics {
    /// Tally a change list, checking each segment against `mode`
    ///
    /// # Errors
    ///
    /// * `DiffError::ConflictingFlags` if a segment is both added and removed
    /// * `DiffError::ModeMismatch` if a segment was produced in another mode
    pub fn from_segments(segments: &[ChangeSegment], mode: DiffMode) -> Result<Self, DiffError> {
        let mut tally = Tally::default();

        for (index, segment) in segments.iter().enumerate() {
            if segment.mode != mode {
                return Err(DiffError::ModeMismatch {
                    index,
                    expected: mode,
                    found: segment.mode,
                });
            }

            let kind = segment
                .kind()
                .ok_or(DiffError::ConflictingFlags { index })?;
            tally.record(kind, segment.unit_count());
        }

        Ok(tally.finish())
    }

    /// Added plus deleted units
    pub fn total_changes(&self) -> usize {
        self.additions + self.deletions
    }

    /// Share of counted units that changed (0.0 to 1.0)
    pub fn change_ratio(&self) -> f64 {
        let total = self.total_changes() + self.unchanged;
        if total > 0 {
            self.total_changes() as f64 / total as f64
        } else {
            0.0
        }
    }
}

/// Running unit counts over a change list
///
/// Separator-only changes (a blank line added, `" "` turned into `"\n"`)
/// hold no units. They are counted, one per segment, only when no unit
/// changed at all, so the tally is zero exactly when the texts are equal. A
/// change list without unit changes has identical unit sequences on both
/// sides, which keeps the counts symmetric under swapping the texts.
#[derive(Debug, Default)]
pub(crate) struct Tally {
    statistics: DiffStatistics,
    separator_additions: usize,
    separator_deletions: usize,
}

impl Tally {
    pub(crate) fn record(&mut self, kind: SegmentKind, units: usize) {
        let statistics = &mut self.statistics;
        match (kind, units) {
            (SegmentKind::Unchanged, _) => statistics.unchanged += units,
            (SegmentKind::Added, 0) => self.separator_additions += 1,
            (SegmentKind::Removed, 0) => self.separator_deletions += 1,
            (SegmentKind::Added, _) => statistics.additions += units,
            (SegmentKind::Removed, _) => statistics.deletions += units,
        }
    }

    pub(crate) fn finish(self) -> DiffStatistics {
        let mut statistics = self.statistics;
        if statistics.total_changes() == 0 {
            statistics.additions = self.separator_additions;
            statistics.deletions = self.separator_deletions;
        }
        statistics
    }
}

impl Serialize for DiffStatistics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DiffStatistics", 4)?;
        state.serialize_field("additions", &self.additions)?;
        state.serialize_field("deletions", &self.deletions)?;
        state.serialize_field("unchanged", &self.unchanged)?;
        state.serialize_field("totalChanges", &self.total_changes())?;
        state.end()
    }
}

/// Complete diff result
#[derive(Debug, Clone, Serialize)]
pub struct DiffResult {
    /// Granularity used
    pub mode: DiffMode,

    /// Normalized original text
    pub original: String,

    /// Normalized modified text
    pub modified: String,

    /// Ordered change list
    pub segments: Vec<ChangeSegment>,

    /// Counts over `segments`
    pub statistics: DiffStatistics,
}

impl DiffResult {
    /// Check if the diff is empty (no changes)
    pub fn is_identical(&self) -> bool {
        self.segments.iter().all(|segment| !segment.is_change())
    }

    /// Get only the changed segments (exclude unchanged)
    pub fn changed_segments(&self) -> Vec<&ChangeSegment> {
        self.segments
            .iter()
            .filter(|segment| segment.is_change())
            .collect()
    }

    /// Rebuild the normalized original text from the segments
    pub fn original_text(&self) -> String {
        self.segments
            .iter()
            .filter(|segment| !segment.added)
            .map(|segment| segment.value.as_str())
            .collect()
    }

    /// Rebuild the normalized modified text from the segments
    pub fn modified_text(&self) -> String {
        self.segments
            .iter()
            .filter(|segment| !segment.removed)
            .map(|segment| segment.value.as_str())
            .collect()
    }

    /// Get a summary of the diff
    pub fn summary(&self) -> String {
        let unit = match self.mode {
            DiffMode::Line => "lines",
            DiffMode::Word => "words",
        };

        format!(
            "Diff Summary ({}): {} added, {} removed, {} unchanged. Change: {:.1}%",
            unit,
            self.statistics.additions,
            self.statistics.deletions,
            self.statistics.unchanged,
            self.statistics.change_ratio() * 100.0
        )
    }
}

impl fmt::Display for DiffResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Diff Result ===")?;
        writeln!(f, "{}", self.summary())?;
        writeln!(f, "\nSegments:")?;

        for (i, segment) in self.segments.iter().enumerate() {
            let marker = match segment.kind() {
                Some(SegmentKind::Added) => '+',
                Some(SegmentKind::Removed) => '-',
                _ => ' ',
            };
            writeln!(f, "  {}. {} {:?}", i + 1, marker, segment.value)?;
        }

        Ok(())
    }
}
