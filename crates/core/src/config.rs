//! Configuration for the diff engine

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DiffError;
use crate::normalizers::{Lowercase, UnicodeCompatibility};
use crate::pipeline::TextPipeline;
use crate::tokenizers::{LineTokenizer, Tokenizer, WordTokenizer};

/// Granularity at which texts are split before alignment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffMode {
    /// Compare line by line
    #[default]
    Line,
    /// Compare word by word
    Word,
}

impl DiffMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffMode::Line => "line",
            DiffMode::Word => "word",
        }
    }

    /// Tokenizer splitting text into this mode's units
    pub fn tokenizer(&self) -> Box<dyn Tokenizer> {
        match self {
            DiffMode::Line => Box::new(LineTokenizer),
            DiffMode::Word => Box::new(WordTokenizer),
        }
    }

    /// Number of units (lines or words) contained in `text`
    pub fn count_units(&self, text: &str) -> usize {
        match self {
            DiffMode::Line => LineTokenizer.count_units(text),
            DiffMode::Word => WordTokenizer.count_units(text),
        }
    }
}

impl fmt::Display for DiffMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiffMode {
    type Err = DiffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "line" => Ok(DiffMode::Line),
            "word" => Ok(DiffMode::Word),
            _ => Err(DiffError::InvalidMode(s.to_string())),
        }
    }
}

/// Configuration for diff computation
#[derive(Clone)]
pub struct DiffConfig {
    /// Unit of comparison
    pub mode: DiffMode,

    /// Text normalization pipeline (the document pipeline when unset)
    pub pipeline: Option<TextPipeline>,

    /// Ignore case when comparing
    pub ignore_case: bool,

    /// Fold Unicode compatibility characters (ligatures, no-break spaces)
    pub unicode_folding: bool,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self {
            mode: DiffMode::default(),
            pipeline: None,
            ignore_case: false,
            unicode_folding: false,
        }
    }

    /// Line-by-line comparison with the document pipeline
    pub fn lines() -> Self {
        Self::new().with_mode(DiffMode::Line)
    }

    /// Word-by-word comparison with the document pipeline
    pub fn words() -> Self {
        Self::new().with_mode(DiffMode::Word)
    }

    /// Set the comparison granularity
    pub fn with_mode(mut self, mode: DiffMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the text normalization pipeline
    pub fn with_pipeline(mut self, pipeline: TextPipeline) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    /// Set whether to ignore case
    pub fn with_ignore_case(mut self, ignore: bool) -> Self {
        self.ignore_case = ignore;
        self
    }

    /// Set whether to fold Unicode compatibility characters
    pub fn with_unicode_folding(mut self, fold: bool) -> Self {
        self.unicode_folding = fold;
        self
    }

    /// Build the effective pipeline: the configured (or document) pipeline
    /// preceded by the optional case and Unicode folding steps
    pub fn build_pipeline(&self) -> TextPipeline {
        let mut pipeline = self
            .pipeline
            .clone()
            .unwrap_or_else(TextPipeline::document);

        if self.ignore_case {
            pipeline = pipeline.prepend_normalizer(Box::new(Lowercase));
        }

        // Folding runs first so later steps see plain spaces instead of NBSP
        if self.unicode_folding {
            pipeline = pipeline.prepend_normalizer(Box::new(UnicodeCompatibility));
        }

        pipeline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DiffConfig::default();
        assert_eq!(config.mode, DiffMode::Line);
        assert!(config.pipeline.is_none());
        assert!(!config.ignore_case);
        assert!(!config.unicode_folding);
    }

    #[test]
    fn test_builder_pattern() {
        let config = DiffConfig::new()
            .with_mode(DiffMode::Word)
            .with_ignore_case(true)
            .with_unicode_folding(true);

        assert_eq!(config.mode, DiffMode::Word);
        assert!(config.ignore_case);
        assert!(config.unicode_folding);
        assert_eq!(DiffConfig::words().mode, DiffMode::Word);
        assert_eq!(DiffConfig::lines().mode, DiffMode::Line);
    }

    #[test]
    fn test_build_pipeline() {
        let names = DiffConfig::new()
            .with_ignore_case(true)
            .with_unicode_folding(true)
            .build_pipeline()
            .normalizer_names();

        assert_eq!(names[0], "unicode_compatibility");
        assert_eq!(names[1], "lowercase");
        assert_eq!(names.len(), 7);

        let custom = DiffConfig::new()
            .with_pipeline(TextPipeline::new())
            .build_pipeline();
        assert!(custom.normalizer_names().is_empty());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("line".parse::<DiffMode>(), Ok(DiffMode::Line));
        assert_eq!(" Word ".parse::<DiffMode>(), Ok(DiffMode::Word));
        assert_eq!(
            "char".parse::<DiffMode>(),
            Err(DiffError::InvalidMode("char".to_string()))
        );
        assert!("".parse::<DiffMode>().is_err());
    }

    #[test]
    fn test_mode_serde() {
        assert_eq!(serde_json::to_string(&DiffMode::Word).unwrap(), "\"word\"");
        assert_eq!(
            serde_json::from_str::<DiffMode>("\"line\"").unwrap(),
            DiffMode::Line
        );
        assert!(serde_json::from_str::<DiffMode>("\"sentence\"").is_err());
    }

    #[test]
    fn test_count_units() {
        assert_eq!(DiffMode::Line.count_units("a\nb\n\nc"), 3);
        assert_eq!(DiffMode::Word.count_units("a\nb\n\nc d"), 4);
        assert_eq!(DiffMode::Word.count_units(" "), 0);
    }
}
