//! Text normalizers
//!
//! Provides the `Normalizer` trait and the individual steps used to clean up
//! text coming out of PDF/DOCX extraction before it is compared. Each step is
//! small and single-purpose; `TextPipeline` chains them.

use std::sync::Arc;

/// Trait for text normalizers
pub trait Normalizer: Send + Sync {
    /// Normalize the input text
    fn normalize(&self, input: &str) -> String;

    /// Get the name of this normalizer
    fn name(&self) -> &str;

    /// Get metadata about this normalizer (e.g., configuration)
    fn metadata(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// Clone this normalizer into a Box
    fn clone_box(&self) -> Box<dyn Normalizer>;
}

// Implement Clone for Box<dyn Normalizer>
impl Clone for Box<dyn Normalizer> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Spaces and tabs. Newlines and other Unicode whitespace are not horizontal.
pub(crate) fn is_horizontal_whitespace(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

// ============================================================================
// Document normalizers
// ============================================================================

/// Unifies line endings: `\r\n` and lone `\r` become `\n`
#[derive(Clone, Default)]
pub struct LineEndings;

impl Normalizer for LineEndings {
    fn normalize(&self, input: &str) -> String {
        let mut normalized = String::with_capacity(input.len());
        let mut chars = input.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch == '\r' {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                normalized.push('\n');
            } else {
                normalized.push(ch);
            }
        }

        normalized
    }

    fn name(&self) -> &str {
        "line_endings"
    }

    fn clone_box(&self) -> Box<dyn Normalizer> {
        Box::new(self.clone())
    }
}

/// Collapses runs of spaces and tabs into a single space
#[derive(Clone, Default)]
pub struct HorizontalWhitespace;

impl Normalizer for HorizontalWhitespace {
    fn normalize(&self, input: &str) -> String {
        let mut normalized = String::with_capacity(input.len());
        let mut in_whitespace = false;

        for ch in input.chars() {
            if is_horizontal_whitespace(ch) {
                if !in_whitespace {
                    normalized.push(' ');
                    in_whitespace = true;
                }
            } else {
                normalized.push(ch);
                in_whitespace = false;
            }
        }

        normalized
    }

    fn name(&self) -> &str {
        "horizontal_whitespace"
    }

    fn clone_box(&self) -> Box<dyn Normalizer> {
        Box::new(self.clone())
    }
}

/// Strips leading and trailing spaces/tabs from every line
#[derive(Clone, Default)]
pub struct TrimLines;

impl Normalizer for TrimLines {
    fn normalize(&self, input: &str) -> String {
        input
            .split('\n')
            .map(|line| line.trim_matches(is_horizontal_whitespace))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn name(&self) -> &str {
        "trim_lines"
    }

    fn clone_box(&self) -> Box<dyn Normalizer> {
        Box::new(self.clone())
    }
}

/// Limits consecutive newlines, keeping at most one blank line between paragraphs
#[derive(Clone)]
pub struct CollapseBlankLines {
    /// Longest run of `\n` kept as-is
    pub max_newlines: usize,
}

impl Default for CollapseBlankLines {
    fn default() -> Self {
        Self { max_newlines: 2 }
    }
}

impl CollapseBlankLines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_newlines(mut self, max_newlines: usize) -> Self {
        self.max_newlines = max_newlines.max(1);
        self
    }
}

impl Normalizer for CollapseBlankLines {
    fn normalize(&self, input: &str) -> String {
        let mut normalized = String::with_capacity(input.len());
        let mut run = 0;

        for ch in input.chars() {
            if ch == '\n' {
                run += 1;
                if run <= self.max_newlines {
                    normalized.push('\n');
                }
            } else {
                run = 0;
                normalized.push(ch);
            }
        }

        normalized
    }

    fn name(&self) -> &str {
        "collapse_blank_lines"
    }

    fn metadata(&self) -> Vec<(String, String)> {
        vec![("max_newlines".to_string(), self.max_newlines.to_string())]
    }

    fn clone_box(&self) -> Box<dyn Normalizer> {
        Box::new(self.clone())
    }
}

/// Trims leading and trailing whitespace (including blank lines) from the whole text
#[derive(Clone, Default)]
pub struct Trim;

impl Normalizer for Trim {
    fn normalize(&self, input: &str) -> String {
        input.trim().to_string()
    }

    fn name(&self) -> &str {
        "trim"
    }

    fn clone_box(&self) -> Box<dyn Normalizer> {
        Box::new(self.clone())
    }
}

// ============================================================================
// Optional normalizers
// ============================================================================

/// Converts all text to lowercase
#[derive(Clone, Default)]
pub struct Lowercase;

impl Normalizer for Lowercase {
    fn normalize(&self, input: &str) -> String {
        input.to_lowercase()
    }

    fn name(&self) -> &str {
        "lowercase"
    }

    fn clone_box(&self) -> Box<dyn Normalizer> {
        Box::new(self.clone())
    }
}

/// Applies Unicode compatibility composition (NFKC)
///
/// Folds typographic artifacts that extraction tools leave behind: ligatures
/// (`ﬁ` → `fi`), no-break spaces, full-width digits and similar compatibility
/// characters.
#[derive(Clone, Default)]
pub struct UnicodeCompatibility;

impl Normalizer for UnicodeCompatibility {
    fn normalize(&self, input: &str) -> String {
        use unicode_normalization::UnicodeNormalization;

        input.nfkc().collect()
    }

    fn name(&self) -> &str {
        "unicode_compatibility"
    }

    fn clone_box(&self) -> Box<dyn Normalizer> {
        Box::new(self.clone())
    }
}

/// Custom normalizer using a user-provided function
#[derive(Clone)]
pub struct CustomNormalizer {
    name: String,
    func: Arc<dyn Fn(&str) -> String + Send + Sync>,
}

impl CustomNormalizer {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }
}

impl Normalizer for CustomNormalizer {
    fn normalize(&self, input: &str) -> String {
        (self.func)(input)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn clone_box(&self) -> Box<dyn Normalizer> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_endings() {
        assert_eq!(LineEndings.normalize("foo\r\nbar"), "foo\nbar");
        assert_eq!(LineEndings.normalize("foo\rbar\r"), "foo\nbar\n");
        assert_eq!(LineEndings.normalize("a\r\r\nb"), "a\n\nb");
    }

    #[test]
    fn test_horizontal_whitespace() {
        assert_eq!(HorizontalWhitespace.normalize("foo   bar"), "foo bar");
        assert_eq!(HorizontalWhitespace.normalize("a\t \tb"), "a b");
        // Newlines are left alone
        assert_eq!(HorizontalWhitespace.normalize("a \n\n b"), "a \n\n b");
    }

    #[test]
    fn test_trim_lines() {
        assert_eq!(TrimLines.normalize("  one \n\ttwo\t\n "), "one\ntwo\n");
    }

    #[test]
    fn test_collapse_blank_lines() {
        let normalizer = CollapseBlankLines::new();
        assert_eq!(normalizer.normalize("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(normalizer.normalize("a\n\nb\nc"), "a\n\nb\nc");

        let strict = CollapseBlankLines::new().with_max_newlines(1);
        assert_eq!(strict.normalize("a\n\n\nb"), "a\nb");
        assert_eq!(strict.metadata(), vec![("max_newlines".to_string(), "1".to_string())]);
    }

    #[test]
    fn test_trim() {
        assert_eq!(Trim.normalize("\n\n  body \n"), "body");
        assert_eq!(Trim.normalize(""), "");
    }

    #[test]
    fn test_unicode_compatibility() {
        assert_eq!(UnicodeCompatibility.normalize("de\u{FB01}ned"), "defined");
        assert_eq!(UnicodeCompatibility.normalize("a\u{00A0}b"), "a b");
    }

    #[test]
    fn test_custom_normalizer_clones() {
        let normalizer = CustomNormalizer::new("strip_page_marks", |s: &str| {
            s.replace("[page]", "")
        });
        let boxed: Box<dyn Normalizer> = Box::new(normalizer);
        let cloned = boxed.clone();

        assert_eq!(cloned.name(), "strip_page_marks");
        assert_eq!(cloned.normalize("one[page]two"), "onetwo");
    }
}
