//! Text tokenizers
//!
//! Provides the `Tokenizer` trait and the line and word tokenizers. A
//! tokenizer partitions normalized text into alternating runs of units (lines
//! or words) and separators (newlines or whitespace). Nothing is dropped:
//! concatenating the tokens in order gives back the input exactly, which is
//! what lets a diff over tokens reconstruct both texts.

/// Whether a token carries content or sits between content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A line (line mode) or a word (word mode)
    Unit,
    /// Newlines (line mode) or whitespace (word mode) between units
    Separator,
}

/// A single token borrowed from the text it was cut from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// The token text
    pub text: &'a str,

    /// Unit or separator
    pub kind: TokenKind,

    /// Token index in the sequence
    pub index: usize,
}

impl<'a> Token<'a> {
    pub fn new(text: &'a str, kind: TokenKind, index: usize) -> Self {
        Self { text, kind, index }
    }

    pub fn is_unit(&self) -> bool {
        self.kind == TokenKind::Unit
    }
}

/// Trait for tokenizers that split text into units and separators
pub trait Tokenizer: Send + Sync {
    /// Whether `ch` separates units
    fn is_boundary(&self, ch: char) -> bool;

    /// Get the name of this tokenizer
    fn name(&self) -> &str;

    /// Clone this tokenizer into a Box
    fn clone_box(&self) -> Box<dyn Tokenizer>;

    /// Split text into maximal runs of unit and separator characters
    fn tokenize<'a>(&self, text: &'a str) -> Vec<Token<'a>> {
        let mut tokens = Vec::new();
        let mut current: Option<(usize, TokenKind)> = None;

        for (pos, ch) in text.char_indices() {
            let kind = if self.is_boundary(ch) {
                TokenKind::Separator
            } else {
                TokenKind::Unit
            };

            match current {
                Some((_, prev_kind)) if prev_kind == kind => {}
                Some((start, prev_kind)) => {
                    let index = tokens.len();
                    tokens.push(Token::new(&text[start..pos], prev_kind, index));
                    current = Some((pos, kind));
                }
                None => current = Some((pos, kind)),
            }
        }

        if let Some((start, kind)) = current {
            let index = tokens.len();
            tokens.push(Token::new(&text[start..], kind, index));
        }

        tokens
    }

    /// Count the units in `text`: split on boundaries, ignore empty fragments
    fn count_units(&self, text: &str) -> usize {
        text.split(|ch| self.is_boundary(ch))
            .filter(|fragment| !fragment.is_empty())
            .count()
    }
}

// Implement Clone for Box<dyn Tokenizer>
impl Clone for Box<dyn Tokenizer> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Splits text into lines separated by runs of `\n`
#[derive(Debug, Clone, Copy, Default)]
pub struct LineTokenizer;

impl Tokenizer for LineTokenizer {
    fn is_boundary(&self, ch: char) -> bool {
        ch == '\n'
    }

    fn name(&self) -> &str {
        "line"
    }

    fn clone_box(&self) -> Box<dyn Tokenizer> {
        Box::new(*self)
    }
}

/// Splits text into words separated by runs of whitespace
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl Tokenizer for WordTokenizer {
    fn is_boundary(&self, ch: char) -> bool {
        ch.is_whitespace()
    }

    fn name(&self) -> &str {
        "word"
    }

    fn clone_box(&self) -> Box<dyn Tokenizer> {
        Box::new(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(tokens: &[Token<'a>]) -> Vec<&'a str> {
        tokens.iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_line_tokenizer() {
        let tokens = LineTokenizer.tokenize("a b\nc\n\nd");

        assert_eq!(texts(&tokens), vec!["a b", "\n", "c", "\n\n", "d"]);
        assert!(tokens[0].is_unit());
        assert_eq!(tokens[1].kind, TokenKind::Separator);
        assert_eq!(tokens[4].index, 4);
    }

    #[test]
    fn test_word_tokenizer() {
        let tokens = WordTokenizer.tokenize("the quick\nfox");

        assert_eq!(texts(&tokens), vec!["the", " ", "quick", "\n", "fox"]);
        assert_eq!(
            tokens.iter().filter(|t| t.is_unit()).count(),
            WordTokenizer.count_units("the quick\nfox")
        );
    }

    #[test]
    fn test_tokens_reconstruct_input() {
        let inputs = ["", " ", "\n", "one", " lead and trail ", "a\n\n b \n", "ünïcödé wörds\n§ 1"];

        for input in inputs {
            for tokenizer in [&LineTokenizer as &dyn Tokenizer, &WordTokenizer] {
                let rebuilt: String = tokenizer.tokenize(input).iter().map(|t| t.text).collect();
                assert_eq!(rebuilt, input, "{} tokenizer on {:?}", tokenizer.name(), input);
            }
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(LineTokenizer.tokenize("").is_empty());
        assert_eq!(LineTokenizer.count_units(""), 0);
        assert_eq!(WordTokenizer.count_units(""), 0);
    }

    #[test]
    fn test_count_units_ignores_empty_fragments() {
        assert_eq!(LineTokenizer.count_units("\nline2"), 1);
        assert_eq!(LineTokenizer.count_units("a\n\n\nb\n"), 2);
        assert_eq!(WordTokenizer.count_units("  two   words "), 2);
    }
}
