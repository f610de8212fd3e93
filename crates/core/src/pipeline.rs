//! Text normalization pipeline
//!
//! Provides a layered approach to text normalization where each normalizer
//! creates a new layer on top of the previous one, so the effect of every
//! step stays inspectable.

use crate::normalizers::{
    CollapseBlankLines, HorizontalWhitespace, LineEndings, Normalizer, Trim, TrimLines,
};

/// A single layer of normalized text
#[derive(Debug, Clone)]
pub struct NormalizationLayer {
    /// The normalized text at this layer
    pub text: String,

    /// Optional metadata about this normalization
    pub metadata: LayerMetadata,
}

/// Metadata about a normalization layer
#[derive(Debug, Clone, Default)]
pub struct LayerMetadata {
    /// Name of the normalizer that created this layer
    pub normalizer_name: String,

    /// Additional information (e.g., parameters used)
    pub info: Vec<(String, String)>,
}

impl NormalizationLayer {
    pub fn new(text: String) -> Self {
        Self {
            text,
            metadata: LayerMetadata::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: LayerMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// A pipeline of text normalizers that creates layered transformations
#[derive(Default, Clone)]
pub struct TextPipeline {
    /// Ordered list of normalizers to apply
    normalizers: Vec<Box<dyn Normalizer>>,
}

impl TextPipeline {
    /// Create a new empty pipeline
    pub fn new() -> Self {
        Self {
            normalizers: Vec::new(),
        }
    }

    /// The canonical pipeline for extracted document text.
    ///
    /// Unifies line endings, collapses spaces/tabs, trims every line, keeps at
    /// most one blank line between paragraphs and trims the whole text.
    /// Blank lines are collapsed after line trimming so whitespace-only lines
    /// count as blank, which keeps the pipeline idempotent.
    pub fn document() -> Self {
        Self::new()
            .add_normalizer(Box::new(LineEndings))
            .add_normalizer(Box::new(HorizontalWhitespace))
            .add_normalizer(Box::new(TrimLines))
            .add_normalizer(Box::new(CollapseBlankLines::new()))
            .add_normalizer(Box::new(Trim))
    }

    /// Add a normalizer to the pipeline
    pub fn add_normalizer(mut self, normalizer: Box<dyn Normalizer>) -> Self {
        self.normalizers.push(normalizer);
        self
    }

    /// Insert a normalizer ahead of every existing one
    pub fn prepend_normalizer(mut self, normalizer: Box<dyn Normalizer>) -> Self {
        self.normalizers.insert(0, normalizer);
        self
    }

    /// Run the text through every normalizer, keeping only the final text
    pub fn apply(&self, input: &str) -> String {
        self.normalizers
            .iter()
            .fold(input.to_string(), |text, normalizer| normalizer.normalize(&text))
    }

    /// Process text through the entire pipeline, returning all layers
    ///
    /// # Arguments
    ///
    /// * `input` - The original input text
    ///
    /// # Returns
    ///
    /// A `LayerSet` containing all transformation layers including the original
    pub fn process(&self, input: &str) -> LayerSet {
        let mut layers = LayerSet::new(input.to_string());

        for normalizer in &self.normalizers {
            let normalized = normalizer.normalize(layers.final_layer());

            let metadata = LayerMetadata {
                normalizer_name: normalizer.name().to_string(),
                info: normalizer.metadata(),
            };

            layers.add_layer(NormalizationLayer::new(normalized).with_metadata(metadata));
        }

        layers
    }

    /// Get the names of all normalizers in the pipeline
    pub fn normalizer_names(&self) -> Vec<String> {
        self.normalizers
            .iter()
            .map(|n| n.name().to_string())
            .collect()
    }
}

/// A complete set of normalization layers from original to final
#[derive(Debug, Clone)]
pub struct LayerSet {
    /// The original input text (layer 0)
    original: String,

    /// All normalization layers (layer 1, 2, 3, ...)
    layers: Vec<NormalizationLayer>,
}

impl LayerSet {
    /// Create a new layer set with just the original text
    pub fn new(original: String) -> Self {
        Self {
            original,
            layers: Vec::new(),
        }
    }

    /// Add a new normalization layer
    pub fn add_layer(&mut self, layer: NormalizationLayer) {
        self.layers.push(layer);
    }

    /// Get the original text
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Layer by index, 0 being the original
    fn layer(&self, index: usize) -> Option<&str> {
        if index == 0 {
            Some(&self.original)
        } else {
            self.layers.get(index - 1).map(|l| l.text.as_str())
        }
    }

    /// Get the final (most normalized) layer
    pub fn final_layer(&self) -> &str {
        self.layers
            .last()
            .map(|l| l.text.as_str())
            .unwrap_or(&self.original)
    }

    /// Get the total number of layers (including original)
    pub fn num_layers(&self) -> usize {
        self.layers.len() + 1 // +1 for original
    }

    /// Names of the normalizers that actually changed the text
    pub fn changed_by(&self) -> Vec<&str> {
        let mut previous = self.original.as_str();
        let mut names = Vec::new();

        for layer in &self.layers {
            if layer.text != previous {
                names.push(layer.metadata.normalizer_name.as_str());
            }
            previous = &layer.text;
        }

        names
    }

    /// Get metadata for all layers
    pub fn layer_metadata(&self) -> Vec<&LayerMetadata> {
        self.layers.iter().map(|l| &l.metadata).collect()
    }

    /// Create an iterator over all layers (including original as layer 0)
    pub fn iter(&self) -> LayerIterator<'_> {
        LayerIterator {
            layer_set: self,
            current_index: 0,
        }
    }
}

/// Iterator over layers in a LayerSet
pub struct LayerIterator<'a> {
    layer_set: &'a LayerSet,
    current_index: usize,
}

impl<'a> Iterator for LayerIterator<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.layer_set.layer(self.current_index);
        if result.is_some() {
            self.current_index += 1;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizers::Lowercase;

    #[test]
    fn test_empty_pipeline() {
        let pipeline = TextPipeline::new();
        let layers = pipeline.process("Hello World");

        assert_eq!(layers.num_layers(), 1); // Just original
        assert_eq!(layers.original(), "Hello World");
        assert_eq!(layers.final_layer(), "Hello World");
    }

    #[test]
    fn test_single_normalizer() {
        let pipeline = TextPipeline::new().add_normalizer(Box::new(Lowercase));

        let layers = pipeline.process("Hello World");

        assert_eq!(layers.num_layers(), 2); // Original + 1 normalization
        assert_eq!(layers.original(), "Hello World");
        assert_eq!(layers.final_layer(), "hello world");
    }

    #[test]
    fn test_layer_iteration() {
        let pipeline = TextPipeline::new().add_normalizer(Box::new(Lowercase));

        let layers = pipeline.process("TEST");
        let texts: Vec<&str> = layers.iter().collect();

        assert_eq!(texts, vec!["TEST", "test"]);
        assert_eq!(texts.len(), layers.num_layers());
    }

    #[test]
    fn test_document_pipeline_order() {
        let pipeline = TextPipeline::document();
        assert_eq!(
            pipeline.normalizer_names(),
            vec![
                "line_endings",
                "horizontal_whitespace",
                "trim_lines",
                "collapse_blank_lines",
                "trim",
            ]
        );
    }

    #[test]
    fn test_document_pipeline() {
        let pipeline = TextPipeline::document();

        assert_eq!(pipeline.apply("foo\r\nbar"), "foo\nbar");
        assert_eq!(pipeline.apply("foo   bar"), "foo bar");
        assert_eq!(pipeline.apply(""), "");
        assert_eq!(
            pipeline.apply("\n\n  1. Term \t\r\n\r\n \r\n\r\n   The term is one year.  \n\n\n"),
            "1. Term\n\nThe term is one year."
        );
    }

    #[test]
    fn test_whitespace_only_lines_count_as_blank() {
        let pipeline = TextPipeline::document();
        let once = pipeline.apply("a\n  \n\t\n \nb");

        assert_eq!(once, "a\n\nb");
        assert_eq!(pipeline.apply(&once), once);
    }

    #[test]
    fn test_apply_matches_process() {
        let pipeline = TextPipeline::document();
        let input = "  Section 2 \r\n\r\n\r\n Payment\tterms ";

        assert_eq!(pipeline.apply(input), pipeline.process(input).final_layer());
    }

    #[test]
    fn test_changed_by() {
        let layers = TextPipeline::document().process("foo\r\nbar  baz");

        assert_eq!(layers.changed_by(), vec!["line_endings", "horizontal_whitespace"]);
        assert_eq!(layers.layer_metadata()[3].info[0].1, "2");
    }

    #[test]
    fn test_prepend_normalizer() {
        let pipeline = TextPipeline::document().prepend_normalizer(Box::new(Lowercase));

        assert_eq!(pipeline.normalizer_names()[0], "lowercase");
        assert_eq!(pipeline.apply("  HELLO  "), "hello");
    }
}
