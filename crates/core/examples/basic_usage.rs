//! Basic usage example of the compare_core library
//!
//! Run with `RUST_LOG=compare_core=debug` to see the engine's events.

use compare_core::normalizers::CustomNormalizer;
use compare_core::{
    are_identical, compare_texts, compute_diff, diff_stats, normalize, DiffConfig, DiffEngine,
    DiffMode, TextPipeline,
};
use tracing_subscriber::EnvFilter;

const LINE: &str = "----------------------------------------";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Contract Comparison Examples ===\n");

    // Example 1: Line diff of two extracted clauses
    example_line_diff();

    // Example 2: Word diff
    example_word_diff();

    // Example 3: Extraction noise is not a change
    example_normalization();

    // Example 4: Custom configuration
    example_custom_config();
}

fn example_line_diff() {
    println!("Example 1: Line Diff");
    println!("{}", LINE);

    let original = "1. Term: twelve months\n2. Rent: $1,000 per month\n3. Deposit: $500";
    let modified = "1. Term: twelve months\n2. Rent: $1,200 per month\n3. Deposit: $500\n4. Pets: not allowed";

    let result = compute_diff(original, modified, None);

    println!("{}", result);
    for segment in result.changed_segments() {
        println!("  {}", segment.description());
    }
    println!("\n");
}

fn example_word_diff() {
    println!("Example 2: Word Diff");
    println!("{}", LINE);

    let changes = compare_texts(
        "The Tenant shall pay rent monthly.",
        "The Tenant may pay rent quarterly.",
        DiffMode::Word,
    );

    for segment in &changes {
        let marker = if segment.added {
            "+"
        } else if segment.removed {
            "-"
        } else {
            " "
        };
        println!("  {} {:?}", marker, segment.value);
    }

    match diff_stats(&changes) {
        Ok(stats) => println!(
            "\n  {} added, {} removed, {} unchanged ({} changes)",
            stats.additions,
            stats.deletions,
            stats.unchanged,
            stats.total_changes()
        ),
        Err(err) => println!("\n  Invalid change list: {}", err),
    }
    println!("\n");
}

fn example_normalization() {
    println!("Example 3: Normalization");
    println!("{}", LINE);

    let extracted_pdf = "  Section 1.\tDefinitions  \r\n\r\n\r\n\r\n\"Premises\" means the unit.  ";
    let extracted_docx = "Section 1. Definitions\n\n\"Premises\" means the unit.";

    println!("Normalized PDF text:  {:?}", normalize(extracted_pdf));
    println!("Normalized DOCX text: {:?}", normalize(extracted_docx));
    println!("Identical: {}", are_identical(extracted_pdf, extracted_docx));
    println!("\n");
}

fn example_custom_config() {
    println!("Example 4: Custom Configuration");
    println!("{}", LINE);

    let original = "THE LANDLORD SHALL MAINTAIN THE PREMISES.";
    let modified = "The Landlord shall maintain the premises.";

    let strict = DiffEngine::new(DiffConfig::words());
    let relaxed = DiffEngine::new(DiffConfig::words().with_ignore_case(true));

    println!("Strict:  {}", strict.diff(original, modified).summary());
    println!("Relaxed: {}", relaxed.diff(original, modified).summary());

    // Page headers repeated by the extractor are dropped before comparing
    let pipeline = TextPipeline::document().prepend_normalizer(Box::new(CustomNormalizer::new(
        "strip_page_headers",
        |text: &str| {
            text.lines()
                .filter(|line| !line.trim_start().starts_with("Page "))
                .collect::<Vec<_>>()
                .join("\n")
        },
    )));
    let engine = DiffEngine::new(DiffConfig::lines().with_pipeline(pipeline));

    let result = engine.diff(
        "Page 1 of 2\nThe term is one year.\nPage 2 of 2\nRent is due monthly.",
        "The term is one year.\nRent is due monthly.",
    );
    println!("Without page headers: identical = {}", result.is_identical());

    let layers = engine.normalize_layers("Page 1 of 2\n  The term  is one year.");
    println!(
        "{} layers, changed by {}",
        layers.num_layers(),
        layers.changed_by().join(", ")
    );
    for (i, layer) in layers.iter().enumerate() {
        println!("  layer {}: {:?}", i, layer);
    }
}
