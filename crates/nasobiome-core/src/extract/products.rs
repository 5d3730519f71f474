//! Known-product extraction.

use super::vocab::KNOWN_PRODUCTS;

/// Scan free text for entries of the fixed product vocabulary.
///
/// Matching is case-insensitive substring containment; each vocabulary entry
/// is emitted at most once, in vocabulary order, normalized to title case
/// with hyphens ("toxic shock syndrome toxin" -> "Toxic-Shock-Syndrome-Toxin").
pub fn extract_known_products(text: &str) -> Vec<String> {
    extract_products_with_vocab(text, KNOWN_PRODUCTS)
}

/// Vocabulary-injectable variant used by tests.
pub fn extract_products_with_vocab(text: &str, vocab: &[&str]) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let lower = text.to_lowercase();
    vocab
        .iter()
        .filter(|product| lower.contains(&***product))
        .map(|product| display_name(product))
        .collect()
}

/// Title-case each word and join with hyphens. Existing hyphens are kept
/// and also start a new capitalized segment.
fn display_name(product: &str) -> String {
    product
        .split(' ')
        .map(|word| {
            word.split('-')
                .map(capitalize)
                .collect::<Vec<_>>()
                .join("-")
        })
        .collect::<Vec<_>>()
        .join("-")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
