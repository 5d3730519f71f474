//! Candidate species-name extraction.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use super::vocab::canonical_species_name;

// Abbreviated binomial: "S. aureus".
static ABBREV_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Z]\.\s+[a-z]\w+)").expect("valid regex"));

// Full binomial: consecutive capitalized words, filtered to exactly two.
static FULL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Z][a-z]+(?:\s+[A-Z][a-z]+)+)").expect("valid regex"));

/// Extract likely species names ("S. aureus", "Corynebacterium accolens")
/// from free text.
///
/// Two independent regex families are unioned, excluded names removed, and
/// the fixed abbreviation table applied to canonicalize known abbreviations.
/// Unrecognized binomials pass through unchanged. Output is deduplicated and
/// sorted, so identical input always yields identical output.
///
/// The full-binomial family requires both tokens capitalized; a genus-epithet
/// name with a lowercase epithet is only recovered through its abbreviation.
pub fn extract_species_candidates(text: &str, exclude: &[&str]) -> Vec<String> {
    let mut candidates = BTreeSet::new();

    for m in ABBREV_RE.find_iter(text) {
        let name = m.as_str().replace(". ", ".");
        if !exclude.contains(&name.as_str()) {
            candidates.insert(name);
        }
    }

    for m in FULL_RE.find_iter(text) {
        let name = m.as_str();
        if name.split_whitespace().count() == 2 && !exclude.contains(&name) {
            candidates.insert(name.to_string());
        }
    }

    candidates
        .into_iter()
        .map(|name| canonical_species_name(&name).to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbreviated_binomial_resolved() {
        let found = extract_species_candidates("Inhibits S. aureus growth", &[]);
        assert_eq!(found, vec!["Staphylococcus aureus".to_string()]);
    }

    #[test]
    fn test_full_binomial_two_capitalized_tokens() {
        let found = extract_species_candidates("Competes with Moraxella Catarrhalis", &[]);
        assert_eq!(found, vec!["Moraxella Catarrhalis".to_string()]);
    }

    #[test]
    fn test_lowercase_epithet_only_resolved_via_abbreviation() {
        assert!(extract_species_candidates("Competes with Haemophilus influenzae", &[]).is_empty());
        assert_eq!(
            extract_species_candidates("Competes with H. influenzae", &[]),
            vec!["Haemophilus influenzae".to_string()]
        );
    }

    #[test]
    fn test_three_token_capitalized_run_rejected() {
        // Exactly-two-token rule: a longer capitalized run is not a binomial.
        let found = extract_species_candidates("Toxic Shock Syndrome appears", &[]);
        assert!(found.is_empty());
    }

    #[test]
    fn test_exclusion_applied_before_canonicalization() {
        // The exclusion list sees the raw "C.accolens" form, not the
        // canonical full name.
        let found = extract_species_candidates("Coexists with C. accolens", &["C.accolens"]);
        assert!(found.is_empty());
    }

    #[test]
    fn test_unknown_abbreviation_passes_through() {
        let found = extract_species_candidates("with D. pigrum nearby", &[]);
        assert_eq!(found, vec!["D.pigrum".to_string()]);
    }

    #[test]
    fn test_union_of_both_families() {
        let found = extract_species_candidates(
            "S. epidermidis coexists with Moraxella Catarrhalis",
            &[],
        );
        assert_eq!(
            found,
            vec![
                "Moraxella Catarrhalis".to_string(),
                "Staphylococcus epidermidis".to_string(),
            ]
        );
    }
}
