//! Sentence-level species-interaction extraction.

use serde::{Deserialize, Serialize};

use super::species::extract_species_candidates;
use super::vocab::{ANTAGONISTIC_KEYWORDS, SYNERGISTIC_KEYWORDS};

/// Kind of a species interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionType {
    Synergistic,
    Antagonistic,
    Neutral,
}

impl InteractionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Synergistic => "synergistic",
            Self::Antagonistic => "antagonistic",
            Self::Neutral => "neutral",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "synergistic" => Some(Self::Synergistic),
            "antagonistic" => Some(Self::Antagonistic),
            "neutral" => Some(Self::Neutral),
            _ => None,
        }
    }
}

/// One extracted interaction: target species, classified type, and the
/// sentence that triggered it (kept as evidence).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionHit {
    pub target: String,
    pub interaction_type: InteractionType,
    pub sentence: String,
}

/// Split text into sentences on `.`, newline, `!` and `;`. A period right
/// after a lone capital letter is an abbreviated genus ("S. aureus"), not a
/// sentence end, and stays inside the sentence.
fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        match c {
            '\n' | '!' | ';' => sentences.push(std::mem::take(&mut current)),
            '.' => {
                let after_lone_upper = i >= 1
                    && chars[i - 1].is_ascii_uppercase()
                    && (i < 2 || !chars[i - 2].is_alphanumeric());
                if after_lone_upper {
                    current.push(c);
                } else {
                    sentences.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        sentences.push(current);
    }
    sentences
}

/// Parse sentences like "Inhibits S. aureus" or "Coexists with C. accolens".
///
/// Each sentence is classified by keyword set (antagonistic checked first;
/// first matching category wins) and species candidates are extracted from
/// it, excluding the subject species. Sentences matching neither set are
/// dropped.
pub fn extract_interactions(text: &str, subject: &str) -> Vec<InteractionHit> {
    let mut hits = Vec::new();

    for sentence in split_sentences(text) {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }
        let lower = sentence.to_lowercase();

        let interaction_type = if ANTAGONISTIC_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            InteractionType::Antagonistic
        } else if SYNERGISTIC_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            InteractionType::Synergistic
        } else {
            continue;
        };

        for target in extract_species_candidates(sentence, &[subject]) {
            hits.push(InteractionHit {
                target,
                interaction_type,
                sentence: sentence.to_string(),
            });
        }
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_antagonistic_with_abbreviation() {
        let hits = extract_interactions(
            "Inhibits S. aureus growth significantly",
            "Streptococcus pneumoniae",
        );
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].target, "Staphylococcus aureus");
        assert_eq!(hits[0].interaction_type, InteractionType::Antagonistic);
        assert_eq!(hits[0].sentence, "Inhibits S. aureus growth significantly");
    }

    #[test]
    fn test_synergistic_sentence() {
        let hits = extract_interactions("Coexists with C. accolens", "Staphylococcus epidermidis");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].target, "Corynebacterium accolens");
        assert_eq!(hits[0].interaction_type, InteractionType::Synergistic);
    }

    #[test]
    fn test_antagonistic_wins_over_synergistic() {
        // Sentence contains keywords from both sets; antagonistic is checked first.
        let hits = extract_interactions(
            "Inhibits and does not support H. influenzae",
            "Moraxella catarrhalis",
        );
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].interaction_type, InteractionType::Antagonistic);
    }

    #[test]
    fn test_unclassified_sentences_dropped() {
        let hits = extract_interactions(
            "Commonly found near S. aureus in healthy adults",
            "Corynebacterium accolens",
        );
        assert!(hits.is_empty());
    }

    #[test]
    fn test_subject_excluded() {
        // Abbreviated subject mention is excluded before canonicalization.
        let hits = extract_interactions("S. aureus inhibits itself", "S.aureus");
        assert!(hits.is_empty());
    }

    #[test]
    fn test_sentence_split_on_semicolon_and_newline() {
        let hits = extract_interactions(
            "Promotes C. accolens; suppresses S. pneumoniae\nno signal here",
            "Staphylococcus epidermidis",
        );
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].interaction_type, InteractionType::Synergistic);
        assert_eq!(hits[1].interaction_type, InteractionType::Antagonistic);
        assert_eq!(hits[1].target, "Streptococcus pneumoniae");
    }

    #[test]
    fn test_abbreviation_period_does_not_end_sentence() {
        let hits = extract_interactions(
            "Produces lugdunin. Inhibits S. aureus growth significantly",
            "Staphylococcus lugdunensis",
        );
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].target, "Staphylococcus aureus");
        assert_eq!(hits[0].sentence, "Inhibits S. aureus growth significantly");
    }

    #[test]
    fn test_interaction_type_round_trip() {
        for t in [
            InteractionType::Synergistic,
            InteractionType::Antagonistic,
            InteractionType::Neutral,
        ] {
            assert_eq!(InteractionType::parse(t.as_str()), Some(t));
        }
        assert_eq!(InteractionType::parse("commensal"), None);
    }
}
