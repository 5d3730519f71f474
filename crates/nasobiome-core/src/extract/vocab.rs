//! Fixed extraction vocabularies.
//!
//! Process-wide static configuration, never mutated at runtime. The
//! extractors take these as slice arguments so tests can inject reduced
//! vocabularies.

/// Molecular products recognized in free text (matched case-insensitively
/// as substrings).
pub const KNOWN_PRODUCTS: &[&str] = &[
    "lugdunin",
    "pneumolysin",
    "salivaricin",
    "phenol-soluble modulins",
    "hemolysins",
    "proteases",
    "lipases",
    "biofilm",
    "siderophore",
    "bacteriocin",
    "toxic shock syndrome toxin",
    "enterotoxins",
    "exfoliatin",
    "collagenase",
    "hyaluronidase",
    "autolysin",
    "neuraminidase",
    "staphyloxanthin",
    "catalase",
    "delta-toxin",
    "sarcinaxanthin",
];

/// Disease keywords scanned for inside candidate lines.
pub const DISEASE_KEYWORDS: &[&str] = &[
    "sepsis",
    "pneumonia",
    "meningitis",
    "endocarditis",
    "bacteremia",
    "sinusitis",
    "otitis",
    "osteomyelitis",
    "abscess",
    "cellulitis",
    "peritonitis",
    "empyema",
    "arthritis",
    "pyelonephritis",
    "pharyngitis",
    "tonsillitis",
    "bronchitis",
    "gastroenteritis",
    "conjunctivitis",
    "mastoiditis",
    "pericarditis",
    "myocarditis",
    "encephalitis",
    "nephritis",
    "hepatitis",
    "colitis",
    "enteritis",
    "urethritis",
    "vaginitis",
    "folliculitis",
    "impetigo",
    "erysipelas",
    "necrotizing fasciitis",
    "toxic shock syndrome",
    "scarlet fever",
    "rheumatic fever",
];

/// Abbreviated binomial -> full binomial canonicalization table.
pub const ABBREVIATIONS: &[(&str, &str)] = &[
    ("S.aureus", "Staphylococcus aureus"),
    ("S.epidermidis", "Staphylococcus epidermidis"),
    ("C.accolens", "Corynebacterium accolens"),
    ("S.pneumoniae", "Streptococcus pneumoniae"),
    ("H.influenzae", "Haemophilus influenzae"),
    ("M.catarrhalis", "Moraxella catarrhalis"),
    ("P.aeruginosa", "Pseudomonas aeruginosa"),
    ("F.nucleatum", "Fusobacterium nucleatum"),
];

/// Keywords classifying a sentence as an antagonistic interaction.
/// Checked before the synergistic set; first matching category wins.
pub const ANTAGONISTIC_KEYWORDS: &[&str] = &[
    "inhibit",
    "suppress",
    "kill",
    "block",
    "antagonistic",
    "reduce growth",
];

/// Keywords classifying a sentence as a synergistic interaction.
pub const SYNERGISTIC_KEYWORDS: &[&str] = &[
    "synergistic",
    "coexist",
    "co-aggregate",
    "enhance",
    "promote",
    "support",
    "cooperate",
];

/// Generic phrases that are never accepted as disease names.
pub const DISEASE_DENYLIST: &[&str] = &["infections", "infection", "common syndromes include"];

/// Determiner prefixes that disqualify a captured disease name.
pub const DETERMINER_PREFIXES: &[&str] = &["the ", "this ", "these ", "it ", "they "];

/// Resolve an abbreviated binomial ("S.aureus") to its full name, or pass
/// the input through unchanged when unrecognized.
pub fn canonical_species_name(name: &str) -> &str {
    ABBREVIATIONS
        .iter()
        .find(|(abbrev, _)| *abbrev == name)
        .map(|(_, full)| *full)
        .unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_abbreviation_resolves() {
        assert_eq!(canonical_species_name("S.aureus"), "Staphylococcus aureus");
        assert_eq!(canonical_species_name("F.nucleatum"), "Fusobacterium nucleatum");
    }

    #[test]
    fn test_unknown_binomial_passes_through() {
        assert_eq!(canonical_species_name("Dolosigranulum pigrum"), "Dolosigranulum pigrum");
        assert_eq!(canonical_species_name("X.ignota"), "X.ignota");
    }
}
