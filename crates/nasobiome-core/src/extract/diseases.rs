//! Disease-name extraction from the "infections caused" column.
//!
//! Line-oriented: URL lines are siphoned off, obvious prose is skipped, and
//! remaining lines are scanned against the disease keyword vocabulary with a
//! bounded word window around each hit. Lines that look like a bare disease
//! name (medical suffix, short, no referential words) are accepted whole.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use tracing::trace;

use super::vocab::{DETERMINER_PREFIXES, DISEASE_DENYLIST, DISEASE_KEYWORDS};

const MAX_PROSE_LINE: usize = 150;
const MAX_NAME_LEN: usize = 100;

static WWW_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*www\.").expect("valid regex"));

static HEADER_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(
        r"^(Virulence|Antibiotic|Important|Usually|Often|Chronic|Migrates|Direct|Hematogenous):",
    )
    .case_insensitive(true)
    .build()
    .expect("valid regex")
});

static DESCRIPTIVE_VERB_RE: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(
        r"\b(causes disease|known for|may allow|can lead|can enter|producing toxins|inducing|occur in|often occur|resemble)\b",
    )
    .case_insensitive(true)
    .build()
    .expect("valid regex")
});

static MEDICAL_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(itis|emia|osis|pathy|oma|syndrome|disease|disorder|infection)(\s|$|\()")
        .expect("valid regex")
});

static REFERENTIAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(include|such as|like|example|note|see|refer)\b").expect("valid regex")
});

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

static EDGE_PUNCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\w(]+|[^\w)]+$").expect("valid regex"));

// One window regex per vocabulary keyword: up to 5 words before and 3 after.
static KEYWORD_WINDOWS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    DISEASE_KEYWORDS
        .iter()
        .map(|kw| {
            let pattern = format!(
                r"\b(?:[\w-]+\s+){{0,5}}{}(?:\s+[\w-]+){{0,3}}\b",
                regex::escape(kw)
            );
            let re = RegexBuilder::new(&pattern)
                .case_insensitive(true)
                .build()
                .expect("valid regex");
            (*kw, re)
        })
        .collect()
});

/// One captured disease name with the source line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiseaseHit {
    pub name: String,
    pub source_line: String,
}

/// Extract disease names and URL lines from free text.
///
/// Returns the captured names (with their originating lines) plus the URL
/// lines joined by newlines. Names are deduplicated case-insensitively
/// across the whole call; at most one name is captured per line.
pub fn extract_diseases(text: &str) -> (Vec<DiseaseHit>, String) {
    let mut hits = Vec::new();
    let mut urls = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if line.starts_with("http://") || line.starts_with("https://") {
            urls.push(line.to_string());
            continue;
        }
        if WWW_RE.is_match(line) {
            urls.push(format!("https://{line}"));
            continue;
        }

        if line.len() > MAX_PROSE_LINE
            || HEADER_LABEL_RE.is_match(line)
            || DESCRIPTIVE_VERB_RE.is_match(line)
        {
            trace!(line, "Skipping prose line");
            continue;
        }

        let line_lower = line.to_lowercase();

        if let Some(name) = capture_keyword_window(line, &line_lower, &seen) {
            seen.insert(name.to_lowercase());
            hits.push(DiseaseHit {
                name,
                source_line: line.to_string(),
            });
            continue;
        }

        // No keyword hit: a short line ending in a medical suffix with no
        // referential words is taken verbatim as a disease name.
        if line.len() <= MAX_NAME_LEN
            && MEDICAL_SUFFIX_RE.is_match(&line_lower)
            && !seen.contains(&line_lower)
            && !REFERENTIAL_RE.is_match(&line_lower)
        {
            seen.insert(line_lower);
            hits.push(DiseaseHit {
                name: line.to_string(),
                source_line: line.to_string(),
            });
        }
    }

    (hits, urls.join("\n"))
}

/// Scan a line against every keyword window; return the first clean capture
/// that survives the filters.
fn capture_keyword_window(line: &str, line_lower: &str, seen: &HashSet<String>) -> Option<String> {
    for (keyword, window_re) in KEYWORD_WINDOWS.iter() {
        if !line_lower.contains(keyword) {
            continue;
        }
        for m in window_re.find_iter(line) {
            let collapsed = WHITESPACE_RE.replace_all(m.as_str(), " ");
            let name = EDGE_PUNCT_RE.replace_all(collapsed.trim(), "").to_string();
            let name_lower = name.to_lowercase();

            if name.is_empty()
                || name.len() > MAX_NAME_LEN
                || DISEASE_DENYLIST.contains(&name_lower.as_str())
                || DETERMINER_PREFIXES.iter().any(|p| name_lower.starts_with(p))
                || seen.contains(&name_lower)
            {
                continue;
            }
            return Some(name);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_capture_sinusitis() {
        let (hits, _) = extract_diseases("Can cause acute sinusitis and chronic otitis media");
        assert!(!hits.is_empty());
        assert!(hits[0].name.to_lowercase().contains("sinusitis"));
        for hit in &hits {
            assert!(!DISEASE_DENYLIST.contains(&hit.name.to_lowercase().as_str()));
        }
    }

    #[test]
    fn test_one_capture_per_line() {
        let (hits, _) = extract_diseases("Severe pneumonia with secondary meningitis");
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_url_lines_classified_not_scanned() {
        let (hits, urls) = extract_diseases(
            "https://www.ncbi.nlm.nih.gov/genome/154\nwww.example.org/sepsis\nOtitis media",
        );
        assert_eq!(
            urls,
            "https://www.ncbi.nlm.nih.gov/genome/154\nhttps://www.example.org/sepsis"
        );
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Otitis media");
    }

    #[test]
    fn test_header_label_lines_skipped() {
        let (hits, _) = extract_diseases("Virulence: produces sepsis-inducing factors");
        assert!(hits.is_empty());
    }

    #[test]
    fn test_descriptive_verb_lines_skipped() {
        let (hits, _) = extract_diseases("This organism can lead to severe pneumonia in infants");
        assert!(hits.is_empty());
    }

    #[test]
    fn test_long_lines_skipped() {
        let long = format!("{} pneumonia", "word ".repeat(40));
        let (hits, _) = extract_diseases(&long);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_medical_suffix_fallback() {
        let (hits, _) = extract_diseases("Chronic rhinosinusitis");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Chronic rhinosinusitis");
        assert_eq!(hits[0].source_line, "Chronic rhinosinusitis");
    }

    #[test]
    fn test_referential_line_not_taken_as_name() {
        let (hits, _) = extract_diseases("see also otosclerosis");
        assert!(hits.is_empty());
    }

    #[test]
    fn test_case_insensitive_dedup_across_lines() {
        let (hits, _) = extract_diseases("Otitis media\notitis media");
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_source_line_preserved() {
        let (hits, _) = extract_diseases("Acute mastoiditis after infection");
        assert_eq!(hits[0].source_line, "Acute mastoiditis after infection");
    }
}
