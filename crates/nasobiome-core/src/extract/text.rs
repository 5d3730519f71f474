//! Basic cell-text normalization helpers.

use once_cell::sync::Lazy;
use regex::Regex;

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://[^\s)]+").expect("valid regex"));

/// Trim a raw cell value. Missing or empty input maps to an empty string so
/// that downstream code never handles a null-like value.
pub fn normalize(text: Option<&str>) -> String {
    text.map(str::trim).unwrap_or_default().to_string()
}

/// First `http(s)://` substring found scanning left to right. No validation
/// beyond the scheme prefix.
pub fn extract_url(text: &str) -> Option<String> {
    URL_RE.find(text).map(|m| m.as_str().to_string())
}
