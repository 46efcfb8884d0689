//! Load case label helpers
//!
//! Labels carry an optional `"<digits>. "` sequence prefix and unfactored
//! cases end in `" UNFACT"`.

use regex::Regex;
use std::sync::LazyLock;

static SEQUENCE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s*").expect("valid prefix pattern"));

static UNFACTORED_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\sUNFACT$").expect("valid suffix pattern"));

/// Suffix appended to unfactored load case names
pub const UNFACTORED_SUFFIX_TEXT: &str = "UNFACT";

/// Remove a leading `"12. "` style prefix
pub fn strip_sequence_prefix(label: &str) -> &str {
    match SEQUENCE_PREFIX.find(label) {
        Some(m) => &label[m.end()..],
        None => label,
    }
}

/// Remove a trailing `" UNFACT"` suffix
pub fn strip_unfactored_suffix(label: &str) -> &str {
    match UNFACTORED_SUFFIX.find(label) {
        Some(m) => &label[..m.start()],
        None => label,
    }
}

/// Base name used to match a label back to its source row
pub fn lookup_key(label: &str) -> &str {
    strip_unfactored_suffix(strip_sequence_prefix(label)).trim()
}

/// Prefix a label with its 1-based sequence number
pub fn numbered(number: usize, label: &str) -> String {
    format!("{}. {}", number, label)
}

/// Name of the unfactored companion of a load case
pub fn unfactored(number: usize, label: &str) -> String {
    format!(
        "{}. {} {}",
        number,
        strip_sequence_prefix(label),
        UNFACTORED_SUFFIX_TEXT
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_prefix() {
        assert_eq!(strip_sequence_prefix("12. NESC Heavy"), "NESC Heavy");
        assert_eq!(strip_sequence_prefix("3.Extreme Wind"), "Extreme Wind");
        assert_eq!(strip_sequence_prefix("NESC 250B"), "NESC 250B");
        assert_eq!(strip_sequence_prefix("1.5 in Ice"), "5 in Ice");
    }

    #[test]
    fn test_lookup_key() {
        assert_eq!(lookup_key("7. NESC Heavy UNFACT"), "NESC Heavy");
        assert_eq!(lookup_key("NESC Heavy"), "NESC Heavy");
        assert_eq!(lookup_key("2. UNFACTORED"), "UNFACTORED");
    }

    #[test]
    fn test_unfactored_name() {
        assert_eq!(unfactored(4, "1. Rule B w/ OLF"), "4. Rule B w/ OLF UNFACT");
        assert_eq!(unfactored(2, "Extreme Wind"), "2. Extreme Wind UNFACT");
    }
}
