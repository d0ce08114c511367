//! Text clean-up shared by every duration strategy.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Combining diacritical marks left behind by canonical decomposition.
const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036f}';

/// Byte-order mark, left at the start of fields imported from files.
const BYTE_ORDER_MARK: char = '\u{feff}';

static CONJUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\s\x{feff}]+e[\s\x{feff}]+").expect("conjunction pattern is valid")
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\x{feff}]+").expect("whitespace pattern is valid"));

/// Characters treated as blank between duration tokens.
pub(crate) fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == BYTE_ORDER_MARK
}

/// Normalize raw duration text before matching.
///
/// Lower-cases, strips accents, drops the conjunction "e" ("1 hora e 30")
/// and collapses whitespace. An empty result means there is nothing to parse.
pub fn normalize_input(value: &str) -> String {
    let stripped: String = value
        .to_lowercase()
        .nfd()
        .filter(|c| !COMBINING_MARKS.contains(c))
        .collect();

    let without_conjunction = CONJUNCTION.replace_all(&stripped, " ");
    WHITESPACE
        .replace_all(&without_conjunction, " ")
        .trim_matches(is_separator)
        .to_string()
}

/// Parse a numeral that may use either `.` or `,` as decimal separator.
pub fn parse_decimal(value: &str) -> Option<f64> {
    let parsed: f64 = value.replacen(',', ".", 1).parse().ok()?;
    parsed.is_finite().then_some(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_trims() {
        assert_eq!(normalize_input("  90 MIN  "), "90 min");
    }

    #[test]
    fn test_normalize_strips_accents() {
        assert_eq!(normalize_input("1 HÓRA"), "1 hora");
        assert_eq!(normalize_input("preparação"), "preparacao");
    }

    #[test]
    fn test_normalize_drops_conjunction() {
        assert_eq!(normalize_input("1 hora e 30 minutos"), "1 hora 30 minutos");
        assert_eq!(normalize_input("2 horas\te\n15 min"), "2 horas 15 min");
    }

    #[test]
    fn test_normalize_keeps_e_inside_words() {
        assert_eq!(normalize_input("1 hora e meia"), "1 hora meia");
        assert_eq!(normalize_input("cerca de 10"), "cerca de 10");
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize_input("1   h \t 30"), "1 h 30");
        assert_eq!(normalize_input(" \n\t "), "");
    }

    #[test]
    fn test_normalize_treats_byte_order_mark_as_blank() {
        assert_eq!(normalize_input("\u{feff}90 min"), "90 min");
        assert_eq!(normalize_input("1 hora\u{feff}e\u{feff}30"), "1 hora 30");
        assert_eq!(normalize_input("\u{feff}"), "");
    }

    #[test]
    fn test_parse_decimal_separators() {
        assert_eq!(parse_decimal("1.5"), Some(1.5));
        assert_eq!(parse_decimal("1,5"), Some(1.5));
        assert_eq!(parse_decimal("45"), Some(45.0));
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal("1,5,5"), None);
        assert_eq!(parse_decimal(&"9".repeat(400)), None);
    }
}
