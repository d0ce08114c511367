//! Ordered interpretation rules for normalized duration text.
//!
//! Each strategy pairs a permissive `matches` predicate with a strict
//! `parse` step. A strategy that matches but cannot extract valid numbers
//! hands the text on to the next one.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::normalize::{is_separator, parse_decimal};

const HOUR_UNITS: &[&str] = &["h", "hr", "hrs", "hora", "horas"];
const MINUTE_UNITS: &[&str] = &["min", "mins", "minuto", "minutos"];

static COLON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{1,2})\s*:\s*([0-9]{1,2})").expect("colon pattern is valid")
});

static COMPACT_HOUR_MINUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"([0-9]+(?:[.,][0-9]+)?)\s*h(?:ora)?s?\s*([0-9]+(?:[.,][0-9]+)?)(?:\s*(?:min(?:uto)?s?)?)?",
    )
    .expect("compact hour-minute pattern is valid")
});

static HOUR_TOKENS: LazyLock<Regex> = LazyLock::new(|| unit_pattern(HOUR_UNITS));

static MINUTE_TOKENS: LazyLock<Regex> = LazyLock::new(|| unit_pattern(MINUTE_UNITS));

static BARE_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+(?:[.,][0-9]+)?$").expect("bare number pattern is valid")
});

fn unit_pattern(units: &[&str]) -> Regex {
    // ASCII boundary: a non-ASCII letter right after the unit still ends the token.
    let pattern = format!(r"([0-9]+(?:[.,][0-9]+)?)\s*(?:{})(?-u:\b)", units.join("|"));
    Regex::new(&pattern).expect("unit pattern is valid")
}

/// A duration interpretation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// `H:MM` notation, e.g. "1:30".
    Colon,
    /// Hours immediately followed by a minute numeral, e.g. "1h30", "1 hora 30 min".
    CompactHourMinute,
    /// Every `<number> <unit>` token in the text, summed.
    Units,
    /// A bare numeral, read as minutes.
    Numeric,
}

/// Strategies in the order they are attempted: most specific first.
pub const STRATEGIES: [Strategy; 4] = [
    Strategy::Colon,
    Strategy::CompactHourMinute,
    Strategy::Units,
    Strategy::Numeric,
];

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Colon => "colon",
            Strategy::CompactHourMinute => "compact-hour-minute",
            Strategy::Units => "units",
            Strategy::Numeric => "numeric",
        }
    }

    /// Whether the text plausibly has this strategy's shape.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Strategy::Colon => COLON.is_match(value),
            Strategy::CompactHourMinute => COMPACT_HOUR_MINUTE.is_match(value),
            Strategy::Units => HOUR_TOKENS.is_match(value) || MINUTE_TOKENS.is_match(value),
            Strategy::Numeric => BARE_NUMBER.is_match(&strip_whitespace(value)),
        }
    }

    /// Extract a minute count, or `None` when the captured numbers are unusable.
    pub fn parse(&self, value: &str) -> Option<u64> {
        match self {
            Strategy::Colon => parse_hours_and_minutes(&COLON, value),
            Strategy::CompactHourMinute => parse_hours_and_minutes(&COMPACT_HOUR_MINUTE, value),
            Strategy::Units => parse_units(value),
            Strategy::Numeric => parse_decimal(&strip_whitespace(value)).map(round_minutes),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn parse_hours_and_minutes(pattern: &Regex, value: &str) -> Option<u64> {
    let captures = pattern.captures(value)?;
    let hours = parse_decimal(captures.get(1)?.as_str())?;
    let minutes = parse_decimal(captures.get(2)?.as_str())?;
    Some(round_minutes(hours * 60.0 + minutes))
}

fn parse_units(value: &str) -> Option<u64> {
    let mut total = 0.0;
    let mut matched = false;

    for (pattern, multiplier) in [(&*HOUR_TOKENS, 60.0), (&*MINUTE_TOKENS, 1.0)] {
        for captures in pattern.captures_iter(value) {
            if let Some(amount) = captures.get(1).and_then(|m| parse_decimal(m.as_str())) {
                matched = true;
                total += amount * multiplier;
            }
        }
    }

    matched.then(|| round_minutes(total))
}

fn strip_whitespace(value: &str) -> String {
    value.chars().filter(|&c| !is_separator(c)).collect()
}

/// Round once, at the end of a strategy. Saturates at `u64::MAX`.
fn round_minutes(total: f64) -> u64 {
    total.round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_order() {
        assert_eq!(
            STRATEGIES,
            [
                Strategy::Colon,
                Strategy::CompactHourMinute,
                Strategy::Units,
                Strategy::Numeric
            ]
        );
    }

    #[test]
    fn test_colon() {
        assert!(Strategy::Colon.matches("1:30"));
        assert!(Strategy::Colon.matches("cerca de 1 : 30"));
        assert!(!Strategy::Colon.matches("90 min"));
        assert_eq!(Strategy::Colon.parse("1:30"), Some(90));
        assert_eq!(Strategy::Colon.parse("0:45"), Some(45));
        assert_eq!(Strategy::Colon.parse("12:05"), Some(725));
    }

    #[test]
    fn test_colon_takes_at_most_two_digits() {
        // Unanchored: "123:456" is read as "23:45".
        assert_eq!(Strategy::Colon.parse("123:456"), Some(23 * 60 + 45));
    }

    #[test]
    fn test_compact_hour_minute() {
        assert!(Strategy::CompactHourMinute.matches("1h30"));
        assert!(Strategy::CompactHourMinute.matches("1h30min"));
        assert!(Strategy::CompactHourMinute.matches("2 horas 15 minutos"));
        assert_eq!(Strategy::CompactHourMinute.parse("1h30"), Some(90));
        assert_eq!(Strategy::CompactHourMinute.parse("1h30min"), Some(90));
        assert_eq!(Strategy::CompactHourMinute.parse("1,5h 10"), Some(100));
    }

    #[test]
    fn test_compact_requires_minute_numeral() {
        assert!(!Strategy::CompactHourMinute.matches("2h"));
        assert!(!Strategy::CompactHourMinute.matches("1.5 horas"));
        assert!(!Strategy::CompactHourMinute.matches("2hrs 30min"));
    }

    #[test]
    fn test_units_accumulate() {
        assert_eq!(Strategy::Units.parse("2h"), Some(120));
        assert_eq!(Strategy::Units.parse("90 min"), Some(90));
        assert_eq!(Strategy::Units.parse("2hrs 30min"), Some(150));
        assert_eq!(Strategy::Units.parse("1 hora 30 minutos"), Some(90));
        assert_eq!(Strategy::Units.parse("10 min 10 min 10 min"), Some(30));
    }

    #[test]
    fn test_units_need_word_boundary() {
        // "h" glued to a digit is not an hour token on its own.
        assert!(!Strategy::Units.matches("1h30"));
        assert!(!Strategy::Units.matches("5 minhas"));
        assert_eq!(Strategy::Units.parse("abc"), None);
    }

    #[test]
    fn test_units_round_once_at_the_end() {
        // 0.4 + 0.4 would round to 0 + 0 per term.
        assert_eq!(Strategy::Units.parse("0,4 min 0,4 min"), Some(1));
    }

    #[test]
    fn test_numeric() {
        assert!(Strategy::Numeric.matches("90"));
        assert!(Strategy::Numeric.matches("1 000"));
        assert!(!Strategy::Numeric.matches("90 min"));
        assert_eq!(Strategy::Numeric.parse("45"), Some(45));
        assert_eq!(Strategy::Numeric.parse("1 000"), Some(1000));
        assert_eq!(Strategy::Numeric.parse("2,6"), Some(3));
    }

    #[test]
    fn test_display_uses_name() {
        assert_eq!(Strategy::CompactHourMinute.to_string(), "compact-hour-minute");
    }
}
