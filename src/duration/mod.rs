//! Recipe duration normalization.
//!
//! Turns free-text preparation times ("1h30", "90 min", "1:30",
//! "1 hora e 30 minutos") into whole minutes. Unreadable text is not an
//! error: it resolves to `None`, the same as absent text.

mod bucket;
mod normalize;
mod strategy;

pub use bucket::*;
pub use normalize::{normalize_input, parse_decimal};
pub use strategy::{Strategy, STRATEGIES};

use tracing::trace;

/// Minutes resolved from a duration string, with the rule that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub minutes: u64,
    pub strategy: Strategy,
}

/// Resolve duration text, reporting which strategy succeeded.
pub fn resolve_duration(value: &str) -> Option<Resolution> {
    let normalized = normalize_input(value);
    if normalized.is_empty() {
        return None;
    }

    STRATEGIES.iter().find_map(|&strategy| {
        if !strategy.matches(&normalized) {
            return None;
        }
        let minutes = strategy.parse(&normalized);
        if minutes.is_none() {
            trace!(input = %normalized, %strategy, "strategy matched but did not parse");
        }
        minutes.map(|minutes| Resolution { minutes, strategy })
    })
}

/// Convert an optional duration string into whole minutes.
///
/// Totals too large for a `u64` saturate at `u64::MAX`.
pub fn parse_duration_to_minutes(value: Option<&str>) -> Option<u64> {
    resolve_duration(value?).map(|resolution| resolution.minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minutes(value: &str) -> Option<u64> {
        parse_duration_to_minutes(Some(value))
    }

    #[test]
    fn test_absent_and_blank_inputs() {
        assert_eq!(parse_duration_to_minutes(None), None);
        assert_eq!(minutes(""), None);
        assert_eq!(minutes("   "), None);
        assert_eq!(minutes("\t\n"), None);
    }

    #[test]
    fn test_colon_notation() {
        assert_eq!(minutes("1:30"), Some(90));
        assert_eq!(minutes("0:45"), Some(45));
        assert_eq!(minutes("12:05"), Some(725));
    }

    #[test]
    fn test_compact_notation() {
        assert_eq!(minutes("1h30"), Some(90));
        assert_eq!(minutes("1h30min"), Some(90));
        assert_eq!(minutes("1H 30 MIN"), Some(90));
    }

    #[test]
    fn test_hour_only_goes_to_units() {
        assert_eq!(minutes("2h"), Some(120));
        assert_eq!(
            resolve_duration("2h").map(|r| r.strategy),
            Some(Strategy::Units)
        );
    }

    #[test]
    fn test_unit_suffixes() {
        assert_eq!(minutes("90"), Some(90));
        assert_eq!(minutes("90 min"), Some(90));
        assert_eq!(minutes("1.5 horas"), Some(90));
        assert_eq!(minutes("1,5 horas"), Some(90));
        assert_eq!(minutes("1,25 horas"), Some(75));
        assert_eq!(minutes("45 minutos"), Some(45));
    }

    #[test]
    fn test_accented_and_conjunction_input() {
        assert_eq!(minutes("1 hora e 30 minutos"), Some(90));
        assert_eq!(minutes("1 HÓRA E 30 MINÚTOS"), Some(90));
        assert_eq!(minutes("2 horas e 15 min"), Some(135));
    }

    #[test]
    fn test_unparseable_input() {
        assert_eq!(minutes("abc"), None);
        assert_eq!(minutes("uma hora"), None);
        assert_eq!(minutes("rapidinho"), None);
    }

    #[test]
    fn test_repeated_calls_agree() {
        for input in ["abc", "", "   ", "1h30", "1 hora e 30 minutos", "90"] {
            assert_eq!(minutes(input), minutes(input));
        }
    }

    #[test]
    fn test_colon_wins_over_later_strategies() {
        // The unit rule alone would read "30 h" as 1800 minutes.
        let resolution = resolve_duration("1:30 h").expect("colon input resolves");
        assert_eq!(resolution.strategy, Strategy::Colon);
        assert_eq!(resolution.minutes, 90);
    }

    #[test]
    fn test_compact_match_without_valid_numbers_falls_through() {
        // The hour numeral overflows to infinity, so the compact rule claims
        // the text but cannot parse it; the unit rule picks up "20 min".
        let input = format!("{}h5 e 20 min", "9".repeat(400));
        let normalized = normalize_input(&input);
        assert!(Strategy::CompactHourMinute.matches(&normalized));
        assert_eq!(Strategy::CompactHourMinute.parse(&normalized), None);

        let resolution = resolve_duration(&input).expect("falls through to units");
        assert_eq!(resolution.strategy, Strategy::Units);
        assert_eq!(resolution.minutes, 20);
    }

    #[test]
    fn test_byte_order_mark_counts_as_whitespace() {
        assert_eq!(minutes("\u{feff}90"), Some(90));
        assert_eq!(minutes("\u{feff}1 hora\u{feff}e 30 min\u{feff}"), Some(90));
        assert_eq!(minutes("9 0\u{feff}0"), Some(900));
        assert_eq!(minutes("\u{feff}\u{feff}"), None);
    }

    #[test]
    fn test_unit_followed_by_non_ascii_letter() {
        assert_eq!(minutes("2 hø"), Some(120));
        assert_eq!(minutes("45 minß"), Some(45));
        // An ASCII letter still glues to the unit.
        assert_eq!(minutes("45 minx"), None);
    }

    #[test]
    fn test_large_totals_are_exact() {
        assert_eq!(minutes("5000000000"), Some(5_000_000_000));
        assert_eq!(minutes("100000000 horas"), Some(6_000_000_000));
        assert_eq!(minutes(&"9".repeat(25)), Some(u64::MAX));
    }

    #[test]
    fn test_rounds_to_nearest_minute() {
        assert_eq!(minutes("0,5 min"), Some(1));
        assert_eq!(minutes("2,4"), Some(2));
        assert_eq!(minutes("1,01 horas"), Some(61));
        assert_eq!(minutes("0:07 "), Some(7));
    }
}
