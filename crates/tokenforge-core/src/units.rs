//! Unit normalisation for quantities found in prompt text.
//!
//! Prompts state quantities the way people talk ("8.5% APR", "30 day lockup",
//! "1.5 million tokens"). Everything here turns those fragments into the
//! integer forms carried by [`ParameterRecord`](crate::ParameterRecord):
//! basis points, seconds, and plain decimal digit strings.
//!
//! # Conventions
//!
//! - A month is 30 days and a year is 365 days.
//! - Percentages keep two fractional digits (1 bp = 0.01%); the third digit rounds.
//! - All arithmetic saturates; oversized input clamps to `u64::MAX` instead of failing.

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const WEEK: u64 = 7 * DAY;
const MONTH: u64 = 30 * DAY;
const YEAR: u64 = 365 * DAY;

/// Fractional amounts resolve to millionths of a unit.
const MICROS: u64 = 1_000_000;

/// Time unit named in a duration phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl DurationUnit {
    /// Parse a unit word, singular or plural ("day", "Days", "hrs").
    pub fn from_word(word: &str) -> Option<Self> {
        let lower = word.trim().to_ascii_lowercase();
        let singular = lower.strip_suffix('s').unwrap_or(&lower);
        match singular {
            "minute" | "min" => Some(Self::Minute),
            "hour" | "hr" => Some(Self::Hour),
            "day" => Some(Self::Day),
            "week" | "wk" => Some(Self::Week),
            "month" | "mo" => Some(Self::Month),
            "year" | "yr" => Some(Self::Year),
            _ => None,
        }
    }

    /// Length of one unit in seconds.
    pub fn seconds(self) -> u64 {
        match self {
            Self::Minute => MINUTE,
            Self::Hour => HOUR,
            Self::Day => DAY,
            Self::Week => WEEK,
            Self::Month => MONTH,
            Self::Year => YEAR,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

/// Convert `amount` units into seconds, saturating on overflow.
pub fn duration_seconds(amount: u64, unit: DurationUnit) -> u64 {
    amount.saturating_mul(unit.seconds())
}

/// Convert a decimal amount ("30", "1.5", ".5") of `unit` into whole seconds.
///
/// The fraction is kept to six digits and the result truncated, so
/// `("1.5", Year)` is 547.5 days. Non-numeric input yields 0.
pub fn decimal_duration_seconds(amount: &str, unit: DurationUnit) -> u64 {
    let Some((whole, micros)) = split_decimal(amount) else {
        return 0;
    };
    let fraction = micros * unit.seconds() / MICROS;
    duration_seconds(whole, unit).saturating_add(fraction)
}

/// Like [`pluralize`], for an amount written as a decimal literal.
///
/// Leading zeros of the integer part and trailing zeros of the fraction are
/// dropped: `"01.50"` years renders as `"1.5 years"`.
pub fn pluralize_decimal(amount: &str, unit: DurationUnit) -> String {
    let amount = amount.trim();
    let (int_part, frac_part) = amount.split_once('.').unwrap_or((amount, ""));
    let frac = frac_part.trim_end_matches('0');
    if frac.is_empty() {
        return pluralize(parse_amount(int_part), unit);
    }
    let int = int_part.trim_start_matches('0');
    let int = if int.is_empty() { "0" } else { int };
    format!("{int}.{frac} {}s", unit.as_str())
}

/// Split a decimal literal into its integer part and millionths.
fn split_decimal(s: &str) -> Option<(u64, u64)> {
    let s = s.trim();
    let (int_part, frac_part) = s.split_once('.').unwrap_or((s, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    let micros = frac_part
        .bytes()
        .chain(std::iter::repeat(b'0'))
        .take(6)
        .fold(0u64, |acc, b| acc * 10 + u64::from(b - b'0'));
    Some((digits_to_u64(int_part), micros))
}

/// Render `amount unit(s)` with a naive English plural.
pub fn pluralize(amount: u64, unit: DurationUnit) -> String {
    if amount == 1 {
        format!("1 {}", unit.as_str())
    } else {
        format!("{amount} {}s", unit.as_str())
    }
}

/// Describe a duration in the largest unit that divides it evenly.
///
/// `2592000` → `"1 month"`, `1209600` → `"2 weeks"`, `0` → `"none"`.
pub fn describe_seconds(secs: u64) -> String {
    if secs == 0 {
        return "none".to_string();
    }
    for unit in [
        DurationUnit::Year,
        DurationUnit::Month,
        DurationUnit::Week,
        DurationUnit::Day,
        DurationUnit::Hour,
        DurationUnit::Minute,
    ] {
        if secs % unit.seconds() == 0 {
            return pluralize(secs / unit.seconds(), unit);
        }
    }
    if secs == 1 {
        "1 second".to_string()
    } else {
        format!("{secs} seconds")
    }
}

/// Convert a percentage literal ("8", "8.5", "0.125") into basis points.
///
/// Parsed digit by digit so no float rounding leaks in. Anything that is not
/// a plain decimal number yields 0.
pub fn percent_to_basis_points(s: &str) -> u64 {
    let s = s.trim();
    let (int_part, frac_part) = s.split_once('.').unwrap_or((s, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return 0;
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return 0;
    }

    let whole = digits_to_u64(int_part).saturating_mul(100);

    let frac = frac_part.as_bytes();
    let digit = |i: usize| frac.get(i).map_or(0, |b| u64::from(b - b'0'));
    let mut hundredths = digit(0) * 10 + digit(1);
    // Third fractional digit rounds half up.
    if digit(2) >= 5 {
        hundredths += 1;
    }

    whole.saturating_add(hundredths)
}

/// Number of trailing zeros implied by a magnitude word ("million" → 6).
pub fn magnitude_zeros(word: &str) -> u32 {
    match word.trim().to_ascii_lowercase().as_str() {
        "k" | "thousand" => 3,
        "m" | "mm" | "million" => 6,
        "b" | "bn" | "billion" => 9,
        "t" | "trillion" => 12,
        _ => 0,
    }
}

/// Scale a human-written number by `10^zeros` and return plain decimal digits.
///
/// Digit separators (`,` and `_`) are ignored. Fractional digits shift into
/// the integer part; any left over after the shift are truncated.
///
/// `("1,000,000", 0)` → `"1000000"`, `("1.5", 6)` → `"1500000"`, `("", 0)` → `"0"`.
pub fn scale_decimal(number: &str, zeros: u32) -> String {
    let cleaned: String = number
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();
    let (int_part, frac_part) = cleaned.split_once('.').unwrap_or((&cleaned, ""));

    let mut digits: String = int_part.chars().filter(|c| c.is_ascii_digit()).collect();
    let frac: Vec<char> = frac_part.chars().filter(|c| c.is_ascii_digit()).collect();

    for i in 0..zeros as usize {
        digits.push(frac.get(i).copied().unwrap_or('0'));
    }

    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

fn digits_to_u64(s: &str) -> u64 {
    s.bytes().fold(0u64, |acc, b| {
        acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
    })
}

/// Parse a run of ASCII digits, saturating instead of overflowing.
///
/// Non-digit input yields 0.
pub fn parse_amount(s: &str) -> u64 {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    digits_to_u64(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_words() {
        assert_eq!(DurationUnit::from_word("day"), Some(DurationUnit::Day));
        assert_eq!(DurationUnit::from_word("Days"), Some(DurationUnit::Day));
        assert_eq!(DurationUnit::from_word("hrs"), Some(DurationUnit::Hour));
        assert_eq!(DurationUnit::from_word("months"), Some(DurationUnit::Month));
        assert_eq!(DurationUnit::from_word("fortnight"), None);
    }

    #[test]
    fn unit_multipliers() {
        assert_eq!(duration_seconds(30, DurationUnit::Day), 30 * 86_400);
        assert_eq!(duration_seconds(1, DurationUnit::Month), 30 * 86_400);
        assert_eq!(duration_seconds(1, DurationUnit::Year), 365 * 86_400);
        assert_eq!(duration_seconds(2, DurationUnit::Hour), 7_200);
        assert_eq!(duration_seconds(5, DurationUnit::Minute), 300);
    }

    #[test]
    fn duration_saturates() {
        assert_eq!(duration_seconds(u64::MAX, DurationUnit::Year), u64::MAX);
    }

    #[test]
    fn decimal_durations() {
        assert_eq!(decimal_duration_seconds("30", DurationUnit::Day), 30 * DAY);
        assert_eq!(decimal_duration_seconds("1.5", DurationUnit::Year), YEAR + YEAR / 2);
        assert_eq!(decimal_duration_seconds("0.5", DurationUnit::Month), 15 * DAY);
        assert_eq!(decimal_duration_seconds(".5", DurationUnit::Day), 12 * HOUR);
        assert_eq!(decimal_duration_seconds("2.25", DurationUnit::Hour), 2 * HOUR + 15 * MINUTE);
        assert_eq!(decimal_duration_seconds("", DurationUnit::Day), 0);
        assert_eq!(decimal_duration_seconds("1.x", DurationUnit::Day), 0);
        assert_eq!(
            decimal_duration_seconds("99999999999999999999.5", DurationUnit::Year),
            u64::MAX
        );
    }

    #[test]
    fn decimal_plurals() {
        assert_eq!(pluralize_decimal("1", DurationUnit::Year), "1 year");
        assert_eq!(pluralize_decimal("1.0", DurationUnit::Year), "1 year");
        assert_eq!(pluralize_decimal("01.50", DurationUnit::Year), "1.5 years");
        assert_eq!(pluralize_decimal(".5", DurationUnit::Month), "0.5 months");
        assert_eq!(pluralize_decimal("6", DurationUnit::Month), "6 months");
    }

    #[test]
    fn describe_picks_largest_even_unit() {
        assert_eq!(describe_seconds(0), "none");
        assert_eq!(describe_seconds(30 * 86_400), "1 month");
        assert_eq!(describe_seconds(365 * 86_400), "1 year");
        assert_eq!(describe_seconds(14 * 86_400), "2 weeks");
        assert_eq!(describe_seconds(3 * 86_400), "3 days");
        assert_eq!(describe_seconds(90), "90 seconds");
    }

    #[test]
    fn percent_exact_values() {
        assert_eq!(percent_to_basis_points("8"), 800);
        assert_eq!(percent_to_basis_points("8.5"), 850);
        assert_eq!(percent_to_basis_points("0.25"), 25);
        assert_eq!(percent_to_basis_points("12.345"), 1235);
        assert_eq!(percent_to_basis_points(".5"), 50);
        assert_eq!(percent_to_basis_points("100"), 10_000);
    }

    #[test]
    fn percent_rejects_garbage() {
        assert_eq!(percent_to_basis_points(""), 0);
        assert_eq!(percent_to_basis_points("."), 0);
        assert_eq!(percent_to_basis_points("eight"), 0);
        assert_eq!(percent_to_basis_points("8%"), 0);
    }

    #[test]
    fn percent_saturates() {
        assert_eq!(percent_to_basis_points("99999999999999999999999"), u64::MAX);
    }

    #[test]
    fn magnitude_words() {
        assert_eq!(magnitude_zeros("K"), 3);
        assert_eq!(magnitude_zeros("million"), 6);
        assert_eq!(magnitude_zeros("B"), 9);
        assert_eq!(magnitude_zeros("tokens"), 0);
    }

    #[test]
    fn scale_exact_values() {
        assert_eq!(scale_decimal("1,000,000", 0), "1000000");
        assert_eq!(scale_decimal("1_000", 0), "1000");
        assert_eq!(scale_decimal("1.5", 6), "1500000");
        assert_eq!(scale_decimal("21", 6), "21000000");
        assert_eq!(scale_decimal("0.5", 3), "500");
        assert_eq!(scale_decimal("1.23456", 3), "1234");
    }

    #[test]
    fn scale_degenerate_input() {
        assert_eq!(scale_decimal("", 0), "0");
        assert_eq!(scale_decimal("000", 0), "0");
        assert_eq!(scale_decimal("007", 0), "7");
    }

    #[test]
    fn amounts() {
        assert_eq!(parse_amount("30"), 30);
        assert_eq!(parse_amount(" 6 "), 6);
        assert_eq!(parse_amount("x"), 0);
        assert_eq!(parse_amount("99999999999999999999999"), u64::MAX);
    }
}
