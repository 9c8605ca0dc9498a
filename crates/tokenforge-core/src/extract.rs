//! Parameter extraction from free-text program descriptions.
//!
//! A prompt like "Create a staking program named gem_vault with 8% APR and a
//! 30 day lockup" is scanned with a fixed set of patterns. Each pattern is an
//! independent rule; a rule that finds nothing leaves the field at its default
//! (see [`ParameterRecord::default`]). Extraction never fails.
//!
//! # Rules
//!
//! 1. Program name: `program|contract [named|called] <identifier>`
//! 2. Quantities: `N% APR`, `N <unit> lockup`, `N% penalty`, `rewards vest over N <unit>`
//! 3. Feature flags: phrase presence only, independent of rule 2
//! 4. Category flags: substring tests, not mutually exclusive
//! 5. Token metadata: supply, display name, symbol (fungible tokens only)
//!
//! Patterns are case-insensitive and run against the original text so values
//! keep their casing; substring tests run against a lower-cased copy.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use crate::model::ParameterRecord;
use crate::units::{
    DurationUnit, decimal_duration_seconds, magnitude_zeros, percent_to_basis_points,
    pluralize_decimal, scale_decimal,
};

const UNIT: &str = r"(minutes?|mins?|hours?|hrs?|days?|weeks?|wks?|months?|mos?|years?|yrs?)";
/// Decimal literal. Matching starts at the first digit or the point, never mid-number.
const NUMBER: &str = r"(\d+(?:\.\d+)?|\.\d+)";

/// Words that follow "program"/"contract" in ordinary sentences and are never names.
const NOT_A_NAME: &[&str] = &[
    "a", "allows", "an", "and", "are", "by", "called", "can", "for", "in", "is", "it", "lets",
    "named", "of", "on", "should", "so", "that", "the", "to", "using", "where", "which", "will",
    "with",
];

/// Words that can follow "rewards in" / "symbol" without being a ticker.
const NOT_A_SYMBOL: &[&str] = &[
    "a", "an", "form", "is", "kind", "of", "the", "token", "tokens",
];

const PENALTY_PHRASES: &[&str] = &[
    "early withdrawal",
    "early-withdrawal",
    "withdrawal penalty",
    "penalty for early",
    "early unstaking",
];

const REWARD_VESTING_PHRASES: &[&str] = &[
    "rewards vest",
    "reward vesting",
    "rewards vesting",
    "vested rewards",
    "vesting rewards",
    "rewards are vested",
];

/// Strict and reserved keywords, which cannot name a generated module.
const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "static", "struct", "super", "trait", "true", "try", "type", "typeof",
    "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

const STAKING_KEYWORDS: &[&str] = &["stak"];

const FUNGIBLE_KEYWORDS: &[&str] = &[
    "fungible",
    "mint",
    "supply",
    "spl token",
    "token named",
    "token called",
    "create a token",
    "new token",
];

const VESTING_KEYWORDS: &[&str] = &["vest"];

// ── Patterns ──

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern {pattern:?}: {e}"))
}

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r#"(?i)\b(?:program|contract)\b\s*(?:(?:named|called)\s+)?(?:"([^"]+)"|'([^']+)'|`([^`]+)`|([A-Za-z0-9_][A-Za-z0-9_-]*))"#,
    )
});

static APR_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"(?i){NUMBER}\s*%\s*(?:annual\s+)?(?:apr|apy)\b")));

static APR_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i)\b(?:apr|apy)\s*(?:of|:|=|is)?\s*{NUMBER}\s*%"
    ))
});

static LOCKUP_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i){NUMBER}\s*-?\s*{UNIT}\b\s*(?:lock[\s-]?up|locked|lock)"
    ))
});

static LOCKUP_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i)\block(?:[\s-]?up|ed)?\s*(?:period\s*)?(?:of|:|for)?\s*{NUMBER}\s*-?\s*{UNIT}\b"
    ))
});

static PENALTY_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i){NUMBER}\s*%\s*(?:early[\s-]?(?:withdrawal|unstaking|exit)\s+)?penalty"
    ))
});

static PENALTY_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"(?i)\bpenalty\s*(?:of|:|=)?\s*{NUMBER}\s*%")));

static REWARD_VESTING_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i)\brewards?\s+(?:are\s+)?(?:vest(?:s|ed|ing)?|unlock(?:s|ed)?)\s*(?:linearly\s+)?(?:over|for|across)?\s*{NUMBER}\s*-?\s*{UNIT}\b"
    ))
});

static REWARD_SYMBOL_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)\brewards?\s+(?:are\s+)?(?:paid\s+)?in\s+\$?([A-Za-z][A-Za-z0-9]{1,9})\b")
});

static SUPPLY_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"(?i)\b(?:total\s+|max(?:imum)?\s+)?supply\s*(?:of|:|=|is)?\s*(\d[\d,_]*(?:\.\d+)?)\s*(thousand|million|billion|trillion|k|m|b|t)?\b",
    )
});

static SUPPLY_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"(?i)(\d[\d,_]*(?:\.\d+)?)\s*(thousand|million|billion|trillion|k|m|b|t)?\s+(?:total\s+)?(?:tokens|supply|coins)\b",
    )
});

static DISPLAY_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r#"(?i)\b(?:token|coin)\s+(?:named|called)\s+(?:"([^"]+)"|'([^']+)'|([A-Za-z][A-Za-z0-9]*))"#,
    )
});

static SYMBOL_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r#"(?i)\b(?:symbol|ticker)\s*(?:of|:|=|is)?\s*["'$]?([A-Za-z0-9]{1,10})\b"#)
});

static SYMBOL_PAREN_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\(\s*\$?([A-Za-z][A-Za-z0-9]{0,9})\s*\)"));

static SYMBOL_DOLLAR_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\$([A-Za-z][A-Za-z0-9]{1,9})\b"));

static CLIFF_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"(?i){NUMBER}\s*-?\s*{UNIT}\b\s*cliff")));

static CLIFF_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i)\bcliff\s*(?:period\s*)?(?:of|:|for)?\s*{NUMBER}\s*-?\s*{UNIT}\b"
    ))
});

// ── Public API ──

/// Extract a [`ParameterRecord`] from prompt text.
///
/// Total over all inputs: empty, whitespace-only, or unrelated text yields
/// [`ParameterRecord::default`].
pub fn extract(prompt: &str) -> ParameterRecord {
    let lower = prompt.to_lowercase();
    let mut record = ParameterRecord::default();

    // Name first; later stages may mention it in messages.
    if let Some(name) = program_name(prompt) {
        record.program_name = name;
    }

    record.apr_basis_points = apr_basis_points(prompt).unwrap_or(0);
    record.lockup_duration_seconds = lockup_seconds(prompt).unwrap_or(0);
    record.early_withdrawal_penalty_basis_points = penalty_basis_points(prompt).unwrap_or(0);
    record.reward_vesting_duration_seconds = reward_vesting_seconds(prompt).unwrap_or(0);

    // Presence flags do not depend on the numeric rules above.
    record.has_early_withdrawal_penalty = contains_any(&lower, PENALTY_PHRASES);
    record.has_reward_vesting = contains_any(&lower, REWARD_VESTING_PHRASES);

    record.is_staking = contains_any(&lower, STAKING_KEYWORDS);
    record.is_fungible_token = contains_any(&lower, FUNGIBLE_KEYWORDS);
    record.is_vesting = contains_any(&lower, VESTING_KEYWORDS);

    if let Some(symbol) = reward_token_symbol(prompt) {
        record.reward_token_symbol = symbol;
    }
    if let Some(cliff) = vesting_cliff(prompt) {
        record.vesting_cliff = cliff;
    }

    if record.is_fungible_token {
        if let Some(supply) = supply(prompt) {
            record.supply = supply;
        }
        if let Some(name) = token_display_name(prompt) {
            record.token_display_name = name;
        }
        if let Some(symbol) = token_symbol(prompt) {
            record.token_symbol = symbol;
        }
    }

    debug!(
        program = %record.program_name,
        apr_bps = record.apr_basis_points,
        lockup_secs = record.lockup_duration_seconds,
        staking = record.is_staking,
        fungible = record.is_fungible_token,
        vesting = record.is_vesting,
        "extracted prompt parameters"
    );

    record
}

/// Turn arbitrary text into a lowercase identifier.
///
/// Whitespace runs and hyphens become `_`, other non-identifier characters are
/// dropped, and a leading digit or a Rust keyword gets a `_` prefix. Returns
/// `None` when nothing usable remains.
pub fn sanitize_identifier(raw: &str) -> Option<String> {
    let joined = raw
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase();

    let mut ident: String = joined
        .chars()
        .map(|c| if c == '-' { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();

    if ident.is_empty() || ident.chars().all(|c| c == '_') {
        return None;
    }
    if ident.starts_with(|c: char| c.is_ascii_digit())
        || RUST_KEYWORDS.contains(&ident.as_str())
    {
        ident.insert(0, '_');
    }
    Some(ident)
}

// ── Rules ──

fn program_name(prompt: &str) -> Option<String> {
    NAME_RE.captures_iter(prompt).find_map(|caps| {
        let raw = first_group(&caps)?;
        if NOT_A_NAME.contains(&raw.to_lowercase().as_str()) {
            return None;
        }
        sanitize_identifier(raw)
    })
}

fn apr_basis_points(prompt: &str) -> Option<u64> {
    APR_RE
        .captures(prompt)
        .or_else(|| APR_PREFIX_RE.captures(prompt))
        .map(|caps| percent_to_basis_points(&caps[1]))
}

fn lockup_seconds(prompt: &str) -> Option<u64> {
    LOCKUP_RE
        .captures(prompt)
        .or_else(|| LOCKUP_PREFIX_RE.captures(prompt))
        .and_then(|caps| duration_from(&caps))
}

fn penalty_basis_points(prompt: &str) -> Option<u64> {
    PENALTY_RE
        .captures(prompt)
        .or_else(|| PENALTY_PREFIX_RE.captures(prompt))
        .map(|caps| percent_to_basis_points(&caps[1]))
}

fn reward_vesting_seconds(prompt: &str) -> Option<u64> {
    REWARD_VESTING_RE
        .captures(prompt)
        .and_then(|caps| duration_from(&caps))
}

fn reward_token_symbol(prompt: &str) -> Option<String> {
    REWARD_SYMBOL_RE
        .captures_iter(prompt)
        .find_map(|caps| ticker(&caps[1]))
}

fn vesting_cliff(prompt: &str) -> Option<String> {
    let caps = CLIFF_RE
        .captures(prompt)
        .or_else(|| CLIFF_PREFIX_RE.captures(prompt))?;
    let unit = DurationUnit::from_word(&caps[2])?;
    Some(pluralize_decimal(&caps[1], unit))
}

fn supply(prompt: &str) -> Option<String> {
    let caps = SUPPLY_RE
        .captures(prompt)
        .or_else(|| SUPPLY_SUFFIX_RE.captures(prompt))?;
    let zeros = caps.get(2).map_or(0, |m| magnitude_zeros(m.as_str()));
    Some(scale_decimal(&caps[1], zeros))
}

fn token_display_name(prompt: &str) -> Option<String> {
    DISPLAY_NAME_RE.captures_iter(prompt).find_map(|caps| {
        let raw = first_group(&caps)?.trim();
        if raw.is_empty() || NOT_A_NAME.contains(&raw.to_lowercase().as_str()) {
            return None;
        }
        Some(raw.to_string())
    })
}

fn token_symbol(prompt: &str) -> Option<String> {
    SYMBOL_RE
        .captures_iter(prompt)
        .find_map(|caps| ticker(&caps[1]))
        .or_else(|| {
            SYMBOL_PAREN_RE
                .captures_iter(prompt)
                .find_map(|caps| ticker(&caps[1]))
        })
        .or_else(|| {
            SYMBOL_DOLLAR_RE
                .captures_iter(prompt)
                .find_map(|caps| ticker(&caps[1]))
        })
}

// ── Helpers ──

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// First participating capture group (patterns alternate quoted and bare forms).
fn first_group<'h>(caps: &Captures<'h>) -> Option<&'h str> {
    caps.iter().skip(1).flatten().next().map(|m| m.as_str())
}

/// `(amount, unit)` capture pair to seconds.
fn duration_from(caps: &Captures<'_>) -> Option<u64> {
    let unit = DurationUnit::from_word(&caps[2])?;
    Some(decimal_duration_seconds(&caps[1], unit))
}

fn ticker(raw: &str) -> Option<String> {
    if NOT_A_SYMBOL.contains(&raw.to_lowercase().as_str()) {
        return None;
    }
    Some(raw.to_uppercase())
}
