//! Shared records passed between the extractor, the synthesizer, the advisor,
//! and whatever UI consumes them.
//!
//! Every record is built fresh per call and never mutated afterwards. Field
//! names serialise as camelCase for JSON consumers.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PROGRAM_NAME: &str = "my_program";
pub const DEFAULT_REWARD_TOKEN_SYMBOL: &str = "RWRD";
pub const DEFAULT_SUPPLY: &str = "1000000000";
pub const DEFAULT_TOKEN_DISPLAY_NAME: &str = "My Token";
pub const DEFAULT_TOKEN_SYMBOL: &str = "MTK";
pub const VESTING_CLIFF_UNSPECIFIED: &str = "not specified";

/// Parameters pulled out of a natural-language prompt.
///
/// Produced by [`extract`](crate::extract). Every field has a default, so a
/// prompt that matches nothing still yields a complete record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterRecord {
    pub program_name: String,
    pub apr_basis_points: u64,
    pub lockup_duration_seconds: u64,
    pub early_withdrawal_penalty_basis_points: u64,
    /// Set from phrase presence alone; may be true while the value above is 0.
    pub has_early_withdrawal_penalty: bool,
    pub reward_vesting_duration_seconds: u64,
    /// Set from phrase presence alone; may be true while the value above is 0.
    pub has_reward_vesting: bool,
    pub reward_token_symbol: String,
    pub is_staking: bool,
    pub is_fungible_token: bool,
    pub is_vesting: bool,
    /// Decimal digits, no separators.
    pub supply: String,
    pub token_display_name: String,
    pub token_symbol: String,
    pub vesting_cliff: String,
}

impl Default for ParameterRecord {
    fn default() -> Self {
        Self {
            program_name: DEFAULT_PROGRAM_NAME.to_string(),
            apr_basis_points: 0,
            lockup_duration_seconds: 0,
            early_withdrawal_penalty_basis_points: 0,
            has_early_withdrawal_penalty: false,
            reward_vesting_duration_seconds: 0,
            has_reward_vesting: false,
            reward_token_symbol: DEFAULT_REWARD_TOKEN_SYMBOL.to_string(),
            is_staking: false,
            is_fungible_token: false,
            is_vesting: false,
            supply: DEFAULT_SUPPLY.to_string(),
            token_display_name: DEFAULT_TOKEN_DISPLAY_NAME.to_string(),
            token_symbol: DEFAULT_TOKEN_SYMBOL.to_string(),
            vesting_cliff: VESTING_CLIFF_UNSPECIFIED.to_string(),
        }
    }
}

/// A generated program plus the metadata shown alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub file_name: String,
    pub full_source_text: String,
    pub program_name: String,
    /// Absent for chains that only get the echo artifact.
    pub logic_breakdown: Option<LogicBreakdown>,
    /// Absent for chains that only get the echo artifact.
    pub tokenomics: Option<TokenomicsSummary>,
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogicBreakdown {
    pub purpose: String,
    pub components: Vec<Component>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenomicsSummary {
    pub name: String,
    pub symbol: String,
    pub supply: String,
    pub rules: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

/// Advisor verdict on a capability instruction.
///
/// Empty input produces no feedback at all, so callers hold an
/// `Option<Feedback>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Feedback {
    Success { message: String },
    Suggestion { message: Vec<Segment> },
}

impl Feedback {
    /// The message as a single sentence, with action segments shown as their text.
    pub fn rendered(&self) -> String {
        match self {
            Self::Success { message } => message.clone(),
            Self::Suggestion { message } => message.iter().map(Segment::text).collect(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Action segments in message order as `(text, insertion)` pairs.
    pub fn actions(&self) -> Vec<(&str, &str)> {
        match self {
            Self::Success { .. } => Vec::new(),
            Self::Suggestion { message } => message
                .iter()
                .filter_map(|seg| match seg {
                    Segment::Action { text, insertion } => {
                        Some((text.as_str(), insertion.as_str()))
                    }
                    Segment::Text { .. } => None,
                })
                .collect(),
        }
    }
}

/// One piece of a suggestion message.
///
/// `Action` segments are clickable: activating one splices `insertion` into
/// the user's working text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Segment {
    Text { text: String },
    Action { text: String, insertion: String },
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Self::Text { text } | Self::Action { text, .. } => text.as_str(),
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn action(text: impl Into<String>, insertion: impl Into<String>) -> Self {
        Self::Action {
            text: text.into(),
            insertion: insertion.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_is_fully_populated() {
        let r = ParameterRecord::default();
        assert_eq!(r.program_name, "my_program");
        assert_eq!(r.reward_token_symbol, "RWRD");
        assert_eq!(r.vesting_cliff, "not specified");
        assert!(!r.supply.is_empty());
        assert_eq!(r.apr_basis_points, 0);
    }

    #[test]
    fn record_serialises_camel_case() {
        let json = serde_json::to_value(ParameterRecord::default()).unwrap();
        assert_eq!(json["programName"], "my_program");
        assert_eq!(json["aprBasisPoints"], 0);
        assert_eq!(json["hasEarlyWithdrawalPenalty"], false);
    }

    #[test]
    fn rendered_concatenates_segments() {
        let fb = Feedback::Suggestion {
            message: vec![
                Segment::plain("Try "),
                Segment::action("predicting prices", "predict prices"),
                Segment::plain("."),
            ],
        };
        assert_eq!(fb.rendered(), "Try predicting prices.");
        assert_eq!(fb.actions(), vec![("predicting prices", "predict prices")]);
        assert!(!fb.is_success());
    }

    #[test]
    fn segments_are_tagged() {
        let json = serde_json::to_value(Segment::action("a", "b")).unwrap();
        assert_eq!(json["type"], "action");
        assert_eq!(json["insertion"], "b");

        let json = serde_json::to_value(Feedback::Success {
            message: "ok".into(),
        })
        .unwrap();
        assert_eq!(json["kind"], "success");
    }

    #[test]
    fn severity_orders_by_urgency() {
        assert!(Severity::Critical > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
        assert_eq!(Severity::Critical.as_str(), "critical");
    }
}
