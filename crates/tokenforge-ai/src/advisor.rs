//! Heuristic feedback on "AI capability" instructions.
//!
//! The advisor steers a user from "add AI" toward something a generator can
//! act on ("monitor whale wallets and adjust the reward rate when..."). It is
//! an ordered rule table: each rule is a predicate plus a message builder, and
//! the first rule whose predicate holds decides the result. Several predicates
//! overlap, so the order in [`RULES`] is part of the behaviour.
//!
//! Lengths are character counts of the trimmed text; keyword tests are
//! case-insensitive substring checks.
//!
//! The thresholds are exact. Success needs at least 75 characters, so
//! "AI to analyze transaction patterns for anomalies using a price oracle"
//! (69 characters) is a good start, not a success. That example is often
//! quoted as successful; keep the bound at 75 regardless.

use tokenforge_core::{Feedback, Segment};
use tracing::debug;

/// Verbs that make an instruction actionable, in suggestion order.
pub const ACTION_VERBS: &[&str] = &[
    "predict",
    "analyze",
    "monitor",
    "adjust",
    "integrate",
    "automate",
    "optimize",
    "detect",
    "manage",
    "control",
    "identify",
    "recommend",
    "generate",
    "learn",
    "suggest",
    "forecast",
];

/// Phrases that ask for "AI" without saying what it should do.
pub const GENERIC_PHRASES: &[&str] = &[
    "add ai",
    "use ai",
    "ai integration",
    "integrate ai",
    "ai features",
    "ai-powered",
    "ai powered",
    "make it smart",
    "smart ai",
    "with ai",
];

pub const SUCCESS_MESSAGE: &str = "Great! This capability is specific and actionable.";

const BRIEF_MAX: usize = 20;
const VAGUE_MAX: usize = 70;
const MISSING_VERB_MIN: usize = 20;
const GOOD_START_MIN: usize = 25;
const DETAILED_MIN: usize = 75;

/// Which advisor rule produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleId {
    Empty,
    TooBrief,
    TooVague,
    MissingVerb,
    EnhanceCapabilities,
    MarketDataSource,
    UserBehaviorData,
    GoodStart,
    Detailed,
    NeedsDetail,
}

impl RuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::TooBrief => "too-brief",
            Self::TooVague => "too-vague",
            Self::MissingVerb => "missing-verb",
            Self::EnhanceCapabilities => "enhance-capabilities",
            Self::MarketDataSource => "market-data-source",
            Self::UserBehaviorData => "user-behavior-data",
            Self::GoodStart => "good-start",
            Self::Detailed => "detailed",
            Self::NeedsDetail => "needs-detail",
        }
    }
}

/// Pre-computed facts about an instruction, shared by every rule.
pub struct Instruction {
    lower: String,
    len: usize,
    has_whitespace: bool,
    verb: Option<&'static str>,
}

impl Instruction {
    pub fn new(text: &str) -> Self {
        let trimmed = text.trim();
        let lower = trimmed.to_lowercase();
        let verb = ACTION_VERBS.iter().copied().find(|v| lower.contains(v));
        Self {
            len: trimmed.chars().count(),
            has_whitespace: trimmed.chars().any(char::is_whitespace),
            verb,
            lower,
        }
    }

    /// Character count of the trimmed text.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// First verb of [`ACTION_VERBS`] contained in the text.
    pub fn verb(&self) -> Option<&'static str> {
        self.verb
    }

    fn mentions(&self, needle: &str) -> bool {
        self.lower.contains(needle)
    }

    fn mentions_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.lower.contains(n))
    }
}

/// One entry of the rule table.
pub struct Rule {
    pub id: RuleId,
    pub applies: fn(&Instruction) -> bool,
    pub build: fn(&Instruction) -> Option<Feedback>,
}

/// Advisor rules in priority order. The last rule always applies.
pub const RULES: &[Rule] = &[
    Rule {
        id: RuleId::Empty,
        applies: |i| i.is_empty(),
        build: |_| None,
    },
    Rule {
        id: RuleId::TooBrief,
        applies: |i| i.len < BRIEF_MAX && !i.has_whitespace,
        build: |_| Some(too_brief()),
    },
    Rule {
        id: RuleId::TooVague,
        applies: |i| i.mentions_any(GENERIC_PHRASES) && i.len < VAGUE_MAX && i.verb.is_none(),
        build: |_| Some(too_vague()),
    },
    Rule {
        id: RuleId::MissingVerb,
        applies: |i| i.verb.is_none() && i.len > MISSING_VERB_MIN,
        build: |_| Some(missing_verb()),
    },
    Rule {
        id: RuleId::EnhanceCapabilities,
        applies: |i| i.mentions("enhance the capabilities") && i.verb.is_none(),
        build: |_| Some(enhance_capabilities()),
    },
    Rule {
        id: RuleId::MarketDataSource,
        applies: |i| {
            i.mentions_any(&["market", "price"]) && !i.mentions_any(&["oracle", "feed", "data source"])
        },
        build: |_| Some(market_data_source()),
    },
    Rule {
        id: RuleId::UserBehaviorData,
        applies: |i| i.mentions("user behavior") && !i.mentions_any(&["data", "track", "monitor"]),
        build: |_| Some(user_behavior_data()),
    },
    Rule {
        id: RuleId::GoodStart,
        applies: |i| i.verb.is_some() && i.len > GOOD_START_MIN && i.len < DETAILED_MIN,
        build: |i| i.verb.map(good_start),
    },
    Rule {
        id: RuleId::Detailed,
        applies: |i| i.len >= DETAILED_MIN && i.verb.is_some(),
        build: |_| {
            Some(Feedback::Success {
                message: SUCCESS_MESSAGE.to_string(),
            })
        },
    },
    Rule {
        id: RuleId::NeedsDetail,
        applies: |_| true,
        build: |_| Some(needs_detail()),
    },
];

/// The rule that decides feedback for `text`.
pub fn classify(text: &str) -> RuleId {
    let instruction = Instruction::new(text);
    first_rule(&instruction).id
}

/// Feedback for a capability instruction. `None` for empty or blank text.
pub fn advise(text: &str) -> Option<Feedback> {
    let instruction = Instruction::new(text);
    let rule = first_rule(&instruction);
    debug!(
        rule = rule.id.as_str(),
        len = instruction.len,
        verb = instruction.verb.unwrap_or("-"),
        "capability feedback"
    );
    (rule.build)(&instruction)
}

fn first_rule(instruction: &Instruction) -> &'static Rule {
    RULES
        .iter()
        .find(|rule| (rule.applies)(instruction))
        .unwrap_or(&RULES[RULES.len() - 1])
}

// ── Messages ──

fn suggestion(message: Vec<Segment>) -> Feedback {
    Feedback::Suggestion { message }
}

fn too_brief() -> Feedback {
    suggestion(vec![
        Segment::plain("That is too brief to act on. Describe a task, for example "),
        Segment::action(
            "predicting price trends",
            "Use AI to predict price trends from historical market data",
        ),
        Segment::plain(" or "),
        Segment::action(
            "detecting unusual activity",
            "Use AI to detect unusual transaction activity and flag it for review",
        ),
        Segment::plain("."),
    ])
}

fn too_vague() -> Feedback {
    suggestion(vec![
        Segment::plain("\"AI\" on its own is too vague. Say what the AI should do, such as "),
        Segment::action(
            "predict price movements",
            "predict price movements from historical trading data",
        ),
        Segment::plain(", "),
        Segment::action(
            "detect suspicious transactions",
            "detect suspicious transactions and flag them for review",
        ),
        Segment::plain(", or "),
        Segment::action(
            "optimize reward rates",
            "optimize staking reward rates based on pool utilization",
        ),
        Segment::plain("."),
    ])
}

/// Lists the first three verbs of [`ACTION_VERBS`], then "optimize".
fn missing_verb() -> Feedback {
    let mut message = vec![Segment::plain(
        "Start with an action verb that says what the AI should do, such as ",
    )];
    for verb in ACTION_VERBS.iter().take(3) {
        message.push(Segment::action(*verb, format!("{verb} ")));
        message.push(Segment::plain(", "));
    }
    message.push(Segment::plain("or "));
    message.push(Segment::action("optimize", "optimize "));
    message.push(Segment::plain("."));
    suggestion(merge_text(message))
}

fn enhance_capabilities() -> Feedback {
    suggestion(vec![
        Segment::plain("Which capabilities should be enhanced? Name one, for example "),
        Segment::action("analyze trading patterns", "analyze trading patterns to "),
        Segment::plain(" or "),
        Segment::action(
            "automate reward distribution",
            "automate reward distribution based on ",
        ),
        Segment::plain("."),
    ])
}

fn market_data_source() -> Feedback {
    suggestion(vec![
        Segment::plain("Where will market data come from? Specify a source, for example "),
        Segment::action("a price oracle", " using a price oracle"),
        Segment::plain(" or "),
        Segment::action("an on-chain data feed", " using an on-chain data feed"),
        Segment::plain("."),
    ])
}

fn user_behavior_data() -> Feedback {
    suggestion(vec![
        Segment::plain("How will user behavior be observed? Try "),
        Segment::action(
            "tracking on-chain activity",
            " by tracking on-chain wallet activity",
        ),
        Segment::plain(" or "),
        Segment::action(
            "monitoring transaction history",
            " by monitoring transaction history",
        ),
        Segment::plain("."),
    ])
}

fn good_start(verb: &str) -> Feedback {
    suggestion(vec![
        Segment::plain(format!(
            "Good start with \"{verb}\". Add detail about the "
        )),
        Segment::action("inputs", " using [input data]"),
        Segment::plain(", "),
        Segment::action("outputs", " to produce [expected output]"),
        Segment::plain(", and "),
        Segment::action("context", " when [condition]"),
        Segment::plain(" to make it precise."),
    ])
}

fn needs_detail() -> Feedback {
    suggestion(vec![
        Segment::plain("Add more specific detail, for example "),
        Segment::action("what data to use", " using [data source]"),
        Segment::plain(" or "),
        Segment::action("what result to produce", " to produce [result]"),
        Segment::plain("."),
    ])
}

/// Join adjacent text segments so messages built in loops stay compact.
fn merge_text(segments: Vec<Segment>) -> Vec<Segment> {
    let mut out: Vec<Segment> = Vec::with_capacity(segments.len());
    for seg in segments {
        match (out.last_mut(), seg) {
            (Some(Segment::Text { text: prev }), Segment::Text { text }) => prev.push_str(&text),
            (_, seg) => out.push(seg),
        }
    }
    out
}
