//! Markdown explanation of generated program source.
//!
//! Read-only analysis: the source is scanned for a few markers that reveal the
//! program's purpose, its `pub fn` entry points are listed with a role guessed
//! from the name, and a fixed safety checklist closes the document.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// `pub fn <name>(`, allowing generics between the name and the parenthesis.
static PUB_FN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"pub\s+fn\s+([A-Za-z_][A-Za-z0-9_]*)\s*(?:<[^>]*>)?\s*\(")
        .unwrap_or_else(|e| panic!("invalid built-in pattern: {e}"))
});

pub const SAFETY_REMINDERS: &[&str] = &[
    "Replace the placeholder program ID with your own keypair's public key before deploying.",
    "Check every account constraint: signers, ownership, and mutability.",
    "Use checked arithmetic for balances, rewards, and timestamps.",
    "Test on devnet and get an independent audit before deploying to mainnet.",
];

/// What a program appears to do, judged from markers in its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProgramPurpose {
    MintInitialization,
    Vesting,
    Staking,
    AnchorProgram,
    Unrecognized,
}

impl ProgramPurpose {
    /// First category whose markers appear in `source`.
    pub fn detect(source: &str) -> Self {
        if ["initialize_mint", "mint_to", "MintTo"]
            .iter()
            .any(|m| source.contains(m))
        {
            Self::MintInitialization
        } else if source.contains("vesting") {
            Self::Vesting
        } else if source.contains("stake") || source.contains("staking") {
            Self::Staking
        } else if source.contains("#[program]") || source.contains("anchor_lang") {
            Self::AnchorProgram
        } else {
            Self::Unrecognized
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::MintInitialization => {
                "This program creates a token mint and issues tokens into holder accounts."
            }
            Self::Vesting => {
                "This program manages a vesting schedule that releases tokens to beneficiaries over time."
            }
            Self::Staking => {
                "This program lets users stake tokens in a pool and earn rewards for the time they stay locked."
            }
            Self::AnchorProgram => {
                "This is an Anchor program for Solana. Its instructions are listed below."
            }
            Self::Unrecognized => {
                "The purpose of this code could not be determined from its contents."
            }
        }
    }
}

/// Role of one public function, guessed from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FunctionRole {
    Initialize,
    Mint,
    Transfer,
    Withdraw,
    Stake,
    Claim,
    Release,
    Custom,
}

impl FunctionRole {
    /// `unstake` and `withdraw` are tested before `stake`, which they contain.
    pub fn from_name(name: &str) -> Self {
        let name = name.to_lowercase();
        let has = |needle: &str| name.contains(needle);
        if has("initialize") || has("init_") {
            Self::Initialize
        } else if has("mint") {
            Self::Mint
        } else if has("transfer") {
            Self::Transfer
        } else if has("unstake") || has("withdraw") {
            Self::Withdraw
        } else if has("stake") {
            Self::Stake
        } else if has("claim") || has("harvest") {
            Self::Claim
        } else if has("vest") || has("release") {
            Self::Release
        } else {
            Self::Custom
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Initialize => "Sets up program state and accounts.",
            Self::Mint => "Mints new tokens to a destination account.",
            Self::Transfer => "Moves tokens between accounts.",
            Self::Withdraw => "Returns staked or deposited tokens to the user.",
            Self::Stake => "Locks user tokens in the program to earn rewards.",
            Self::Claim => "Pays out accrued rewards.",
            Self::Release => "Releases tokens that have vested.",
            Self::Custom => "Custom logic; read the body to see what it does.",
        }
    }
}

/// Names of `pub fn` items in source order, first occurrence only.
pub fn public_functions(source: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for cap in PUB_FN_RE.captures_iter(source) {
        let name = &cap[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Build the markdown explanation without delay.
pub fn render(source: &str) -> String {
    let purpose = ProgramPurpose::detect(source);
    let functions = public_functions(source);
    debug!(?purpose, functions = functions.len(), "explaining source");

    let mut out = String::new();
    out.push_str("## Program Overview\n\n");
    out.push_str(purpose.description());
    out.push_str("\n\n## Functions\n\n");
    if functions.is_empty() {
        out.push_str("No public functions were found.\n");
    } else {
        for name in &functions {
            let role = FunctionRole::from_name(name);
            out.push_str(&format!("- `{name}`: {}\n", role.description()));
        }
    }
    out.push_str("\n## Safety Review\n\n");
    for reminder in SAFETY_REMINDERS {
        out.push_str(&format!("- {reminder}\n"));
    }
    out
}

/// Explanation generator with an optional simulated latency.
#[derive(Debug, Clone, Copy, Default)]
pub struct Explainer {
    latency: Duration,
}

impl Explainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    pub async fn explain(&self, source: &str) -> String {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        render(source)
    }
}

/// Explain `source` with no added latency.
pub async fn explain(source: &str) -> String {
    Explainer::new().explain(source).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn purpose_categories_in_order() {
        assert_eq!(
            ProgramPurpose::detect("token::mint_to(ctx, amount)?; // vesting"),
            ProgramPurpose::MintInitialization
        );
        assert_eq!(
            ProgramPurpose::detect("let vesting = ...; stake"),
            ProgramPurpose::Vesting
        );
        assert_eq!(
            ProgramPurpose::detect("#[program] pub fn stake()"),
            ProgramPurpose::Staking
        );
        assert_eq!(
            ProgramPurpose::detect("use anchor_lang::prelude::*;"),
            ProgramPurpose::AnchorProgram
        );
        assert_eq!(
            ProgramPurpose::detect("fn main() {}"),
            ProgramPurpose::Unrecognized
        );
        assert_eq!(ProgramPurpose::detect(""), ProgramPurpose::Unrecognized);
    }

    #[test]
    fn function_roles() {
        let cases = [
            ("initialize", FunctionRole::Initialize),
            ("init_pool", FunctionRole::Initialize),
            ("mint_tokens", FunctionRole::Mint),
            ("transfer_out", FunctionRole::Transfer),
            ("unstake", FunctionRole::Withdraw),
            ("withdraw_early", FunctionRole::Withdraw),
            ("stake", FunctionRole::Stake),
            ("claim_rewards", FunctionRole::Claim),
            ("harvest", FunctionRole::Claim),
            ("release_vested", FunctionRole::Release),
            ("update_config", FunctionRole::Custom),
        ];
        for (name, role) in cases {
            assert_eq!(FunctionRole::from_name(name), role, "{name}");
        }
    }

    #[test]
    fn public_functions_in_order_without_duplicates() {
        let src = "pub fn initialize(ctx: Context<Initialize>) -> Result<()> {}\n\
                   fn helper() {}\n\
                   pub fn stake<'info>(ctx: Context<'_, '_, '_, 'info, Stake<'info>>) {}\n\
                   pub  fn   claim ( ) {}\n\
                   pub fn initialize() {}";
        assert_eq!(public_functions(src), vec!["initialize", "stake", "claim"]);
    }

    #[test]
    fn markdown_layout() {
        let md = render("use anchor_lang::prelude::*;\n#[program]\npub mod v {\n    pub fn initialize(ctx: Context<Initialize>) -> Result<()> { Ok(()) }\n}\n");
        assert!(md.starts_with("## Program Overview\n\n"));
        assert!(md.contains(ProgramPurpose::AnchorProgram.description()));
        assert!(md.contains("- `initialize`: Sets up program state and accounts.\n"));
        let functions = md.find("## Functions").unwrap();
        let safety = md.find("## Safety Review").unwrap();
        assert!(functions < safety);
        for reminder in SAFETY_REMINDERS {
            assert!(md.contains(reminder));
        }
    }

    #[test]
    fn no_functions() {
        let md = render("just some text");
        assert!(md.contains("No public functions were found.\n"));
        assert!(md.contains(ProgramPurpose::Unrecognized.description()));
    }

    #[tokio::test]
    async fn explain_matches_render() {
        let src = "pub fn stake() {}";
        assert_eq!(explain(src).await, render(src));
    }

    #[tokio::test(start_paused = true)]
    async fn latency_is_simulated() {
        let explainer = Explainer::with_latency(Duration::from_millis(1500));
        let start = tokio::time::Instant::now();
        let md = explainer.explain("pub fn harvest() {}").await;
        assert!(start.elapsed() >= Duration::from_millis(1500));
        assert!(md.contains("- `harvest`: Pays out accrued rewards.\n"));
    }
}
