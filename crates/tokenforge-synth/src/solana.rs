//! Anchor program template for Solana.

use tokenforge_core::units::describe_seconds;
use tokenforge_core::{
    Artifact, Component, LogicBreakdown, ParameterRecord, Severity, Suggestion, extract,
};

use crate::SynthRequest;
use crate::tokenomics::{format_basis_points, tokenomics_summary};

/// Stand-in for `declare_id!`. Not a valid base58 key, so the generated
/// program refuses to build until a real ID is substituted.
const PLACEHOLDER_PROGRAM_ID: &str = "REPLACE_WITH_YOUR_PROGRAM_ID";

const BANNER: &str = "// Generated by TokenForge: describe it, deploy it.";

const BREAKDOWN_NOTE: &str = "This breakdown covers the generated entry point only. \
Review every instruction, account constraint, and arithmetic path before deploying.";

pub(crate) fn render(request: &SynthRequest<'_>) -> Artifact {
    let params = extract(request.prompt);

    Artifact {
        file_name: format!("{}.rs", params.program_name),
        full_source_text: source_text(request, &params),
        program_name: params.program_name.clone(),
        logic_breakdown: Some(logic_breakdown(&params)),
        tokenomics: Some(tokenomics_summary(&params)),
        suggestions: suggestions(&params),
    }
}

// ── Source emission ──

fn source_text(request: &SynthRequest<'_>, params: &ParameterRecord) -> String {
    let mut out = String::new();

    out.push_str(BANNER);
    out.push('\n');
    push_commented_block(&mut out, "Prompt", request.prompt);
    if let Some(capability) = request.capability() {
        push_commented_block(&mut out, "AI capability", capability);
    }
    out.push_str(&format!("// Generated at: {}\n", request.timestamp()));
    out.push('\n');

    out.push_str("use anchor_lang::prelude::*;\n\n");
    out.push_str("// Placeholder program ID. Replace before real deployment.\n");
    out.push_str(&format!("declare_id!(\"{PLACEHOLDER_PROGRAM_ID}\");\n\n"));

    out.push_str("#[program]\n");
    out.push_str(&format!("pub mod {} {{\n", params.program_name));
    out.push_str("    use super::*;\n\n");
    out.push_str("    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {\n");
    push_msg(&mut out, &format!("Initializing {}", params.program_name));
    out.push_str("        msg!(\"Authority: {}\", ctx.accounts.authority.key());\n");

    for line in narrative(params) {
        push_msg(&mut out, &line);
    }

    out.push_str("        Ok(())\n");
    out.push_str("    }\n");
    out.push_str("}\n\n");

    out.push_str("#[derive(Accounts)]\n");
    out.push_str("pub struct Initialize<'info> {\n");
    out.push_str("    #[account(mut)]\n");
    out.push_str("    pub authority: Signer<'info>,\n");
    out.push_str("    pub system_program: Program<'info, System>,\n");
    out.push_str("}\n");

    out
}

/// Log lines describing each active category, in staking / token / vesting order.
fn narrative(params: &ParameterRecord) -> Vec<String> {
    let mut lines = Vec::new();

    if params.is_staking {
        lines.push(format!(
            "Staking enabled: {} APR, rewards paid in {}",
            format_basis_points(params.apr_basis_points),
            params.reward_token_symbol
        ));
        lines.push(format!(
            "Lockup period: {} seconds ({})",
            params.lockup_duration_seconds,
            describe_seconds(params.lockup_duration_seconds)
        ));
        if params.has_early_withdrawal_penalty {
            lines.push(format!(
                "Early withdrawal penalty: {}",
                format_basis_points(params.early_withdrawal_penalty_basis_points)
            ));
        }
        if params.has_reward_vesting {
            lines.push(format!(
                "Rewards vest over {} seconds ({})",
                params.reward_vesting_duration_seconds,
                describe_seconds(params.reward_vesting_duration_seconds)
            ));
        }
    }

    if params.is_fungible_token {
        lines.push(format!(
            "Token: {} ({}), total supply {}",
            params.token_display_name, params.token_symbol, params.supply
        ));
    }

    if params.is_vesting {
        lines.push(format!(
            "Vesting schedule enabled, cliff: {}",
            params.vesting_cliff
        ));
    }

    lines
}

fn push_commented_block(out: &mut String, label: &str, text: &str) {
    out.push_str(&format!("// {label}:\n"));
    for line in text.lines() {
        out.push_str("//   ");
        out.push_str(line);
        out.push('\n');
    }
}

fn push_msg(out: &mut String, text: &str) {
    out.push_str(&format!("        msg!(\"{}\");\n", escape_msg(text)));
}

/// Escape text for a `msg!` format string literal.
fn escape_msg(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '{' => escaped.push_str("{{"),
            '}' => escaped.push_str("}}"),
            '\n' | '\r' => escaped.push(' '),
            _ => escaped.push(c),
        }
    }
    escaped
}

// ── Metadata ──

fn logic_breakdown(params: &ParameterRecord) -> LogicBreakdown {
    LogicBreakdown {
        purpose: format!(
            "Anchor program `{}` generated from a natural-language description.",
            params.program_name
        ),
        components: vec![Component {
            name: "initialize".to_string(),
            description: "Entry point that sets up the program and logs the configured parameters."
                .to_string(),
        }],
        notes: Some(BREAKDOWN_NOTE.to_string()),
    }
}

/// The two fixed reminders, then warnings for flagged features with no magnitude.
fn suggestions(params: &ParameterRecord) -> Vec<Suggestion> {
    let mut out = vec![
        Suggestion {
            title: "Replace the placeholder program ID".to_string(),
            description: format!(
                "declare_id! uses \"{PLACEHOLDER_PROGRAM_ID}\". Generate a keypair, \
                 substitute its public key, and rebuild before real deployment."
            ),
            severity: Severity::Critical,
        },
        Suggestion {
            title: "Add more instructions".to_string(),
            description: "Only an initialize instruction was generated. Describe deposits, \
                          withdrawals, or claims to get the rest of the program logic."
                .to_string(),
            severity: Severity::Info,
        },
    ];

    if params.has_early_withdrawal_penalty && params.early_withdrawal_penalty_basis_points == 0 {
        out.push(Suggestion {
            title: "Penalty rate not specified".to_string(),
            description: "An early withdrawal penalty was requested without a rate, so it is \
                          0%. State it in the prompt, e.g. \"10% early withdrawal penalty\"."
                .to_string(),
            severity: Severity::Warning,
        });
    }

    if params.has_reward_vesting && params.reward_vesting_duration_seconds == 0 {
        out.push(Suggestion {
            title: "Reward vesting period not specified".to_string(),
            description: "Reward vesting was requested without a duration, so rewards vest \
                          immediately. State it in the prompt, e.g. \"rewards vest over 90 days\"."
                .to_string(),
            severity: Severity::Warning,
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tokenforge_core::ChainId;

    fn request<'a>(prompt: &'a str, capability: Option<&'a str>) -> SynthRequest<'a> {
        SynthRequest {
            prompt,
            chain: ChainId::Solana,
            capability,
            generated_at: Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn header_echoes_prompt_capability_and_time() {
        let artifact = render(&request("Create a program named my_vault", Some("monitor prices")));
        let src = &artifact.full_source_text;
        assert!(src.starts_with(BANNER));
        assert!(src.contains("//   Create a program named my_vault\n"));
        assert!(src.contains("// AI capability:\n//   monitor prices\n"));
        assert!(src.contains("// Generated at: 2026-10-19T12:00:00Z\n"));
        assert!(src.contains("// Placeholder program ID. Replace before real deployment.\n"));
        assert!(src.contains(&format!("declare_id!(\"{PLACEHOLDER_PROGRAM_ID}\");")));
    }

    #[test]
    fn multiline_prompt_stays_commented() {
        let artifact = render(&request("line one\nline two", None));
        let src = &artifact.full_source_text;
        assert!(src.contains("//   line one\n//   line two\n"));
        assert!(!src.contains("// AI capability:"));
    }

    #[test]
    fn initialize_is_unconditional() {
        let artifact = render(&request("", None));
        assert_eq!(artifact.program_name, "my_program");
        assert_eq!(artifact.file_name, "my_program.rs");
        assert!(artifact.full_source_text.contains("pub mod my_program {"));
        assert!(
            artifact
                .full_source_text
                .contains("pub fn initialize(ctx: Context<Initialize>) -> Result<()>")
        );
        assert!(!artifact.full_source_text.contains("Staking enabled"));
    }

    #[test]
    fn staking_narrative() {
        let artifact = render(&request(
            "staking program named gem_vault, 8% APR, 30 day lockup, 10% early withdrawal penalty",
            None,
        ));
        let src = &artifact.full_source_text;
        assert!(src.contains("msg!(\"Staking enabled: 8.00% APR, rewards paid in RWRD\");"));
        assert!(src.contains("msg!(\"Lockup period: 2592000 seconds (1 month)\");"));
        assert!(src.contains("msg!(\"Early withdrawal penalty: 10.00%\");"));
        assert!(!src.contains("Rewards vest over"));
    }

    #[test]
    fn all_categories_at_once() {
        let artifact = render(&request(
            "mint a token named Gem with symbol GEM, stake it, 4 year vesting with 1 year cliff",
            None,
        ));
        let src = &artifact.full_source_text;
        assert!(src.contains("Staking enabled"));
        assert!(src.contains("msg!(\"Token: Gem (GEM), total supply 1000000000\");"));
        assert!(src.contains("msg!(\"Vesting schedule enabled, cliff: 1 year\");"));

        let staking = src.find("Staking enabled").unwrap();
        let token = src.find("Token: Gem").unwrap();
        let vesting = src.find("Vesting schedule").unwrap();
        assert!(staking < token && token < vesting);
    }

    #[test]
    fn keyword_name_yields_valid_module() {
        let artifact = render(&request("a program named match", None));
        assert_eq!(artifact.program_name, "_match");
        assert_eq!(artifact.file_name, "_match.rs");
        assert!(artifact.full_source_text.contains("pub mod _match {"));
        assert!(!artifact.full_source_text.contains("pub mod match {"));
    }

    #[test]
    fn msg_text_is_escaped() {
        assert_eq!(escape_msg(r#"say "hi" {now}"#), r#"say \"hi\" {{now}}"#);
        assert_eq!(escape_msg("a\\b"), "a\\\\b");
    }

    #[test]
    fn quoted_token_name_is_escaped_in_source() {
        let artifact = render(&request(r#"create a token called "Gem {v2}""#, None));
        assert!(
            artifact
                .full_source_text
                .contains("msg!(\"Token: Gem {{v2}} (MTK), total supply 1000000000\");")
        );
    }

    #[test]
    fn breakdown_is_single_component() {
        let artifact = render(&request("program named vault", None));
        let breakdown = artifact.logic_breakdown.unwrap();
        assert_eq!(breakdown.components.len(), 1);
        assert_eq!(breakdown.components[0].name, "initialize");
        assert!(breakdown.purpose.contains("`vault`"));
        assert_eq!(breakdown.notes.as_deref(), Some(BREAKDOWN_NOTE));
    }

    #[test]
    fn fixed_suggestions_always_lead() {
        for prompt in ["", "program named vault", "staking with early withdrawal penalty"] {
            let s = render(&request(prompt, None)).suggestions;
            assert!(s.len() >= 2);
            assert_eq!(s[0].severity, Severity::Critical);
            assert_eq!(s[0].title, "Replace the placeholder program ID");
            assert_eq!(s[1].severity, Severity::Info);
            assert_eq!(s[1].title, "Add more instructions");
        }
    }

    #[test]
    fn flagged_features_without_magnitude_warn() {
        let s = render(&request(
            "staking with an early withdrawal penalty where rewards vest slowly",
            None,
        ))
        .suggestions;
        assert_eq!(s.len(), 4);
        assert!(s[2..].iter().all(|x| x.severity == Severity::Warning));

        let s = render(&request(
            "staking with a 5% early withdrawal penalty, rewards vest over 30 days",
            None,
        ))
        .suggestions;
        assert_eq!(s.len(), 2);
    }
}
