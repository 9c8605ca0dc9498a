//! Vertical card display for extraction results, artifacts, and feedback.
//!
//! Cards are built as strings so they can be tested; `main` prints them.
//! Each card is grouped into titled sections of aligned key/value rows, and
//! empty sections are skipped.

use std::fmt::Write;

use tokenforge_core::{Artifact, Feedback, ParameterRecord, Segment};

const KEY_WIDTH: usize = 34;

// ── Public API ──

pub fn parameters_card(params: &ParameterRecord) -> String {
    let mut out = String::new();
    header(&mut out, &params.program_name, None);

    section(
        &mut out,
        "Categories",
        &[
            ("is_staking", flag(params.is_staking)),
            ("is_fungible_token", flag(params.is_fungible_token)),
            ("is_vesting", flag(params.is_vesting)),
        ],
    );

    if params.is_staking {
        section(
            &mut out,
            "Staking",
            &[
                ("apr_basis_points", params.apr_basis_points.to_string()),
                (
                    "lockup_duration_seconds",
                    params.lockup_duration_seconds.to_string(),
                ),
                ("reward_token_symbol", params.reward_token_symbol.clone()),
            ],
        );
    }

    let mut penalties = Vec::new();
    if params.has_early_withdrawal_penalty {
        penalties.push((
            "early_withdrawal_penalty_basis_points",
            params.early_withdrawal_penalty_basis_points.to_string(),
        ));
    }
    if params.has_reward_vesting {
        penalties.push((
            "reward_vesting_duration_seconds",
            params.reward_vesting_duration_seconds.to_string(),
        ));
    }
    section(&mut out, "Penalties & Reward Vesting", &penalties);

    if params.is_fungible_token {
        section(
            &mut out,
            "Token",
            &[
                ("token_display_name", params.token_display_name.clone()),
                ("token_symbol", params.token_symbol.clone()),
                ("supply", params.supply.clone()),
            ],
        );
    }

    if params.is_vesting {
        section(
            &mut out,
            "Vesting",
            &[("vesting_cliff", params.vesting_cliff.clone())],
        );
    }

    out
}

/// Artifact card: breakdown, tokenomics, suggestions, then the source text.
pub fn artifact_card(artifact: &Artifact) -> String {
    let mut out = String::new();
    header(&mut out, &artifact.file_name, Some(&artifact.program_name));

    if let Some(breakdown) = &artifact.logic_breakdown {
        let _ = writeln!(out, "Logic");
        let _ = writeln!(out, "  {}", breakdown.purpose);
        for c in &breakdown.components {
            let _ = writeln!(out, "  - {}: {}", c.name, c.description);
        }
        if let Some(notes) = &breakdown.notes {
            let _ = writeln!(out, "  note: {notes}");
        }
        out.push('\n');
    }

    if let Some(t) = &artifact.tokenomics {
        let _ = writeln!(out, "Tokenomics");
        for (key, value) in [("name", &t.name), ("symbol", &t.symbol), ("supply", &t.supply)] {
            let _ = writeln!(out, "  {key:<width$} {value}", width = KEY_WIDTH);
        }
        for rule in &t.rules {
            let _ = writeln!(out, "  - {rule}");
        }
        out.push('\n');
    }

    if !artifact.suggestions.is_empty() {
        let _ = writeln!(out, "Suggestions");
        for s in &artifact.suggestions {
            let _ = writeln!(
                out,
                "  [{}] {}\n      {}",
                s.severity.as_str(),
                s.title,
                s.description
            );
        }
        out.push('\n');
    }

    let _ = writeln!(out, "Source");
    out.push_str(&artifact.full_source_text);
    if !artifact.full_source_text.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// Feedback card: the flattened message, then each action and the text it inserts.
pub fn feedback_card(feedback: Option<&Feedback>) -> String {
    let Some(feedback) = feedback else {
        return "No feedback: the instruction is empty.\n".to_string();
    };

    let mut out = String::new();
    match feedback {
        Feedback::Success { message } => {
            let _ = writeln!(out, "ok: {message}");
        }
        Feedback::Suggestion { message } => {
            let _ = writeln!(out, "suggestion: {}", feedback.rendered());
            let actions: Vec<&Segment> = message
                .iter()
                .filter(|s| matches!(s, Segment::Action { .. }))
                .collect();
            if !actions.is_empty() {
                let _ = writeln!(out, "\nActions");
                for seg in actions {
                    if let Segment::Action { text, insertion } = seg {
                        let _ = writeln!(
                            out,
                            "  {:<width$} inserts {insertion:?}",
                            format!("[{text}]"),
                            width = KEY_WIDTH
                        );
                    }
                }
            }
        }
    }
    out
}

// ── Card helpers ──

fn header(out: &mut String, title: &str, subtitle: Option<&str>) {
    let _ = writeln!(out, "=== {title} ===");
    if let Some(sub) = subtitle.filter(|s| !s.is_empty()) {
        let _ = writeln!(out, "{sub}");
    }
    out.push('\n');
}

fn section(out: &mut String, title: &str, rows: &[(&str, String)]) {
    if rows.is_empty() {
        return;
    }
    let _ = writeln!(out, "{title}");
    for (key, value) in rows {
        let _ = writeln!(out, "  {key:<width$} {value}", width = KEY_WIDTH);
    }
    out.push('\n');
}

fn flag(b: bool) -> String {
    if b { "yes" } else { "no" }.to_string()
}
