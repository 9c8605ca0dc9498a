//! tokenforge: describe an on-chain program in plain language, get a starting point.
//!
//! ```bash
//! tokenforge extract "Create a staking program named gem_vault with 8% APR"
//! tokenforge synthesize prompt.txt --chain solana --capability "monitor whale wallets"
//! tokenforge advise "add ai"
//! tokenforge synthesize - --source-only < prompt.txt | tokenforge explain
//! ```

mod display;

use std::io::Read;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tokenforge_ai::{Explainer, advise, classify};
use tokenforge_core::{ChainId, extract};
use tokenforge_synth::synthesize_at;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tokenforge",
    version,
    about = "Turn a plain-language program description into a starting artifact"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON instead of human-readable format
    #[arg(long, global = true, env = "TOKENFORGE_JSON")]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the parameters found in a prompt
    Extract {
        /// Prompt text, a file path, or `-` for stdin
        prompt: Option<String>,
    },

    /// Generate an artifact for a target chain
    Synthesize {
        /// Prompt text, a file path, or `-` for stdin
        prompt: Option<String>,

        /// Target chain: solana, ethereum, polygon, sui, aptos
        #[arg(long, env = "TOKENFORGE_CHAIN", default_value = "solana")]
        chain: ChainId,

        /// Secondary "AI capability" instruction echoed into the artifact
        #[arg(long)]
        capability: Option<String>,

        /// Generation time (RFC 3339); defaults to now
        #[arg(long)]
        timestamp: Option<DateTime<Utc>>,

        /// Print only the generated source text
        #[arg(long)]
        source_only: bool,
    },

    /// Get feedback on an AI capability instruction
    Advise {
        /// Instruction text or `-` for stdin
        text: Option<String>,
    },

    /// Explain generated program source as markdown
    Explain {
        /// Source file or `-` for stdin
        file: Option<String>,

        /// Simulated latency before the explanation is returned
        #[arg(long, env = "TOKENFORGE_EXPLAIN_LATENCY_MS", default_value_t = 0)]
        latency_ms: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("tokenforge v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Extract { prompt } => {
            let prompt = read_input(prompt.as_deref(), true)?;
            let params = extract(&prompt);
            emit(cli.json, &params, || display::parameters_card(&params))?;
        }
        Commands::Synthesize {
            prompt,
            chain,
            capability,
            timestamp,
            source_only,
        } => {
            let prompt = read_input(prompt.as_deref(), true)?;
            let generated_at = timestamp.unwrap_or_else(Utc::now);
            let artifact = synthesize_at(&prompt, chain, capability.as_deref(), generated_at);
            info!(file = %artifact.file_name, chain = %chain, "artifact generated");
            if source_only {
                print!("{}", artifact.full_source_text);
            } else {
                emit(cli.json, &artifact, || display::artifact_card(&artifact))?;
            }
        }
        Commands::Advise { text } => {
            let text = read_input(text.as_deref(), false)?;
            info!(rule = classify(&text).as_str(), "advisor rule");
            let feedback = advise(&text);
            emit(cli.json, &feedback, || display::feedback_card(feedback.as_ref()))?;
        }
        Commands::Explain { file, latency_ms } => {
            let source = read_input(file.as_deref(), true)?;
            let explainer = Explainer::with_latency(Duration::from_millis(latency_ms));
            let markdown = explainer.explain(&source).await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&markdown)?);
            } else {
                print!("{markdown}");
            }
        }
    }

    Ok(())
}

/// Print `value` as pretty JSON, or the card built by `card`.
fn emit<T: Serialize>(json: bool, value: &T, card: impl FnOnce() -> String) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(value).context("serializing output")?;
        println!("{out}");
    } else {
        print!("{}", card());
    }
    Ok(())
}

/// Resolve a positional input: absent or `-` reads stdin. When `may_be_path`
/// is set and the argument names an existing file, the file is read;
/// otherwise the argument is the text itself.
fn read_input(arg: Option<&str>, may_be_path: bool) -> Result<String> {
    match arg {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
        Some(value) if may_be_path && Path::new(value).is_file() => {
            std::fs::read_to_string(value).with_context(|| format!("reading {value}"))
        }
        Some(value) => Ok(value.to_string()),
    }
}
