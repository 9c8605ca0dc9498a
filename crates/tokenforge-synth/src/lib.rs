//! Artifact synthesis: turns a prompt and a target chain into generated source
//! plus the breakdown, tokenomics, and review suggestions shown beside it.
//!
//! Dispatch is on [`ChainId`]. Chains with a template get a full artifact;
//! every other chain gets the echo artifact, so synthesis never fails.

mod echo;
mod solana;
mod tokenomics;

use chrono::{DateTime, Utc};
use tokenforge_core::{Artifact, ChainId};
use tracing::debug;

pub use tokenomics::tokenomics_summary;

/// Inputs to one synthesis call.
#[derive(Debug, Clone, Copy)]
pub struct SynthRequest<'a> {
    pub prompt: &'a str,
    pub chain: ChainId,
    /// Secondary "AI capability" instruction; blank text counts as absent.
    pub capability: Option<&'a str>,
    pub generated_at: DateTime<Utc>,
}

impl SynthRequest<'_> {
    fn capability(&self) -> Option<&str> {
        self.capability.filter(|c| !c.trim().is_empty())
    }

    /// Generation timestamp as RFC 3339, second precision.
    fn timestamp(&self) -> String {
        self.generated_at
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    }
}

/// Synthesize an artifact stamped with the current time.
pub fn synthesize(prompt: &str, chain: ChainId, capability: Option<&str>) -> Artifact {
    synthesize_at(prompt, chain, capability, Utc::now())
}

/// Synthesize an artifact stamped with `generated_at`.
///
/// Identical arguments always produce an identical artifact.
pub fn synthesize_at(
    prompt: &str,
    chain: ChainId,
    capability: Option<&str>,
    generated_at: DateTime<Utc>,
) -> Artifact {
    let request = SynthRequest {
        prompt,
        chain,
        capability,
        generated_at,
    };

    debug!(
        chain = %chain,
        templated = chain.has_template(),
        prompt_len = prompt.len(),
        "synthesizing artifact"
    );

    match chain {
        ChainId::Solana => solana::render(&request),
        ChainId::Ethereum | ChainId::Polygon | ChainId::Sui | ChainId::Aptos => {
            echo::render(&request)
        }
    }
}
